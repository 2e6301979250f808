use super::*;

/// Uniform placement by sampling random positions and rejecting the ones that
/// already hold a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (width, height) = config.size;
        let total_cells = config.total_cells();
        let mut mines: Array2<bool> = Array2::default(to_nd_shape(config.size));

        if total_cells == 0 {
            log::warn!("Empty field requested, no mines placed");
            return MineLayout::from_parts(mines, 0);
        }

        let mut mines_to_place = config.mines;
        if mines_to_place > max_mines(total_cells) {
            log::warn!(
                "Minefield cannot hold {} mines with a safe cell left, placing {}",
                mines_to_place,
                max_mines(total_cells)
            );
            mines_to_place = max_mines(total_cells);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;
        let mut rejected = 0u32;
        while placed < mines_to_place {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} ({} samples rejected)",
            placed,
            width,
            height,
            rejected
        );
        MineLayout::from_parts(mines, placed)
    }
}
