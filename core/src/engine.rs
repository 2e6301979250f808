use alloc::collections::BTreeSet;
use alloc::vec;
use rand::prelude::*;

use crate::*;

/// Owns one game: the active configuration, the current grid and whether a
/// mine has been struck.
#[derive(Clone, Debug)]
pub struct MinefieldEngine {
    config: GameConfig,
    grid: Grid,
    lost: bool,
    rng: SmallRng,
}

impl MinefieldEngine {
    /// Creates an engine and generates its first field. Every later
    /// [`generate`](Self::generate) derives its own seed from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = RandomMinefieldGenerator::new(rng.random()).generate(config);
        Self {
            config,
            grid: Grid::new(&layout),
            lost: false,
            rng,
        }
    }

    /// Starts from a known layout instead of a random one.
    pub fn from_layout(layout: MineLayout) -> Self {
        Self {
            config: layout.game_config(),
            grid: Grid::new(&layout),
            lost: false,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Stores new settings, clamped. Takes effect on the next generation.
    pub fn configure(&mut self, width: i32, height: i32, mines: MineSpec) {
        self.set_config(GameConfig::new(width, height, mines));
    }

    /// Like [`configure`](Self::configure), but rejects out of range settings.
    pub fn try_configure(&mut self, width: i32, height: i32, mines: MineSpec) -> Result<()> {
        self.set_config(GameConfig::try_new(width, height, mines)?);
        Ok(())
    }

    pub fn set_config(&mut self, config: GameConfig) {
        log::debug!(
            "configured {}x{} with {} mines",
            config.width(),
            config.height(),
            config.mines
        );
        self.config = config;
    }

    /// Builds a fresh field from the stored settings.
    pub fn generate(&mut self) -> GridSnapshot {
        let seed = self.rng.random();
        self.generate_with(RandomMinefieldGenerator::new(seed))
    }

    pub fn generate_with<G: MinefieldGenerator>(&mut self, generator: G) -> GridSnapshot {
        let layout = generator.generate(self.config);
        if layout.size() != self.config.size || layout.mine_count() != self.config.mines {
            self.config = layout.game_config();
        }
        self.grid = Grid::new(&layout);
        self.lost = false;
        self.snapshot()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        self.grid.cell(coords).map(|cell| cell.state)
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.grid.remaining_safe_cells()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_engine(self)
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        if !self.grid.contains(coords) {
            return Err(GameError::InvalidPosition);
        }
        Ok(self.grid.adjacent_mine_count(coords))
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if self.lost {
            return AlreadyLost;
        }

        let Some(&cell) = self.grid.cell(coords) else {
            return InvalidPosition;
        };

        if cell.has_mine {
            self.lost = true;
            let mines = self.grid.reveal_mines();
            log::debug!("{:?} had a mine, game lost", coords);
            return StruckMine(mines);
        }

        if cell.state.is_revealed() {
            return AlreadyRevealed;
        }

        let adjacent_mines = self.grid.adjacent_mine_count(coords);
        if adjacent_mines > 0 {
            self.grid.reveal_safe(coords, adjacent_mines);
            log::trace!("{:?} revealed with {} adjacent mines", coords, adjacent_mines);
            RevealedNumbered(adjacent_mines)
        } else {
            let region = self.expand(coords);
            log::trace!("{:?} opened a region of {} cells", coords, region.len());
            RevealedRegion(region)
        }
    }

    /// Zero-reveal cascade from `start`, driven by a worklist. Stops at mines,
    /// revealed cells and numbered cells; each cell is revealed at most once.
    fn expand(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut revealed = BTreeSet::new();
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = self.grid[coords];
            if cell.has_mine || cell.state.is_revealed() {
                continue;
            }

            let adjacent_mines = self.grid.adjacent_mine_count(coords);
            self.grid.reveal_safe(coords, adjacent_mines);
            revealed.insert(coords);

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.grid[pos].state.is_hidden()),
                );
            }
        }

        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> MinefieldEngine {
        MinefieldEngine::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_mine_loses_and_exposes_all_mines() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2)]);

        let outcome = engine.reveal((2, 2));

        assert_eq!(outcome, RevealOutcome::StruckMine(BTreeSet::from([(0, 0), (2, 2)])));
        assert!(engine.is_lost());
        assert_eq!(engine.cell_at((0, 0)), Some(CellState::RevealedMine));
        assert_eq!(engine.cell_at((1, 1)), Some(CellState::Hidden));
    }

    #[test]
    fn reveal_numbered_cell_reveals_only_that_cell() {
        let mut engine = engine((3, 3), &[(2, 2)]);

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::RevealedNumbered(1));
        assert_eq!(engine.cell_at((1, 1)), Some(CellState::RevealedSafe(1)));
        assert_eq!(engine.remaining_safe_cells(), 7);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let mut engine = engine((4, 1), &[(3, 0)]);

        let outcome = engine.reveal((0, 0));

        assert_eq!(
            outcome,
            RevealOutcome::RevealedRegion(BTreeSet::from([(0, 0), (1, 0), (2, 0)]))
        );
        assert_eq!(engine.cell_at((2, 0)), Some(CellState::RevealedSafe(1)));
        assert_eq!(engine.cell_at((3, 0)), Some(CellState::Hidden));
    }

    #[test]
    fn flood_fill_does_not_cross_mine_walls() {
        let mut engine = engine((5, 3), &[(2, 0), (2, 1), (2, 2)]);

        let RevealOutcome::RevealedRegion(region) = engine.reveal((0, 1)) else {
            panic!("expected a region");
        };

        assert_eq!(region.len(), 6);
        assert!(region.iter().all(|&(x, _)| x < 2));
        assert_eq!(engine.cell_at((4, 1)), Some(CellState::Hidden));
    }

    #[test]
    fn second_reveal_of_same_cell_is_no_op() {
        let mut engine = engine((3, 3), &[(2, 2)]);

        engine.reveal((0, 0));
        let before = engine.snapshot();

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::AlreadyRevealed);
        assert_eq!(engine.reveal((1, 1)), RevealOutcome::AlreadyRevealed);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut engine = engine((3, 3), &[]);

        assert_eq!(engine.reveal((3, 0)), RevealOutcome::InvalidPosition);
        assert_eq!(engine.count_adjacent_mines((0, 3)), Err(GameError::InvalidPosition));
    }

    #[test]
    fn lost_game_rejects_further_reveals_until_regenerated() {
        let mut engine = engine((2, 2), &[(0, 0)]);

        engine.reveal((0, 0));
        let before = engine.snapshot();

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::AlreadyLost);
        assert_eq!(engine.reveal((9, 9)), RevealOutcome::AlreadyLost);
        assert_eq!(engine.snapshot(), before);

        engine.generate();
        assert!(!engine.is_lost());
        assert!(engine.snapshot().cells.iter().all(|state| state.is_hidden()));
    }

    #[test]
    fn configure_applies_on_generate() {
        let mut engine = MinefieldEngine::new(GameConfig::default(), 5);
        assert_eq!(engine.size(), (6, 6));

        engine.configure(10, 4, MineSpec::Count(7));
        assert_eq!(engine.size(), (6, 6));

        let snapshot = engine.generate();
        assert_eq!(snapshot.size, (10, 4));
        assert_eq!(snapshot.mine_count, 7);
        assert_eq!(engine.grid().mine_count(), 7);
    }

    #[test]
    fn try_configure_keeps_previous_settings_on_error() {
        let mut engine = MinefieldEngine::new(GameConfig::default(), 5);

        assert_eq!(
            engine.try_configure(0, 4, MineSpec::Count(1)),
            Err(GameError::InvalidDimension)
        );
        assert_eq!(engine.config(), GameConfig::default());
    }

    #[test]
    fn same_seed_generates_same_fields() {
        let mut a = MinefieldEngine::new(GameConfig::new(20, 20, MineSpec::Count(60)), 99);
        let mut b = MinefieldEngine::new(GameConfig::new(20, 20, MineSpec::Count(60)), 99);

        assert_eq!(a.grid(), b.grid());
        a.generate();
        b.generate();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn generate_with_layout_adopts_its_config() {
        let mut engine = MinefieldEngine::new(GameConfig::default(), 1);
        let layout = MineLayout::from_mine_coords((3, 2), &[(1, 1)]).unwrap();

        let snapshot = engine.generate_with(layout);

        assert_eq!(snapshot.size, (3, 2));
        assert_eq!(engine.config(), GameConfig::new_unchecked((3, 2), 1));
    }
}
