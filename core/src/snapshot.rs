use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible view of a game, what a presentation layer renders.
/// Hidden cells carry no mine information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub lost: bool,
    pub remaining_safe_cells: CellCount,
    pub cells: Array2<CellState>,
}

impl GridSnapshot {
    pub fn from_engine(engine: &MinefieldEngine) -> Self {
        let grid = engine.grid();
        Self {
            size: grid.size(),
            mine_count: grid.mine_count(),
            lost: engine.is_lost(),
            remaining_safe_cells: grid.remaining_safe_cells(),
            cells: grid.states(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: Coord) -> ArrayView1<'_, CellState> {
        self.cells.row(y.into())
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, CellState>> {
        self.cells.rows().into_iter()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|state| state.is_revealed()).count()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn from_engine_maps_cell_states() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0)]).unwrap();
        let mut engine = MinefieldEngine::from_layout(layout);

        engine.reveal((2, 1));
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.size, (3, 2));
        assert_eq!(snapshot.mine_count, 1);
        assert!(!snapshot.lost);
        assert_eq!(snapshot.cell_at((0, 0)), Some(CellState::Hidden));
        assert_eq!(snapshot.cell_at((1, 1)), Some(CellState::RevealedSafe(1)));
        assert_eq!(snapshot.cell_at((3, 0)), None);
        assert_eq!(snapshot.revealed_count(), 4);
        assert_eq!(snapshot.remaining_safe_cells, 1);
    }

    #[test]
    fn rows_run_top_to_bottom() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(2, 1)]).unwrap();
        let mut engine = MinefieldEngine::from_layout(layout);
        engine.reveal((2, 1));

        let snapshot = engine.snapshot();
        let rows: Vec<Vec<CellState>> = snapshot.rows().map(|row| row.to_vec()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], CellState::RevealedMine);
        assert_eq!(snapshot.row(0).len(), 3);
    }
}
