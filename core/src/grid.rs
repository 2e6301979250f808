use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Cells of one game, stored row-major so the flat order is `y * width + x`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
}

impl Grid {
    pub fn new(layout: &MineLayout) -> Self {
        let size = layout.size();
        let cells = Array2::from_shape_fn(to_nd_shape(size), |(y, x)| Cell {
            has_mine: layout[(x as Coord, y as Coord)],
            state: CellState::Hidden,
        });
        let mine_count = cells.iter().filter(|cell| cell.has_mine).count() as CellCount;
        Self {
            cells,
            mine_count,
            revealed_safe: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in flat `row * width + col` order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn states(&self) -> Array2<CellState> {
        self.cells.map(|cell| cell.state)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.safe_cell_count() - self.revealed_safe
    }

    /// Mines among the in-bounds neighbors of `coords`, never more than 8.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mine_coords(&self) -> BTreeSet<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|&(_, cell)| cell.has_mine)
            .map(|((y, x), _)| (x as Coord, y as Coord))
            .collect()
    }

    /// Marks a hidden safe cell revealed. Returns whether anything changed.
    pub(crate) fn reveal_safe(&mut self, coords: Coord2, adjacent_mines: u8) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.has_mine || cell.state.is_revealed() {
            return false;
        }
        cell.state = CellState::RevealedSafe(adjacent_mines);
        self.revealed_safe += 1;
        true
    }

    /// Reveals every mined cell and returns their positions.
    pub(crate) fn reveal_mines(&mut self) -> BTreeSet<Coord2> {
        let mut mines = BTreeSet::new();
        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            if cell.has_mine {
                cell.state = CellState::RevealedMine;
                mines.insert((x as Coord, y as Coord));
            }
        }
        mines
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
