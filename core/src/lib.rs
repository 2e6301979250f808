#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod tile;
mod types;

/// How the number of mines is requested: a plain count or a density of the
/// field area.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MineSpec {
    Count(i32),
    /// Fraction of all cells in `[0, 1]`, floored to a whole count.
    Fraction(f32),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    /// Density last picked with [`MineSpec::Fraction`]; resizing re-derives
    /// the count from it.
    #[serde(default)]
    density: Option<f32>,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            density: None,
        }
    }

    /// Best-effort configuration: sides are clamped to `[1, 50]` and the mine
    /// count to `[0, width * height - 1]`.
    pub fn new(width: i32, height: i32, mines: MineSpec) -> Self {
        let size = (clamp_side(width), clamp_side(height));
        Self::new_unchecked(size, 0).with_mines(mines)
    }

    /// Strict configuration, rejecting anything [`GameConfig::new`] would clamp.
    pub fn try_new(width: i32, height: i32, mines: MineSpec) -> Result<Self> {
        let side_range = i32::from(MIN_SIDE)..=i32::from(MAX_SIDE);
        if !side_range.contains(&width) || !side_range.contains(&height) {
            return Err(GameError::InvalidDimension);
        }
        let size = (width as Coord, height as Coord);
        let total = mult(size.0, size.1);

        match mines {
            MineSpec::Count(count) => {
                if count < 0 || count > i32::from(max_mines(total)) {
                    return Err(GameError::InvalidMineCount);
                }
                Ok(Self::new_unchecked(size, count as CellCount))
            }
            MineSpec::Fraction(fraction) => {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(GameError::InvalidMineCount);
                }
                let count = floor_fraction(total, fraction);
                if count > max_mines(total) {
                    return Err(GameError::InvalidMineCount);
                }
                Ok(Self {
                    size,
                    mines: count,
                    density: Some(fraction),
                })
            }
        }
    }

    pub fn with_width(self, width: i32) -> Self {
        self.resized((clamp_side(width), self.size.1))
    }

    pub fn with_height(self, height: i32) -> Self {
        self.resized((self.size.0, clamp_side(height)))
    }

    pub fn with_mines(self, mines: MineSpec) -> Self {
        match mines {
            MineSpec::Count(count) => self.with_mine_count(count),
            MineSpec::Fraction(fraction) => self.with_mine_fraction(fraction),
        }
    }

    pub fn with_mine_count(self, count: i32) -> Self {
        let max = i32::from(max_mines(self.total_cells()));
        Self {
            mines: count.clamp(0, max) as CellCount,
            density: None,
            ..self
        }
    }

    pub fn with_mine_fraction(self, fraction: f32) -> Self {
        let fraction = clamp_fraction(fraction);
        let total = self.total_cells();
        Self {
            mines: floor_fraction(total, fraction).min(max_mines(total)),
            density: Some(fraction),
            ..self
        }
    }

    fn resized(self, size: Coord2) -> Self {
        let total = mult(size.0, size.1);
        let mines = match self.density {
            Some(fraction) => floor_fraction(total, fraction),
            None => self.mines,
        };
        Self {
            size,
            mines: mines.min(max_mines(total)),
            density: self.density,
        }
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Effective mine density of the current count.
    pub fn mine_fraction(&self) -> f32 {
        f32::from(self.mines) / f32::from(self.total_cells())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((6, 6), 6)
    }
}

fn clamp_side(side: i32) -> Coord {
    side.clamp(i32::from(MIN_SIDE), i32::from(MAX_SIDE)) as Coord
}

fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// `floor(total * fraction)`; the cast truncates, which is floor for the
/// non-negative products reaching it.
fn floor_fraction(total: CellCount, fraction: f32) -> CellCount {
    (f32::from(total) * clamp_fraction(fraction)) as CellCount
}

/// Largest mine count that still leaves a safe cell.
pub const fn max_mines(total: CellCount) -> CellCount {
    total.saturating_sub(1)
}

/// Mine placement for one game, produced by a [`MinefieldGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Serialized form of [`MineLayout`], checked before use.
#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        let layout = Self::from_mine_mask(raw.mine_mask)?;
        if layout.mine_count != raw.mine_count {
            return Err(GameError::InvalidMineCount);
        }
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn from_parts(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Takes a row-major `(height, width)` mask. Sides must be in `[1, 50]` and
    /// at least one cell must be free of mines.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let side_range = usize::from(MIN_SIDE)..=usize::from(MAX_SIDE);
        if !side_range.contains(&rows) || !side_range.contains(&cols) {
            return Err(GameError::InvalidDimension);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        if mine_count > usize::from(max_mines(mine_mask.len() as CellCount)) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self::from_parts(mine_mask, mine_count as CellCount))
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let side_range = MIN_SIDE..=MAX_SIDE;
        if !side_range.contains(&size.0) || !side_range.contains(&size.1) {
            return Err(GameError::InvalidDimension);
        }

        let mut mine_mask: Array2<bool> = Array2::default(to_nd_shape(size));
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidPosition);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn mine_coords(&self) -> BTreeSet<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((y, x), _)| (x as Coord, y as Coord))
            .collect()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of revealing one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// A mine was struck earlier; nothing changes until a new field is generated.
    AlreadyLost,
    /// The coordinates lie outside the field.
    InvalidPosition,
    /// The cell was revealed before; nothing changes.
    AlreadyRevealed,
    /// A mine was hit. Holds every mined cell, all of which are now revealed.
    StruckMine(BTreeSet<Coord2>),
    /// A single cell bordering `count` mines was revealed.
    RevealedNumbered(u8),
    /// A zero cell was hit and the cascade revealed all of these cells.
    RevealedRegion(BTreeSet<Coord2>),
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadyLost => false,
            InvalidPosition => false,
            AlreadyRevealed => false,
            StruckMine(_) => true,
            RevealedNumbered(_) => true,
            RevealedRegion(_) => true,
        }
    }

    pub const fn is_loss(&self) -> bool {
        matches!(self, Self::StruckMine(_))
    }
}
