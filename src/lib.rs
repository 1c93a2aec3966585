use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod events;
mod generator;
mod session;
mod types;

/// Board shape and mine count, the whole runtime configuration surface.
///
/// `width` columns by `height` rows; `mines` may be zero but must leave at
/// least one safe cell. [`GameConfig::new`] is the validated entry point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 || mines >= mult(width, height) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    /// Grid bounds as `(rows, cols)`.
    pub(crate) const fn bounds(&self) -> Coord2 {
        (self.height, self.width)
    }
}

/// Mine placement for one board, with adjacency counts precomputed at
/// construction by incrementing every in-bounds neighbor of every mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl Minefield {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mut counts: Array2<u8> = Array2::zeros(mines.raw_dim());

        let mine_coords: Vec<Coord2> = mines
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| -> Coord2 {
                (row.try_into().unwrap(), col.try_into().unwrap())
            })
            .collect();

        for &coords in &mine_coords {
            for pos in counts.iter_neighbors(coords) {
                counts[pos.to_nd_index()] += 1;
            }
        }

        Self {
            mines,
            counts,
            mine_count: mine_coords.len().try_into().unwrap(),
        }
    }

    /// Builds a minefield with mines at exactly the given coordinates.
    /// `bounds` is `(rows, cols)`.
    pub fn from_mine_coords(bounds: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(bounds.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= bounds.0 || coords.1 >= bounds.1 {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn config(&self) -> GameConfig {
        let (height, width) = self.bounds();
        GameConfig {
            width,
            height,
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.bounds();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Grid bounds as `(rows, cols)`.
    pub fn bounds(&self) -> Coord2 {
        let dim = self.mines.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.counts[coords.to_nd_index()]
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| -> Coord2 {
                (row.try_into().unwrap(), col.try_into().unwrap())
            })
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mines.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[coords.to_nd_index()]
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Detonated,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
