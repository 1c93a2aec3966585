use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell. The payload of `Revealed`
/// is the adjacent-mine count shown on the cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(u8),
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
