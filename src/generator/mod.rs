use crate::{GameConfig, Minefield};

pub use random::*;

mod random;

/// Strategy for placing mines on a fresh board.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield;
}
