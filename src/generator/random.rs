use ndarray::Array2;
use rand::prelude::*;

use super::*;
use crate::{Coord2, ToNdIndex};

/// Uniform mine placement: draws `(row, col)` pairs from a seeded RNG,
/// rejecting cells that already hold a mine, until the requested number of
/// distinct mines is placed. Deterministic per seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGenerator {
    seed: u64,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.bounds().to_nd_index());

        // A validated config always leaves at least one free cell, so the
        // sampling loop terminates.
        let mut placed = 0;
        while placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..config.height),
                rng.random_range(0..config.width),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        log::debug!(
            "placed {} mines on {}x{} board, seed {}",
            placed,
            config.height,
            config.width,
            self.seed
        );

        Minefield::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        let config = GameConfig::new(9, 9, 10).unwrap();

        let minefield = RandomGenerator::new(42).generate(config);

        assert_eq!(minefield.mine_count(), 10);
        assert_eq!(minefield.mine_coords().count(), 10);
    }

    #[test]
    fn same_seed_reproduces_the_same_minefield() {
        let config = GameConfig::new(8, 8, 12).unwrap();

        let first = RandomGenerator::new(7).generate(config);
        let second = RandomGenerator::new(7).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn counts_agree_with_a_brute_force_recount() {
        let config = GameConfig::new(6, 5, 7).unwrap();

        let minefield = RandomGenerator::new(3).generate(config);

        for row in 0..config.height {
            for col in 0..config.width {
                let mut expected = 0;
                for d_row in -1i16..=1 {
                    for d_col in -1i16..=1 {
                        if d_row == 0 && d_col == 0 {
                            continue;
                        }
                        let n_row = i16::from(row) + d_row;
                        let n_col = i16::from(col) + d_col;
                        if (0..i16::from(config.height)).contains(&n_row)
                            && (0..i16::from(config.width)).contains(&n_col)
                            && minefield.contains_mine((n_row as Coord, n_col as Coord))
                        {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(minefield.adjacent_mines((row, col)), expected);
            }
        }
    }

    #[test]
    fn survives_a_nearly_full_board() {
        let config = GameConfig::new(4, 4, 15).unwrap();

        let minefield = RandomGenerator::new(0).generate(config);

        assert_eq!(minefield.mine_count(), 15);
        assert_eq!(minefield.safe_cell_count(), 1);
    }
}
