use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    CellCount, CellState, CellUpdate, CellView, Coord2, FlagOutcome, GameConfig, Minefield,
    Result, RevealOutcome, ToNdIndex,
};

/// Rules engine for a single board: owns every cell's state and applies
/// reveal and flag actions against a fixed [`Minefield`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    minefield: Minefield,
    grid: Array2<CellState>,
    revealed_safe: CellCount,
    flagged: CellCount,
    detonated: Option<Coord2>,
}

impl Board {
    pub fn new(minefield: Minefield) -> Self {
        let bounds = minefield.bounds();
        Self {
            minefield,
            grid: Array2::default(bounds.to_nd_index()),
            revealed_safe: 0,
            flagged: 0,
            detonated: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.minefield.config()
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    /// Row-major iteration over every cell, for full redraws.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, CellState)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((row, col), &state)| -> (Coord2, CellState) {
                ((row.try_into().unwrap(), col.try_into().unwrap()), state)
            })
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flagged(&self) -> CellCount {
        self.flagged
    }

    /// Remaining-mine display value: total mines minus placed flags. Goes
    /// negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.minefield.mine_count()) - i32::from(self.flagged)
    }

    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn is_cleared(&self) -> bool {
        self.revealed_safe == self.minefield.safe_cell_count()
    }

    pub fn is_finished(&self) -> bool {
        self.detonated.is_some() || self.is_cleared()
    }

    /// Reveals the cell at `coords`. A zero-count cell flood-reveals its
    /// connected zero region and that region's border. Every cell whose
    /// state changed is appended to `updates` exactly once.
    ///
    /// Flagged and already-revealed targets are `NoChange`; a flag must be
    /// removed before its cell can be revealed.
    pub fn reveal(
        &mut self,
        coords: Coord2,
        updates: &mut Vec<CellUpdate>,
    ) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;

        if self.is_finished() || !matches!(self.cell_at(coords), CellState::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.minefield.contains_mine(coords) {
            self.set_cell(coords, CellState::Revealed(self.minefield.adjacent_mines(coords)));
            self.detonated = Some(coords);
            updates.push(CellUpdate::new(coords, CellView::Mine));
            log::debug!("mine detonated at {:?}", coords);
            return Ok(RevealOutcome::Detonated);
        }

        self.reveal_safe(coords, updates);
        if self.minefield.adjacent_mines(coords) == 0 {
            self.flood_reveal(coords, updates);
        }

        Ok(if self.is_cleared() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Toggles the flag at `coords`. Revealed cells are silently ignored;
    /// pointer events on them are filtered upstream, but the engine stays
    /// defensive.
    pub fn toggle_flag(
        &mut self,
        coords: Coord2,
        updates: &mut Vec<CellUpdate>,
    ) -> Result<FlagOutcome> {
        let coords = self.minefield.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        let next = match self.cell_at(coords) {
            CellState::Hidden => {
                self.flagged += 1;
                CellState::Flagged
            }
            CellState::Flagged => {
                self.flagged -= 1;
                CellState::Hidden
            }
            CellState::Revealed(_) => return Ok(FlagOutcome::NoChange),
        };
        self.set_cell(coords, next);
        updates.push(CellUpdate::new(coords, next.into()));
        Ok(FlagOutcome::Changed)
    }

    fn reveal_safe(&mut self, coords: Coord2, updates: &mut Vec<CellUpdate>) {
        let adjacent = self.minefield.adjacent_mines(coords);
        self.set_cell(coords, CellState::Revealed(adjacent));
        self.revealed_safe += 1;
        updates.push(CellUpdate::new(coords, CellView::Revealed { adjacent }));
    }

    /// Iterative worklist flood. Cells are marked visited before their
    /// neighbors are enqueued, so each cell is processed at most once no
    /// matter how many zero-count chains reach it. Flags are never
    /// overridden, and mines are unreachable: a zero-count cell has no
    /// mine among its neighbors.
    fn flood_reveal(&mut self, start: Coord2, updates: &mut Vec<CellUpdate>) {
        let mut visited = HashSet::from([start]);
        let mut to_visit: VecDeque<Coord2> = self
            .minefield
            .iter_neighbors(start)
            .filter(|&pos| matches!(self.cell_at(pos), CellState::Hidden))
            .collect();

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            if !matches!(self.cell_at(coords), CellState::Hidden) {
                log::trace!("flood skipping {:?}", coords);
                continue;
            }

            self.reveal_safe(coords, updates);

            if self.minefield.adjacent_mines(coords) == 0 {
                to_visit.extend(
                    self.minefield
                        .iter_neighbors(coords)
                        .filter(|&pos| matches!(self.cell_at(pos), CellState::Hidden))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// After a loss, reveals every mine the player had not flagged.
    /// Correct flags stay in place.
    pub(crate) fn sweep_mines_on_loss(&mut self, updates: &mut Vec<CellUpdate>) {
        let mine_coords: Vec<Coord2> = self.minefield.mine_coords().collect();
        for coords in mine_coords {
            if matches!(self.cell_at(coords), CellState::Hidden) {
                self.set_cell(coords, CellState::Revealed(self.minefield.adjacent_mines(coords)));
                updates.push(CellUpdate::new(coords, CellView::Mine));
            }
        }
    }

    /// After a win, flags every mine the player had not flagged yet.
    pub(crate) fn sweep_mines_on_win(&mut self, updates: &mut Vec<CellUpdate>) {
        let mine_coords: Vec<Coord2> = self.minefield.mine_coords().collect();
        for coords in mine_coords {
            if matches!(self.cell_at(coords), CellState::Hidden) {
                self.set_cell(coords, CellState::Flagged);
                self.flagged += 1;
                updates.push(CellUpdate::new(coords, CellView::Flagged));
            }
        }
    }

    fn set_cell(&mut self, coords: Coord2, state: CellState) {
        self.grid[coords.to_nd_index()] = state;
    }
}
