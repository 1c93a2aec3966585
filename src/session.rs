use serde::{Deserialize, Serialize};

use crate::{
    Board, Coord2, GameConfig, Intent, Minefield, MinefieldGenerator, Notice, RandomGenerator,
    Result, RevealOutcome,
};

/// Lifecycle of one game.
///
/// Valid transitions:
/// - NotStarted -> Running on the first reveal
/// - Running -> Lost when a reveal detonates a mine
/// - Running -> Won when the last safe cell is revealed
///
/// Won and Lost are terminal; a first reveal may reach them directly.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    Running,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One game from restart to restart: a board plus status and tick-driven
/// elapsed time.
///
/// Sessions are plain values with no global state, so independent sessions
/// coexist. A restart rebuilds the whole value; nothing is carried over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    status: SessionStatus,
    elapsed_secs: u32,
}

impl GameSession {
    /// Creates a session over a freshly generated minefield. The config is
    /// validated here, so a malformed `Restart` intent cannot slip through.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.width, config.height, config.mines)?;
        Ok(Self::with_minefield(
            RandomGenerator::new(seed).generate(config),
        ))
    }

    /// Creates a session over a fixed minefield.
    pub fn with_minefield(minefield: Minefield) -> Self {
        Self {
            board: Board::new(minefield),
            status: SessionStatus::default(),
            elapsed_secs: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Applies one Presenter intent and returns the notices to redraw from.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<Notice>> {
        match intent {
            Intent::Reveal { row, col } => self.reveal((row, col)),
            Intent::ToggleFlag { row, col } => self.toggle_flag((row, col)),
            Intent::Restart { config, seed } => self.restart(config, seed),
            Intent::Tick => Ok(self.tick()),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Vec<Notice>> {
        if self.status.is_terminal() {
            return Ok(Vec::new());
        }

        let mut updates = Vec::new();
        let outcome = self.board.reveal(coords, &mut updates)?;
        let mut notices: Vec<Notice> = updates.into_iter().map(Notice::Cell).collect();

        match outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::Revealed => {
                if matches!(self.status, SessionStatus::NotStarted) {
                    self.set_status(SessionStatus::Running, &mut notices);
                }
            }
            RevealOutcome::Detonated => {
                let mut sweep = Vec::new();
                self.board.sweep_mines_on_loss(&mut sweep);
                notices.extend(sweep.into_iter().map(Notice::Cell));
                self.set_status(SessionStatus::Lost, &mut notices);
            }
            RevealOutcome::Won => {
                let mut sweep = Vec::new();
                self.board.sweep_mines_on_win(&mut sweep);
                let flags_changed = !sweep.is_empty();
                notices.extend(sweep.into_iter().map(Notice::Cell));
                self.set_status(SessionStatus::Won, &mut notices);
                if flags_changed {
                    notices.push(self.flag_count_notice());
                }
            }
        }

        Ok(notices)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Vec<Notice>> {
        if self.status.is_terminal() {
            return Ok(Vec::new());
        }

        let mut updates = Vec::new();
        let outcome = self.board.toggle_flag(coords, &mut updates)?;
        let mut notices: Vec<Notice> = updates.into_iter().map(Notice::Cell).collect();
        if outcome.has_update() {
            notices.push(self.flag_count_notice());
        }
        Ok(notices)
    }

    /// Replaces this session wholesale with a fresh one.
    pub fn restart(&mut self, config: GameConfig, seed: u64) -> Result<Vec<Notice>> {
        *self = Self::new(config, seed)?;
        log::debug!("session restarted with {:?}", config);
        Ok(vec![
            Notice::Status {
                status: self.status,
            },
            self.flag_count_notice(),
        ])
    }

    /// Advances elapsed time by one second, but only while the game is
    /// running. The cadence is owned by the Presenter's timer; the core
    /// never reads a wall clock.
    pub fn tick(&mut self) -> Vec<Notice> {
        if matches!(self.status, SessionStatus::Running) {
            self.elapsed_secs += 1;
        }
        Vec::new()
    }

    fn set_status(&mut self, status: SessionStatus, notices: &mut Vec<Notice>) {
        log::debug!("session status {:?} -> {:?}", self.status, status);
        self.status = status;
        notices.push(Notice::Status { status });
    }

    fn flag_count_notice(&self) -> Notice {
        Notice::FlagCount {
            flagged: self.board.flagged(),
            mines_left: self.board.mines_left(),
        }
    }
}
