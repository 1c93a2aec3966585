use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfiguration,
    #[error("Coordinates outside the board")]
    OutOfBounds,
}

pub type Result<T> = std::result::Result<T, GameError>;
