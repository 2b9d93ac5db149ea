use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("Snake cells must be adjacent, in range and at least two long")]
    InvalidSnake,
    #[error("Invalid game configuration")]
    InvalidConfig,
    #[error("Board border is not intact")]
    BrokenBorder,
}

pub type Result<T> = core::result::Result<T, GameError>;
