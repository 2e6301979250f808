use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Field dimensions must be between 1 and 50")]
    InvalidDimension,
    #[error("Mine count must leave at least one safe cell")]
    InvalidMineCount,
    #[error("Position is outside the field")]
    InvalidPosition,
}

pub type Result<T> = core::result::Result<T, GameError>;
