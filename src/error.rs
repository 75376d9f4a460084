use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected {expected} tiles, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("`{0}` is not a tile number")]
    InvalidToken(String),

    #[error("tile {value} is out of range (tiles run from 0 to {max})")]
    OutOfRange { value: usize, max: usize },

    #[error("tile {0} appears more than once")]
    Duplicate(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic `{0}` (expected `misplaced`/0 or `manhattan`/1)")]
pub struct ParseHeuristicError(pub String);
