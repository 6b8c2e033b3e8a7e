use thiserror::Error;

/// Error produced when a move token does not match the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidMoveError {
    /// Empty token
    #[error("empty move token")]
    Empty,
    /// Leading character is not one of `R`, `L`, `U`, `D`, `F`, `B`
    #[error("invalid face {0:?} in move token")]
    BadFace(char),
    /// Trailing character is not `'` or `2`
    #[error("invalid modifier {0:?} in move token")]
    BadModifier(char),
    /// Token has more than one modifier character
    #[error("move token {0:?} is too long")]
    TooLong(String),
}

/// Error produced when an operation needs at least one move but got none.
///
/// This is surfaced to the user as a no-op, never as a crash.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("no moves available")]
pub struct EmptyInputError;
