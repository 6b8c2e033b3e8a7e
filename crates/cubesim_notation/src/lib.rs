//! Face-turn notation for the 3x3x3 cube.
//!
//! A move token is a face letter from `R L U D F B` optionally followed by
//! exactly one of `'` (counterclockwise) or `2` (half turn). Algorithms are
//! whitespace-separated sequences of tokens.

pub mod algorithm;
pub mod common;
mod errors;
mod moves;

pub use algorithm::{
    format_moves, invert_algorithm, invert_tokens, parse_algorithm, parse_algorithm_strict,
};
pub use common::*;
pub use errors::{EmptyInputError, InvalidMoveError};
pub use moves::{Move, invert_token};

/// Parses a single move token.
pub fn parse_move(token: &str) -> Result<Move, InvalidMoveError> {
    token.parse()
}
