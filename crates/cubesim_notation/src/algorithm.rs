//! Whitespace-separated sequences of move tokens.

use itertools::Itertools;

use crate::{EmptyInputError, InvalidMoveError, Move};

/// Parses each whitespace-separated token in `s`, in order.
///
/// Invalid tokens produce an error in their position without affecting the
/// tokens around them.
pub fn parse_algorithm(s: &str) -> impl '_ + Iterator<Item = Result<Move, InvalidMoveError>> {
    s.split_whitespace().map(str::parse)
}

/// Parses every token in `s`, failing on the first invalid one.
pub fn parse_algorithm_strict(s: &str) -> Result<Vec<Move>, InvalidMoveError> {
    parse_algorithm(s).collect()
}

/// Formats a sequence of moves with single spaces between them.
pub fn format_moves(moves: impl IntoIterator<Item = Move>) -> String {
    moves.into_iter().join(" ")
}

/// Returns the inverse of a sequence: each move inverted, in reverse order.
pub fn invert_algorithm(moves: &[Move]) -> Result<Vec<Move>, EmptyInputError> {
    if moves.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(moves.iter().rev().map(|m| m.inv()).collect())
}

/// Returns the textual inverse of a sequence of tokens, in reverse order.
///
/// See [`crate::invert_token()`].
pub fn invert_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, EmptyInputError> {
    if tokens.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(tokens
        .iter()
        .rev()
        .map(|t| crate::invert_token(t.as_ref()))
        .collect())
}
