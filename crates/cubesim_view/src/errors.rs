use cubesim_core::notation::EmptyInputError;
use thiserror::Error;

/// Error produced by a [`crate::CubeEngine`] request.
///
/// None of these are fatal; the engine is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// There are no moves to undo, invert, or replay.
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
    /// The request needs the cube to be at rest, but turns are pending.
    #[error("turns are still in progress")]
    Busy,
    /// The external solver failed to produce a solution.
    #[error("external solver failed: {0}")]
    Solver(String),
}
