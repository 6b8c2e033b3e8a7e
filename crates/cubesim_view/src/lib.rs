//! Cube simulation, which serializes face turns through an animated queue.
//!
//! [`CubeEngine`] owns the cubies, the turn queue, and the move log. Front
//! ends call [`CubeEngine::step()`] once per frame and read cubie transforms
//! from [`CubeEngine::render_data()`].

mod animations;
mod engine;
mod errors;
pub mod render;
mod solver;

pub use animations::{ActiveTurn, QueuedTurn, TurnState};
pub use engine::{CubeEngine, EnqueueOptions, EnqueueReport, SolveOutcome};
pub use errors::EngineError;
pub use solver::ExternalSolver;
