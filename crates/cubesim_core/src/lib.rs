//! Cubie model and turn engine for the 3x3x3 cube.
//!
//! The cube is modeled as 26 cubies on the integer lattice `{-1, 0, 1}³`
//! (minus the invisible center). A face turn selects the 9 cubies in a layer
//! and rotates their coordinates by a quarter turn at a time.

mod cubie;
mod pos;
mod scramble;

/// Re-export of `cubesim_notation`.
pub use cubesim_notation as notation;
pub use cubesim_notation::{Axis, Face, Modifier, Move};

pub use crate::cubie::{Cubie, CubieSet, LayerIndices, select_layer};
pub use crate::pos::{Orientation, Pos};
pub use crate::scramble::{ScrambleParams, scramble_with_rng};

/// Number of cubies in the puzzle.
pub const CUBIE_COUNT: usize = 26;
/// Number of cubies in a face layer.
pub const LAYER_SIZE: usize = 9;

/// Default length for a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: u32 = 20;
/// Default number of consecutive rejected candidates allowed for one position
/// of a scramble before it is cut short.
pub const DEFAULT_SCRAMBLE_RETRIES: u32 = 100;
