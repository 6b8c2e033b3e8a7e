use cubesim_core::{DEFAULT_SCRAMBLE_LENGTH, DEFAULT_SCRAMBLE_RETRIES};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Number of moves in a scramble.
    pub length: u32,
    /// Number of consecutive rejected moves allowed before a scramble is cut
    /// short.
    pub max_retries: u32,
}
impl Default for ScramblePreferences {
    fn default() -> Self {
        Self {
            length: DEFAULT_SCRAMBLE_LENGTH,
            max_retries: DEFAULT_SCRAMBLE_RETRIES,
        }
    }
}
