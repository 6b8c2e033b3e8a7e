use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Move;

/// Parameters to deterministically generate a scramble.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of moves requested.
    pub len: u32,
    /// Random seed. Any string works; [`ScrambleParams::new()`] uses a random
    /// number from the OS.
    pub seed: String,
}

impl ScrambleParams {
    /// Returns scramble parameters with a fresh random seed.
    pub fn new(len: u32) -> Self {
        let seed = rand::rng().random::<u64>().to_string();
        Self { len, seed }
    }

    /// Returns scramble parameters with a fixed seed.
    pub fn with_seed(len: u32, seed: impl Into<String>) -> Self {
        Self {
            len,
            seed: seed.into(),
        }
    }

    /// Returns the random number generator for these parameters.
    pub fn rng(&self) -> rand_chacha::ChaCha12Rng {
        let mut sha256 = Sha256::new();
        sha256.update(self.len.to_le_bytes());
        sha256.update((self.seed.len() as u64).to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let digest: [u8; 32] = sha256.finalize().into();
        rand_chacha::ChaCha12Rng::from_seed(digest)
    }

    /// Generates the scramble.
    ///
    /// See [`scramble_with_rng()`].
    pub fn generate(&self, max_retries: u32) -> Vec<Move> {
        scramble_with_rng(self.len as usize, &mut self.rng(), max_retries)
    }
}

/// Generates a random sequence of `len` moves in which no two consecutive
/// moves share an axis.
///
/// Each move is drawn uniformly from all 18 moves. A candidate on the same
/// axis as the previous move is rejected and drawn again. If `max_retries`
/// candidates in a row are rejected for the same position, the sequence is
/// returned as-is, even if it is shorter than `len`.
pub fn scramble_with_rng(len: usize, rng: &mut impl Rng, max_retries: u32) -> Vec<Move> {
    let mut ret: Vec<Move> = Vec::with_capacity(len);
    let mut retries = 0;
    while ret.len() < len {
        let Some(&candidate) = Move::ALL.choose(rng) else {
            break;
        };
        if ret.last().is_some_and(|prev| prev.axis() == candidate.axis()) {
            retries += 1;
            if retries > max_retries {
                log::warn!(
                    "scramble retry budget of {max_retries} exhausted; \
                     returning {} of {len} moves",
                    ret.len(),
                );
                break;
            }
            continue;
        }
        ret.push(candidate);
        retries = 0;
    }
    ret
}
