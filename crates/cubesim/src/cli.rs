use std::path::PathBuf;

use cubesim_core::notation::{
    InvalidMoveError, format_moves, invert_algorithm, parse_algorithm_strict,
};
use cubesim_core::{Cubie, Move, ScrambleParams};
use cubesim_prefs::{AnimationPreferences, Preferences};
use cubesim_view::{CubeEngine, EnqueueOptions, SolveOutcome};
use eyre::{Context, Result, bail};
use itertools::Itertools;
use serde::Serialize;
use web_time::Duration;

/// Simulated frame rate when playing back turns.
const PLAYBACK_FPS: f32 = 60.0;
/// Frames after which playback gives up.
const MAX_PLAYBACK_FRAMES: usize = 1_000_000;

/// Cube simulator command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// Preferences file to use instead of the default location.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Apply an algorithm to a solved cube and print the final state as JSON.
    Play {
        /// Move tokens (such as `R U R' U'`). Invalid tokens are skipped.
        alg: Vec<String>,
    },
    /// Print a random scramble as JSON.
    Scramble {
        /// Number of moves. Defaults to the value in preferences.
        #[arg(short, long)]
        length: Option<u32>,
        /// Seed for reproducible scrambles.
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Print the inverse of an algorithm.
    Invert {
        /// Move tokens (such as `R U R' U'`).
        alg: Vec<String>,
    },
    /// Apply an algorithm, then replay its inverse and print the result as
    /// JSON.
    Solve {
        /// Move tokens (such as `R U R' U'`). Invalid tokens are skipped.
        alg: Vec<String>,
    },
}

#[derive(Serialize, Debug)]
struct PlayOutput {
    accepted: String,
    rejected: Vec<RejectedToken>,
    move_count: usize,
    frames: usize,
    solved: bool,
    cubies: Vec<Cubie>,
}

#[derive(Serialize, Debug)]
struct RejectedToken {
    token: String,
    error: String,
}
impl From<&(String, InvalidMoveError)> for RejectedToken {
    fn from((token, e): &(String, InvalidMoveError)) -> Self {
        Self {
            token: token.clone(),
            error: e.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
struct ScrambleOutput {
    #[serde(flatten)]
    params: ScrambleParams,
    scramble: String,
    /// Fewer than `len` if the retry budget ran out.
    actual_len: usize,
}

#[derive(Serialize, Debug)]
struct SolveOutput {
    scramble: String,
    solution: String,
    solved: bool,
}

pub(crate) fn exec(subcommand: Subcommand, prefs: &Preferences) -> Result<()> {
    match subcommand {
        Subcommand::Play { alg } => {
            let mut engine = CubeEngine::new();
            let report = engine.enqueue(&alg, EnqueueOptions::default());
            if !report.rejected.is_empty() {
                log::warn!("{report}");
            }
            let frames = play_to_end(&mut engine, &prefs.animation)?;
            write_json_output(&PlayOutput {
                accepted: format_moves(report.accepted.iter().copied()),
                rejected: report.rejected.iter().map_into().collect(),
                move_count: engine.move_count(),
                frames,
                solved: engine.is_solved(),
                cubies: engine.cubies().cubies().to_vec(),
            })
        }

        Subcommand::Scramble { length, seed } => {
            let len = length.unwrap_or(prefs.scramble.length);
            let params = match seed {
                Some(seed) => ScrambleParams::with_seed(len, seed),
                None => ScrambleParams::new(len),
            };
            let moves = params.generate(prefs.scramble.max_retries);
            write_json_output(&ScrambleOutput {
                params,
                actual_len: moves.len(),
                scramble: format_moves(moves),
            })
        }

        Subcommand::Invert { alg } => {
            let moves: Vec<Move> = parse_algorithm_strict(&alg.join(" "))
                .context("error parsing algorithm")?;
            let inverse = invert_algorithm(&moves).context("nothing to invert")?;
            println!("{}", format_moves(inverse));
            Ok(())
        }

        Subcommand::Solve { alg } => {
            let mut engine = CubeEngine::new();
            let report = engine.enqueue(&alg, EnqueueOptions::default());
            if !report.rejected.is_empty() {
                log::warn!("{report}");
            }
            engine.flush();
            let solution = match engine.solve()? {
                SolveOutcome::AlreadySolved => vec![],
                SolveOutcome::Queued(moves) => moves,
            };
            play_to_end(&mut engine, &prefs.animation)?;
            write_json_output(&SolveOutput {
                scramble: format_moves(report.accepted),
                solution: format_moves(solution),
                solved: engine.is_solved(),
            })
        }
    }
}

/// Steps the engine at a fixed frame rate until every turn completes.
/// Returns the number of frames.
fn play_to_end(engine: &mut CubeEngine, prefs: &AnimationPreferences) -> Result<usize> {
    let delta = Duration::from_secs_f32(1.0 / PLAYBACK_FPS);
    let mut frames = 0;
    while engine.pending_len() > 0 {
        if frames >= MAX_PLAYBACK_FRAMES {
            bail!("playback did not finish after {frames} frames; check twist_duration");
        }
        engine.step(delta, prefs);
        frames += 1;
    }
    log::debug!("Played {} move(s) in {frames} frame(s)", engine.move_count());
    Ok(frames)
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
