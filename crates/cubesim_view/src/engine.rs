use std::fmt;

use cgmath::Matrix4;
use cubesim_core::notation::{
    EmptyInputError, InvalidMoveError, invert_algorithm, invert_token, parse_move,
};
use cubesim_core::{CubieSet, DEFAULT_SCRAMBLE_RETRIES, Move, ScrambleParams, scramble_with_rng};
use cubesim_prefs::AnimationPreferences;
use itertools::Itertools;
use rand_chacha::ChaCha12Rng;
use web_time::{Duration, Instant};

use crate::animations::{QueuedTurn, TurnScheduler, TurnState};
use crate::{EngineError, ExternalSolver, render};

const ASSUMED_FPS: f32 = 120.0;

/// Options for [`CubeEngine::enqueue()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnqueueOptions {
    /// Whether to append each move to the move log once it completes.
    pub log: bool,
}
impl Default for EnqueueOptions {
    fn default() -> Self {
        Self { log: true }
    }
}
impl EnqueueOptions {
    /// Options for moves that should not be recorded.
    pub const NO_LOG: Self = Self { log: false };
}

/// Outcome of a call to [`CubeEngine::enqueue()`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnqueueReport {
    /// Moves that were queued, in order.
    pub accepted: Vec<Move>,
    /// Tokens that were dropped, along with why.
    pub rejected: Vec<(String, InvalidMoveError)>,
}
impl fmt::Display for EnqueueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queued {} move(s)", self.accepted.len())?;
        if !self.rejected.is_empty() {
            let tokens = self.rejected.iter().map(|(t, _)| format!("{t:?}")).join(", ");
            write!(f, "; ignored {tokens}")?;
        }
        Ok(())
    }
}
impl EnqueueReport {
    /// Returns whether no tokens were given at all.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Outcome of a call to [`CubeEngine::solve()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The cube was already solved and idle, so nothing was queued.
    AlreadySolved,
    /// The inverse of the move history was queued.
    Queued(Vec<Move>),
}

/// Cube simulation, which owns the cubies, the turn queue, and the move log.
///
/// Cubie positions change only when a turn completes, one turn at a time, in
/// the order the turns were queued.
#[derive(Debug)]
pub struct CubeEngine {
    /// Latest cubie state, not including any turn in flight.
    cubies: CubieSet,
    /// Turn queue and animation state.
    scheduler: TurnScheduler,
    /// Completed turns that were queued with logging enabled.
    move_log: Vec<Move>,
    /// Number of turns completed since construction or reset.
    move_count: usize,

    /// Random number generator for scrambles.
    rng: ChaCha12Rng,
    /// Number of consecutive rejected moves allowed before a scramble is cut
    /// short.
    scramble_retries: u32,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
    /// Latest visual cubie transforms.
    cached_render_data: Vec<Matrix4<f32>>,
}
impl Default for CubeEngine {
    fn default() -> Self {
        Self::new()
    }
}
impl CubeEngine {
    /// Constructs a solved cube with a randomly seeded scrambler.
    pub fn new() -> Self {
        Self::with_scramble_params(&ScrambleParams::new(0))
    }
    /// Constructs a solved cube whose scrambles are reproducible from `seed`.
    pub fn with_scramble_seed(seed: &str) -> Self {
        Self::with_scramble_params(&ScrambleParams::with_seed(0, seed))
    }
    fn with_scramble_params(params: &ScrambleParams) -> Self {
        let cubies = CubieSet::new();
        let cached_render_data = render::render_transforms(&cubies, None);
        Self {
            cubies,
            scheduler: TurnScheduler::default(),
            move_log: vec![],
            move_count: 0,

            rng: params.rng(),
            scramble_retries: DEFAULT_SCRAMBLE_RETRIES,

            last_frame_time: None,
            cached_render_data,
        }
    }

    /// Sets the number of consecutive rejected moves allowed before a
    /// scramble is cut short.
    pub fn set_scramble_retries(&mut self, max_retries: u32) {
        self.scramble_retries = max_retries;
    }

    /// Returns the latest cubie state, not including any turn in flight.
    pub fn cubies(&self) -> &CubieSet {
        &self.cubies
    }
    /// Returns the move log.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }
    /// Returns the move log as tokens.
    pub fn move_log_tokens(&self) -> Vec<String> {
        self.move_log.iter().map(Move::to_string).collect()
    }
    /// Returns the number of turns completed since construction or reset.
    pub fn move_count(&self) -> usize {
        self.move_count
    }
    /// Returns the state of the turn in flight.
    pub fn turn_state(&self) -> &TurnState {
        self.scheduler.state()
    }
    /// Returns whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy()
    }
    /// Returns the number of turns not yet completed, including the one in
    /// flight.
    pub fn pending_len(&self) -> usize {
        self.scheduler.pending_len()
    }

    /// Returns whether every cubie is at its home position.
    ///
    /// Turns in flight or queued are not taken into account.
    pub fn is_solved(&self) -> bool {
        self.cubies.is_solved()
    }

    /// Returns the inverse of a move token. See [`invert_token()`].
    pub fn invert(&self, token: &str) -> String {
        invert_token(token)
    }

    /// Parses each token and queues the valid ones, in order. Invalid tokens
    /// are dropped with a warning.
    pub fn enqueue<S: AsRef<str>>(
        &mut self,
        tokens: impl IntoIterator<Item = S>,
        options: EnqueueOptions,
    ) -> EnqueueReport {
        let mut report = EnqueueReport::default();
        for token in tokens {
            let token = token.as_ref();
            match parse_move(token) {
                Ok(mv) => {
                    self.scheduler.push(QueuedTurn {
                        mv,
                        log: options.log,
                    });
                    report.accepted.push(mv);
                }
                Err(e) => {
                    log::warn!("Ignoring invalid move {token:?}: {e}");
                    report.rejected.push((token.to_owned(), e));
                }
            }
        }
        self.scheduler.try_start(&self.cubies);
        report
    }
    /// Queues each whitespace-separated token in `alg`. See
    /// [`Self::enqueue()`].
    pub fn enqueue_str(&mut self, alg: &str, options: EnqueueOptions) -> EnqueueReport {
        self.enqueue(alg.split_whitespace(), options)
    }
    /// Queues moves that have already been parsed.
    pub fn enqueue_moves(&mut self, moves: impl IntoIterator<Item = Move>, options: EnqueueOptions) {
        for mv in moves {
            self.scheduler.push(QueuedTurn {
                mv,
                log: options.log,
            });
        }
        self.scheduler.try_start(&self.cubies);
    }

    /// Advances the animation in flight by `delta`. Returns whether the cube
    /// must be redrawn.
    ///
    /// At most one turn completes per call.
    pub fn step(&mut self, delta: Duration, prefs: &AnimationPreferences) -> bool {
        let mut needs_redraw = self.scheduler.proceed(delta, prefs);
        needs_redraw |= self.complete_turn();
        if needs_redraw {
            self.update_render_data(prefs);
        }
        needs_redraw
    }
    /// Advances the animation in flight using the time since the last frame.
    /// Returns whether the cube must be redrawn.
    pub fn frame(&mut self, prefs: &AnimationPreferences) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step(delta, prefs);

        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }
    /// Completes every pending turn immediately, skipping animations.
    pub fn flush(&mut self) {
        loop {
            self.scheduler.skip_animation();
            if !self.complete_turn() {
                break;
            }
        }
        self.skip_animations();
    }

    /// Applies the turn that has finished animating, if any, and starts the
    /// next one. Returns whether a turn was applied.
    fn complete_turn(&mut self) -> bool {
        let Some(QueuedTurn { mv, log }) = self.scheduler.take_completed() else {
            return false;
        };
        self.cubies.do_move(mv);
        self.move_count += 1;
        if log {
            self.move_log.push(mv);
        }
        log::trace!("Completed turn {mv}");
        self.scheduler.try_start(&self.cubies);
        true
    }

    /// Undoes the most recent logged move by queueing its inverse without
    /// logging it. The move is removed from the history, whether it has
    /// completed or is still pending. Returns the queued inverse.
    pub fn undo(&mut self) -> Result<Move, EngineError> {
        let mv = match self.scheduler.unlog_last_pending() {
            Some(mv) => mv,
            None => self.move_log.pop().ok_or(EmptyInputError)?,
        };
        let inv = mv.inv();
        log::debug!("Undoing {mv} with {inv}");
        self.enqueue_moves([inv], EnqueueOptions::NO_LOG);
        Ok(inv)
    }

    /// Queues the inverse of the whole move history, including logged moves
    /// that are still pending, and then erases the history.
    ///
    /// This replays history backwards; it is not a solving algorithm. Moves
    /// queued without logging are not undone.
    pub fn solve(&mut self) -> Result<SolveOutcome, EngineError> {
        if self.pending_len() == 0 && self.is_solved() {
            return Ok(SolveOutcome::AlreadySolved);
        }
        let history = self
            .move_log
            .iter()
            .copied()
            .chain(self.scheduler.pending().filter(|t| t.log).map(|t| t.mv))
            .collect_vec();
        let inverse = invert_algorithm(&history)?;
        self.scheduler.unlog_all_pending();
        self.move_log.clear();
        log::debug!("Solving with {} move(s)", inverse.len());
        self.enqueue_moves(inverse.iter().copied(), EnqueueOptions::NO_LOG);
        Ok(SolveOutcome::Queued(inverse))
    }

    /// Returns a random sequence of `n` tokens with no two consecutive moves
    /// on the same axis. The sequence may be shorter than `n` if the retry
    /// budget runs out.
    ///
    /// This does not queue anything.
    pub fn scramble(&mut self, n: u32) -> Vec<String> {
        scramble_with_rng(n as usize, &mut self.rng, self.scramble_retries)
            .into_iter()
            .map(|m| m.to_string())
            .collect()
    }
    /// Generates a scramble and queues it with logging enabled.
    pub fn scramble_and_enqueue(&mut self, n: u32) -> EnqueueReport {
        let tokens = self.scramble(n);
        self.enqueue(tokens, EnqueueOptions::default())
    }

    /// Asks `solver` for a solution to the current state and queues it.
    ///
    /// The cube must be at rest.
    pub fn enqueue_external_solution(
        &mut self,
        solver: &mut dyn ExternalSolver,
    ) -> Result<EnqueueReport, EngineError> {
        if self.pending_len() > 0 {
            return Err(EngineError::Busy);
        }
        let solution = solver
            .solution(&self.cubies)
            .map_err(|e| EngineError::Solver(format!("{e:#}")))?;
        let report = self.enqueue_str(&solution, EnqueueOptions::default());
        if report.is_empty() {
            return Err(EmptyInputError.into());
        }
        Ok(report)
    }

    /// Abandons every pending turn and restores the solved state. The move
    /// log and move count are cleared.
    pub fn reset(&mut self) {
        log::debug!("Resetting cube");
        self.scheduler.clear();
        self.cubies.reset();
        self.move_log.clear();
        self.move_count = 0;
        self.last_frame_time = None;
        self.skip_animations();
    }

    /// Returns the latest transform of each cubie, in the same order as
    /// [`CubieSet::cubies()`].
    pub fn render_data(&self) -> &[Matrix4<f32>] {
        &self.cached_render_data
    }
    fn update_render_data(&mut self, prefs: &AnimationPreferences) {
        self.cached_render_data = render::render_transforms(&self.cubies, self.scheduler.current(prefs));
    }
    /// Updates the cubie transforms, ignoring the current animation state.
    fn skip_animations(&mut self) {
        self.cached_render_data = render::render_transforms(&self.cubies, None);
    }
}
