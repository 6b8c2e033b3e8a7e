use std::collections::VecDeque;

use cubesim_core::{Axis, CubieSet, LayerIndices, Move};
use cubesim_prefs::AnimationPreferences;
use web_time::Duration;

/// If at least this much of a twist is animated in one frame, just skip the
/// animation to reduce unnecessary flashing.
const MIN_TWIST_DELTA: f32 = 1.0 / 3.0;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Turn waiting in the queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueuedTurn {
    /// Move to apply.
    pub mv: Move,
    /// Whether to append the move to the move log once it completes.
    pub log: bool,
}

/// Turn that is currently animating.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTurn {
    /// The turn being animated.
    pub turn: QueuedTurn,
    /// Cubies in the turning layer, captured when the animation started.
    pub grip: LayerIndices,
    /// Signed rotation angle in radians when the turn is complete.
    pub target_angle: f32,
    /// Progress of the animation, from 0.0 to 1.0.
    pub progress: f32,
}
impl ActiveTurn {
    fn new(turn: QueuedTurn, cubies: &CubieSet) -> Self {
        let mv = turn.mv;
        Self {
            turn,
            grip: cubies.layer_indices(mv.axis(), mv.layer()),
            target_angle: std::f32::consts::FRAC_PI_2 * f32::from(mv.dir()) * f32::from(mv.turns()),
            progress: 0.0,
        }
    }

    /// Returns the axis of rotation.
    pub fn axis(&self) -> Axis {
        self.turn.mv.axis()
    }
}

/// State of the turn at the front of the queue.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum TurnState {
    /// No turn is in flight.
    #[default]
    Idle,
    /// A turn is animating toward its target angle.
    Animating(ActiveTurn),
    /// A turn has reached its target angle and must be applied to the cubies
    /// before the next one starts.
    Completing(QueuedTurn),
}

/// FIFO queue of turns, at most one of which is in flight at any time.
#[derive(Debug, Default, Clone)]
pub struct TurnScheduler {
    /// Turns that have not started yet.
    queue: VecDeque<QueuedTurn>,
    /// Maximum number of turns pending (reset when the queue is empty).
    queue_max: usize,
    /// Turn in flight.
    state: TurnState,
}
impl TurnScheduler {
    /// Returns the state of the turn in flight.
    pub fn state(&self) -> &TurnState {
        &self.state
    }
    /// Returns whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.state != TurnState::Idle
    }
    /// Returns the number of turns that have not completed, including the one
    /// in flight.
    pub fn pending_len(&self) -> usize {
        self.queue.len() + usize::from(self.is_busy())
    }

    /// Returns the turns that have not completed, in order, starting with the
    /// one in flight.
    pub fn pending(&self) -> impl '_ + Iterator<Item = QueuedTurn> {
        let current = match &self.state {
            TurnState::Idle => None,
            TurnState::Animating(active) => Some(active.turn),
            TurnState::Completing(turn) => Some(*turn),
        };
        current.into_iter().chain(self.queue.iter().copied())
    }

    /// Stops logging the most recent pending turn that would have been
    /// logged. Returns that turn's move.
    pub fn unlog_last_pending(&mut self) -> Option<Move> {
        if let Some(turn) = self.queue.iter_mut().rev().find(|t| t.log) {
            turn.log = false;
            return Some(turn.mv);
        }
        let turn = match &mut self.state {
            TurnState::Idle => return None,
            TurnState::Animating(active) => &mut active.turn,
            TurnState::Completing(turn) => turn,
        };
        if turn.log {
            turn.log = false;
            Some(turn.mv)
        } else {
            None
        }
    }
    /// Stops logging every pending turn.
    pub fn unlog_all_pending(&mut self) {
        while self.unlog_last_pending().is_some() {}
    }

    /// Appends a turn to the queue.
    pub fn push(&mut self, turn: QueuedTurn) {
        self.queue.push_back(turn);
        self.queue_max = std::cmp::max(self.queue_max, self.pending_len());
    }

    /// Starts the next turn if none is in flight. Returns whether a turn was
    /// started.
    pub fn try_start(&mut self, cubies: &CubieSet) -> bool {
        if self.is_busy() {
            return false;
        }
        match self.queue.pop_front() {
            Some(turn) => {
                log::trace!("Starting turn {}", turn.mv);
                self.state = TurnState::Animating(ActiveTurn::new(turn, cubies));
                true
            }
            None => {
                self.queue_max = 0;
                false
            }
        }
    }

    /// Steps the animation forward. Returns whether the puzzle should be
    /// redrawn next frame.
    pub fn proceed(&mut self, delta: Duration, prefs: &AnimationPreferences) -> bool {
        let TurnState::Animating(active) = &mut self.state else {
            return false; // Do not request redraw
        };

        // `twist_duration` is in seconds (per one twist); `base_speed` is
        // fraction of twist per frame.
        let base_speed = delta.as_secs_f32() / prefs.twist_duration;

        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match prefs.dynamic_twist_speed {
            true => (self.queue_max.saturating_sub(1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        let mut twist_delta = base_speed * speed_mod;
        // Cap the twist delta at 1.0, and also handle the case where
        // something went wrong with the calculation (e.g., division by zero).
        if !(0.0..MIN_TWIST_DELTA).contains(&twist_delta) {
            twist_delta = 1.0; // Instantly complete the twist.
        }

        active.progress += twist_delta;
        if active.progress >= 1.0 {
            let turn = active.turn;
            self.state = TurnState::Completing(turn);
        }

        true // Request redraw
    }

    /// Skips the rest of the animation in flight, if any, so that it is ready
    /// to complete.
    pub fn skip_animation(&mut self) {
        if let TurnState::Animating(active) = &self.state {
            self.state = TurnState::Completing(active.turn);
        }
    }

    /// Takes the turn that has finished animating, returning the scheduler to
    /// idle. Returns `None` if no turn has finished.
    pub fn take_completed(&mut self) -> Option<QueuedTurn> {
        match std::mem::take(&mut self.state) {
            TurnState::Completing(turn) => Some(turn),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Returns the turn in flight along with its eased progress.
    pub fn current(&self, prefs: &AnimationPreferences) -> Option<(&ActiveTurn, f32)> {
        match &self.state {
            TurnState::Animating(active) => Some((
                active,
                prefs.twist_interpolation.interpolate(active.progress.clamp(0.0, 1.0)),
            )),
            TurnState::Idle | TurnState::Completing(_) => None,
        }
    }

    /// Abandons every pending turn, including the one in flight.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.queue_max = 0;
        self.state = TurnState::Idle;
    }
}
