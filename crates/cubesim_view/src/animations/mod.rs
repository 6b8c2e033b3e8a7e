mod twist;

pub use twist::{ActiveTurn, QueuedTurn, TurnScheduler, TurnState};
