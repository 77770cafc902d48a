use pendulum_core::PendulumState;

/// Indicates how an advance terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The full interval was consumed.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of advancing across an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// How the advance terminated.
    pub status: Status,

    /// The last state reached.
    pub state: PendulumState,

    /// Number of sub-steps taken.
    pub steps: usize,
}
