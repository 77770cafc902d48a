use pendulum_core::PendulumState;

/// Event emitted after each sub-step of [`advance`](crate::advance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Sub-step number, starting at 1.
    pub step: usize,

    /// Size of the sub-step just taken (s).
    pub h: f64,

    /// State after the sub-step.
    pub state: PendulumState,
}
