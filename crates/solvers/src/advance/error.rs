/// Errors that can occur while advancing a pendulum state.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("time step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("interval must be finite and non-negative, got {0}")]
    InvalidInterval(f64),

    /// A sub-step produced a non-finite angle, velocity, or time.
    #[error("state diverged while stepping from t = {time} s")]
    Diverged { time: f64 },
}
