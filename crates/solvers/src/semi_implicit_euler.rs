//! Semi-implicit (symplectic) Euler.
//!
//! ```text
//! ω_{n+1} = ω_n + h a(t_n, θ_n, ω_n)
//! θ_{n+1} = θ_n + h ω_{n+1}
//! ```

use pendulum_core::{Dynamics, PendulumState};

/// Advances `state` by one step of size `h`.
#[must_use]
pub fn step<D: Dynamics>(dynamics: &D, state: &PendulumState, h: f64) -> PendulumState {
    let rate = dynamics.rate(state.time, state.phase());

    let angular_velocity = state.angular_velocity + h * rate.angular_velocity;
    let angle = state.angle + h * angular_velocity;

    PendulumState {
        time: state.time + h,
        angle,
        angular_velocity,
    }
}
