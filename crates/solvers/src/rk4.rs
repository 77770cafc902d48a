//! Classic fourth-order Runge–Kutta.
//!
//! Rates are evaluated at `t`, twice at `t + h/2`, and at `t + h`, then
//! combined with weights `1/6, 2/6, 2/6, 1/6`.

use pendulum_core::{Dynamics, PendulumState, StepIntegrable};

/// Advances `state` by one step of size `h`.
#[must_use]
pub fn step<D: Dynamics>(dynamics: &D, state: &PendulumState, h: f64) -> PendulumState {
    let t = state.time;
    let y = state.phase();
    let half = 0.5 * h;

    let k1 = dynamics.rate(t, y);
    let k2 = dynamics.rate(t + half, y.step(k1, half));
    let k3 = dynamics.rate(t + half, y.step(k2, half));
    let k4 = dynamics.rate(t + h, y.step(k3, h));

    let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);

    PendulumState::from_phase(t + h, y.step(slope, h))
}
