//! Capability traits for observers.
//!
//! These traits abstract over the concrete event and action types, so the same
//! observer can watch integrator sub-steps, recorded history points, or plain
//! states.
//!
//! # Example
//!
//! ```rust
//! use pendulum_core::Observer;
//! use pendulum_observers::traits::{CanStopEarly, HasPhase};
//!
//! /// Stops as soon as the bob swings past the horizontal.
//! struct PastHorizontal;
//!
//! impl<E: HasPhase, A: CanStopEarly> Observer<E, A> for PastHorizontal {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.angle().abs() > std::f64::consts::FRAC_PI_2).then(A::stop_early)
//!     }
//! }
//! ```

use pendulum_core::PendulumState;
use pendulum_solvers::advance;

use crate::HistoryPoint;

/// An event that carries the pendulum's time and phase.
pub trait HasPhase {
    /// Simulation time (s).
    fn time(&self) -> f64;

    /// Angle from the downward vertical (rad).
    fn angle(&self) -> f64;

    /// Angular velocity (rad/s).
    fn angular_velocity(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasPhase for PendulumState {
    fn time(&self) -> f64 {
        self.time
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }
}

impl HasPhase for advance::Event {
    fn time(&self) -> f64 {
        self.state.time
    }

    fn angle(&self) -> f64 {
        self.state.angle
    }

    fn angular_velocity(&self) -> f64 {
        self.state.angular_velocity
    }
}

impl HasPhase for HistoryPoint {
    fn time(&self) -> f64 {
        self.time
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }
}

impl CanStopEarly for advance::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
