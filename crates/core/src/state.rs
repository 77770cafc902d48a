use std::ops::{Add, Mul};

use crate::StepIntegrable;

/// The full state of the pendulum at an instant.
///
/// `time` is non-decreasing across successive states of a run and is reset to
/// zero together with the rest of the state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendulumState {
    /// Simulation time (s).
    pub time: f64,

    /// Angular displacement from the downward vertical (rad).
    pub angle: f64,

    /// Angular velocity (rad/s).
    pub angular_velocity: f64,
}

impl PendulumState {
    /// Creates a state at `time = 0`, released from rest at `angle`.
    #[must_use]
    pub fn at_rest(angle: f64) -> Self {
        Self {
            time: 0.0,
            angle,
            angular_velocity: 0.0,
        }
    }

    /// Returns the integrable part of the state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase {
            angle: self.angle,
            angular_velocity: self.angular_velocity,
        }
    }

    /// Builds a state from a time and a phase.
    #[must_use]
    pub fn from_phase(time: f64, phase: Phase) -> Self {
        Self {
            time,
            angle: phase.angle,
            angular_velocity: phase.angular_velocity,
        }
    }

    /// Returns `true` if every field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.angle.is_finite() && self.angular_velocity.is_finite()
    }
}

/// Angle and angular velocity, the coordinates the integrator advances.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phase {
    pub angle: f64,
    pub angular_velocity: f64,
}

/// Time derivative of a [`Phase`].
///
/// `angle` holds dθ/dt (rad/s) and `angular_velocity` holds dω/dt (rad/s²).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseRate {
    pub angle: f64,
    pub angular_velocity: f64,
}

impl StepIntegrable<f64> for Phase {
    type Derivative = PhaseRate;

    fn step(&self, derivative: PhaseRate, dt: f64) -> Self {
        Self {
            angle: self.angle + derivative.angle * dt,
            angular_velocity: self.angular_velocity + derivative.angular_velocity * dt,
        }
    }
}

impl Add for PhaseRate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            angle: self.angle + rhs.angle,
            angular_velocity: self.angular_velocity + rhs.angular_velocity,
        }
    }
}

impl Mul<f64> for PhaseRate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            angle: self.angle * rhs,
            angular_velocity: self.angular_velocity * rhs,
        }
    }
}
