//! Core types for the pendulum simulation.
//!
//! This crate defines the shared abstractions that the integrator, observers,
//! and simulation clock build on:
//!
//! - [`PhysicalParameters`] — the physical and numerical configuration
//! - [`PendulumState`] — time, angle, and angular velocity of the bob
//! - [`Phase`] and [`PhaseRate`] — the integrable part of the state and its
//!   time derivative
//! - [`Dynamics`] — a system that maps a phase to its rate, implemented by
//!   [`Pendulum`] for the damped, driven rigid pendulum
//! - [`EnergySample`] and [`energy`] — derived mechanical energy
//! - [`Observer`] — receives events and optionally returns control actions

mod dynamics;
mod energy;
mod observer;
mod parameters;
mod state;
mod step;

pub use dynamics::{Dynamics, Pendulum};
pub use energy::{EnergySample, energy};
pub use observer::Observer;
pub use parameters::{MIN_GRAVITY, MIN_LENGTH, MIN_MASS, ParameterError, PhysicalParameters};
pub use state::{PendulumState, Phase, PhaseRate};
pub use step::{DerivativeOf, StepIntegrable};
