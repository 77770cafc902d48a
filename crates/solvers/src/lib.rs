//! Fixed-step integration schemes for the pendulum simulation.
//!
//! Two schemes are available through [`Scheme`]:
//!
//! - [`Scheme::SemiImplicitEuler`] — first order and cheap. Velocity is
//!   updated before angle, which keeps long runs bounded but lets total
//!   energy wander by a few percent over each swing. Under light damping the
//!   sampled total can rise between samples while still decaying overall.
//! - [`Scheme::RungeKutta4`] — fourth order, four rate evaluations per step.
//!   Total energy of an undamped pendulum stays visually flat, and with
//!   damping and no drive it never rises between samples, so this is the
//!   default.
//!
//! [`advance`] moves a state across an arbitrary interval by sub-stepping at
//! a fixed step size, finishing exactly at the end of the interval.

pub mod advance;
pub mod rk4;
mod scheme;
pub mod semi_implicit_euler;

pub use advance::{Error, advance, advance_unobserved};
pub use scheme::Scheme;
