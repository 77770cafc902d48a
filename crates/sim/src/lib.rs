//! Real-time simulation clock for a damped, driven pendulum.
//!
//! [`Simulation`] ties the pieces together: it advances a
//! [`PendulumState`](pendulum_core::PendulumState) with one of the
//! [`Scheme`](pendulum_solvers::Scheme)s, keeps a bounded
//! [`History`](pendulum_observers::History) of energy samples, and measures
//! the oscillation period as it runs. The host drives it by calling
//! [`Simulation::tick`] or [`Simulation::tick_at`] from its own refresh loop.
//!
//! Settings can be loaded from TOML through [`SimulationConfig`], and a
//! [`SharedSimulation`] handle lets a render thread read [`Frame`]s while
//! another thread ticks.
//!
//! # Logging
//!
//! Lifecycle events (start, pause, reset, reconfiguration, period crossings)
//! are emitted with [`tracing`] at `debug` level, per-tick progress at
//! `trace`, and divergence at `warn`. Install any subscriber to see them.

mod config;
mod shared;
mod simulation;

pub use config::{ConfigError, DEFAULT_MAX_FRAME_DELTA, DEFAULT_STARTING_ANGLE, SimulationConfig};
pub use shared::{Frame, SharedSimulation};
pub use simulation::{RunState, Simulation, SimulationError, Tick};
