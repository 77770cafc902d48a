//! Observers for the pendulum simulation.
//!
//! # Modules
//!
//! - [`period`] — empirical period measurement from angular-velocity
//!   crossings ([`PeriodEstimator`])
//! - [`history`] — a bounded, chronological sample buffer ([`History`],
//!   [`HistoryPoint`])
//! - [`traits`] — capability traits that let observers work with any event
//!   carrying a pendulum phase ([`HasPhase`], [`CanStopEarly`])
//!
//! # Features
//!
//! - `plot` — Enables [`PlotObserver`] for viewing traces in an egui window.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`HasPhase`]: traits::HasPhase
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod history;
pub mod period;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use history::{History, HistoryPoint};
pub use period::{Crossing, PeriodEstimator};

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
