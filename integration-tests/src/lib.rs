//! Shared fixtures for the cross-crate tests.

use pendulum_core::PhysicalParameters;
use pendulum_sim::Simulation;
use pendulum_solvers::Scheme;

/// A typical display refresh interval (s).
pub const FRAME: f64 = 1.0 / 60.0;

/// Creates a running simulation released from `angle`.
///
/// # Panics
///
/// Panics if the parameters or angle are invalid.
#[must_use]
pub fn released(parameters: PhysicalParameters, scheme: Scheme, angle: f64) -> Simulation {
    let mut sim = Simulation::new(parameters).expect("fixture parameters are valid");
    sim.set_scheme(scheme);
    sim.set_starting_angle(angle)
        .expect("fixture angle is finite");
    sim.start();
    sim
}

/// Feeds `seconds` of wall-clock time in display-sized frames.
///
/// # Panics
///
/// Panics if any tick fails.
pub fn run_for(sim: &mut Simulation, seconds: f64) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        sim.tick(FRAME).expect("tick succeeds");
    }
}

/// Largest relative departure of the recorded total energy from `reference`.
#[must_use]
pub fn max_energy_drift(sim: &Simulation, reference: f64) -> f64 {
    sim.history()
        .iter()
        .map(|point| (point.total - reference).abs() / reference)
        .fold(0.0, f64::max)
}
