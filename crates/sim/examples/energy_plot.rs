//! Plots a simulated run in an egui window.
//!
//! # Usage
//!
//! ```text
//! cargo run -p pendulum-sim --example energy_plot --features plot
//! cargo run -p pendulum-sim --example energy_plot --features plot -- euler
//! cargo run -p pendulum-sim --example energy_plot --features plot -- phase rk4
//! ```
//!
//! # Modes
//!
//! - **energy [scheme]** (default) — Kinetic, potential, and total energy of an
//!   undamped pendulum released from 1 rad. With `euler` the total visibly
//!   oscillates; with `rk4` it stays flat.
//!
//! - **phase [scheme]** — Angle and angular velocity at every sub-step of a
//!   lightly damped, driven run.

use std::error::Error;

use pendulum_core::PhysicalParameters;
use pendulum_observers::{PlotObserver, ShowConfig};
use pendulum_sim::Simulation;
use pendulum_solvers::Scheme;

const FRAME: f64 = 1.0 / 60.0;
const SECONDS: f64 = 12.0;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let first = args.next();
    let (mode, scheme) = match first.as_deref() {
        Some("energy" | "phase") => (first.clone(), args.next()),
        _ => (None, first.clone()),
    };

    let scheme = match scheme.as_deref() {
        None | Some("rk4") => Scheme::RungeKutta4,
        Some("euler") => Scheme::SemiImplicitEuler,
        Some(other) => {
            eprintln!("Unknown scheme: {other}");
            eprintln!("Usage: energy_plot [energy|phase] [rk4|euler]");
            std::process::exit(1);
        }
    };

    match mode.as_deref() {
        Some("phase") => phase(scheme),
        _ => energy(scheme),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn frames() -> usize {
    (SECONDS / FRAME).round() as usize
}

// --- Energy ------------------------------------------------------------------

fn energy(scheme: Scheme) -> Result<(), Box<dyn Error>> {
    let mut sim = Simulation::new(PhysicalParameters::default().time_step_si(0.02))?;
    sim.set_scheme(scheme);
    sim.set_starting_angle(1.0)?;
    sim.start();

    for _ in 0..frames() {
        sim.tick(FRAME)?;
    }

    let mut obs = PlotObserver::<3>::new(["Kinetic", "Potential", "Total"]);
    obs.extend(sim.history());
    obs.show(
        ShowConfig::new()
            .title(format!("Pendulum energy ({scheme}, dt = 20 ms)"))
            .legend()
            .x_label("t (s)"),
    )?;

    Ok(())
}

// --- Phase -------------------------------------------------------------------

fn phase(scheme: Scheme) -> Result<(), Box<dyn Error>> {
    let params = PhysicalParameters::default()
        .damping_si(0.15)
        .drive_si(1.2, 2.0);
    let mut sim = Simulation::new(params)?;
    sim.set_scheme(scheme);
    sim.start();

    let mut obs = PlotObserver::<2>::new(["Angle (rad)", "Angular velocity (rad/s)"]);
    for _ in 0..frames() {
        sim.tick_with(FRAME, &mut obs)?;
    }

    obs.show(
        ShowConfig::new()
            .title(format!("Driven pendulum phase ({scheme})"))
            .legend()
            .x_label("t (s)"),
    )?;

    Ok(())
}
