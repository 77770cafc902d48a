//! Runs the pendulum without a window and prints what it measured.
//!
//! # Usage
//!
//! ```text
//! cargo run --example headless
//! cargo run --example headless -- path/to/config.toml
//! RUST_LOG=pendulum_sim=debug cargo run --example headless
//! ```
//!
//! Frames are fed at 60 Hz for twenty simulated seconds (scaled by the
//! configured time scale), the same cadence a display loop would use.

use std::error::Error;

use pendulum_sim::{Simulation, SimulationConfig, Tick};
use tracing_subscriber::EnvFilter;

const FRAME: f64 = 1.0 / 60.0;
const FRAMES: usize = 20 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    let mut sim = Simulation::from_config(&config)?;
    sim.start();

    let initial = sim.current_energy().total;
    let mut crossings = 0_usize;
    for _ in 0..FRAMES {
        if let Tick::Advanced {
            crossing: Some(_), ..
        } = sim.tick(FRAME)?
        {
            crossings += 1;
        }
    }

    let state = sim.current_state();
    let energy = sim.current_energy();
    let scheme = sim.scheme();
    println!(
        "scheme            {scheme} (order {}, {} rate evaluations per step)",
        scheme.order(),
        scheme.stages()
    );
    println!("simulated time    {:.3} s", state.time);
    println!("angle             {:+.4} rad", state.angle);
    println!("angular velocity  {:+.4} rad/s", state.angular_velocity);
    println!("total energy      {:.6} J (started at {initial:.6} J)", energy.total);
    println!("crossings         {crossings}");
    println!("analytic period   {:.3} s", sim.analytic_period());
    match sim.measured_period() {
        Some(period) => println!("measured period   {period:.3} s"),
        None => println!("measured period   not yet available"),
    }

    Ok(())
}
