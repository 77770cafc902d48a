use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pendulum_core::{EnergySample, PendulumState};

use crate::{RunState, Simulation, SimulationError, Tick};

/// A snapshot of what a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub state: PendulumState,
    pub energy: EnergySample,
    pub measured_period: Option<f64>,
    pub analytic_period: f64,
    pub run_state: RunState,
}

impl From<&Simulation> for Frame {
    fn from(sim: &Simulation) -> Self {
        Self {
            state: sim.current_state(),
            energy: sim.current_energy(),
            measured_period: sim.measured_period(),
            analytic_period: sim.analytic_period(),
            run_state: sim.run_state(),
        }
    }
}

/// A cloneable, thread-safe handle to a [`Simulation`].
///
/// Every operation takes the lock for its full duration, so a reader never
/// observes a tick half applied.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    /// Advances by `elapsed` wall-clock seconds.
    ///
    /// # Errors
    ///
    /// See [`Simulation::tick_with`].
    pub fn tick(&self, elapsed: f64) -> Result<Tick, SimulationError> {
        self.lock().tick(elapsed)
    }

    /// Runs `f` with exclusive access to the simulation.
    pub fn with<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut *self.lock())
    }

    /// Returns a consistent snapshot of the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::from(&*self.lock())
    }

    // A panic while holding the lock leaves the simulation in a committed
    // state, since ticks only write after integration succeeds.
    fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Simulation> for SharedSimulation {
    fn from(simulation: Simulation) -> Self {
        Self::new(simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use pendulum_core::PhysicalParameters;

    #[test]
    fn frame_reflects_current_state() {
        let shared = SharedSimulation::new(Simulation::default());
        let frame = shared.frame();
        assert_eq!(frame.run_state, RunState::Stopped);
        assert_eq!(frame.state.time, 0.0);
        assert_eq!(frame.measured_period, None);
    }

    #[test]
    fn ticks_from_another_thread_are_visible() {
        let shared = SharedSimulation::new(Simulation::default());
        shared.with(Simulation::start);

        let worker = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    shared.tick(0.01).unwrap();
                }
            })
        };
        worker.join().unwrap();

        let frame = shared.frame();
        assert!((frame.state.time - 0.5).abs() < 1e-9);
        assert_eq!(shared.with(|sim| sim.history().len()), 50);
    }

    #[test]
    fn with_can_reconfigure() {
        let shared = SharedSimulation::new(Simulation::default());
        shared
            .with(|sim| sim.configure(PhysicalParameters::default().length_si(4.0)))
            .unwrap();
        assert!((shared.frame().analytic_period - 4.012).abs() < 1e-3);
    }
}
