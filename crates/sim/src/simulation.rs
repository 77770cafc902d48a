use std::time::Instant;

use pendulum_core::{
    EnergySample, Observer, ParameterError, Pendulum, PendulumState, PhysicalParameters, energy,
};
use pendulum_observers::{Crossing, History, HistoryPoint, PeriodEstimator};
use pendulum_solvers::{Scheme, advance};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{ConfigError, SimulationConfig};

/// Whether the clock advances on tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    /// Ticks have no effect; state is held.
    #[default]
    Stopped,

    /// Each tick advances the simulation.
    Running,
}

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The clock is stopped, so nothing happened.
    Idle,

    /// The simulation advanced by `steps` sub-steps.
    ///
    /// `crossing` is set when the period estimator fired on the new state.
    Advanced {
        steps: usize,
        crossing: Option<Crossing>,
    },
}

/// Errors returned by a tick.
///
/// A failed tick never changes the state, history, or period measurement.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationError {
    /// The integrator produced a non-finite state. The clock has been paused.
    #[error("simulation diverged after t = {time} s; previous state retained")]
    Diverged { time: f64 },

    #[error("invalid tick: {0}")]
    Solver(advance::Error),
}

impl From<advance::Error> for SimulationError {
    fn from(err: advance::Error) -> Self {
        match err {
            advance::Error::Diverged { time } => Self::Diverged { time },
            other => Self::Solver(other),
        }
    }
}

/// Drives a pendulum through time.
///
/// The simulation owns the current state, its derived energy, a bounded
/// history, and the period measurement. The host calls [`tick`](Self::tick)
/// (or [`tick_at`](Self::tick_at)) from its refresh loop; the simulation owns
/// no timers of its own.
///
/// # Example
///
/// ```
/// use pendulum_core::PhysicalParameters;
/// use pendulum_sim::Simulation;
///
/// let mut sim = Simulation::new(PhysicalParameters::default())?;
/// sim.set_starting_angle(0.3)?;
/// sim.start();
///
/// for _ in 0..600 {
///     sim.tick(1.0 / 60.0)?;
/// }
///
/// let measured = sim.measured_period().expect("ten seconds covers several swings");
/// assert!((measured - sim.analytic_period()).abs() < 0.05);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    parameters: PhysicalParameters,
    scheme: Scheme,
    starting_angle: f64,
    max_frame_delta: f64,
    state: PendulumState,
    energy: EnergySample,
    history: History,
    period: PeriodEstimator,
    run_state: RunState,
    reference: Option<Instant>,
    carry: f64,
}

impl Simulation {
    /// Creates a stopped simulation with default settings and the given
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the parameters are invalid.
    pub fn new(parameters: PhysicalParameters) -> Result<Self, ParameterError> {
        parameters.validate()?;
        let config = SimulationConfig {
            parameters,
            ..SimulationConfig::default()
        };
        Ok(Self::build(&config))
    }

    /// Creates a stopped simulation from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SimulationConfig) -> Self {
        let state = PendulumState::at_rest(config.starting_angle);
        Self {
            parameters: config.parameters,
            scheme: config.scheme,
            starting_angle: config.starting_angle,
            max_frame_delta: config.max_frame_delta,
            state,
            energy: energy(&state, &config.parameters),
            history: History::new(config.history_capacity),
            period: PeriodEstimator::new()
                .with_threshold(config.crossing_threshold)
                .with_window(config.period_window),
            run_state: RunState::Stopped,
            reference: None,
            carry: 0.0,
        }
    }

    /// Replaces the parameters without pausing or resetting.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] and keeps the current parameters if the
    /// new ones are invalid.
    pub fn configure(&mut self, parameters: PhysicalParameters) -> Result<(), ParameterError> {
        parameters.validate()?;
        debug!(?parameters, "configure");
        self.parameters = parameters;
        self.energy = energy(&self.state, &self.parameters);
        Ok(())
    }

    /// Switches the integration scheme without resetting.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        debug!(%scheme, "set scheme");
        self.scheme = scheme;
    }

    /// Sets the release angle and resets the simulation.
    ///
    /// Unlike [`configure`](Self::configure), changing the starting angle
    /// always resets.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NotFinite`] and changes nothing if `angle`
    /// is not finite.
    pub fn set_starting_angle(&mut self, angle: f64) -> Result<(), ParameterError> {
        if !angle.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "starting_angle",
                value: angle,
            });
        }
        self.starting_angle = angle;
        self.reset();
        Ok(())
    }

    /// Starts the clock, using the current instant as the pacing reference.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Starts the clock with an explicit pacing reference.
    ///
    /// Has no effect if already running.
    pub fn start_at(&mut self, now: Instant) {
        if self.run_state == RunState::Running {
            return;
        }
        debug!(time = self.state.time, "start");
        self.run_state = RunState::Running;
        self.reference = Some(now);
    }

    /// Stops the clock, freezing the state.
    pub fn pause(&mut self) {
        if self.run_state == RunState::Stopped {
            return;
        }
        debug!(time = self.state.time, "pause");
        self.run_state = RunState::Stopped;
        self.reference = None;
    }

    /// Starts a stopped clock or pauses a running one.
    pub fn toggle_run(&mut self) {
        match self.run_state {
            RunState::Stopped => self.start(),
            RunState::Running => self.pause(),
        }
    }

    /// Stops the clock and returns to the starting angle at rest, `t = 0`,
    /// with empty history and no period measurement.
    pub fn reset(&mut self) {
        debug!(starting_angle = self.starting_angle, "reset");
        self.run_state = RunState::Stopped;
        self.reference = None;
        self.carry = 0.0;
        self.state = PendulumState::at_rest(self.starting_angle);
        self.energy = energy(&self.state, &self.parameters);
        self.history.clear();
        self.period.reset();
    }

    /// Forgets measured periods without touching the simulation state.
    pub fn clear_measurement(&mut self) {
        debug!("clear measurement");
        self.period.clear();
    }

    /// Advances by `elapsed` wall-clock seconds, scaled by the time scale.
    ///
    /// # Errors
    ///
    /// See [`tick_with`](Self::tick_with).
    pub fn tick(&mut self, elapsed: f64) -> Result<Tick, SimulationError> {
        self.tick_with(elapsed, ())
    }

    /// Advances to the wall-clock instant `now`.
    ///
    /// The elapsed time is measured from the previous tick or from
    /// [`start`](Self::start), and clamped to the configured maximum frame
    /// delta so a stalled host does not trigger a long burst of sub-steps.
    ///
    /// # Errors
    ///
    /// See [`tick_with`](Self::tick_with).
    pub fn tick_at(&mut self, now: Instant) -> Result<Tick, SimulationError> {
        if self.run_state == RunState::Stopped {
            return Ok(Tick::Idle);
        }
        let last = self.reference.replace(now).unwrap_or(now);
        let elapsed = now
            .saturating_duration_since(last)
            .as_secs_f64()
            .min(self.max_frame_delta);
        self.advance_by(elapsed, ())
    }

    /// Advances by `elapsed` wall-clock seconds, reporting each sub-step to
    /// `observer`.
    ///
    /// While stopped this returns [`Tick::Idle`]. Otherwise the scaled
    /// interval is sub-stepped, then the energy, history, and period
    /// estimator are updated once for the resulting state. The observer may
    /// stop the sub-stepping early, in which case the state reached so far is
    /// committed.
    ///
    /// The current instant becomes the pacing reference, so a later
    /// [`tick_at`](Self::tick_at) only applies wall-clock time that passed
    /// after this call.
    ///
    /// An interval too short for a single sub-step is carried into the next
    /// tick rather than dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] if integration produces a
    /// non-finite state; the previous state is retained and the clock pauses.
    /// Returns [`SimulationError::Solver`] if `elapsed` is negative or not
    /// finite.
    pub fn tick_with<Obs>(&mut self, elapsed: f64, observer: Obs) -> Result<Tick, SimulationError>
    where
        Obs: Observer<advance::Event, advance::Action>,
    {
        if self.run_state == RunState::Stopped {
            return Ok(Tick::Idle);
        }
        self.reference = Some(Instant::now());
        self.advance_by(elapsed, observer)
    }

    fn advance_by<Obs>(&mut self, elapsed: f64, observer: Obs) -> Result<Tick, SimulationError>
    where
        Obs: Observer<advance::Event, advance::Action>,
    {
        let interval = elapsed * self.parameters.time_scale + self.carry;
        let pendulum = Pendulum::new(self.parameters);

        let solution = advance::advance(
            &pendulum,
            self.scheme,
            self.state,
            interval,
            self.parameters.time_step,
            observer,
        )
        .map_err(|err| self.reject(err.into()))?;

        if solution.steps == 0 {
            self.carry = interval;
            return Ok(Tick::Advanced {
                steps: 0,
                crossing: None,
            });
        }

        let next_energy = energy(&solution.state, &self.parameters);
        if !next_energy.total.is_finite() {
            return Err(self.reject(SimulationError::Diverged {
                time: self.state.time,
            }));
        }

        self.carry = 0.0;
        self.state = solution.state;
        self.energy = next_energy;
        self.history.push(HistoryPoint::new(&self.state, &self.energy));

        let crossing = self.period.record(
            self.state.time,
            self.state.angle,
            self.state.angular_velocity,
        );
        if let Some(crossing) = crossing {
            debug!(
                time = crossing.time,
                interval = ?crossing.interval,
                measured_period = ?self.period.measured_period(),
                "period crossing"
            );
        }

        trace!(
            steps = solution.steps,
            time = self.state.time,
            angle = self.state.angle,
            "tick"
        );

        Ok(Tick::Advanced {
            steps: solution.steps,
            crossing,
        })
    }

    fn reject(&mut self, err: SimulationError) -> SimulationError {
        if let SimulationError::Diverged { time } = err {
            warn!(time, scheme = %self.scheme, "simulation diverged; pausing");
            self.pause();
        }
        err
    }

    #[must_use]
    pub fn current_state(&self) -> PendulumState {
        self.state
    }

    #[must_use]
    pub fn current_energy(&self) -> EnergySample {
        self.energy
    }

    /// Recorded samples, oldest first.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mean measured period (s), rounded to the millisecond.
    #[must_use]
    pub fn measured_period(&self) -> Option<f64> {
        self.period.measured_period()
    }

    #[must_use]
    pub fn period_estimator(&self) -> &PeriodEstimator {
        &self.period
    }

    /// Small-angle period `2π√(L/g)` (s) for the current parameters.
    #[must_use]
    pub fn analytic_period(&self) -> f64 {
        self.parameters.analytic_period()
    }

    #[must_use]
    pub fn parameters(&self) -> &PhysicalParameters {
        &self.parameters
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    #[must_use]
    pub fn starting_angle(&self) -> f64 {
        self.starting_angle
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(&SimulationConfig::default())
    }
}
