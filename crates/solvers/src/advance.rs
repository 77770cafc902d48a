//! Sub-stepping across an arbitrary interval.
//!
//! An interval longer than the step size `dt` is split into as many full
//! steps as fit, followed by one partial step that lands exactly on the end
//! of the interval:
//!
//! ```text
//! interval = 2.5 dt  →  dt, dt, 0.5 dt
//! ```
//!
//! # Example
//!
//! ```
//! use pendulum_core::{Pendulum, PendulumState, PhysicalParameters};
//! use pendulum_solvers::{Scheme, advance_unobserved};
//!
//! let params = PhysicalParameters::default();
//! let pendulum = Pendulum::new(params);
//! let start = PendulumState::at_rest(0.3);
//!
//! let solution =
//!     advance_unobserved(&pendulum, Scheme::RungeKutta4, start, 0.0125, params.time_step)?;
//!
//! assert_eq!(solution.steps, 3);
//! assert_eq!(solution.state.time, 0.0125);
//! # Ok::<(), pendulum_solvers::advance::Error>(())
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use pendulum_core::{Dynamics, Observer, PendulumState};

use crate::Scheme;

/// Remainders at or below this fraction of `dt` are absorbed into the final
/// full step rather than taken as a separate partial step.
const REMAINDER_TOLERANCE: f64 = 1e-9;

/// Advances `initial` across `interval` seconds using fixed steps of `dt`.
///
/// # Algorithm
///
/// 1. Split the interval into `floor(interval / dt)` full steps plus one
///    partial step for the remainder.
/// 2. For each sub-step:
///    - Step the state with `scheme`.
///    - On the last sub-step, snap time to `initial.time + interval`.
///    - Reject the step if the state is no longer finite.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
///
/// The caller's state is never modified, so a divergence leaves the last
/// valid state in the caller's hands.
///
/// An interval no longer than `dt * 1e-9` takes no steps and returns
/// `initial` unchanged with `steps == 0`. Callers that must not lose that
/// time should add it to their next interval.
///
/// # Errors
///
/// Returns [`Error::InvalidStep`] if `dt` is not finite and positive,
/// [`Error::InvalidInterval`] if `interval` is negative or not finite, and
/// [`Error::Diverged`] if a sub-step produces a non-finite state.
pub fn advance<D, Obs>(
    dynamics: &D,
    scheme: Scheme,
    initial: PendulumState,
    interval: f64,
    dt: f64,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    D: Dynamics,
    Obs: Observer<Event, Action>,
{
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidStep(dt));
    }
    if !interval.is_finite() || interval < 0.0 {
        return Err(Error::InvalidInterval(interval));
    }

    let end = initial.time + interval;

    let full_steps = (interval / dt).floor();
    let remainder = interval - full_steps * dt;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full_steps = full_steps as usize;
    let total_steps = if remainder > dt * REMAINDER_TOLERANCE {
        full_steps + 1
    } else {
        full_steps
    };

    let mut current = initial;

    for step in 1..=total_steps {
        let h = if step <= full_steps {
            dt
        } else {
            end - current.time
        };

        let mut next = scheme.step(dynamics, &current, h);
        if step == total_steps {
            next.time = end;
        }

        if !next.is_finite() {
            return Err(Error::Diverged { time: current.time });
        }
        current = next;

        let event = Event {
            step,
            h,
            state: current,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                state: current,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        state: current,
        steps: total_steps,
    })
}

/// Advances without observation.
///
/// This is a convenience wrapper around [`advance`] that discards events.
///
/// # Errors
///
/// See [`advance`].
pub fn advance_unobserved<D: Dynamics>(
    dynamics: &D,
    scheme: Scheme,
    initial: PendulumState,
    interval: f64,
    dt: f64,
) -> Result<Solution, Error> {
    advance(dynamics, scheme, initial, interval, dt, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pendulum_core::{Pendulum, Phase, PhaseRate, PhysicalParameters};

    // --- Test fixtures ---

    /// Constant angular velocity, no acceleration.
    struct Coast;

    impl Dynamics for Coast {
        fn rate(&self, _time: f64, phase: Phase) -> PhaseRate {
            PhaseRate {
                angle: phase.angular_velocity,
                angular_velocity: 0.0,
            }
        }
    }

    /// Acceleration proportional to velocity, which overflows quickly.
    struct Runaway;

    impl Dynamics for Runaway {
        fn rate(&self, _time: f64, phase: Phase) -> PhaseRate {
            PhaseRate {
                angle: phase.angular_velocity,
                angular_velocity: 1e300 * phase.angular_velocity,
            }
        }
    }

    fn spinning(time: f64) -> PendulumState {
        PendulumState {
            time,
            angle: 0.0,
            angular_velocity: 2.0,
        }
    }

    // --- Tests ---

    #[test]
    fn partial_interval_lands_exactly_on_end() {
        let dt = 0.01;
        let start = spinning(1.0);

        let solution =
            advance_unobserved(&Coast, Scheme::RungeKutta4, start, 2.5 * dt, dt).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 3);
        assert_eq!(solution.state.time, 1.0 + 2.5 * dt);
        assert_relative_eq!(solution.state.time - start.time, 2.5 * dt, epsilon = 1e-12);
        assert_relative_eq!(solution.state.angle, 2.0 * 2.5 * dt, epsilon = 1e-12);
    }

    #[test]
    fn sub_step_sizes_never_exceed_dt() {
        let dt = 0.004;
        let mut sizes = Vec::new();

        advance(
            &Coast,
            Scheme::SemiImplicitEuler,
            spinning(0.0),
            0.0175,
            dt,
            |event: &Event| {
                sizes.push(event.h);
                None
            },
        )
        .unwrap();

        assert_eq!(sizes.len(), 5);
        assert!(sizes.iter().all(|&h| h <= dt));
        assert_relative_eq!(sizes.iter().sum::<f64>(), 0.0175, epsilon = 1e-12);
        assert_relative_eq!(sizes[4], 0.0015, epsilon = 1e-12);
    }

    #[test]
    fn interval_shorter_than_dt_takes_one_step() {
        let solution =
            advance_unobserved(&Coast, Scheme::RungeKutta4, spinning(0.0), 0.001, 0.01).unwrap();
        assert_eq!(solution.steps, 1);
        assert_eq!(solution.state.time, 0.001);
    }

    #[test]
    fn whole_multiple_has_no_partial_step() {
        let solution =
            advance_unobserved(&Coast, Scheme::RungeKutta4, spinning(0.0), 0.04, 0.01).unwrap();
        assert_eq!(solution.state.time, 0.04);
        assert!(solution.steps == 4 || solution.steps == 5);
    }

    #[test]
    fn zero_interval_returns_initial() {
        let start = spinning(3.0);
        let solution = advance_unobserved(&Coast, Scheme::RungeKutta4, start, 0.0, 0.01).unwrap();
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.state, start);
    }

    #[test]
    fn sliver_interval_takes_no_steps() {
        let start = spinning(2.0);
        let solution = advance_unobserved(&Coast, Scheme::RungeKutta4, start, 1e-13, 0.005).unwrap();
        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.state, start);
    }

    #[test]
    fn observer_can_stop_early() {
        let observer = |event: &Event| {
            if event.step >= 2 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let solution = advance(
            &Coast,
            Scheme::RungeKutta4,
            spinning(0.0),
            1.0,
            0.1,
            observer,
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 2);
        assert_relative_eq!(solution.state.time, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn step_numbers_start_at_one() {
        let mut steps = Vec::new();
        advance(
            &Coast,
            Scheme::RungeKutta4,
            spinning(0.0),
            0.03,
            0.01,
            |event: &Event| {
                steps.push(event.step);
                None
            },
        )
        .unwrap();
        assert_eq!(steps.first(), Some(&1));
        assert_eq!(steps.last(), Some(&steps.len()));
    }

    #[test]
    fn divergence_is_reported() {
        let result = advance_unobserved(&Runaway, Scheme::RungeKutta4, spinning(0.0), 1.0, 0.1);
        assert!(matches!(result, Err(Error::Diverged { .. })));
    }

    #[test]
    fn rejects_invalid_step_and_interval() {
        let start = spinning(0.0);
        assert_eq!(
            advance_unobserved(&Coast, Scheme::RungeKutta4, start, 1.0, 0.0),
            Err(Error::InvalidStep(0.0))
        );
        assert!(matches!(
            advance_unobserved(&Coast, Scheme::RungeKutta4, start, 1.0, f64::NAN),
            Err(Error::InvalidStep(_))
        ));
        assert_eq!(
            advance_unobserved(&Coast, Scheme::RungeKutta4, start, -1.0, 0.1),
            Err(Error::InvalidInterval(-1.0))
        );
    }

    #[test]
    fn zero_gravity_pendulum_stays_at_rest() {
        let params = PhysicalParameters::default().gravity_si(0.0).damping_si(0.3);
        let pendulum = Pendulum::new(params);
        let start = PendulumState::at_rest(1.1);

        let solution =
            advance_unobserved(&pendulum, Scheme::RungeKutta4, start, 2.0, params.time_step)
                .unwrap();

        assert_eq!(solution.state.angle, 1.1);
        assert_eq!(solution.state.angular_velocity, 0.0);
    }
}
