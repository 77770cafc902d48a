//! Empirical oscillation period from angular-velocity crossings.
//!
//! A crossing fires once per oscillation, when the angular velocity changes
//! from positive to non-positive between two consecutive samples while the
//! bob is displaced by more than a small threshold. The threshold keeps
//! numerical jitter near rest from triggering spurious crossings.
//!
//! The time between consecutive crossings is one period. The estimator keeps
//! a rolling window of the most recent periods and publishes their mean,
//! rounded to the millisecond.

use std::collections::VecDeque;

use pendulum_core::Observer;

use crate::traits::HasPhase;

/// Minimum angle magnitude (rad) for a velocity sign change to count.
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Number of recent periods averaged into the published value.
pub const DEFAULT_WINDOW: usize = 6;

/// A detected crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Time of the sample at which the crossing fired (s).
    pub time: f64,

    /// Time since the previous crossing, if there was one (s).
    pub interval: Option<f64>,
}

/// Measures the oscillation period from a stream of samples.
///
/// Feed samples in chronological order through [`record`](Self::record) or
/// by passing the estimator as an [`Observer`] of any [`HasPhase`] event.
///
/// # Example
///
/// ```
/// use pendulum_observers::PeriodEstimator;
///
/// let mut estimator = PeriodEstimator::new();
/// for t in [1.0, 3.0, 5.0] {
///     estimator.record(t - 0.1, 0.2, 0.5);
///     estimator.record(t, 0.2, -0.3);
/// }
///
/// assert_eq!(estimator.measured_period(), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEstimator {
    threshold: f64,
    window: usize,
    previous_velocity: Option<f64>,
    last_crossing: Option<f64>,
    intervals: VecDeque<f64>,
    crossings: usize,
}

impl Default for PeriodEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodEstimator {
    /// Creates an estimator with the default threshold and window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window: DEFAULT_WINDOW,
            previous_velocity: None,
            last_crossing: None,
            intervals: VecDeque::with_capacity(DEFAULT_WINDOW + 1),
            crossings: 0,
        }
    }

    /// Sets the minimum angle magnitude for a crossing (rad).
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.abs();
        self
    }

    /// Sets how many recent periods are averaged. A window of zero is
    /// treated as one.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        while self.intervals.len() > self.window {
            self.intervals.pop_front();
        }
        self
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Records one sample and returns the crossing it completes, if any.
    pub fn record(&mut self, time: f64, angle: f64, angular_velocity: f64) -> Option<Crossing> {
        let previous = self.previous_velocity.replace(angular_velocity)?;

        let turned = previous > 0.0 && angular_velocity <= 0.0;
        if !turned || angle.abs() <= self.threshold {
            return None;
        }

        self.crossings += 1;
        let interval = self.last_crossing.replace(time).map(|last| time - last);
        if let Some(interval) = interval {
            self.intervals.push_back(interval);
            if self.intervals.len() > self.window {
                self.intervals.pop_front();
            }
        }

        Some(Crossing { time, interval })
    }

    /// Returns the mean of the current window, rounded to the millisecond.
    ///
    /// Returns `None` until two crossings have been observed.
    #[must_use]
    pub fn measured_period(&self) -> Option<f64> {
        if self.intervals.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = self.intervals.iter().sum::<f64>() / self.intervals.len() as f64;
        Some((mean * 1000.0).round() / 1000.0)
    }

    /// Returns the periods in the window, oldest first.
    pub fn intervals(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.intervals.iter().copied()
    }

    /// Returns the number of crossings seen since the last clear or reset.
    #[must_use]
    pub fn crossings(&self) -> usize {
        self.crossings
    }

    /// Returns the time of the most recent crossing.
    #[must_use]
    pub fn last_crossing(&self) -> Option<f64> {
        self.last_crossing
    }

    /// Forgets all crossings and the published period.
    ///
    /// The last sample is kept, so a crossing that completes on the next
    /// sample is still detected.
    pub fn clear(&mut self) {
        self.last_crossing = None;
        self.intervals.clear();
        self.crossings = 0;
    }

    /// Returns the estimator to its freshly constructed state, keeping the
    /// threshold and window.
    pub fn reset(&mut self) {
        self.clear();
        self.previous_velocity = None;
    }
}

impl<E: HasPhase, A> Observer<E, A> for PeriodEstimator {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.time(), event.angle(), event.angular_velocity());
        None
    }
}
