//! A bounded, chronological buffer of recent samples.

use std::collections::{VecDeque, vec_deque};

use pendulum_core::{EnergySample, Observer, PendulumState};

/// Default number of points retained by a simulation's history.
pub const DEFAULT_CAPACITY: usize = 3000;

/// A recorded sample: the pendulum state together with its energy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryPoint {
    pub time: f64,
    pub angle: f64,
    pub angular_velocity: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl HistoryPoint {
    #[must_use]
    pub fn new(state: &PendulumState, energy: &EnergySample) -> Self {
        Self {
            time: state.time,
            angle: state.angle,
            angular_velocity: state.angular_velocity,
            kinetic: energy.kinetic,
            potential: energy.potential,
            total: energy.total,
        }
    }

    #[must_use]
    pub fn state(&self) -> PendulumState {
        PendulumState {
            time: self.time,
            angle: self.angle,
            angular_velocity: self.angular_velocity,
        }
    }

    #[must_use]
    pub fn energy(&self) -> EnergySample {
        EnergySample {
            kinetic: self.kinetic,
            potential: self.potential,
            total: self.total,
        }
    }
}

/// A first-in, first-out buffer holding at most `capacity` items.
///
/// Items are kept in insertion order. Pushing onto a full buffer evicts the
/// oldest item.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T = HistoryPoint> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> History<T> {
    /// Creates an empty buffer. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an item, returning the evicted oldest item if the buffer was
    /// full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the most recent item.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Returns the oldest retained item.
    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterates from oldest to most recent.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copies the buffer into a `Vec`, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Records every observed event.
impl<T: Clone, A> Observer<T, A> for History<T> {
    fn observe(&mut self, event: &T) -> Option<A> {
        self.push(event.clone());
        None
    }
}
