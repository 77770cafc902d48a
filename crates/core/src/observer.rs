/// Receives events and decides how the caller should proceed.
///
/// Observers let callers watch or steer an integration without changing its
/// API, which is how the period estimator, the history buffer, and ad hoc
/// stopping rules hook into a run.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// caller-specific action and `None` lets it continue unchanged.
///
/// Closures implement `Observer` automatically, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<f64, &'static str>>(mut observer: O, events: &[f64]) -> Vec<&'static str> {
        events.iter().filter_map(|e| observer.observe(e)).collect()
    }

    #[test]
    fn closure_observer_returns_actions() {
        let actions = drive(
            |t: &f64| if *t > 1.0 { Some("stop") } else { None },
            &[0.5, 1.5, 2.5],
        );
        assert_eq!(actions, vec!["stop", "stop"]);
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), &[0.0, 1.0]).is_empty());
    }
}
