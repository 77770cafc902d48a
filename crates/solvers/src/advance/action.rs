/// Control actions supported by [`advance`](crate::advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop sub-stepping and return the state reached so far.
    StopEarly,
}
