use std::fmt;

use pendulum_core::{Dynamics, PendulumState};

use crate::{rk4, semi_implicit_euler};

/// A fixed-step integration scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Scheme {
    /// First-order symplectic Euler: velocity first, then angle.
    ///
    /// Energy oscillates around its true value at a size set by the step, so
    /// with light damping the total is not monotone sample to sample.
    SemiImplicitEuler,

    /// Classic fourth-order Runge–Kutta.
    ///
    /// With damping and no drive, total energy is non-increasing across
    /// samples.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "rk4", alias = "runge-kutta-4"))]
    RungeKutta4,
}

impl Scheme {
    /// Advances `state` by one step of size `h` with this scheme.
    #[must_use]
    pub fn step<D: Dynamics>(self, dynamics: &D, state: &PendulumState, h: f64) -> PendulumState {
        match self {
            Self::SemiImplicitEuler => semi_implicit_euler::step(dynamics, state, h),
            Self::RungeKutta4 => rk4::step(dynamics, state, h),
        }
    }

    /// Order of accuracy of the scheme.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::SemiImplicitEuler => 1,
            Self::RungeKutta4 => 4,
        }
    }

    /// Number of rate evaluations per step.
    #[must_use]
    pub fn stages(self) -> u32 {
        match self {
            Self::SemiImplicitEuler => 1,
            Self::RungeKutta4 => 4,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SemiImplicitEuler => "semi-implicit Euler",
            Self::RungeKutta4 => "RK4",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
