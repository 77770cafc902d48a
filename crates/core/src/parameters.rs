use std::f64::consts::TAU;

use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    angular_velocity::radian_per_second,
    f64::{Acceleration, AngularVelocity, Length, Mass, Time, Torque},
    length::meter,
    mass::kilogram,
    time::second,
    torque::newton_meter,
};

/// Smallest rod length (m) used wherever length appears as a divisor.
pub const MIN_LENGTH: f64 = 1e-6;

/// Smallest bob mass (kg) used wherever mass appears as a divisor.
pub const MIN_MASS: f64 = 1e-6;

/// Smallest gravity (m/s²) used by the derived period formula.
///
/// The equation of motion uses gravity as given, so zero gravity still
/// produces a motionless pendulum.
pub const MIN_GRAVITY: f64 = 1e-6;

/// Physical and numerical parameters of the pendulum.
///
/// Values are stored in SI units. Parameters are immutable for the duration of
/// a tick and replaced wholesale between ticks.
///
/// Fields can be set directly, through the `*_si` builders, or through the
/// unit-safe builders that accept [`uom`] quantities:
///
/// ```
/// use pendulum_core::PhysicalParameters;
/// use uom::si::{f64::Length, length::centimeter};
///
/// let params = PhysicalParameters::default()
///     .length(Length::new::<centimeter>(50.0))
///     .damping_si(0.1);
///
/// assert!((params.length - 0.5).abs() < 1e-12);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PhysicalParameters {
    /// Rod length (m).
    pub length: f64,

    /// Bob mass (kg).
    pub mass: f64,

    /// Gravitational acceleration (m/s²).
    pub gravity: f64,

    /// Linear drag coefficient (kg/s); zero means undamped.
    pub damping: f64,

    /// Amplitude of the sinusoidal drive torque (N·m); zero disables it.
    pub drive_amplitude: f64,

    /// Angular frequency of the drive (rad/s).
    pub drive_frequency: f64,

    /// Fixed integration step (s).
    pub time_step: f64,

    /// Multiplier applied to elapsed wall-clock time before stepping.
    pub time_scale: f64,
}

/// Errors returned by [`PhysicalParameters::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

impl Default for PhysicalParameters {
    /// A one meter, one kilogram pendulum in Earth gravity, undamped and
    /// undriven, stepped at 5 ms in real time.
    fn default() -> Self {
        Self {
            length: 1.0,
            mass: 1.0,
            gravity: 9.81,
            damping: 0.0,
            drive_amplitude: 0.0,
            drive_frequency: 0.0,
            time_step: 0.005,
            time_scale: 1.0,
        }
    }
}

impl PhysicalParameters {
    /// Checks that every parameter is finite and within its physical range.
    ///
    /// Length, mass, time step, and time scale must be strictly positive.
    /// Gravity and damping must not be negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ("length", self.length),
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("drive_amplitude", self.drive_amplitude),
            ("drive_frequency", self.drive_frequency),
            ("time_step", self.time_step),
            ("time_scale", self.time_scale),
        ];
        if let Some(&(name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParameterError::NotFinite { name, value });
        }

        for (name, value) in [
            ("length", self.length),
            ("mass", self.mass),
            ("time_step", self.time_step),
            ("time_scale", self.time_scale),
        ] {
            if value <= 0.0 {
                return Err(ParameterError::NotPositive { name, value });
            }
        }

        for (name, value) in [("gravity", self.gravity), ("damping", self.damping)] {
            if value < 0.0 {
                return Err(ParameterError::Negative { name, value });
            }
        }

        Ok(())
    }

    /// Returns the small-angle period `2π√(L/g)` in seconds.
    ///
    /// Length and gravity are floored at [`MIN_LENGTH`] and [`MIN_GRAVITY`],
    /// so the result is always finite for finite inputs.
    #[must_use]
    pub fn analytic_period(&self) -> f64 {
        let length = self.length.max(MIN_LENGTH);
        let gravity = self.gravity.max(MIN_GRAVITY);
        TAU * (length / gravity).sqrt()
    }

    /// Returns `true` if the sinusoidal drive is active.
    #[must_use]
    pub fn is_driven(&self) -> bool {
        self.drive_amplitude != 0.0
    }

    /// Sets length using a `uom::Length`.
    #[must_use]
    pub fn length(mut self, length: Length) -> Self {
        self.length = length.get::<meter>();
        self
    }

    /// Sets length in SI units (m).
    #[must_use]
    pub fn length_si(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets mass using a `uom::Mass`.
    #[must_use]
    pub fn mass(mut self, mass: Mass) -> Self {
        self.mass = mass.get::<kilogram>();
        self
    }

    /// Sets mass in SI units (kg).
    #[must_use]
    pub fn mass_si(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Sets gravity using a `uom::Acceleration`.
    #[must_use]
    pub fn gravity(mut self, gravity: Acceleration) -> Self {
        self.gravity = gravity.get::<meter_per_second_squared>();
        self
    }

    /// Sets gravity in SI units (m/s²).
    #[must_use]
    pub fn gravity_si(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the linear drag coefficient (kg/s).
    #[must_use]
    pub fn damping_si(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the drive torque amplitude using a `uom::Torque`.
    #[must_use]
    pub fn drive_amplitude(mut self, amplitude: Torque) -> Self {
        self.drive_amplitude = amplitude.get::<newton_meter>();
        self
    }

    /// Sets the drive frequency using a `uom::AngularVelocity`.
    #[must_use]
    pub fn drive_frequency(mut self, frequency: AngularVelocity) -> Self {
        self.drive_frequency = frequency.get::<radian_per_second>();
        self
    }

    /// Sets the drive in SI units (N·m and rad/s).
    #[must_use]
    pub fn drive_si(mut self, amplitude: f64, frequency: f64) -> Self {
        self.drive_amplitude = amplitude;
        self.drive_frequency = frequency;
        self
    }

    /// Sets the integration step using a `uom::Time`.
    #[must_use]
    pub fn time_step(mut self, time_step: Time) -> Self {
        self.time_step = time_step.get::<second>();
        self
    }

    /// Sets the integration step in SI units (s).
    #[must_use]
    pub fn time_step_si(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Sets the wall-clock time scale multiplier.
    #[must_use]
    pub fn time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }
}
