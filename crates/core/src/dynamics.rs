use crate::{MIN_LENGTH, MIN_MASS, Phase, PhaseRate, PhysicalParameters};

/// A first-order system that maps a phase at a given time to its rate.
///
/// Integration schemes are generic over this trait, so they can be exercised
/// with simple synthetic systems as well as the full [`Pendulum`].
pub trait Dynamics {
    /// Returns the time derivative of `phase` at `time`.
    fn rate(&self, time: f64, phase: Phase) -> PhaseRate;
}

/// Equation of motion of a rigid pendulum with linear drag and an optional
/// sinusoidal drive torque:
///
/// ```text
/// θ'' = -(g / L) sin θ - (b / m) θ' + (A / (m L²)) sin(Ω t)
/// ```
///
/// Length and mass are floored at [`MIN_LENGTH`] and [`MIN_MASS`] where they
/// divide. Gravity is used as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    parameters: PhysicalParameters,
}

impl Pendulum {
    #[must_use]
    pub fn new(parameters: PhysicalParameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &PhysicalParameters {
        &self.parameters
    }

    /// Returns the angular acceleration (rad/s²) at the given time and phase.
    #[must_use]
    pub fn angular_acceleration(&self, time: f64, angle: f64, angular_velocity: f64) -> f64 {
        let PhysicalParameters {
            length,
            mass,
            gravity,
            damping,
            ..
        } = self.parameters;
        let length = length.max(MIN_LENGTH);
        let mass = mass.max(MIN_MASS);

        let restoring = -(gravity / length) * angle.sin();
        let drag = -(damping / mass) * angular_velocity;

        restoring + drag + self.drive(time, mass, length)
    }

    fn drive(&self, time: f64, mass: f64, length: f64) -> f64 {
        if !self.parameters.is_driven() {
            return 0.0;
        }
        let PhysicalParameters {
            drive_amplitude,
            drive_frequency,
            ..
        } = self.parameters;
        drive_amplitude / (mass * length * length) * (drive_frequency * time).sin()
    }
}

impl From<PhysicalParameters> for Pendulum {
    fn from(parameters: PhysicalParameters) -> Self {
        Self::new(parameters)
    }
}

impl Dynamics for Pendulum {
    fn rate(&self, time: f64, phase: Phase) -> PhaseRate {
        PhaseRate {
            angle: phase.angular_velocity,
            angular_velocity: self.angular_acceleration(time, phase.angle, phase.angular_velocity),
        }
    }
}
