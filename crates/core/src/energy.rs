use uom::si::{energy::joule, f64::Energy};

use crate::{PendulumState, PhysicalParameters};

/// Mechanical energy of the pendulum at an instant, in joules.
///
/// Potential energy is measured from the rest position, so both components
/// are non-negative for non-negative gravity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergySample {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl EnergySample {
    #[must_use]
    pub fn kinetic_energy(&self) -> Energy {
        Energy::new::<joule>(self.kinetic)
    }

    #[must_use]
    pub fn potential_energy(&self) -> Energy {
        Energy::new::<joule>(self.potential)
    }

    #[must_use]
    pub fn total_energy(&self) -> Energy {
        Energy::new::<joule>(self.total)
    }
}

/// Computes kinetic, potential, and total energy for a state.
///
/// ```text
/// height    = L (1 - cos θ)
/// potential = m g height
/// kinetic   = ½ m (|ω| L)²
/// ```
#[must_use]
pub fn energy(state: &PendulumState, parameters: &PhysicalParameters) -> EnergySample {
    let PhysicalParameters {
        length,
        mass,
        gravity,
        ..
    } = *parameters;

    let height = length * (1.0 - state.angle.cos());
    let potential = mass * gravity * height;

    let speed = state.angular_velocity.abs() * length;
    let kinetic = 0.5 * mass * speed * speed;

    EnergySample {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    fn params() -> PhysicalParameters {
        PhysicalParameters::default()
            .length_si(2.0)
            .mass_si(3.0)
            .gravity_si(10.0)
    }

    #[test]
    fn rest_position_has_no_energy() {
        let sample = energy(&PendulumState::default(), &params());
        assert_eq!(sample, EnergySample::default());
    }

    #[test]
    fn horizontal_rod_at_rest_is_all_potential() {
        let sample = energy(&PendulumState::at_rest(FRAC_PI_2), &params());
        assert_relative_eq!(sample.potential, 60.0);
        assert_relative_eq!(sample.kinetic, 0.0);
        assert_relative_eq!(sample.total, 60.0);
    }

    #[test]
    fn inverted_rod_doubles_height() {
        let sample = energy(&PendulumState::at_rest(PI), &params());
        assert_relative_eq!(sample.potential, 120.0);
    }

    #[test]
    fn kinetic_ignores_direction() {
        let forward = PendulumState {
            angular_velocity: 1.5,
            ..PendulumState::default()
        };
        let backward = PendulumState {
            angular_velocity: -1.5,
            ..PendulumState::default()
        };
        let expected = 0.5 * 3.0 * (1.5 * 2.0_f64).powi(2);

        assert_relative_eq!(energy(&forward, &params()).kinetic, expected);
        assert_relative_eq!(energy(&backward, &params()).kinetic, expected);
    }

    #[test]
    fn unit_accessors_report_joules() {
        let sample = energy(&PendulumState::at_rest(FRAC_PI_2), &params());
        assert_relative_eq!(sample.total_energy().get::<joule>(), 60.0);
        assert_relative_eq!(sample.potential_energy().get::<joule>(), 60.0);
        assert_relative_eq!(sample.kinetic_energy().get::<joule>(), 0.0);
    }
}
