use std::{fs, path::Path};

use pendulum_core::{ParameterError, PhysicalParameters};
use pendulum_observers::{history, period};
use pendulum_solvers::Scheme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest wall-clock interval (s) a single paced tick may apply.
pub const DEFAULT_MAX_FRAME_DELTA: f64 = 0.25;

/// Starting angle (rad) used when none is configured.
pub const DEFAULT_STARTING_ANGLE: f64 = 0.5;

/// Everything needed to construct a [`Simulation`](crate::Simulation).
///
/// Every field has a default, so a configuration file only needs to name what
/// it changes:
///
/// ```
/// use pendulum_sim::SimulationConfig;
/// use pendulum_solvers::Scheme;
///
/// let config = SimulationConfig::from_toml_str(
///     r#"
///     scheme = "semi-implicit-euler"
///     starting_angle = 0.2
///
///     [parameters]
///     length = 2.0
///     "#,
/// )?;
///
/// assert_eq!(config.scheme, Scheme::SemiImplicitEuler);
/// assert_eq!(config.parameters.length, 2.0);
/// assert_eq!(config.parameters.mass, 1.0);
/// # Ok::<(), pendulum_sim::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Integration scheme.
    pub scheme: Scheme,

    /// Angle (rad) the pendulum is released from on reset.
    pub starting_angle: f64,

    /// Maximum number of history points retained.
    pub history_capacity: usize,

    /// Number of recent periods averaged into the measured period.
    pub period_window: usize,

    /// Minimum angle magnitude (rad) for a period crossing.
    pub crossing_threshold: f64,

    /// Upper bound (s) on the wall-clock delta applied by one paced tick.
    pub max_frame_delta: f64,

    /// Physical and numerical parameters.
    pub parameters: PhysicalParameters,
}

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("{name} must be {requirement}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("{0} must be at least 1")]
    Empty(&'static str),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            starting_angle: DEFAULT_STARTING_ANGLE,
            history_capacity: history::DEFAULT_CAPACITY,
            period_window: period::DEFAULT_WINDOW,
            crossing_threshold: period::DEFAULT_THRESHOLD,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            parameters: PhysicalParameters::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// any error from [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks parameters, capacities, and the remaining numeric settings.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;

        if self.history_capacity == 0 {
            return Err(ConfigError::Empty("history_capacity"));
        }
        if self.period_window == 0 {
            return Err(ConfigError::Empty("period_window"));
        }

        if !self.starting_angle.is_finite() {
            return Err(ConfigError::OutOfRange {
                name: "starting_angle",
                value: self.starting_angle,
                requirement: "finite",
            });
        }
        if !self.crossing_threshold.is_finite() || self.crossing_threshold < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "crossing_threshold",
                value: self.crossing_threshold,
                requirement: "finite and non-negative",
            });
        }
        if !self.max_frame_delta.is_finite() || self.max_frame_delta <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "max_frame_delta",
                value: self.max_frame_delta,
                requirement: "finite and positive",
            });
        }

        Ok(())
    }
}
