//! Errors returned when a run cannot be set up.

use std::fmt::{Debug, Display};

use crate::geometry::MAX_CYLINDER;

/// Describes why a disk geometry or a run context was rejected.
///
/// All failures are detected before any scheduling step is taken, so a trace is never returned
/// together with an error.
#[derive(Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// Cylinder range is empty, inverted, negative or larger than [`MAX_CYLINDER`], or the initial
    /// head position (`position`, when set) lies outside of `[lower, upper]`.
    InvalidGeometry {
        lower: i64,
        upper: i64,
        position: Option<i64>,
    },
    /// A request targets a cylinder outside of `[lower, upper]` and the run rejects such requests.
    OutOfRangeRequest { cylinder: i64, lower: i64, upper: i64 },
    /// Records passed to [`ResultTrace::new`](crate::trace::ResultTrace::new) do not describe a
    /// consistent run.
    InvalidTrace { reason: &'static str },
}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::InvalidGeometry {
                lower,
                upper,
                position: Some(position),
            } => write!(
                f,
                "invalid geometry: initial position {} is out of disk bounds [{}, {}]",
                position, lower, upper
            ),
            SchedulingError::InvalidGeometry { lower, upper, .. } => {
                if *lower < 0 {
                    write!(f, "invalid geometry: lower cylinder cannot be negative ({})", lower)
                } else if *upper > MAX_CYLINDER {
                    write!(
                        f,
                        "invalid geometry: upper cylinder ({}) exceeds the maximum of {}",
                        upper, MAX_CYLINDER
                    )
                } else {
                    write!(
                        f,
                        "invalid geometry: upper cylinder ({}) must be greater than lower cylinder ({})",
                        upper, lower
                    )
                }
            }
            SchedulingError::OutOfRangeRequest { cylinder, lower, upper } => write!(
                f,
                "request for cylinder {} is out of disk bounds [{}, {}]",
                cylinder, lower, upper
            ),
            SchedulingError::InvalidTrace { reason } => write!(f, "invalid trace: {}", reason),
        }
    }
}

impl Debug for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for SchedulingError {}

/// Error produced while reading or resolving a configuration file.
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    /// A token (direction, wrap policy, algorithm, distribution...) that is not recognized.
    UnknownToken { kind: &'static str, value: String },
    Scheduling(SchedulingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "can't read config: {}", err),
            ConfigError::Yaml(err) => write!(f, "can't parse config: {}", err),
            ConfigError::UnknownToken { kind, value } => write!(f, "unknown {}: {}", kind, value),
            ConfigError::Scheduling(err) => Display::fmt(err, f),
        }
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Yaml(err) => Some(err),
            ConfigError::Scheduling(err) => Some(err),
            ConfigError::UnknownToken { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<SchedulingError> for ConfigError {
    fn from(err: SchedulingError) -> Self {
        ConfigError::Scheduling(err)
    }
}
