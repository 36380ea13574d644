//! Disk geometry: cylinder bounds, initial sweep direction and wrap policy.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ConfigError, SchedulingError};

/// Cylinder number. Signed so that out-of-range input can be represented and rejected.
pub type Cylinder = i64;

/// Direction of head sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Towards higher cylinder numbers.
    Increasing,
    /// Towards lower cylinder numbers.
    Decreasing,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "increasing" | "inc" | "right" | "r" | "up" => Ok(Direction::Increasing),
            "decreasing" | "dec" | "left" | "l" | "down" => Ok(Direction::Decreasing),
            _ => Err(ConfigError::UnknownToken {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Increasing => write!(f, "Increasing"),
            Direction::Decreasing => write!(f, "Decreasing"),
        }
    }
}

/// Behavior of circular algorithms (C-SCAN, C-LOOK) when the head returns to the opposite side of the disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum WrapPolicy {
    /// Travel to the boundary, then jump to the opposite boundary (charged as `upper - lower`).
    ToBoundary,
    /// Jump directly from the last serviced cylinder to the first pending request on the far side.
    ToFirstPending,
}

impl FromStr for WrapPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "to_boundary" | "toboundary" | "boundary" | "start" | "wrap_to_start" => Ok(WrapPolicy::ToBoundary),
            "to_first_pending" | "tofirstpending" | "first" | "first_req" | "first_request" | "wrap_to_first_req" => {
                Ok(WrapPolicy::ToFirstPending)
            }
            _ => Err(ConfigError::UnknownToken {
                kind: "wrap policy",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for WrapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrapPolicy::ToBoundary => write!(f, "ToBoundary"),
            WrapPolicy::ToFirstPending => write!(f, "ToFirstPending"),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_LOWER_CYLINDER: Cylinder = 0;
pub const DEFAULT_UPPER_CYLINDER: Cylinder = 4999;
/// Largest supported cylinder number. Keeps the accumulated head movement of any run within `u64`.
pub const MAX_CYLINDER: Cylinder = u32::MAX as Cylinder;

/// Immutable description of the simulated disk used by one run.
///
/// Invariant: `0 <= lower < upper <= MAX_CYLINDER`. Every constructor and setter validates it and leaves the
/// geometry untouched on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DiskGeometry {
    lower: Cylinder,
    upper: Cylinder,
    initial_direction: Direction,
    wrap_policy: WrapPolicy,
}

impl Default for DiskGeometry {
    /// Cylinders `[0, 4999]`, sweeping towards higher cylinders and wrapping to the boundary.
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_CYLINDER,
            upper: DEFAULT_UPPER_CYLINDER,
            initial_direction: Direction::Increasing,
            wrap_policy: WrapPolicy::ToBoundary,
        }
    }
}

impl DiskGeometry {
    /// Creates geometry with given bounds and policies.
    ///
    /// Returns [`SchedulingError::InvalidGeometry`] if `lower < 0`, `upper <= lower` or
    /// `upper > MAX_CYLINDER`.
    pub fn new(
        lower: Cylinder,
        upper: Cylinder,
        initial_direction: Direction,
        wrap_policy: WrapPolicy,
    ) -> Result<Self, SchedulingError> {
        Self::check_bounds(lower, upper)?;
        Ok(Self {
            lower,
            upper,
            initial_direction,
            wrap_policy,
        })
    }

    /// Creates geometry with given bounds and default direction and wrap policy.
    pub fn with_bounds(lower: Cylinder, upper: Cylinder) -> Result<Self, SchedulingError> {
        Self::new(lower, upper, Direction::Increasing, WrapPolicy::ToBoundary)
    }

    fn check_bounds(lower: Cylinder, upper: Cylinder) -> Result<(), SchedulingError> {
        if lower < 0 || upper <= lower || upper > MAX_CYLINDER {
            return Err(SchedulingError::InvalidGeometry {
                lower,
                upper,
                position: None,
            });
        }
        Ok(())
    }

    /// Replaces both bounds at once.
    pub fn set_bounds(&mut self, lower: Cylinder, upper: Cylinder) -> Result<&mut Self, SchedulingError> {
        Self::check_bounds(lower, upper)?;
        self.lower = lower;
        self.upper = upper;
        Ok(self)
    }

    pub fn set_lower(&mut self, lower: Cylinder) -> Result<&mut Self, SchedulingError> {
        self.set_bounds(lower, self.upper)
    }

    pub fn set_upper(&mut self, upper: Cylinder) -> Result<&mut Self, SchedulingError> {
        self.set_bounds(self.lower, upper)
    }

    pub fn set_initial_direction(&mut self, direction: Direction) -> &mut Self {
        self.initial_direction = direction;
        self
    }

    pub fn set_wrap_policy(&mut self, wrap_policy: WrapPolicy) -> &mut Self {
        self.wrap_policy = wrap_policy;
        self
    }

    pub fn lower(&self) -> Cylinder {
        self.lower
    }

    pub fn upper(&self) -> Cylinder {
        self.upper
    }

    pub fn initial_direction(&self) -> Direction {
        self.initial_direction
    }

    pub fn wrap_policy(&self) -> WrapPolicy {
        self.wrap_policy
    }

    /// Number of addressable cylinders (`upper - lower + 1`).
    pub fn cylinder_count(&self) -> u64 {
        self.lower.abs_diff(self.upper) + 1
    }

    /// Distance between the two boundaries, i.e. the cost of a full wrap.
    pub fn span(&self) -> u64 {
        self.lower.abs_diff(self.upper)
    }

    pub fn contains(&self, cylinder: Cylinder) -> bool {
        cylinder >= self.lower && cylinder <= self.upper
    }

    /// Returns the cylinder if it lies within bounds, [`SchedulingError::OutOfRangeRequest`] otherwise.
    pub fn validate_cylinder(&self, cylinder: Cylinder) -> Result<Cylinder, SchedulingError> {
        if self.contains(cylinder) {
            Ok(cylinder)
        } else {
            Err(SchedulingError::OutOfRangeRequest {
                cylinder,
                lower: self.lower,
                upper: self.upper,
            })
        }
    }

    /// Checks that the head may start at given position, [`SchedulingError::InvalidGeometry`] otherwise.
    pub fn validate_initial_position(&self, position: Cylinder) -> Result<Cylinder, SchedulingError> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(SchedulingError::InvalidGeometry {
                lower: self.lower,
                upper: self.upper,
                position: Some(position),
            })
        }
    }

    /// Moves the cylinder into `[lower, upper]`. Never widens the bounds.
    pub fn clamp(&self, cylinder: Cylinder) -> Cylinder {
        cylinder.clamp(self.lower, self.upper)
    }

    /// Boundary reached when sweeping in given direction.
    pub fn boundary(&self, direction: Direction) -> Cylinder {
        match direction {
            Direction::Increasing => self.upper,
            Direction::Decreasing => self.lower,
        }
    }
}

impl Display for DiskGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cylinders=[{}, {}], direction={}, wrap_policy={}",
            self.lower, self.upper, self.initial_direction, self.wrap_policy
        )
    }
}
