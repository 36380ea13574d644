//! Inputs of a single scheduling run.

use std::fmt::Display;
use std::str::FromStr;

use log::warn;
use serde::Serialize;

use crate::error::{ConfigError, SchedulingError};
use crate::geometry::{Cylinder, DiskGeometry};
use crate::request::{Request, RequestTrace};

/// What to do with requests that target cylinders outside of the disk bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OutOfRangePolicy {
    /// Fail run construction with [`SchedulingError::OutOfRangeRequest`].
    #[default]
    Reject,
    /// Move offending cylinders to the nearest boundary before the run starts.
    Clamp,
}

impl FromStr for OutOfRangePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(OutOfRangePolicy::Reject),
            "clamp" => Ok(OutOfRangePolicy::Clamp),
            _ => Err(ConfigError::UnknownToken {
                kind: "out-of-range policy",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for OutOfRangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutOfRangePolicy::Reject => write!(f, "Reject"),
            OutOfRangePolicy::Clamp => write!(f, "Clamp"),
        }
    }
}

pub const DEFAULT_STEP_SIZE: usize = 4;

/// Optional run settings.
///
/// Is filled by user and then passed to [`RunContext::with_options`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub(crate) step_size: usize,
    pub(crate) time_based: bool,
    pub(crate) out_of_range: OutOfRangePolicy,
}

impl Default for RunOptions {
    /// Step size 4, positional (non time-based) mode, out-of-range requests rejected.
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            time_based: false,
            out_of_range: OutOfRangePolicy::Reject,
        }
    }
}

impl RunOptions {
    /// Sets the batch size of N-Step-SCAN. Values below 1 are clamped to 1.
    pub fn set_step_size(&mut self, step_size: usize) -> &mut Self {
        self.step_size = step_size.max(1);
        self
    }

    /// Enables arrival-aware scheduling and recording of service times.
    pub fn set_time_based(&mut self, time_based: bool) -> &mut Self {
        self.time_based = time_based;
        self
    }

    pub fn set_out_of_range_policy(&mut self, policy: OutOfRangePolicy) -> &mut Self {
        self.out_of_range = policy;
        self
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn time_based(&self) -> bool {
        self.time_based
    }

    pub fn out_of_range_policy(&self) -> OutOfRangePolicy {
        self.out_of_range
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Validated, immutable inputs of one run: geometry, initial head position, requests and options.
///
/// Any out-of-range request has already been rejected or clamped here, so schedulers can rely on
/// every cylinder lying within the geometry bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunContext {
    geometry: DiskGeometry,
    initial_position: Cylinder,
    requests: RequestTrace,
    options: RunOptions,
}

impl RunContext {
    /// Creates context with default options.
    pub fn new(
        geometry: DiskGeometry,
        initial_position: Cylinder,
        requests: RequestTrace,
    ) -> Result<Self, SchedulingError> {
        Self::with_options(geometry, initial_position, requests, RunOptions::default())
    }

    pub fn with_options(
        geometry: DiskGeometry,
        initial_position: Cylinder,
        requests: RequestTrace,
        mut options: RunOptions,
    ) -> Result<Self, SchedulingError> {
        geometry.validate_initial_position(initial_position)?;
        options.step_size = options.step_size.max(1);
        let requests = match options.out_of_range {
            OutOfRangePolicy::Reject => {
                for request in requests.iter() {
                    geometry.validate_cylinder(request.cylinder)?;
                }
                requests
            }
            OutOfRangePolicy::Clamp => requests
                .iter()
                .map(|request| {
                    let cylinder = geometry.clamp(request.cylinder);
                    if cylinder != request.cylinder {
                        warn!(
                            "Request {} is outside disk bounds [{}, {}], clamped to {}",
                            request.cylinder,
                            geometry.lower(),
                            geometry.upper(),
                            cylinder
                        );
                    }
                    Request::new(cylinder, request.arrival_time)
                })
                .collect(),
        };
        Ok(Self {
            geometry,
            initial_position,
            requests,
            options,
        })
    }

    pub fn geometry(&self) -> &DiskGeometry {
        &self.geometry
    }

    pub fn initial_position(&self) -> Cylinder {
        self.initial_position
    }

    pub fn requests(&self) -> &RequestTrace {
        &self.requests
    }

    pub fn step_size(&self) -> usize {
        self.options.step_size
    }

    pub fn time_based(&self) -> bool {
        self.options.time_based
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }
}
