//! Scheduler interface and registry of available algorithms.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use sugars::boxed;

use crate::context::RunContext;
use crate::error::{ConfigError, SchedulingError};
use crate::geometry::{Cylinder, DiskGeometry};
use crate::request::RequestTrace;
use crate::schedulers::circular::{CLookScheduler, CScanScheduler};
use crate::schedulers::fcfs::FcfsScheduler;
use crate::schedulers::fscan::FScanScheduler;
use crate::schedulers::nstep_scan::NStepScanScheduler;
use crate::schedulers::scan::{LookScheduler, ScanScheduler};
use crate::schedulers::sstf::SstfScheduler;
use crate::trace::ResultTrace;

/// Disk-head scheduling policy.
///
/// A scheduler is stateless: all inputs come from the [`RunContext`] and all per-run state lives
/// in a [`TraceRecorder`](crate::trace::TraceRecorder) created inside `execute`, so one instance
/// can serve any number of independent runs, including concurrent ones.
pub trait Scheduler: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Runs the policy to completion over the context's requests.
    fn execute(&self, ctx: &RunContext) -> ResultTrace;
}

/// Validates inputs and runs the scheduler with default run options.
pub fn run(
    scheduler: &dyn Scheduler,
    geometry: DiskGeometry,
    initial_position: Cylinder,
    requests: RequestTrace,
) -> Result<ResultTrace, SchedulingError> {
    let ctx = RunContext::new(geometry, initial_position, requests)?;
    Ok(scheduler.execute(&ctx))
}

///////////////////////////////////////////////////////////////////////////////

/// Identifies one of the supported policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Algorithm {
    Fcfs,
    Sstf,
    Scan,
    CScan,
    Look,
    CLook,
    FScan,
    NStepScan,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Fcfs,
        Algorithm::Sstf,
        Algorithm::Scan,
        Algorithm::CScan,
        Algorithm::Look,
        Algorithm::CLook,
        Algorithm::FScan,
        Algorithm::NStepScan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sstf => "SSTF",
            Algorithm::Scan => "SCAN",
            Algorithm::CScan => "C-SCAN",
            Algorithm::Look => "LOOK",
            Algorithm::CLook => "C-LOOK",
            Algorithm::FScan => "FSCAN",
            Algorithm::NStepScan => "N-Step-SCAN",
        }
    }

    /// Whether the policy takes request arrival times into account in time-based runs.
    pub fn uses_arrival_times(&self) -> bool {
        matches!(self, Algorithm::FScan | Algorithm::NStepScan)
    }

    pub fn scheduler(&self) -> Box<dyn Scheduler> {
        default_scheduler_resolver(*self)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect();
        match normalized.as_str() {
            "FCFS" | "FIFO" => Ok(Algorithm::Fcfs),
            "SSTF" => Ok(Algorithm::Sstf),
            "SCAN" | "ELEVATOR" => Ok(Algorithm::Scan),
            "CSCAN" => Ok(Algorithm::CScan),
            "LOOK" => Ok(Algorithm::Look),
            "CLOOK" => Ok(Algorithm::CLook),
            "FSCAN" => Ok(Algorithm::FScan),
            "NSTEPSCAN" | "NSTEP" => Ok(Algorithm::NStepScan),
            _ => Err(ConfigError::UnknownToken {
                kind: "algorithm",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn default_scheduler_resolver(algorithm: Algorithm) -> Box<dyn Scheduler> {
    match algorithm {
        Algorithm::Fcfs => boxed!(FcfsScheduler::new()),
        Algorithm::Sstf => boxed!(SstfScheduler::new()),
        Algorithm::Scan => boxed!(ScanScheduler::new()),
        Algorithm::CScan => boxed!(CScanScheduler::new()),
        Algorithm::Look => boxed!(LookScheduler::new()),
        Algorithm::CLook => boxed!(CLookScheduler::new()),
        Algorithm::FScan => boxed!(FScanScheduler::new()),
        Algorithm::NStepScan => boxed!(NStepScanScheduler::new()),
    }
}
