//! YAML configuration of simulation runs and benchmarks.
//!
//! Files are first deserialized into raw structures with string tokens and optional fields, then
//! resolved into typed values. Empty tokens select defaults, unknown tokens are errors.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::{OutOfRangePolicy, RunContext, RunOptions, DEFAULT_STEP_SIZE};
use crate::error::{ConfigError, SchedulingError};
use crate::geometry::{Cylinder, Direction, DiskGeometry, WrapPolicy, DEFAULT_LOWER_CYLINDER, DEFAULT_UPPER_CYLINDER};
use crate::request::{Request, RequestTrace, Time};
use crate::scheduler::Algorithm;
use crate::trace::ResultTrace;
use crate::workload::{Distribution, WorkloadGenerator};

fn default_lower() -> Cylinder {
    DEFAULT_LOWER_CYLINDER
}

fn default_upper() -> Cylinder {
    DEFAULT_UPPER_CYLINDER
}

fn default_step_size() -> usize {
    DEFAULT_STEP_SIZE
}

fn default_seed() -> u64 {
    123
}

/// Parses a token, empty tokens resolve to `default`.
pub fn parse_token<T>(token: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = ConfigError>,
{
    if token.trim().is_empty() {
        Ok(default)
    } else {
        token.parse()
    }
}

/// Parses a list of algorithm names, an empty list selects all algorithms.
pub fn parse_algorithms(names: &[String]) -> Result<Vec<Algorithm>, ConfigError> {
    if names.is_empty() {
        return Ok(Algorithm::ALL.to_vec());
    }
    names.iter().map(|name| name.parse::<Algorithm>()).collect()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawDiskConfig {
    #[serde(default = "default_lower")]
    pub lower: Cylinder,
    #[serde(default = "default_upper")]
    pub upper: Cylinder,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub wrap_policy: String,
}

impl Default for RawDiskConfig {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_CYLINDER,
            upper: DEFAULT_UPPER_CYLINDER,
            direction: String::new(),
            wrap_policy: String::new(),
        }
    }
}

impl RawDiskConfig {
    pub fn resolve(&self) -> Result<DiskGeometry, ConfigError> {
        let direction = parse_token(&self.direction, Direction::Increasing)?;
        let wrap_policy = parse_token(&self.wrap_policy, WrapPolicy::ToBoundary)?;
        Ok(DiskGeometry::new(self.lower, self.upper, direction, wrap_policy)?)
    }
}

/// Request given either as a bare cylinder (arrives at 0) or with its arrival time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRequest {
    Cylinder(Cylinder),
    Timed { cylinder: Cylinder, arrival_time: Time },
}

impl From<&RawRequest> for Request {
    fn from(raw: &RawRequest) -> Self {
        match raw {
            RawRequest::Cylinder(cylinder) => Request::at_start(*cylinder),
            RawRequest::Timed { cylinder, arrival_time } => Request::new(*cylinder, *arrival_time),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawGeneratorConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub distribution: String,
    pub count: usize,
    /// Arrival times are uniform in `[0, max_arrival_time)`.
    #[serde(default)]
    pub max_arrival_time: Time,
    /// If set, arrivals form a Poisson process with this mean gap instead.
    #[serde(default)]
    pub mean_inter_arrival: Option<f64>,
}

/// Either an explicit request list or generator parameters. The generator wins if both are given.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawWorkloadConfig {
    #[serde(default)]
    pub requests: Vec<RawRequest>,
    #[serde(default)]
    pub generator: Option<RawGeneratorConfig>,
}

impl RawWorkloadConfig {
    pub fn resolve(&self, geometry: &DiskGeometry) -> Result<RequestTrace, ConfigError> {
        match &self.generator {
            Some(params) => {
                let distribution = parse_token(&params.distribution, Distribution::Uniform)?;
                let mut generator = WorkloadGenerator::new(params.seed, geometry);
                Ok(match params.mean_inter_arrival {
                    Some(mean) => generator.generate_with_poisson_arrivals(params.count, distribution, mean),
                    None => generator.generate(params.count, distribution, params.max_arrival_time),
                })
            }
            None => Ok(self.requests.iter().map(Request::from).collect()),
        }
    }
}

/// YAML-serializable simulation config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawSimulationConfig {
    #[serde(default)]
    pub disk: RawDiskConfig,
    pub initial_position: Cylinder,
    #[serde(default = "default_step_size")]
    pub step_size: usize,
    #[serde(default)]
    pub time_based: bool,
    #[serde(default)]
    pub out_of_range: String,
    #[serde(default)]
    pub algorithms: Vec<String>,
    #[serde(default)]
    pub workload: RawWorkloadConfig,
}

/// Fully resolved simulation config: one geometry and workload, compared across algorithms.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub geometry: DiskGeometry,
    pub initial_position: Cylinder,
    pub options: RunOptions,
    pub algorithms: Vec<Algorithm>,
    pub requests: RequestTrace,
}

impl SimulationConfig {
    pub fn from_raw(raw: &RawSimulationConfig) -> Result<Self, ConfigError> {
        let geometry = raw.disk.resolve()?;
        geometry.validate_initial_position(raw.initial_position)?;
        let mut options = RunOptions::default();
        options
            .set_step_size(raw.step_size)
            .set_time_based(raw.time_based)
            .set_out_of_range_policy(parse_token(&raw.out_of_range, OutOfRangePolicy::Reject)?);
        Ok(Self {
            geometry,
            initial_position: raw.initial_position,
            options,
            algorithms: parse_algorithms(&raw.algorithms)?,
            requests: raw.workload.resolve(&geometry)?,
        })
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawSimulationConfig = serde_yaml::from_str(s)?;
        Self::from_raw(&raw)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw: RawSimulationConfig = serde_yaml::from_reader(File::open(path)?)?;
        Self::from_raw(&raw)
    }

    /// Validates the workload against the geometry and builds the shared run context.
    pub fn context(&self) -> Result<RunContext, SchedulingError> {
        RunContext::with_options(
            self.geometry,
            self.initial_position,
            self.requests.clone(),
            self.options.clone(),
        )
    }

    /// Runs every configured algorithm over the same context, in configuration order.
    pub fn run(&self) -> Result<Vec<ResultTrace>, SchedulingError> {
        let ctx = self.context()?;
        Ok(self
            .algorithms
            .iter()
            .map(|algorithm| algorithm.scheduler().execute(&ctx))
            .collect())
    }
}

///////////////////////////////////////////////////////////////////////////////

fn default_sizes() -> Vec<usize> {
    vec![100, 500, 1000]
}

fn default_iterations() -> usize {
    5
}

fn default_mean_inter_arrival() -> f64 {
    10.
}

/// YAML-serializable benchmark config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawBenchmarkConfig {
    #[serde(default)]
    pub disk: RawDiskConfig,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub distribution: String,
    #[serde(default)]
    pub algorithms: Vec<String>,
    #[serde(default = "default_mean_inter_arrival")]
    pub mean_inter_arrival: f64,
    #[serde(default = "default_step_size")]
    pub step_size: usize,
}

impl Default for RawBenchmarkConfig {
    fn default() -> Self {
        Self {
            disk: RawDiskConfig::default(),
            sizes: default_sizes(),
            iterations: default_iterations(),
            seed: default_seed(),
            distribution: String::new(),
            algorithms: Vec::new(),
            mean_inter_arrival: default_mean_inter_arrival(),
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}
