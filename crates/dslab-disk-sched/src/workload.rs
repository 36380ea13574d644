//! Reproducible synthetic request streams.

use std::fmt::Display;
use std::str::FromStr;

use rand::prelude::*;
use rand_distr::{Exp1, StandardNormal};
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::error::ConfigError;
use crate::geometry::{Cylinder, DiskGeometry};
use crate::request::{Request, RequestTrace, Time};

/// Share of hotspot requests that target one of the hotspots.
pub const HOTSPOT_PROBABILITY: f64 = 0.7;
/// Hotspot centres as fractions of the cylinder range.
pub const HOTSPOT_CENTRES: [f64; 3] = [0.1, 0.5, 0.8];

/// Spatial distribution of requested cylinders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Distribution {
    /// Uniform over the whole cylinder range.
    #[default]
    Uniform,
    /// Normal around the middle of the range with standard deviation of a quarter of the range.
    Normal,
    /// Most requests are concentrated around a few hot cylinders, the rest are uniform.
    Hotspot,
}

impl FromStr for Distribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "random" => Ok(Distribution::Uniform),
            "normal" | "gaussian" => Ok(Distribution::Normal),
            "hotspot" | "hot_spot" | "hot-spot" => Ok(Distribution::Hotspot),
            _ => Err(ConfigError::UnknownToken {
                kind: "distribution",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distribution::Uniform => write!(f, "Uniform"),
            Distribution::Normal => write!(f, "Normal"),
            Distribution::Hotspot => write!(f, "Hotspot"),
        }
    }
}

/// Seeded generator of request traces within given disk bounds.
///
/// Two generators created with the same seed and geometry produce identical traces for identical
/// calls.
pub struct WorkloadGenerator {
    seed: u64,
    rand: Pcg64,
    lower: Cylinder,
    upper: Cylinder,
}

impl WorkloadGenerator {
    pub fn new(seed: u64, geometry: &DiskGeometry) -> Self {
        Self {
            seed,
            rand: Pcg64::seed_from_u64(seed),
            lower: geometry.lower(),
            upper: geometry.upper(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the random stream from the initial seed.
    pub fn reset(&mut self) {
        self.rand = Pcg64::seed_from_u64(self.seed);
    }

    /// Restarts the random stream from a new seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Generates `count` requests with arrival times uniform in `[0, max_arrival_time)`, sorted by
    /// arrival time. All arrivals are 0 if `max_arrival_time` is 0.
    pub fn generate(&mut self, count: usize, distribution: Distribution, max_arrival_time: Time) -> RequestTrace {
        let mut requests = Vec::with_capacity(count);
        for _ in 0..count {
            let cylinder = self.gen_cylinder(distribution);
            let arrival_time = if max_arrival_time > 0 {
                self.rand.gen_range(0..max_arrival_time)
            } else {
                0
            };
            requests.push(Request::new(cylinder, arrival_time));
        }
        RequestTrace::sorted_by_arrival(requests)
    }

    /// Generates `count` requests forming a Poisson arrival process: inter-arrival times are
    /// exponential with given mean and rounded down to whole time units. A non-positive mean puts
    /// all arrivals at 0.
    pub fn generate_with_poisson_arrivals(
        &mut self,
        count: usize,
        distribution: Distribution,
        mean_inter_arrival: f64,
    ) -> RequestTrace {
        let mut requests = Vec::with_capacity(count);
        let mut time = 0.;
        for _ in 0..count {
            let cylinder = self.gen_cylinder(distribution);
            if mean_inter_arrival > 0. {
                let sample: f64 = self.rand.sample(Exp1);
                time += sample * mean_inter_arrival;
            }
            requests.push(Request::new(cylinder, time as Time));
        }
        RequestTrace::sorted_by_arrival(requests)
    }

    /// Random cylinder within bounds, e.g. for an initial head position.
    pub fn gen_position(&mut self) -> Cylinder {
        self.gen_uniform()
    }

    fn gen_cylinder(&mut self, distribution: Distribution) -> Cylinder {
        match distribution {
            Distribution::Uniform => self.gen_uniform(),
            Distribution::Normal => {
                let span = (self.upper - self.lower) as f64;
                let mean = self.lower as f64 + span / 2.;
                self.gen_normal(mean, span / 4.)
            }
            Distribution::Hotspot => {
                if self.rand.gen_bool(HOTSPOT_PROBABILITY) {
                    let span = (self.upper - self.lower) as f64;
                    let centre = HOTSPOT_CENTRES[self.rand.gen_range(0..HOTSPOT_CENTRES.len())];
                    self.gen_normal(self.lower as f64 + span * centre, span / 50.)
                } else {
                    self.gen_uniform()
                }
            }
        }
    }

    fn gen_uniform(&mut self) -> Cylinder {
        self.rand.gen_range(self.lower..=self.upper)
    }

    fn gen_normal(&mut self, mean: f64, std_dev: f64) -> Cylinder {
        let z: f64 = self.rand.sample(StandardNormal);
        let value = (mean + z * std_dev).round() as Cylinder;
        value.clamp(self.lower, self.upper)
    }
}
