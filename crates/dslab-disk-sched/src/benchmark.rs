//! Parallel benchmark over a grid of workload sizes and iterations.
//!
//! Every `(size, iteration)` cell gets its own seeded workload with Poisson arrivals and a random
//! initial head position, and all selected algorithms run time-based over it. Cells are executed
//! on a thread pool; results are collected over a channel by the calling thread, which is the
//! only writer of the results table.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;
use threadpool::ThreadPool;

use crate::config::{parse_algorithms, parse_token, RawBenchmarkConfig};
use crate::context::{RunContext, RunOptions, DEFAULT_STEP_SIZE};
use crate::error::{ConfigError, SchedulingError};
use crate::geometry::{Cylinder, DiskGeometry};
use crate::metrics::SampleMetric;
use crate::scheduler::Algorithm;
use crate::trace::ResultTrace;
use crate::workload::{Distribution, WorkloadGenerator};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub geometry: DiskGeometry,
    pub sizes: Vec<usize>,
    pub iterations: usize,
    pub seed: u64,
    pub distribution: Distribution,
    pub algorithms: Vec<Algorithm>,
    pub mean_inter_arrival: f64,
    pub step_size: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            geometry: DiskGeometry::default(),
            sizes: vec![100, 500, 1000],
            iterations: 5,
            seed: 123,
            distribution: Distribution::Uniform,
            algorithms: Algorithm::ALL.to_vec(),
            mean_inter_arrival: 10.,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

impl BenchmarkConfig {
    pub fn from_raw(raw: &RawBenchmarkConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            geometry: raw.disk.resolve()?,
            sizes: raw.sizes.clone(),
            iterations: raw.iterations,
            seed: raw.seed,
            distribution: parse_token(&raw.distribution, Distribution::Uniform)?,
            algorithms: parse_algorithms(&raw.algorithms)?,
            mean_inter_arrival: raw.mean_inter_arrival,
            step_size: raw.step_size.max(1),
        })
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawBenchmarkConfig = serde_yaml::from_str(s)?;
        Self::from_raw(&raw)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw: RawBenchmarkConfig = serde_yaml::from_reader(File::open(path)?)?;
        Self::from_raw(&raw)
    }

    /// Seed of the workload used in given grid cell.
    pub fn cell_seed(&self, size: usize, iteration: usize) -> u64 {
        self.seed
            .wrapping_add(iteration as u64 * 1000)
            .wrapping_add(size as u64)
    }

    fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::default();
        options.set_step_size(self.step_size).set_time_based(true);
        options
    }
}

/// Result of one algorithm on one grid cell.
#[derive(Clone, Debug)]
pub struct BenchmarkRun {
    pub iteration: usize,
    pub initial_position: Cylinder,
    pub trace: ResultTrace,
    /// Wall-clock time spent in the scheduler.
    pub execution_time: Duration,
}

/// Runs keyed by workload size and algorithm, ordered by iteration.
pub type BenchmarkResults = BTreeMap<usize, BTreeMap<Algorithm, Vec<BenchmarkRun>>>;

/// Runs all algorithms on a single grid cell.
pub fn run_cell(
    config: &BenchmarkConfig,
    size: usize,
    iteration: usize,
) -> Result<Vec<(Algorithm, BenchmarkRun)>, SchedulingError> {
    let mut generator = WorkloadGenerator::new(config.cell_seed(size, iteration), &config.geometry);
    let requests = generator.generate_with_poisson_arrivals(size, config.distribution, config.mean_inter_arrival);
    let initial_position = generator.gen_position();
    let ctx = RunContext::with_options(config.geometry, initial_position, requests, config.run_options())?;
    let mut runs = Vec::with_capacity(config.algorithms.len());
    for algorithm in config.algorithms.iter() {
        let scheduler = algorithm.scheduler();
        let start = Instant::now();
        let trace = scheduler.execute(&ctx);
        let execution_time = start.elapsed();
        runs.push((
            *algorithm,
            BenchmarkRun {
                iteration,
                initial_position,
                trace,
                execution_time,
            },
        ));
    }
    Ok(runs)
}

/// Runs the whole grid in a thread pool with `n_workers` worker threads (at least one).
pub fn run_benchmark(config: &BenchmarkConfig, n_workers: usize) -> Result<BenchmarkResults, SchedulingError> {
    let pool = ThreadPool::new(n_workers.max(1));
    let (tx, rx) = channel();
    let mut jobs = 0;
    for size in config.sizes.iter().copied() {
        for iteration in 0..config.iterations {
            let tx = tx.clone();
            let config = config.clone();
            pool.execute(move || {
                let result = run_cell(&config, size, iteration);
                // receiver outlives all jobs unless the caller has already failed
                let _ = tx.send((size, iteration, result));
            });
            jobs += 1;
        }
    }
    drop(tx);
    info!(
        "Benchmark: {} cells, {} algorithms, {} workers",
        jobs,
        config.algorithms.len(),
        pool.max_count()
    );

    let mut results = BenchmarkResults::new();
    for (size, iteration, cell) in rx.iter().take(jobs) {
        debug!("Finished cell size={} iteration={}", size, iteration);
        for (algorithm, run) in cell? {
            results
                .entry(size)
                .or_default()
                .entry(algorithm)
                .or_default()
                .push(run);
        }
    }
    for runs in results.values_mut().flat_map(|by_algorithm| by_algorithm.values_mut()) {
        runs.sort_by_key(|run| run.iteration);
    }
    Ok(results)
}

///////////////////////////////////////////////////////////////////////////////

/// Metrics of one algorithm on one workload size averaged over iterations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    pub size: usize,
    pub algorithm: String,
    pub runs: usize,
    pub avg_movement: f64,
    pub avg_seek: f64,
    pub avg_latency: f64,
    pub avg_fairness: f64,
    pub avg_throughput: f64,
    /// Mean wall-clock scheduler time in microseconds.
    pub avg_execution_time_us: f64,
}

impl BenchmarkSummary {
    pub fn new(size: usize, algorithm: Algorithm, runs: &[BenchmarkRun]) -> Self {
        let mut movement = SampleMetric::default();
        let mut seek = SampleMetric::default();
        let mut latency = SampleMetric::default();
        let mut fairness = SampleMetric::default();
        let mut throughput = SampleMetric::default();
        let mut execution_time = SampleMetric::default();
        for run in runs {
            let metrics = run.trace.metrics();
            movement.add(metrics.total_movement as f64);
            seek.add(metrics.avg_seek);
            latency.add(metrics.avg_latency);
            fairness.add(metrics.fairness_index);
            throughput.add(metrics.throughput);
            execution_time.add(run.execution_time.as_secs_f64() * 1e6);
        }
        let name = runs
            .first()
            .map(|run| run.trace.algorithm_name().to_string())
            .unwrap_or_else(|| algorithm.name().to_string());
        Self {
            size,
            algorithm: name,
            runs: runs.len(),
            avg_movement: movement.mean(),
            avg_seek: seek.mean(),
            avg_latency: latency.mean(),
            avg_fairness: fairness.mean(),
            avg_throughput: throughput.mean(),
            avg_execution_time_us: execution_time.mean(),
        }
    }
}

/// One summary row per `(size, algorithm)`, ordered by size and then by algorithm.
pub fn summarize(results: &BenchmarkResults) -> Vec<BenchmarkSummary> {
    results
        .iter()
        .flat_map(|(size, by_algorithm)| {
            by_algorithm
                .iter()
                .map(move |(algorithm, runs)| BenchmarkSummary::new(*size, *algorithm, runs))
        })
        .collect()
}
