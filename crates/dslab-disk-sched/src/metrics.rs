//! Service-quality metrics derived from a run trace.

use serde::Serialize;

use crate::trace::ResultTrace;

/// Sample of numeric observations with basic summary statistics.
#[derive(Clone, Debug, Default)]
pub struct SampleMetric {
    data: Vec<f64>,
}

impl SampleMetric {
    pub fn add(&mut self, x: f64) {
        self.data.push(x);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Returns 0 for an empty sample.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.;
        }
        self.sum() / (self.data.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Population variance. Returns 0 for an empty sample.
    pub fn biased_variance(&self) -> f64 {
        if self.data.is_empty() {
            return 0.;
        }
        let mean = self.mean();
        let sum_sq_diff: f64 = self.data.iter().map(|x| (x - mean) * (x - mean)).sum();
        sum_sq_diff / (self.data.len() as f64)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.biased_variance().sqrt()
    }
}

impl FromIterator<f64> for SampleMetric {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// Jain's fairness index `(sum x)^2 / (n * sum x^2)`.
///
/// Lies in `(0, 1]`, 1 meaning that all values are equal. Samples with at most one value, as well
/// as all-zero samples, are perfectly fair.
pub fn jain_fairness_index(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 1.;
    }
    let sum: f64 = values.iter().sum();
    let sum_sq: f64 = values.iter().map(|x| x * x).sum();
    if sum_sq == 0. {
        return 1.;
    }
    (sum * sum) / (values.len() as f64 * sum_sq)
}

///////////////////////////////////////////////////////////////////////////////

/// Seek, latency, throughput and fairness statistics of one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub requests_serviced: usize,
    pub total_movement: u64,

    pub avg_seek: f64,
    pub max_seek: u64,
    pub min_seek: u64,
    pub seek_std_dev: f64,

    /// Time from arrival to service.
    pub avg_latency: f64,
    pub max_latency: u64,
    pub min_latency: u64,
    pub latency_std_dev: f64,
    pub latency_variance: f64,

    /// Requests per time unit.
    pub throughput: f64,
    /// Jain's fairness index over latencies.
    pub fairness_index: f64,
    /// Time of the last service, or total movement for runs without timing.
    pub total_simulated_time: u64,
}

/// Computes metrics of given trace.
///
/// Pure function of the trace. Latency of a request is `service_time - arrival_time`; if arrival
/// times are missing, the service time itself is used. Runs without service times have no latency
/// samples: latency statistics are 0 and fairness is 1. Throughput falls back to requests per
/// cylinder of movement for such runs.
pub fn compute_metrics(trace: &ResultTrace) -> Metrics {
    let n = trace.request_count();

    let seeks: SampleMetric = trace.seek_distances().iter().map(|s| *s as f64).collect();

    let service_times = trace.service_times();
    let arrival_times = trace.arrival_times();
    let latencies: SampleMetric = if arrival_times.len() == service_times.len() {
        service_times
            .iter()
            .zip(arrival_times.iter())
            .map(|(service, arrival)| service.saturating_sub(*arrival) as f64)
            .collect()
    } else {
        service_times.iter().map(|t| *t as f64).collect()
    };

    let (total_simulated_time, throughput) = match service_times.iter().max() {
        Some(&max_time) => (max_time, if max_time > 0 { n as f64 / max_time as f64 } else { n as f64 }),
        None => {
            let movement = trace.total_movement();
            (movement, if movement > 0 { n as f64 / movement as f64 } else { n as f64 })
        }
    };

    Metrics {
        requests_serviced: n,
        total_movement: trace.total_movement(),
        avg_seek: seeks.mean(),
        max_seek: seeks.max().unwrap_or(0.) as u64,
        min_seek: seeks.min().unwrap_or(0.) as u64,
        seek_std_dev: seeks.std_dev(),
        avg_latency: latencies.mean(),
        max_latency: latencies.max().unwrap_or(0.) as u64,
        min_latency: latencies.min().unwrap_or(0.) as u64,
        latency_std_dev: latencies.std_dev(),
        latency_variance: latencies.biased_variance(),
        throughput,
        fairness_index: jain_fairness_index(latencies.values()),
        total_simulated_time,
    }
}
