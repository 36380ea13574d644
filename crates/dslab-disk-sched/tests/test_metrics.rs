mod common;
use common::{assert_float_eq, textbook_context};

use dslab_disk_sched::geometry::{Direction, WrapPolicy};
use dslab_disk_sched::error::SchedulingError;
use dslab_disk_sched::metrics::{compute_metrics, jain_fairness_index, SampleMetric};
use dslab_disk_sched::scheduler::Algorithm;
use dslab_disk_sched::trace::ResultTrace;

fn timed_trace(service_times: Vec<u64>, arrival_times: Vec<u64>) -> ResultTrace {
    let n = service_times.len();
    ResultTrace::new(
        "test",
        0,
        (1..=n as i64).collect(),
        vec![1; n],
        service_times,
        arrival_times,
    )
    .unwrap()
}

#[test]
fn test_sample_metric() {
    let mut m: SampleMetric = Default::default();
    assert_float_eq(m.mean(), 0., 1e-12);
    assert_eq!(m.min(), None);
    for i in 1..=4 {
        m.add(i as f64);
    }
    assert_eq!(m.len(), 4);
    assert_float_eq(m.sum(), 10., 1e-12);
    assert_float_eq(m.mean(), 2.5, 1e-12);
    assert_float_eq(m.min().unwrap(), 1., 1e-12);
    assert_float_eq(m.max().unwrap(), 4., 1e-12);
    assert_float_eq(m.biased_variance(), 1.25, 1e-12);
    assert_float_eq(m.std_dev(), 1.25f64.sqrt(), 1e-12);
}

#[test]
fn test_fairness_index() {
    assert_float_eq(jain_fairness_index(&[1., 1., 1., 1.]), 1., 1e-12);
    assert_float_eq(jain_fairness_index(&[1., 2., 3., 4.]), 100. / 120., 1e-12);
    assert!(jain_fairness_index(&[1., 2., 3., 4.]) < 1.);
    assert_float_eq(jain_fairness_index(&[]), 1., 1e-12);
    assert_float_eq(jain_fairness_index(&[7.]), 1., 1e-12);
    assert_float_eq(jain_fairness_index(&[0., 0., 0.]), 1., 1e-12);
    assert_float_eq(jain_fairness_index(&[0., 0., 0., 1.]), 0.25, 1e-12);
}

#[test]
fn test_latency_fairness() {
    let equal = timed_trace(vec![11, 12, 13, 14], vec![10, 11, 12, 13]);
    assert_float_eq(equal.metrics().fairness_index, 1., 1e-12);
    assert_float_eq(equal.metrics().avg_latency, 1., 1e-12);

    let unequal = timed_trace(vec![1, 2, 3, 4], vec![0, 0, 0, 0]);
    let metrics = unequal.metrics();
    assert!(metrics.fairness_index < 1.);
    assert_float_eq(metrics.fairness_index, 100. / 120., 1e-12);
    assert_float_eq(metrics.avg_latency, 2.5, 1e-12);
    assert_eq!(metrics.max_latency, 4);
    assert_eq!(metrics.min_latency, 1);
    assert_float_eq(metrics.latency_variance, 1.25, 1e-12);
    assert_eq!(metrics.total_simulated_time, 4);
    assert_float_eq(metrics.throughput, 1., 1e-12);
}

#[test]
fn test_missing_arrival_times() {
    let trace = timed_trace(vec![10, 20], Vec::new());
    let metrics = trace.metrics();
    assert_float_eq(metrics.avg_latency, 15., 1e-12);
    assert_eq!(metrics.max_latency, 20);
}

#[test]
fn test_empty_trace() {
    let trace = ResultTrace::empty("test", 10);
    let metrics = trace.metrics();
    assert_eq!(metrics.requests_serviced, 0);
    assert_eq!(metrics.total_movement, 0);
    assert_float_eq(metrics.avg_seek, 0., 1e-12);
    assert_eq!(metrics.max_seek, 0);
    assert_float_eq(metrics.avg_latency, 0., 1e-12);
    assert_float_eq(metrics.seek_std_dev, 0., 1e-12);
    assert_float_eq(metrics.fairness_index, 1., 1e-12);
    assert_float_eq(metrics.throughput, 0., 1e-12);
}

#[test]
fn test_single_request() {
    let trace = ResultTrace::new("test", 0, vec![42], vec![42], vec![42], vec![0]).unwrap();
    let metrics = trace.metrics();
    assert_float_eq(metrics.seek_std_dev, 0., 1e-12);
    assert_float_eq(metrics.latency_std_dev, 0., 1e-12);
    assert_float_eq(metrics.fairness_index, 1., 1e-12);
}

#[test]
fn test_positional_run_metrics() {
    let ctx = textbook_context(Direction::Decreasing, WrapPolicy::ToBoundary);
    let trace = Algorithm::Scan.scheduler().execute(&ctx);
    let metrics = trace.metrics();
    assert_eq!(metrics.requests_serviced, 8);
    assert_eq!(metrics.total_movement, 226);
    assert_float_eq(metrics.avg_seek, 28.25, 1e-12);
    assert_eq!(metrics.max_seek, 71);
    assert_eq!(metrics.min_seek, 7);
    // no timing: no latency samples
    assert_float_eq(metrics.avg_latency, 0., 1e-12);
    assert_float_eq(metrics.fairness_index, 1., 1e-12);
    assert_eq!(metrics.total_simulated_time, 226);
    assert_float_eq(metrics.throughput, 8. / 226., 1e-12);
}

#[test]
fn test_metrics_are_idempotent() {
    let ctx = textbook_context(Direction::Increasing, WrapPolicy::ToBoundary);
    for algorithm in Algorithm::ALL {
        let trace = algorithm.scheduler().execute(&ctx);
        let first = compute_metrics(&trace);
        let second = compute_metrics(&trace);
        assert_eq!(first, second);
        assert_eq!(trace.metrics(), &first);
        assert_eq!(trace.metrics(), trace.clone().metrics());
    }
}

#[test]
fn test_inconsistent_trace_records() {
    let result = ResultTrace::new("test", 0, vec![10, 20], vec![10], vec![], vec![]);
    assert!(matches!(result, Err(SchedulingError::InvalidTrace { .. })));

    let result = ResultTrace::new("test", 0, vec![10], vec![10], vec![10], vec![]);
    assert!(matches!(result, Err(SchedulingError::InvalidTrace { .. })));

    let result = ResultTrace::new("test", 0, vec![10, 20], vec![10, 10], vec![10], vec![0]);
    assert!(matches!(result, Err(SchedulingError::InvalidTrace { .. })));

    let trace = ResultTrace::new("test", 0, vec![10, 20], vec![10, 10], vec![], vec![]).unwrap();
    assert_eq!(trace.total_movement(), 20);
    assert!(!trace.is_time_based());
}
