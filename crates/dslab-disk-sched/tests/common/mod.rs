#![allow(dead_code)]

use dslab_disk_sched::context::{RunContext, RunOptions};
use dslab_disk_sched::geometry::{Cylinder, Direction, DiskGeometry, WrapPolicy};
use dslab_disk_sched::request::RequestTrace;

pub const TEXTBOOK_REQUESTS: [Cylinder; 8] = [176, 79, 34, 60, 92, 11, 41, 114];

pub fn assert_float_eq(x: f64, y: f64, eps: f64) {
    assert!(x > y - eps && x < y + eps, "{} != {}", x, y);
}

pub fn small_disk(direction: Direction, wrap_policy: WrapPolicy) -> DiskGeometry {
    DiskGeometry::new(0, 199, direction, wrap_policy).unwrap()
}

/// Classic textbook scenario: disk `[0, 199]`, head at 50, all requests arrive at 0.
pub fn textbook_context(direction: Direction, wrap_policy: WrapPolicy) -> RunContext {
    RunContext::new(
        small_disk(direction, wrap_policy),
        50,
        RequestTrace::from_cylinders(&TEXTBOOK_REQUESTS),
    )
    .unwrap()
}

pub fn context_with_options(
    geometry: DiskGeometry,
    initial_position: Cylinder,
    requests: RequestTrace,
    time_based: bool,
    step_size: usize,
) -> RunContext {
    let mut options = RunOptions::default();
    options.set_time_based(time_based).set_step_size(step_size);
    RunContext::with_options(geometry, initial_position, requests, options).unwrap()
}

pub fn sorted(values: &[Cylinder]) -> Vec<Cylinder> {
    let mut values = values.to_vec();
    values.sort();
    values
}
