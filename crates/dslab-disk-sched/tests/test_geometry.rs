mod common;
use common::textbook_context;

use dslab_disk_sched::context::{OutOfRangePolicy, RunContext, RunOptions};
use dslab_disk_sched::error::SchedulingError;
use dslab_disk_sched::geometry::{Direction, DiskGeometry, WrapPolicy, MAX_CYLINDER};
use dslab_disk_sched::request::{Request, RequestTrace};
use dslab_disk_sched::scheduler::{run, Algorithm};

#[test]
fn test_default_geometry() {
    let geometry = DiskGeometry::default();
    assert_eq!(geometry.lower(), 0);
    assert_eq!(geometry.upper(), 4999);
    assert_eq!(geometry.initial_direction(), Direction::Increasing);
    assert_eq!(geometry.wrap_policy(), WrapPolicy::ToBoundary);
    assert_eq!(geometry.cylinder_count(), 5000);
    assert_eq!(geometry.span(), 4999);
}

#[test]
fn test_invalid_geometry() {
    assert_eq!(
        DiskGeometry::with_bounds(10, 10),
        Err(SchedulingError::InvalidGeometry {
            lower: 10,
            upper: 10,
            position: None
        })
    );
    assert_eq!(
        DiskGeometry::with_bounds(10, 5),
        Err(SchedulingError::InvalidGeometry {
            lower: 10,
            upper: 5,
            position: None
        })
    );
    assert_eq!(
        DiskGeometry::with_bounds(-1, 5),
        Err(SchedulingError::InvalidGeometry {
            lower: -1,
            upper: 5,
            position: None
        })
    );
    assert_eq!(
        DiskGeometry::with_bounds(0, i64::MAX),
        Err(SchedulingError::InvalidGeometry {
            lower: 0,
            upper: i64::MAX,
            position: None
        })
    );
    assert!(DiskGeometry::with_bounds(0, 1).is_ok());
    assert!(DiskGeometry::with_bounds(0, MAX_CYLINDER).is_ok());
}

#[test]
fn test_widest_disk_movement() {
    let geometry = DiskGeometry::with_bounds(0, MAX_CYLINDER).unwrap();
    let requests = RequestTrace::from_cylinders(&[MAX_CYLINDER, 0, MAX_CYLINDER]);
    let span = MAX_CYLINDER as u64;
    for algorithm in Algorithm::ALL {
        let trace = run(algorithm.scheduler().as_ref(), geometry, 0, requests.clone()).unwrap();
        assert_eq!(trace.request_count(), 3);
        assert_eq!(trace.total_movement(), trace.seek_distances().iter().sum::<u64>());
        assert!(trace.total_movement() >= span);
    }
    let trace = run(Algorithm::Fcfs.scheduler().as_ref(), geometry, 0, requests).unwrap();
    assert_eq!(trace.seek_distances(), &[span, span, span]);
    assert_eq!(trace.total_movement(), 3 * span);
}

#[test]
fn test_failed_setter_keeps_geometry() {
    let mut geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    assert!(geometry.set_upper(0).is_err());
    assert!(geometry.set_lower(300).is_err());
    assert_eq!((geometry.lower(), geometry.upper()), (0, 199));

    geometry
        .set_bounds(100, 300)
        .unwrap()
        .set_initial_direction(Direction::Decreasing)
        .set_wrap_policy(WrapPolicy::ToFirstPending);
    assert_eq!((geometry.lower(), geometry.upper()), (100, 300));
    assert_eq!(geometry.boundary(Direction::Increasing), 300);
    assert_eq!(geometry.boundary(Direction::Decreasing), 100);
    assert_eq!(geometry.initial_direction(), Direction::Decreasing);
    assert_eq!(geometry.wrap_policy(), WrapPolicy::ToFirstPending);
}

#[test]
fn test_token_aliases() {
    for token in ["Increasing", "right", "R", "up", "inc"] {
        assert_eq!(token.parse::<Direction>().unwrap(), Direction::Increasing);
    }
    for token in ["decreasing", "LEFT", "l", "down", "dec"] {
        assert_eq!(token.parse::<Direction>().unwrap(), Direction::Decreasing);
    }
    for token in ["ToBoundary", "to_boundary", "boundary", "start", "WRAP_TO_START"] {
        assert_eq!(token.parse::<WrapPolicy>().unwrap(), WrapPolicy::ToBoundary);
    }
    for token in ["ToFirstPending", "first", "first-req", "first_request", "wrap_to_first_req"] {
        assert_eq!(token.parse::<WrapPolicy>().unwrap(), WrapPolicy::ToFirstPending);
    }
    assert!("sideways".parse::<Direction>().is_err());
    assert!("".parse::<WrapPolicy>().is_err());
    assert_eq!("clamp".parse::<OutOfRangePolicy>().unwrap(), OutOfRangePolicy::Clamp);
}

#[test]
fn test_initial_position_out_of_bounds() {
    let geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    let result = RunContext::new(geometry, 200, RequestTrace::from_cylinders(&[10]));
    assert_eq!(
        result.err(),
        Some(SchedulingError::InvalidGeometry {
            lower: 0,
            upper: 199,
            position: Some(200)
        })
    );
}

#[test]
fn test_out_of_range_request_rejected() {
    let geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    let result = run(
        Algorithm::Fcfs.scheduler().as_ref(),
        geometry,
        50,
        RequestTrace::from_cylinders(&[10, 250, 30]),
    );
    assert_eq!(
        result,
        Err(SchedulingError::OutOfRangeRequest {
            cylinder: 250,
            lower: 0,
            upper: 199
        })
    );
}

#[test]
fn test_out_of_range_request_clamped() {
    let geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    let mut options = RunOptions::default();
    options.set_out_of_range_policy(OutOfRangePolicy::Clamp);
    let requests = RequestTrace::new(vec![Request::new(-5, 1), Request::new(250, 2), Request::new(30, 3)]);
    let ctx = RunContext::with_options(geometry, 50, requests, options).unwrap();
    assert_eq!(ctx.requests().cylinders(), vec![0, 199, 30]);
    assert_eq!(ctx.requests().requests()[1].arrival_time, 2);

    let trace = Algorithm::Fcfs.scheduler().execute(&ctx);
    assert_eq!(trace.service_order(), &[0, 199, 30]);
    assert_eq!(trace.total_movement(), 50 + 199 + 169);
}

#[test]
fn test_step_size_clamped() {
    let mut options = RunOptions::default();
    assert_eq!(options.step_size(), 4);
    options.set_step_size(0);
    assert_eq!(options.step_size(), 1);
}

#[test]
fn test_empty_workload() {
    let geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    for algorithm in Algorithm::ALL {
        let trace = run(algorithm.scheduler().as_ref(), geometry, 50, RequestTrace::default()).unwrap();
        assert_eq!(trace.total_movement(), 0);
        assert!(trace.service_order().is_empty());
        assert!(trace.seek_distances().is_empty());
        assert_eq!(trace.head_path(), &[50]);
        assert_eq!(trace.metrics().requests_serviced, 0);
    }
}

#[test]
fn test_context_is_reusable() {
    let ctx = textbook_context(Direction::Increasing, WrapPolicy::ToBoundary);
    let first = Algorithm::Sstf.scheduler().execute(&ctx);
    let second = Algorithm::Sstf.scheduler().execute(&ctx);
    assert_eq!(first, second);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SchedulingError::InvalidGeometry {
            lower: -3,
            upper: 5,
            position: None
        }
        .to_string(),
        "invalid geometry: lower cylinder cannot be negative (-3)"
    );
    assert_eq!(
        SchedulingError::InvalidGeometry {
            lower: 0,
            upper: 99,
            position: Some(150)
        }
        .to_string(),
        "invalid geometry: initial position 150 is out of disk bounds [0, 99]"
    );
    assert_eq!(
        SchedulingError::OutOfRangeRequest {
            cylinder: 250,
            lower: 0,
            upper: 199
        }
        .to_string(),
        "request for cylinder 250 is out of disk bounds [0, 199]"
    );
}
