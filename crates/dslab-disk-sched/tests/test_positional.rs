mod common;
use common::{context_with_options, sorted, textbook_context, TEXTBOOK_REQUESTS};

use rand::prelude::*;
use rand_pcg::Pcg64;

use dslab_disk_sched::context::RunContext;
use dslab_disk_sched::geometry::{Cylinder, Direction, DiskGeometry, WrapPolicy};
use dslab_disk_sched::request::RequestTrace;
use dslab_disk_sched::scheduler::Algorithm;
use dslab_disk_sched::trace::ResultTrace;

fn execute(algorithm: Algorithm, ctx: &RunContext) -> ResultTrace {
    algorithm.scheduler().execute(ctx)
}

#[test]
fn test_fcfs_textbook() {
    let trace = execute(Algorithm::Fcfs, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.algorithm_name(), "FCFS");
    assert_eq!(trace.service_order(), &TEXTBOOK_REQUESTS);
    assert_eq!(trace.seek_distances(), &[126, 97, 45, 26, 32, 81, 30, 73]);
    assert_eq!(trace.total_movement(), 510);
}

#[test]
fn test_sstf_textbook() {
    let trace = execute(Algorithm::Sstf, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[41, 34, 11, 60, 79, 92, 114, 176]);
    assert_eq!(trace.total_movement(), 204);
}

#[test]
fn test_sstf_tie_goes_to_lower_cylinder() {
    let geometry = DiskGeometry::with_bounds(0, 100).unwrap();
    let ctx = RunContext::new(geometry, 50, RequestTrace::from_cylinders(&[60, 40])).unwrap();
    let trace = execute(Algorithm::Sstf, &ctx);
    assert_eq!(trace.service_order(), &[40, 60]);
}

#[test]
fn test_scan_textbook() {
    // sweep down to 0, then up to 176
    let trace = execute(Algorithm::Scan, &textbook_context(Direction::Decreasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[41, 34, 11, 60, 79, 92, 114, 176]);
    assert_eq!(trace.seek_distances(), &[9, 7, 23, 71, 19, 13, 22, 62]);
    assert_eq!(trace.total_movement(), 226);

    // sweep up to 199, then down to 11; the textbook's 226 is the downward run above
    let trace = execute(Algorithm::Scan, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[60, 79, 92, 114, 176, 41, 34, 11]);
    assert_eq!(trace.seek_distances(), &[10, 19, 13, 22, 62, 181, 7, 23]);
    assert_eq!(trace.total_movement(), 337);
    assert_eq!(trace.head_path(), &[50, 60, 79, 92, 114, 176, 41, 34, 11]);
}

#[test]
fn test_look_textbook() {
    let trace = execute(Algorithm::Look, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[60, 79, 92, 114, 176, 41, 34, 11]);
    assert_eq!(trace.total_movement(), 291);

    let trace = execute(Algorithm::Look, &textbook_context(Direction::Decreasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.total_movement(), 204);
}

#[test]
fn test_cscan_textbook() {
    let trace = execute(Algorithm::CScan, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[60, 79, 92, 114, 176, 11, 34, 41]);
    assert_eq!(trace.seek_distances(), &[10, 19, 13, 22, 62, 233, 23, 7]);
    assert_eq!(trace.total_movement(), 389);

    let trace = execute(Algorithm::CScan, &textbook_context(Direction::Decreasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.service_order(), &[41, 34, 11, 176, 114, 92, 79, 60]);
    assert_eq!(trace.total_movement(), 388);

    // wrap policy of the geometry does not affect C-SCAN
    let trace = execute(
        Algorithm::CScan,
        &textbook_context(Direction::Increasing, WrapPolicy::ToFirstPending),
    );
    assert_eq!(trace.total_movement(), 389);
}

#[test]
fn test_clook_textbook() {
    let trace = execute(
        Algorithm::CLook,
        &textbook_context(Direction::Increasing, WrapPolicy::ToFirstPending),
    );
    assert_eq!(trace.service_order(), &[60, 79, 92, 114, 176, 11, 34, 41]);
    assert_eq!(trace.seek_distances(), &[10, 19, 13, 22, 62, 165, 23, 7]);
    assert_eq!(trace.total_movement(), 321);

    let trace = execute(Algorithm::CLook, &textbook_context(Direction::Increasing, WrapPolicy::ToBoundary));
    assert_eq!(trace.total_movement(), 389);
}

#[test]
fn test_requests_at_head_serviced_first() {
    let geometry = DiskGeometry::new(0, 99, Direction::Decreasing, WrapPolicy::ToBoundary).unwrap();
    let ctx = RunContext::new(geometry, 30, RequestTrace::from_cylinders(&[60, 30, 10, 30])).unwrap();
    for algorithm in [Algorithm::Scan, Algorithm::Look, Algorithm::CScan, Algorithm::CLook] {
        let trace = execute(algorithm, &ctx);
        assert_eq!(&trace.service_order()[..2], &[30, 30]);
        assert_eq!(&trace.seek_distances()[..2], &[0, 0]);
    }
}

#[test]
fn test_positional_timing() {
    let geometry = DiskGeometry::with_bounds(0, 199).unwrap();
    let requests = RequestTrace::from_cylinders_with_interval(&[60, 40], 1000);
    let ctx = context_with_options(geometry, 50, requests, true, 4);
    let trace = execute(Algorithm::Fcfs, &ctx);
    // positional algorithms ignore arrivals, the clock only counts head travel
    assert_eq!(trace.service_times(), &[10, 30]);
    assert_eq!(trace.arrival_times(), &[0, 0]);
}

fn random_context(rng: &mut Pcg64) -> RunContext {
    let upper = rng.gen_range(1..500);
    let direction = if rng.gen_bool(0.5) {
        Direction::Increasing
    } else {
        Direction::Decreasing
    };
    let wrap_policy = if rng.gen_bool(0.5) {
        WrapPolicy::ToBoundary
    } else {
        WrapPolicy::ToFirstPending
    };
    let geometry = DiskGeometry::new(0, upper, direction, wrap_policy).unwrap();
    let count = rng.gen_range(0..30);
    let cylinders: Vec<Cylinder> = (0..count).map(|_| rng.gen_range(0..=upper)).collect();
    let position = rng.gen_range(0..=upper);
    RunContext::new(geometry, position, RequestTrace::from_cylinders(&cylinders)).unwrap()
}

#[test]
fn test_trace_invariants() {
    let mut rng = Pcg64::seed_from_u64(123);
    for _ in 0..200 {
        let ctx = random_context(&mut rng);
        let cylinders = ctx.requests().cylinders();
        for algorithm in Algorithm::ALL {
            let trace = execute(algorithm, &ctx);
            assert_eq!(trace.total_movement(), trace.seek_distances().iter().sum::<u64>());
            assert_eq!(trace.service_order().len(), cylinders.len());
            assert_eq!(sorted(trace.service_order()), sorted(&cylinders));
            assert_eq!(trace.head_path().len(), cylinders.len() + 1);
            assert_eq!(trace.head_path()[0], ctx.initial_position());
            assert!(trace
                .seek_distances()
                .iter()
                .zip(trace.head_path().windows(2))
                .all(|(seek, step)| *seek >= step[0].abs_diff(step[1])));
        }
    }
}

#[test]
fn test_fcfs_preserves_order() {
    let mut rng = Pcg64::seed_from_u64(124);
    for _ in 0..50 {
        let ctx = random_context(&mut rng);
        let trace = execute(Algorithm::Fcfs, &ctx);
        assert_eq!(trace.service_order(), ctx.requests().cylinders().as_slice());
    }
}

#[test]
fn test_sstf_picks_closest() {
    let mut rng = Pcg64::seed_from_u64(125);
    for _ in 0..100 {
        let ctx = random_context(&mut rng);
        let trace = execute(Algorithm::Sstf, &ctx);
        let mut pending = ctx.requests().cylinders();
        let mut position = ctx.initial_position();
        for serviced in trace.service_order() {
            let best = pending.iter().map(|c| c.abs_diff(position)).min().unwrap();
            assert_eq!(serviced.abs_diff(position), best);
            let idx = pending.iter().position(|c| c == serviced).unwrap();
            pending.remove(idx);
            position = *serviced;
        }
        assert!(pending.is_empty());
    }
}

#[test]
fn test_look_never_worse_than_scan() {
    let mut rng = Pcg64::seed_from_u64(126);
    for _ in 0..100 {
        let ctx = random_context(&mut rng);
        let scan = execute(Algorithm::Scan, &ctx);
        let look = execute(Algorithm::Look, &ctx);
        assert_eq!(scan.service_order(), look.service_order());
        assert!(look.total_movement() <= scan.total_movement());
    }
}

#[test]
fn test_cscan_wrap_cost() {
    let mut rng = Pcg64::seed_from_u64(127);
    for _ in 0..100 {
        let ctx = random_context(&mut rng);
        let geometry = ctx.geometry();
        let position = ctx.initial_position();
        let cylinders = ctx.requests().cylinders();
        let trace = execute(Algorithm::CScan, &ctx);
        let (ahead, behind): (Vec<Cylinder>, Vec<Cylinder>) =
            cylinders.iter().partition(|c| match geometry.initial_direction() {
                Direction::Increasing => **c >= position,
                Direction::Decreasing => **c <= position,
            });
        let expected = if behind.is_empty() {
            ahead.iter().map(|c| c.abs_diff(position)).max().unwrap_or(0)
        } else {
            let boundary = geometry.boundary(geometry.initial_direction());
            let far_boundary = geometry.boundary(geometry.initial_direction().opposite());
            let far_end = behind.iter().map(|c| c.abs_diff(far_boundary)).max().unwrap_or(0);
            boundary.abs_diff(position) + geometry.span() + far_end
        };
        assert_eq!(trace.total_movement(), expected);
    }
}

#[test]
fn test_nstep_with_large_step_matches_scan_order() {
    let mut rng = Pcg64::seed_from_u64(128);
    for _ in 0..100 {
        let ctx = random_context(&mut rng);
        let step = ctx.requests().len().max(1) + rng.gen_range(0..3);
        let nstep_ctx = context_with_options(
            *ctx.geometry(),
            ctx.initial_position(),
            ctx.requests().clone(),
            false,
            step,
        );
        let scan = execute(Algorithm::Scan, &ctx);
        let nstep = execute(Algorithm::NStepScan, &nstep_ctx);
        assert_eq!(nstep.service_order(), scan.service_order());
    }
}
