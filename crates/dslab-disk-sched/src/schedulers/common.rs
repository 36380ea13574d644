use crate::context::RunContext;
use crate::geometry::{Cylinder, Direction, DiskGeometry, WrapPolicy};
use crate::log_trace;
use crate::request::Request;
use crate::trace::TraceRecorder;

/// Where a two-way sweep turns around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reversal {
    /// Travel to the physical boundary before reversing (SCAN).
    AtBoundary,
    /// Reverse right after the last request in the current direction (LOOK).
    AtLastRequest,
}

/// Context requests with arrival times dropped, for policies that ignore them.
pub fn positional_requests(ctx: &RunContext) -> Vec<Request> {
    ctx.requests()
        .iter()
        .map(|r| Request::at_start(r.cylinder))
        .collect()
}

pub fn new_recorder(name: impl Into<String>, ctx: &RunContext) -> TraceRecorder {
    let recorder = TraceRecorder::new(name, ctx.initial_position(), ctx.time_based());
    log_trace!(
        recorder,
        "Starting at {} with {} requests on {}",
        ctx.initial_position(),
        ctx.requests().len(),
        ctx.geometry()
    );
    recorder
}

/// Requests split relative to the head position.
///
/// `below` is sorted by descending cylinder and `above` by ascending cylinder, i.e. both in the
/// order of moving away from the head. Requests for the same cylinder keep their relative order.
pub struct Partition {
    pub at_head: Vec<Request>,
    pub below: Vec<Request>,
    pub above: Vec<Request>,
}

impl Partition {
    pub fn new(requests: Vec<Request>, position: Cylinder) -> Self {
        let mut at_head = Vec::new();
        let mut below = Vec::new();
        let mut above = Vec::new();
        for request in requests {
            if request.cylinder < position {
                below.push(request);
            } else if request.cylinder > position {
                above.push(request);
            } else {
                at_head.push(request);
            }
        }
        below.sort_by(|a, b| b.cylinder.cmp(&a.cylinder));
        above.sort_by_key(|r| r.cylinder);
        Self { at_head, below, above }
    }

    /// Splits into requests ahead of the head in given direction and those behind it,
    /// both in the order of moving away from the head.
    pub fn ahead_and_behind(self, direction: Direction) -> (Vec<Request>, Vec<Request>) {
        match direction {
            Direction::Increasing => (self.above, self.below),
            Direction::Decreasing => (self.below, self.above),
        }
    }
}

/// Services requests with a two-way sweep starting in `direction`.
///
/// Requests at the head position are serviced first, then the ones ahead in sweep order. If any
/// request remains behind the head, the sweep reverses (after reaching the boundary if `reversal`
/// says so) and services them in the opposite direction. `after_service` is invoked after every
/// serviced request.
pub fn sweep<F>(
    recorder: &mut TraceRecorder,
    requests: Vec<Request>,
    geometry: &DiskGeometry,
    direction: Direction,
    reversal: Reversal,
    mut after_service: F,
) where
    F: FnMut(&TraceRecorder),
{
    let partition = Partition::new(requests, recorder.position());
    for request in partition.at_head.iter() {
        recorder.service(request);
        after_service(&*recorder);
    }
    let (ahead, behind) = partition.ahead_and_behind(direction);
    for request in ahead.iter() {
        recorder.service(request);
        after_service(&*recorder);
    }
    if behind.is_empty() {
        return;
    }
    if reversal == Reversal::AtBoundary {
        recorder.travel_to(geometry.boundary(direction));
    }
    for request in behind.iter() {
        recorder.service(request);
        after_service(&*recorder);
    }
}

/// Services requests with a one-way circular sweep in `direction`.
///
/// After the requests ahead of the head are serviced, the head returns to the opposite side and
/// continues in the same direction. With [`WrapPolicy::ToBoundary`] it travels to the boundary and
/// jumps to the opposite one, the jump costing exactly `upper - lower`; with
/// [`WrapPolicy::ToFirstPending`] it moves straight to the first pending request on the far side.
pub fn circular_sweep(
    recorder: &mut TraceRecorder,
    requests: Vec<Request>,
    geometry: &DiskGeometry,
    direction: Direction,
    wrap_policy: WrapPolicy,
) {
    let partition = Partition::new(requests, recorder.position());
    for request in partition.at_head.iter() {
        recorder.service(request);
    }
    let (ahead, mut behind) = partition.ahead_and_behind(direction);
    for request in ahead.iter() {
        recorder.service(request);
    }
    if behind.is_empty() {
        return;
    }
    if wrap_policy == WrapPolicy::ToBoundary {
        recorder.travel_to(geometry.boundary(direction));
        recorder.jump_to(geometry.boundary(direction.opposite()), geometry.span());
    }
    // far side is serviced in the same direction, starting from its outermost request
    behind.reverse();
    for request in behind.iter() {
        recorder.service(request);
    }
}
