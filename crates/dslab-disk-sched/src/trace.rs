//! Run traces and the per-run recorder that builds them.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::SchedulingError;
use crate::geometry::Cylinder;
use crate::metrics::{compute_metrics, Metrics};
use crate::request::{Request, Time};
use crate::{log_debug, log_trace};

/// Record of one completed run.
///
/// Invariants: `head_path` starts with the initial position and has exactly one entry per serviced
/// request after it, `seek_distances` has one entry per serviced request (the head travel since
/// the previous service, boundary trips and wrap jumps included), and
/// `total_movement == sum(seek_distances)`.
///
/// Service and arrival times are only present for time-based runs.
#[derive(Clone, Debug, Serialize)]
pub struct ResultTrace {
    algorithm_name: String,
    initial_position: Cylinder,
    total_movement: u64,
    service_order: Vec<Cylinder>,
    head_path: Vec<Cylinder>,
    service_times: Vec<Time>,
    arrival_times: Vec<Time>,
    seek_distances: Vec<u64>,
    #[serde(skip)]
    metrics: OnceLock<Metrics>,
}

impl ResultTrace {
    /// Assembles a trace from per-service records.
    ///
    /// Head path and total movement are derived from the other fields, so the invariants hold by
    /// construction. `service_times` and `arrival_times` are either empty or have one entry per
    /// serviced request, otherwise [`SchedulingError::InvalidTrace`] is returned.
    pub fn new(
        algorithm_name: impl Into<String>,
        initial_position: Cylinder,
        service_order: Vec<Cylinder>,
        seek_distances: Vec<u64>,
        service_times: Vec<Time>,
        arrival_times: Vec<Time>,
    ) -> Result<Self, SchedulingError> {
        if seek_distances.len() != service_order.len() {
            return Err(SchedulingError::InvalidTrace {
                reason: "every serviced request must have a seek distance",
            });
        }
        if service_times.len() != arrival_times.len() {
            return Err(SchedulingError::InvalidTrace {
                reason: "service and arrival times must have the same length",
            });
        }
        if !service_times.is_empty() && service_times.len() != service_order.len() {
            return Err(SchedulingError::InvalidTrace {
                reason: "timing must be recorded for every serviced request",
            });
        }
        Ok(Self::assemble(
            algorithm_name.into(),
            initial_position,
            service_order,
            seek_distances,
            service_times,
            arrival_times,
        ))
    }

    fn assemble(
        algorithm_name: String,
        initial_position: Cylinder,
        service_order: Vec<Cylinder>,
        seek_distances: Vec<u64>,
        service_times: Vec<Time>,
        arrival_times: Vec<Time>,
    ) -> Self {
        let mut head_path = Vec::with_capacity(service_order.len() + 1);
        head_path.push(initial_position);
        head_path.extend_from_slice(&service_order);
        Self {
            algorithm_name,
            initial_position,
            total_movement: seek_distances.iter().fold(0, |total, seek| total.saturating_add(*seek)),
            service_order,
            head_path,
            service_times,
            arrival_times,
            seek_distances,
            metrics: OnceLock::new(),
        }
    }

    /// Trace of a run without requests.
    pub fn empty(algorithm_name: impl Into<String>, initial_position: Cylinder) -> Self {
        Self::assemble(
            algorithm_name.into(),
            initial_position,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn initial_position(&self) -> Cylinder {
        self.initial_position
    }

    pub fn total_movement(&self) -> u64 {
        self.total_movement
    }

    pub fn service_order(&self) -> &[Cylinder] {
        &self.service_order
    }

    pub fn head_path(&self) -> &[Cylinder] {
        &self.head_path
    }

    pub fn service_times(&self) -> &[Time] {
        &self.service_times
    }

    pub fn arrival_times(&self) -> &[Time] {
        &self.arrival_times
    }

    pub fn seek_distances(&self) -> &[u64] {
        &self.seek_distances
    }

    pub fn request_count(&self) -> usize {
        self.service_order.len()
    }

    pub fn is_time_based(&self) -> bool {
        !self.service_times.is_empty()
    }

    /// Returns run metrics, computing them on first access.
    pub fn metrics(&self) -> &Metrics {
        self.metrics.get_or_init(|| compute_metrics(self))
    }
}

impl PartialEq for ResultTrace {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm_name == other.algorithm_name
            && self.initial_position == other.initial_position
            && self.total_movement == other.total_movement
            && self.service_order == other.service_order
            && self.head_path == other.head_path
            && self.service_times == other.service_times
            && self.arrival_times == other.arrival_times
            && self.seek_distances == other.seek_distances
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Per-run accumulator of head movement, simulated time and service records.
///
/// Every scheduler owns one recorder for the duration of a run and turns it into a
/// [`ResultTrace`] with [`finish`](TraceRecorder::finish). The clock advances by one time unit per
/// cylinder traversed; it is only reported in the trace when timing is recorded.
pub struct TraceRecorder {
    name: String,
    initial_position: Cylinder,
    position: Cylinder,
    movement: u64,
    clock: Time,
    travel_since_service: u64,
    record_timing: bool,
    service_order: Vec<Cylinder>,
    seek_distances: Vec<u64>,
    service_times: Vec<Time>,
    arrival_times: Vec<Time>,
}

impl TraceRecorder {
    pub fn new(name: impl Into<String>, initial_position: Cylinder, record_timing: bool) -> Self {
        Self {
            name: name.into(),
            initial_position,
            position: initial_position,
            movement: 0,
            clock: 0,
            travel_since_service: 0,
            record_timing,
            service_order: Vec::new(),
            seek_distances: Vec::new(),
            service_times: Vec::new(),
            arrival_times: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current simulated time.
    pub fn time(&self) -> Time {
        self.clock
    }

    pub fn position(&self) -> Cylinder {
        self.position
    }

    pub fn movement(&self) -> u64 {
        self.movement
    }

    pub fn serviced_count(&self) -> usize {
        self.service_order.len()
    }

    /// Moves the head without servicing anything (e.g. to a disk boundary).
    pub fn travel_to(&mut self, cylinder: Cylinder) {
        let distance = self.position.abs_diff(cylinder);
        self.charge(distance);
        self.position = cylinder;
    }

    /// Repositions the head to `cylinder` charging `cost` instead of the actual distance.
    pub fn jump_to(&mut self, cylinder: Cylinder, cost: u64) {
        log_trace!(self, "Wrapping from {} to {}, cost {}", self.position, cylinder, cost);
        self.charge(cost);
        self.position = cylinder;
    }

    fn charge(&mut self, distance: u64) {
        self.movement = self.movement.saturating_add(distance);
        self.clock = self.clock.saturating_add(distance);
        self.travel_since_service = self.travel_since_service.saturating_add(distance);
    }

    /// Moves the head to the request's cylinder and records its service.
    pub fn service(&mut self, request: &Request) {
        self.travel_to(request.cylinder);
        self.seek_distances.push(self.travel_since_service);
        self.travel_since_service = 0;
        self.service_order.push(request.cylinder);
        if self.record_timing {
            self.service_times.push(self.clock);
            self.arrival_times.push(request.arrival_time);
            log_debug!(
                self,
                "Servicing at: {} (arrived at {})",
                request.cylinder,
                request.arrival_time
            );
        } else {
            log_debug!(self, "Servicing at: {}", request.cylinder);
        }
    }

    /// Lets the head idle until given time. Never moves the clock backwards.
    pub fn wait_until(&mut self, time: Time) {
        if time > self.clock {
            log_trace!(self, "Idle until {}", time);
            self.clock = time;
        }
    }

    pub fn finish(self) -> ResultTrace {
        debug_assert_eq!(
            self.travel_since_service, 0,
            "Head movement after the last service is not attributed to any request"
        );
        log_debug!(
            self,
            "Finished: {} requests serviced, total movement {}",
            self.service_order.len(),
            self.movement
        );
        let trace = ResultTrace::assemble(
            self.name,
            self.initial_position,
            self.service_order,
            self.seek_distances,
            self.service_times,
            self.arrival_times,
        );
        debug_assert_eq!(trace.total_movement(), self.movement);
        trace
    }
}
