//! Disk access requests and ordered request traces.

use std::cmp::Ordering;

use serde::Serialize;

use crate::geometry::Cylinder;

/// Simulated time, in the same units as head movement (one unit per cylinder).
pub type Time = u64;

/// A single access request.
///
/// Requests are ordered by arrival time first and by cylinder second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Request {
    pub cylinder: Cylinder,
    pub arrival_time: Time,
}

impl Request {
    pub fn new(cylinder: Cylinder, arrival_time: Time) -> Self {
        Self { cylinder, arrival_time }
    }

    /// Request which is available from the very start.
    pub fn at_start(cylinder: Cylinder) -> Self {
        Self::new(cylinder, 0)
    }
}

impl Ord for Request {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arrival_time
            .cmp(&other.arrival_time)
            .then(self.cylinder.cmp(&other.cylinder))
    }
}

impl PartialOrd for Request {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Ordered collection of requests feeding a run.
///
/// The order is the input order: positional algorithms such as FCFS depend on it, while
/// arrival-aware schedulers re-sort by arrival on their own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RequestTrace {
    requests: Vec<Request>,
}

impl RequestTrace {
    pub fn new(requests: Vec<Request>) -> Self {
        Self { requests }
    }

    /// All requests arrive at time 0, in given order.
    pub fn from_cylinders(cylinders: &[Cylinder]) -> Self {
        Self::new(cylinders.iter().map(|c| Request::at_start(*c)).collect())
    }

    /// Request `i` arrives at `i * interval`.
    pub fn from_cylinders_with_interval(cylinders: &[Cylinder], interval: Time) -> Self {
        Self::new(
            cylinders
                .iter()
                .enumerate()
                .map(|(i, c)| Request::new(*c, i as Time * interval))
                .collect(),
        )
    }

    /// Builds a trace sorted by arrival time (ties broken by cylinder).
    pub fn sorted_by_arrival(mut requests: Vec<Request>) -> Self {
        requests.sort();
        Self { requests }
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn cylinders(&self) -> Vec<Cylinder> {
        self.requests.iter().map(|r| r.cylinder).collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Returns true if no request arrives after time 0.
    pub fn all_at_start(&self) -> bool {
        self.requests.iter().all(|r| r.arrival_time == 0)
    }

    pub fn max_arrival_time(&self) -> Time {
        self.requests.iter().map(|r| r.arrival_time).max().unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Request> {
        self.requests.iter()
    }
}

impl From<Vec<Request>> for RequestTrace {
    fn from(requests: Vec<Request>) -> Self {
        Self::new(requests)
    }
}

impl FromIterator<Request> for RequestTrace {
    fn from_iter<I: IntoIterator<Item = Request>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RequestTrace {
    type Item = &'a Request;
    type IntoIter = std::slice::Iter<'a, Request>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}
