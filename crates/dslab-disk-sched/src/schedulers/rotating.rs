//! Queue rotation machinery shared by FSCAN and N-Step-SCAN.
//!
//! Requests are serviced in batches. Each batch is swept with SCAN ordering starting from the
//! current head position in the geometry's initial direction, reversing at the last request of
//! the batch. How batches are formed depends on the [`RotationPolicy`] and on the run mode:
//!
//! * time-based runs form batches from requests that have already arrived, advancing the clock
//!   to the next arrival when nothing is eligible;
//! * other runs partition the input list positionally, with no waiting.

use std::collections::VecDeque;

use crate::context::RunContext;
use crate::geometry::{Cylinder, DiskGeometry};
use crate::request::{Request, Time};
use crate::schedulers::common::{new_recorder, sweep, Reversal};
use crate::trace::{ResultTrace, TraceRecorder};
use crate::{log_debug, log_trace};

/// How the next batch is formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Two queues (FSCAN): the active queue is frozen while being swept, new arrivals accumulate
    /// in the holding queue which becomes active on the next rotation.
    Freeze,
    /// Batches of at most N requests in arrival order (N-Step-SCAN).
    Batch(usize),
}

/// State of the rotation state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotationState {
    /// Nothing has been admitted yet.
    Idle,
    /// The batch is being swept.
    Sweeping(Vec<Request>),
    /// The last batch is done, the next one has to be formed.
    Rotating,
    /// All requests are serviced.
    Drained,
}

enum BatchSource {
    Arrivals {
        /// Not yet admitted requests, in arrival order.
        pending: VecDeque<Request>,
        /// Requests that arrived during the current sweep (FSCAN only).
        holding: Vec<Request>,
    },
    Static(VecDeque<Vec<Request>>),
}

/// Rotating-queue scheduler state for a single run.
pub struct RotatingQueue {
    policy: RotationPolicy,
    source: BatchSource,
    rotations: usize,
}

impl RotatingQueue {
    /// Creates state for given context. Step sizes below 1 are treated as 1.
    pub fn new(ctx: &RunContext, policy: RotationPolicy) -> Self {
        let policy = match policy {
            RotationPolicy::Batch(n) => RotationPolicy::Batch(n.max(1)),
            RotationPolicy::Freeze => RotationPolicy::Freeze,
        };
        let requests = ctx.requests().requests();
        let source = if ctx.time_based() {
            let mut pending = requests.to_vec();
            pending.sort_by_key(|r| r.arrival_time);
            BatchSource::Arrivals {
                pending: pending.into(),
                holding: Vec::new(),
            }
        } else {
            BatchSource::Static(Self::partition(requests, policy))
        };
        Self {
            policy,
            source,
            rotations: 0,
        }
    }

    /// Positional split of the input list: two halves for FSCAN, chunks of N for N-Step-SCAN.
    fn partition(requests: &[Request], policy: RotationPolicy) -> VecDeque<Vec<Request>> {
        let batches: Vec<&[Request]> = match policy {
            RotationPolicy::Freeze => {
                let (first, second) = requests.split_at(requests.len() / 2);
                vec![first, second]
            }
            RotationPolicy::Batch(n) => requests.chunks(n).collect(),
        };
        batches
            .into_iter()
            .filter(|batch| !batch.is_empty())
            .map(|batch| batch.to_vec())
            .collect()
    }

    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Number of requests not yet handed out in a batch.
    pub fn waiting(&self) -> usize {
        match &self.source {
            BatchSource::Arrivals { pending, holding } => pending.len() + holding.len(),
            BatchSource::Static(batches) => batches.iter().map(|b| b.len()).sum(),
        }
    }

    /// Performs one transition of the state machine.
    ///
    /// `Idle` and `Rotating` form the next batch (`Sweeping`) or finish (`Drained`); `Sweeping`
    /// services its batch and moves to `Rotating`. Every batch is non-empty, so the machine
    /// reaches `Drained` after at most `2 * n + 1` transitions for `n` requests.
    pub fn next_state(
        &mut self,
        state: RotationState,
        recorder: &mut TraceRecorder,
        geometry: &DiskGeometry,
    ) -> RotationState {
        match state {
            RotationState::Idle | RotationState::Rotating => match self.next_batch(recorder) {
                Some(batch) => {
                    self.rotations += 1;
                    log_debug!(
                        recorder,
                        "Processing queue {}: {:?}",
                        self.rotations,
                        batch.iter().map(|r| r.cylinder).collect::<Vec<Cylinder>>()
                    );
                    RotationState::Sweeping(batch)
                }
                None => RotationState::Drained,
            },
            RotationState::Sweeping(batch) => {
                let policy = self.policy;
                let source = &mut self.source;
                sweep(
                    recorder,
                    batch,
                    geometry,
                    geometry.initial_direction(),
                    Reversal::AtLastRequest,
                    |recorder| {
                        if policy == RotationPolicy::Freeze {
                            Self::hold_arrivals(source, recorder);
                        }
                    },
                );
                RotationState::Rotating
            }
            RotationState::Drained => RotationState::Drained,
        }
    }

    /// Moves requests that arrived by the recorder's current time into the holding queue.
    fn hold_arrivals(source: &mut BatchSource, recorder: &TraceRecorder) {
        if let BatchSource::Arrivals { pending, holding } = source {
            while let Some(request) = pending.front() {
                if request.arrival_time > recorder.time() {
                    break;
                }
                log_trace!(
                    recorder,
                    "Request {} (arrived at {}) deposited into holding queue",
                    request.cylinder,
                    request.arrival_time
                );
                holding.push(*request);
                pending.pop_front();
            }
        }
    }

    fn next_batch(&mut self, recorder: &mut TraceRecorder) -> Option<Vec<Request>> {
        let policy = self.policy;
        match &mut self.source {
            BatchSource::Static(batches) => batches.pop_front(),
            BatchSource::Arrivals { pending, holding } => match policy {
                RotationPolicy::Freeze => {
                    admit(pending, holding, recorder.time(), usize::MAX);
                    if holding.is_empty() {
                        let next_arrival = pending.front()?.arrival_time;
                        recorder.wait_until(next_arrival);
                        admit(pending, holding, recorder.time(), usize::MAX);
                    }
                    Some(std::mem::take(holding))
                }
                RotationPolicy::Batch(n) => {
                    let next_arrival = pending.front()?.arrival_time;
                    recorder.wait_until(next_arrival);
                    let mut batch = Vec::new();
                    admit(pending, &mut batch, recorder.time(), n);
                    Some(batch)
                }
            },
        }
    }
}

/// Moves at most `limit` requests with `arrival_time <= time` from the front of `pending` to `dst`.
fn admit(pending: &mut VecDeque<Request>, dst: &mut Vec<Request>, time: Time, limit: usize) {
    let mut admitted = 0;
    while admitted < limit {
        match pending.front() {
            Some(request) if request.arrival_time <= time => {
                dst.push(*request);
                pending.pop_front();
                admitted += 1;
            }
            _ => break,
        }
    }
}

/// Runs the rotation state machine from `Idle` to `Drained`.
pub fn run_rotating(name: String, ctx: &RunContext, policy: RotationPolicy) -> ResultTrace {
    let mut recorder = new_recorder(name, ctx);
    if ctx.requests().is_empty() {
        return recorder.finish();
    }
    let mut queue = RotatingQueue::new(ctx, policy);
    let mut state = RotationState::Idle;
    while state != RotationState::Drained {
        state = queue.next_state(state, &mut recorder, ctx.geometry());
    }
    log_trace!(recorder, "Drained after {} rotations", queue.rotations());
    recorder.finish()
}
