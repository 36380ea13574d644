use crate::context::RunContext;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::common::{new_recorder, positional_requests};
use crate::trace::ResultTrace;

/// Shortest seek time first (shortest-seek-next).
///
/// At each step the pending request closest to the head is serviced; ties go to the smaller
/// cylinder. Quadratic in the number of requests.
#[derive(Default)]
pub struct SstfScheduler {}

impl SstfScheduler {
    pub fn new() -> Self {
        SstfScheduler {}
    }
}

impl Scheduler for SstfScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sstf
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        let mut recorder = new_recorder(Algorithm::Sstf.name(), ctx);
        let mut pending = positional_requests(ctx);
        while let Some(closest) = pending
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| (recorder.position().abs_diff(r.cylinder), r.cylinder))
            .map(|(i, _)| i)
        {
            let request = pending.remove(closest);
            recorder.service(&request);
        }
        recorder.finish()
    }
}
