use crate::context::RunContext;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::common::{new_recorder, positional_requests};
use crate::trace::ResultTrace;

/// First come, first served: requests are serviced in input order.
#[derive(Default)]
pub struct FcfsScheduler {}

impl FcfsScheduler {
    pub fn new() -> Self {
        FcfsScheduler {}
    }
}

impl Scheduler for FcfsScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        let mut recorder = new_recorder(Algorithm::Fcfs.name(), ctx);
        for request in positional_requests(ctx).iter() {
            recorder.service(request);
        }
        recorder.finish()
    }
}
