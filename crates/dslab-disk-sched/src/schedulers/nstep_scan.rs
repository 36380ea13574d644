use crate::context::RunContext;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::rotating::{run_rotating, RotationPolicy};
use crate::trace::ResultTrace;

/// N-Step-SCAN: requests are swept in batches of at most N.
///
/// In time-based runs a batch takes up to N already arrived requests in arrival order and is
/// swept as soon as it is formed, even if fewer than N are available. Otherwise the input list is
/// cut into consecutive chunks of N. With N = 1 requests are serviced one by one in arrival
/// order; with N not less than the number of requests the whole queue is swept at once.
///
/// N is taken from [`RunContext::step_size`].
#[derive(Default)]
pub struct NStepScanScheduler {}

impl NStepScanScheduler {
    pub fn new() -> Self {
        NStepScanScheduler {}
    }
}

impl Scheduler for NStepScanScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::NStepScan
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        let step_size = ctx.step_size();
        run_rotating(
            format!("{} (N={})", Algorithm::NStepScan.name(), step_size),
            ctx,
            RotationPolicy::Batch(step_size),
        )
    }
}
