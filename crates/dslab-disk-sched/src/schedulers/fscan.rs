use crate::context::RunContext;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::rotating::{run_rotating, RotationPolicy};
use crate::trace::ResultTrace;

/// Freeze SCAN: two rotating queues.
///
/// In time-based runs the active queue holds the requests that had arrived when its sweep
/// started; everything arriving during the sweep waits in the holding queue, which becomes active
/// once the sweep is done. Otherwise the first and second halves of the input list are swept one
/// after another.
#[derive(Default)]
pub struct FScanScheduler {}

impl FScanScheduler {
    pub fn new() -> Self {
        FScanScheduler {}
    }
}

impl Scheduler for FScanScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::FScan
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        run_rotating(Algorithm::FScan.name().to_string(), ctx, RotationPolicy::Freeze)
    }
}
