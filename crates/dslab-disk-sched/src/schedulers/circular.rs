use crate::context::RunContext;
use crate::geometry::WrapPolicy;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::common::{circular_sweep, new_recorder, positional_requests};
use crate::trace::ResultTrace;

/// Circular SCAN.
///
/// Services requests in the initial direction up to the boundary, then jumps to the opposite
/// boundary and continues in the same direction. Every wrap costs the travel to the boundary plus
/// exactly `upper - lower` for the jump. The geometry's wrap policy is ignored.
#[derive(Default)]
pub struct CScanScheduler {}

impl CScanScheduler {
    pub fn new() -> Self {
        CScanScheduler {}
    }
}

impl Scheduler for CScanScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CScan
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        let mut recorder = new_recorder(Algorithm::CScan.name(), ctx);
        let geometry = ctx.geometry();
        circular_sweep(
            &mut recorder,
            positional_requests(ctx),
            geometry,
            geometry.initial_direction(),
            WrapPolicy::ToBoundary,
        );
        recorder.finish()
    }
}

/// Circular LOOK.
///
/// Wrap behavior follows the geometry's wrap policy: [`WrapPolicy::ToBoundary`] reproduces
/// C-SCAN, [`WrapPolicy::ToFirstPending`] moves from the last serviced request straight to the
/// first pending one on the far side and charges only that distance.
#[derive(Default)]
pub struct CLookScheduler {}

impl CLookScheduler {
    pub fn new() -> Self {
        CLookScheduler {}
    }
}

impl Scheduler for CLookScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CLook
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        let mut recorder = new_recorder(Algorithm::CLook.name(), ctx);
        let geometry = ctx.geometry();
        circular_sweep(
            &mut recorder,
            positional_requests(ctx),
            geometry,
            geometry.initial_direction(),
            geometry.wrap_policy(),
        );
        recorder.finish()
    }
}
