use crate::context::RunContext;
use crate::scheduler::{Algorithm, Scheduler};
use crate::schedulers::common::{new_recorder, positional_requests, sweep, Reversal};
use crate::trace::ResultTrace;

fn two_way_sweep(algorithm: Algorithm, reversal: Reversal, ctx: &RunContext) -> ResultTrace {
    let mut recorder = new_recorder(algorithm.name(), ctx);
    let geometry = ctx.geometry();
    sweep(
        &mut recorder,
        positional_requests(ctx),
        geometry,
        geometry.initial_direction(),
        reversal,
        |_| {},
    );
    recorder.finish()
}

/// Elevator algorithm.
///
/// Sweeps in the initial direction servicing requests in order, travels on to the disk boundary
/// and reverses to service the rest. The boundary trip is only made when requests remain behind
/// the head.
#[derive(Default)]
pub struct ScanScheduler {}

impl ScanScheduler {
    pub fn new() -> Self {
        ScanScheduler {}
    }
}

impl Scheduler for ScanScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Scan
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        two_way_sweep(Algorithm::Scan, Reversal::AtBoundary, ctx)
    }
}

/// Same as SCAN, but reverses at the last request instead of the disk boundary.
#[derive(Default)]
pub struct LookScheduler {}

impl LookScheduler {
    pub fn new() -> Self {
        LookScheduler {}
    }
}

impl Scheduler for LookScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Look
    }

    fn execute(&self, ctx: &RunContext) -> ResultTrace {
        two_way_sweep(Algorithm::Look, Reversal::AtLastRequest, ctx)
    }
}
