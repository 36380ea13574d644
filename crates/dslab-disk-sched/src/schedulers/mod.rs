//! Implementations of disk-head scheduling policies.

pub mod circular;
pub mod common;
pub mod fcfs;
pub mod fscan;
pub mod nstep_scan;
pub mod rotating;
pub mod scan;
pub mod sstf;
