//! A library for simulating and comparing disk-head scheduling policies.
//!
//! Given a disk geometry, an initial head position and a set of cylinder requests, each policy
//! produces a [`ResultTrace`](trace::ResultTrace) with the service order, head path and seek
//! distances, from which [`Metrics`](metrics::Metrics) are derived.
//!
//! Supported policies: FCFS, SSTF, SCAN, C-SCAN, LOOK, C-LOOK, FSCAN and N-Step-SCAN.
//!
//! ```rust
//! use dslab_disk_sched::geometry::{Direction, DiskGeometry, WrapPolicy};
//! use dslab_disk_sched::request::RequestTrace;
//! use dslab_disk_sched::scheduler::{run, Algorithm};
//!
//! let geometry = DiskGeometry::new(0, 199, Direction::Decreasing, WrapPolicy::ToBoundary).unwrap();
//! let requests = RequestTrace::from_cylinders(&[176, 79, 34, 60, 92, 11, 41, 114]);
//! let trace = run(Algorithm::Scan.scheduler().as_ref(), geometry, 50, requests).unwrap();
//! assert_eq!(trace.total_movement(), 226);
//! ```

pub mod benchmark;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod log;
pub mod metrics;
pub mod request;
pub mod scheduler;
pub mod schedulers;
pub mod trace;
pub mod workload;

pub use colored;
