//! Generic parallel benchmark harness for embarrassingly parallel batches.
//!
//! Given a fixed batch of independent work items and a pure per-item
//! compute function, the harness runs the batch once on the calling thread
//! and once across a worker pool, times both runs, checks that they
//! produced equivalent results and reports speedup and efficiency.
//!
//! ```
//! use parbench::{compare, infallible, run_parallel, run_sequential, HarnessConfig};
//!
//! let batch: Vec<u64> = (1..=32).collect();
//! let compute = infallible(|n: &u64| (1..=*n).fold(1u64, |acc, k| acc * k % 1_000_003));
//!
//! let seq = run_sequential(&batch, &compute).unwrap();
//! let config = HarnessConfig::new(4);
//! let par = run_parallel(&batch, &compute, &config).unwrap();
//!
//! let report = compare(&seq, &par, config.worker_count, |pairs| {
//!     pairs.iter().filter(|(s, p)| s != p).count() as f64
//! });
//! assert_eq!(report.divergence, 0.0);
//! ```
//!
//! The [`exercises`] module holds four ready-made workloads (image graying,
//! vector summation, vector search, free-fall simulation) as thin
//! instantiations of the harness.

pub mod config;
pub mod error;
pub mod exercises;
pub mod harness;
pub mod report;

pub use config::{HarnessConfig, Partition};
pub use error::{ConfigError, HarnessError, ItemError};
pub use harness::{infallible, run_parallel, run_sequential};
pub use report::{compare, ComparisonReport, ItemResult, RunReport};
