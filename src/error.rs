//! Error taxonomy for the benchmark harness.
//!
//! Configuration problems abort a call before any work starts. A failing
//! work item never unwinds across the batch: the failure is captured as data
//! in that item's result slot, and a run only fails as a whole when every
//! single item failed.

use thiserror::Error;

/// Invalid harness configuration, rejected synchronously.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("batch is empty")]
    EmptyBatch,
}

/// Failure of a single work item. Stored in the item's result slot; the
/// rest of the batch is unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("compute failed: {0}")]
    Compute(String),
    #[error("run deadline passed before the item was started")]
    Timeout,
}

impl ItemError {
    /// Shorthand for a domain compute failure.
    pub fn compute(message: impl Into<String>) -> Self {
        ItemError::Compute(message.into())
    }
}

/// Whole-run failure.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("all {0} items in the batch failed")]
    AllItemsFailed(usize),
    #[error("failed to build worker pool: {0}")]
    Pool(String),
}
