//! Harness configuration.
//!
//! The worker count is an explicit field rather than an ambient process-wide
//! setting, so a caller can pin it for reproducible measurements. The
//! default matches the host's logical core count.

use std::time::Duration;

use crate::error::ConfigError;

/// How the index range `[0, batch_len)` is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// One contiguous block per worker. Cheapest split; right when per-item
    /// cost is roughly uniform.
    Contiguous,
    /// Workers pull fixed-size index chunks from a shared cursor. Balances
    /// load when per-item cost varies widely.
    Chunked { chunk_size: usize },
    /// Rayon's work-stealing scheduler on an explicitly sized pool.
    WorkStealing,
}

/// Configuration for a parallel run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of worker threads the parallel run fans out to.
    pub worker_count: usize,
    /// Index partitioning strategy.
    pub partition: Partition,
    /// Optional deadline for the parallel run. Items not started by the
    /// deadline are marked failed; items already running finish normally.
    pub timeout: Option<Duration>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            worker_count: num_cpus::get(),
            partition: Partition::Contiguous,
            timeout: None,
        }
    }
}

impl HarnessConfig {
    pub fn new(worker_count: usize) -> Self {
        HarnessConfig {
            worker_count,
            ..HarnessConfig::default()
        }
    }

    pub fn partition(mut self, partition: Partition) -> Self {
        self.partition = partition;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the configuration against a concrete batch length. Called by
    /// the harness before any thread is spawned.
    pub fn validate(&self, batch_len: usize) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if let Partition::Chunked { chunk_size } = self.partition {
            if chunk_size == 0 {
                return Err(ConfigError::ZeroChunkSize);
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        if batch_len == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        Ok(())
    }
}
