//! Run and comparison reports.
//!
//! Both report types are plain data: the harness never prints, callers
//! format as they see fit.

use std::time::Duration;

use crate::error::ItemError;

/// Outcome of one work item, together with its own wall-clock cost.
#[derive(Debug, Clone)]
pub struct ItemResult<R> {
    /// Position of the item in the batch. Identifies the logical item
    /// across sequential and parallel runs.
    pub index: usize,
    /// Domain value on success, captured failure otherwise.
    pub outcome: Result<R, ItemError>,
    /// Time spent computing this item. Zero for items that never started.
    pub elapsed: Duration,
}

/// Aggregate of one run over a batch. `results` has exactly one entry per
/// batch index, in index order, whatever order the workers finished in.
#[derive(Debug, Clone)]
pub struct RunReport<R> {
    pub results: Vec<ItemResult<R>>,
    /// Wall-clock time of the whole run (fan-out to join for the parallel
    /// case), not the sum of per-item times.
    pub total: Duration,
}

impl<R> RunReport<R> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Average wall-clock time per item.
    pub fn average_per_item(&self) -> Duration {
        if self.results.is_empty() {
            Duration::ZERO
        } else {
            self.total / self.results.len() as u32
        }
    }

    /// Indices whose compute failed, in ascending order.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_err())
            .map(|r| r.index)
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    /// Domain value at `index`, if that item succeeded.
    pub fn value(&self, index: usize) -> Option<&R> {
        self.results.get(index).and_then(|r| r.outcome.as_ref().ok())
    }
}

/// Comparison of a sequential and a parallel run over the same batch.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub batch_size: usize,
    pub worker_count: usize,
    pub sequential_total: Duration,
    pub parallel_total: Duration,
    /// Sequential duration divided by parallel duration; 0 when the
    /// parallel duration is zero.
    pub speedup: f64,
    /// Speedup divided by worker count, as a percentage.
    pub efficiency: f64,
    /// Result of the injected equivalence function over the indices that
    /// succeeded in both runs. 0 when no index succeeded in both.
    pub divergence: f64,
    /// Indices that failed in at least one of the two runs, ascending,
    /// each with the error from the run that failed it (sequential run's
    /// error wins when both failed).
    pub excluded: Vec<(usize, ItemError)>,
    /// Number of indices the metrics were computed over.
    pub compared: usize,
}

impl ComparisonReport {
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}

/// Computes speedup, efficiency and divergence for two runs of the same
/// batch.
///
/// `equivalence` receives index-paired (sequential, parallel) domain values
/// for the indices that succeeded in both runs, and returns the domain's
/// divergence measure. Metrics exclude failed indices: the per-item elapsed
/// time recorded for an excluded index is subtracted from that run's total
/// before the speedup ratio is taken.
///
/// Panics if the two reports have different lengths; they must come from
/// the same batch.
pub fn compare<R, E>(
    seq: &RunReport<R>,
    par: &RunReport<R>,
    worker_count: usize,
    equivalence: E,
) -> ComparisonReport
where
    E: Fn(&[(&R, &R)]) -> f64,
{
    assert_eq!(
        seq.len(),
        par.len(),
        "sequential and parallel reports cover different batches"
    );

    let mut excluded = Vec::new();
    let mut pairs = Vec::new();
    let mut seq_excluded_time = Duration::ZERO;
    let mut par_excluded_time = Duration::ZERO;

    for (s, p) in seq.results.iter().zip(&par.results) {
        match (&s.outcome, &p.outcome) {
            (Ok(sv), Ok(pv)) => pairs.push((sv, pv)),
            (Err(e), _) | (_, Err(e)) => {
                excluded.push((s.index, e.clone()));
                seq_excluded_time += s.elapsed;
                par_excluded_time += p.elapsed;
            }
        }
    }

    let seq_effective = seq.total.saturating_sub(seq_excluded_time);
    let par_effective = par.total.saturating_sub(par_excluded_time);

    let speedup = if par_effective.is_zero() {
        0.0
    } else {
        seq_effective.as_secs_f64() / par_effective.as_secs_f64()
    };
    let efficiency = if worker_count == 0 {
        0.0
    } else {
        speedup / worker_count as f64 * 100.0
    };
    let divergence = if pairs.is_empty() { 0.0 } else { equivalence(&pairs) };

    ComparisonReport {
        batch_size: seq.len(),
        worker_count,
        sequential_total: seq.total,
        parallel_total: par.total,
        speedup,
        efficiency,
        divergence,
        compared: pairs.len(),
        excluded,
    }
}
