//! Vector summation workload: sum the elements of many independent vectors.
//!
//! Each item folds its vector left to right and then adds a small constant
//! a thousand times; the padding makes the per-item cost large enough for
//! the sequential/parallel gap to show on small batches. Both runs fold in
//! the same order, so the expected divergence is exactly 0; the documented
//! tolerance is 1e-6 to leave headroom for callers that re-associate the
//! per-item sum.

use rand::Rng;

use crate::error::ItemError;

pub const DEFAULT_VECTOR_COUNT: usize = 12;
pub const DEFAULT_VECTOR_LEN: usize = 50_000;

/// Divergence below this counts as equivalent.
pub const TOLERANCE: f64 = 1e-6;

/// One vector to be summed.
#[derive(Debug, Clone)]
pub struct VectorTask {
    pub id: usize,
    pub values: Vec<f64>,
}

/// Builds `count` vectors of `len` uniform doubles in [-100, 100).
pub fn generate_vectors<G: Rng>(count: usize, len: usize, rng: &mut G) -> Vec<VectorTask> {
    (0..count)
        .map(|id| VectorTask {
            id,
            values: (0..len).map(|_| rng.gen_range(-100.0..100.0)).collect(),
        })
        .collect()
}

/// Sums one vector, plus the fixed padding loop.
pub fn sum_with_padding(task: &VectorTask) -> Result<f64, ItemError> {
    let mut sum: f64 = task.values.iter().sum();
    for _ in 0..1000 {
        sum += 0.0001;
    }
    Ok(sum)
}

/// Absolute difference between the two runs' total sums.
pub fn total_sum_divergence(pairs: &[(&f64, &f64)]) -> f64 {
    let seq: f64 = pairs.iter().map(|(s, _)| **s).sum();
    let par: f64 = pairs.iter().map(|(_, p)| **p).sum();
    (seq - par).abs()
}
