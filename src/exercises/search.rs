//! Vector search workload: linear scan for a target value in many
//! independent vectors.
//!
//! The generator plants known values so some searches are guaranteed hits:
//! every third vector gets a 42 and every (3k+1)-th a 100, at a random
//! position. Found counts are integers, so the equivalence tolerance is 0.

use rand::Rng;

use crate::error::ItemError;

pub const DEFAULT_VECTOR_COUNT: usize = 10;
pub const DEFAULT_VECTOR_LEN: usize = 75_000;

/// Divergence below this counts as equivalent (exact match required).
pub const TOLERANCE: f64 = 0.0;

/// One haystack plus the value to look for.
#[derive(Debug, Clone)]
pub struct SearchTask {
    pub id: usize,
    pub haystack: Vec<i32>,
    pub target: i32,
}

/// Result of scanning one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// First index holding the target, if any.
    pub position: Option<usize>,
}

impl SearchHit {
    pub fn found(&self) -> bool {
        self.position.is_some()
    }
}

/// Builds `count` vectors of `len` ints in [1, 1000], planting 42 in every
/// third vector and 100 in every (3k+1)-th, all searching for `target`.
pub fn generate_search_tasks<G: Rng>(
    count: usize,
    len: usize,
    target: i32,
    rng: &mut G,
) -> Vec<SearchTask> {
    (0..count)
        .map(|id| {
            let mut haystack: Vec<i32> = (0..len).map(|_| rng.gen_range(1..=1000)).collect();
            if id % 3 == 0 {
                let at = rng.gen_range(0..len);
                haystack[at] = 42;
            } else if id % 3 == 1 {
                let at = rng.gen_range(0..len);
                haystack[at] = 100;
            }
            SearchTask {
                id,
                haystack,
                target,
            }
        })
        .collect()
}

/// First-hit linear scan.
pub fn linear_search(task: &SearchTask) -> Result<SearchHit, ItemError> {
    let position = task.haystack.iter().position(|&v| v == task.target);
    Ok(SearchHit { position })
}

/// Absolute difference between the two runs' found counts.
pub fn found_count_divergence(pairs: &[(&SearchHit, &SearchHit)]) -> f64 {
    let seq = pairs.iter().filter(|(s, _)| s.found()).count() as i64;
    let par = pairs.iter().filter(|(_, p)| p.found()).count() as i64;
    (seq - par).abs() as f64
}
