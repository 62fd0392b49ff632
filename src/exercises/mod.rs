//! The four demonstration workloads, each a thin instantiation of the
//! harness: a work-item type, a sample-data generator, a pure per-item
//! compute function and a domain equivalence function.
//!
//! Generators take a caller-supplied [`rand::Rng`] so demos and tests can
//! seed them deterministically. Each module documents the tolerance its
//! equivalence function is expected to stay within.

pub mod fall;
pub mod grayscale;
pub mod search;
pub mod summation;
