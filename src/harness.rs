//! The benchmark harness: sequential and parallel execution of a batch of
//! independent work items.
//!
//! The compute function must be pure with respect to the batch: it reads
//! only the item it was given and touches no state shared with other items.
//! That purity is a contract, not something the harness can check, and it
//! is what makes the lock-free result placement below correct. Workers own
//! disjoint result slots for the lifetime of a run, so the result container
//! needs no locking.
//!
//! Timing: `RunReport::total` wraps the whole run, fan-out to join. Worker
//! thread startup is inside the measured section for every strategy, so the
//! strategies stay comparable with each other.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::{HarnessConfig, Partition};
use crate::error::{ConfigError, HarnessError, ItemError};
use crate::report::{ItemResult, RunReport};

/// Lifts a plain function into the fallible compute signature the harness
/// expects. Handy for compute functions that cannot fail.
pub fn infallible<T, R, F>(f: F) -> impl Fn(&T) -> Result<R, ItemError>
where
    F: Fn(&T) -> R,
{
    move |item| Ok(f(item))
}

/// Runs the batch on the calling thread, in index order.
///
/// Side effects performed by `compute` happen in a deterministic order,
/// which is why callers with external effects (file writes keyed by item)
/// get a reproducible sequential baseline.
pub fn run_sequential<T, R, F>(batch: &[T], compute: F) -> Result<RunReport<R>, HarnessError>
where
    F: Fn(&T) -> Result<R, ItemError>,
{
    if batch.is_empty() {
        return Err(ConfigError::EmptyBatch.into());
    }
    let start = Instant::now();
    let results = batch
        .iter()
        .enumerate()
        .map(|(index, item)| run_one(index, item, &compute, None))
        .collect();
    finish(results, start.elapsed())
}

/// Runs the batch across `config.worker_count` workers and returns results
/// in batch index order, whatever order the workers finished in.
///
/// The calling thread blocks on a single join point; no partial results are
/// observable mid-run. With a timeout configured, items not started by the
/// deadline are marked failed with [`ItemError::Timeout`]; items already
/// running finish normally.
pub fn run_parallel<T, R, F>(
    batch: &[T],
    compute: F,
    config: &HarnessConfig,
) -> Result<RunReport<R>, HarnessError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, ItemError> + Sync,
{
    config.validate(batch.len())?;
    // Spawning more workers than items buys nothing; efficiency is still
    // reported against the configured count.
    let workers = config.worker_count.min(batch.len());
    let deadline = config.timeout.map(|t| Instant::now() + t);

    let start = Instant::now();
    let results = match config.partition {
        Partition::Contiguous => contiguous(batch, &compute, workers, deadline),
        Partition::Chunked { chunk_size } => {
            chunked(batch, &compute, workers, chunk_size, deadline)
        }
        Partition::WorkStealing => work_stealing(batch, &compute, workers, deadline)?,
    };
    finish(results, start.elapsed())
}

fn run_one<T, R, F>(
    index: usize,
    item: &T,
    compute: &F,
    deadline: Option<Instant>,
) -> ItemResult<R>
where
    F: Fn(&T) -> Result<R, ItemError>,
{
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            return ItemResult {
                index,
                outcome: Err(ItemError::Timeout),
                elapsed: Duration::ZERO,
            };
        }
    }
    let start = Instant::now();
    let outcome = compute(item);
    ItemResult {
        index,
        outcome,
        elapsed: start.elapsed(),
    }
}

fn finish<R>(results: Vec<ItemResult<R>>, total: Duration) -> Result<RunReport<R>, HarnessError> {
    if results.iter().all(|r| r.outcome.is_err()) {
        return Err(HarnessError::AllItemsFailed(results.len()));
    }
    Ok(RunReport { results, total })
}

/// One contiguous index block per worker. The result buffer is split with
/// `chunks_mut`, so each worker holds an exclusive borrow of its own slots
/// and the writes need no synchronization.
fn contiguous<T, R, F>(
    batch: &[T],
    compute: &F,
    workers: usize,
    deadline: Option<Instant>,
) -> Vec<ItemResult<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, ItemError> + Sync,
{
    let block = (batch.len() + workers - 1) / workers;
    let mut slots: Vec<Option<ItemResult<R>>> = (0..batch.len()).map(|_| None).collect();

    thread::scope(|scope| {
        for (block_index, (items, out)) in
            batch.chunks(block).zip(slots.chunks_mut(block)).enumerate()
        {
            let base = block_index * block;
            scope.spawn(move || {
                for (offset, (item, slot)) in items.iter().zip(out.iter_mut()).enumerate() {
                    *slot = Some(run_one(base + offset, item, compute, deadline));
                }
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| slot.expect("contiguous split covers every index"))
        .collect()
}

/// Dynamic load balancing: workers pull `chunk_size` indices at a time from
/// a shared cursor, so a worker stuck on an expensive item does not leave
/// the rest of its range waiting. Results come back over a channel and are
/// re-placed by index.
fn chunked<T, R, F>(
    batch: &[T],
    compute: &F,
    workers: usize,
    chunk_size: usize,
    deadline: Option<Instant>,
) -> Vec<ItemResult<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, ItemError> + Sync,
{
    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            scope.spawn(move || loop {
                let begin = cursor.fetch_add(chunk_size, Ordering::Relaxed);
                if begin >= batch.len() {
                    break;
                }
                let end = (begin + chunk_size).min(batch.len());
                for (index, item) in (begin..end).zip(&batch[begin..end]) {
                    if tx.send(run_one(index, item, compute, deadline)).is_err() {
                        return;
                    }
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<ItemResult<R>>> = (0..batch.len()).map(|_| None).collect();
    for result in rx {
        let index = result.index;
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| slot.expect("cursor dispatches every index exactly once"))
        .collect()
}

/// Rayon's work-stealing scheduler on a pool sized to the worker count.
/// The indexed `collect` returns results in batch order.
fn work_stealing<T, R, F>(
    batch: &[T],
    compute: &F,
    workers: usize,
    deadline: Option<Instant>,
) -> Result<Vec<ItemResult<R>>, HarnessError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, ItemError> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| HarnessError::Pool(e.to_string()))?;

    Ok(pool.install(|| {
        batch
            .par_iter()
            .enumerate()
            .map(|(index, item)| run_one(index, item, compute, deadline))
            .collect()
    }))
}
