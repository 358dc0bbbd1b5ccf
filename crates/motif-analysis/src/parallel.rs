//! Fork-join execution over round-robin partitions.
//!
//! Each task owns its partition and returns partition-local results; the
//! caller merges them after the barrier. A failing or panicking task fails
//! the whole phase and the results of the other tasks are dropped.

use std::panic::{catch_unwind, AssertUnwindSafe};

use motif_core::errors::MetricError;
use rayon::prelude::*;

/// Split `items` round-robin into at most `partitions` non-empty partitions.
pub fn partition<T>(items: Vec<T>, partitions: usize) -> Vec<Vec<T>> {
    let count = partitions.max(1).min(items.len().max(1));
    let mut result: Vec<Vec<T>> = (0..count).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        result[i % count].push(item);
    }
    result.retain(|p| !p.is_empty());
    result
}

/// A bounded rayon pool used by one metric or one significance run.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Pool with `level_of_parallelism` threads, or one per available processor.
    pub fn new(level_of_parallelism: Option<usize>) -> Result<Self, MetricError> {
        let threads = level_of_parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("motif-worker-{i}"))
            .build()
            .map_err(|e| MetricError::WorkerPool(e.to_string()))?;
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `task` once per partition of `items` and wait for all of them.
    ///
    /// Results come back in partition order.
    pub fn fork_join<T, R, F>(&self, phase: &str, items: Vec<T>, task: F) -> Result<Vec<R>, MetricError>
    where
        T: Send,
        R: Send,
        F: Fn(Vec<T>) -> Result<R, MetricError> + Sync,
    {
        let partitions = partition(items, self.threads);
        self.pool.install(|| {
            partitions
                .into_par_iter()
                .map(|part| {
                    catch_unwind(AssertUnwindSafe(|| task(part))).unwrap_or_else(|payload| {
                        Err(MetricError::TaskPanicked {
                            phase: phase.to_string(),
                            message: panic_message(payload.as_ref()),
                        })
                    })
                })
                .collect()
        })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
