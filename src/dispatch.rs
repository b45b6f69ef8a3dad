use crate::classify::Classifier;
use crate::error::Result;
use crate::types::{ClassificationResult, SequenceRecord};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Number of hardware threads, 1 if it cannot be detected
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

/// Clamps a requested worker count to the available parallelism
pub fn effective_workers(requested: usize) -> usize {
    let available = available_workers();
    let workers = requested.min(available).max(1);
    if requested > available {
        log::warn!(
            "Requested workers ({requested}) greater than available parallelism ({available}); using {workers}"
        );
    }
    workers
}

/// Fixed-size pool that maps a function over a fallible stream of items
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Creates a pool with `min(requested, available parallelism)` threads
    ///
    /// # Errors
    /// * Returns `MotifError::ThreadPool` if the thread pool cannot be built
    pub fn new(requested: usize) -> Result<Self> {
        let workers = effective_workers(requested);
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        log::debug!("worker pool started with {workers} threads");
        Ok(WorkerPool { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Applies `f` to every item of `items` on the pool and returns all outputs.
    ///
    /// Items are pulled from the iterator as workers become free, so the input
    /// is never collected up front. Output order is unspecified. The first
    /// `Err` from the stream stops the map and is returned; nothing is skipped.
    pub fn try_map<I, T, U, F>(&self, items: I, f: F) -> Result<Vec<U>>
    where
        I: IntoIterator<Item = Result<T>>,
        I::IntoIter: Send,
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync + Send,
    {
        let items = items.into_iter();
        self.pool
            .install(|| items.par_bridge().map(|item| item.map(&f)).collect())
    }
}

/// Classifies every record from `records` using up to `workers` threads.
///
/// # Arguments
/// * `records` - Record stream, e.g. a [`crate::fasta::FastaReader`]
/// * `classifier` - Motif families shared by all workers
/// * `workers` - Requested worker count, clamped to the available parallelism
///
/// # Returns
/// * `Result<Vec<ClassificationResult>>` - One result per input record, in no
///   particular order
///
/// # Errors
/// * Propagates the first error yielded by `records`; the scan is aborted
pub fn classify_records<I>(
    records: I,
    classifier: &Classifier,
    workers: usize,
) -> Result<Vec<ClassificationResult>>
where
    I: IntoIterator<Item = Result<SequenceRecord>>,
    I::IntoIter: Send,
{
    let pool = WorkerPool::new(workers)?;
    let results = pool.try_map(records, |record| classifier.classify_record(record))?;
    log::debug!(
        "classified {} records on {} workers",
        results.len(),
        pool.workers()
    );
    Ok(results)
}
