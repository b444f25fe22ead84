//! Run chunks concurrently and wait for them to finish.
//!
//! Every submitted chunk becomes one job on a bounded rayon pool, so the
//! number of threads never depends on how many chunks a search produces.
//! Each job signals its `Task` through a one-shot channel when it is done,
//! and `await_all` blocks on those channels rather than polling.

use crate::aggregator::ResultSink;
use crate::base_codec::Base;
use crate::error::{Error, Result};
use crate::narcissism;
use crate::partition::Chunk;
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use log::{debug, error, trace, warn};
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a job found out about its chunk.
#[derive(Debug)]
pub struct ChunkReport {
    pub chunk: usize,
    /// Values evaluated before the chunk finished or stopped.
    pub evaluated: u64,
    pub hits: u64,
    /// Set if the chunk stopped early.
    pub aborted: Option<Error>,
}

impl ChunkReport {
    #[must_use]
    pub fn new(chunk: usize) -> Self {
        Self {
            chunk,
            evaluated: 0,
            hits: 0,
            aborted: None,
        }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    fn lost(chunk: usize) -> Self {
        Self {
            aborted: Some(Error::WorkerLost { chunk }),
            ..Self::new(chunk)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Complete,
}

/// A handle to one submitted job. Once complete it stays complete.
#[derive(Debug)]
pub struct Task {
    chunk: usize,
    receiver: Receiver<ChunkReport>,
    report: Option<ChunkReport>,
}

impl Task {
    #[must_use]
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// Check on the job without blocking.
    pub fn poll(&mut self) -> TaskStatus {
        if self.report.is_none() {
            match self.receiver.try_recv() {
                Ok(report) => self.report = Some(report),
                Err(TryRecvError::Empty) => return TaskStatus::Running,
                Err(TryRecvError::Disconnected) => {
                    self.report = Some(ChunkReport::lost(self.chunk));
                }
            }
        }
        TaskStatus::Complete
    }

    /// Block until the job is complete and take its report.
    #[must_use]
    pub fn wait(self) -> ChunkReport {
        if let Some(report) = self.report {
            return report;
        }
        self.receiver
            .recv()
            .unwrap_or_else(|_| ChunkReport::lost(self.chunk))
    }
}

/// Evaluate every value of a chunk in order, sending hits to the sink.
/// Stops at the first value that cannot be evaluated.
pub fn scan_chunk<F>(
    chunk_index: usize,
    chunk: &Chunk,
    sink: &ResultSink,
    mut evaluate: F,
) -> ChunkReport
where
    F: FnMut(i64) -> Result<bool>,
{
    let mut report = ChunkReport::new(chunk_index);
    for value in chunk.values() {
        match evaluate(value) {
            Ok(is_hit) => {
                report.evaluated += 1;
                if is_hit {
                    sink.add(value);
                    report.hits += 1;
                }
            }
            Err(source) => {
                warn!("Chunk {chunk_index} stopped at value {value}: {source}");
                report.aborted = Some(Error::EvaluationAborted {
                    chunk: chunk_index,
                    value,
                    source: Box::new(source),
                });
                break;
            }
        }
    }
    trace!(
        "Chunk {chunk_index}: evaluated {} of {} values, {} hits",
        report.evaluated,
        chunk.len(),
        report.hits
    );
    report
}

/// Launches jobs on a bounded worker pool.
#[derive(Debug)]
pub struct TaskScheduler {
    pool: rayon::ThreadPool,
    base: Base,
    sink: ResultSink,
    submitted: AtomicUsize,
}

impl TaskScheduler {
    /// Create a scheduler with a pool of `num_threads` workers.
    /// Zero lets rayon pick the available parallelism.
    ///
    /// # Errors
    /// Returns `ThreadPool` if the pool could not be started.
    pub fn new(base: Base, sink: ResultSink, num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("narcissus-worker-{i}"))
            .panic_handler(|_| error!("A worker panicked, its chunk will be reported as lost"))
            .build()?;
        debug!("Started worker pool with {} threads", pool.current_num_threads());

        Ok(Self {
            pool,
            base,
            sink,
            submitted: AtomicUsize::new(0),
        })
    }

    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run an arbitrary job on the pool, tracked by a `Task`.
    pub fn spawn<F>(&self, chunk: usize, job: F) -> Task
    where
        F: FnOnce() -> ChunkReport + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        self.pool.spawn(move || {
            // the task may have been dropped without waiting
            let _ = sender.send(job());
        });
        Task {
            chunk,
            receiver,
            report: None,
        }
    }

    /// Start checking every value in the chunk for narcissism.
    pub fn submit(&self, chunk: Chunk) -> Task {
        let index = self.submitted.fetch_add(1, Ordering::Relaxed);
        let base = self.base;
        let sink = self.sink.clone();
        self.spawn(index, move || {
            scan_chunk(index, &chunk, &sink, |value| {
                narcissism::is_narcissistic_in(value, base)
            })
        })
    }

    /// Block until every task is complete. Reports come back in the order given.
    #[must_use]
    pub fn await_all(tasks: Vec<Task>) -> Vec<ChunkReport> {
        tasks.into_iter().map(Task::wait).collect()
    }
}
