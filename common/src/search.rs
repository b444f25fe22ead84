//! Run a complete search: partition, schedule, wait, collect.
//!
//! Chunks are pulled from the partitioner one at a time and only a small
//! window of them is in flight at once, so memory stays flat no matter how
//! many chunks a range produces.

use crate::aggregator::ResultAggregator;
use crate::base_codec::Base;
use crate::error::Result;
use crate::partition;
use crate::scheduler::{ChunkReport, Task, TaskScheduler};
use crate::{SearchRequest, SearchResults, SearchTarget};
use log::{debug, warn};
use std::collections::VecDeque;

/// Tasks kept in flight per worker thread.
pub const TASKS_PER_THREAD: usize = 4;

/// Running totals folded from chunk reports as they complete.
#[derive(Debug, Default)]
struct Tally {
    chunks: usize,
    aborted_chunks: usize,
    evaluated: u64,
}

impl Tally {
    fn record(&mut self, report: &ChunkReport) {
        self.chunks += 1;
        self.evaluated += report.evaluated;
        if report.is_aborted() {
            self.aborted_chunks += 1;
        }
    }
}

/// Run a search and compile the results.
///
/// In range mode every chunk is clamped to `max`, so no value at or above
/// the bound is ever evaluated. Chunks that stop early are logged and counted
/// in `aborted_chunks` but do not fail the search.
///
/// # Errors
/// Returns an error for an invalid bound or chunk size, or if the worker pool
/// could not be started.
pub fn run_search(request: &SearchRequest) -> Result<SearchResults> {
    let base = request.base;
    let bound = match &request.target {
        SearchTarget::Range { max, .. } => *max,
        SearchTarget::List { .. } => i64::MAX,
    };
    let chunks = partition::partition(&request.target)?.map(|chunk| chunk.clamp_to(bound));

    let aggregator = ResultAggregator::new();
    let scheduler = TaskScheduler::new(base, aggregator.sink(), request.threads)?;
    let window = scheduler.thread_count() * TASKS_PER_THREAD;
    debug!(
        "Searching base {base} on {} threads with up to {window} chunks in flight",
        scheduler.thread_count()
    );

    let mut tally = Tally::default();
    let mut in_flight: VecDeque<Task> = VecDeque::with_capacity(window);
    for chunk in chunks {
        if in_flight.len() >= window {
            if let Some(oldest) = in_flight.pop_front() {
                tally.record(&oldest.wait());
            }
        }
        in_flight.push_back(scheduler.submit(chunk));
    }
    for report in TaskScheduler::await_all(in_flight.into()) {
        tally.record(&report);
    }

    debug!("Evaluated {} values in {} chunks", tally.evaluated, tally.chunks);
    if tally.aborted_chunks > 0 {
        warn!(
            "{} of {} chunks stopped early, results may be incomplete",
            tally.aborted_chunks, tally.chunks
        );
    }

    Ok(SearchResults {
        base,
        target: request.target.clone(),
        numbers: aggregator.drain_sorted(),
        chunks: tally.chunks,
        aborted_chunks: tally.aborted_chunks,
        evaluated: tally.evaluated,
    })
}

/// Find every narcissistic number in `[0, max)`, in ascending order.
///
/// # Errors
/// Returns an error for an invalid base, negative `max` or zero `chunk_size`.
pub fn compute_range(max: i64, base: u32, chunk_size: u64) -> Result<Vec<i64>> {
    let request = SearchRequest {
        base: Base::new(base)?,
        target: SearchTarget::Range { max, chunk_size },
        threads: 0,
    };
    Ok(run_search(&request)?.numbers)
}

/// Find which of the given values are narcissistic, in ascending order.
///
/// # Errors
/// Returns an error for an invalid base.
pub fn compute_list(values: &[i64], base: u32) -> Result<Vec<i64>> {
    let request = SearchRequest {
        base: Base::new(base)?,
        target: SearchTarget::List {
            values: values.to_vec(),
        },
        threads: 0,
    };
    Ok(run_search(&request)?.numbers)
}
