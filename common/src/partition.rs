//! Break a search into chunks that can be processed independently.
//!
//! **Range semantics**: Range chunks are half-open ranges [start, end). The
//! last chunk of a range search keeps its full width even if that carries it
//! past the requested bound, consumers that must not look past the bound
//! should call `Chunk::clamp_to`.
//!
//! Chunks are produced lazily, so a search over the whole `i64` range with a
//! tiny chunk size never holds more than the chunks a consumer keeps alive.

use crate::SearchTarget;
use crate::error::{Error, Result};
use log::trace;
use std::iter::Copied;
use std::ops::Range;
use std::slice::Iter;

/// A unit of work handed to a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Range { start: i64, end: i64 },
    List(Vec<i64>),
}

impl Chunk {
    /// The number of values in the chunk.
    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            Chunk::Range { start, end } if end > start => end.abs_diff(*start),
            Chunk::Range { .. } => 0,
            Chunk::List(values) => values.len() as u64,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shrink a range chunk so it does not extend past `max`. Lists are unchanged.
    #[must_use]
    pub fn clamp_to(self, max: i64) -> Chunk {
        match self {
            Chunk::Range { start, end } => Chunk::Range {
                start,
                end: end.min(max),
            },
            list @ Chunk::List(_) => list,
        }
    }

    /// Iterate over the values in evaluation order.
    #[must_use]
    pub fn values(&self) -> ChunkValues<'_> {
        match self {
            Chunk::Range { start, end } => ChunkValues::Range(*start..*end),
            Chunk::List(values) => ChunkValues::List(values.iter().copied()),
        }
    }
}

/// Iterator over the values of a chunk.
#[derive(Debug, Clone)]
pub enum ChunkValues<'a> {
    Range(Range<i64>),
    List(Copied<Iter<'a, i64>>),
}

impl Iterator for ChunkValues<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self {
            ChunkValues::Range(range) => range.next(),
            ChunkValues::List(values) => values.next(),
        }
    }
}

/// Lazy iterator over the range chunks of `[0, max)`.
#[derive(Debug, Clone)]
pub struct RangeChunks {
    next_start: i64,
    max: i64,
    step: i64,
}

impl Iterator for RangeChunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.next_start >= self.max {
            return None;
        }
        // the end is not clamped to max
        let start = self.next_start;
        let end = start.saturating_add(self.step);
        self.next_start = end;
        Some(Chunk::Range { start, end })
    }
}

/// Lazy iterator over the chunks of either search mode.
#[derive(Debug, Clone)]
pub enum Chunks {
    Range(RangeChunks),
    List(std::option::IntoIter<Chunk>),
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        match self {
            Chunks::Range(chunks) => chunks.next(),
            Chunks::List(chunks) => chunks.next(),
        }
    }
}

/// Walk `[0, max)` in chunks of `chunk_size`, starting at zero.
/// Each chunk is `chunk_size` in width, including the last one.
///
/// # Errors
/// Returns `InvalidChunkSize` if `chunk_size` is zero or `InvalidBound` if `max` is negative.
pub fn range_chunks(max: i64, chunk_size: u64) -> Result<RangeChunks> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    if max < 0 {
        return Err(Error::InvalidBound(max));
    }
    trace!("Partitioning [0, {max}) into chunks of {chunk_size}");
    Ok(RangeChunks {
        next_start: 0,
        max,
        step: i64::try_from(chunk_size).unwrap_or(i64::MAX),
    })
}

/// Break `[0, max)` into chunks of `chunk_size` and collect them.
///
/// # Errors
/// Returns `InvalidChunkSize` if `chunk_size` is zero or `InvalidBound` if `max` is negative.
pub fn partition_range(max: i64, chunk_size: u64) -> Result<Vec<Chunk>> {
    Ok(range_chunks(max, chunk_size)?.collect())
}

/// Put an explicit list of values into a single chunk, keeping their order.
#[must_use]
pub fn partition_list(values: Vec<i64>) -> Vec<Chunk> {
    vec![Chunk::List(values)]
}

/// Partition a search: a list becomes one chunk, a range is walked lazily.
///
/// # Errors
/// Returns an error if range mode is selected with an invalid bound or chunk size.
pub fn partition(target: &SearchTarget) -> Result<Chunks> {
    match target {
        SearchTarget::Range { max, chunk_size } => {
            Ok(Chunks::Range(range_chunks(*max, *chunk_size)?))
        }
        SearchTarget::List { values } => {
            Ok(Chunks::List(Some(Chunk::List(values.clone())).into_iter()))
        }
    }
}
