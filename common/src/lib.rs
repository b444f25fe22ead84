//! A library with common utilities for finding narcissistic numbers.
//!
//! A number is narcissistic in base b if the sum of its base-b digits, each
//! raised to the number of digits, is equal to the number itself. For example
//! 153 is narcissistic in base 10 because 1^3 + 5^3 + 3^3 = 153.

#![warn(clippy::all, clippy::pedantic)]

pub mod aggregator;
pub mod base_codec;
pub mod error;
pub mod narcissism;
pub mod partition;
pub mod scheduler;
pub mod search;

pub use base_codec::{Base, format, parse};
pub use error::{Error, Result};
pub use search::{compute_list, compute_range, run_search};

use serde::{Deserialize, Serialize};

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base used when none is requested.
pub const DEFAULT_BASE: u32 = 10;
/// Exclusive upper bound used for range searches when none is requested.
pub const DEFAULT_MAX: i64 = 100_000;
/// Number of values handed to each job in a range search.
pub const DEFAULT_CHUNK_SIZE: u64 = 100;

/// What to search: every value below a bound, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTarget {
    /// Every value in `[0, max)`, split into chunks of `chunk_size`.
    Range { max: i64, chunk_size: u64 },
    /// Only the listed values, in a single chunk.
    List { values: Vec<i64> },
}

/// A complete search request. Used as input for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Validated on deserialize, so a request can never carry a bad base.
    pub base: Base,
    pub target: SearchTarget,
    /// Worker pool size, zero picks the available parallelism.
    pub threads: usize,
}

/// The compiled results of a search, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub base: Base,
    pub target: SearchTarget,
    /// Narcissistic numbers in ascending order.
    pub numbers: Vec<i64>,
    pub chunks: usize,
    pub aborted_chunks: usize,
    pub evaluated: u64,
}
