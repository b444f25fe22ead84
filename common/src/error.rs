//! Error types for the library.

use thiserror::Error;

/// Error type for codec, partitioning and scheduling operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Base outside of 2..=36
    #[error("Base must be between 2 and 36, got {0}")]
    InvalidBase(u32),

    /// A character that is not a digit in the requested base
    #[error("Invalid character {character:?} for base {base}")]
    InvalidDigitCharacter { character: char, base: u32 },

    /// A digit value with no character representation
    #[error("Digit value {0} has no character representation")]
    InvalidDigitValue(u32),

    /// A chunk stopped early because a value could not be evaluated
    #[error("Chunk {chunk} aborted at value {value}: {source}")]
    EvaluationAborted {
        chunk: usize,
        value: i64,
        #[source]
        source: Box<Error>,
    },

    /// A worker went away without reporting on its chunk
    #[error("Worker for chunk {chunk} exited without a report")]
    WorkerLost { chunk: usize },

    #[error("Chunk size must be positive")]
    InvalidChunkSize,

    #[error("Upper bound must be non-negative, got {0}")]
    InvalidBound(i64),

    #[error("No digits to parse")]
    EmptyInput,

    #[error("Value does not fit in a signed 64-bit integer")]
    ValueOutOfRange,

    /// The worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;
