use std::path::PathBuf;

use thiserror::Error;

use crate::config::Partition;

/// Errors that can occur while building the spacing dataset.
#[derive(Debug, Error)]
pub enum SpacingError {
    /// The line source of a partition could not be opened.
    #[error("{partition} source unavailable at {path:?}: {source}")]
    SourceUnavailable {
        /// Partition whose source is missing.
        partition: Partition,
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be read or is not valid UTF-8.
    #[error("failed to decode line {line}: {source}")]
    Decode {
        /// 1-based line number within the partition.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Unknown dataset variant name.
    #[error("unknown dataset variant: {0:?} (expected \"default\" or \"small\")")]
    UnknownVariant(String),

    /// Unknown label symbol or index.
    #[error("unknown spacing label: {0}")]
    UnknownLabel(String),

    /// A tag sequence violates the BIES scheme.
    #[error("invalid tag sequence at position {position}: {reason}")]
    InvalidTagSequence {
        /// Position of the offending tag.
        position: usize,
        /// What went wrong.
        reason: String,
    },

    /// Tokens and tags are not aligned.
    #[error("length mismatch: {tokens} tokens but {tags} tags")]
    LengthMismatch {
        /// Number of tokens.
        tokens: usize,
        /// Number of tags.
        tags: usize,
    },

    /// Explicit data files were given for only some partitions.
    #[error("data files must name every partition, missing {0}")]
    IncompleteDataFiles(Partition),
}

/// Result type alias for spacing dataset operations.
pub type Result<T> = std::result::Result<T, SpacingError>;
