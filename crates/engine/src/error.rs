//! Error types for the search engine.
//!
//! One variant per error kind named in the design: configuration mistakes,
//! I/O failures, and corrupt on-disk index state. `EmptyCorpusWarning` is
//! deliberately not a variant here — an empty corpus is not an error, it is
//! logged and surfaced as `Ok(0)` from `index_corpus`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the search engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A configuration problem: a bad corpus path, or a request for an
    /// unknown document ID.
    #[error("config error: {0}")]
    Config(String),

    /// Failure reading a corpus file or reading/writing an index file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted index artifact failed to parse as JSON.
    #[error("failed to parse index artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A persisted index loaded successfully as JSON but violates the
    /// index's invariants (I1-I3).
    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
