//! Engine configuration.
//!
//! The reference implementation reads and writes its three JSON artifacts in
//! the process's current working directory and takes only a corpus path. §9
//! of the design asks for that to be explicit instead of ambient, so both
//! directories are threaded through `EngineConfig` rather than assumed.

use std::path::PathBuf;

/// Configuration for a [`crate::engine::SearchEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory recursively scanned for `*.txt` documents.
    pub corpus_dir: PathBuf,
    /// Directory holding `documents.json`, `term_occurrences.json`, and
    /// `term_documents.json`.
    pub index_dir: PathBuf,
}

impl EngineConfig {
    /// Build a config with the index artifacts stored alongside the corpus.
    pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
        let corpus_dir = corpus_dir.into();
        let index_dir = corpus_dir.clone();
        EngineConfig {
            corpus_dir,
            index_dir,
        }
    }

    /// Store the index artifacts under a directory distinct from the corpus.
    pub fn with_index_dir(mut self, index_dir: impl Into<PathBuf>) -> Self {
        self.index_dir = index_dir.into();
        self
    }
}
