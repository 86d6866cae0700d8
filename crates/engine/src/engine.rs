//! Public facade: owns the index lifecycle and answers queries.

use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::indexer;
use crate::ranker::{self, RankedHit};
use crate::search::tokenizer::tokenize;
use crate::search::IndexStore;
use crate::types::{DocumentId, SearchResult, Strategy};

/// Owns a single [`IndexStore`] built from a configured corpus directory.
///
/// Per the concurrency model, an engine is not safe to use from multiple
/// threads at once and queries may not overlap with (re)indexing; callers
/// serialize access by construction.
pub struct SearchEngine {
    config: EngineConfig,
    index: IndexStore,
}

impl SearchEngine {
    /// Construct an engine over `config`'s corpus directory, with an empty
    /// index. Call [`SearchEngine::index_corpus`] to populate it.
    ///
    /// Fails if `config.corpus_dir` names an existing regular file (it must
    /// be a directory, even if it does not yet exist).
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.corpus_dir.is_file() {
            return Err(SearchError::Config(format!(
                "corpus path {} is a file, expected a directory",
                config.corpus_dir.display()
            )));
        }
        Ok(SearchEngine {
            config,
            index: IndexStore::new(),
        })
    }

    /// Populate the index, either from the on-disk cache or by walking the
    /// corpus, per §4.4.
    ///
    /// If `use_cache` is true and a cache exists, it is loaded. A corrupt
    /// cache is not fatal: it is logged and the engine falls back to a
    /// fresh walk. If the corpus yields zero documents, a warning is logged
    /// and the on-disk artifacts (if any) are left untouched.
    pub fn index_corpus(&mut self, use_cache: bool) -> Result<usize> {
        if use_cache && IndexStore::exists_on_disk(&self.config.index_dir) {
            match IndexStore::load(&self.config.index_dir) {
                Ok(index) => {
                    self.index = index;
                    return Ok(self.index.len());
                }
                Err(SearchError::CorruptIndex(reason)) => {
                    tracing::warn!(reason, "on-disk index is corrupt, falling back to a full walk");
                }
                Err(other) => return Err(other),
            }
        }

        let index = indexer::walk_corpus(&self.config.corpus_dir)?;
        if index.is_empty() {
            tracing::warn!(
                corpus = %self.config.corpus_dir.display(),
                "corpus contains no .txt documents, index built empty"
            );
            self.index = index;
            return Ok(0);
        }

        index.save(&self.config.index_dir)?;
        self.index = index;
        Ok(self.index.len())
    }

    /// Discard the current index, in memory and on disk, and rebuild by
    /// walking the corpus from scratch.
    pub fn reindex(&mut self) -> Result<usize> {
        self.index_corpus(false)
    }

    /// Number of indexed documents.
    pub fn index_size(&self) -> usize {
        self.index.len()
    }

    /// Filesystem path of a known document.
    pub fn document_path(&self, document_id: DocumentId) -> Result<&std::path::Path> {
        self.index.document_path(document_id)
    }

    /// Tokenize `query`, rank candidates under `strategy`, and assemble
    /// results with their stored occurrences.
    ///
    /// An empty query (tokenizes to no stems) returns an empty sequence.
    pub fn search(&self, query: &str, strategy: Strategy) -> Vec<SearchResult> {
        let query_stems = tokenize(query);
        if query_stems.is_empty() {
            tracing::debug!(query, "query tokenized to no stems, returning no results");
            return Vec::new();
        }

        let hits = ranker::rank(&self.index, &query_stems, strategy);
        tracing::debug!(candidates = hits.len(), ?strategy, "ranked query");

        hits.into_iter()
            .filter_map(|hit: RankedHit| {
                let occurrences = self
                    .index
                    .occurrences(hit.document_id, &hit.query_term.stemmed)?
                    .clone();
                Some(SearchResult {
                    query_term: hit.query_term,
                    document_id: hit.document_id,
                    relevance_score: hit.score,
                    occurrences,
                })
            })
            .collect()
    }
}
