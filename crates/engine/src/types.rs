//! Core data types shared across the search engine.
//!
//! Mirrors the Stem / Occurrence / Document model: a `Stem` is what the
//! tokenizer emits for one surface word in one line; an `Occurrence` is a
//! `Stem` once it has been attributed to a specific document.

use serde::{Deserialize, Serialize};

/// Integer document identifier, assigned in the order the indexer first
/// encounters a file. Dense (0..N) for a freshly built index; unique but not
/// necessarily dense after a reload.
pub type DocumentId = u32;

/// A stemmed word found at a specific column within a single line.
///
/// Produced by the tokenizer for both documents (one per line) and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stem {
    /// 0-based column of `original` within the line it was found on.
    pub index: usize,
    /// The surface word exactly as it appeared, punctuation already trimmed.
    pub original: String,
    /// The Porter-stemmed term.
    pub stemmed: String,
}

/// A `Stem` attributed to a specific document and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// 0-based column of `original` within `line`.
    pub index: usize,
    /// The surface word exactly as it appeared.
    pub original: String,
    /// The Porter-stemmed term. Always equal to the `term` key this
    /// occurrence is stored under (invariant I2 of the index).
    pub stemmed: String,
    /// Document this occurrence belongs to.
    pub document_id: DocumentId,
    /// 0-based line number within the document.
    pub line: usize,
}

impl Occurrence {
    /// Attach document and line context to a bare `Stem`.
    pub fn from_stem(stem: Stem, document_id: DocumentId, line: usize) -> Self {
        Occurrence {
            index: stem.index,
            original: stem.original,
            stemmed: stem.stemmed,
            document_id,
            line,
        }
    }
}

/// Candidate-set strategy for combining query terms across documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Only documents containing every query term are candidates.
    And,
    /// Every `(term, document)` pair in which the term occurs is a
    /// candidate, counted once per term (no cross-term deduplication).
    Or,
}

/// One ranked hit: a single query term matched in a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The query stem that produced this hit.
    pub query_term: Stem,
    /// The document this hit is in.
    pub document_id: DocumentId,
    /// TF-IDF relevance score for `(query_term.stemmed, document_id)`.
    pub relevance_score: f64,
    /// All occurrences of `query_term.stemmed` in `document_id`, in
    /// document order.
    pub occurrences: Vec<Occurrence>,
}
