//! In-memory inverted index and its on-disk serialization.
//!
//! Three maps, per the data model:
//! - `documents`: document ID -> path (bijective)
//! - `term_occurrences`: document ID -> term -> ordered occurrences
//! - `term_documents`: term -> set of document IDs containing it
//!
//! The on-disk layout is three JSON files written to a configured
//! directory: `documents.json`, `term_occurrences.json`, and
//! `term_documents.json`. The engine is single-threaded and non-concurrent
//! (see the design's concurrency model) so this store carries no internal
//! locking; callers serialize access by construction.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::types::{DocumentId, Occurrence, Stem};

const DOCUMENTS_FILE: &str = "documents.json";
const TERM_OCCURRENCES_FILE: &str = "term_occurrences.json";
const TERM_DOCUMENTS_FILE: &str = "term_documents.json";

/// The shape an [`Occurrence`] takes in `term_occurrences.json`: the term
/// and document ID are implied by the surrounding map keys, so only line,
/// column, and surface form are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedOccurrence {
    line: usize,
    index: usize,
    original: String,
}

/// The in-memory inverted index.
#[derive(Debug, Default)]
pub struct IndexStore {
    documents: HashMap<DocumentId, PathBuf>,
    term_occurrences: HashMap<DocumentId, HashMap<String, Vec<Occurrence>>>,
    term_documents: HashMap<String, HashSet<DocumentId>>,
    next_document_id: DocumentId,
}

impl IndexStore {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True iff no documents have been indexed.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Path of a known document, or `ConfigError` if the ID is unknown.
    pub fn document_path(&self, document_id: DocumentId) -> Result<&Path> {
        self.documents
            .get(&document_id)
            .map(PathBuf::as_path)
            .ok_or_else(|| SearchError::Config(format!("unknown document id {document_id}")))
    }

    /// Document IDs that contain `term`, or `None` if the term is unknown.
    pub fn documents_containing(&self, term: &str) -> Option<&HashSet<DocumentId>> {
        self.term_documents.get(term)
    }

    /// Occurrences of `term` within `document_id`, or `None` if absent.
    pub fn occurrences(&self, document_id: DocumentId, term: &str) -> Option<&Vec<Occurrence>> {
        self.term_occurrences.get(&document_id)?.get(term)
    }

    /// Number of distinct terms indexed for `document_id`.
    pub fn distinct_term_count(&self, document_id: DocumentId) -> usize {
        self.term_occurrences
            .get(&document_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    /// Number of documents containing `term` (document frequency).
    pub fn document_frequency(&self, term: &str) -> usize {
        self.term_documents.get(term).map(HashSet::len).unwrap_or(0)
    }

    /// Total number of indexed documents.
    pub fn total_documents(&self) -> usize {
        self.documents.len()
    }

    /// Assign the next document ID to `path` and record every stem produced
    /// by tokenizing each of its lines.
    ///
    /// `stems_per_line[i]` holds the stems for line `i` of the document (in
    /// increasing column order, per the tokenizer's contract).
    pub fn add_document(&mut self, path: PathBuf, stems_per_line: Vec<Vec<Stem>>) -> DocumentId {
        let document_id = self.next_document_id;
        self.next_document_id += 1;

        let mut by_term: HashMap<String, Vec<Occurrence>> = HashMap::new();
        for (line, stems) in stems_per_line.into_iter().enumerate() {
            for stem in stems {
                let term = stem.stemmed.clone();
                let occurrence = Occurrence::from_stem(stem, document_id, line);
                by_term.entry(term).or_default().push(occurrence);
            }
        }

        for term in by_term.keys() {
            self.term_documents
                .entry(term.clone())
                .or_default()
                .insert(document_id);
        }

        self.documents.insert(document_id, path);
        self.term_occurrences.insert(document_id, by_term);
        document_id
    }

    /// True iff all three on-disk artifacts are present under `dir`.
    pub fn exists_on_disk(dir: &Path) -> bool {
        dir.join(DOCUMENTS_FILE).is_file()
            && dir.join(TERM_OCCURRENCES_FILE).is_file()
            && dir.join(TERM_DOCUMENTS_FILE).is_file()
    }

    /// Write all three JSON artifacts to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let documents: HashMap<String, DocumentId> = self
            .documents
            .iter()
            .map(|(id, path)| (path.to_string_lossy().into_owned(), *id))
            .collect();
        write_json(&dir.join(DOCUMENTS_FILE), &documents)?;

        let term_occurrences: HashMap<String, HashMap<String, Vec<PersistedOccurrence>>> = self
            .term_occurrences
            .iter()
            .map(|(doc_id, terms)| {
                let terms = terms
                    .iter()
                    .map(|(term, occs)| {
                        let persisted = occs
                            .iter()
                            .map(|o| PersistedOccurrence {
                                line: o.line,
                                index: o.index,
                                original: o.original.clone(),
                            })
                            .collect();
                        (term.clone(), persisted)
                    })
                    .collect();
                (doc_id.to_string(), terms)
            })
            .collect();
        write_json(&dir.join(TERM_OCCURRENCES_FILE), &term_occurrences)?;

        let term_documents: HashMap<String, Vec<DocumentId>> = self
            .term_documents
            .iter()
            .map(|(term, docs)| (term.clone(), docs.iter().copied().collect()))
            .collect();
        write_json(&dir.join(TERM_DOCUMENTS_FILE), &term_documents)?;

        Ok(())
    }

    /// Reconstruct an index from the three JSON artifacts under `dir`,
    /// validating invariants I1-I3. Fails with [`SearchError::CorruptIndex`]
    /// if the artifacts are internally inconsistent.
    pub fn load(dir: &Path) -> Result<Self> {
        let documents: HashMap<String, DocumentId> = read_json(&dir.join(DOCUMENTS_FILE))?;
        let term_occurrences: HashMap<String, HashMap<String, Vec<PersistedOccurrence>>> =
            read_json(&dir.join(TERM_OCCURRENCES_FILE))?;
        let term_documents: HashMap<String, Vec<DocumentId>> =
            read_json(&dir.join(TERM_DOCUMENTS_FILE))?;

        let mut store = IndexStore::new();

        let mut by_id: HashMap<DocumentId, PathBuf> = HashMap::new();
        for (path, id) in documents {
            if by_id.insert(id, PathBuf::from(path)).is_some() {
                return Err(SearchError::CorruptIndex(format!(
                    "document id {id} assigned to more than one path"
                )));
            }
        }
        store.next_document_id = by_id.keys().copied().map(|id| id + 1).max().unwrap_or(0);
        store.documents = by_id;

        for (doc_id_str, terms) in term_occurrences {
            let doc_id: DocumentId = doc_id_str.parse().map_err(|_| {
                SearchError::CorruptIndex(format!("non-numeric document id {doc_id_str:?}"))
            })?;
            if !store.documents.contains_key(&doc_id) {
                return Err(SearchError::CorruptIndex(format!(
                    "term_occurrences references unknown document {doc_id}"
                )));
            }
            let mut rebuilt: HashMap<String, Vec<Occurrence>> = HashMap::new();
            for (term, persisted) in terms {
                let occurrences = persisted
                    .into_iter()
                    .map(|p| Occurrence {
                        index: p.index,
                        original: p.original,
                        stemmed: term.clone(),
                        document_id: doc_id,
                        line: p.line,
                    })
                    .collect();
                rebuilt.insert(term, occurrences);
            }
            store.term_occurrences.insert(doc_id, rebuilt);
        }
        // I3: every known document has an entry, possibly empty.
        for doc_id in store.documents.keys() {
            store.term_occurrences.entry(*doc_id).or_default();
        }

        for (term, doc_ids) in term_documents {
            let mut set = HashSet::new();
            for doc_id in doc_ids {
                if !set.insert(doc_id) {
                    return Err(SearchError::CorruptIndex(format!(
                        "term_documents[{term:?}] lists document {doc_id} more than once"
                    )));
                }
                let has_occurrences = store
                    .term_occurrences
                    .get(&doc_id)
                    .and_then(|terms| terms.get(&term))
                    .map(|occs| !occs.is_empty())
                    .unwrap_or(false);
                if !has_occurrences {
                    return Err(SearchError::CorruptIndex(format!(
                        "term_documents[{term:?}] lists document {doc_id} with no backing occurrences"
                    )));
                }
            }
            store.term_documents.insert(term, set);
        }

        // I1 (forward direction): every non-empty occurrence list has a
        // matching term_documents entry.
        for (doc_id, terms) in &store.term_occurrences {
            for (term, occs) in terms {
                if occs.is_empty() {
                    continue;
                }
                let listed = store
                    .term_documents
                    .get(term)
                    .map(|docs| docs.contains(doc_id))
                    .unwrap_or(false);
                if !listed {
                    return Err(SearchError::CorruptIndex(format!(
                        "document {doc_id} has occurrences for {term:?} not listed in term_documents"
                    )));
                }
            }
        }

        Ok(store)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, value).map_err(|source| SearchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SearchError::Json {
        path: path.to_path_buf(),
        source,
    })
}
