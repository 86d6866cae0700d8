//! Turns query stems into a ranked set of `(stem, document, score)` hits.
//!
//! Candidate selection depends on [`Strategy`]: AND intersects document sets
//! across every query term, OR enumerates each `(term, document)` pair
//! independently with no cross-term deduplication. Scoring is TF-IDF, with
//! the TF denominator deliberately the distinct-term count of the document
//! rather than its total token count (see the design notes on this).

use std::collections::HashSet;

use crate::search::IndexStore;
use crate::types::{DocumentId, Stem, Strategy};

/// One candidate hit before occurrences are attached: a query stem scored
/// against a single document.
#[derive(Debug, Clone)]
pub struct RankedHit {
    pub query_term: Stem,
    pub document_id: DocumentId,
    pub score: f64,
}

/// Score and order `query_stems` against `index` under `strategy`.
///
/// Returns hits sorted by descending score; ties keep the order
/// `rank` produced them in (stable sort), since the contract leaves
/// tie-breaking unspecified.
pub fn rank(index: &IndexStore, query_stems: &[Stem], strategy: Strategy) -> Vec<RankedHit> {
    if query_stems.is_empty() {
        return Vec::new();
    }

    let mut hits = match strategy {
        Strategy::And => rank_and(index, query_stems),
        Strategy::Or => rank_or(index, query_stems),
    };

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

fn rank_and(index: &IndexStore, query_stems: &[Stem]) -> Vec<RankedHit> {
    let mut candidate_docs: Option<HashSet<DocumentId>> = None;
    for stem in query_stems {
        let docs = index
            .documents_containing(&stem.stemmed)
            .cloned()
            .unwrap_or_default();
        candidate_docs = Some(match candidate_docs {
            None => docs,
            Some(existing) => existing.intersection(&docs).copied().collect(),
        });
    }
    let candidate_docs = candidate_docs.unwrap_or_default();

    let mut hits = Vec::new();
    for stem in query_stems {
        for &document_id in &candidate_docs {
            if let Some(score) = score(index, &stem.stemmed, document_id) {
                hits.push(RankedHit {
                    query_term: stem.clone(),
                    document_id,
                    score,
                });
            }
        }
    }
    hits
}

fn rank_or(index: &IndexStore, query_stems: &[Stem]) -> Vec<RankedHit> {
    let mut hits = Vec::new();
    for stem in query_stems {
        let Some(docs) = index.documents_containing(&stem.stemmed) else {
            continue;
        };
        for &document_id in docs {
            if let Some(score) = score(index, &stem.stemmed, document_id) {
                hits.push(RankedHit {
                    query_term: stem.clone(),
                    document_id,
                    score,
                });
            }
        }
    }
    hits
}

/// `tf(t, d) * idf(t)`, or `None` if the term does not occur in the document.
fn score(index: &IndexStore, term: &str, document_id: DocumentId) -> Option<f64> {
    let occurrences = index.occurrences(document_id, term)?;
    if occurrences.is_empty() {
        return None;
    }
    let distinct_terms = index.distinct_term_count(document_id).max(1);
    let tf = occurrences.len() as f64 / distinct_terms as f64;

    let total_documents = index.total_documents().max(1);
    let document_frequency = index.document_frequency(term);
    let idf = ((total_documents as f64) / (document_frequency as f64 + 1.0)).ln();

    Some(tf * idf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tokenizer::tokenize;
    use std::path::PathBuf;

    /// Four documents: `a.txt` has "cat" but never "dog"; `b.txt` and
    /// `c.txt` both have "dog" but with deliberately different distinct-term
    /// counts (2 vs. 5), so the two can't tie on `tf`; `d.txt` has neither,
    /// so `idf(dog)` (document frequency 2 of 4) isn't the degenerate
    /// `ln(1) == 0` case. No document contains both "cat" and "dog".
    fn build_ranking_corpus() -> IndexStore {
        let mut index = IndexStore::new();
        index.add_document(PathBuf::from("a.txt"), vec![tokenize("cats and sparrows")]);
        index.add_document(PathBuf::from("b.txt"), vec![tokenize("the dog runs")]);
        index.add_document(
            PathBuf::from("c.txt"),
            vec![tokenize("the dog sees birds flying over mountains")],
        );
        index.add_document(PathBuf::from("d.txt"), vec![tokenize("elephants roam quietly")]);
        index
    }

    #[test]
    fn test_and_strategy_requires_all_terms() {
        let index = build_ranking_corpus();
        let query = tokenize("cat dog");
        let hits = rank(&index, &query, Strategy::And);
        assert!(hits.is_empty(), "no document contains both cat and dog");
    }

    #[test]
    fn test_or_strategy_ranks_by_tf_idf() {
        let index = build_ranking_corpus();
        let query = tokenize("dog");
        let hits = rank(&index, &query, Strategy::Or);
        assert_eq!(hits.len(), 2);
        // b.txt has 2 distinct terms (dog, run) vs. c.txt's 5, so
        // tf(dog, b) > tf(dog, c); idf(dog) is the same positive constant
        // for both (document frequency 2 of 4), so b outscores c.
        assert_eq!(hits[0].document_id, 1);
        assert_eq!(hits[1].document_id, 2);
    }

    #[test]
    fn test_or_strategy_does_not_dedupe_terms() {
        let mut index = IndexStore::new();
        index.add_document(PathBuf::from("a.txt"), vec![tokenize("cats and cats")]);
        let query_cat = tokenize("cat");
        let query_two = tokenize("cat dog");
        let hits_one_term = rank(&index, &query_cat, Strategy::Or);
        let hits_two_terms = rank(&index, &query_two, Strategy::Or);
        assert_eq!(hits_one_term.len(), 1);
        // "dog" is absent, contributing no extra hit.
        assert_eq!(hits_two_terms.len(), 1);
    }

    #[test]
    fn test_empty_query_yields_no_hits() {
        let index = build_ranking_corpus();
        assert!(rank(&index, &[], Strategy::And).is_empty());
        assert!(rank(&index, &[], Strategy::Or).is_empty());
    }

    #[test]
    fn test_unknown_term_yields_no_hits() {
        let index = build_ranking_corpus();
        let query = tokenize("elephant");
        assert!(rank(&index, &query, Strategy::And).is_empty());
        assert!(rank(&index, &query, Strategy::Or).is_empty());
    }
}
