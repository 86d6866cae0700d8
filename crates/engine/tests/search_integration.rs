//! End-to-end scenarios over a small on-disk corpus.

use std::fs;

use textdex_engine::{EngineConfig, SearchEngine, Strategy};

/// `a.txt` has "cat" but never "dog"; `b.txt` and `c.txt` both have "dog"
/// with deliberately different distinct-term counts (2 vs. 5) so their
/// scores can't tie; `d.txt` has neither "cat" nor "dog", keeping
/// `idf(dog)` off the degenerate `ln(1) == 0` case. No document contains
/// both "cat" and "dog".
fn sample_corpus() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "cats and sparrows").unwrap();
    fs::write(dir.path().join("b.txt"), "the dog runs").unwrap();
    fs::write(dir.path().join("c.txt"), "the dog sees birds flying over mountains").unwrap();
    fs::write(dir.path().join("d.txt"), "elephants roam quietly").unwrap();
    dir
}

#[test]
fn search_cat_and_returns_single_hit_with_original_surface_form() {
    let corpus = sample_corpus();
    let mut engine = SearchEngine::new(EngineConfig::new(corpus.path())).unwrap();
    engine.index_corpus(true).unwrap();

    let results = engine.search("cat", Strategy::And);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].occurrences.len(), 1);
    let occurrence = &results[0].occurrences[0];
    assert_eq!(occurrence.line, 0);
    assert_eq!(occurrence.index, 0);
    assert_eq!(occurrence.original, "cats");
}

#[test]
fn search_dog_or_returns_both_files_ranked_by_tf_idf() {
    let corpus = sample_corpus();
    let mut engine = SearchEngine::new(EngineConfig::new(corpus.path())).unwrap();
    engine.index_corpus(true).unwrap();

    let results = engine.search("dog", Strategy::Or);
    assert_eq!(results.len(), 2);
    assert!(results[0].relevance_score >= results[1].relevance_score);

    // "the dog runs" (b.txt, 2 distinct terms) has a higher tf for "dog"
    // than "the dog sees birds flying over mountains" (c.txt, 5 distinct
    // terms); idf(dog) is the same positive constant for both, so b.txt
    // ranks first.
    let top_path = engine.document_path(results[0].document_id).unwrap();
    assert!(top_path.ends_with("b.txt"));
}

#[test]
fn search_the_or_returns_nothing_stop_word_filtered() {
    let corpus = sample_corpus();
    let mut engine = SearchEngine::new(EngineConfig::new(corpus.path())).unwrap();
    engine.index_corpus(true).unwrap();

    assert!(engine.search("the", Strategy::Or).is_empty());
}

#[test]
fn search_cat_and_dog_and_returns_nothing_no_shared_document() {
    let corpus = sample_corpus();
    let mut engine = SearchEngine::new(EngineConfig::new(corpus.path())).unwrap();
    engine.index_corpus(true).unwrap();

    assert!(engine.search("cat AND dog", Strategy::And).is_empty());
}

#[test]
fn persistence_round_trips_index_contents() {
    let corpus = sample_corpus();
    let index_dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(corpus.path()).with_index_dir(index_dir.path());

    let mut first = SearchEngine::new(config.clone()).unwrap();
    first.index_corpus(true).unwrap();
    let before = first.search("dog", Strategy::Or);

    let mut second = SearchEngine::new(config).unwrap();
    second.index_corpus(true).unwrap();
    let after = second.search("dog", Strategy::Or);

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.document_id, a.document_id);
        assert_eq!(b.occurrences, a.occurrences);
        assert!((b.relevance_score - a.relevance_score).abs() < 1e-9);
    }
}

#[test]
fn empty_corpus_indexes_to_zero_documents() {
    let corpus = tempfile::tempdir().unwrap();
    let mut engine = SearchEngine::new(EngineConfig::new(corpus.path())).unwrap();
    let indexed = engine.index_corpus(true).unwrap();

    assert_eq!(indexed, 0);
    assert_eq!(engine.index_size(), 0);
    assert!(engine.search("anything", Strategy::Or).is_empty());
}
