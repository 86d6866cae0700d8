//! Walks a corpus directory and populates an [`IndexStore`].

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SearchError};
use crate::search::tokenizer::tokenize;
use crate::search::IndexStore;

/// Build a fresh index by walking `corpus_dir` for `*.txt` files.
///
/// Every accepted file is read line by line; each line is tokenized and its
/// stems recorded as occurrences under a newly assigned document ID. An
/// unreadable file aborts the whole run rather than producing a partial
/// index (§4.4: "a fatal error for the current indexing run").
pub fn walk_corpus(corpus_dir: &Path) -> Result<IndexStore> {
    let mut index = IndexStore::new();
    let mut files_seen = 0usize;

    for entry in WalkDir::new(corpus_dir).into_iter() {
        let entry = entry.map_err(|err| SearchError::Io {
            path: corpus_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, err),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }

        files_seen += 1;
        let path = entry.path().to_path_buf();
        tracing::debug!(path = %path.display(), "indexing document");

        let bytes = std::fs::read(&path).map_err(|source| SearchError::Io {
            path: path.clone(),
            source,
        })?;

        // §4.4: malformed UTF-8 is tolerated as best-effort byte sequences,
        // not a fatal error, so lines are decoded lossily rather than via
        // `BufRead::lines`, which errors on invalid UTF-8.
        let mut raw_lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
        if bytes.ends_with(b"\n") {
            raw_lines.pop();
        }
        let stems_per_line: Vec<_> = raw_lines
            .into_iter()
            .map(|raw_line| {
                let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
                tokenize(&String::from_utf8_lossy(raw_line))
            })
            .collect();

        index.add_document(path, stems_per_line);
    }

    tracing::info!(documents = files_seen, "corpus walk complete");
    Ok(index)
}
