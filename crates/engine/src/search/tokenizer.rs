//! Text tokenizer for indexing and querying.
//!
//! Pipeline: trim leading whitespace -> split on space and the punctuation
//! set, tracking column positions -> filter short/stop words -> Porter stem.
//!
//! Unlike a plain `split(|c| !c.is_alphanumeric())` tokenizer, this one keeps
//! track of where each surface word sat in the original line, since the
//! engine needs to report hit locations back to the caller.

use super::stemmer;
use crate::types::Stem;

/// English stopwords, lowercase. Fixed, not configurable.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now",
];

/// Minimum length (in characters) a lowercase word must have to be stemmed.
const MIN_STEMMABLE_LEN: usize = 3;

/// Characters that delimit sub-words the same way whitespace does, each
/// consuming exactly one column.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[inline]
fn is_delimiter(c: char) -> bool {
    c == ' ' || PUNCTUATION.contains(c)
}

#[inline]
fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// True iff `word` should be stemmed and indexed: at least
/// [`MIN_STEMMABLE_LEN`] characters (compared lowercase) and not a stopword.
fn check_stemmable(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.chars().count() >= MIN_STEMMABLE_LEN && !is_stopword(&lower)
}

/// Tokenize a single line into position-tagged stems.
///
/// Leading whitespace is trimmed; the column of each returned [`Stem`] is
/// its 0-based position in the *original* `line` (including that leading
/// whitespace). Space and the punctuation set in [`PUNCTUATION`] both act as
/// one-column delimiters between sub-words; consecutive delimiters produce
/// no empty stems but still advance the column.
///
/// # Examples
///
/// ```
/// use textdex_engine::search::tokenizer::tokenize;
///
/// let stems = tokenize("hello#world");
/// assert_eq!(stems[0].original, "hello");
/// assert_eq!(stems[0].index, 0);
/// assert_eq!(stems[1].original, "world");
/// assert_eq!(stems[1].index, 6);
/// ```
pub fn tokenize(line: &str) -> Vec<Stem> {
    let leading_ws = line.len() - line.trim_start_matches(' ').len();
    let body = &line[leading_ws..];

    let mut stems = Vec::new();
    let mut word_start: Option<usize> = None;

    let push_word = |stems: &mut Vec<Stem>, start: usize, word: &str| {
        if check_stemmable(word) {
            stems.push(Stem {
                index: start,
                original: word.to_string(),
                stemmed: stemmer::stem(&word.to_lowercase()),
            });
        }
    };

    for (offset, c) in body.char_indices() {
        let column = leading_ws + offset;
        if is_delimiter(c) {
            if let Some(start) = word_start.take() {
                push_word(&mut stems, start, &body[start - leading_ws..offset]);
            }
        } else if word_start.is_none() {
            word_start = Some(column);
        }
    }
    if let Some(start) = word_start {
        push_word(&mut stems, start, &body[start - leading_ws..]);
    }

    stems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_punctuation_split() {
        let stems = tokenize("hello#world");
        assert_eq!(stems.len(), 2);
        assert_eq!(stems[0].original, "hello");
        assert_eq!(stems[0].index, 0);
        assert_eq!(stems[1].original, "world");
        assert_eq!(stems[1].index, 6);
    }

    #[test]
    fn test_tokenize_leading_whitespace() {
        let stems = tokenize("   dog.");
        assert_eq!(stems.len(), 1);
        assert_eq!(stems[0].original, "dog");
        assert_eq!(stems[0].index, 3);
    }

    #[test]
    fn test_tokenize_filters_short_words() {
        // "is" and "a" are both too short (and "is"/"a" are also stopwords)
        let stems = tokenize("is a cat");
        assert_eq!(stems.len(), 1);
        assert_eq!(stems[0].original, "cat");
    }

    #[test]
    fn test_tokenize_filters_stopwords() {
        let stems = tokenize("the quick brown fox");
        let originals: Vec<&str> = stems.iter().map(|s| s.original.as_str()).collect();
        assert_eq!(originals, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_only_punctuation() {
        assert!(tokenize("...---...").is_empty());
    }

    #[test]
    fn test_tokenize_consecutive_spaces_skip_but_advance_column() {
        let stems = tokenize("cat    dog");
        assert_eq!(stems.len(), 2);
        assert_eq!(stems[0].original, "cat");
        assert_eq!(stems[0].index, 0);
        assert_eq!(stems[1].original, "dog");
        assert_eq!(stems[1].index, 7);
    }

    #[test]
    fn test_tokenize_stems_each_word() {
        let stems = tokenize("running jumped");
        assert_eq!(stems[0].stemmed, "run");
        assert_eq!(stems[1].stemmed, "jump");
    }

    #[test]
    fn test_tokenize_positions_monotonic() {
        let stems = tokenize("one two three four five six seven eight");
        for window in stems.windows(2) {
            assert!(window[0].index < window[1].index);
        }
    }

    #[test]
    fn test_tokenize_trailing_whitespace_trimmed_without_shifting_earlier() {
        let a = tokenize("cat dog");
        let b = tokenize("cat dog   ");
        assert_eq!(a, b);
    }
}
