//! Dictionary loading and membership checks.
//!
//! The word list is loaded exactly once per process. [`DictionaryCell`]
//! wraps the one-shot load so concurrent callers block on the same in-flight
//! load, and a failed load stays observable as "unavailable" instead of
//! silently treating every word as valid or invalid.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

/// Minimum length for a playable word.
pub const MIN_WORD_LEN: usize = 2;

/// A loaded, immutable word set.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build from an iterator of words (mainly for tests).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| {
                let cleaned = word.as_ref().trim().to_uppercase();
                (!cleaned.is_empty()).then_some(cleaned)
            })
            .collect();
        Self { words }
    }

    /// Parse a newline-delimited word list.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line.map_err(|e| DictionaryError::Load(e.to_string()))?;
            let cleaned = line.trim().to_uppercase();
            if !cleaned.is_empty() {
                words.insert(cleaned);
            }
        }
        tracing::debug!(words = words.len(), "dictionary parsed");
        Ok(Self { words })
    }

    /// Load a newline-delimited word list from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let file = File::open(path.as_ref()).map_err(|e| DictionaryError::Load(e.to_string()))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// O(1) membership test. Case-insensitive; words shorter than
    /// [`MIN_WORD_LEN`] are never valid.
    pub fn contains(&self, word: &str) -> bool {
        let normalized = word.trim().to_uppercase();
        if normalized.len() < MIN_WORD_LEN {
            return false;
        }
        self.words.contains(&normalized)
    }

    /// Up to `limit` words starting with `prefix`, alphabetically.
    pub fn words_starting_with(&self, prefix: &str, limit: usize) -> Vec<String> {
        let normalized = prefix.trim().to_uppercase();
        let mut matches: Vec<String> = self
            .words
            .iter()
            .filter(|word| word.starts_with(&normalized))
            .cloned()
            .collect();
        matches.sort_unstable();
        matches.truncate(limit);
        matches
    }
}

/// Dictionary errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// No load has completed yet
    NotLoaded,
    /// The load ran and failed; the message is kept for diagnostics
    Load(String),
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "Dictionary not loaded"),
            Self::Load(message) => write!(f, "Dictionary load failed: {}", message),
        }
    }
}

impl std::error::Error for DictionaryError {}

/// Load state of a [`DictionaryCell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryStatus {
    NotLoaded,
    Ready { words: usize },
    Failed(String),
}

/// One-shot, idempotent dictionary holder.
///
/// The first `load_*` call runs the load; concurrent callers block until it
/// finishes and every later call gets the cached outcome, success or
/// failure. Validation calls before completion report
/// [`DictionaryError::NotLoaded`] instead of blocking.
#[derive(Debug, Default)]
pub struct DictionaryCell {
    cell: OnceLock<Result<Dictionary, DictionaryError>>,
}

impl DictionaryCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Run `load` unless a load already completed; return the cached outcome.
    pub fn load_with<F>(&self, load: F) -> Result<&Dictionary, DictionaryError>
    where
        F: FnOnce() -> Result<Dictionary, DictionaryError>,
    {
        let outcome = self.cell.get_or_init(|| {
            let result = load();
            match &result {
                Ok(dictionary) => {
                    tracing::info!(words = dictionary.len(), "dictionary ready");
                }
                Err(error) => {
                    tracing::warn!(%error, "dictionary load failed; validation unavailable");
                }
            }
            result
        });
        outcome.as_ref().map_err(Clone::clone)
    }

    /// Load from a word list file, once.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<&Dictionary, DictionaryError> {
        let path = path.as_ref();
        self.load_with(|| Dictionary::from_path(path))
    }

    /// The dictionary, if a load has succeeded.
    pub fn get(&self) -> Option<&Dictionary> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn is_ready(&self) -> bool {
        self.get().is_some()
    }

    pub fn status(&self) -> DictionaryStatus {
        match self.cell.get() {
            None => DictionaryStatus::NotLoaded,
            Some(Ok(dictionary)) => DictionaryStatus::Ready {
                words: dictionary.len(),
            },
            Some(Err(error)) => DictionaryStatus::Failed(error.to_string()),
        }
    }

    /// Membership test that distinguishes "not ready" from "checked and
    /// invalid".
    pub fn is_valid_word(&self, word: &str) -> Result<bool, DictionaryError> {
        match self.cell.get() {
            None => Err(DictionaryError::NotLoaded),
            Some(Err(error)) => Err(error.clone()),
            Some(Ok(dictionary)) => Ok(dictionary.contains(word)),
        }
    }

    /// Prefix search for suggestion/hint features.
    pub fn words_starting_with(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, DictionaryError> {
        match self.cell.get() {
            None => Err(DictionaryError::NotLoaded),
            Some(Err(error)) => Err(error.clone()),
            Some(Ok(dictionary)) => Ok(dictionary.words_starting_with(prefix, limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Dictionary {
        Dictionary::from_words(["cat", "cab", "CATS", "dog", " at "])
    }

    #[test]
    fn test_membership_case_insensitive() {
        let dict = sample();
        assert!(dict.contains("cat"));
        assert!(dict.contains("CAT"));
        assert!(dict.contains("At"));
        assert!(!dict.contains("zebra"));
    }

    #[test]
    fn test_short_words_rejected() {
        let dict = Dictionary::from_words(["a", "at"]);
        assert!(!dict.contains("a"));
        assert!(dict.contains("at"));
    }

    #[test]
    fn test_prefix_search_sorted() {
        let dict = sample();
        let matches = dict.words_starting_with("ca", 10);
        assert_eq!(matches, vec!["CAB", "CAT", "CATS"]);

        let limited = dict.words_starting_with("ca", 2);
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let reader = Cursor::new("cat\n\n  dog \r\ncab\n");
        let dict = Dictionary::from_reader(reader).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("dog"));
    }

    #[test]
    fn test_cell_not_loaded() {
        let cell = DictionaryCell::new();
        assert!(!cell.is_ready());
        assert_eq!(cell.status(), DictionaryStatus::NotLoaded);
        assert_eq!(cell.is_valid_word("cat"), Err(DictionaryError::NotLoaded));
    }

    #[test]
    fn test_cell_loads_once() {
        let cell = DictionaryCell::new();
        cell.load_with(|| Ok(sample())).unwrap();

        // Second load is ignored; the first outcome sticks
        let second = cell.load_with(|| Ok(Dictionary::from_words(["zebra"])));
        assert!(second.unwrap().contains("cat"));
        assert_eq!(cell.is_valid_word("zebra"), Ok(false));
    }

    #[test]
    fn test_cell_failure_is_sticky_and_observable() {
        let cell = DictionaryCell::new();
        let result = cell.load_with(|| Err(DictionaryError::Load("boom".to_string())));
        assert!(result.is_err());

        assert!(!cell.is_ready());
        assert_eq!(
            cell.status(),
            DictionaryStatus::Failed("Dictionary load failed: boom".to_string())
        );
        // Not silently valid or invalid
        assert!(cell.is_valid_word("cat").is_err());
    }
}
