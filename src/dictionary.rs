//! Terminology dictionary: loading, merging and lookup
//!
//! A [`DictionaryIndex`] is built once at translator construction and is
//! read-only afterwards, so concurrent translation calls can share it freely.
//! Source phrases are keyed case-insensitively with collapsed whitespace;
//! when the same normalized phrase is loaded twice the later entry wins,
//! which is how user terms override built-in ones.
//!
//! CSV input is deliberately forgiving: the delimiter is sniffed from the
//! first line and several common header spellings are accepted, falling back
//! to the first two columns. This mirrors the loosely-typed glossaries people
//! actually export from spreadsheets.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{TcError, TcResult};

/// Accepted header names for the source-term column, in priority order
const TERM_COLUMNS: &[&str] = &["text", "english", "source", "term", "word"];

/// Accepted header names for the translation column, in priority order
const TRANSLATION_COLUMNS: &[&str] = &["text_translated", "translation", "target", "translated"];

/// Where an entry came from; user terms take precedence over built-in ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSource {
    Builtin,
    User,
}

/// Normalize a source phrase for keying: case-folded, whitespace collapsed.
pub fn normalize_term(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The effective term → translation mapping
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    terms: HashMap<String, String>,
    sources: HashMap<String, TermSource>,
    max_words: usize,
}

impl DictionaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(term, translation)` pairs, all marked [`TermSource::User`].
    pub fn from_entries<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut index = Self::new();
        for (term, translation) in entries {
            index.insert(term.as_ref(), translation.as_ref(), TermSource::User);
        }
        index
    }

    /// Insert one entry; a later insert with the same normalized term wins.
    pub fn insert(&mut self, term: &str, translation: &str, source: TermSource) {
        let key = normalize_term(term);
        let translation = translation.trim();
        if key.is_empty() || translation.is_empty() {
            return;
        }
        let words = key.split(' ').count();
        if words > self.max_words {
            self.max_words = words;
        }
        self.sources.insert(key.clone(), source);
        self.terms.insert(key, translation.to_string());
    }

    /// Load a terminology CSV from disk into a fresh index.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> TcResult<Self> {
        let mut index = Self::new();
        index.merge_csv_path(path, TermSource::User)?;
        Ok(index)
    }

    /// Merge a terminology CSV into this index; existing entries with the
    /// same normalized term are overwritten.
    pub fn merge_csv_path<P: AsRef<Path>>(&mut self, path: P, source: TermSource) -> TcResult<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TcError::DictionaryError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let loaded = self.merge_csv_str(&contents, source)?;
        tracing::debug!(
            "loaded {} terms from {} ({} total)",
            loaded,
            path.display(),
            self.len()
        );
        Ok(())
    }

    /// Merge CSV text into this index, returning the number of rows loaded.
    pub fn merge_csv_str(&mut self, contents: &str, source: TermSource) -> TcResult<usize> {
        let delimiter = sniff_delimiter(contents);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let headers = reader.headers()?.clone();
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let term_col = TERM_COLUMNS
            .iter()
            .find_map(|name| lowered.iter().position(|h| h == name));
        let translation_col = TRANSLATION_COLUMNS
            .iter()
            .find_map(|name| lowered.iter().position(|h| h == name));

        // Fall back to the first two columns when the headers are unrecognized.
        let (term_col, translation_col) = match (term_col, translation_col) {
            (Some(t), Some(c)) => (t, c),
            _ if headers.len() >= 2 => (0, 1),
            _ => {
                return Err(TcError::DictionaryError(
                    "terminology CSV needs at least two columns".to_string(),
                ));
            }
        };

        let mut loaded = 0;
        for record in reader.records() {
            let record = record?;
            let term = record.get(term_col).unwrap_or("").trim();
            let translation = record.get(translation_col).unwrap_or("").trim();
            if term.is_empty() || translation.is_empty() {
                continue;
            }
            self.insert(term, translation, source);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Look up an already-normalized phrase.
    pub fn lookup(&self, normalized: &str) -> Option<&str> {
        self.terms.get(normalized).map(String::as_str)
    }

    /// Word count of the longest source phrase; bounds prefix probing.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(total, builtin, user)` entry counts, for construction-time logging.
    pub fn counts(&self) -> (usize, usize, usize) {
        let builtin = self
            .sources
            .values()
            .filter(|s| **s == TermSource::Builtin)
            .count();
        (self.terms.len(), builtin, self.terms.len() - builtin)
    }

    /// Iterate entries as `(normalized term, translation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn sniff_delimiter(contents: &str) -> u8 {
    let first_line = contents.lines().next().unwrap_or("");
    if first_line.contains(',') {
        b','
    } else if first_line.contains(';') {
        b';'
    } else if first_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}
