//! Terminology matching over candidate spans
//!
//! Matching is longest-match-wins over word prefixes of a span's content
//! text: probe the whole content first, then drop one trailing word at a
//! time, and stop at the first dictionary hit. No partial-word or fuzzy
//! matching — multi-word entries match only as exact multi-word prefixes.
//!
//! The literal casing of the matched substring is classified *before*
//! normalization so restoration can reproduce it in the target language.

use serde::Serialize;

use crate::dictionary::{DictionaryIndex, normalize_term};

/// Observed capitalization of a matched source phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaseClass {
    /// all lowercase, or no letters at all
    Lower,
    /// Each Word Capitalized (single capitalized words included)
    Title,
    /// ALL UPPERCASE
    Upper,
    /// anything else; restored as Title
    Mixed,
}

/// Classify the capitalization of a phrase, whole-phrase level.
pub fn classify_case(text: &str) -> CaseClass {
    let mut has_upper = false;
    let mut has_lower = false;
    for c in text.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        }
    }
    if !has_upper {
        return CaseClass::Lower;
    }
    if !has_lower {
        return CaseClass::Upper;
    }
    if is_title_case(text) {
        return CaseClass::Title;
    }
    CaseClass::Mixed
}

/// Every word starts uppercase and continues lowercase.
fn is_title_case(text: &str) -> bool {
    let mut any = false;
    for word in text.split_whitespace() {
        any = true;
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() => {
                if !first.is_uppercase() {
                    return false;
                }
            }
            _ => return false,
        }
        if chars.any(|c| c.is_uppercase()) {
            return false;
        }
    }
    any
}

/// A dictionary hit inside the input text, in absolute byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub start: usize,
    pub end: usize,
    /// The literal matched substring, casing intact
    pub source_text: String,
    /// The dictionary translation for the normalized source phrase
    pub translation: String,
    pub case: CaseClass,
}

/// Match a span's content text against the dictionary.
///
/// `content` is the span text after stopword filtering; `base_offset` is its
/// absolute byte position in the full input, so the returned match carries
/// offsets usable for in-place substitution.
pub fn match_content(
    content: &str,
    base_offset: usize,
    index: &DictionaryIndex,
) -> Option<TermMatch> {
    if content.is_empty() || index.is_empty() {
        return None;
    }

    // Byte end positions of each word prefix: end of word 1, word 2, ...
    let mut prefix_ends = Vec::new();
    let mut in_word = false;
    for (i, c) in content.char_indices() {
        if c.is_whitespace() {
            if in_word {
                prefix_ends.push(i);
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if in_word {
        prefix_ends.push(content.len());
    }

    let longest = prefix_ends.len().min(index.max_words());
    for words in (1..=longest).rev() {
        let end = prefix_ends[words - 1];
        let prefix = &content[..end];
        let normalized = normalize_term(prefix);
        if let Some(translation) = index.lookup(&normalized) {
            return Some(TermMatch {
                start: base_offset,
                end: base_offset + end,
                source_text: prefix.to_string(),
                translation: translation.to_string(),
                case: classify_case(prefix),
            });
        }
    }
    None
}
