//! Placeholder encoding
//!
//! Matched terms are replaced by numbered tokens of the form `<N>` before the
//! text goes to the translation engine. The engine treats them as opaque
//! atoms; decoding swaps them back for dictionary translations afterwards.
//!
//! Numbering starts at 1 and increments for every encoded match in document
//! order. The counter lives in an explicit [`PlaceholderSequence`] owned by
//! one translation call — never a process-wide global — so concurrent calls
//! cannot interfere, and a single sequence can be shared across the items of
//! a batch to keep tokens unique within whatever unit reaches the engine in
//! one request.

use std::collections::BTreeMap;

use crate::matcher::{CaseClass, TermMatch};

/// Render the wire form of a placeholder index.
pub fn placeholder_token(index: usize) -> String {
    format!("<{}>", index)
}

/// Monotonic placeholder counter, scoped to one translation call
#[derive(Debug, Clone)]
pub struct PlaceholderSequence {
    next: usize,
}

impl PlaceholderSequence {
    pub fn new() -> Self {
        PlaceholderSequence { next: 1 }
    }

    fn next_index(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }
}

impl Default for PlaceholderSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the decoder needs to restore one placeholder occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderBinding {
    pub index: usize,
    /// Literal source substring that was replaced, casing intact
    pub source_text: String,
    /// Dictionary translation to splice in
    pub translation: String,
    pub case: CaseClass,
}

/// Placeholder index → binding table produced by encoding
#[derive(Debug, Clone, Default)]
pub struct PlaceholderTable {
    bindings: BTreeMap<usize, PlaceholderBinding>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&PlaceholderBinding> {
        self.bindings.get(&index)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in ascending placeholder order.
    pub fn bindings(&self) -> impl Iterator<Item = &PlaceholderBinding> {
        self.bindings.values()
    }

    fn insert(&mut self, binding: PlaceholderBinding) {
        self.bindings.insert(binding.index, binding);
    }
}

/// Replace each match with a fresh placeholder token.
///
/// `matches` must be non-overlapping; they are applied in ascending start
/// order so numbering follows document order. Everything outside the matched
/// ranges is copied through byte-for-byte.
pub fn encode_matches(
    text: &str,
    matches: &[TermMatch],
    sequence: &mut PlaceholderSequence,
    table: &mut PlaceholderTable,
) -> String {
    let mut ordered: Vec<&TermMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start);

    let mut encoded = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in ordered {
        if m.start < cursor {
            // Overlapping match; the earlier (longer-reaching) one already won.
            continue;
        }
        encoded.push_str(&text[cursor..m.start]);
        let index = sequence.next_index();
        encoded.push_str(&placeholder_token(index));
        table.insert(PlaceholderBinding {
            index,
            source_text: m.source_text.clone(),
            translation: m.translation.clone(),
            case: m.case,
        });
        cursor = m.end;
    }
    encoded.push_str(&text[cursor..]);
    encoded
}
