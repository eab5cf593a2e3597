//! Placeholder restoration in translated text
//!
//! The engine's output is scanned left to right for `<N>` tokens; each one is
//! spliced out for its recorded dictionary translation with the source
//! casing transferred back on. Restoration is a pure text splice — no
//! agreement with surrounding target-language morphology is attempted.
//!
//! A token the table does not know (the engine duplicated or invented one)
//! is left in place literally and reported as a warning on the outcome; a
//! token the engine dropped simply never gets restored. Neither case is an
//! error: the caller still gets a usable, inspectable result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::matcher::CaseClass;
use crate::placeholder::PlaceholderTable;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\d+)>").expect("placeholder pattern is valid"));

/// How Title-class casing is transferred onto multi-word translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestorePolicy {
    /// Capitalize every word of the translation (default), or only the first
    pub title_case_each_word: bool,
}

impl Default for RestorePolicy {
    fn default() -> Self {
        RestorePolicy {
            title_case_each_word: true,
        }
    }
}

/// One restored term, aggregated over its occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Source term as it appeared in the input
    pub source: String,
    /// Dictionary translation spliced into the output
    pub translation: String,
    /// Number of occurrences restored
    pub count: usize,
}

/// Result of scanning one translated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub text: String,
    /// Replaced terms in first-occurrence order
    pub replacements: Vec<Replacement>,
    /// Total occurrences restored; unknown tokens are not counted
    pub restored_count: usize,
    pub warnings: Vec<String>,
}

/// Restore every known placeholder in `translated`.
pub fn restore_placeholders(
    translated: &str,
    table: &PlaceholderTable,
    policy: RestorePolicy,
) -> RestoreOutcome {
    let mut text = String::with_capacity(translated.len() + 16);
    let mut replacements: Vec<Replacement> = Vec::new();
    let mut restored_count = 0;
    let mut warnings = Vec::new();

    // True until the first alphabetic character of the current sentence;
    // sentence boundaries are terminal punctuation in the *translated* text.
    let mut sentence_start = true;
    let mut cursor = 0;

    for m in PLACEHOLDER_RE.find_iter(translated) {
        let gap = &translated[cursor..m.start()];
        text.push_str(gap);
        sentence_start = track_sentence_start(sentence_start, gap);
        cursor = m.end();

        let token = m.as_str();
        let index: usize = match token[1..token.len() - 1].parse() {
            Ok(n) => n,
            Err(_) => {
                text.push_str(token);
                continue;
            }
        };

        let Some(binding) = table.get(index) else {
            tracing::warn!("placeholder {} has no binding; leaving it in place", token);
            warnings.push(format!("unmatched placeholder {} left in output", token));
            text.push_str(token);
            continue;
        };

        let mut spliced = transfer_case(&binding.translation, binding.case, policy);
        if sentence_start {
            spliced = capitalize_first(&spliced);
        }
        if spliced.chars().any(char::is_alphabetic) {
            sentence_start = false;
        }
        text.push_str(&spliced);

        restored_count += 1;
        match replacements
            .iter_mut()
            .find(|r| r.source == binding.source_text)
        {
            Some(r) => r.count += 1,
            None => replacements.push(Replacement {
                source: binding.source_text.clone(),
                translation: binding.translation.clone(),
                count: 1,
            }),
        }
    }
    text.push_str(&translated[cursor..]);

    // Encoded tokens that never showed up in the engine output at all.
    for binding in table.bindings() {
        let token = crate::placeholder::placeholder_token(binding.index);
        if !translated.contains(&token) {
            tracing::warn!("placeholder {} missing from engine output", token);
            warnings.push(format!("placeholder {} missing from engine output", token));
        }
    }

    RestoreOutcome {
        text,
        replacements,
        restored_count,
        warnings,
    }
}

/// Carry the alphabetic/terminal-punctuation state across a literal gap.
fn track_sentence_start(mut state: bool, gap: &str) -> bool {
    for c in gap.chars() {
        if matches!(c, '.' | '!' | '?' | '…') {
            state = true;
        } else if c.is_alphabetic() {
            state = false;
        }
    }
    state
}

/// Apply the recorded source case class to a translation.
fn transfer_case(translation: &str, case: CaseClass, policy: RestorePolicy) -> String {
    match case {
        CaseClass::Lower => translation.to_string(),
        CaseClass::Upper => translation.to_uppercase(),
        CaseClass::Title | CaseClass::Mixed => {
            title_case(translation, policy.title_case_each_word)
        }
    }
}

fn title_case(s: &str, each_word: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    let mut capitalized_any = false;
    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
            continue;
        }
        if c.is_alphabetic() {
            let capitalize = if each_word { word_start } else { !capitalized_any };
            if capitalize {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            capitalized_any = true;
        } else {
            out.push(c);
        }
        word_start = false;
    }
    out
}

/// Uppercase the first alphabetic character, leave everything else alone.
fn capitalize_first(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut done = false;
    for c in s.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TermMatch;
    use crate::placeholder::{PlaceholderSequence, encode_matches};

    fn table_for(entries: &[(usize, usize, &str, &str, CaseClass)], text: &str) -> PlaceholderTable {
        let matches: Vec<TermMatch> = entries
            .iter()
            .map(|(start, end, source, translation, case)| TermMatch {
                start: *start,
                end: *end,
                source_text: source.to_string(),
                translation: translation.to_string(),
                case: *case,
            })
            .collect();
        let mut seq = PlaceholderSequence::new();
        let mut table = PlaceholderTable::new();
        encode_matches(text, &matches, &mut seq, &mut table);
        table
    }

    #[test]
    fn test_restore_simple() {
        let table = table_for(
            &[(4, 11, "station", "gyinabea", CaseClass::Lower)],
            "The station is in Accra.",
        );
        let outcome = restore_placeholders("<1> no wɔ Accra.", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "Gyinabea no wɔ Accra.");
        assert_eq!(outcome.restored_count, 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_restore_mid_sentence_keeps_lowercase() {
        let table = table_for(
            &[(4, 11, "station", "gyinabea", CaseClass::Lower)],
            "The station is in Accra.",
        );
        let outcome =
            restore_placeholders("Accra na <1> no wɔ.", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "Accra na gyinabea no wɔ.");
    }

    #[test]
    fn test_case_transfer_upper_title_lower() {
        for (case, expected) in [
            (CaseClass::Upper, "OFIE"),
            (CaseClass::Title, "Ofie"),
            (CaseClass::Lower, "ofie"),
            (CaseClass::Mixed, "Ofie"),
        ] {
            let table = table_for(&[(8, 13, "house", "ofie", case)], "see the house");
            let outcome =
                restore_placeholders("xx <1> yy", &table, RestorePolicy::default());
            assert_eq!(outcome.text, format!("xx {} yy", expected), "{:?}", case);
        }
    }

    #[test]
    fn test_title_case_policy_each_word_vs_first() {
        let table = table_for(
            &[(0, 9, "Big House", "efie kɛse", CaseClass::Title)],
            "Big House",
        );
        let each = restore_placeholders("x <1>", &table, RestorePolicy::default());
        assert_eq!(each.text, "x Efie Kɛse");

        let first_only = restore_placeholders(
            "x <1>",
            &table,
            RestorePolicy {
                title_case_each_word: false,
            },
        );
        assert_eq!(first_only.text, "x Efie kɛse");
    }

    #[test]
    fn test_sentence_initial_capitalization_after_terminal_punctuation() {
        let text = "house. house";
        let table = table_for(
            &[
                (0, 5, "house", "efie", CaseClass::Lower),
                (7, 12, "house", "efie", CaseClass::Lower),
            ],
            text,
        );
        let outcome = restore_placeholders("<1>. <2>", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "Efie. Efie");
        assert_eq!(outcome.restored_count, 2);
        assert_eq!(outcome.replacements.len(), 1);
        assert_eq!(outcome.replacements[0].count, 2);
    }

    #[test]
    fn test_unknown_placeholder_left_literal_and_warned() {
        let table = table_for(&[(0, 5, "house", "efie", CaseClass::Lower)], "house");
        let outcome = restore_placeholders("<1> ne <9>", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "Efie ne <9>");
        assert_eq!(outcome.restored_count, 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("<9>"));
    }

    #[test]
    fn test_dropped_placeholder_produces_warning() {
        let text = "house station";
        let table = table_for(
            &[
                (0, 5, "house", "efie", CaseClass::Lower),
                (6, 13, "station", "gyinabea", CaseClass::Lower),
            ],
            text,
        );
        // Engine lost <2> entirely
        let outcome = restore_placeholders("<1> nko ara", &table, RestorePolicy::default());
        assert_eq!(outcome.restored_count, 1);
        assert!(outcome.warnings.iter().any(|w| w.contains("<2>")));
    }

    #[test]
    fn test_no_placeholders_passthrough() {
        let table = PlaceholderTable::new();
        let outcome = restore_placeholders("plain text.", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "plain text.");
        assert_eq!(outcome.restored_count, 0);
        assert!(outcome.replacements.is_empty());
    }

    #[test]
    fn test_reordered_placeholders_restore_independently() {
        let text = "house station";
        let table = table_for(
            &[
                (0, 5, "house", "efie", CaseClass::Lower),
                (6, 13, "station", "gyinabea", CaseClass::Upper),
            ],
            text,
        );
        let outcome = restore_placeholders("<2> ne <1>", &table, RestorePolicy::default());
        assert_eq!(outcome.text, "GYINABEA ne efie");
        // First-occurrence order follows the translated text
        assert_eq!(outcome.replacements[0].source, "station");
        assert_eq!(outcome.replacements[1].source, "house");
    }
}
