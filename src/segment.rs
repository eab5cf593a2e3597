//! Sentence splitting and phrase segmentation
//!
//! The segmenter is the only linguistic component in the pipeline and hides
//! behind a narrow trait: one sentence in, an ordered list of candidate spans
//! out. That keeps the matching and placeholder logic independent of which
//! NLP engine produced the spans — the bundled [`RuleChunker`] is a
//! dictionary-friendly heuristic, and a caller with a real noun-chunk model
//! can drop in their own implementation.

use crate::stopwords::{is_determiner, is_pronoun, is_stopword};

/// Classification of a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A noun phrase, possibly led by an article/determiner ("the station")
    NounPhrase,
    /// A capitalized name ("Accra", "Kofi Annan"); matched without filtering
    ProperNoun,
}

/// A candidate phrase inside one sentence, in byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl PhraseSpan {
    pub fn text<'a>(&self, sentence: &'a str) -> &'a str {
        &sentence[self.start..self.end]
    }
}

/// Phrase detector contract: left-to-right, non-overlapping spans, pronouns
/// never emitted, and an empty result — never an error — for input the
/// detector cannot process.
pub trait PhraseSegmenter: Send + Sync {
    fn segment(&self, sentence: &str) -> Vec<PhraseSpan>;
}

/// Split text into sentences, keeping byte offsets into the original.
///
/// A sentence ends after a run of terminal punctuation once the next
/// non-quote, non-whitespace character appears. Abbreviations are not
/// special-cased; an oversplit sentence only narrows chunk candidates and
/// never loses text, since offsets always cover the full input.
pub fn split_sentences(text: &str) -> Vec<(usize, &str)> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '…') {
            after_terminal = true;
            continue;
        }
        if after_terminal {
            if c.is_whitespace() || matches!(c, '"' | '\'' | ')' | ']' | '”' | '’') {
                continue;
            }
            if !text[start..i].trim().is_empty() {
                sentences.push((start, &text[start..i]));
            }
            start = i;
            after_terminal = false;
        }
    }
    if !text[start..].trim().is_empty() {
        sentences.push((start, &text[start..]));
    }
    sentences
}

/// Heuristic phrase chunker
///
/// Scans word tokens and groups maximal runs of content words into candidate
/// spans, attaching a single leading determiner where one directly precedes
/// the run. Function words, pronouns and punctuation all terminate a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleChunker;

impl RuleChunker {
    pub fn new() -> Self {
        RuleChunker
    }
}

impl PhraseSegmenter for RuleChunker {
    fn segment(&self, sentence: &str) -> Vec<PhraseSpan> {
        let tokens = word_tokens(sentence);
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let (start, end) = tokens[i];
            let word = &sentence[start..end];

            if is_pronoun(word) {
                i += 1;
                continue;
            }

            if is_determiner(word) {
                // A determiner only opens a span when content words follow it
                // without intervening punctuation.
                let run_end = content_run_end(sentence, &tokens, i + 1);
                if run_end > i + 1 {
                    spans.push(PhraseSpan {
                        start,
                        end: tokens[run_end - 1].1,
                        kind: SpanKind::NounPhrase,
                    });
                    i = run_end;
                } else {
                    i += 1;
                }
                continue;
            }

            if is_stopword(word) {
                i += 1;
                continue;
            }

            // A bare content run keeps the capitalization regime of its
            // first token, so "visited Kofi Annan" yields two spans.
            let first_upper = starts_uppercase(word);
            let mut run_end = content_run_end(sentence, &tokens, i);
            for t in (i + 1)..run_end {
                let (s, e) = tokens[t];
                if starts_uppercase(&sentence[s..e]) != first_upper {
                    run_end = t;
                    break;
                }
            }
            let kind = if first_upper {
                SpanKind::ProperNoun
            } else {
                SpanKind::NounPhrase
            };
            spans.push(PhraseSpan {
                start,
                end: tokens[run_end - 1].1,
                kind,
            });
            i = run_end;
        }

        spans
    }
}

/// Word tokens as byte ranges; apostrophes and hyphens are word-internal only.
fn word_tokens(s: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in s.char_indices() {
        let in_word = start.is_some();
        let is_word_char =
            c.is_alphanumeric() || (in_word && matches!(c, '\'' | '’' | '-'));
        if is_word_char {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(st) = start.take() {
            tokens.push((st, i));
        }
    }
    if let Some(st) = start {
        tokens.push((st, s.len()));
    }
    tokens
}

/// Index one past the last token of the content run starting at `from`.
///
/// A run extends while tokens are non-stopword content separated from their
/// predecessor by whitespace only.
fn content_run_end(sentence: &str, tokens: &[(usize, usize)], from: usize) -> usize {
    let mut end = from;
    while end < tokens.len() {
        let (s, e) = tokens[end];
        if is_stopword(&sentence[s..e]) {
            break;
        }
        if end > from {
            let gap = &sentence[tokens[end - 1].1..s];
            if !gap.chars().all(char::is_whitespace) {
                break;
            }
        }
        end += 1;
    }
    end
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_text(sentence: &str) -> Vec<(String, SpanKind)> {
        RuleChunker::new()
            .segment(sentence)
            .into_iter()
            .map(|s| (s.text(sentence).to_string(), s.kind))
            .collect()
    }

    #[test]
    fn test_split_sentences_basic() {
        let text = "The station is far. We walked there.";
        let sentences = split_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], (0, "The station is far. "));
        assert_eq!(sentences[1].1, "We walked there.");
    }

    #[test]
    fn test_split_sentences_offsets_cover_text() {
        let text = "One. Two! Three?";
        let sentences = split_sentences(text);
        let rebuilt: String = sentences.iter().map(|(_, s)| *s).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_split_sentences_single() {
        let sentences = split_sentences("no terminal punctuation");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].0, 0);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_chunker_determiner_led_phrase() {
        let spans = spans_text("The station is in Accra.");
        assert_eq!(
            spans,
            vec![
                ("The station".to_string(), SpanKind::NounPhrase),
                ("Accra".to_string(), SpanKind::ProperNoun),
            ]
        );
    }

    #[test]
    fn test_chunker_adjective_noun_run() {
        let spans = spans_text("a big house");
        assert_eq!(spans, vec![("a big house".to_string(), SpanKind::NounPhrase)]);
    }

    #[test]
    fn test_chunker_skips_pronouns() {
        let spans = spans_text("She saw the house.");
        // "saw" is a content word by these rules; the pronoun is never a span
        assert!(spans.iter().all(|(t, _)| !t.contains("She")));
        assert!(spans.iter().any(|(t, _)| t == "the house"));
    }

    #[test]
    fn test_chunker_proper_noun_sequence() {
        let spans = spans_text("We visited Kofi Annan yesterday");
        assert_eq!(
            spans,
            vec![
                ("visited".to_string(), SpanKind::NounPhrase),
                ("Kofi Annan".to_string(), SpanKind::ProperNoun),
                ("yesterday".to_string(), SpanKind::NounPhrase),
            ]
        );
    }

    #[test]
    fn test_chunker_punctuation_breaks_runs() {
        let spans = spans_text("house, station");
        assert_eq!(
            spans,
            vec![
                ("house".to_string(), SpanKind::NounPhrase),
                ("station".to_string(), SpanKind::NounPhrase),
            ]
        );
    }

    #[test]
    fn test_chunker_empty_input() {
        assert!(RuleChunker::new().segment("").is_empty());
    }

    #[test]
    fn test_chunker_bare_determiner_not_emitted() {
        assert!(RuleChunker::new().segment("the").is_empty());
        assert!(RuleChunker::new().segment("the of").is_empty());
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let sentence = "The big house near the old station";
        let spans = RuleChunker::new().segment(sentence);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}
