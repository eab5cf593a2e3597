//! Stopword inventory and the content-word filter
//!
//! Terminology matching only ever looks at the content portion of a phrase:
//! a leading run of articles/determiners is peeled off and preserved verbatim
//! in the surrounding text, so "the house" substitutes "house" and leaves
//! "the" for the translation engine to handle grammatically.

/// Articles and determiners that may lead a noun phrase. A leading run of
/// these is split off by [`split_leading_stopwords`] and never substituted.
const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its",
    "our", "their", "some", "any", "each", "every", "no", "another", "such",
];

/// Pronouns are never candidate spans for terminology substitution.
const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "who", "whom",
    "whose", "which", "what", "myself", "yourself", "himself", "herself", "itself",
    "ourselves", "themselves", "someone", "anyone", "everyone", "something", "anything",
    "everything", "nothing", "one",
];

/// Function words that terminate a candidate chunk: prepositions,
/// conjunctions, auxiliaries and a few high-frequency adverbs. Content words
/// on either side of these belong to separate candidate spans.
const FUNCTION_WORDS: &[&str] = &[
    "of", "in", "on", "at", "to", "for", "with", "by", "from", "as", "into", "onto", "over",
    "under", "about", "after", "before", "between", "through", "during", "against", "and",
    "or", "but", "nor", "so", "yet", "if", "than", "then", "because", "while", "when",
    "where", "how", "why", "is", "are", "was", "were", "be", "been", "being", "am", "do",
    "does", "did", "have", "has", "had", "will", "would", "can", "could", "shall", "should",
    "may", "might", "must", "not", "very", "too", "also", "just", "only", "there", "here",
];

pub fn is_determiner(word: &str) -> bool {
    DETERMINERS.contains(&word.to_lowercase().as_str())
}

pub fn is_pronoun(word: &str) -> bool {
    PRONOUNS.contains(&word.to_lowercase().as_str())
}

/// True for any word that cannot appear inside a candidate content span.
pub fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    DETERMINERS.contains(&lower.as_str())
        || PRONOUNS.contains(&lower.as_str())
        || FUNCTION_WORDS.contains(&lower.as_str())
}

/// A phrase split into its leading stopword run and its content portion.
///
/// Invariant: `leading` + the whitespace between them + `content` is exactly
/// the original phrase; nothing is normalized or dropped here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPhrase<'a> {
    /// Leading determiners/articles, empty when the phrase has none
    pub leading: &'a str,
    /// Remainder of the phrase, eligible for terminology matching
    pub content: &'a str,
    /// Byte offset of `content` within the original phrase
    pub content_offset: usize,
}

/// Split the maximal prefix of determiner/article tokens off a phrase.
///
/// Proper-noun spans should not be passed through this; they are matched
/// whole. If the phrase consists only of stopwords the content is empty.
pub fn split_leading_stopwords(phrase: &str) -> SplitPhrase<'_> {
    let mut leading_end = 0;
    let mut content_start = 0;

    let mut rest = phrase;
    let mut base = 0;
    loop {
        let trimmed = rest.trim_start();
        let ws = rest.len() - trimmed.len();
        let word_end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let word = &trimmed[..word_end];
        if word.is_empty() || !is_determiner(word) {
            content_start = base + ws;
            break;
        }
        leading_end = base + ws + word_end;
        base = leading_end;
        rest = &phrase[base..];
        if rest.is_empty() {
            content_start = base;
            break;
        }
    }

    SplitPhrase {
        leading: &phrase[..leading_end],
        content: &phrase[content_start..],
        content_offset: content_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_leading_stopword() {
        let split = split_leading_stopwords("big house");
        assert_eq!(split.leading, "");
        assert_eq!(split.content, "big house");
        assert_eq!(split.content_offset, 0);
    }

    #[test]
    fn test_single_article() {
        let split = split_leading_stopwords("the house");
        assert_eq!(split.leading, "the");
        assert_eq!(split.content, "house");
        assert_eq!(split.content_offset, 4);
    }

    #[test]
    fn test_article_case_insensitive() {
        let split = split_leading_stopwords("The station");
        assert_eq!(split.leading, "The");
        assert_eq!(split.content, "station");
    }

    #[test]
    fn test_stacked_determiners() {
        let split = split_leading_stopwords("all the houses");
        // "all" is not in the determiner list; nothing is peeled
        assert_eq!(split.leading, "");

        let split = split_leading_stopwords("my the house");
        assert_eq!(split.leading, "my the");
        assert_eq!(split.content, "house");
    }

    #[test]
    fn test_reconstruction_invariant() {
        for phrase in ["the big house", "an   apple", "Accra", "the", ""] {
            let split = split_leading_stopwords(phrase);
            let separator = &phrase[split.leading.len()..split.content_offset];
            assert!(separator.chars().all(char::is_whitespace));
            let rebuilt = format!("{}{}{}", split.leading, separator, split.content);
            assert_eq!(rebuilt, phrase);
        }
    }

    #[test]
    fn test_only_stopwords_leaves_empty_content() {
        let split = split_leading_stopwords("the");
        assert_eq!(split.leading, "the");
        assert_eq!(split.content, "");
    }

    #[test]
    fn test_word_classes() {
        assert!(is_determiner("The"));
        assert!(is_pronoun("They"));
        assert!(is_stopword("of"));
        assert!(!is_stopword("station"));
    }
}
