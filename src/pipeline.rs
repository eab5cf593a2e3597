//! Pipeline orchestration: segment → filter → match → encode → translate → decode
//!
//! A [`Translator`] owns the read-only dictionary, the phrase segmenter and
//! the translation client, and is cheap to clone — concurrent calls share
//! them behind `Arc`s and otherwise touch no common state. Placeholder
//! counters are scoped to a single call, so independent calls can never
//! collide.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::dictionary::DictionaryIndex;
use crate::error::{TcError, TcResult};
use crate::lang;
use crate::matcher::{TermMatch, match_content};
use crate::mt::translator::{TranslationClient, validate_locale};
use crate::placeholder::{PlaceholderSequence, PlaceholderTable, encode_matches};
use crate::restore::{Replacement, RestorePolicy, restore_placeholders};
use crate::segment::{PhraseSegmenter, RuleChunker, SpanKind, split_sentences};
use crate::stopwords::split_leading_stopwords;

/// Everything one `translate` call produced, immutable once built
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResult {
    /// Final text with placeholders restored
    pub text: String,
    /// The input, untouched
    pub original: String,
    /// Input after placeholder encoding — what the engine actually saw
    pub preprocessed: String,
    /// Raw engine output, placeholders still in place
    pub engine_text: String,
    /// Intermediate hop output when pivot translation was used
    pub pivot_text: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    /// Replaced terms in first-occurrence order
    pub replacements: Vec<Replacement>,
    pub replacements_count: usize,
    /// Data-quality conditions recovered during decoding (never fatal)
    pub warnings: Vec<String>,
    pub elapsed_ms: u64,
}

/// Terminology-controlled translator
#[derive(Clone)]
pub struct Translator {
    client: Arc<dyn TranslationClient>,
    dictionary: Arc<DictionaryIndex>,
    segmenter: Arc<dyn PhraseSegmenter>,
    source_lang: String,
    target_lang: String,
    source_engine: String,
    target_engine: String,
    pivot_engine: Option<String>,
    policy: RestorePolicy,
    max_in_flight: usize,
}

impl Translator {
    /// Default bound on concurrent engine calls in
    /// [`batch_translate_concurrent`]
    const DEFAULT_MAX_IN_FLIGHT: usize = 4;

    pub fn new(
        client: Arc<dyn TranslationClient>,
        dictionary: DictionaryIndex,
        source_lang: &str,
        target_lang: &str,
    ) -> TcResult<Self> {
        validate_locale(source_lang)?;
        validate_locale(target_lang)?;

        let source_engine = lang::to_engine_code(source_lang);
        let target_engine = lang::to_engine_code(target_lang);
        for (code, engine) in [(source_lang, &source_engine), (target_lang, &target_engine)] {
            if !lang::is_engine_supported(engine) {
                tracing::warn!(
                    "language '{}' may not be supported by {}",
                    code,
                    client.provider_name()
                );
            }
        }

        let (total, builtin, user) = dictionary.counts();
        tracing::debug!(
            "terminology loaded: {} terms ({} built-in, {} user)",
            total,
            builtin,
            user
        );

        Ok(Self {
            client,
            dictionary: Arc::new(dictionary),
            segmenter: Arc::new(RuleChunker::new()),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            source_engine,
            target_engine,
            pivot_engine: None,
            policy: RestorePolicy::default(),
            max_in_flight: Self::DEFAULT_MAX_IN_FLIGHT,
        })
    }

    /// Route the engine call through an intermediate language.
    ///
    /// Two-hop translation (`source → pivot → target`) often yields better
    /// output for language pairs the engine handles poorly head-on.
    /// Placeholders must survive both hops; the intermediate text is kept on
    /// the result for inspection.
    pub fn with_pivot(mut self, pivot_lang: &str) -> TcResult<Self> {
        validate_locale(pivot_lang)?;
        let engine = lang::to_engine_code(pivot_lang);
        if !lang::is_engine_supported(&engine) {
            tracing::warn!("pivot language '{}' may not be supported", pivot_lang);
        }
        self.pivot_engine = Some(engine);
        Ok(self)
    }

    /// Swap in a different phrase segmenter implementation.
    pub fn with_segmenter(mut self, segmenter: Arc<dyn PhraseSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Title-case every word of a restored translation (default), or only
    /// its first word.
    pub fn with_title_case_each_word(mut self, each_word: bool) -> Self {
        self.policy.title_case_each_word = each_word;
        self
    }

    /// Bound the number of concurrent engine calls in
    /// [`batch_translate_concurrent`].
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn dictionary(&self) -> &DictionaryIndex {
        &self.dictionary
    }

    /// Translate one text with terminology control.
    pub async fn translate(&self, text: &str) -> TcResult<TranslationResult> {
        let started = Instant::now();

        let mut sequence = PlaceholderSequence::new();
        let mut table = PlaceholderTable::new();
        let preprocessed = self.preprocess(text, &mut sequence, &mut table);
        tracing::debug!("preprocessed: {}", preprocessed);

        let (engine_text, pivot_text) = self.call_engine(&preprocessed).await?;

        Ok(self.assemble(text, preprocessed, engine_text, pivot_text, &table, started))
    }

    /// Translate several texts as one engine unit.
    ///
    /// All items share a placeholder sequence, so tokens stay unique across
    /// the whole batch even when the engine reflows or merges text. A failed
    /// engine call fails the batch — results are all-or-nothing.
    pub async fn batch_translate(&self, texts: &[String]) -> TcResult<Vec<TranslationResult>> {
        let started = Instant::now();

        let mut sequence = PlaceholderSequence::new();
        let mut tables = Vec::with_capacity(texts.len());
        let mut preprocessed = Vec::with_capacity(texts.len());
        for text in texts {
            let mut table = PlaceholderTable::new();
            preprocessed.push(self.preprocess(text, &mut sequence, &mut table));
            tables.push(table);
        }

        let (engine_texts, pivot_texts) = self.call_engine_batch(&preprocessed).await?;

        let mut results = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let pivot = pivot_texts.as_ref().map(|p| p[i].clone());
            results.push(self.assemble(
                text,
                preprocessed[i].clone(),
                engine_texts[i].clone(),
                pivot,
                &tables[i],
                started,
            ));
        }
        Ok(results)
    }

    /// Translate texts as independent item pipelines, at most
    /// `max_in_flight` engine calls outstanding at a time.
    ///
    /// Results are index-aligned with the input; each item fails or succeeds
    /// on its own. Placeholder numbering restarts per item, which is safe
    /// because each item is its own engine unit.
    pub async fn batch_translate_concurrent(
        &self,
        texts: &[String],
    ) -> Vec<TcResult<TranslationResult>> {
        let limiter = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks: JoinSet<(usize, TcResult<TranslationResult>)> = JoinSet::new();

        for (i, text) in texts.iter().enumerate() {
            let translator = self.clone();
            let limiter = limiter.clone();
            let text = text.clone();
            tasks.spawn(async move {
                let permit = limiter.acquire_owned().await.map_err(|_| {
                    TcError::TranslationError("concurrency limiter closed".to_string())
                });
                let result = match permit {
                    Ok(_permit) => translator.translate(&text).await,
                    Err(e) => Err(e),
                };
                (i, result)
            });
        }

        let mut results: Vec<TcResult<TranslationResult>> = (0..texts.len())
            .map(|_| {
                Err(TcError::TranslationError(
                    "translation task did not complete".to_string(),
                ))
            })
            .collect();
        while let Some(joined) = tasks.join_next().await {
            if let Ok((i, result)) = joined {
                results[i] = result;
            }
        }
        results
    }

    /// Replace dictionary matches with placeholder tokens across all
    /// sentences of `text`.
    fn preprocess(
        &self,
        text: &str,
        sequence: &mut PlaceholderSequence,
        table: &mut PlaceholderTable,
    ) -> String {
        if self.dictionary.is_empty() {
            return text.to_string();
        }
        let matches = self.collect_matches(text);
        encode_matches(text, &matches, sequence, table)
    }

    fn collect_matches(&self, text: &str) -> Vec<TermMatch> {
        let mut matches = Vec::new();
        for (sentence_start, sentence) in split_sentences(text) {
            for span in self.segmenter.segment(sentence) {
                let phrase = span.text(sentence);
                let (content, content_offset) = match span.kind {
                    SpanKind::ProperNoun => (phrase, 0),
                    SpanKind::NounPhrase => {
                        let split = split_leading_stopwords(phrase);
                        (split.content, split.content_offset)
                    }
                };
                if content.is_empty() {
                    continue;
                }
                let base = sentence_start + span.start + content_offset;
                if let Some(m) = match_content(content, base, &self.dictionary) {
                    matches.push(m);
                }
            }
        }
        matches
    }

    async fn call_engine(&self, text: &str) -> TcResult<(String, Option<String>)> {
        match &self.pivot_engine {
            Some(pivot) => {
                let hop = self
                    .client
                    .translate(text, &self.source_engine, pivot)
                    .await?;
                let out = self
                    .client
                    .translate(&hop, pivot, &self.target_engine)
                    .await?;
                Ok((out, Some(hop)))
            }
            None => {
                let out = self
                    .client
                    .translate(text, &self.source_engine, &self.target_engine)
                    .await?;
                Ok((out, None))
            }
        }
    }

    async fn call_engine_batch(
        &self,
        texts: &[String],
    ) -> TcResult<(Vec<String>, Option<Vec<String>>)> {
        match &self.pivot_engine {
            Some(pivot) => {
                let hops = self
                    .client
                    .translate_batch(texts, &self.source_engine, pivot)
                    .await?;
                let outs = self
                    .client
                    .translate_batch(&hops, pivot, &self.target_engine)
                    .await?;
                Ok((outs, Some(hops)))
            }
            None => {
                let outs = self
                    .client
                    .translate_batch(texts, &self.source_engine, &self.target_engine)
                    .await?;
                Ok((outs, None))
            }
        }
    }

    fn assemble(
        &self,
        original: &str,
        preprocessed: String,
        engine_text: String,
        pivot_text: Option<String>,
        table: &PlaceholderTable,
        started: Instant,
    ) -> TranslationResult {
        let outcome = restore_placeholders(&engine_text, table, self.policy);
        TranslationResult {
            text: outcome.text,
            original: original.to_string(),
            preprocessed,
            engine_text,
            pivot_text,
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            replacements: outcome.replacements,
            replacements_count: outcome.restored_count,
            warnings: outcome.warnings,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("provider", &self.client.provider_name())
            .field("source", &self.source_lang)
            .field("target", &self.target_lang)
            .field("pivot", &self.pivot_engine)
            .field("terms", &self.dictionary.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::mock::{MockClient, MockMode};

    fn dictionary() -> DictionaryIndex {
        DictionaryIndex::from_entries([
            ("house", "efie"),
            ("big house", "efie kɛse"),
            ("station", "gyinabea"),
        ])
    }

    fn echo_translator() -> Translator {
        Translator::new(
            Arc::new(MockClient::new(MockMode::Echo)),
            dictionary(),
            "en",
            "ak",
        )
        .unwrap()
    }

    #[test]
    fn test_construction_converts_language_codes() {
        let translator = Translator::new(
            Arc::new(MockClient::new(MockMode::Echo)),
            DictionaryIndex::new(),
            "eng",
            "twi",
        )
        .unwrap();
        assert_eq!(translator.source_engine, "en");
        assert_eq!(translator.target_engine, "ak");
    }

    #[test]
    fn test_construction_rejects_bad_locale() {
        let result = Translator::new(
            Arc::new(MockClient::new(MockMode::Echo)),
            DictionaryIndex::new(),
            "en@US",
            "ak",
        );
        assert!(matches!(result, Err(TcError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_preprocess_replaces_matched_terms() {
        let translator = echo_translator();
        let result = translator.translate("The station is in Accra.").await.unwrap();
        assert_eq!(result.preprocessed, "The <1> is in Accra.");
        assert_eq!(result.replacements_count, 1);
    }

    #[tokio::test]
    async fn test_no_matches_means_no_placeholders() {
        let translator = echo_translator();
        let result = translator.translate("Nothing matches here.").await.unwrap();
        assert_eq!(result.preprocessed, "Nothing matches here.");
        assert_eq!(result.text, "Nothing matches here.");
        assert_eq!(result.replacements_count, 0);
        assert!(result.replacements.is_empty());
    }

    #[tokio::test]
    async fn test_longest_match_beats_shorter() {
        let translator = echo_translator();
        let result = translator.translate("a big house").await.unwrap();
        assert_eq!(result.preprocessed, "a <1>");
        assert_eq!(result.replacements[0].source, "big house");
        assert_eq!(result.replacements[0].translation, "efie kɛse");
    }

    #[tokio::test]
    async fn test_stopword_preserved_verbatim() {
        let translator = echo_translator();
        let result = translator.translate("the house").await.unwrap();
        assert_eq!(result.preprocessed, "the <1>");
        assert_eq!(result.text, "the efie");
    }

    #[tokio::test]
    async fn test_placeholders_unique_across_sentences() {
        let translator = echo_translator();
        let result = translator
            .translate("The house is old. The station is new.")
            .await
            .unwrap();
        assert_eq!(result.preprocessed, "The <1> is old. The <2> is new.");
        assert_eq!(result.replacements_count, 2);
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let translator = Translator::new(
            Arc::new(MockClient::new(MockMode::Fail("rate limited".to_string()))),
            dictionary(),
            "en",
            "ak",
        )
        .unwrap();
        let result = translator.translate("the house").await;
        assert!(matches!(result, Err(TcError::TranslationError(_))));
    }

    #[tokio::test]
    async fn test_dropped_placeholder_degrades_with_warning() {
        let translator = Translator::new(
            Arc::new(MockClient::new(MockMode::DropPlaceholders)),
            dictionary(),
            "en",
            "ak",
        )
        .unwrap();
        let result = translator.translate("the house").await.unwrap();
        assert_eq!(result.replacements_count, 0);
        assert!(!result.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_batch_shares_placeholder_numbering() {
        let translator = echo_translator();
        let texts = vec![
            "the house".to_string(),
            "the house".to_string(),
            "the house".to_string(),
        ];
        let results = translator.batch_translate(&texts).await.unwrap();
        let tokens: Vec<&str> = results.iter().map(|r| r.preprocessed.as_str()).collect();
        assert_eq!(tokens, vec!["the <1>", "the <2>", "the <3>"]);
        for result in &results {
            assert_eq!(result.text, "the efie");
            assert_eq!(result.replacements_count, 1);
            assert!(result.warnings.is_empty());
        }
    }

    #[tokio::test]
    async fn test_batch_is_order_preserving() {
        let translator = echo_translator();
        let texts = vec!["the house".to_string(), "the station".to_string()];
        let results = translator.batch_translate(&texts).await.unwrap();
        assert_eq!(results[0].original, "the house");
        assert_eq!(results[1].original, "the station");
    }

    #[tokio::test]
    async fn test_concurrent_batch_is_index_aligned() {
        let translator = echo_translator().with_max_in_flight(2);
        let texts: Vec<String> = (0..6).map(|i| format!("text {} the house", i)).collect();
        let results = translator.batch_translate_concurrent(&texts).await;
        assert_eq!(results.len(), texts.len());
        for (i, result) in results.iter().enumerate() {
            let result = result.as_ref().unwrap();
            assert_eq!(result.original, texts[i]);
        }
    }

    #[tokio::test]
    async fn test_concurrent_batch_item_failures_are_isolated() {
        // Every call fails; each slot must carry its own error.
        let translator = Translator::new(
            Arc::new(MockClient::new(MockMode::Fail("down".to_string()))),
            dictionary(),
            "en",
            "ak",
        )
        .unwrap();
        let texts = vec!["one".to_string(), "two".to_string()];
        let results = translator.batch_translate_concurrent(&texts).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_err()));
    }

    #[tokio::test]
    async fn test_pivot_records_intermediate_text() {
        let translator = Translator::new(
            Arc::new(MockClient::new(MockMode::Echo)),
            dictionary(),
            "en",
            "ak",
        )
        .unwrap()
        .with_pivot("th")
        .unwrap();
        let result = translator.translate("the house").await.unwrap();
        assert_eq!(result.pivot_text.as_deref(), Some("the <1>"));
        assert_eq!(result.text, "the efie");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let translator = echo_translator();
        let result = translator.translate("").await.unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.replacements_count, 0);
    }
}
