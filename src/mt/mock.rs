//! Mock translation client for testing
//!
//! Deterministic, API-free behaviors for exercising the pipeline without
//! network access, including the unpleasant engine behaviors the decoder has
//! to survive: word reordering and placeholder loss.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{TcError, TcResult};
use crate::mt::translator::TranslationClient;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\d+> ?").expect("placeholder pattern is valid"));

/// Simulated engine behaviors
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return input unchanged; placeholders trivially survive
    Echo,

    /// Look up `(input text, target locale)` in a fixed table, fall back to
    /// echo. The workhorse for end-to-end tests with exact engine output.
    Mappings(HashMap<(String, String), String>),

    /// Reverse word order, simulating a target language that reflows the
    /// sentence; placeholders move with their neighbors but survive intact
    ReverseWords,

    /// Strip every placeholder token, simulating an engine that swallows
    /// them; the decoder must degrade gracefully
    DropPlaceholders,

    /// Fail every request with a translation error
    Fail(String),
}

/// Deterministic stand-in for a real translation engine
#[derive(Debug, Clone)]
pub struct MockClient {
    mode: MockMode,
    delay: Duration,
}

impl MockClient {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
        }
    }

    /// Add a simulated per-request latency.
    pub fn with_delay(mode: MockMode, delay: Duration) -> Self {
        Self { mode, delay }
    }

    /// Convenience constructor for [`MockMode::Mappings`].
    pub fn with_mappings<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((String, String), String)>,
    {
        Self::new(MockMode::Mappings(entries.into_iter().collect()))
    }

    fn apply(&self, text: &str, target: &str) -> TcResult<String> {
        match &self.mode {
            MockMode::Echo => Ok(text.to_string()),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map.get(&key).cloned().unwrap_or_else(|| text.to_string()))
            }
            MockMode::ReverseWords => {
                let words: Vec<&str> = text.split_whitespace().collect();
                Ok(words.into_iter().rev().collect::<Vec<_>>().join(" "))
            }
            MockMode::DropPlaceholders => Ok(TOKEN_RE.replace_all(text, "").into_owned()),
            MockMode::Fail(msg) => Err(TcError::TranslationError(msg.clone())),
        }
    }
}

#[async_trait]
impl TranslationClient for MockClient {
    async fn translate(
        &self,
        text: &str,
        _source_locale: &str,
        target_locale: &str,
    ) -> TcResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.apply(text, target_locale)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _source_locale: &str,
        target_locale: &str,
    ) -> TcResult<Vec<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.apply(text, target_locale)?);
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
