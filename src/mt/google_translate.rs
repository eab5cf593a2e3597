//! Google Translate web endpoint client
//!
//! Talks to the keyless `translate_a/single` endpoint that the translate
//! web widget uses. No API key is required; in exchange the endpoint is
//! aggressively rate limited, so batch translation spaces requests out and
//! callers should keep concurrency modest.
//!
//! The response is a nested JSON array; element `[0]` holds the translated
//! segments and each segment's first element is its text. Everything else in
//! the payload is ignored.

use std::time::Duration;

use crate::error::{TcError, TcResult};
use crate::mt::translator::{TranslationClient, normalize_locale, validate_locale};
use async_trait::async_trait;

/// Client for the public Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateClient {
    /// Maximum characters per request the endpoint reliably accepts
    const MAX_CHARS_PER_REQUEST: usize = 15_000;

    /// Pause between consecutive batch requests, to stay under the radar of
    /// the endpoint's rate limiting
    const INTER_REQUEST_DELAY: Duration = Duration::from_millis(300);

    /// Browser-like User-Agent; the endpoint rejects obviously non-browser
    /// clients
    const USER_AGENT: &'static str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    pub fn new() -> TcResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TcError::NetworkError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://translate.googleapis.com/translate_a/single".to_string(),
        })
    }

    /// Build a client against a different endpoint URL (used by tests).
    pub fn with_base_url(base_url: String) -> TcResult<Self> {
        let mut provider = Self::new()?;
        provider.base_url = base_url;
        Ok(provider)
    }

    async fn request_translation(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> TcResult<String> {
        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, Self::USER_AGENT)
            .query(&[
                ("client", "gtx"),
                ("sl", normalize_locale(source_locale).as_str()),
                ("tl", normalize_locale(target_locale).as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                TcError::NetworkError(format!("engine unavailable ({}): {}", status, body))
            } else {
                TcError::TranslationError(format!("engine rejected request ({}): {}", status, body))
            });
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            TcError::TranslationError(format!("failed to parse engine response: {}", e))
        })?;

        // data[0] is the list of translated segments; concatenate their text.
        let segments = data
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                TcError::TranslationError("unexpected engine response shape".to_string())
            })?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }
        Ok(translated)
    }
}

impl std::fmt::Debug for GoogleTranslateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationClient for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> TcResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }
        if text.len() > Self::MAX_CHARS_PER_REQUEST {
            return Err(TcError::TranslationError(format!(
                "text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_REQUEST
            )));
        }

        self.request_translation(text, source_locale, target_locale)
            .await
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> TcResult<Vec<String>> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        let mut results = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Self::INTER_REQUEST_DELAY).await;
            }
            results.push(self.translate(text, source_locale, target_locale).await?);
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
