//! Translation client trait and locale helpers
//!
//! The trait decouples the substitution pipeline from any specific MT
//! backend. All methods are async because real backends are network-bound;
//! everything else in the pipeline is pure computation.

use crate::error::{TcError, TcResult};
use async_trait::async_trait;

/// Generic machine translation backend
///
/// The one contract the pipeline relies on: placeholder tokens `<N>` in the
/// input must come back content-wise unchanged. Surrounding punctuation,
/// spacing and token order may be reflowed freely. The pipeline does not
/// verify this beyond checking that tokens are still present; a backend that
/// mangles tokens degrades output quality but never crashes the caller.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Translate a single text from `source_locale` to `target_locale`.
    ///
    /// Fails with [`TcError::NetworkError`] on transient transport problems
    /// and [`TcError::TranslationError`] when the engine rejects the request.
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> TcResult<String>;

    /// Translate several texts in one logical operation.
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> TcResult<Vec<String>>;

    /// Human-readable backend name, for logs.
    fn provider_name(&self) -> &str;
}

/// Strip region/script subtags: `en-US` → `en`, `zh-Hans` → `zh`.
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Reject locale codes with characters outside ISO 639 conventions.
pub fn validate_locale(locale: &str) -> TcResult<()> {
    if locale.is_empty() {
        return Err(TcError::InvalidLocale("locale code is empty".to_string()));
    }
    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TcError::InvalidLocale(format!(
            "invalid characters in locale code: {}",
            locale
        )));
    }
    Ok(())
}
