/// Translation engine surface
///
/// The pipeline only ever talks to a [`TranslationClient`]: text with
/// placeholder tokens in, translated text with the same tokens out. The
/// engine is a black box — it knows nothing about terminology and is merely
/// expected to pass `<N>` tokens through content-wise unchanged.
///
/// Two implementations ship with the crate:
///
/// 1. **GoogleTranslateClient** — the public Google Translate web endpoint
/// 2. **MockClient** — deterministic, API-free behaviors for tests
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use google_translate::GoogleTranslateClient;
pub use mock::{MockClient, MockMode};
pub use translator::{TranslationClient, normalize_locale, validate_locale};
