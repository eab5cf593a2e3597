//! Terminology-controlled machine translation
//!
//! Generic MT engines translate specified vocabulary however they please;
//! this crate pins that vocabulary to an externally supplied glossary while
//! the engine keeps handling grammar and function words. Dictionary terms
//! found in the input are swapped for opaque numbered tokens before the
//! engine sees the text, then swapped back for their glossary translations —
//! with the source casing and sentence-initial capitalization recovered —
//! after the engine is done.
//!
//! The moving parts, in pipeline order:
//!
//! 1. **Sentence splitting & phrase segmentation** — candidate noun-phrase
//!    and proper-noun spans per sentence, behind a narrow trait
//! 2. **Content-word filtering** — leading articles/determiners are peeled
//!    off and preserved verbatim
//! 3. **Terminology matching** — longest-match-wins probing of the glossary
//! 4. **Placeholder encoding** — matched spans become unique `<N>` tokens
//! 5. **Translation** — any [`TranslationClient`] backend
//! 6. **Restoration** — tokens become glossary translations with case
//!    transfer
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use glossary_mt::{DictionaryIndex, GoogleTranslateClient, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dictionary = DictionaryIndex::from_csv_path("terms.csv")?;
//!     let client = Arc::new(GoogleTranslateClient::new()?);
//!     let translator = Translator::new(client, dictionary, "en", "twi")?;
//!
//!     let result = translator.translate("The station is in Accra.").await?;
//!     println!("{}", result.text);
//!     println!("{} terms controlled", result.replacements_count);
//!     Ok(())
//! }
//! ```

pub mod dictionary;
pub mod error;
pub mod lang;
pub mod matcher;
pub mod mt;
pub mod pipeline;
pub mod placeholder;
pub mod restore;
pub mod segment;
pub mod stopwords;


pub use dictionary::{DictionaryIndex, TermSource, normalize_term};
pub use error::{TcError, TcResult};
pub use matcher::{CaseClass, TermMatch};
pub use mt::{GoogleTranslateClient, MockClient, MockMode, TranslationClient};
pub use pipeline::{TranslationResult, Translator};
pub use placeholder::{PlaceholderSequence, PlaceholderTable};
pub use restore::{Replacement, RestorePolicy};
pub use segment::{PhraseSegmenter, PhraseSpan, RuleChunker, SpanKind};
