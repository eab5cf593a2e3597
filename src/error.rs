/// Error types for terminology-controlled translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcError {
    /// Invalid construction-time configuration (bad options, unusable client)
    ConfigError(String),
    /// Terminology source could not be read or parsed
    DictionaryError(String),
    /// Malformed source or target language code
    InvalidLocale(String),
    /// Transient failure talking to the translation engine (network, rate limit)
    NetworkError(String),
    /// The translation engine rejected the request or returned garbage
    TranslationError(String),
}

impl std::fmt::Display for TcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TcError::DictionaryError(msg) => write!(f, "Dictionary error: {}", msg),
            TcError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            TcError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            TcError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
        }
    }
}

impl std::error::Error for TcError {}

impl From<reqwest::Error> for TcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            TcError::NetworkError(err.to_string())
        } else {
            TcError::TranslationError(err.to_string())
        }
    }
}

impl From<csv::Error> for TcError {
    fn from(err: csv::Error) -> Self {
        TcError::DictionaryError(err.to_string())
    }
}

/// Result type for terminology-controlled translation operations
pub type TcResult<T> = Result<T, TcError>;
