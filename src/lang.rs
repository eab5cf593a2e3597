//! Language code conversion
//!
//! The public API accepts both ISO 639-3 codes (`twi`, `ewe`, `gaa`) and the
//! two-letter codes the translation engine expects (`ak`, `ee`). Conversion
//! happens once at translator construction; the rest of the pipeline only
//! sees engine codes.

/// ISO 639-3 → engine (ISO 639-1 where one exists) code pairs
const LANGUAGE_CODE_MAPPING: &[(&str, &str)] = &[
    ("eng", "en"),
    ("spa", "es"),
    ("fra", "fr"),
    ("tha", "th"),
    // Ghanaian languages
    ("twi", "ak"),
    ("aka", "ak"),
    ("gaa", "gaa"),
    ("ewe", "ee"),
    // Other African languages
    ("hau", "ha"),
    ("ibo", "ig"),
    ("yor", "yo"),
    ("zul", "zu"),
    ("swa", "sw"),
    ("amh", "am"),
];

/// Engine codes the translation engine is known to handle
const SUPPORTED_ENGINE_CODES: &[&str] = &[
    "en", "es", "fr", "de", "zh", "ja", "ko", "ru", "ar", "hi", "pt", "it", "nl", "pl", "sv",
    "da", "fi", "el", "cs", "ro", "hu", "sk", "bg", "sl", "lt", "lv", "et", "mt", "th", // pivot
    "ak", "gaa", "ee", "ha", "ig", "yo", "zu", "sw", "am",
];

/// Convert a language code to the form the translation engine expects.
///
/// Two-letter codes pass through unchanged; known three-letter codes are
/// mapped; unknown three-letter codes fall back to their first two letters.
pub fn to_engine_code(code: &str) -> String {
    let code = code.to_lowercase();
    if code.len() == 2 {
        return code;
    }
    for (iso3, engine) in LANGUAGE_CODE_MAPPING {
        if *iso3 == code {
            return (*engine).to_string();
        }
    }
    // "gaa" and friends keep their three-letter form via the table above;
    // anything else gets truncated to a two-letter guess
    if code.len() > 2 {
        code.chars().take(2).collect()
    } else {
        code
    }
}

/// Reverse conversion: engine code back to an ISO 639-3 code where known.
pub fn from_engine_code(code: &str) -> String {
    let code = code.to_lowercase();
    if code.len() == 3 {
        return code;
    }
    for (iso3, engine) in LANGUAGE_CODE_MAPPING {
        if *engine == code {
            return (*iso3).to_string();
        }
    }
    code
}

/// Whether the translation engine is likely to accept this language.
///
/// Best-effort check used to warn at construction time; an unsupported code
/// is not an error because engine coverage changes over time.
pub fn is_engine_supported(code: &str) -> bool {
    let engine = to_engine_code(code);
    SUPPORTED_ENGINE_CODES.contains(&engine.as_str())
}
