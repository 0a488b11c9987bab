//! The closed set of supported languages.
//!
//! | Code | Script identifier | espeak-ng voice |
//! |------|-------------------|-----------------|
//! | `en` | `eng-Latn`        | `en-us`         |
//! | `it` | `ita-Latn`        | `it`            |
//! | `es` | `spa-Latn`        | `es`            |
//! | `fr` | `fra-Latn`        | `fr`            |
//! | `de` | `deu-Latn`        | `de`            |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RimaError;

/// Code used when a request omits the `language` field.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    It,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::It,
        Language::Es,
        Language::Fr,
        Language::De,
    ];

    /// Short code as accepted on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    /// Locale/script identifier the provider is bound to.
    pub fn script_id(self) -> &'static str {
        match self {
            Language::En => "eng-Latn",
            Language::It => "ita-Latn",
            Language::Es => "spa-Latn",
            Language::Fr => "fra-Latn",
            Language::De => "deu-Latn",
        }
    }

    pub fn espeak_voice(self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::It => "it",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    /// Parse a caller-supplied code. Surrounding whitespace and case are ignored;
    /// anything outside the closed set is rejected rather than defaulted.
    pub fn parse_code(raw: &str) -> Result<Self, RimaError> {
        match raw.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "it" => Ok(Language::It),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            _ => Err(RimaError::UnsupportedLanguage(raw.to_string())),
        }
    }
}

impl FromStr for Language {
    type Err = RimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse_code(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
