//! Request operations: transliterate, stress-tail, detect-rhyme.
//!
//! Each operation is a single stateless pass:
//!
//! ```text
//! parse language ──► normalise word(s) ──► provider ──► stress tail ──► result
//!       │
//!       └─ unsupported: short-circuit, no provider call
//! ```
//!
//! Operations are synchronous because providers may block (child
//! processes). The HTTP layer runs them on the blocking pool.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RimaError};
use crate::language::{Language, DEFAULT_LANGUAGE_CODE};
use crate::provider::ProviderRegistry;
use crate::rhyme::{normalize_word, stress_tail, tails_rhyme};

/// Result of `transliterate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    /// Normalised word.
    pub word: String,
    pub language: Language,
    pub ipa: String,
}

/// Result of `stress_tail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressTailResult {
    pub word: String,
    pub language: Language,
    pub ipa: String,
    pub stress_tail: String,
    pub success: bool,
}

/// Result of `detect_rhyme`.
///
/// `word1`/`word2` echo the caller's input as received, while the
/// transcriptions are computed from the normalised forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeResult {
    pub word1: String,
    pub word2: String,
    pub language: Language,
    pub ipa1: String,
    pub ipa2: String,
    pub stress_tail1: String,
    pub stress_tail2: String,
    pub rhyme: bool,
}

/// Resolve an optional caller-supplied language code.
pub fn resolve_language(raw: Option<&str>) -> Result<Language> {
    Language::parse_code(raw.unwrap_or(DEFAULT_LANGUAGE_CODE))
}

/// Unwrap a required request field.
pub fn require_field<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    value.ok_or(RimaError::MissingField(name))
}

/// Read-only façade over a provider registry.
#[derive(Clone, Debug)]
pub struct RhymeService {
    registry: ProviderRegistry,
}

impl RhymeService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    fn ipa_for(&self, language: Language, word: &str) -> Result<String> {
        let provider = self.registry.require(language)?;
        provider.transliterate(word)
    }

    pub fn transliterate(&self, word: &str, language: Language) -> Result<Transliteration> {
        let word = normalize_word(word);
        let ipa = self.ipa_for(language, &word)?;
        debug!(language = %language, word = %word, ipa = %ipa, "transliterate");
        Ok(Transliteration {
            word,
            language,
            ipa,
        })
    }

    pub fn stress_tail(&self, word: &str, language: Language) -> Result<StressTailResult> {
        let Transliteration {
            word,
            language,
            ipa,
        } = self.transliterate(word, language)?;
        let stress_tail = stress_tail(&ipa).to_string();
        Ok(StressTailResult {
            word,
            language,
            ipa,
            stress_tail,
            success: true,
        })
    }

    pub fn detect_rhyme(&self, word1: &str, word2: &str, language: Language) -> Result<RhymeResult> {
        let ipa1 = self.ipa_for(language, &normalize_word(word1))?;
        let ipa2 = self.ipa_for(language, &normalize_word(word2))?;
        let stress_tail1 = stress_tail(&ipa1).to_string();
        let stress_tail2 = stress_tail(&ipa2).to_string();
        let rhyme = tails_rhyme(&ipa1, &ipa2);
        debug!(
            language = %language,
            tail1 = %stress_tail1,
            tail2 = %stress_tail2,
            rhyme,
            "detect_rhyme"
        );
        Ok(RhymeResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            language,
            ipa1,
            ipa2,
            stress_tail1,
            stress_tail2,
            rhyme,
        })
    }
}
