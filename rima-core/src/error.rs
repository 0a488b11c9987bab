use thiserror::Error;

use crate::language::Language;

/// All errors produced by rima-core.
#[derive(Debug, Error)]
pub enum RimaError {
    #[error("Language not supported")]
    UnsupportedLanguage(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Transliteration failed: {detail}")]
    Transliteration {
        language: Language,
        word: String,
        detail: String,
    },

    #[error("{backend} provider unavailable: {detail}")]
    ProviderUnavailable {
        backend: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RimaError>;
