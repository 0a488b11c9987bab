//! Transliteration provider abstraction.
//!
//! The `Transliterator` trait decouples the request operations from any
//! specific grapheme-to-phoneme backend (built-in rule tables, espeak-ng,
//! test doubles, etc.).
//!
//! Providers are built once per language at startup and then shared
//! read-only, so `transliterate` takes `&self` and implementors must be
//! `Send + Sync`. No lock sits in front of a provider.

pub mod espeak;
pub mod rules;
mod tables;

pub use espeak::EspeakTransliterator;
pub use rules::RuleTransliterator;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, RimaError};
use crate::language::Language;

/// Contract for grapheme-to-phoneme backends.
pub trait Transliterator: Send + Sync + 'static {
    /// Language this instance is bound to.
    fn language(&self) -> Language;

    /// One-time readiness check, called once at startup before the
    /// provider is published in a registry.
    ///
    /// # Errors
    /// Returns an error if the backend cannot serve requests (missing
    /// binary, broken tables).
    fn warm_up(&self) -> Result<()>;

    /// Transcribe an already-normalised word into IPA.
    ///
    /// Characters the backend cannot map are the backend's business;
    /// callers do not second-guess the output.
    fn transliterate(&self, word: &str) -> Result<String>;

    /// Short backend name for logs and status output.
    fn backend_name(&self) -> &'static str;
}

/// Cheaply clonable, thread-safe handle to any `Transliterator`.
#[derive(Clone)]
pub struct ProviderHandle(pub Arc<dyn Transliterator>);

impl ProviderHandle {
    pub fn new<T: Transliterator>(provider: T) -> Self {
        Self(Arc::new(provider))
    }

    pub fn language(&self) -> Language {
        self.0.language()
    }

    pub fn backend_name(&self) -> &'static str {
        self.0.backend_name()
    }

    /// Run the provider and translate any failure into
    /// `RimaError::Transliteration` tagged with the word and language.
    pub fn transliterate(&self, word: &str) -> Result<String> {
        self.0.transliterate(word).map_err(|e| match e {
            err @ RimaError::Transliteration { .. } => err,
            other => RimaError::Transliteration {
                language: self.language(),
                word: word.to_string(),
                detail: other.to_string(),
            },
        })
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("language", &self.language())
            .field("backend", &self.backend_name())
            .finish()
    }
}

/// Which backend family to construct for every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Built-in grapheme rule tables.
    Rules,
    /// External `espeak-ng` process at the given path.
    Espeak { binary: PathBuf },
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Rules => rules::BACKEND_NAME,
            BackendKind::Espeak { .. } => espeak::BACKEND_NAME,
        }
    }
}

/// Language → provider lookup, fixed after construction.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<Language, ProviderHandle>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A later entry for the same language replaces
    /// the earlier one; the handle's own language is the key.
    pub fn with(mut self, provider: ProviderHandle) -> Self {
        self.providers.insert(provider.language(), provider);
        self
    }

    /// Construct and warm up one provider per supported language.
    ///
    /// # Errors
    /// The first warm-up failure aborts construction.
    pub fn build(kind: &BackendKind) -> Result<Self> {
        let mut registry = Self::new();
        for language in Language::ALL {
            let handle = match kind {
                BackendKind::Rules => ProviderHandle::new(RuleTransliterator::new(language)),
                BackendKind::Espeak { binary } => {
                    ProviderHandle::new(EspeakTransliterator::new(language, binary.clone()))
                }
            };
            handle.0.warm_up()?;
            info!(
                language = %language,
                script = language.script_id(),
                backend = handle.backend_name(),
                "transliteration provider ready"
            );
            registry = registry.with(handle);
        }
        Ok(registry)
    }

    pub fn get(&self, language: Language) -> Option<&ProviderHandle> {
        self.providers.get(&language)
    }

    /// Resolve a provider, reporting a missing one as unsupported.
    pub fn require(&self, language: Language) -> Result<&ProviderHandle> {
        self.get(language)
            .ok_or_else(|| RimaError::UnsupportedLanguage(language.code().to_string()))
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.providers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
