//! # rima-core
//!
//! Phonetic transcription and naive rhyme detection SDK.
//!
//! ## Architecture
//!
//! ```text
//! request ──► Language::parse_code ──► ProviderRegistry ──► Transliterator
//!                                                               │
//!                                                          IPA string
//!                                                               │
//!                                                      rhyme::stress_tail
//!                                                               │
//!                                            Transliteration / StressTailResult / RhymeResult
//! ```
//!
//! Providers are built once per language and shared read-only.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod language;
pub mod provider;
pub mod rhyme;
pub mod service;

// Convenience re-exports for downstream crates
pub use error::RimaError;
pub use language::Language;
pub use provider::{BackendKind, ProviderHandle, ProviderRegistry, Transliterator};
pub use rhyme::{normalize_word, stress_tail, PRIMARY_STRESS};
pub use service::{RhymeResult, RhymeService, StressTailResult, Transliteration};
