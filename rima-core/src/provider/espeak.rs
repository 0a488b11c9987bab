//! `EspeakTransliterator` — delegates to an external `espeak-ng` process.
//!
//! Each call spawns `espeak-ng -q --ipa -v <voice> -- <word>` and returns
//! its trimmed stdout. espeak-ng marks primary stress with `ˈ` and
//! secondary stress with `ˌ`; both are passed through untouched.
//!
//! The process is blocking. Callers on an async runtime should invoke the
//! provider from a blocking-capable thread.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, RimaError};
use crate::language::Language;
use crate::provider::Transliterator;

pub const BACKEND_NAME: &str = "espeak";

pub struct EspeakTransliterator {
    language: Language,
    binary: PathBuf,
}

impl EspeakTransliterator {
    pub fn new(language: Language, binary: impl Into<PathBuf>) -> Self {
        Self {
            language,
            binary: binary.into(),
        }
    }

    /// Arguments passed to espeak-ng for `word`.
    pub fn command_args<'a>(&self, word: &'a str) -> [&'a str; 6] {
        ["-q", "--ipa", "-v", self.language.espeak_voice(), "--", word]
    }

    fn transliteration_error(&self, word: &str, detail: impl Into<String>) -> RimaError {
        RimaError::Transliteration {
            language: self.language,
            word: word.to_string(),
            detail: detail.into(),
        }
    }
}

impl Transliterator for EspeakTransliterator {
    fn language(&self) -> Language {
        self.language
    }

    fn warm_up(&self) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| RimaError::ProviderUnavailable {
                backend: BACKEND_NAME,
                detail: format!("{}: {e}", self.binary.display()),
            })?;
        if !output.status.success() {
            return Err(RimaError::ProviderUnavailable {
                backend: BACKEND_NAME,
                detail: format!("{} --version exited with {}", self.binary.display(), output.status),
            });
        }
        debug!(
            language = %self.language,
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "espeak-ng warm-up ok"
        );
        Ok(())
    }

    fn transliterate(&self, word: &str) -> Result<String> {
        if word.is_empty() {
            return Ok(String::new());
        }

        let output = Command::new(&self.binary)
            .args(self.command_args(word))
            .output()
            .map_err(|e| self.transliteration_error(word, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.transliteration_error(
                word,
                format!("espeak-ng exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| self.transliteration_error(word, format!("non-UTF-8 output: {e}")))?;

        Ok(join_clauses(&stdout))
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}

/// espeak-ng ends each clause with a newline. Trim every clause and join
/// them with one space; spaces inside a clause are kept.
fn join_clauses(stdout: &str) -> String {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
