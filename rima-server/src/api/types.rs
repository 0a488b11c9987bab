//! Request/response types for the HTTP API.

use rima_core::Language;
use serde::{Deserialize, Serialize};

use crate::state::RequestMetricsSnapshot;

/// Body of `/transliterate` and `/stress-tail`.
///
/// `word` is optional at the serde level so a missing field is reported as
/// `MISSING_FIELD` instead of a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub word: Option<String>,
    pub language: Option<String>,
}

/// Body of `/detect_rhyme`.
#[derive(Debug, Deserialize)]
pub struct RhymeRequest {
    pub word1: Option<String>,
    pub word2: Option<String>,
    pub language: Option<String>,
}

/// `GET /status` response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub languages: Vec<Language>,
    pub requests: RequestMetricsSnapshot,
}

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub mod error_codes {
    pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const TRANSLITERATION_FAILED: &str = "TRANSLITERATION_FAILED";
    pub const PROVIDER_UNAVAILABLE: &str = "PROVIDER_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
