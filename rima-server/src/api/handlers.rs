//! HTTP request handlers.
//!
//! Every POST handler follows the same shape: reject malformed bodies,
//! require the word field(s), resolve the language, then run the operation
//! on the blocking pool and map `RimaError` to a JSON error body.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rima_core::service::{require_field, resolve_language};
use rima_core::{RhymeResult, RimaError, StressTailResult, Transliteration};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::types::{error_codes, ErrorResponse, RhymeRequest, StatusResponse, WordRequest};
use crate::state::{AppState, Operation};

/// A failed request: HTTP status plus JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                code: code.to_string(),
            },
        }
    }
}

impl From<RimaError> for ApiError {
    fn from(err: RimaError) -> Self {
        match &err {
            RimaError::UnsupportedLanguage(code) => {
                debug!(language = %code, "unsupported language");
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    error_codes::UNSUPPORTED_LANGUAGE,
                    err.to_string(),
                )
            }
            RimaError::MissingField(_) => ApiError::new(
                StatusCode::BAD_REQUEST,
                error_codes::MISSING_FIELD,
                err.to_string(),
            ),
            RimaError::Transliteration { language, word, .. } => {
                warn!(language = %language, word = %word, "{err}");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::TRANSLITERATION_FAILED,
                    err.to_string(),
                )
            }
            RimaError::ProviderUnavailable { .. } => {
                error!("{err}");
                ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    error_codes::PROVIDER_UNAVAILABLE,
                    err.to_string(),
                )
            }
            RimaError::Other(_) => {
                error!("{err}");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    err.to_string(),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_REQUEST,
            rejection.body_text(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Run a provider-backed operation off the async executor. A panic inside
/// the provider is reported as a transliteration failure.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> rima_core::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(join_err) => {
            error!("provider task failed: {join_err}");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::TRANSLITERATION_FAILED,
                format!("Transliteration failed: {join_err}"),
            ))
        }
    }
}

fn respond<T: Serialize>(
    state: &AppState,
    op: Operation,
    started: Instant,
    result: Result<T, ApiError>,
) -> Response {
    state.record(op, started, result.is_ok());
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn run_transliterate(
    state: &AppState,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<Transliteration, ApiError> {
    let Json(req) = payload?;
    let word = require_field(req.word.as_deref(), "word")?.to_string();
    let language = resolve_language(req.language.as_deref())?;
    let service = state.service.clone();
    run_blocking(move || service.transliterate(&word, language)).await
}

async fn run_stress_tail(
    state: &AppState,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<StressTailResult, ApiError> {
    let Json(req) = payload?;
    let word = require_field(req.word.as_deref(), "word")?.to_string();
    let language = resolve_language(req.language.as_deref())?;
    let service = state.service.clone();
    run_blocking(move || service.stress_tail(&word, language)).await
}

async fn run_detect_rhyme(
    state: &AppState,
    payload: Result<Json<RhymeRequest>, JsonRejection>,
) -> Result<RhymeResult, ApiError> {
    let Json(req) = payload?;
    let word1 = require_field(req.word1.as_deref(), "word1")?.to_string();
    let word2 = require_field(req.word2.as_deref(), "word2")?.to_string();
    let language = resolve_language(req.language.as_deref())?;
    let service = state.service.clone();
    run_blocking(move || service.detect_rhyme(&word1, &word2, language)).await
}

/// POST /transliterate
pub async fn transliterate(
    State(state): State<AppState>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let result = run_transliterate(&state, payload).await;
    respond(&state, Operation::Transliterate, started, result)
}

/// POST /stress-tail
pub async fn stress_tail(
    State(state): State<AppState>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let result = run_stress_tail(&state, payload).await;
    respond(&state, Operation::StressTail, started, result)
}

/// POST /detect_rhyme
pub async fn detect_rhyme(
    State(state): State<AppState>,
    payload: Result<Json<RhymeRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let result = run_detect_rhyme(&state, payload).await;
    respond(&state, Operation::DetectRhyme, started, result)
}

/// GET /status
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let response = StatusResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.to_string(),
        languages: state.service.registry().languages().collect(),
        requests: state.metrics_snapshot(),
    };
    (StatusCode::OK, Json(response))
}
