use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rima_core::error::Result;
use rima_core::{
    BackendKind, Language, ProviderHandle, ProviderRegistry, RhymeService, RimaError,
    Transliterator,
};
use rima_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Returns canned IPA and counts how often it was asked.
struct CannedProvider {
    language: Language,
    calls: Arc<AtomicUsize>,
}

impl Transliterator for CannedProvider {
    fn language(&self) -> Language {
        self.language
    }

    fn warm_up(&self) -> Result<()> {
        Ok(())
    }

    fn transliterate(&self, word: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match word {
            "boom" => Err(RimaError::Other(anyhow::anyhow!("provider exploded"))),
            "panic" => panic!("provider panicked"),
            "palun" => Ok("paˈlun".into()),
            "kalun" => Ok("kaˈlun".into()),
            "casa" => Ok("kasa".into()),
            other => Ok(other.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "canned"
    }
}

fn canned_app() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    for language in Language::ALL {
        registry = registry.with(ProviderHandle::new(CannedProvider {
            language,
            calls: Arc::clone(&calls),
        }));
    }
    let state = AppState::new(RhymeService::new(registry), "canned");
    (router(state, true), calls)
}

fn rules_app() -> Router {
    let registry = ProviderRegistry::build(&BackendKind::Rules).expect("build rule registry");
    router(AppState::new(RhymeService::new(registry), "rules"), true)
}

async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, body.to_string()).await
}

async fn post_raw(app: Router, path: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("build request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn transliterate_normalises_and_defaults_to_english() {
    let (app, _) = canned_app();
    let (status, body) = post_json(app, "/transliterate", json!({ "word": "  CASA " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": "casa", "language": "en", "ipa": "kasa" }));
}

#[tokio::test]
async fn stress_tail_endpoint_returns_tail_and_success() {
    let (app, _) = canned_app();
    let (status, body) = post_json(
        app,
        "/stress-tail",
        json!({ "word": "Palun", "language": "IT" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "palun");
    assert_eq!(body["language"], "it");
    assert_eq!(body["ipa"], "paˈlun");
    assert_eq!(body["stress_tail"], "lun");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn detect_rhyme_echoes_raw_words() {
    let (app, _) = canned_app();
    let (status, body) = post_json(
        app,
        "/detect_rhyme",
        json!({ "word1": " Palun", "word2": "kalun", "language": "it" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "word1": " Palun",
            "word2": "kalun",
            "language": "it",
            "ipa1": "paˈlun",
            "ipa2": "kaˈlun",
            "stress_tail1": "lun",
            "stress_tail2": "lun",
            "rhyme": true
        })
    );
}

#[tokio::test]
async fn unsupported_language_is_rejected_without_provider_calls() {
    let requests = [
        ("/transliterate", json!({ "word": "casa", "language": "zz" })),
        ("/stress-tail", json!({ "word": "casa", "language": "zz" })),
        (
            "/detect_rhyme",
            json!({ "word1": "casa", "word2": "masa", "language": "zz" }),
        ),
    ];
    for (path, body) in requests {
        let (app, calls) = canned_app();
        let (status, body) = post_json(app, path, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["error"], "Language not supported");
        assert_eq!(body["code"], "UNSUPPORTED_LANGUAGE");
        assert_eq!(calls.load(Ordering::SeqCst), 0, "{path}");
    }
}

#[tokio::test]
async fn missing_word_is_reported_by_name() {
    let (app, _) = canned_app();
    let (status, body) = post_json(app, "/stress-tail", json!({ "language": "it" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert_eq!(body["error"], "Missing required field: word");

    let (app, _) = canned_app();
    let (status, body) = post_json(app, "/detect_rhyme", json!({ "word1": "casa" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: word2");
}

#[tokio::test]
async fn malformed_body_is_invalid_request() {
    let (app, _) = canned_app();
    let (status, body) = post_raw(app, "/transliterate", "{not json".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (app, _) = canned_app();
    let (status, body) = post_json(app, "/transliterate", json!({ "word": 42 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn provider_failure_becomes_transliteration_failed() {
    let (app, _) = canned_app();
    let (status, body) = post_json(app, "/transliterate", json!({ "word": "boom" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "TRANSLITERATION_FAILED");
    assert_eq!(body["error"], "Transliteration failed: provider exploded");
}

#[tokio::test]
async fn provider_panic_is_contained_to_the_request() {
    let (app, _) = canned_app();
    let (status, body) = post_json(
        app.clone(),
        "/detect_rhyme",
        json!({ "word1": "panic", "word2": "casa" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "TRANSLITERATION_FAILED");

    let (status, _) = post_json(app, "/transliterate", json!({ "word": "casa" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn status_reports_languages_and_request_counts() {
    let (app, _) = canned_app();
    let _ = post_json(app.clone(), "/transliterate", json!({ "word": "casa" })).await;
    let _ = post_json(app.clone(), "/transliterate", json!({ "word": "casa", "language": "zz" })).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/status")
        .body(Body::empty())
        .expect("build request");
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["backend"], "canned");
    assert_eq!(body["languages"], json!(["en", "it", "es", "fr", "de"]));
    assert_eq!(body["requests"]["transliterate"]["count"], 2);
    assert_eq!(body["requests"]["transliterate"]["errors"], 1);
    assert_eq!(body["requests"]["detect_rhyme"]["count"], 0);
}

#[tokio::test]
async fn rule_backend_detects_italian_rhyme_end_to_end() {
    let (status, body) = post_json(
        rules_app(),
        "/detect_rhyme",
        json!({ "word1": "palun", "word2": "kalun", "language": "it" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ipa1"], "paˈlun");
    assert_eq!(body["stress_tail1"], "lun");
    assert_eq!(body["stress_tail2"], "lun");
    assert_eq!(body["rhyme"], true);
}

#[tokio::test]
async fn get_on_operation_route_is_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/transliterate")
        .body(Body::empty())
        .expect("build request");
    let response = rules_app().oneshot(request).await.expect("router response");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
