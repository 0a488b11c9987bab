//! rima HTTP API.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/transliterate` | [`handlers::transliterate`] |
//! | POST | `/stress-tail` | [`handlers::stress_tail`] |
//! | POST | `/detect_rhyme` | [`handlers::detect_rhyme`] |
//! | GET | `/status` | [`handlers::status`] |

pub mod handlers;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::state::AppState;

/// Build the application router. `cors_allow_any` opens every origin,
/// method and header.
pub fn router(state: AppState, cors_allow_any: bool) -> Router {
    let app = Router::new()
        .route("/transliterate", post(handlers::transliterate))
        .route("/stress-tail", post(handlers::stress_tail))
        .route("/detect_rhyme", post(handlers::detect_rhyme))
        .route("/status", get(handlers::status));

    let app = if cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    };

    app.with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(app: Router, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("failed to bind rima API server on {addr}: {e}");
        e
    })?;
    info!("rima API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
