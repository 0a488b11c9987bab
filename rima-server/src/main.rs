//! rima HTTP service entry point.
//!
//! Startup order: settings → logging → provider registry (built and warmed
//! up once per language) → router → serve. A provider that fails to warm
//! up aborts startup.

use anyhow::Context;
use rima_core::{ProviderRegistry, RhymeService};
use rima_server::settings::{default_settings_path, resolve_settings, save_settings};
use rima_server::{router, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path = default_settings_path();
    let settings = resolve_settings(&settings_path);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&settings.log_filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rima=info")),
        )
        .init();

    info!(
        path = %settings_path.display(),
        backend = %settings.backend,
        "rima starting"
    );

    if !settings_path.exists() {
        if let Err(e) = save_settings(&settings_path, &settings) {
            warn!("could not write default settings to {}: {e}", settings_path.display());
        }
    }

    let backend = settings.backend_kind();
    let registry = tokio::task::spawn_blocking(move || ProviderRegistry::build(&backend))
        .await
        .context("provider warm-up task panicked")?
        .context("failed to initialise transliteration providers")?;
    info!(languages = registry.len(), "provider registry ready");

    let state = AppState::new(RhymeService::new(registry), settings.backend_kind().name());
    let app = router(state, settings.cors_allow_any);

    rima_server::api::serve(app, &settings.listen_addr())
        .await
        .context("rima API server error")?;
    Ok(())
}
