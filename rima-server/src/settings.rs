//! Server settings (JSON file, overridable from the environment).
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `settings.json` at `RIMA_SETTINGS` or the platform data directory
//! 3. `RIMA_*` environment variables

use std::fs;
use std::path::{Path, PathBuf};

use rima_core::BackendKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub backend: String,
    pub espeak_binary: String,
    pub log_filter: String,
    pub cors_allow_any: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            backend: "rules".into(),
            espeak_binary: "espeak-ng".into(),
            log_filter: "rima=info".into(),
            cors_allow_any: true,
        }
    }
}

impl ServerSettings {
    pub fn normalize(&mut self) {
        self.backend = normalize_backend(&self.backend);
        self.bind_address = non_empty_or(&self.bind_address, "0.0.0.0");
        self.espeak_binary = non_empty_or(&self.espeak_binary, "espeak-ng");
        self.log_filter = non_empty_or(&self.log_filter, "rima=info");
        if self.port == 0 {
            self.port = DEFAULT_PORT;
        }
    }

    /// Apply `RIMA_*` overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("RIMA_BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(port) = lookup("RIMA_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.port = p,
                Err(e) => tracing::warn!("ignoring RIMA_PORT={port:?}: {e}"),
            }
        }
        if let Some(backend) = lookup("RIMA_BACKEND") {
            self.backend = backend;
        }
        if let Some(binary) = lookup("RIMA_ESPEAK_BINARY") {
            self.espeak_binary = binary;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn backend_kind(&self) -> BackendKind {
        match self.backend.as_str() {
            "espeak" => BackendKind::Espeak {
                binary: PathBuf::from(&self.espeak_binary),
            },
            _ => BackendKind::Rules,
        }
    }
}

pub fn normalize_backend(raw: &str) -> String {
    match raw.trim().to_ascii_lowercase().as_str() {
        "espeak" | "espeak-ng" | "espeakng" => "espeak".into(),
        _ => "rules".into(),
    }
}

fn non_empty_or(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.into()
    } else {
        trimmed.into()
    }
}

/// `RIMA_SETTINGS` wins; otherwise `<config dir>/rima/settings.json`.
pub fn default_settings_path() -> PathBuf {
    settings_path_from(|key| std::env::var_os(key))
}

fn settings_path_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<std::ffi::OsString>,
{
    if let Some(path) = lookup("RIMA_SETTINGS").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = if cfg!(target_os = "windows") {
        lookup("APPDATA").map(PathBuf::from)
    } else {
        lookup("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(".config")))
    };
    config_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rima")
        .join("settings.json")
}

/// Load settings from `path`. A missing or unparseable file yields defaults.
pub fn load_settings(path: &Path) -> ServerSettings {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<ServerSettings>(&raw).ok())
        .unwrap_or_default()
}

/// File, then process environment, then normalisation.
pub fn resolve_settings(path: &Path) -> ServerSettings {
    let mut settings = load_settings(path);
    settings.apply_env(|key| std::env::var(key).ok());
    settings.normalize();
    settings
}

/// Write `settings` as pretty JSON, replacing the file atomically.
pub fn save_settings(path: &Path, settings: &ServerSettings) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(settings).map_err(std::io::Error::other)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json)?;
    fs::rename(&staging, path)
}
