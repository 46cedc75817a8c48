//! Configuration loader for TourMate.
//!
//! Reads `config.toml` from the data directory (`~/.tourmate/` in
//! production) and deserializes it into [`GatewayConfig`]. Falls back to
//! defaults when the file is missing or malformed, then applies environment
//! overrides (`TOURMATE_BACKEND_URL`).

use std::path::{Path, PathBuf};

use tourmate_types::config::GatewayConfig;

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "TOURMATE_BACKEND_URL";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TOURMATE_DATA_DIR";

/// Resolve the data directory.
///
/// `TOURMATE_DATA_DIR` wins; otherwise `~/.tourmate`; the current directory
/// as a last resort when no home directory exists.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".tourmate"),
        None => PathBuf::from(".tourmate"),
    }
}

/// Load gateway configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GatewayConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - `TOURMATE_BACKEND_URL` overrides the backend URL in all cases.
pub async fn load_config(data_dir: &Path) -> GatewayConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<GatewayConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                GatewayConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            GatewayConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            GatewayConfig::default()
        }
    };

    apply_backend_url_override(&mut config, std::env::var(BACKEND_URL_ENV).ok());
    config
}

/// Apply the backend URL environment override, if present and non-empty.
fn apply_backend_url_override(config: &mut GatewayConfig, value: Option<String>) {
    if let Some(url) = value {
        if !url.trim().is_empty() {
            config.backend_url = url.trim().to_string();
        }
    }
}
