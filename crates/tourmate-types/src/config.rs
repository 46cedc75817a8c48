//! Gateway configuration types for TourMate.
//!
//! `GatewayConfig` represents the top-level `config.toml` that controls
//! the backend base URL, the gateway bind address, and request timeouts.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the TourMate gateway.
///
/// Loaded from `~/.tourmate/config.toml`. All fields have sensible defaults;
/// `TOURMATE_BACKEND_URL` overrides the backend URL at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the external AI backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Address the gateway HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Per-request timeout for backend calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default_values() {
        let config = GatewayConfig::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:8000");
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_gateway_config_partial_toml_fills_defaults() {
        let config: GatewayConfig =
            toml::from_str("backend_url = \"http://10.0.0.5:9000\"").unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
