//! Application state wiring the gateway together.
//!
//! `AppState` holds the backend client behind `BoxBackend` so handlers (and
//! their tests) never care which concrete implementation is installed.

use std::sync::Arc;

use tourmate_core::backend::{BoxBackend, ChatBackend};
use tourmate_infra::backend::HttpBackend;
use tourmate_infra::config::{load_config, resolve_data_dir};
use tourmate_types::config::GatewayConfig;

/// Shared state for all gateway handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BoxBackend>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Initialize from configuration: resolve the data dir, load config,
    /// and wire the real backend client.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        let backend = HttpBackend::new(&config);
        Ok(Self::with_backend(backend, config))
    }

    /// Build state around an arbitrary backend (used by tests to install
    /// scripted backends).
    pub fn with_backend<B: ChatBackend + 'static>(backend: B, config: GatewayConfig) -> Self {
        Self {
            backend: Arc::new(BoxBackend::new(backend)),
            config,
        }
    }
}
