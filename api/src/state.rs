use axum::extract::FromRef;
use prometheus::Registry;
use std::time::Instant;

use crate::config::ApiConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: ApiConfig, registry: Registry) -> Self {
        Self {
            config,
            started_at: Instant::now(),
            registry,
        }
    }
}

impl FromRef<AppState> for ApiConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
