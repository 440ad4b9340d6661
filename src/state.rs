// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, Timings};
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub timings: Timings,
}

impl AppState {
    pub fn new(session_ttl: Duration, timings: Timings) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl),
            metrics: MetricsManager::new(),
            timings,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.session_ttl, config.timings)
    }
}
