use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::chatbot::Intent;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MetricsData {
    pub intent_usage: HashMap<String, u64>,
    pub action_usage: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn increment_intent(&self, intent: Intent) {
        let mut data = self.inner.write().await;
        *data.intent_usage.entry(intent.as_str().to_string()).or_insert(0) += 1;
    }

    pub async fn increment_action(&self, label: &str) {
        let mut data = self.inner.write().await;
        *data.action_usage.entry(label.to_string()).or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
