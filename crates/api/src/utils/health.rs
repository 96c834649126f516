//! Health report served by `GET /health`

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Overall health of the service
///
/// The service is healthy only when every component is; `score` is the
/// healthy fraction and is reported for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub score: f64,
    pub components: Vec<ComponentHealth>,
    /// Unix timestamp (seconds) of the check
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self { is_healthy: true, score: 1.0, components: Vec::new(), timestamp: Utc::now().timestamp() }
    }

    /// Add a component check; returns self for chaining
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self.recalculate();
        self
    }

    fn recalculate(&mut self) {
        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy as f64 / self.components.len() as f64;
        self.is_healthy = healthy == self.components.len();
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    /// Component identifier (`"database"`, `"storage"`)
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_is_healthy() {
        let status = HealthStatus::new();
        assert!(status.is_healthy);
        assert_eq!(status.score, 1.0);
        assert!(status.components.is_empty());
    }

    #[test]
    fn test_any_unhealthy_component_fails_status() {
        let status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("database"))
            .add_component(ComponentHealth::unhealthy("storage", "bucket unreachable"));

        assert_eq!(status.score, 0.5);
        assert!(!status.is_healthy);
    }

    #[test]
    fn test_serializes_camel_case() {
        let status = HealthStatus::new().add_component(ComponentHealth::healthy("database"));
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["isHealthy"], true);
        assert_eq!(json["components"][0]["name"], "database");
    }
}
