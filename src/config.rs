//! Configuration Management
//!
//! Handles persistent configuration storage for ibmod.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::ibm::endpoints::Endpoints;
use serde::{Deserialize, Serialize};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Per-service endpoint overrides (service name -> base URL)
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ibmod").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Endpoint resolution seeded with this config's overrides
    /// (config override > `<SERVICE>_URL` env var > production default)
    pub fn effective_endpoints(&self) -> Endpoints {
        Endpoints::from_overrides(self.endpoints.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_overrides_flow_into_endpoints() {
        let mut config = Config::default();
        config.endpoints.insert(
            "resource_controller".to_string(),
            "http://localhost:9100".to_string(),
        );

        let endpoints = config.effective_endpoints();
        assert_eq!(
            endpoints.url_for("resource_controller").unwrap().as_str(),
            "http://localhost:9100/"
        );
        // Unlisted services still fall back to defaults
        assert!(endpoints.url_for("iam_identity").is_some());
    }
}
