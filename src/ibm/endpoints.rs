//! Service endpoints
//!
//! Every module descriptor names an owning service; the engine resolves the
//! service to a base URL here. Precedence: explicit override (config file
//! or embedding engine), then the `<SERVICE>_URL` environment variable,
//! then the public production endpoint.

use std::collections::HashMap;
use url::Url;

/// Public production endpoints per service
const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    ("resource_controller", "https://resource-controller.cloud.ibm.com"),
    ("iam_identity", "https://iam.cloud.ibm.com"),
    ("schematics", "https://schematics.cloud.ibm.com"),
];

/// Per-service endpoint resolution
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    overrides: HashMap<String, String>,
}

impl Endpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a service -> URL override map (config file contents)
    pub fn from_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Add one override, replacing any previous value for the service
    pub fn with_override(mut self, service: &str, url: &str) -> Self {
        self.overrides.insert(service.to_string(), url.to_string());
        self
    }

    /// Resolve the base URL for a service
    pub fn url_for(&self, service: &str) -> Option<Url> {
        if let Some(raw) = self.overrides.get(service) {
            return parse_endpoint(service, raw);
        }

        if let Ok(raw) = std::env::var(format!("{}_URL", service.to_uppercase())) {
            if let Some(url) = parse_endpoint(service, &raw) {
                return Some(url);
            }
        }

        DEFAULT_ENDPOINTS
            .iter()
            .find(|(name, _)| *name == service)
            .and_then(|(_, raw)| parse_endpoint(service, raw))
    }
}

fn parse_endpoint(service: &str, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Invalid endpoint URL for service {}: {}", service, e);
            None
        }
    }
}
