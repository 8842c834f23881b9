//! Service client
//!
//! Bundles a service's base URL, the resolved authenticator and the HTTP
//! layer into the client the resource modules run against. One verb method
//! here corresponds to one remote round trip.

use super::auth::Authenticator;
use super::http::{ApiError, HttpApi};
use serde_json::Value;
use url::Url;

/// Client for one IBM Cloud service
#[derive(Clone)]
pub struct ServiceClient {
    pub service: String,
    base_url: Url,
    authenticator: Authenticator,
    http: HttpApi,
}

impl ServiceClient {
    /// Create a new service client
    pub fn new(
        service: &str,
        base_url: Url,
        authenticator: Authenticator,
    ) -> Result<Self, ApiError> {
        let http = HttpApi::new()?;

        Ok(Self {
            service: service.to_string(),
            base_url,
            authenticator,
            http,
        })
    }

    fn authorization(&self) -> Option<String> {
        self.authenticator.authorization()
    }

    /// URL of a resource collection, e.g. `/v2/resource_keys`
    pub fn collection_url(&self, path: &str, query: &[(String, String)]) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}{}", base, path);
        add_query(&url, query)
    }

    /// URL of one resource within a collection
    pub fn item_url(&self, path: &str, id: &str, query: &[(String, String)]) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}{}/{}", base, path, urlencoding::encode(id));
        add_query(&url, query)
    }

    /// Make a GET request to a service API
    pub async fn get(&self, url: &str) -> Result<Value, ApiError> {
        self.http.get(url, self.authorization().as_deref()).await
    }

    /// Make a POST request to a service API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.http
            .post(url, self.authorization().as_deref(), body)
            .await
    }

    /// Make a PUT request to a service API
    pub async fn put(&self, url: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.http
            .put(url, self.authorization().as_deref(), body)
            .await
    }

    /// Make a PATCH request to a service API
    pub async fn patch(&self, url: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.http
            .patch(url, self.authorization().as_deref(), body)
            .await
    }

    /// Make a DELETE request to a service API
    pub async fn delete(&self, url: &str) -> Result<Value, ApiError> {
        self.http.delete(url, self.authorization().as_deref()).await
    }
}

fn add_query(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }

    let rendered: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    format!("{}?{}", url, rendered.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ServiceClient {
        ServiceClient::new(
            "resource_controller",
            Url::parse("https://resource-controller.cloud.ibm.com").unwrap(),
            Authenticator::NoAuth,
        )
        .unwrap()
    }

    #[test]
    fn test_collection_url() {
        assert_eq!(
            client().collection_url("/v2/resource_keys", &[]),
            "https://resource-controller.cloud.ibm.com/v2/resource_keys"
        );
    }

    #[test]
    fn test_item_url_encodes_id() {
        assert_eq!(
            client().item_url("/v2/resource_keys", "crn:v1:a/b c", &[]),
            "https://resource-controller.cloud.ibm.com/v2/resource_keys/crn%3Av1%3Aa%2Fb%20c"
        );
    }

    #[test]
    fn test_query_rendering() {
        let query = vec![
            ("include_history".to_string(), "true".to_string()),
            ("account_id".to_string(), "acc 1".to_string()),
        ];
        assert_eq!(
            client().item_url("/v1/serviceids", "ServiceId-1", &query),
            "https://resource-controller.cloud.ibm.com/v1/serviceids/ServiceId-1?include_history=true&account_id=acc%201"
        );
    }
}
