//! HTTP utilities for IBM Cloud REST API calls

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and masks potentially sensitive patterns
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Error raised by a remote call
///
/// Carries the `(status_code, message)` pair of the service's response.
/// Transport failures that never produced a response use status code 0.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn remote(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            message: message.into(),
        }
    }

    /// True only for HTTP 404
    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Extract the user-facing message from an IBM-style error body.
///
/// The platform services are not uniform: Resource Controller nests the
/// message under `errors[0].message`, IAM Identity uses a flat `message`,
/// and the token service uses `errordetails`/`error_description`.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = parsed
            .get("errors")
            .and_then(|e| e.get(0))
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = parsed.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = parsed.get("error_description").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    format!("API request failed: {}", status)
}

/// HTTP client wrapper for IBM Cloud API calls
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
}

impl HttpApi {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("ibmod/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Perform one request and parse the response
    ///
    /// Success bodies parse to JSON (empty bodies become `Null`); error
    /// responses become an [`ApiError`] carrying the extracted message.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);

        if let Some(authorization) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            // Only log sanitized/truncated error bodies
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(ApiError::remote(
                status.as_u16(),
                error_message(status, &response_body),
            ));
        }

        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_body)
            .map_err(|e| ApiError::transport(format!("Failed to parse response JSON: {}", e)))
    }

    pub async fn get(&self, url: &str, authorization: Option<&str>) -> Result<Value, ApiError> {
        self.request(Method::GET, url, authorization, None).await
    }

    pub async fn post(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(Method::POST, url, authorization, body).await
    }

    pub async fn put(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(Method::PUT, url, authorization, body).await
    }

    pub async fn patch(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(Method::PATCH, url, authorization, body).await
    }

    pub async fn delete(&self, url: &str, authorization: Option<&str>) -> Result<Value, ApiError> {
        self.request(Method::DELETE, url, authorization, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_errors_array() {
        let body = r#"{"errors": [{"code": "not_found", "message": "Key not found"}]}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Key not found"
        );
    }

    #[test]
    fn test_error_message_from_flat_message() {
        let body = r#"{"message": "Something went wrong...", "status_code": 500}"#;
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, body),
            "Something went wrong..."
        );
    }

    #[test]
    fn test_error_message_fallback_for_unparseable_body() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert_eq!(msg, "API request failed: 502 Bad Gateway");
    }

    #[test]
    fn test_only_404_is_not_found() {
        assert!(ApiError::remote(404, "gone").is_not_found());
        assert!(!ApiError::remote(410, "gone").is_not_found());
        assert!(!ApiError::remote(500, "boom").is_not_found());
        assert!(!ApiError::transport("no route").is_not_found());
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 500 bytes total"));
    }
}
