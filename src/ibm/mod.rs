//! IBM Cloud API interaction module
//!
//! This module provides the core functionality for talking to IBM Cloud
//! platform services: credential resolution, the HTTP layer, per-service
//! endpoints and the service client the resource modules run against.
//!
//! # Module Structure
//!
//! - [`auth`] - Authenticator resolution from an injected credential provider
//! - [`client`] - Service client bundling endpoint, authenticator and HTTP
//! - [`endpoints`] - Default service endpoints and their overrides
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use crate::ibm::auth::Authenticator;
//! use crate::ibm::client::ServiceClient;
//!
//! async fn example(base: url::Url) -> Result<(), crate::ibm::http::ApiError> {
//!     let client = ServiceClient::new("resource_controller", base, Authenticator::NoAuth)?;
//!     let keys = client.get(&client.collection_url("/v2/resource_keys", &[])).await?;
//!     let _ = keys;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod http;
