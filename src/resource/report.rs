//! Result reports
//!
//! The wire contract handed back to the invoking engine: a success report
//! carries `changed` plus the result payload under `msg`; a failure report
//! carries the error message under `msg` with a `failed` marker.

use crate::ibm::http::ApiError;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::params::ParamError;

/// Successful invocation outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
    pub changed: bool,
    pub msg: Value,
}

impl ModuleReport {
    pub fn changed(msg: Value) -> Self {
        Self { changed: true, msg }
    }

    pub fn unchanged(msg: Value) -> Self {
        Self {
            changed: false,
            msg,
        }
    }

    /// Report for a completed delete
    pub fn deleted(id: Option<&str>) -> Self {
        Self::changed(json!({ "id": id, "status": "deleted" }))
    }

    /// Report for an `absent` request against a missing resource
    pub fn not_found(id: Option<&str>) -> Self {
        Self::unchanged(json!({ "id": id, "status": "not_found" }))
    }
}

/// Failed invocation outcome
#[derive(Debug, Clone, Serialize)]
pub struct ModuleFailure {
    pub failed: bool,
    pub msg: String,
}

impl ModuleFailure {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            msg: msg.into(),
        }
    }
}

/// Why an invocation failed
///
/// The `Display` of every variant is the exact failure message reported to
/// the engine; for remote errors that is the service's message verbatim.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Unknown module: {0}")]
    UnknownModule(String),
    #[error(transparent)]
    InvalidParams(#[from] ParamError),
    #[error("Cannot create the authenticator.")]
    NoAuthenticator,
    #[error("No endpoint configured for service: {0}")]
    NoEndpoint(String),
    #[error("{}", .0.message)]
    Api(#[from] ApiError),
}

impl RunError {
    /// The failure report for this error
    pub fn into_failure(self) -> ModuleFailure {
        ModuleFailure::new(self.to_string())
    }
}
