//! Resource abstraction layer
//!
//! This module provides a data-driven approach to managing IBM Cloud
//! resources. Module descriptors are loaded from JSON files at compile
//! time, allowing new resource types to be added without code changes.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches module descriptors from embedded JSON
//! - [`params`] - Validates invocation parameters against a descriptor
//! - [`dispatch`] - Maps descriptor operations to concrete REST API calls
//! - [`runner`] - The idempotent read-decide-act cycle shared by all modules
//! - [`report`] - The `{changed, msg}` contract returned to the engine
//!
//! # Resource Descriptors
//!
//! Descriptors are defined in JSON files under `src/resources/`:
//! - `resource_controller.json` - Resource keys and instances
//! - `iam_identity.json` - Service IDs and API keys
//! - `schematics.json` - Schematics resource queries
//!
//! # Example
//!
//! ```ignore
//! use crate::ibm::auth::EnvCredentials;
//! use crate::ibm::endpoints::Endpoints;
//! use crate::resource::run;
//!
//! async fn delete_key(id: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let params = serde_json::json!({ "id": id, "state": "absent" });
//!     let report = run("resource_key", &params, &EnvCredentials, &Endpoints::new()).await?;
//!     assert!(report.changed || report.msg["status"] == "not_found");
//!     Ok(())
//! }
//! ```

pub mod dispatch;
pub mod params;
pub mod registry;
pub mod report;
pub mod runner;

pub use dispatch::ReadOutcome;
pub use params::{ModuleParams, ParamError, State};
pub use registry::{get_all_resource_keys, get_resource, Mode, ResourceDef, UpdateMethod};
pub use report::{ModuleFailure, ModuleReport, RunError};
pub use runner::{run, run_def};
