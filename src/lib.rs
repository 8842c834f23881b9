//! ibmod - idempotent resource modules for IBM Cloud
//!
//! Each module wraps a single remote-resource operation of IBM Cloud's
//! identity, resource-provisioning and infrastructure-orchestration APIs:
//! parse declared parameters, resolve an authenticator, read the current
//! remote state, perform at most one mutating call, and report a uniform
//! `{changed, msg}` result to the invoking orchestration engine.
//!
//! The [`resource::run`] entry point drives one full cycle; everything it
//! needs (credentials, endpoints) is injected, so embedding engines and
//! the bundled CLI share the same path.

pub mod config;
pub mod ibm;
pub mod resource;

/// Version injected at compile time via IBMOD_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("IBMOD_VERSION") {
    Some(v) => v,
    None => "dev",
};
