//! Idempotent module runner
//!
//! The read-decide-act cycle shared by every module: resolve credentials,
//! read the current remote state when an identifier is supplied, then
//! perform at most one mutating call and report `{changed, msg}`.
//!
//! No state survives an invocation; every run re-fetches the remote
//! resource before deciding.

use super::dispatch::{self, ReadOutcome};
use super::params::{ModuleParams, State};
use super::registry::{get_resource, Mode, ResourceDef};
use super::report::{ModuleReport, RunError};
use crate::ibm::auth::CredentialProvider;
use crate::ibm::client::ServiceClient;
use crate::ibm::endpoints::Endpoints;
use serde_json::Value;

/// Run the module registered under `module` with the given parameters.
pub async fn run(
    module: &str,
    params: &Value,
    credentials: &dyn CredentialProvider,
    endpoints: &Endpoints,
) -> Result<ModuleReport, RunError> {
    let def =
        get_resource(module).ok_or_else(|| RunError::UnknownModule(module.to_string()))?;
    run_def(def, params, credentials, endpoints).await
}

/// Run a descriptor directly (embedding engines that carry their own
/// descriptor tables).
pub async fn run_def(
    def: &ResourceDef,
    params: &Value,
    credentials: &dyn CredentialProvider,
    endpoints: &Endpoints,
) -> Result<ModuleReport, RunError> {
    let params = ModuleParams::validate(def, params)?;

    // Fail before any network call when no credentials resolve.
    let authenticator = credentials
        .authenticator(&def.service)
        .ok_or(RunError::NoAuthenticator)?;
    let base_url = endpoints
        .url_for(&def.service)
        .ok_or_else(|| RunError::NoEndpoint(def.service.clone()))?;

    let client = ServiceClient::new(&def.service, base_url, authenticator)?;

    match def.mode {
        Mode::Info => run_info(def, &params, &client).await,
        Mode::Managed => run_managed(def, &params, &client).await,
    }
}

/// Read-only modules: one get (or list) and an unchanged report.
async fn run_info(
    def: &ResourceDef,
    params: &ModuleParams,
    client: &ServiceClient,
) -> Result<ModuleReport, RunError> {
    let result = match params.id(def) {
        Some(id) => dispatch::get(client, def, id, params).await?,
        None => dispatch::list(client, def, params).await?,
    };

    Ok(ModuleReport::unchanged(result))
}

/// Managed modules: the idempotent create/update/delete cycle.
async fn run_managed(
    def: &ResourceDef,
    params: &ModuleParams,
    client: &ServiceClient,
) -> Result<ModuleReport, RunError> {
    let id = params.id(def).map(str::to_string);

    // Pre-check: only when the caller named a resource. A read that is
    // not "not found" fails the run here and never falls through to a
    // mutating call.
    let existing = match id.as_deref() {
        Some(id) => dispatch::read(client, def, id, params).await?,
        None => ReadOutcome::NotFound,
    };

    match params.state() {
        State::Absent => match (&id, &existing) {
            (Some(id), ReadOutcome::Found(_)) => {
                tracing::debug!("{}: deleting {}", def.display_name, id);
                dispatch::delete(client, def, id).await?;
                Ok(ModuleReport::deleted(Some(id.as_str())))
            }
            _ => {
                tracing::debug!("{}: already absent", def.display_name);
                Ok(ModuleReport::not_found(id.as_deref()))
            }
        },
        State::Present => match (&id, existing) {
            (Some(id), ReadOutcome::Found(_)) => {
                tracing::debug!("{}: updating {}", def.display_name, id);
                let updated = dispatch::update(client, def, id, params).await?;
                Ok(ModuleReport::changed(updated))
            }
            _ => {
                tracing::debug!("{}: creating", def.display_name);
                let created = dispatch::create(client, def, params).await?;
                Ok(ModuleReport::changed(created))
            }
        },
    }
}
