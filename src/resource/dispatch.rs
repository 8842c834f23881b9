//! Operation dispatch
//!
//! Maps a descriptor's four operations to concrete REST calls on the
//! service client. Each function performs exactly one round trip.

use super::params::ModuleParams;
use super::registry::{ResourceDef, UpdateMethod};
use crate::ibm::client::ServiceClient;
use crate::ibm::http::ApiError;
use serde_json::Value;

/// Outcome of the read pre-check
///
/// "Not found" is a normal value here, not an error: the engine branches
/// on it when deciding between create, update, delete and no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(Value),
    NotFound,
}

/// Classify a raw read result: 404 means the resource is absent, every
/// other error stays an error.
pub fn classify_read(result: Result<Value, ApiError>) -> Result<ReadOutcome, ApiError> {
    match result {
        Ok(resource) => Ok(ReadOutcome::Found(resource)),
        Err(e) if e.is_not_found() => Ok(ReadOutcome::NotFound),
        Err(e) => Err(e),
    }
}

/// Fetch one resource; errors pass through untouched
pub async fn get(
    client: &ServiceClient,
    def: &ResourceDef,
    id: &str,
    params: &ModuleParams,
) -> Result<Value, ApiError> {
    let url = client.item_url(&def.collection_path, id, &params.read_query(def));
    client.get(&url).await
}

/// Read pre-check used by the managed flow
pub async fn read(
    client: &ServiceClient,
    def: &ResourceDef,
    id: &str,
    params: &ModuleParams,
) -> Result<ReadOutcome, ApiError> {
    classify_read(get(client, def, id, params).await)
}

/// List the collection
pub async fn list(
    client: &ServiceClient,
    def: &ResourceDef,
    params: &ModuleParams,
) -> Result<Value, ApiError> {
    let url = client.collection_url(&def.collection_path, &params.read_query(def));
    client.get(&url).await
}

/// Create a resource from the declared create-body options
pub async fn create(
    client: &ServiceClient,
    def: &ResourceDef,
    params: &ModuleParams,
) -> Result<Value, ApiError> {
    let url = client.collection_url(&def.collection_path, &[]);
    let body = params.body(&def.create_fields);
    client.post(&url, Some(&body)).await
}

/// Update a resource from the declared update-body options
pub async fn update(
    client: &ServiceClient,
    def: &ResourceDef,
    id: &str,
    params: &ModuleParams,
) -> Result<Value, ApiError> {
    let url = client.item_url(&def.collection_path, id, &[]);
    let body = params.body(&def.update_fields);

    match def.update_method {
        UpdateMethod::Patch => client.patch(&url, Some(&body)).await,
        UpdateMethod::Put => client.put(&url, Some(&body)).await,
        UpdateMethod::Post => client.post(&url, Some(&body)).await,
    }
}

/// Delete a resource
pub async fn delete(
    client: &ServiceClient,
    def: &ResourceDef,
    id: &str,
) -> Result<Value, ApiError> {
    let url = client.item_url(&def.collection_path, id, &[]);
    client.delete(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_found() {
        let outcome = classify_read(Ok(json!({"id": "testString"}))).unwrap();
        assert_eq!(outcome, ReadOutcome::Found(json!({"id": "testString"})));
    }

    #[test]
    fn test_classify_404_as_not_found() {
        let outcome = classify_read(Err(ApiError::remote(404, "no such key"))).unwrap();
        assert_eq!(outcome, ReadOutcome::NotFound);
    }

    #[test]
    fn test_classify_other_errors_pass_through() {
        let err = classify_read(Err(ApiError::remote(500, "Something went wrong...")))
            .unwrap_err();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.message, "Something went wrong...");
    }
}
