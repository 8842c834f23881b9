//! Invocation parameters
//!
//! Validates a supplied JSON parameter document against a descriptor's
//! declared option table and exposes typed accessors. Validation is
//! type-only: cross-field rules do not exist beyond the engine's
//! identifier-presence branch.

use super::registry::{OptionKind, ResourceDef};
use serde_json::{Map, Value};
use thiserror::Error;

/// Desired state of a managed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Present,
    Absent,
}

/// Parameter validation failure
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("Parameters must be a JSON object")]
    NotAnObject,
    #[error("Unsupported parameter: {0}")]
    UnknownOption(String),
    #[error("Parameter {name} must be of type {expected}")]
    WrongType { name: String, expected: &'static str },
    #[error("Missing required parameter: {0}")]
    MissingRequired(String),
    #[error("Parameter state must be one of: present, absent")]
    InvalidState,
}

/// Validated parameters for one invocation
#[derive(Debug, Clone)]
pub struct ModuleParams {
    values: Map<String, Value>,
    state: State,
}

impl ModuleParams {
    /// Validate `params` against the descriptor's declared options.
    pub fn validate(def: &ResourceDef, params: &Value) -> Result<Self, ParamError> {
        let Value::Object(values) = params else {
            return Err(ParamError::NotAnObject);
        };

        for (name, value) in values {
            let Some(spec) = def.options.get(name) else {
                return Err(ParamError::UnknownOption(name.clone()));
            };
            // Null means "not supplied"; engines pass declared-but-unset
            // options through as null.
            if value.is_null() {
                continue;
            }
            if !kind_matches(spec.kind, value) {
                return Err(ParamError::WrongType {
                    name: name.clone(),
                    expected: spec.kind.name(),
                });
            }
        }

        for (name, spec) in &def.options {
            if spec.required && values.get(name).map(|v| !v.is_null()) != Some(true) {
                return Err(ParamError::MissingRequired(name.clone()));
            }
        }

        let state = match values.get("state").and_then(Value::as_str) {
            None => State::Present,
            Some("present") => State::Present,
            Some("absent") => State::Absent,
            Some(_) => return Err(ParamError::InvalidState),
        };

        Ok(Self {
            values: values.clone(),
            state,
        })
    }

    /// Desired state; defaults to `present`
    pub fn state(&self) -> State {
        self.state
    }

    /// Raw value of an option, if supplied and non-null
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// String value of an option, if supplied
    pub fn str_opt(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The resource identifier named by the descriptor, if supplied
    pub fn id(&self, def: &ResourceDef) -> Option<&str> {
        self.str_opt(&def.id_option)
    }

    /// Build a request body from the given declared fields, skipping
    /// anything the caller did not supply.
    pub fn body(&self, fields: &[String]) -> Value {
        let mut body = Map::new();
        for field in fields {
            if let Some(value) = self.get(field) {
                body.insert(field.clone(), value.clone());
            }
        }
        Value::Object(body)
    }

    /// Query-parameter pairs for the descriptor's read paths.
    pub fn read_query(&self, def: &ResourceDef) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for name in &def.read_query {
            if let Some(value) = self.get(name) {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                pairs.push((name.clone(), rendered));
            }
        }
        pairs
    }
}

fn kind_matches(kind: OptionKind, value: &Value) -> bool {
    match kind {
        OptionKind::Str => value.is_string(),
        OptionKind::Bool => value.is_boolean(),
        OptionKind::Int => value.is_i64() || value.is_u64(),
        OptionKind::Dict => value.is_object(),
        OptionKind::List => value.is_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::registry::get_resource;
    use serde_json::json;

    #[test]
    fn test_accepts_declared_options() {
        let def = get_resource("resource_key").unwrap();
        let params = ModuleParams::validate(
            def,
            &json!({
                "name": "my-key",
                "source": "25eba2a9-beef-450b-82cf-f5ad5e36c6dd",
                "role": "Writer",
                "parameters": {"foo": "bar"}
            }),
        )
        .unwrap();

        assert_eq!(params.state(), State::Present);
        assert_eq!(params.str_opt("role"), Some("Writer"));
        assert!(params.id(def).is_none());
    }

    #[test]
    fn test_rejects_unknown_option() {
        let def = get_resource("resource_key").unwrap();
        let err = ModuleParams::validate(def, &json!({"bogus": "x"})).unwrap_err();
        assert!(matches!(err, ParamError::UnknownOption(name) if name == "bogus"));
    }

    #[test]
    fn test_rejects_wrong_type() {
        let def = get_resource("resource_key").unwrap();
        let err = ModuleParams::validate(def, &json!({"name": 42})).unwrap_err();
        assert!(matches!(err, ParamError::WrongType { name, expected: "str" } if name == "name"));
    }

    #[test]
    fn test_null_counts_as_unset() {
        let def = get_resource("resource_key").unwrap();
        let params =
            ModuleParams::validate(def, &json!({"id": null, "name": "my-key"})).unwrap();
        assert!(params.id(def).is_none());
        assert_eq!(params.body(&def.create_fields), json!({"name": "my-key"}));
    }

    #[test]
    fn test_state_absent() {
        let def = get_resource("resource_key").unwrap();
        let params =
            ModuleParams::validate(def, &json!({"id": "testString", "state": "absent"})).unwrap();
        assert_eq!(params.state(), State::Absent);
        assert_eq!(params.id(def), Some("testString"));
    }

    #[test]
    fn test_invalid_state_rejected() {
        let def = get_resource("resource_key").unwrap();
        let err =
            ModuleParams::validate(def, &json!({"state": "gone"})).unwrap_err();
        assert!(matches!(err, ParamError::InvalidState));
    }

    #[test]
    fn test_body_preserves_only_supplied_fields() {
        let def = get_resource("resource_key").unwrap();
        let params = ModuleParams::validate(
            def,
            &json!({"id": "testString", "name": "my-new-key-name"}),
        )
        .unwrap();
        assert_eq!(
            params.body(&def.update_fields),
            json!({"name": "my-new-key-name"})
        );
    }

    #[test]
    fn test_read_query_renders_bools() {
        let def = get_resource("service_id_info").unwrap();
        let params = ModuleParams::validate(
            def,
            &json!({"id": "ServiceId-1", "include_history": true}),
        )
        .unwrap();
        assert_eq!(
            params.read_query(def),
            vec![("include_history".to_string(), "true".to_string())]
        );
    }
}
