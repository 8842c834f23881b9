//! Resource Registry - Load resource descriptors from JSON
//!
//! This module loads all module descriptors from embedded JSON files
//! and provides lookup functions for the rest of the crate.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded descriptor JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/resource_controller.json"),
    include_str!("../resources/iam_identity.json"),
    include_str!("../resources/schematics.json"),
];

/// JSON type a declared option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Str,
    Bool,
    Int,
    Dict,
    List,
}

impl OptionKind {
    /// Human-readable name used in validation errors
    pub fn name(self) -> &'static str {
        match self {
            OptionKind::Str => "str",
            OptionKind::Bool => "bool",
            OptionKind::Int => "int",
            OptionKind::Dict => "dict",
            OptionKind::List => "list",
        }
    }
}

/// Declared option from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    #[serde(default)]
    pub required: bool,
}

/// Whether a module manages a resource or only reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Managed,
    Info,
}

/// HTTP verb used for the update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    #[default]
    Patch,
    Put,
    Post,
}

/// Resource descriptor from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// Owning service, also the authenticator service name
    pub service: String,
    /// Collection path on the service endpoint, e.g. `/v2/resource_keys`
    pub collection_path: String,
    /// Declared option holding the resource identifier
    pub id_option: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub update_method: UpdateMethod,
    /// Declared options: name -> accepted type
    pub options: HashMap<String, OptionSpec>,
    /// Options sent as the create request body
    #[serde(default)]
    pub create_fields: Vec<String>,
    /// Options sent as the update request body
    #[serde(default)]
    pub update_fields: Vec<String>,
    /// Options passed as query parameters on read paths
    #[serde(default)]
    pub read_query: Vec<String>,
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource descriptor by module name
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all module names (for CLI listing)
pub fn get_all_resource_keys() -> Vec<&'static str> {
    get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect()
}
