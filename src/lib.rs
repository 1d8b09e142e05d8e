//! Node Schema Engine
//!
//! Interprets the property descriptors of workflow node types: which
//! properties are visible for a configuration, which matter for the selected
//! operation, what the essential subset is, and whether a configured node is
//! valid.
//!
//! # Example
//!
//! ```
//! use node_schema::{
//!     apply_defaults, is_visible, parse_descriptors, validate_unit, Unit, ValidationOptions,
//! };
//! use serde_json::json;
//!
//! let descriptors = parse_descriptors(&json!([
//!     { "name": "authentication", "type": "options", "default": "none",
//!       "options": [{ "name": "None", "value": "none" }, { "name": "API Key", "value": "apiKey" }] },
//!     { "name": "apiKey", "displayName": "API Key", "type": "string", "required": true,
//!       "displayOptions": { "show": { "authentication": ["apiKey"] } } }
//! ]));
//!
//! let config = apply_defaults(&descriptors, &serde_json::Map::new());
//! assert_eq!(config["authentication"], "none");
//! assert!(!is_visible(&descriptors[1], &config));
//!
//! let params = json!({ "authentication": "apiKey" });
//! let unit = Unit::new("Call API", "nodes-base.httpRequest", params.as_object().unwrap().clone());
//! let report = validate_unit(&descriptors, &unit, &ValidationOptions::default());
//!
//! // apiKey is now visible and required but unset
//! assert!(!report.is_valid());
//! assert_eq!(report.issues[0].property.as_deref(), Some("apiKey"));
//! ```
//!
//! # Visibility Rules
//!
//! | `displayOptions` | Effect |
//! |------------------|--------|
//! | (none) | Always visible |
//! | `show: { field: [values] }` | Visible only if every field holds one of its values |
//! | `hide: { field: [values] }` | Hidden if any field holds one of its values |
//!
//! # Profiles
//!
//! [`validate_unit`] runs one of three [`ValidationProfile`]s: `minimal`
//! (types and required fields), `runtime` (the default; adds defaults,
//! operation relevance and misplaced-parameter warnings) and `strict`
//! (adds per-kind checks for AI tool nodes and turns the warnings into errors).

mod context;
mod descriptor;
mod error;
mod essentials;
mod loader;
mod report;
mod search;
mod specialized;
mod types;
mod validator;
mod visibility;

pub use context::{is_relevant, relevant_properties, OperationContext};
pub use descriptor::{parse_descriptor, parse_descriptors};
pub use error::LoadError;
pub use essentials::{
    describe, essentials_config, get_essentials, simplify_property, Essentials, EssentialsConfig,
    OptionSummary, SimplifiedProperty, MAX_OPTIONS,
};
pub use loader::{
    descriptors_from_value, is_url, load_config, load_descriptors, load_json, load_json_auto,
    load_json_str, load_unit, unit_from_value,
};
pub use report::{Severity, ValidationIssue, ValidationReport};
pub use search::{score_property, search_properties, DEFAULT_MAX_RESULTS};
pub use specialized::{validate_specialized, UnitKind};
pub use types::{
    is_expression, normalize_unit_type, ConfigurationSnapshot, DisplayOptions, OptionChoice,
    PropertyDescriptor, PropertyGroup, PropertyOption, PropertyType, Unit, MAX_NESTING_DEPTH,
};
pub use validator::{
    structural_schema, validate_unit, ValidationOptions, ValidationProfile, INVALID_OPTION,
    INVALID_TYPE, INVISIBLE_PROPERTY, MISSING_REQUIRED, UNKNOWN_PROPERTY,
};
pub use visibility::{
    apply_defaults, is_visible, snapshot_from_value, visibility_requirement, visible_properties,
};

#[cfg(feature = "remote")]
pub use loader::load_json_url;
