//! Unit validation under a selectable profile.
//!
//! Every profile runs the structural pass: a JSON Schema is derived from the
//! active descriptors and the unit's parameters are checked against it with
//! `jsonschema`. Profiles differ in which descriptors are active and in what
//! runs on top.
//!
//! | Profile | Active descriptors | Extra checks |
//! |---------|--------------------|--------------|
//! | minimal | visible in the raw parameters | none |
//! | runtime | relevant after defaults | unknown/invisible parameter warnings |
//! | strict  | relevant after defaults | specialized validators, unknown/invisible as errors |

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::context::relevant_properties;
use crate::report::{Severity, ValidationIssue, ValidationReport};
use crate::specialized::validate_specialized;
use crate::types::{is_expression, ConfigurationSnapshot, PropertyDescriptor, PropertyType, Unit};
use crate::visibility::{apply_defaults, visibility_requirement, visible_properties};

/// Issue code for a parameter no descriptor declares.
pub const UNKNOWN_PROPERTY: &str = "UNKNOWN_PROPERTY";
/// Issue code for a parameter whose descriptor is hidden or irrelevant.
pub const INVISIBLE_PROPERTY: &str = "INVISIBLE_PROPERTY";
/// Issue code for a required property that is missing or blank.
pub const MISSING_REQUIRED: &str = "MISSING_REQUIRED";
/// Issue code for a value of the wrong JSON type.
pub const INVALID_TYPE: &str = "INVALID_TYPE";
/// Issue code for a value outside the declared choices.
pub const INVALID_OPTION: &str = "INVALID_OPTION";

/// Codes the strict profile raises from warning to error.
const ELEVATED_CODES: &[&str] = &[UNKNOWN_PROPERTY, INVISIBLE_PROPERTY];

/// How thoroughly a unit is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationProfile {
    Minimal,
    #[default]
    Runtime,
    Strict,
}

impl ValidationProfile {
    /// Parse a profile name (`minimal`, `runtime`, `strict`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(ValidationProfile::Minimal),
            "runtime" => Some(ValidationProfile::Runtime),
            "strict" => Some(ValidationProfile::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationProfile::Minimal => "minimal",
            ValidationProfile::Runtime => "runtime",
            ValidationProfile::Strict => "strict",
        }
    }
}

/// Options for [`validate_unit`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    /// Which profile to apply.
    pub profile: ValidationProfile,
    /// Overrides whether specialized validators run. `None` follows the
    /// profile (only strict runs them).
    pub specialized: Option<bool>,
}

impl ValidationOptions {
    pub fn new(profile: ValidationProfile) -> Self {
        Self {
            profile,
            specialized: None,
        }
    }

    /// Force specialized validators on or off regardless of profile.
    pub fn specialized(mut self, enabled: bool) -> Self {
        self.specialized = Some(enabled);
        self
    }

    fn runs_specialized(&self) -> bool {
        self.specialized
            .unwrap_or(self.profile == ValidationProfile::Strict)
    }
}

/// Validate a unit's parameters against its descriptor set.
///
/// Problems with the configuration are reported as issues; this never fails.
/// Every issue carries the unit's id and name.
pub fn validate_unit(
    descriptors: &[PropertyDescriptor],
    unit: &Unit,
    options: &ValidationOptions,
) -> ValidationReport {
    let profile = options.profile;
    log::debug!(
        "validating '{}' ({}) with profile {}",
        unit.name,
        unit.unit_type,
        profile.as_str()
    );

    let (effective, active) = match profile {
        ValidationProfile::Minimal => {
            let active = visible_properties(descriptors, &unit.parameters);
            (unit.parameters.clone(), active)
        }
        ValidationProfile::Runtime | ValidationProfile::Strict => {
            let effective = apply_defaults(descriptors, &unit.parameters);
            let active = relevant_properties(descriptors, &effective);
            (effective, active)
        }
    };

    let mut issues = required_issues(&active, &effective);
    issues.extend(structural_issues(&active, &unit.parameters));

    if profile != ValidationProfile::Minimal {
        issues.extend(placement_issues(descriptors, &active, unit, &effective));
    }
    if options.runs_specialized() {
        issues.extend(validate_specialized(unit));
    }

    if profile == ValidationProfile::Strict {
        issues = issues.into_iter().map(elevate).collect();
    }

    let issues = issues
        .into_iter()
        .map(|issue| issue.for_unit(unit.id.as_deref(), &unit.name))
        .collect();
    ValidationReport::from_issues(issues)
}

/// Build the JSON Schema describing the value shapes of the given descriptors.
///
/// Requiredness is not encoded; it is checked separately so blank strings and
/// explicit nulls count as missing. Display-only and untyped descriptors
/// accept anything. The first descriptor of a given name wins.
pub fn structural_schema(descriptors: &[&PropertyDescriptor]) -> Value {
    let mut properties = Map::new();
    for descriptor in descriptors {
        if let Some(schema) = value_schema(descriptor) {
            properties
                .entry(descriptor.name.clone())
                .or_insert(schema);
        }
    }
    json!({ "type": "object", "properties": properties })
}

fn value_schema(descriptor: &PropertyDescriptor) -> Option<Value> {
    let choices: Vec<Value> = descriptor.choices().map(|c| c.value.clone()).collect();
    let schema = match &descriptor.property_type {
        PropertyType::String
        | PropertyType::Code
        | PropertyType::Color
        | PropertyType::DateTime => json!({ "type": "string" }),
        PropertyType::Number => json!({ "type": "number" }),
        PropertyType::Boolean => json!({ "type": "boolean" }),
        PropertyType::Options if choices.is_empty() => return None,
        PropertyType::Options => json!({ "enum": choices }),
        PropertyType::MultiOptions if choices.is_empty() => json!({ "type": "array" }),
        PropertyType::MultiOptions => json!({ "type": "array", "items": { "enum": choices } }),
        PropertyType::Collection | PropertyType::FixedCollection => json!({ "type": "object" }),
        PropertyType::ResourceLocator => json!({ "type": ["string", "object"] }),
        PropertyType::Json
        | PropertyType::Hidden
        | PropertyType::Notice
        | PropertyType::CredentialsSelect
        | PropertyType::Other(_) => return None,
    };
    Some(schema)
}

fn required_issues(
    active: &[&PropertyDescriptor],
    effective: &ConfigurationSnapshot,
) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    active
        .iter()
        .filter(|d| d.required && !d.property_type.is_display_only())
        .filter(|d| seen.insert(d.name.as_str()))
        .filter(|d| is_missing(effective.get(&d.name)))
        .map(|d| {
            ValidationIssue::error(format!("Required property '{}' is missing", d.label()))
                .with_code(MISSING_REQUIRED)
                .with_property(d.name.clone())
        })
        .collect()
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Type and choice checks over the parameters the user actually set.
///
/// Defaults are trusted as declared. Expressions are resolved at run time
/// and satisfy any type, so they are left out. Nulls are left to the
/// required check.
fn structural_issues(
    active: &[&PropertyDescriptor],
    parameters: &ConfigurationSnapshot,
) -> Vec<ValidationIssue> {
    let schema = structural_schema(active);
    let instance: Map<String, Value> = parameters
        .iter()
        .filter(|(_, value)| !value.is_null() && !is_expression(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let instance = Value::Object(instance);

    let validator = match jsonschema::validator_for(&schema) {
        Ok(validator) => validator,
        Err(e) => {
            log::warn!("skipping structural checks, schema did not compile: {}", e);
            return Vec::new();
        }
    };

    validator
        .iter_errors(&instance)
        .map(|e| {
            let code = if e.schema_path.to_string().ends_with("/enum") {
                INVALID_OPTION
            } else {
                INVALID_TYPE
            };
            let property = pointer_to_path(&e.instance_path.to_string());
            let issue = ValidationIssue::error(e.to_string()).with_code(code);
            if property.is_empty() {
                issue
            } else {
                issue.with_property(property)
            }
        })
        .collect()
}

/// `/tags/0` becomes `tags.0`.
fn pointer_to_path(pointer: &str) -> String {
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|part| part.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Warnings for parameters set outside the active view.
fn placement_issues(
    descriptors: &[PropertyDescriptor],
    active: &[&PropertyDescriptor],
    unit: &Unit,
    effective: &ConfigurationSnapshot,
) -> Vec<ValidationIssue> {
    let active_names: HashSet<&str> = active.iter().map(|d| d.name.as_str()).collect();
    let mut issues = Vec::new();

    for key in unit.parameters.keys() {
        if active_names.contains(key.as_str()) {
            continue;
        }
        let Some(declared) = descriptors.iter().find(|d| &d.name == key) else {
            issues.push(
                ValidationIssue::warning(format!("Unknown property '{}'", key))
                    .with_code(UNKNOWN_PROPERTY)
                    .with_property(key.clone()),
            );
            continue;
        };

        let message = match visibility_requirement(declared, effective) {
            Some(requirement) => format!(
                "Property '{}' is set but not used by the current configuration. {}",
                declared.label(),
                requirement
            ),
            None => format!(
                "Property '{}' is set but not used by the selected operation",
                declared.label()
            ),
        };
        issues.push(
            ValidationIssue::warning(message)
                .with_code(INVISIBLE_PROPERTY)
                .with_property(key.clone()),
        );
    }
    issues
}

fn elevate(issue: ValidationIssue) -> ValidationIssue {
    let elevated = issue.severity == Severity::Warning
        && issue
            .code
            .as_deref()
            .is_some_and(|code| ELEVATED_CODES.contains(&code));
    if elevated {
        issue.with_severity(Severity::Error)
    } else {
        issue
    }
}
