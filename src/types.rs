//! Core types for node configuration schemas.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Current state of a unit instance: property name to JSON value.
///
/// A missing key means "unset", which is distinct from an explicit `null`.
pub type ConfigurationSnapshot = Map<String, Value>;

/// Maximum depth followed when descending into nested collections.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Returns the JSON type name for messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns true if a parameter value is a runtime expression (`"={{ ... }}"`).
///
/// Expressions are only resolved when the workflow runs, so they satisfy
/// any declared type.
pub fn is_expression(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.starts_with('='))
}

/// View a condition value as a list: arrays as-is, scalars as one element.
pub fn expected_values(value: &Value) -> &[Value] {
    match value {
        Value::Array(values) => values,
        other => std::slice::from_ref(other),
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    #[default]
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    Collection,
    FixedCollection,
    Json,
    Code,
    Hidden,
    Notice,
    Color,
    DateTime,
    ResourceLocator,
    CredentialsSelect,
    /// A type string this crate does not model.
    Other(String),
}

impl PropertyType {
    /// Parse a type string. Unknown strings are kept as [`PropertyType::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "string" => PropertyType::String,
            "number" => PropertyType::Number,
            "boolean" => PropertyType::Boolean,
            "options" => PropertyType::Options,
            "multiOptions" => PropertyType::MultiOptions,
            "collection" => PropertyType::Collection,
            "fixedCollection" => PropertyType::FixedCollection,
            "json" => PropertyType::Json,
            "code" => PropertyType::Code,
            "hidden" => PropertyType::Hidden,
            "notice" => PropertyType::Notice,
            "color" => PropertyType::Color,
            "dateTime" => PropertyType::DateTime,
            "resourceLocator" => PropertyType::ResourceLocator,
            "credentialsSelect" => PropertyType::CredentialsSelect,
            other => PropertyType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Options => "options",
            PropertyType::MultiOptions => "multiOptions",
            PropertyType::Collection => "collection",
            PropertyType::FixedCollection => "fixedCollection",
            PropertyType::Json => "json",
            PropertyType::Code => "code",
            PropertyType::Hidden => "hidden",
            PropertyType::Notice => "notice",
            PropertyType::Color => "color",
            PropertyType::DateTime => "dateTime",
            PropertyType::ResourceLocator => "resourceLocator",
            PropertyType::CredentialsSelect => "credentialsSelect",
            PropertyType::Other(s) => s,
        }
    }

    /// Hidden and notice properties carry no user-editable value.
    pub fn is_display_only(&self) -> bool {
        matches!(self, PropertyType::Hidden | PropertyType::Notice)
    }

    /// Collection-typed properties own nested descriptors.
    pub fn is_container(&self) -> bool {
        matches!(self, PropertyType::Collection | PropertyType::FixedCollection)
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One enumerated choice of an `options`/`multiOptions` property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionChoice {
    /// Label shown to the user.
    pub name: String,
    /// Value stored in the configuration.
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named group of a `fixedCollection` property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    pub name: String,
    pub display_name: String,
    pub values: Vec<PropertyDescriptor>,
}

/// An entry of a descriptor's `options` list.
///
/// Which variant appears depends on the owning descriptor's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyOption {
    /// Choice of an `options`/`multiOptions` property.
    Choice(OptionChoice),
    /// Member of a `collection` property.
    Property(PropertyDescriptor),
    /// Group of a `fixedCollection` property.
    Group(PropertyGroup),
}

/// Conditional display rules of a property.
///
/// `show`: every field must hold one of its values. `hide`: any field
/// holding one of its values hides the property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<Map<String, Value>>,
}

impl DisplayOptions {
    /// Number of fields named by the `show` conditions.
    pub fn show_field_count(&self) -> usize {
        self.show.as_ref().map_or(0, Map::len)
    }

    /// Declared `show` values for a field, if the field is named.
    pub fn show_values(&self, field: &str) -> Option<&[Value]> {
        self.show
            .as_ref()
            .and_then(|show| show.get(field))
            .map(expected_values)
    }
}

/// One configurable property of a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Declared default. `Some(Value::Null)` is an explicit null default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl PropertyDescriptor {
    /// Create a bare descriptor with no rules, options or default.
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            display_name: String::new(),
            property_type,
            required: false,
            default: None,
            options: Vec::new(),
            placeholder: None,
            description: None,
            hint: None,
            display_options: None,
        }
    }

    /// Display name, falling back to the property name.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Enumerated choices (empty for non-enumeration types).
    pub fn choices(&self) -> impl Iterator<Item = &OptionChoice> {
        self.options.iter().filter_map(|option| match option {
            PropertyOption::Choice(choice) => Some(choice),
            _ => None,
        })
    }

    /// Directly nested descriptors, each with the fixedCollection group it
    /// belongs to (if any).
    pub fn nested(&self) -> Vec<(Option<&str>, &PropertyDescriptor)> {
        let mut nested = Vec::new();
        for option in &self.options {
            match option {
                PropertyOption::Property(prop) => nested.push((None, prop)),
                PropertyOption::Group(group) => {
                    for prop in &group.values {
                        nested.push((Some(group.name.as_str()), prop));
                    }
                }
                PropertyOption::Choice(_) => {}
            }
        }
        nested
    }

    /// `show` conditions, if any.
    pub fn show(&self) -> Option<&Map<String, Value>> {
        self.display_options.as_ref().and_then(|d| d.show.as_ref())
    }
}

/// An instance of a typed unit: its kind plus its configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub parameters: ConfigurationSnapshot,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub credentials: Map<String, Value>,
}

impl Unit {
    /// Create a unit with the given type and parameters.
    pub fn new(
        name: impl Into<String>,
        unit_type: impl Into<String>,
        parameters: ConfigurationSnapshot,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            unit_type: unit_type.into(),
            parameters,
            credentials: Map::new(),
        }
    }

    /// Parameter lookup.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// String parameter lookup. Blank strings count as absent.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Normalize a unit type identifier to its short package form.
///
/// `n8n-nodes-base.httpRequest` becomes `nodes-base.httpRequest` and
/// `@n8n/n8n-nodes-langchain.agent` becomes `nodes-langchain.agent`.
/// Identifiers already in short form pass through unchanged.
pub fn normalize_unit_type(unit_type: &str) -> String {
    let trimmed = unit_type.trim();
    if let Some(rest) = trimmed.strip_prefix("@n8n/n8n-nodes-langchain.") {
        return format!("nodes-langchain.{}", rest);
    }
    if let Some(rest) = trimmed.strip_prefix("n8n-nodes-langchain.") {
        return format!("nodes-langchain.{}", rest);
    }
    if let Some(rest) = trimmed.strip_prefix("n8n-nodes-base.") {
        return format!("nodes-base.{}", rest);
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_type_parse_round_trips_known_names() {
        for name in ["string", "multiOptions", "fixedCollection", "resourceLocator"] {
            assert_eq!(PropertyType::parse(name).as_str(), name);
        }
    }

    #[test]
    fn property_type_keeps_unknown_names() {
        let ty = PropertyType::parse("assignmentCollection");
        assert_eq!(ty, PropertyType::Other("assignmentCollection".into()));
        assert_eq!(ty.as_str(), "assignmentCollection");
    }

    #[test]
    fn expected_values_coerces_scalars() {
        assert_eq!(expected_values(&json!("a")), &[json!("a")]);
        assert_eq!(expected_values(&json!([1, 2])), &[json!(1), json!(2)]);
    }

    #[test]
    fn expression_detection() {
        assert!(is_expression(&json!("={{ $json.url }}")));
        assert!(!is_expression(&json!("https://example.com")));
        assert!(!is_expression(&json!(3)));
    }

    #[test]
    fn normalize_unit_type_strips_package_prefixes() {
        assert_eq!(
            normalize_unit_type("n8n-nodes-base.httpRequest"),
            "nodes-base.httpRequest"
        );
        assert_eq!(
            normalize_unit_type("@n8n/n8n-nodes-langchain.toolCode"),
            "nodes-langchain.toolCode"
        );
        assert_eq!(
            normalize_unit_type("nodes-base.webhook"),
            "nodes-base.webhook"
        );
    }

    #[test]
    fn label_falls_back_to_name() {
        let mut prop = PropertyDescriptor::new("sendBody", PropertyType::Boolean);
        assert_eq!(prop.label(), "sendBody");
        prop.display_name = "Send Body".into();
        assert_eq!(prop.label(), "Send Body");
    }

    #[test]
    fn param_str_treats_blank_as_absent() {
        let mut params = Map::new();
        params.insert("url".into(), json!("  "));
        let unit = Unit::new("HTTP", "nodes-base.httpRequest", params);
        assert_eq!(unit.param_str("url"), None);
    }
}
