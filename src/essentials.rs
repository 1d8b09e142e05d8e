//! Essentials extraction - reduces a large property set to what a user needs first.
//!
//! Well-known unit types have curated `required`/`common` lists. Every other
//! unit type gets an inferred view built from the descriptors' own flags.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{normalize_unit_type, PropertyDescriptor, PropertyType, MAX_NESTING_DEPTH};

/// Maximum option entries kept on a simplified property.
pub const MAX_OPTIONS: usize = 20;

/// Maximum `show` fields for a condition to be surfaced as `showWhen`.
pub const MAX_SHOW_WHEN_FIELDS: usize = 2;

const MAX_INFERRED_REQUIRED: usize = 10;
const MAX_INFERRED_COMMON: usize = 10;
const MIN_INFERRED_TOTAL: usize = 10;
const MAX_ESSENTIALS: usize = 30;

/// Curated property names for a well-known unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EssentialsConfig {
    pub required: &'static [&'static str],
    pub common: &'static [&'static str],
}

const CURATED_ESSENTIALS: &[(&str, EssentialsConfig)] = &[
    (
        "nodes-base.httpRequest",
        EssentialsConfig {
            required: &["url"],
            common: &["method", "authentication", "sendBody", "contentType", "sendHeaders", "options"],
        },
    ),
    (
        "nodes-base.webhook",
        EssentialsConfig {
            required: &[],
            common: &["httpMethod", "path", "responseMode", "responseData", "responseCode"],
        },
    ),
    (
        "nodes-base.code",
        EssentialsConfig {
            required: &[],
            common: &["language", "jsCode", "pythonCode", "mode"],
        },
    ),
    (
        "nodes-base.set",
        EssentialsConfig {
            required: &[],
            common: &["mode", "assignments", "includeOtherFields", "options"],
        },
    ),
    (
        "nodes-base.if",
        EssentialsConfig {
            required: &[],
            common: &["conditions", "combineOperation"],
        },
    ),
    (
        "nodes-base.postgres",
        EssentialsConfig {
            required: &[],
            common: &["operation", "table", "columns", "query", "additionalFields"],
        },
    ),
    (
        "nodes-base.openAi",
        EssentialsConfig {
            required: &[],
            common: &["resource", "operation", "modelId", "prompt", "messages", "maxTokens"],
        },
    ),
    (
        "nodes-base.googleSheets",
        EssentialsConfig {
            required: &[],
            common: &["operation", "documentId", "sheetName", "range", "dataMode"],
        },
    ),
    (
        "nodes-base.slack",
        EssentialsConfig {
            required: &[],
            common: &["resource", "operation", "channel", "text", "attachments", "blocks"],
        },
    ),
    (
        "nodes-base.emailSend",
        EssentialsConfig {
            required: &["fromEmail", "toEmail", "subject"],
            common: &["text", "html", "attachments", "options"],
        },
    ),
    (
        "nodes-base.merge",
        EssentialsConfig {
            required: &[],
            common: &["mode", "joinMode", "propertyName1", "propertyName2", "outputDataSampling"],
        },
    ),
    (
        "nodes-base.scheduleTrigger",
        EssentialsConfig {
            required: &[],
            common: &["rule"],
        },
    ),
];

/// Human descriptions for frequently used field names (lowercase keys).
const FIELD_DESCRIPTIONS: &[(&str, &str)] = &[
    ("url", "The URL to send the request to"),
    ("method", "HTTP method to use for the request"),
    ("authentication", "Authentication method to use"),
    ("sendbody", "Whether to send a request body"),
    ("sendheaders", "Whether to send custom headers"),
    ("sendquery", "Whether to send query parameters"),
    ("contenttype", "Content type of the request body"),
    ("jsonbody", "JSON body to send with the request"),
    ("headers", "Headers to include in the request"),
    ("body", "Body content to send"),
    ("query", "Query to execute"),
    ("resource", "Resource to operate on"),
    ("operation", "Operation to perform"),
    ("channel", "Channel to post to"),
    ("text", "Text content to send"),
    ("subject", "Subject line of the message"),
    ("toemail", "Recipient email address"),
    ("fromemail", "Sender email address"),
    ("table", "Database table to use"),
    ("httpmethod", "HTTP method the webhook listens for"),
    ("responsemode", "When and how to respond to the caller"),
    ("path", "Path segment the endpoint is served on"),
    ("timeout", "Timeout in milliseconds"),
    ("limit", "Maximum number of results to return"),
    ("returnall", "Whether to return all results or stop at the limit"),
    ("jscode", "JavaScript code to execute"),
    ("pythoncode", "Python code to execute"),
    ("model", "Model to use"),
    ("prompt", "Prompt sent to the model"),
];

/// Display-oriented projection of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedProperty {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSummary>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_when: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_hint: Option<String>,
    /// Dot path of nested properties; set by search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// One enumerated choice on a simplified property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSummary {
    pub value: Value,
    pub label: String,
}

/// Reduced property view of a unit type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Essentials {
    pub required: Vec<SimplifiedProperty>,
    pub common: Vec<SimplifiedProperty>,
}

impl Essentials {
    pub fn len(&self) -> usize {
        self.required.len() + self.common.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Curated essentials for a unit type, if it has any.
pub fn essentials_config(unit_type: &str) -> Option<&'static EssentialsConfig> {
    let normalized = normalize_unit_type(unit_type);
    CURATED_ESSENTIALS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, config)| config)
}

/// Extract the required and common properties of a unit type.
pub fn get_essentials(descriptors: &[PropertyDescriptor], unit_type: &str) -> Essentials {
    let deduped = dedupe(descriptors);
    let essentials = match essentials_config(unit_type) {
        Some(config) => curated(&deduped, config),
        None => {
            log::debug!("no curated essentials for '{}', inferring", unit_type);
            inferred(&deduped)
        }
    };
    cap_total(essentials)
}

/// Drop later descriptors that repeat an earlier (name, display rules) pair.
pub fn dedupe(descriptors: &[PropertyDescriptor]) -> Vec<&PropertyDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .iter()
        .filter(|descriptor| {
            let rules = serde_json::to_string(&descriptor.display_options).unwrap_or_default();
            seen.insert((descriptor.name.clone(), rules))
        })
        .collect()
}

/// Find a property by name, looking into collection members when it is not
/// declared at the top level.
pub fn find_property<'a>(
    descriptors: &[&'a PropertyDescriptor],
    name: &str,
) -> Option<&'a PropertyDescriptor> {
    find_at_depth(descriptors, name, 0)
}

fn find_at_depth<'a>(
    descriptors: &[&'a PropertyDescriptor],
    name: &str,
    depth: usize,
) -> Option<&'a PropertyDescriptor> {
    if let Some(found) = descriptors.iter().copied().find(|d| d.name == name) {
        return Some(found);
    }
    if depth >= MAX_NESTING_DEPTH {
        return None;
    }
    descriptors
        .iter()
        .copied()
        .filter(|d| d.property_type.is_container())
        .find_map(|container| {
            let children: Vec<&PropertyDescriptor> =
                container.nested().into_iter().map(|(_, child)| child).collect();
            find_at_depth(&children, name, depth + 1)
        })
}

fn curated(descriptors: &[&PropertyDescriptor], config: &EssentialsConfig) -> Essentials {
    let mut seen = HashSet::new();

    let required = config
        .required
        .iter()
        .filter(|name| seen.insert(**name))
        .filter_map(|name| find_property(descriptors, name))
        .map(|descriptor| {
            let mut simplified = simplify_property(descriptor);
            simplified.required = true;
            simplified
        })
        .collect();

    let common = config
        .common
        .iter()
        .filter(|name| seen.insert(**name))
        .filter_map(|name| find_property(descriptors, name))
        .map(|descriptor| {
            // Requiredness is carried by the required list only
            let mut simplified = simplify_property(descriptor);
            simplified.required = false;
            simplified
        })
        .collect();

    Essentials { required, common }
}

fn inferred(descriptors: &[&PropertyDescriptor]) -> Essentials {
    let mut names: HashSet<String> = HashSet::new();

    let required: Vec<SimplifiedProperty> = descriptors
        .iter()
        .filter(|d| d.required && !d.property_type.is_display_only())
        .filter(|d| names.insert(d.name.clone()))
        .take(MAX_INFERRED_REQUIRED)
        .map(|d| simplify_property(d))
        .collect();

    let mut common: Vec<SimplifiedProperty> = descriptors
        .iter()
        .filter(|d| is_common_candidate(d) && d.display_options.is_none())
        .filter(|d| names.insert(d.name.clone()))
        .take(MAX_INFERRED_COMMON)
        .map(|d| simplify_property(d))
        .collect();

    let total = required.len() + common.len();
    if total < MIN_INFERRED_TOTAL {
        let backfill: Vec<SimplifiedProperty> = descriptors
            .iter()
            .filter(|d| is_common_candidate(d))
            .filter(|d| {
                d.display_options
                    .as_ref()
                    .is_some_and(|display| display.show_field_count() == 1)
            })
            .filter(|d| names.insert(d.name.clone()))
            .take(MIN_INFERRED_TOTAL - total)
            .map(|d| simplify_property(d))
            .collect();
        common.extend(backfill);
    }

    Essentials { required, common }
}

fn is_common_candidate(descriptor: &PropertyDescriptor) -> bool {
    !descriptor.required
        && !descriptor.property_type.is_display_only()
        && !is_internal_name(&descriptor.name)
}

fn is_internal_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with("options")
}

/// Trim common first, then required, so the total stays within bounds.
///
/// Required entries are only cut once they alone exceed the total, so the
/// first fifteen are always kept.
fn cap_total(mut essentials: Essentials) -> Essentials {
    if essentials.len() <= MAX_ESSENTIALS {
        return essentials;
    }
    let kept_required = essentials.required.len().min(MAX_ESSENTIALS);
    essentials.required.truncate(kept_required);
    essentials
        .common
        .truncate(MAX_ESSENTIALS.saturating_sub(kept_required));
    essentials
}

/// Project a descriptor into its display-oriented form.
pub fn simplify_property(descriptor: &PropertyDescriptor) -> SimplifiedProperty {
    let options = descriptor
        .choices()
        .take(MAX_OPTIONS)
        .map(|choice| OptionSummary {
            value: choice.value.clone(),
            label: choice.name.clone(),
        })
        .collect();

    let show_when = descriptor
        .show()
        .filter(|show| !show.is_empty() && show.len() <= MAX_SHOW_WHEN_FIELDS)
        .cloned();

    SimplifiedProperty {
        name: descriptor.name.clone(),
        display_name: descriptor.label().to_string(),
        property_type: descriptor.property_type.clone(),
        description: describe(descriptor),
        default: descriptor.default.clone(),
        options,
        required: descriptor.required,
        placeholder: descriptor.placeholder.clone(),
        show_when,
        usage_hint: usage_hint(descriptor),
        path: None,
    }
}

/// Derive a human description for a descriptor.
pub fn describe(descriptor: &PropertyDescriptor) -> String {
    let explicit = [&descriptor.description, &descriptor.hint]
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty());
    if let Some(text) = explicit {
        return text.clone();
    }
    if let Some(placeholder) = descriptor.placeholder.as_deref().filter(|p| !p.is_empty()) {
        return format!("Example: {}", placeholder);
    }
    if !descriptor.display_name.trim().is_empty() {
        return descriptor.display_name.clone();
    }
    if let Some(text) = lookup_field_description(&descriptor.name) {
        return text.to_string();
    }
    type_sentence(&descriptor.property_type, &humanize(&descriptor.name))
}

fn lookup_field_description(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    FIELD_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == lower)
        .or_else(|| FIELD_DESCRIPTIONS.iter().find(|(key, _)| lower.contains(key)))
        .map(|(_, text)| *text)
}

fn type_sentence(property_type: &PropertyType, label: &str) -> String {
    match property_type {
        PropertyType::Boolean => format!("Enable or disable {}", label),
        PropertyType::Options => format!("Select {}", label),
        PropertyType::MultiOptions => format!("Select one or more {}", label),
        PropertyType::Number => format!("Numeric value for {}", label),
        PropertyType::Collection => format!("Additional {} settings", label),
        PropertyType::FixedCollection => format!("Configure {}", label),
        PropertyType::Json => format!("JSON data for {}", label),
        PropertyType::Code => format!("Code for {}", label),
        PropertyType::Color => format!("Color for {}", label),
        PropertyType::DateTime => format!("Date and time for {}", label),
        PropertyType::ResourceLocator => format!("Select or identify {}", label),
        PropertyType::CredentialsSelect => format!("Credentials for {}", label),
        PropertyType::Hidden | PropertyType::Notice => label.to_string(),
        PropertyType::String | PropertyType::Other(_) => format!("Value for {}", label),
    }
}

/// `sendBody` becomes `send body`.
fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c == '_' || c == '-' {
            out.push(' ');
        } else if c.is_uppercase() {
            if i > 0 && !out.ends_with(' ') {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn usage_hint(descriptor: &PropertyDescriptor) -> Option<String> {
    let lower = descriptor.name.to_lowercase();
    let hint = if lower.contains("url") || lower.contains("endpoint") {
        "Enter the full URL including the protocol (https://)"
    } else if lower.contains("auth") || lower.contains("credential") {
        "Choose the authentication method; matching credentials must be configured"
    } else if descriptor.property_type == PropertyType::Json || lower.contains("json") {
        "Enter valid JSON or an expression that returns an object"
    } else if descriptor.property_type == PropertyType::Code || lower.ends_with("code") {
        "Write code in the selected language; incoming items are available to the script"
    } else if descriptor.property_type == PropertyType::Boolean && is_toggle_name(&descriptor.name)
    {
        "Enabling this reveals related options"
    } else {
        return None;
    };
    Some(hint.to_string())
}

/// Booleans named like `sendBody` or `includeOtherFields` gate other fields.
fn is_toggle_name(name: &str) -> bool {
    ["send", "include", "use", "enable", "specify"]
        .iter()
        .any(|prefix| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{parse_descriptor, parse_descriptors};
    use serde_json::json;

    fn prop(value: Value) -> PropertyDescriptor {
        parse_descriptor(&value).unwrap()
    }

    fn names(props: &[SimplifiedProperty]) -> Vec<&str> {
        props.iter().map(|p| p.name.as_str()).collect()
    }

    fn http_request_properties() -> Vec<PropertyDescriptor> {
        parse_descriptors(&json!([
            { "name": "method", "displayName": "Method", "type": "options", "default": "GET",
              "options": [{ "name": "GET", "value": "GET" }, { "name": "POST", "value": "POST" }] },
            { "name": "url", "displayName": "URL", "type": "string", "default": "" },
            { "name": "authentication", "displayName": "Authentication", "type": "options",
              "options": [{ "name": "None", "value": "none" }] },
            { "name": "sendBody", "displayName": "Send Body", "type": "boolean", "default": false },
            { "name": "contentType", "displayName": "Body Content Type", "type": "options",
              "displayOptions": { "show": { "sendBody": [true] } } },
            { "name": "options", "displayName": "Options", "type": "collection", "default": {},
              "options": [{ "name": "timeout", "displayName": "Timeout", "type": "number" }] },
            { "name": "sendHeaders", "displayName": "Send Headers", "type": "boolean" }
        ]))
    }

    #[test]
    fn curated_marks_required_and_excludes_from_common() {
        let essentials = get_essentials(&http_request_properties(), "n8n-nodes-base.httpRequest");

        assert_eq!(names(&essentials.required), ["url"]);
        assert!(essentials.required[0].required);
        assert_eq!(
            names(&essentials.common),
            ["method", "authentication", "sendBody", "contentType", "sendHeaders", "options"]
        );
    }

    #[test]
    fn curated_common_is_never_flagged_required() {
        let props = parse_descriptors(&json!([
            { "name": "url", "type": "string" },
            { "name": "method", "type": "options", "required": true }
        ]));
        let essentials = get_essentials(&props, "nodes-base.httpRequest");

        assert_eq!(names(&essentials.common), ["method"]);
        assert!(!essentials.common[0].required);
        let value = serde_json::to_value(&essentials).unwrap();
        assert!(value["common"][0].get("required").is_none());
    }

    #[test]
    fn curated_skips_names_missing_from_schema() {
        let props = parse_descriptors(&json!([{ "name": "path", "type": "string" }]));
        let essentials = get_essentials(&props, "nodes-base.webhook");
        assert!(essentials.required.is_empty());
        assert_eq!(names(&essentials.common), ["path"]);
    }

    #[test]
    fn curated_resolves_nested_collection_members() {
        let props = parse_descriptors(&json!([{
            "name": "additionalOptions",
            "type": "fixedCollection",
            "options": [{ "name": "values", "values": [
                { "name": "table", "type": "string", "description": "Target table" }
            ]}]
        }]));
        let essentials = get_essentials(&props, "nodes-base.postgres");
        assert_eq!(names(&essentials.common), ["table"]);
        assert_eq!(essentials.common[0].description, "Target table");
    }

    #[test]
    fn deduplicates_same_name_and_rules() {
        let props = parse_descriptors(&json!([
            { "name": "x", "type": "string", "description": "first" },
            { "name": "x", "type": "string", "description": "second" },
            { "name": "x", "type": "string", "displayOptions": { "show": { "mode": ["a"] } } }
        ]));
        assert_eq!(dedupe(&props).len(), 2);

        let essentials = get_essentials(&props, "nodes-base.unknownThing");
        let xs: Vec<_> = essentials
            .common
            .iter()
            .chain(&essentials.required)
            .filter(|p| p.name == "x")
            .collect();
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].description, "first");
    }

    #[test]
    fn inferred_uses_flags_and_filters_internal_names() {
        let props = parse_descriptors(&json!([
            { "name": "apiKey", "type": "string", "required": true },
            { "name": "notice", "type": "notice" },
            { "name": "_internal", "type": "string" },
            { "name": "optionsExtra", "type": "string" },
            { "name": "label", "type": "string" },
            { "name": "hidden", "type": "hidden" },
            { "name": "conditional", "type": "string",
              "displayOptions": { "show": { "label": ["a"] } } },
            { "name": "twoConditions", "type": "string",
              "displayOptions": { "show": { "label": ["a"], "apiKey": ["b"] } } }
        ]));
        let essentials = get_essentials(&props, "community.custom");

        assert_eq!(names(&essentials.required), ["apiKey"]);
        // `conditional` is a backfill; the two-field condition is not
        assert_eq!(names(&essentials.common), ["label", "conditional"]);
    }

    #[test]
    fn inferred_caps_each_list() {
        let entries: Vec<Value> = (0..25)
            .map(|i| json!({ "name": format!("req{}", i), "type": "string", "required": true }))
            .chain((0..25).map(|i| json!({ "name": format!("field{}", i), "type": "string" })))
            .collect();
        let props = parse_descriptors(&Value::Array(entries));
        let essentials = get_essentials(&props, "community.big");
        assert_eq!(essentials.required.len(), 10);
        assert_eq!(essentials.common.len(), 10);
    }

    #[test]
    fn required_and_common_are_disjoint() {
        let props = parse_descriptors(&json!([
            { "name": "id", "type": "string", "required": true },
            { "name": "id", "type": "string", "displayOptions": { "show": { "op": ["get"] } } },
            { "name": "limit", "type": "number" }
        ]));
        let essentials = get_essentials(&props, "community.records");
        let required: HashSet<&str> = names(&essentials.required).into_iter().collect();
        assert!(essentials.common.iter().all(|p| !required.contains(p.name.as_str())));
    }

    #[test]
    fn total_cap_trims_common_first() {
        let required: Vec<SimplifiedProperty> = (0..20)
            .map(|i| simplify_property(&PropertyDescriptor::new(format!("r{}", i), PropertyType::String)))
            .collect();
        let common: Vec<SimplifiedProperty> = (0..20)
            .map(|i| simplify_property(&PropertyDescriptor::new(format!("c{}", i), PropertyType::String)))
            .collect();
        let capped = cap_total(Essentials { required, common });
        assert_eq!(capped.required.len(), 20);
        assert_eq!(capped.common.len(), 10);

        let required: Vec<SimplifiedProperty> = (0..40)
            .map(|i| simplify_property(&PropertyDescriptor::new(format!("r{}", i), PropertyType::String)))
            .collect();
        let capped = cap_total(Essentials { required, common: Vec::new() });
        assert_eq!(capped.required.len(), 30);
    }

    #[test]
    fn describe_prefers_explicit_text() {
        let p = prop(json!({ "name": "url", "description": "Where to send it", "hint": "h" }));
        assert_eq!(describe(&p), "Where to send it");

        let p = prop(json!({ "name": "url", "hint": "Use https" }));
        assert_eq!(describe(&p), "Use https");

        let p = prop(json!({ "name": "url", "placeholder": "https://api.example.com" }));
        assert_eq!(describe(&p), "Example: https://api.example.com");

        let p = prop(json!({ "name": "url", "displayName": "URL" }));
        assert_eq!(describe(&p), "URL");
    }

    #[test]
    fn describe_uses_field_table_then_type() {
        let p = prop(json!({ "name": "url" }));
        assert_eq!(describe(&p), "The URL to send the request to");

        let p = prop(json!({ "name": "webhookUrl" }));
        assert_eq!(describe(&p), "The URL to send the request to");

        let p = prop(json!({ "name": "keepBinary", "type": "boolean" }));
        assert_eq!(describe(&p), "Enable or disable keep binary");

        let p = prop(json!({ "name": "color", "type": "options" }));
        assert_eq!(describe(&p), "Select color");
    }

    #[test]
    fn simplify_truncates_options_and_surfaces_short_conditions() {
        let choices: Vec<Value> = (0..30)
            .map(|i| json!({ "name": format!("Choice {}", i), "value": i }))
            .collect();
        let p = prop(json!({
            "name": "pick",
            "type": "options",
            "options": choices,
            "displayOptions": { "show": { "resource": ["a"] } }
        }));
        let simplified = simplify_property(&p);
        assert_eq!(simplified.options.len(), MAX_OPTIONS);
        assert_eq!(simplified.options[0].label, "Choice 0");
        assert!(simplified.show_when.is_some());

        let p = prop(json!({
            "name": "pick",
            "displayOptions": { "show": { "a": [1], "b": [2], "c": [3] } }
        }));
        assert!(simplify_property(&p).show_when.is_none());
    }

    #[test]
    fn usage_hints() {
        let hint = |value: Value| simplify_property(&prop(value)).usage_hint;
        assert!(hint(json!({ "name": "url" })).unwrap().contains("https://"));
        assert!(hint(json!({ "name": "authentication", "type": "options" }))
            .unwrap()
            .contains("credentials"));
        assert!(hint(json!({ "name": "body", "type": "json" })).unwrap().contains("JSON"));
        assert!(hint(json!({ "name": "jsCode", "type": "string" })).unwrap().contains("code"));
        assert!(hint(json!({ "name": "sendBody", "type": "boolean" })).is_some());
        assert!(hint(json!({ "name": "usernames", "type": "boolean" })).is_none());
        assert!(hint(json!({ "name": "limit", "type": "number" })).is_none());
    }

    #[test]
    fn essentials_config_lookup_normalizes() {
        assert!(essentials_config("n8n-nodes-base.httpRequest").is_some());
        assert!(essentials_config("nodes-base.httpRequest").is_some());
        assert!(essentials_config("nodes-base.unknown").is_none());
    }
}
