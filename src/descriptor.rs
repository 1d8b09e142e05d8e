//! Descriptor parsing - turns JSON property lists into typed descriptor trees.
//!
//! Parsing is lenient: an entry without a string `name` is skipped rather
//! than failing the whole set, so partially-known schemas still load.

use serde_json::{Map, Value};

use crate::types::{
    DisplayOptions, OptionChoice, PropertyDescriptor, PropertyGroup, PropertyOption, PropertyType,
    MAX_NESTING_DEPTH,
};

/// Parse a descriptor set.
///
/// Accepts either an array of descriptors or a unit description object
/// carrying them under `properties`. Anything else yields an empty set.
pub fn parse_descriptors(value: &Value) -> Vec<PropertyDescriptor> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("properties") {
            Some(Value::Array(entries)) => entries,
            _ => {
                log::debug!("descriptor object has no properties array");
                return Vec::new();
            }
        },
        _ => return Vec::new(),
    };
    parse_list(entries, 0)
}

/// Parse a single descriptor. Returns `None` for malformed entries.
pub fn parse_descriptor(value: &Value) -> Option<PropertyDescriptor> {
    parse_at_depth(value, 0)
}

fn parse_list(entries: &[Value], depth: usize) -> Vec<PropertyDescriptor> {
    entries
        .iter()
        .filter_map(|entry| parse_at_depth(entry, depth))
        .collect()
}

fn parse_at_depth(value: &Value, depth: usize) -> Option<PropertyDescriptor> {
    let map = value.as_object()?;
    let Some(name) = map.get("name").and_then(Value::as_str) else {
        log::debug!("skipping descriptor without a name");
        return None;
    };

    let property_type = map
        .get("type")
        .and_then(Value::as_str)
        .map(PropertyType::parse)
        .unwrap_or_default();

    let options = match map.get("options") {
        Some(Value::Array(entries)) => parse_options(entries, &property_type, name, depth),
        _ => Vec::new(),
    };

    Some(PropertyDescriptor {
        name: name.to_string(),
        display_name: string_field(map, "displayName").unwrap_or_default(),
        property_type,
        required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
        // An explicit `null` default is kept as Some(Null)
        default: map.get("default").cloned(),
        options,
        placeholder: string_field(map, "placeholder"),
        description: string_field(map, "description"),
        hint: string_field(map, "hint"),
        display_options: map.get("displayOptions").and_then(parse_display_options),
    })
}

fn parse_options(
    entries: &[Value],
    property_type: &PropertyType,
    owner: &str,
    depth: usize,
) -> Vec<PropertyOption> {
    match property_type {
        PropertyType::Collection | PropertyType::FixedCollection
            if depth + 1 >= MAX_NESTING_DEPTH =>
        {
            log::debug!(
                "nesting limit {} reached under '{}', dropping nested properties",
                MAX_NESTING_DEPTH,
                owner
            );
            Vec::new()
        }
        PropertyType::Collection => parse_list(entries, depth + 1)
            .into_iter()
            .map(PropertyOption::Property)
            .collect(),
        PropertyType::FixedCollection => entries
            .iter()
            .filter_map(|entry| parse_group(entry, depth + 1))
            .map(PropertyOption::Group)
            .collect(),
        _ => entries
            .iter()
            .filter_map(parse_choice)
            .map(PropertyOption::Choice)
            .collect(),
    }
}

fn parse_group(value: &Value, depth: usize) -> Option<PropertyGroup> {
    let map = value.as_object()?;
    let name = map.get("name").and_then(Value::as_str)?;
    let values = match map.get("values") {
        Some(Value::Array(entries)) => parse_list(entries, depth),
        _ => Vec::new(),
    };
    Some(PropertyGroup {
        name: name.to_string(),
        display_name: string_field(map, "displayName").unwrap_or_default(),
        values,
    })
}

fn parse_choice(value: &Value) -> Option<OptionChoice> {
    match value {
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str)?;
            Some(OptionChoice {
                name: name.to_string(),
                value: map
                    .get("value")
                    .cloned()
                    .unwrap_or_else(|| Value::String(name.to_string())),
                description: string_field(map, "description"),
            })
        }
        // Bare scalars double as label and value
        Value::String(s) => Some(OptionChoice {
            name: s.clone(),
            value: value.clone(),
            description: None,
        }),
        Value::Number(n) => Some(OptionChoice {
            name: n.to_string(),
            value: value.clone(),
            description: None,
        }),
        _ => None,
    }
}

fn parse_display_options(value: &Value) -> Option<DisplayOptions> {
    let map = value.as_object()?;
    let show = map.get("show").and_then(Value::as_object).cloned();
    let hide = map.get("hide").and_then(Value::as_object).cloned();
    if show.is_none() && hide.is_none() {
        return None;
    }
    Some(DisplayOptions { show, hide })
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_basic_fields() {
        let prop = parse_descriptor(&json!({
            "name": "url",
            "displayName": "URL",
            "type": "string",
            "required": true,
            "default": "",
            "placeholder": "https://example.com"
        }))
        .unwrap();

        assert_eq!(prop.name, "url");
        assert_eq!(prop.display_name, "URL");
        assert_eq!(prop.property_type, PropertyType::String);
        assert!(prop.required);
        assert_eq!(prop.default, Some(json!("")));
        assert_eq!(prop.placeholder.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn explicit_null_default_is_kept() {
        let prop = parse_descriptor(&json!({ "name": "x", "default": null })).unwrap();
        assert_eq!(prop.default, Some(Value::Null));

        let prop = parse_descriptor(&json!({ "name": "x" })).unwrap();
        assert_eq!(prop.default, None);
    }

    #[test]
    fn skips_entries_without_name() {
        let props = parse_descriptors(&json!([
            { "displayName": "Anonymous", "type": "string" },
            { "name": "kept", "type": "string" },
            "not an object"
        ]));
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name, "kept");
    }

    #[test]
    fn accepts_unit_description_object() {
        let props = parse_descriptors(&json!({
            "name": "nodes-base.set",
            "properties": [{ "name": "mode", "type": "options" }]
        }));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn options_interpreted_by_type() {
        let choice = parse_descriptor(&json!({
            "name": "method",
            "type": "options",
            "options": [{ "name": "GET", "value": "GET" }, "POST"]
        }))
        .unwrap();
        assert_eq!(choice.choices().count(), 2);
        assert!(choice.nested().is_empty());

        let collection = parse_descriptor(&json!({
            "name": "options",
            "type": "collection",
            "options": [{ "name": "timeout", "type": "number" }]
        }))
        .unwrap();
        let nested = collection.nested();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].0, None);
        assert_eq!(nested[0].1.name, "timeout");

        let fixed = parse_descriptor(&json!({
            "name": "headerParameters",
            "type": "fixedCollection",
            "options": [{
                "name": "parameters",
                "displayName": "Parameter",
                "values": [{ "name": "name", "type": "string" }, { "name": "value", "type": "string" }]
            }]
        }))
        .unwrap();
        let nested = fixed.nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].0, Some("parameters"));
    }

    #[test]
    fn display_options_keep_field_order() {
        let prop = parse_descriptor(&json!({
            "name": "x",
            "displayOptions": { "show": { "resource": ["message"], "operation": ["send"] } }
        }))
        .unwrap();
        let show = prop.show().unwrap();
        let keys: Vec<&String> = show.keys().collect();
        assert_eq!(keys, ["resource", "operation"]);
    }

    #[test]
    fn empty_display_options_collapse_to_none() {
        let prop = parse_descriptor(&json!({ "name": "x", "displayOptions": {} })).unwrap();
        assert!(prop.display_options.is_none());
    }

    #[test]
    fn nesting_is_bounded() {
        let mut value = json!({ "name": "leaf", "type": "string" });
        for i in 0..(MAX_NESTING_DEPTH + 4) {
            value = json!({ "name": format!("level{}", i), "type": "collection", "options": [value] });
        }
        let prop = parse_descriptor(&value).unwrap();

        let mut depth = 0;
        let mut current = &prop;
        while let Some((_, child)) = current.nested().first().copied() {
            current = child;
            depth += 1;
        }
        assert!(depth < MAX_NESTING_DEPTH);
    }
}
