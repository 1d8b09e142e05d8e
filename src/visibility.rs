//! Visibility evaluation - decides which properties are shown for a configuration.
//!
//! | Rule | Effect |
//! |------|--------|
//! | no `displayOptions` | always visible |
//! | `show: {field: values}` | hidden unless every field holds one of its values |
//! | `hide: {field: values}` | hidden if any field holds one of its values |
//!
//! `hide` only ever denies visibility. A property with `hide` rules and no
//! `show` rules is visible unless one of them matches.

use serde_json::{Map, Value};

use crate::types::{expected_values, ConfigurationSnapshot, PropertyDescriptor};

/// Decide whether a property is currently shown.
pub fn is_visible(descriptor: &PropertyDescriptor, config: &ConfigurationSnapshot) -> bool {
    let Some(display) = &descriptor.display_options else {
        return true;
    };

    if let Some(show) = &display.show {
        for (field, expected) in show {
            if !matches_condition(config.get(field), expected) {
                return false;
            }
        }
    }

    if let Some(hide) = &display.hide {
        for (field, expected) in hide {
            if matches_condition(config.get(field), expected) {
                return false;
            }
        }
    }

    true
}

/// Explain why a property is hidden.
///
/// Returns `None` when the property is visible, otherwise a message such as
/// `Requires: authentication="apiKey"` listing the failing `show` conditions
/// and the matching `hide` conditions.
pub fn visibility_requirement(
    descriptor: &PropertyDescriptor,
    config: &ConfigurationSnapshot,
) -> Option<String> {
    let display = descriptor.display_options.as_ref()?;
    let mut parts = Vec::new();

    if let Some(show) = &display.show {
        for (field, expected) in show {
            if !matches_condition(config.get(field), expected) {
                parts.push(format!("{}={}", field, join_values(expected)));
            }
        }
    }

    if let Some(hide) = &display.hide {
        for (field, expected) in hide {
            if matches_condition(config.get(field), expected) {
                parts.push(format!("{}!={}", field, join_values(expected)));
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("Requires: {}", parts.join(", ")))
    }
}

/// Merge declared top-level defaults into a configuration.
///
/// Keys already present (including explicit `null`) are never overwritten.
/// Nested collection defaults are left to the collection itself.
pub fn apply_defaults(
    descriptors: &[PropertyDescriptor],
    config: &ConfigurationSnapshot,
) -> ConfigurationSnapshot {
    let mut effective: ConfigurationSnapshot = config.clone();
    for descriptor in descriptors {
        let Some(default) = &descriptor.default else {
            continue;
        };
        if !effective.contains_key(&descriptor.name) {
            effective.insert(descriptor.name.clone(), default.clone());
        }
    }
    effective
}

/// Top-level descriptors visible for a configuration, in declaration order.
pub fn visible_properties<'a>(
    descriptors: &'a [PropertyDescriptor],
    config: &ConfigurationSnapshot,
) -> Vec<&'a PropertyDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| is_visible(descriptor, config))
        .collect()
}

/// An unset field never matches a condition.
fn matches_condition(current: Option<&Value>, expected: &Value) -> bool {
    match current {
        Some(value) => expected_values(expected)
            .iter()
            .any(|candidate| values_equal(candidate, value)),
        None => false,
    }
}

/// JSON equality where numbers compare by value, so `1` matches `1.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn join_values(expected: &Value) -> String {
    expected_values(expected)
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Build a configuration snapshot from a JSON object value.
///
/// Non-object values yield an empty snapshot.
pub fn snapshot_from_value(value: &Value) -> ConfigurationSnapshot {
    value.as_object().cloned().unwrap_or_else(Map::new)
}
