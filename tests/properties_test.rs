//! Property-based tests for visibility and defaults.

use node_schema::{
    apply_defaults, get_essentials, is_visible, parse_descriptor, parse_descriptors,
    ConfigurationSnapshot, PropertyDescriptor,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn descriptor(value: Value) -> PropertyDescriptor {
    parse_descriptor(&value).unwrap()
}

fn small_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5i64..5).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::from),
    ]
}

fn config() -> impl Strategy<Value = ConfigurationSnapshot> {
    prop::collection::btree_map("[a-d]", small_value(), 0..4)
        .prop_map(|entries| entries.into_iter().collect::<ConfigurationSnapshot>())
}

fn defaulted_descriptors() -> impl Strategy<Value = Vec<PropertyDescriptor>> {
    prop::collection::vec(("[a-f]", prop::option::of(small_value())), 0..8).prop_map(|entries| {
        let list: Vec<Value> = entries
            .into_iter()
            .map(|(name, default)| match default {
                Some(default) => json!({ "name": name, "default": default }),
                None => json!({ "name": name }),
            })
            .collect();
        parse_descriptors(&Value::Array(list))
    })
}

proptest! {
    #[test]
    fn without_display_options_always_visible(cfg in config()) {
        let d = descriptor(json!({ "name": "x", "type": "string" }));
        prop_assert!(is_visible(&d, &cfg));
    }

    #[test]
    fn show_requires_a_listed_value(a in prop::option::of(-5i64..5), mut cfg in config()) {
        let d = descriptor(json!({ "name": "x", "displayOptions": { "show": { "a": [1, 2] } } }));
        cfg.remove("a");
        if let Some(a) = a {
            cfg.insert("a".into(), json!(a));
        }
        prop_assert_eq!(is_visible(&d, &cfg), matches!(a, Some(1) | Some(2)));
    }

    #[test]
    fn hide_only_denies_on_match(a in prop::option::of(-5i64..5), mut cfg in config()) {
        let d = descriptor(json!({ "name": "x", "displayOptions": { "hide": { "a": [1] } } }));
        cfg.remove("a");
        if let Some(a) = a {
            cfg.insert("a".into(), json!(a));
        }
        prop_assert_eq!(!is_visible(&d, &cfg), a == Some(1));
    }

    #[test]
    fn apply_defaults_is_idempotent(descriptors in defaulted_descriptors(), cfg in config()) {
        let once = apply_defaults(&descriptors, &cfg);
        let twice = apply_defaults(&descriptors, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn apply_defaults_never_overwrites(descriptors in defaulted_descriptors(), cfg in config()) {
        let effective = apply_defaults(&descriptors, &cfg);
        for (key, value) in &cfg {
            prop_assert_eq!(effective.get(key), Some(value));
        }
    }

    #[test]
    fn essentials_sets_are_disjoint(descriptors in defaulted_descriptors(), required in any::<bool>()) {
        let mut descriptors = descriptors;
        if let Some(first) = descriptors.first_mut() {
            first.required = required;
        }
        let essentials = get_essentials(&descriptors, "community.generated");
        for r in &essentials.required {
            prop_assert!(!essentials.common.iter().any(|c| c.name == r.name));
        }
    }
}
