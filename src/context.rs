//! Operation context - narrows a multi-operation unit to its selected variant.

use serde::Serialize;
use serde_json::Value;

use crate::types::{ConfigurationSnapshot, PropertyDescriptor};
use crate::visibility::is_visible;

/// Discriminator values that select which variant of a unit is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct OperationContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl OperationContext {
    /// Read the discriminator fields from a configuration.
    ///
    /// Only string values are taken; nothing is coerced or defaulted.
    pub fn from_config(config: &ConfigurationSnapshot) -> Self {
        let field = |key: &str| config.get(key).and_then(Value::as_str).map(String::from);
        Self {
            resource: field("resource"),
            operation: field("operation"),
            action: field("action"),
            mode: field("mode"),
        }
    }

    /// Returns true if no discriminator is set.
    pub fn is_empty(&self) -> bool {
        self.resource.is_none()
            && self.operation.is_none()
            && self.action.is_none()
            && self.mode.is_none()
    }

    /// Discriminators that narrow relevance, paired with their field names.
    ///
    /// `mode` is informational and never narrows.
    fn narrowing(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("resource", self.resource.as_deref()),
            ("operation", self.operation.as_deref()),
            ("action", self.action.as_deref()),
        ]
    }
}

/// Decide whether a property matters for the selected operation.
///
/// Invisible properties are never relevant. A discriminator the descriptor's
/// `show` rules do not name imposes no constraint, so operation-agnostic
/// properties stay relevant for every operation.
pub fn is_relevant(
    descriptor: &PropertyDescriptor,
    config: &ConfigurationSnapshot,
    context: &OperationContext,
) -> bool {
    if !is_visible(descriptor, config) {
        return false;
    }
    if context.is_empty() {
        return true;
    }
    let Some(display) = &descriptor.display_options else {
        return true;
    };

    for (field, selected) in context.narrowing() {
        let Some(selected) = selected else {
            continue;
        };
        if let Some(declared) = display.show_values(field) {
            if !declared.iter().any(|v| v.as_str() == Some(selected)) {
                return false;
            }
        }
    }

    true
}

/// Top-level descriptors relevant to the configuration's own context.
pub fn relevant_properties<'a>(
    descriptors: &'a [PropertyDescriptor],
    config: &ConfigurationSnapshot,
) -> Vec<&'a PropertyDescriptor> {
    let context = OperationContext::from_config(config);
    descriptors
        .iter()
        .filter(|descriptor| is_relevant(descriptor, config, &context))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_descriptor;
    use crate::visibility::snapshot_from_value;
    use serde_json::json;

    fn prop(value: Value) -> PropertyDescriptor {
        parse_descriptor(&value).unwrap()
    }

    #[test]
    fn extracts_string_discriminators() {
        let cfg = snapshot_from_value(&json!({
            "resource": "message",
            "operation": "send",
            "mode": 3,
            "other": "x"
        }));
        let ctx = OperationContext::from_config(&cfg);
        assert_eq!(ctx.resource.as_deref(), Some("message"));
        assert_eq!(ctx.operation.as_deref(), Some("send"));
        assert_eq!(ctx.action, None);
        assert_eq!(ctx.mode, None);
        assert!(!ctx.is_empty());
    }

    #[test]
    fn empty_context_equality() {
        let ctx = OperationContext::from_config(&snapshot_from_value(&json!({})));
        assert!(ctx.is_empty());
        assert_eq!(ctx, OperationContext::default());
    }

    #[test]
    fn empty_context_keeps_every_visible_property() {
        let p = prop(json!({ "name": "x", "displayOptions": { "hide": { "a": [1] } } }));
        let cfg = snapshot_from_value(&json!({}));
        assert!(is_relevant(&p, &cfg, &OperationContext::default()));
    }

    #[test]
    fn invisible_is_never_relevant() {
        let p = prop(json!({ "name": "x", "displayOptions": { "show": { "operation": ["send"] } } }));
        let cfg = snapshot_from_value(&json!({ "operation": "get" }));
        let ctx = OperationContext::from_config(&cfg);
        assert!(!is_relevant(&p, &cfg, &ctx));
    }

    #[test]
    fn context_narrows_operation_specific_properties() {
        let p = prop(json!({
            "name": "messageId",
            "displayOptions": { "show": { "operation": ["get", "delete"] } }
        }));
        let cfg = snapshot_from_value(&json!({ "operation": "get" }));

        let get = OperationContext {
            operation: Some("get".into()),
            ..Default::default()
        };
        let send = OperationContext {
            operation: Some("send".into()),
            ..Default::default()
        };
        assert!(is_relevant(&p, &cfg, &get));
        assert!(!is_relevant(&p, &cfg, &send));
    }

    #[test]
    fn unnamed_discriminator_imposes_no_constraint() {
        let p = prop(json!({
            "name": "channel",
            "displayOptions": { "show": { "resource": ["message"] } }
        }));
        let cfg = snapshot_from_value(&json!({ "resource": "message", "operation": "send" }));
        let ctx = OperationContext::from_config(&cfg);
        assert!(is_relevant(&p, &cfg, &ctx));
    }

    #[test]
    fn mode_never_narrows() {
        let p = prop(json!({ "name": "x", "displayOptions": { "show": { "mode": ["raw"] } } }));
        let cfg = snapshot_from_value(&json!({ "mode": "raw" }));
        let ctx = OperationContext {
            mode: Some("other".into()),
            ..Default::default()
        };
        assert!(is_relevant(&p, &cfg, &ctx));
    }

    #[test]
    fn relevant_properties_filters_in_order() {
        let props = vec![
            prop(json!({ "name": "operation", "type": "options" })),
            prop(json!({ "name": "text", "displayOptions": { "show": { "operation": ["send"] } } })),
            prop(json!({ "name": "messageId", "displayOptions": { "show": { "operation": ["get"] } } })),
            prop(json!({ "name": "options", "type": "collection" })),
        ];
        let cfg = snapshot_from_value(&json!({ "operation": "send" }));
        let names: Vec<&str> = relevant_properties(&props, &cfg)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["operation", "text", "options"]);
    }
}
