//! Loading descriptor sets, configurations and units.
//!
//! Sources are file paths, JSON strings, or HTTP URLs (with the `remote`
//! feature).

use std::path::Path;

use serde_json::{Map, Value};

use crate::descriptor::parse_descriptors;
use crate::error::LoadError;
use crate::types::{json_type_name, ConfigurationSnapshot, PropertyDescriptor, Unit};

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a JSON document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_json_str(&content)
}

/// Load a JSON document from a string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_json_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a JSON document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails, the server answers
/// with an error status, or the body isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_json_url(url: &str) -> Result<Value, LoadError> {
    let network = |source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network)?;

    log::debug!("fetching {}", url);
    let response = client.get(url).send().map_err(network)?;

    // Check for HTTP errors before parsing
    let response = response.error_for_status().map_err(network)?;

    response.json().map_err(network)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a JSON document from a file path or URL.
///
/// URL loading requires the `remote` feature.
pub fn load_json_auto(source: &str) -> Result<Value, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_json_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_json(Path::new(source))
    }
}

/// Load a descriptor set from a file path or URL.
///
/// See [`descriptors_from_value`] for the accepted shapes.
pub fn load_descriptors(source: &str) -> Result<Vec<PropertyDescriptor>, LoadError> {
    descriptors_from_value(&load_json_auto(source)?)
}

/// Read a descriptor set from either a bare array or an object with a
/// `properties` array (a full node description).
///
/// # Errors
///
/// Returns `LoadError::InvalidDescriptors` for any other shape. Individual
/// malformed entries are skipped, not rejected.
pub fn descriptors_from_value(value: &Value) -> Result<Vec<PropertyDescriptor>, LoadError> {
    let has_array = match value {
        Value::Array(_) => true,
        Value::Object(obj) => obj.get("properties").is_some_and(Value::is_array),
        _ => false,
    };
    if !has_array {
        return Err(LoadError::InvalidDescriptors {
            message: format!(
                "expected an array or an object with a \"properties\" array, got {}",
                json_type_name(value)
            ),
        });
    }
    Ok(parse_descriptors(value))
}

/// Load a unit (workflow node) from a file path or URL.
pub fn load_unit(source: &str) -> Result<Unit, LoadError> {
    unit_from_value(&load_json_auto(source)?)
}

/// Build a unit from a workflow node object.
///
/// `type` is required. `name` defaults to the type, `parameters` and
/// `credentials` default to empty.
///
/// # Errors
///
/// Returns `LoadError::InvalidUnit` if the value isn't an object, `type` is
/// missing, or `parameters`/`credentials` aren't objects.
pub fn unit_from_value(value: &Value) -> Result<Unit, LoadError> {
    let obj = value.as_object().ok_or_else(|| LoadError::InvalidUnit {
        message: format!("expected an object, got {}", json_type_name(value)),
    })?;

    let unit_type = obj
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| LoadError::InvalidUnit {
            message: "missing \"type\"".to_string(),
        })?;

    let parameters = object_field(obj, "parameters")?;
    let credentials = object_field(obj, "credentials")?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(unit_type);

    let mut unit = Unit::new(name, unit_type, parameters);
    unit.id = obj.get("id").and_then(Value::as_str).map(String::from);
    unit.credentials = credentials;
    Ok(unit)
}

fn object_field(obj: &Map<String, Value>, key: &str) -> Result<Map<String, Value>, LoadError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(LoadError::InvalidUnit {
            message: format!(
                "\"{}\" must be an object, got {}",
                key,
                json_type_name(other)
            ),
        }),
    }
}

/// Load a configuration snapshot (a parameters object) from a file path or URL.
pub fn load_config(source: &str) -> Result<ConfigurationSnapshot, LoadError> {
    match load_json_auto(source)? {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::InvalidConfiguration {
            actual: json_type_name(&other).to_string(),
        }),
    }
}
