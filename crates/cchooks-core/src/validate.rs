use serde_json::Value;

use crate::error::{HookError, Result};
use crate::event::{supported_event_names, HookEventName};

/// Check that `name` is one of the supported hook events.
///
/// Exact, case-sensitive comparison; no trimming.
pub fn validate_event_name(name: &str) -> Result<HookEventName> {
    name.parse::<HookEventName>().map_err(|_| {
        HookError::unsupported_event(
            format!("unsupported hook event '{name}'"),
            supported_event_names(),
        )
    })
}

/// Boundary form of [`validate_event_name`] for callers holding an untyped value.
pub fn validate_event_value(value: &Value) -> Result<HookEventName> {
    match value {
        Value::String(name) => validate_event_name(name),
        other => Err(HookError::unsupported_event(
            format!("event name must be a string, got {}", json_type_name(other)),
            supported_event_names(),
        )),
    }
}

/// JSON type name used in error messages.
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
