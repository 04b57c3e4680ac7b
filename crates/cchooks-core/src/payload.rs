//! Payload acquisition: turn whatever the caller handed us into a validated
//! [`Payload`].
//!
//! Input arrives either as an already-built JSON object or as a character
//! stream holding JSON text (usually the hook process's stdin). Streams are
//! read to the end exactly once. Parsing accepts any JSON value; the
//! structural checks happen afterwards in [`validate_payload`], so a valid
//! but non-object document gets a "must be a mapping" error rather than a
//! parse error.

use std::io::{self, Read};
use std::ops::Deref;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HookError, Result};
use crate::validate::json_type_name;

/// Key every payload must carry.
pub const EVENT_NAME_FIELD: &str = "hook_event_name";

/// Anything that can hand over all of its remaining content as text.
pub trait ReadAll {
    fn read_all(&mut self) -> io::Result<String>;
}

impl<R: Read + ?Sized> ReadAll for R {
    fn read_all(&mut self) -> io::Result<String> {
        let mut content = String::new();
        self.read_to_string(&mut content)?;
        Ok(content)
    }
}

/// The two accepted input shapes, plus a catch-all for other structured values.
pub enum RawInput<'a> {
    /// An already-constructed JSON object.
    Mapping(Map<String, Value>),
    /// A stream carrying JSON text.
    Stream(Box<dyn ReadAll + 'a>),
    /// Any other JSON value. Objects are accepted as mappings; everything
    /// else is rejected before validation.
    Value(Value),
}

impl<'a> RawInput<'a> {
    pub fn stream(reader: impl ReadAll + 'a) -> Self {
        Self::Stream(Box::new(reader))
    }
}

impl From<Map<String, Value>> for RawInput<'_> {
    fn from(map: Map<String, Value>) -> Self {
        Self::Mapping(map)
    }
}

impl From<Value> for RawInput<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl std::fmt::Debug for RawInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A validated hook payload: a JSON object with a non-blank string
/// `hook_event_name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// The event name declared by the payload, as written (untrimmed).
    pub fn event_name(&self) -> &str {
        self.0
            .get(EVENT_NAME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// String field lookup, `None` when missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Payload {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Value> for Payload {
    type Error = HookError;

    fn try_from(value: Value) -> Result<Self> {
        validate_payload(value)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Value::Object(payload.0)
    }
}

const EXPECTED_INPUT: &str = "mapping or readable stream with JSON data";
const EXPECTED_PAYLOAD: &str = "JSON object with 'hook_event_name' field";

/// Normalize `input` into a validated [`Payload`].
pub fn acquire(input: Option<RawInput<'_>>) -> Result<Payload> {
    let candidate = match input {
        None => {
            return Err(HookError::invalid_payload(
                "input cannot be absent",
                "none",
                EXPECTED_INPUT,
            ))
        }
        Some(RawInput::Mapping(map)) => Value::Object(map),
        Some(RawInput::Stream(stream)) => parse_stream(stream)?,
        Some(RawInput::Value(Value::Object(map))) => Value::Object(map),
        Some(RawInput::Value(other)) => {
            let type_name = json_type_name(&other);
            return Err(HookError::invalid_payload(
                format!("input must be a mapping or a readable stream, got {type_name}"),
                type_name,
                EXPECTED_INPUT,
            ));
        }
    };

    validate_payload(candidate)
}

fn parse_stream(mut stream: Box<dyn ReadAll + '_>) -> Result<Value> {
    let content = stream.read_all().map_err(|e| {
        HookError::invalid_payload(
            format!("error reading input: {e}"),
            "unreadable stream",
            "readable stream",
        )
    })?;

    if content.trim().is_empty() {
        return Err(HookError::invalid_payload(
            "input contains no data",
            "empty stream",
            "stream with JSON content",
        ));
    }

    // Duplicate keys keep the last occurrence.
    serde_json::from_str(&content).map_err(|e| {
        HookError::invalid_payload(
            format!("invalid JSON in input: {e}"),
            "malformed JSON",
            "valid JSON object",
        )
    })
}

/// Structural checks on a payload candidate. Returns it unmodified on success.
pub fn validate_payload(candidate: Value) -> Result<Payload> {
    let map = match candidate {
        Value::Object(map) => map,
        other => {
            let type_name = json_type_name(&other);
            return Err(HookError::invalid_payload(
                format!("payload must be a mapping object, got {type_name}"),
                type_name,
                EXPECTED_PAYLOAD,
            ));
        }
    };

    let Some(event_name) = map.get(EVENT_NAME_FIELD) else {
        let available: Vec<&str> = map.keys().map(String::as_str).collect();
        return Err(HookError::invalid_payload(
            format!(
                "payload missing required field '{EVENT_NAME_FIELD}'. Available fields: {available:?}"
            ),
            "mapping without required field",
            EXPECTED_PAYLOAD,
        ));
    };

    let Some(name) = event_name.as_str() else {
        let type_name = json_type_name(event_name);
        return Err(HookError::invalid_payload(
            format!("'{EVENT_NAME_FIELD}' must be a string, got {type_name}"),
            format!("{EVENT_NAME_FIELD}: {type_name}"),
            format!("{EVENT_NAME_FIELD}: string"),
        ));
    };

    if name.trim().is_empty() {
        return Err(HookError::invalid_payload(
            format!("'{EVENT_NAME_FIELD}' cannot be empty"),
            "empty string",
            "non-empty string naming a supported hook event",
        ));
    }

    Ok(Payload(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookErrorKind;
    use serde_json::json;
    use std::io::Cursor;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn stream(text: &str) -> Option<RawInput<'static>> {
        Some(RawInput::stream(Cursor::new(text.to_string())))
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_mapping_passes_through_unmodified() {
        let map = object(json!({"hook_event_name": "Stop", "session_id": "abc", "n": 1}));
        let payload = acquire(Some(RawInput::Mapping(map.clone()))).unwrap();
        assert_eq!(payload.as_map(), &map);
        assert_eq!(payload.event_name(), "Stop");
    }

    #[test]
    fn test_stream_is_parsed() {
        let payload =
            acquire(stream(r#"{"hook_event_name":"PreToolUse","tool_name":"Read"}"#)).unwrap();
        assert_eq!(payload.event_name(), "PreToolUse");
        assert_eq!(payload.get_str("tool_name"), Some("Read"));
    }

    #[test]
    fn test_absent_input() {
        let err = acquire(None).unwrap_err();
        assert_eq!(err.message(), "input cannot be absent");
        assert!(err.suggestion().unwrap().contains("Received: none"));
    }

    #[test]
    fn test_empty_and_whitespace_streams() {
        for text in ["", "   ", "\n\t  \n"] {
            let err = acquire(stream(text)).unwrap_err();
            assert_eq!(err.kind(), HookErrorKind::InvalidPayload);
            assert_eq!(err.message(), "input contains no data");
        }
    }

    #[test]
    fn test_unreadable_stream() {
        let err = acquire(Some(RawInput::stream(FailingReader))).unwrap_err();
        assert_eq!(err.message(), "error reading input: pipe closed");
        assert!(err.suggestion().unwrap().contains("unreadable stream"));
    }

    #[test]
    fn test_non_utf8_stream_is_unreadable() {
        let err = acquire(Some(RawInput::stream(Cursor::new(vec![0xffu8, 0xfe, 0x7b])))).unwrap_err();
        assert!(err.message().starts_with("error reading input:"));
    }

    #[test]
    fn test_malformed_json() {
        let err = acquire(stream(r#"{"a": }"#)).unwrap_err();
        assert_eq!(err.kind(), HookErrorKind::InvalidPayload);
        assert!(err.message().starts_with("invalid JSON in input:"));
        assert!(err.suggestion().unwrap().contains("malformed JSON"));
    }

    #[test]
    fn test_non_object_json_rejected_as_mapping() {
        for (text, type_name) in [
            (r#""just a string""#, "string"),
            ("123", "number"),
            ("[1,2]", "array"),
            ("null", "null"),
            ("false", "boolean"),
        ] {
            let err = acquire(stream(text)).unwrap_err();
            assert_eq!(
                err.message(),
                format!("payload must be a mapping object, got {type_name}")
            );
        }
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let payload = acquire(stream(r#"{"hook_event_name":"Stop","d":1,"d":2}"#)).unwrap();
        assert_eq!(payload.get("d"), Some(&json!(2)));
    }

    #[test]
    fn test_missing_event_name_lists_fields() {
        let err = acquire(Some(RawInput::Mapping(object(
            json!({"session_id": "1", "tool_name": "Bash"}),
        ))))
        .unwrap_err();
        assert!(err
            .message()
            .starts_with("payload missing required field 'hook_event_name'"));
        assert!(err.message().contains("session_id"));
        assert!(err.message().contains("tool_name"));

        let err = acquire(Some(RawInput::Mapping(Map::new()))).unwrap_err();
        assert!(err.message().ends_with("Available fields: []"));
    }

    #[test]
    fn test_event_name_must_be_string() {
        let err = acquire(stream(r#"{"hook_event_name": 7}"#)).unwrap_err();
        assert_eq!(err.message(), "'hook_event_name' must be a string, got number");
    }

    #[test]
    fn test_event_name_must_not_be_blank() {
        for name in ["", "   ", "\t"] {
            let err = acquire(Some(RawInput::Value(json!({"hook_event_name": name})))).unwrap_err();
            assert_eq!(err.message(), "'hook_event_name' cannot be empty");
        }
    }

    #[test]
    fn test_padded_event_name_kept_verbatim() {
        let payload = acquire(Some(RawInput::Value(json!({"hook_event_name": " Stop "})))).unwrap();
        assert_eq!(payload.event_name(), " Stop ");
    }

    #[test]
    fn test_value_input_must_be_object() {
        let payload = acquire(Some(json!({"hook_event_name": "Stop"}).into())).unwrap();
        assert_eq!(payload.event_name(), "Stop");

        let err = acquire(Some(json!([1, 2]).into())).unwrap_err();
        assert_eq!(
            err.message(),
            "input must be a mapping or a readable stream, got array"
        );
        let err = acquire(Some(RawInput::Value(json!(5)))).unwrap_err();
        assert!(err.message().ends_with("got number"));
    }

    #[test]
    fn test_try_from_value_and_back() {
        let value = json!({"hook_event_name": "Notification", "message": "hi"});
        let payload = Payload::try_from(value.clone()).unwrap();
        assert_eq!(Value::from(payload), value);
        assert!(Payload::try_from(json!("nope")).is_err());
    }

    #[test]
    fn test_payload_serializes_as_plain_object() {
        let payload = Payload::try_from(json!({"hook_event_name": "Stop", "x": [1]})).unwrap();
        let text = serde_json::to_string(&payload).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, json!({"hook_event_name": "Stop", "x": [1]}));
    }
}
