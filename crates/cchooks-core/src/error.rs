use thiserror::Error;

/// Boxed error type used to keep a callback's original failure reachable.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Discriminant of a [`HookError`], handy for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookErrorKind {
    UnsupportedEvent,
    InvalidPayload,
    CallbackFailure,
    EventMismatch,
}

/// Every failure the dispatch pipeline can produce.
///
/// `Display` renders the primary message only; [`HookError::suggestion`]
/// assembles the secondary hint from the structured fields, and
/// [`HookError::full_message`] joins the two.
#[derive(Debug, Error)]
pub enum HookError {
    /// The event name is not one of the supported hook events.
    #[error("{message}")]
    UnsupportedEvent {
        message: String,
        supported_events: Vec<String>,
    },

    /// The input is absent, unreadable, malformed, or structurally wrong.
    #[error("{message}")]
    InvalidPayload {
        message: String,
        data_type: Option<String>,
        expected_format: Option<String>,
    },

    /// The callback is missing, or it failed while running.
    #[error("{message}")]
    CallbackFailure {
        message: String,
        callback_type: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    /// The payload declares a different event than the one requested.
    #[error("{message}")]
    EventMismatch {
        message: String,
        requested_event: String,
        payload_event: String,
    },
}

impl HookError {
    pub fn unsupported_event(message: impl Into<String>, supported_events: Vec<String>) -> Self {
        Self::UnsupportedEvent {
            message: message.into(),
            supported_events,
        }
    }

    pub fn invalid_payload(
        message: impl Into<String>,
        data_type: impl Into<String>,
        expected_format: impl Into<String>,
    ) -> Self {
        Self::InvalidPayload {
            message: message.into(),
            data_type: Some(data_type.into()),
            expected_format: Some(expected_format.into()),
        }
    }

    /// The callback could not be invoked at all (`type_name` is what was supplied).
    pub fn callback_not_invocable(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::CallbackFailure {
            message: format!("callback must be invocable, got {type_name}"),
            callback_type: Some(type_name),
            source: None,
        }
    }

    /// The callback ran and failed; `source` stays reachable via `Error::source`.
    pub fn callback_failed(source: BoxError) -> Self {
        Self::CallbackFailure {
            message: format!("callback execution failed: {source}"),
            callback_type: None,
            source: Some(source),
        }
    }

    pub fn event_mismatch(requested: impl Into<String>, actual: impl Into<String>) -> Self {
        let requested_event = requested.into();
        let payload_event = actual.into();
        Self::EventMismatch {
            message: format!(
                "event mismatch: requested '{requested_event}' but payload contains '{payload_event}'"
            ),
            requested_event,
            payload_event,
        }
    }

    pub fn kind(&self) -> HookErrorKind {
        match self {
            Self::UnsupportedEvent { .. } => HookErrorKind::UnsupportedEvent,
            Self::InvalidPayload { .. } => HookErrorKind::InvalidPayload,
            Self::CallbackFailure { .. } => HookErrorKind::CallbackFailure,
            Self::EventMismatch { .. } => HookErrorKind::EventMismatch,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::UnsupportedEvent { message, .. }
            | Self::InvalidPayload { message, .. }
            | Self::CallbackFailure { message, .. }
            | Self::EventMismatch { message, .. } => message,
        }
    }

    /// Secondary hint for fixing the problem, when the variant has one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnsupportedEvent {
                supported_events, ..
            } => {
                if supported_events.is_empty() {
                    return None;
                }
                let mut sorted = supported_events.clone();
                sorted.sort();
                Some(format!(
                    "Use one of the supported events: {}",
                    sorted.join(", ")
                ))
            }
            Self::InvalidPayload {
                data_type,
                expected_format,
                ..
            } => {
                if data_type.is_none() && expected_format.is_none() {
                    return None;
                }
                let mut parts = Vec::new();
                if let Some(expected) = expected_format {
                    parts.push(format!("Expected format: {expected}"));
                }
                if let Some(received) = data_type {
                    parts.push(format!("Received: {received}"));
                }
                parts.push(
                    "Ensure the input contains valid JSON with required fields like 'hook_event_name'"
                        .to_string(),
                );
                Some(parts.join(". "))
            }
            Self::CallbackFailure {
                callback_type,
                source,
                ..
            } => {
                if callback_type.is_none() && source.is_none() {
                    return None;
                }
                let mut lines = vec![
                    "Ensure your callback:".to_string(),
                    "- Is a function or closure taking the payload".to_string(),
                    "- Handles all expected payload fields".to_string(),
                ];
                if let Some(original) = source {
                    lines.push(format!("- Addresses the original error: {original}"));
                }
                Some(lines.join("\n"))
            }
            Self::EventMismatch {
                requested_event,
                payload_event,
                ..
            } => Some(format!(
                "Change the requested event from '{requested_event}' to '{payload_event}'. \
                 Or ensure the payload contains event '{requested_event}' instead of '{payload_event}'. \
                 The requested event must match the 'hook_event_name' field of the payload"
            )),
        }
    }

    /// Message plus suggestion, the way the CLI prints errors.
    pub fn full_message(&self) -> String {
        match self.suggestion() {
            Some(suggestion) => format!("{}\n\nSuggestion: {suggestion}", self.message()),
            None => self.message().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;
