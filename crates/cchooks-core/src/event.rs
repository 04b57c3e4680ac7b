use serde::{Deserialize, Serialize};

/// The hook events Claude Code emits, and the only names the dispatcher accepts.
///
/// Names are matched exactly and case-sensitively: `"Stop"` is an event,
/// `"stop"` and `"STOP"` are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookEventName {
    PreToolUse,
    PostToolUse,
    Notification,
    Stop,
    SubagentStop,
    UserPromptSubmit,
    PreCompact,
    SessionStart,
}

impl HookEventName {
    /// All supported events, in declaration order.
    pub const ALL: [HookEventName; 8] = [
        Self::PreToolUse,
        Self::PostToolUse,
        Self::Notification,
        Self::Stop,
        Self::SubagentStop,
        Self::UserPromptSubmit,
        Self::PreCompact,
        Self::SessionStart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Notification => "Notification",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PreCompact => "PreCompact",
            Self::SessionStart => "SessionStart",
        }
    }

    /// Short human description, used by `cchooks --list`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PreToolUse => "before a tool is executed",
            Self::PostToolUse => "after a tool is executed",
            Self::Notification => "a notification is sent",
            Self::Stop => "the session stops",
            Self::SubagentStop => "a subagent stops",
            Self::UserPromptSubmit => "the user submits a prompt",
            Self::PreCompact => "before conversation compaction",
            Self::SessionStart => "a session starts",
        }
    }
}

impl std::fmt::Display for HookEventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HookEventName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| format!("unknown hook event: {s}"))
    }
}

/// Supported event names, sorted alphabetically.
pub fn supported_event_names() -> Vec<String> {
    let mut names: Vec<String> = HookEventName::ALL
        .iter()
        .map(|event| event.as_str().to_string())
        .collect();
    names.sort();
    names
}
