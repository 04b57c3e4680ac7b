use std::process::Command;

use cchooks_core::config::{FormatterConfig, HooksConfig, SoundConfig};
use cchooks_core::{HandlerRouter, HookEventName, Payload};

use crate::action::HookAction;

const PROMPT_PREVIEW_CHARS: usize = 100;

/// Tools whose `tool_input.file_path` points at a file they just wrote.
const EDITING_TOOLS: &[&str] = &["Edit", "Write", "MultiEdit"];

/// Build the handler table: one handler per supported event.
pub fn build_router(config: &HooksConfig) -> HandlerRouter {
    let mut router = HandlerRouter::new();
    for event in HookEventName::ALL {
        let sound = config.sound.clone();
        let formatter = config.formatter.clone();
        router.on(event, move |payload| {
            if event == HookEventName::Stop {
                tracing::debug!("stop payload: {}", serde_json::Value::from(payload.clone()));
            }
            let action = classify(event, payload, &sound, &formatter);
            execute(&action);
            if let Some(line) = metadata_line(payload) {
                tracing::info!("{line}");
            }
            Ok(())
        });
    }
    router
}

/// Decide what to do for one event.
pub fn classify(
    event: HookEventName,
    payload: &Payload,
    sound: &SoundConfig,
    formatter: &FormatterConfig,
) -> HookAction {
    match event {
        HookEventName::PreToolUse => HookAction::Log {
            message: format!("about to use tool: {}", tool_name(payload)),
        },
        HookEventName::PostToolUse => classify_post_tool_use(payload, formatter),
        HookEventName::Notification => HookAction::Log {
            message: format!(
                "notification: {}",
                payload.get_str("message").unwrap_or_default()
            ),
        },
        HookEventName::Stop => {
            let message = "session stopped".to_string();
            if sound.enabled {
                HookAction::PlaySound {
                    message,
                    player: sound.player.clone(),
                    file: sound.file.clone(),
                }
            } else {
                HookAction::Log { message }
            }
        }
        HookEventName::SubagentStop => HookAction::Log {
            message: "subagent stopped".into(),
        },
        HookEventName::UserPromptSubmit => HookAction::Log {
            message: format!(
                "user prompt submitted: {}",
                preview(payload.get_str("prompt").unwrap_or_default(), PROMPT_PREVIEW_CHARS)
            ),
        },
        HookEventName::PreCompact => HookAction::Log {
            message: "conversation compaction starting".into(),
        },
        HookEventName::SessionStart => HookAction::Log {
            message: "session started".into(),
        },
    }
}

/// PostToolUse: report the outcome, and format the file for editing tools.
fn classify_post_tool_use(payload: &Payload, formatter: &FormatterConfig) -> HookAction {
    let tool = tool_name(payload);
    let success = payload
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let status = if success {
        "successfully"
    } else {
        "with errors"
    };
    let message = format!("tool {tool} completed {status}");

    if !formatter.enabled || !EDITING_TOOLS.contains(&tool) {
        return HookAction::Log { message };
    }

    match edited_file(payload) {
        Some(file_path) => HookAction::Format {
            message,
            command: formatter.command.clone(),
            args: formatter.args.clone(),
            file_path: file_path.to_string(),
        },
        None => HookAction::Log { message },
    }
}

/// Extra line logged for any event whose payload carries `metadata`.
pub fn metadata_line(payload: &Payload) -> Option<String> {
    payload
        .get("metadata")
        .map(|metadata| format!("additional metadata: {metadata}"))
}

/// Carry out an action. Failures of external programs are logged, never
/// propagated: a broken speaker must not fail the hook.
pub fn execute(action: &HookAction) {
    tracing::info!("{}", action.message());

    match action {
        HookAction::Log { .. } => {}
        HookAction::PlaySound { player, file, .. } => {
            run_external(player, std::slice::from_ref(file));
        }
        HookAction::Format {
            command,
            args,
            file_path,
            ..
        } => {
            let mut full_args = args.clone();
            full_args.push(file_path.clone());
            run_external(command, &full_args);
        }
    }
}

fn run_external(program: &str, args: &[String]) {
    let path = match which::which(program) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("'{program}' not found on PATH: {e}");
            return;
        }
    };

    match Command::new(&path).args(args).status() {
        Ok(status) if status.success() => {
            tracing::debug!("{} {} finished", path.display(), args.join(" "));
        }
        Ok(status) => tracing::warn!("{program} exited with {status}"),
        Err(e) => tracing::error!("failed to run {program}: {e}"),
    }
}

fn tool_name(payload: &Payload) -> &str {
    payload.get_str("tool_name").unwrap_or("unknown")
}

fn edited_file(payload: &Payload) -> Option<&str> {
    payload
        .get("tool_input")
        .and_then(|v| v.get("file_path").or(v.get("filePath")))
        .and_then(|v| v.as_str())
        .filter(|p| !p.trim().is_empty())
}

/// First `max_chars` characters of `s`, always followed by "...".
fn preview(s: &str, max_chars: usize) -> String {
    let head: String = s.chars().take(max_chars).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cchooks_core::RouteOutcome;
    use serde_json::json;

    fn make_payload(value: serde_json::Value) -> Payload {
        Payload::try_from(value).unwrap()
    }

    fn quiet_sound() -> SoundConfig {
        SoundConfig {
            enabled: false,
            ..SoundConfig::default()
        }
    }

    fn formatter_on() -> FormatterConfig {
        FormatterConfig {
            enabled: true,
            command: "ruff".into(),
            args: vec!["format".into()],
        }
    }

    fn log_message(action: HookAction) -> String {
        match action {
            HookAction::Log { message } => message,
            other => panic!("expected Log, got {other:?}"),
        }
    }

    #[test]
    fn test_pre_tool_use_names_tool() {
        let payload = make_payload(json!({"hook_event_name": "PreToolUse", "tool_name": "Bash"}));
        let action = classify(
            HookEventName::PreToolUse,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        );
        assert_eq!(log_message(action), "about to use tool: Bash");
    }

    #[test]
    fn test_pre_tool_use_unknown_tool() {
        let payload = make_payload(json!({"hook_event_name": "PreToolUse"}));
        let action = classify(
            HookEventName::PreToolUse,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        );
        assert_eq!(log_message(action), "about to use tool: unknown");
    }

    #[test]
    fn test_post_tool_use_status() {
        let ok = make_payload(json!({"hook_event_name": "PostToolUse", "tool_name": "Read", "success": true}));
        let failed = make_payload(json!({"hook_event_name": "PostToolUse", "tool_name": "Read"}));
        let formatter = FormatterConfig::default();
        assert_eq!(
            log_message(classify_post_tool_use(&ok, &formatter)),
            "tool Read completed successfully"
        );
        assert_eq!(
            log_message(classify_post_tool_use(&failed, &formatter)),
            "tool Read completed with errors"
        );
    }

    #[test]
    fn test_post_tool_use_formats_edited_file() {
        let payload = make_payload(json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Edit",
            "tool_input": {"file_path": "/src/app.py", "old_string": "a", "new_string": "b"},
            "success": true
        }));
        match classify_post_tool_use(&payload, &formatter_on()) {
            HookAction::Format {
                command,
                args,
                file_path,
                message,
            } => {
                assert_eq!(command, "ruff");
                assert_eq!(args, vec!["format"]);
                assert_eq!(file_path, "/src/app.py");
                assert_eq!(message, "tool Edit completed successfully");
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_post_tool_use_formatter_skips_other_tools() {
        let payload = make_payload(json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Read",
            "tool_input": {"file_path": "/src/app.py"}
        }));
        assert!(matches!(
            classify_post_tool_use(&payload, &formatter_on()),
            HookAction::Log { .. }
        ));
    }

    #[test]
    fn test_post_tool_use_formatter_needs_path() {
        let payload = make_payload(json!({"hook_event_name": "PostToolUse", "tool_name": "Write"}));
        assert!(matches!(
            classify_post_tool_use(&payload, &formatter_on()),
            HookAction::Log { .. }
        ));
    }

    #[test]
    fn test_formatter_disabled_only_logs() {
        let payload = make_payload(json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Write",
            "tool_input": {"filePath": "/src/app.py"}
        }));
        assert!(matches!(
            classify_post_tool_use(&payload, &FormatterConfig::default()),
            HookAction::Log { .. }
        ));
    }

    #[test]
    fn test_stop_plays_sound_when_enabled() {
        let payload = make_payload(json!({"hook_event_name": "Stop", "stop_hook_active": false}));
        let sound = SoundConfig {
            enabled: true,
            player: "paplay".into(),
            file: "/usr/share/sounds/done.oga".into(),
        };
        let action = classify(HookEventName::Stop, &payload, &sound, &FormatterConfig::default());
        assert_eq!(
            action,
            HookAction::PlaySound {
                message: "session stopped".into(),
                player: "paplay".into(),
                file: "/usr/share/sounds/done.oga".into(),
            }
        );
    }

    #[test]
    fn test_stop_without_sound_logs() {
        let payload = make_payload(json!({"hook_event_name": "Stop"}));
        let action = classify(
            HookEventName::Stop,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        );
        assert_eq!(log_message(action), "session stopped");
    }

    #[test]
    fn test_user_prompt_preview_truncated() {
        let prompt = "x".repeat(150);
        let payload = make_payload(json!({"hook_event_name": "UserPromptSubmit", "prompt": prompt}));
        let message = log_message(classify(
            HookEventName::UserPromptSubmit,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        ));
        assert_eq!(message, format!("user prompt submitted: {}...", "x".repeat(100)));
    }

    #[test]
    fn test_notification_message() {
        let payload = make_payload(json!({"hook_event_name": "Notification", "message": "Claude needs input"}));
        let message = log_message(classify(
            HookEventName::Notification,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        ));
        assert_eq!(message, "notification: Claude needs input");
    }

    #[test]
    fn test_router_handles_every_event() {
        let mut config = HooksConfig::default_config();
        config.sound.enabled = false;
        let router = build_router(&config);
        for event in HookEventName::ALL {
            let payload = make_payload(json!({"hook_event_name": event.as_str()}));
            assert_eq!(router.route(&payload).unwrap(), RouteOutcome::Handled(event));
        }
    }

    #[test]
    fn test_execute_missing_program_is_not_fatal() {
        execute(&HookAction::PlaySound {
            message: "session stopped".into(),
            player: "definitely-not-a-real-player-binary".into(),
            file: "/nonexistent.aiff".into(),
        });
    }

    #[test]
    fn test_user_prompt_preview_counts_chars() {
        let payload = make_payload(json!({"hook_event_name": "UserPromptSubmit", "prompt": "é".repeat(150)}));
        let message = log_message(classify(
            HookEventName::UserPromptSubmit,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        ));
        let shown = message
            .strip_prefix("user prompt submitted: ")
            .and_then(|rest| rest.strip_suffix("..."))
            .unwrap();
        assert_eq!(shown.chars().count(), 100);
        assert_eq!(shown, "é".repeat(100));
    }

    #[test]
    fn test_user_prompt_short_preview_keeps_ellipsis() {
        let payload = make_payload(json!({"hook_event_name": "UserPromptSubmit", "prompt": "hi"}));
        let message = log_message(classify(
            HookEventName::UserPromptSubmit,
            &payload,
            &quiet_sound(),
            &FormatterConfig::default(),
        ));
        assert_eq!(message, "user prompt submitted: hi...");
    }

    #[test]
    fn test_metadata_line() {
        let with = make_payload(json!({
            "hook_event_name": "SessionStart",
            "metadata": {"source": "startup"}
        }));
        let without = make_payload(json!({"hook_event_name": "SessionStart"}));
        assert_eq!(
            metadata_line(&with).as_deref(),
            Some(r#"additional metadata: {"source":"startup"}"#)
        );
        assert!(metadata_line(&without).is_none());
    }
}
