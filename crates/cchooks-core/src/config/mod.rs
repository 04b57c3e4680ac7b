use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Append log output to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

/// Sound played by the `Stop` handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_sound_enabled")]
    pub enabled: bool,
    #[serde(default = "default_sound_player")]
    pub player: String,
    #[serde(default = "default_sound_file")]
    pub file: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: default_sound_enabled(),
            player: default_sound_player(),
            file: default_sound_file(),
        }
    }
}

/// Formatter run by the `PostToolUse` handler on edited files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_formatter_command")]
    pub command: String,
    #[serde(default = "default_formatter_args")]
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_formatter_command(),
            args: default_formatter_args(),
        }
    }
}

/// Valid `logging.level` values.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Valid `logging.format` values.
pub const VALID_LOG_FORMATS: &[&str] = &["compact", "json"];

fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> String {
    "compact".into()
}
fn default_sound_enabled() -> bool {
    cfg!(target_os = "macos")
}
fn default_sound_player() -> String {
    "afplay".into()
}
fn default_sound_file() -> String {
    "/System/Library/Sounds/Blow.aiff".into()
}
fn default_formatter_command() -> String {
    "ruff".into()
}
fn default_formatter_args() -> Vec<String> {
    vec!["format".into()]
}

impl HooksConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/cchooks/config.toml (global)
    /// 2. .cchooks/config.toml (project)
    /// 3. .cchooks/config.local.toml (local, gitignored)
    ///
    /// Returns the config together with any validation warnings, so callers
    /// can report them once logging is up.
    pub fn load(project_dir: Option<&Path>) -> Result<(Self, Vec<String>), ConfigError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Merge an explicit global file (if any) with the project layers.
    pub fn load_from(
        global_file: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_file {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            for name in ["config.toml", "config.local.toml"] {
                let path = dir.join(".cchooks").join(name);
                if path.exists() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let warnings = cfg.validate();
        Ok((cfg, warnings))
    }

    /// Defaults only (no files).
    pub fn default_config() -> Self {
        Self {
            logging: LoggingConfig::default(),
            sound: SoundConfig::default(),
            formatter: FormatterConfig::default(),
        }
    }

    /// Reset invalid values to defaults and return a warning for each.
    /// Lenient: never rejects the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let level = self.logging.level.to_lowercase();
        if VALID_LOG_LEVELS.contains(&level.as_str()) {
            self.logging.level = level;
        } else {
            warnings.push(format!(
                "unknown logging.level '{}', valid: {}; using '{}'",
                self.logging.level,
                VALID_LOG_LEVELS.join(", "),
                default_log_level()
            ));
            self.logging.level = default_log_level();
        }

        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            warnings.push(format!(
                "unknown logging.format '{}', valid: {}; using '{}'",
                self.logging.format,
                VALID_LOG_FORMATS.join(", "),
                default_log_format()
            ));
            self.logging.format = default_log_format();
        }

        if self.sound.enabled && self.sound.player.trim().is_empty() {
            warnings.push("sound.enabled = true but sound.player is empty, disabling".into());
            self.sound.enabled = false;
        }

        if self.formatter.enabled && self.formatter.command.trim().is_empty() {
            warnings.push("formatter.enabled = true but formatter.command is empty, disabling".into());
            self.formatter.enabled = false;
        }

        warnings
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cchooks").join("config.toml"))
}
