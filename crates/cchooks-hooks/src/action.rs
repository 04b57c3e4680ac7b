/// What a handler decided to do with a hook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Only log a line.
    Log { message: String },
    /// Log, then play a sound file with an external player.
    PlaySound {
        message: String,
        player: String,
        file: String,
    },
    /// Log, then run a formatter on a file the tool just changed.
    Format {
        message: String,
        command: String,
        args: Vec<String>,
        file_path: String,
    },
}

impl HookAction {
    pub fn message(&self) -> &str {
        match self {
            Self::Log { message }
            | Self::PlaySound { message, .. }
            | Self::Format { message, .. } => message,
        }
    }
}
