//! Error types for bridge operations.
//!
//! None of these ever reach the front end as errors: the handlers either degrade to an
//! empty or fallback result, or turn the failure into a single user-visible message.

/// Result type alias for bridge operations.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while serving a web view request.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The host has no project open, so there is no root to resolve against.
    #[error("Project base path is not available")]
    MissingProjectRoot,

    /// The slash-command backend failed or is unreachable.
    #[error("Command source failed: {0}")]
    CommandSource(String),

    /// A file or URL could not be handed to an external program.
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// No program is available to open URLs on this system.
    #[error("No browser launcher found in PATH")]
    NoLauncher,

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// webview-bridge.toml is not valid TOML or has fields of the wrong type.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl BridgeError {
    /// Creates a new `CommandSource` error.
    pub fn command_source(reason: impl Into<String>) -> Self {
        Self::CommandSource(reason.into())
    }

    /// Creates a new `Launch` error.
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }
}
