//! Error types for boot-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from boot-core
    #[error(transparent)]
    Core(#[from] boot_core::Error),

    /// Error from boot-meta
    #[error(transparent)]
    Meta(#[from] boot_meta::Error),

    /// Error from boot-settings
    #[error(transparent)]
    Settings(#[from] boot_settings::Error),

    /// Error from boot-fs
    #[error(transparent)]
    Fs(#[from] boot_fs::Error),

    /// Report serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
