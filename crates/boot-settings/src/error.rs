//! Error types for boot-settings

/// Result type for boot-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or migrating settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document does not conform to the schema
    #[error("Settings do not match schema {version}: {}", .violations.join("; "))]
    Schema {
        version: String,
        violations: Vec<String>,
    },

    /// The document failed validation during a migration
    #[error("Migration to {version} failed schema validation: {}", .violations.join("; "))]
    MigrationSchema {
        version: String,
        violations: Vec<String>,
    },

    /// No migration is registered for the requested version
    #[error("Unknown settings version: {version}")]
    UnknownVersion { version: String },

    /// The settings document is not a mapping
    #[error("Settings document must be a mapping, got {found}")]
    NotAMapping { found: String },

    /// Filesystem error from boot-fs
    #[error(transparent)]
    Fs(#[from] boot_fs::Error),
}
