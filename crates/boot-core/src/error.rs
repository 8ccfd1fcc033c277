//! Error types for boot-core

use std::path::PathBuf;

/// Result type for boot-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in boot-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A template could not be rendered
    #[error("Failed to render template {template:?}: {message}")]
    Template { template: String, message: String },

    /// A host identifier passed to a partial sync was empty
    #[error("Host identifier at position {index} is empty")]
    InvalidHostIdentifier { index: usize },

    /// A host identifier matched more than one host
    #[error("Ambiguous host identifier '{identifier}' matches {count} hosts")]
    AmbiguousHost { identifier: String, count: usize },

    /// A distro referenced by name is not registered
    #[error("Distro not found: {name}")]
    DistroNotFound { name: String },

    /// A kernel, initrd or image file to stage does not exist
    #[error("Missing boot artifact for {owner}: {path}")]
    MissingArtifact { owner: String, path: PathBuf },

    /// A netboot host has no entry in the menu it was written with
    #[error("No menu entry for host {host}")]
    MenuEntryMissing { host: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from boot-fs
    #[error(transparent)]
    Fs(#[from] boot_fs::Error),

    /// Registry or blending error from boot-meta
    #[error(transparent)]
    Meta(#[from] boot_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
