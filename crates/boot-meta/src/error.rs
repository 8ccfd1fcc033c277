//! Error types for boot-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] boot_fs::Error),

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Distro not found: {name}")]
    DistroNotFound { name: String },

    #[error("Host {host} references unknown distro {distro}")]
    UnknownDistro { host: String, distro: String },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("Could not serialize {name} for blending: {message}")]
    Blend { name: String, message: String },
}
