//! Filesystem primitives for bootsync
//!
//! Provides normalized paths, atomic writes, idempotent copies, glob
//! expansion and format-agnostic configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod matching;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::CopyStatus;
pub use matching::{expand_glob, is_glob_pattern};
pub use path::NormalizedPath;
