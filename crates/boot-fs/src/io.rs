//! Atomic writes and idempotent copies

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::checksum::compute_file_checksum;
use crate::{Error, NormalizedPath, Result};

/// What a copy helper did with its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    /// Bytes were copied to the destination
    Copied,
    /// The destination was left as it was
    Skipped,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Create a directory and all of its missing parents.
pub fn ensure_dir(path: &NormalizedPath) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    let native_path = path.to_native();
    tracing::debug!(path = %path, "Creating directory");
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Copy `source` to `destination` unless a file already exists there.
///
/// Content is copied verbatim; metadata is not preserved. An existing
/// destination is never overwritten.
pub fn copy_if_absent(source: &NormalizedPath, destination: &NormalizedPath) -> Result<CopyStatus> {
    if destination.is_file() {
        return Ok(CopyStatus::Skipped);
    }
    copy_bytes(source, destination)?;
    Ok(CopyStatus::Copied)
}

/// Copy `source` to `destination` when the destination is missing or its
/// content differs from the source.
pub fn copy_if_changed(
    source: &NormalizedPath,
    destination: &NormalizedPath,
) -> Result<CopyStatus> {
    if destination.is_file() {
        let source_sum = compute_file_checksum(source.as_ref())
            .map_err(|e| Error::io(source.to_native(), e))?;
        let destination_sum = compute_file_checksum(destination.as_ref())
            .map_err(|e| Error::io(destination.to_native(), e))?;
        if source_sum == destination_sum {
            return Ok(CopyStatus::Skipped);
        }
    }
    copy_bytes(source, destination)?;
    Ok(CopyStatus::Copied)
}

fn copy_bytes(source: &NormalizedPath, destination: &NormalizedPath) -> Result<()> {
    if !source.is_file() {
        return Err(Error::NotAFile {
            path: source.to_native(),
        });
    }
    let content = fs::read(source.as_ref()).map_err(|e| Error::io(source.to_native(), e))?;
    fs::write(destination.as_ref(), content).map_err(|e| Error::io(destination.to_native(), e))
}
