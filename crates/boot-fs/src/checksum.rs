//! SHA-256 fingerprints in the `sha256:<hex>` form
//!
//! Used to decide whether a staged artifact is already current and to
//! fingerprint generated menus.

use std::fs::File;
use std::path::Path;

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

fn finish(hasher: Sha256) -> String {
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Checksum of in-memory text.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    finish(hasher)
}

/// Checksum of a file, streamed from disk.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(finish(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_checksum_known_value() {
        assert_eq!(
            compute_content_checksum("hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn file_checksum_matches_content_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vmlinuz");
        std::fs::write(&path, "kernel bytes").unwrap();

        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            compute_content_checksum("kernel bytes")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(compute_file_checksum(Path::new("/no/such/initrd.img")).is_err());
    }
}
