//! [`TestTree`] builder for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use boot_fs::NormalizedPath;
use boot_fs::checksum::compute_file_checksum;
use boot_meta::BootSettings;
use tempfile::TempDir;

/// A temporary directory laid out like a boot server.
///
/// ```text
/// <root>/tftpboot   boot root
/// <root>/www        web root
/// <root>/loaders    boot loader sources
/// <root>/src        anything a test wants to copy from
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use boot_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("src/d1/pxe.cfg", "timeout 5");
/// let settings = tree.settings();
/// tree.assert_file_not_exists("tftpboot/images/d1/pxe.cfg");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary tree.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// `rel` as a forward-slash string, for use inside templates.
    pub fn path_str(&self, rel: &str) -> String {
        NormalizedPath::new(self.path(rel)).to_string()
    }

    pub fn boot_root(&self) -> PathBuf {
        self.path("tftpboot")
    }

    /// Settings pointing every root into this tree.
    pub fn settings(&self) -> BootSettings {
        let mut settings = BootSettings::with_boot_root(self.boot_root());
        settings.webdir = self.path("www");
        settings.bootloaders_dir = self.path("loaders");
        settings
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Read `rel` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read file {}: {e}", path.display()))
    }

    /// SHA-256 checksum of `rel`.
    pub fn checksum(&self, rel: &str) -> String {
        compute_file_checksum(&self.path(rel)).unwrap()
    }

    /// Assert that `path` (relative to the tree root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the tree root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
