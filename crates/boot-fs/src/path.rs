//! Forward-slash paths for rendered boot locations

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A path stored as a forward-slash string.
///
/// Template rendering produces plain strings; keeping them in one textual
/// form makes a rendered glob source directly comparable with its own
/// matches. Conversion to a native [`PathBuf`] happens only at I/O.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment` with exactly one separator.
    ///
    /// Joining onto an empty path yields the segment, so a bare file name's
    /// missing parent stays relative.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let inner = match self.inner.as_str() {
            "" => segment,
            base if base.ends_with('/') => format!("{base}{segment}"),
            base => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    /// Directory part, `None` for a bare file name.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        let idx = trimmed.rfind('/')?;
        let inner = if idx == 0 { "/" } else { &trimmed[..idx] };
        Some(Self {
            inner: inner.to_string(),
        })
    }

    /// Last non-empty component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Sibling path named `name`.
    pub fn with_file_name(&self, name: &str) -> Self {
        self.parent()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|| Self::new(name))
    }

    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Extension of the file name; dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parent_of_root_child_is_root() {
        let path = NormalizedPath::new("/boot");
        assert_eq!(path.parent(), Some(NormalizedPath::new("/")));
    }

    #[test]
    fn bare_name_has_no_parent() {
        assert_eq!(NormalizedPath::new("cfg").parent(), None);
    }

    #[rstest]
    #[case("/boot/cfg", "cfg.txt", "/boot/cfg.txt")]
    #[case("cfg", "cfg.bin", "cfg.bin")]
    #[case("/boot/images/", "vmlinuz", "/boot/vmlinuz")]
    fn with_file_name_keeps_directory(
        #[case] path: &str,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(NormalizedPath::new(path).with_file_name(name).as_str(), expected);
    }

    #[test]
    fn join_onto_root() {
        let path = NormalizedPath::new("/").join("pxelinux.0");
        assert_eq!(path.as_str(), "/pxelinux.0");
    }

    #[test]
    fn backslashes_are_normalized() {
        assert_eq!(NormalizedPath::new(r"C:\boot\cfg").as_str(), "C:/boot/cfg");
    }

    #[rstest]
    #[case("/boot/initrd.img", Some("img"))]
    #[case("/boot/.hidden", None)]
    #[case("/boot/vmlinuz", None)]
    fn extension_cases(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(NormalizedPath::new(path).extension(), expected);
    }
}
