//! Glob expansion over rendered source paths

use crate::{Error, NormalizedPath, Result};

/// Expand a glob pattern into the paths it matches.
///
/// Matches come back in the order the `glob` crate yields them (sorted per
/// directory) and in the crate's normalized form, so repeated separators
/// are collapsed. Use [`is_glob_pattern`] to tell a literal path from a
/// wildcard one.
pub fn expand_glob(pattern: &str) -> Result<Vec<NormalizedPath>> {
    let paths = glob::glob(pattern).map_err(|e| Error::GlobPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => matches.push(NormalizedPath::new(path)),
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(Error::io(path, e.into_error()));
            }
        }
    }
    Ok(matches)
}

/// Whether `pattern` contains glob metacharacters.
pub fn is_glob_pattern(pattern: &str) -> bool {
    glob::Pattern::escape(pattern) != pattern
}

/// Check whether `candidate` matches a shell-style wildcard `pattern`.
///
/// Used for name lookups rather than filesystem paths; an invalid pattern
/// falls back to exact comparison.
pub fn matches_name(pattern: &str, candidate: &str) -> bool {
    match glob::Pattern::new(pattern) {
        Ok(compiled) => compiled.matches(candidate),
        Err(_) => pattern == candidate,
    }
}
