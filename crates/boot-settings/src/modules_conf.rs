//! `modules.conf` key renames

use std::sync::LazyLock;

use boot_fs::{NormalizedPath, io};
use regex::{Captures, Regex};

use crate::Result;

static MODULE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(authn|authz|manage)_").expect("Invalid module prefix regex"));

/// Rename legacy module prefixes in `content`.
///
/// `authn_` becomes `authentication.`, `authz_` becomes `authorization.`
/// and `manage_` becomes `managers.`. Returns the new content and the
/// number of replacements.
pub fn rename_modules(content: &str) -> (String, usize) {
    let mut count = 0;
    let renamed = MODULE_PREFIX.replace_all(content, |caps: &Captures<'_>| {
        count += 1;
        match &caps[1] {
            "authn" => "authentication.",
            "authz" => "authorization.",
            _ => "managers.",
        }
    });
    (renamed.into_owned(), count)
}

/// Rewrite the file at `path` in place; returns the number of renames.
///
/// The file is replaced atomically and left untouched when nothing needs
/// renaming.
pub fn rewrite(path: &NormalizedPath) -> Result<usize> {
    let content = io::read_text(path)?;
    let (renamed, count) = rename_modules(&content);
    if count > 0 {
        io::write_text(path, &renamed)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rename_all_prefixes() {
        let input = "[authentication]\nmodule = authn_configfile\n\n[authorization]\nmodule = authz_allowall\n\n[dns]\nmodule = manage_bind\n";

        let (output, count) = rename_modules(input);

        assert_eq!(count, 3);
        assert_eq!(
            output,
            "[authentication]\nmodule = authentication.configfile\n\n[authorization]\nmodule = authorization.allowall\n\n[dns]\nmodule = managers.bind\n"
        );
    }

    #[test]
    fn test_prefix_inside_word_is_kept() {
        let (output, count) = rename_modules("module = nomanage_here\n");
        assert_eq!(count, 0);
        assert_eq!(output, "module = nomanage_here\n");
    }
}
