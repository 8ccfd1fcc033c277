use boot_fs::NormalizedPath;
use boot_fs::matching::{expand_glob, is_glob_pattern, matches_name};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn tree_with(files: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for file in files {
        fs::write(temp.path().join(file), file.as_bytes()).unwrap();
    }
    temp
}

#[test]
fn test_literal_existing_path_matches_itself() {
    let temp = tree_with(&["cfg.txt"]);
    let literal = NormalizedPath::new(temp.path().join("cfg.txt"));

    let matches = expand_glob(literal.as_str()).unwrap();

    assert_eq!(matches, vec![literal]);
}

#[test]
fn test_literal_missing_path_matches_nothing() {
    let temp = tree_with(&[]);
    let literal = NormalizedPath::new(temp.path().join("absent"));

    assert!(expand_glob(literal.as_str()).unwrap().is_empty());
}

#[test]
fn test_wildcard_returns_every_match_sorted() {
    let temp = tree_with(&["cfg.txt", "cfg.bin", "other"]);
    let root = NormalizedPath::new(temp.path());

    let matches = expand_glob(root.join("cfg.*").as_str()).unwrap();

    assert_eq!(matches, vec![root.join("cfg.bin"), root.join("cfg.txt")]);
}

#[test]
fn test_invalid_pattern_is_an_error() {
    assert!(expand_glob("/src/[cfg").is_err());
}

#[rstest]
#[case("/srv/dvd//vmlinuz", false)]
#[case("/srv/dvd/vmlinuz-5.14", false)]
#[case("/srv/dvd/*.img", true)]
#[case("/srv/dvd/initrd?", true)]
#[case("/srv/dvd/[ab].cfg", true)]
fn test_is_glob_pattern(#[case] pattern: &str, #[case] expected: bool) {
    assert_eq!(is_glob_pattern(pattern), expected);
}

#[rstest]
#[case("web01", "web01", true)]
#[case("web*", "web01", true)]
#[case("web?2", "web02", true)]
#[case("web*", "db01", false)]
#[case("[bad", "[bad", true)]
fn test_matches_name(#[case] pattern: &str, #[case] candidate: &str, #[case] expected: bool) {
    assert_eq!(matches_name(pattern, candidate), expected);
}
