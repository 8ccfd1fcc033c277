//! Tests for the in-memory registry

use boot_fs::NormalizedPath;
use boot_meta::{Distro, Error, Host, HostMatch, InMemoryRegistry, Interface, Registry};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn registry_with_hosts(names: &[&str]) -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    registry
        .add_distro(Distro::new("d1", "/src/vmlinuz", "/src/initrd.img"))
        .unwrap();
    for name in names {
        registry.add_host(Host::new(*name, "d1")).unwrap();
    }
    registry
}

#[test]
fn test_find_host_exact_name() {
    let registry = registry_with_hosts(&["web01", "web02"]);

    match registry.find_host("web01") {
        HostMatch::One(host) => assert_eq!(host.name, "web01"),
        other => panic!("expected one match, got {:?}", other),
    }
}

#[test]
fn test_find_host_missing() {
    let registry = registry_with_hosts(&["web01"]);
    assert_eq!(registry.find_host("db01"), HostMatch::None);
}

#[test]
fn test_find_host_wildcard_is_ambiguous() {
    let registry = registry_with_hosts(&["web01", "web02", "db01"]);

    match registry.find_host("web*") {
        HostMatch::Many(hosts) => {
            let names: Vec<&str> = hosts.iter().map(|h| h.name.as_str()).collect();
            assert_eq!(names, vec!["web01", "web02"]);
        }
        other => panic!("expected ambiguous match, got {:?}", other),
    }
}

#[test]
fn test_duplicate_host_rejected() {
    let mut registry = registry_with_hosts(&["web01"]);
    let result = registry.add_host(Host::new("web01", "d1"));
    assert!(matches!(result, Err(Error::DuplicateName { kind: "host", .. })));
}

#[test]
fn test_host_with_unknown_distro_rejected() {
    let mut registry = registry_with_hosts(&[]);
    let result = registry.add_host(Host::new("web01", "missing"));
    assert!(matches!(result, Err(Error::UnknownDistro { .. })));
}

#[test]
fn test_load_registry_from_toml_keeps_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.toml");
    fs::write(
        &path,
        r#"
[[distros]]
name = "d2"
kernel = "/src/d2/vmlinuz"
initrd = "/src/d2/initrd.img"

[[distros]]
name = "d1"
kernel = "/src/d1/vmlinuz"
initrd = "/src/d1/initrd.img"

[distros.template_files]
"/boot/cfg" = "/src/cfg.*"
"/boot/a" = "/src/a"

[[hosts]]
name = "web01"
distro = "d1"

[[hosts.interfaces]]
name = "eth0"
mac_address = "aa:bb:cc:dd:ee:ff"
"#,
    )
    .unwrap();

    let registry = InMemoryRegistry::load(&NormalizedPath::new(&path)).unwrap();

    let names: Vec<&str> = registry.distros().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["d2", "d1"]);

    let d1 = registry.find_distro("d1").unwrap();
    let destinations: Vec<&str> = d1.template_files.iter().map(|(dest, _)| dest).collect();
    assert_eq!(destinations, vec!["/boot/cfg", "/boot/a"]);

    let host = &registry.hosts()[0];
    assert!(host.netboot_enabled);
    assert_eq!(
        host.interfaces,
        vec![Interface::new("eth0", "aa:bb:cc:dd:ee:ff")]
    );
}

#[test]
fn test_load_registry_rejects_dangling_host() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.json");
    fs::write(
        &path,
        r#"{"hosts": [{"name": "web01", "distro": "nowhere"}]}"#,
    )
    .unwrap();

    let result = InMemoryRegistry::load(&NormalizedPath::new(&path));
    assert!(matches!(result, Err(Error::UnknownDistro { .. })));
}
