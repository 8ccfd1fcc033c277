//! Boot-file copier behaviour against a real scratch tree

use boot_core::{
    BootFileCopier, CopyOutcome, CopyReport, PlaceholderRenderer, PxeGenerator, SyncContext,
};
use boot_meta::{BootSettings, Distro, InMemoryRegistry, InheritanceResolver, Registry};
use boot_test_utils::TestTree;
use pretty_assertions::assert_eq;

fn copy_files(settings: &BootSettings, registry: &InMemoryRegistry, distro: &str) -> CopyReport {
    let resolver = InheritanceResolver::new(settings, registry);
    let renderer = PlaceholderRenderer::new();
    let generator = PxeGenerator::new(settings, registry, &resolver, &renderer);
    let ctx = SyncContext::new(settings, registry, &resolver, &renderer, &generator);
    let distro = registry.find_distro(distro).unwrap();
    BootFileCopier::new(ctx).copy_distro_files(distro).unwrap()
}

fn registry_with(distros: Vec<Distro>) -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    for distro in distros {
        registry.add_distro(distro).unwrap();
    }
    registry
}

#[test]
fn test_glob_source_fans_out_to_basenames() {
    let tree = TestTree::new();
    tree.write("src/cfg.txt", "text");
    tree.write("src/cfg.bin", "binary");
    let d1 = Distro::new("d1", "/k", "/i")
        .with_template_file(&tree.path_str("boot/cfg"), &tree.path_str("src/cfg.*"));
    let d2 = Distro::new("d2", "/k", "/i");
    let registry = registry_with(vec![d1, d2]);

    let report = copy_files(&tree.settings(), &registry, "d1");

    assert_eq!(report.attempted(), 2);
    assert_eq!(report.copied(), 2);
    tree.assert_file_contains("boot/cfg.txt", "text");
    tree.assert_file_contains("boot/cfg.bin", "binary");
    tree.assert_file_not_exists("boot/cfg");

    let other = copy_files(&tree.settings(), &registry, "d2");
    assert_eq!(other.attempted(), 0);
}

#[test]
fn test_literal_source_copies_to_exact_destination() {
    let tree = TestTree::new();
    tree.write("src/d1/pxelinux.cfg", "menu");
    let distro = Distro::new("d1", "/k", "/i").with_template_file(
        "{{ local_img_path }}/boot.cfg",
        &tree.path_str("src/d1/pxelinux.cfg"),
    );
    let registry = registry_with(vec![distro]);

    let report = copy_files(&tree.settings(), &registry, "d1");

    assert_eq!(report.copied(), 1);
    tree.assert_file_contains("tftpboot/images/d1/boot.cfg", "menu");
}

#[test]
fn test_second_run_changes_nothing() {
    let tree = TestTree::new();
    tree.write("src/a.cfg", "a");
    tree.write("src/b.cfg", "b");
    let distro = Distro::new("d1", "/k", "/i")
        .with_template_file("{{ local_img_path }}/", &tree.path_str("src/*.cfg"));
    let registry = registry_with(vec![distro]);
    let settings = tree.settings();

    let first = copy_files(&settings, &registry, "d1");
    let before = (
        tree.checksum("tftpboot/images/d1/a.cfg"),
        tree.checksum("tftpboot/images/d1/b.cfg"),
    );
    let second = copy_files(&settings, &registry, "d1");
    let after = (
        tree.checksum("tftpboot/images/d1/a.cfg"),
        tree.checksum("tftpboot/images/d1/b.cfg"),
    );

    assert_eq!(first.copied(), 2);
    assert_eq!(second.copied(), 0);
    assert_eq!(second.skipped(), 2);
    assert_eq!(before, after);
}

#[test]
fn test_existing_destination_is_never_overwritten() {
    let tree = TestTree::new();
    tree.write("src/boot.cfg", "new");
    tree.write("boot/boot.cfg", "hand edited");
    let distro = Distro::new("d1", "/k", "/i")
        .with_template_file(&tree.path_str("boot/boot.cfg"), &tree.path_str("src/boot.cfg"));
    let registry = registry_with(vec![distro]);

    let report = copy_files(&tree.settings(), &registry, "d1");

    assert_eq!(report.skipped(), 1);
    assert_eq!(tree.read("boot/boot.cfg"), "hand edited");
}

#[test]
fn test_failed_pair_does_not_stop_the_rest() {
    let tree = TestTree::new();
    tree.mkdir("src/a-directory");
    tree.write("src/good.cfg", "good");
    let distro = Distro::new("d1", "/k", "/i")
        .with_template_file(&tree.path_str("boot/bad"), &tree.path_str("src/a-directory"))
        .with_template_file(&tree.path_str("boot/good.cfg"), &tree.path_str("src/good.cfg"));
    let registry = registry_with(vec![distro]);

    let report = copy_files(&tree.settings(), &registry, "d1");

    assert_eq!(report.attempted(), 2);
    assert!(matches!(report.outcomes[0], CopyOutcome::Failed(_)));
    assert!(matches!(report.outcomes[1], CopyOutcome::Copied(_)));
    tree.assert_file_contains("boot/good.cfg", "good");
}

#[test]
fn test_distro_variables_render_into_paths() {
    let tree = TestTree::new();
    tree.write("mnt/d1/isolinux/boot.msg", "welcome");
    let distro = Distro::new("d1", "/k", "/i")
        .with_variable("tree_root", tree.path_str("mnt/d1"))
        .with_template_file("{{ local_img_path }}/boot.msg", "{{ tree_root }}/isolinux/boot.msg");
    let registry = registry_with(vec![distro]);

    let report = copy_files(&tree.settings(), &registry, "d1");

    assert!(report.is_clean());
    tree.assert_file_contains("tftpboot/images/d1/boot.msg", "welcome");
}

#[test]
fn test_web_image_path_is_available() {
    let tree = TestTree::new();
    tree.write("src/ks.cfg", "kickstart");
    let distro = Distro::new("d1", "/k", "/i")
        .with_template_file("{{ web_img_path }}/ks.cfg", &tree.path_str("src/ks.cfg"));
    let registry = registry_with(vec![distro]);

    copy_files(&tree.settings(), &registry, "d1");

    tree.assert_file_contains("www/distro_mirror/d1/ks.cfg", "kickstart");
}
