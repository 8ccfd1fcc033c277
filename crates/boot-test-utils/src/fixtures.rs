//! Registry record fixtures backed by real files.

use boot_meta::{Distro, Host, Interface};

use crate::TestTree;

/// A distro whose kernel and initrd exist under `src/<name>/` in the tree.
pub fn distro_with_artifacts(tree: &TestTree, name: &str) -> Distro {
    let kernel = tree.write(&format!("src/{name}/vmlinuz"), &format!("kernel for {name}"));
    let initrd = tree.write(&format!("src/{name}/initrd.img"), &format!("initrd for {name}"));
    Distro::new(name, kernel, initrd)
}

/// A netboot-enabled host with one interface.
pub fn netboot_host(name: &str, distro: &str, mac: &str) -> Host {
    Host::new(name, distro).with_interface(Interface::new("eth0", mac))
}
