//! Boot configuration generator seam
//!
//! The orchestrator decides *when* boot loaders, images, per-host files and
//! the menu are written; a [`BootConfigGenerator`] decides *what* those
//! files look like. [`crate::PxeGenerator`] is the pxelinux implementation.

use boot_fs::NormalizedPath;
use boot_meta::{Distro, Host};

use crate::Result;
use crate::menu::MenuItems;

pub trait BootConfigGenerator {
    /// Write every boot configuration file of `host` (one per interface).
    ///
    /// Existing files are overwritten unconditionally.
    fn write_host_config(&self, host: &Host, menu: &MenuItems) -> Result<()>;

    /// Render and write the host's ad-hoc templates.
    ///
    /// Returns the number of files written.
    fn write_host_templates(&self, host: &Host) -> Result<usize>;

    /// Build the menu aggregate from the current registry.
    fn compute_menu_items(&self) -> Result<MenuItems>;

    /// Rewrite the aggregate boot menu from `menu`.
    ///
    /// Callers pass the items computed earlier in the same pass. Returns a
    /// checksum of the written menu.
    fn regenerate_menu(&self, menu: &MenuItems) -> Result<String>;

    /// Stage boot loaders into `root`; returns the number copied.
    fn stage_boot_loaders(&self, root: &NormalizedPath) -> Result<usize>;

    /// Stage a distro's kernel and initrd into the boot root.
    fn copy_distro_images(&self, distro: &Distro) -> Result<()>;

    /// Stage standalone boot images; returns the number copied.
    fn copy_images(&self) -> Result<usize>;
}
