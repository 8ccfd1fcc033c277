//! pxelinux boot configuration generator

use std::path::Path;

use boot_fs::checksum::compute_content_checksum;
use boot_fs::{CopyStatus, NormalizedPath, io};
use boot_meta::{BlendedConfig, BootSettings, Distro, Entity, Host, Registry, VariableResolver};

use crate::generator::BootConfigGenerator;
use crate::menu::{MenuEntry, MenuEntryKind, MenuItems};
use crate::template::TemplateRenderer;
use crate::{Error, Result};

const PXE_CONFIG_DIR: &str = "pxelinux.cfg";
const MENU_FILE: &str = "default";
const DISTRO_IMAGES_DIR: &str = "images";
const STANDALONE_IMAGES_DIR: &str = "images2";

/// Writes pxelinux menus and per-interface boot files under the boot root.
pub struct PxeGenerator<'a> {
    settings: &'a BootSettings,
    registry: &'a dyn Registry,
    resolver: &'a dyn VariableResolver,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> PxeGenerator<'a> {
    pub fn new(
        settings: &'a BootSettings,
        registry: &'a dyn Registry,
        resolver: &'a dyn VariableResolver,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            settings,
            registry,
            resolver,
            renderer,
        }
    }

    fn config_dir(&self) -> NormalizedPath {
        self.settings.boot_root().join(PXE_CONFIG_DIR)
    }

    fn distro_image_dir(&self, distro: &str) -> NormalizedPath {
        self.settings.boot_root().join(DISTRO_IMAGES_DIR).join(distro)
    }

    fn menu_entry(
        &self,
        kind: MenuEntryKind,
        name: &str,
        distro: &Distro,
        blended: &BlendedConfig,
    ) -> Result<MenuEntry> {
        let options = blended.get_str("kernel_options").unwrap_or_default();
        let append = self.renderer.render(options, blended.as_map(), None)?;
        let image_path = |artifact: &Path| {
            format!("/{}/{}/{}", DISTRO_IMAGES_DIR, distro.name, artifact_name(artifact))
        };
        Ok(MenuEntry {
            name: name.to_string(),
            kind,
            kernel: image_path(&distro.kernel),
            initrd: image_path(&distro.initrd),
            append: append.trim().to_string(),
        })
    }

    fn resolve_distro(&self, host: &Host) -> Result<&Distro> {
        self.registry
            .find_distro(&host.distro)
            .ok_or_else(|| Error::DistroNotFound {
                name: host.distro.clone(),
            })
    }
}

impl BootConfigGenerator for PxeGenerator<'_> {
    fn write_host_config(&self, host: &Host, menu: &MenuItems) -> Result<()> {
        let content = if host.netboot_enabled {
            let entry = menu.host_entry(&host.name).ok_or_else(|| Error::MenuEntryMissing {
                host: host.name.clone(),
            })?;
            format!(
                "DEFAULT {label}\nPROMPT 0\nTIMEOUT 0\n\n{body}",
                label = entry.label(),
                body = entry.render_label()
            )
        } else {
            "DEFAULT local\nPROMPT 0\nTIMEOUT 0\n\nLABEL local\n\tLOCALBOOT 0\n".to_string()
        };

        let dir = self.config_dir();
        for interface in &host.interfaces {
            let Some(file_name) = interface.pxe_file_name() else {
                tracing::debug!(
                    host = %host.name,
                    interface = %interface.name,
                    "Interface has no MAC address"
                );
                continue;
            };
            let path = dir.join(&file_name);
            io::write_text(&path, &content)?;
            tracing::debug!(host = %host.name, path = %path, "Wrote host boot config");
        }
        Ok(())
    }

    fn write_host_templates(&self, host: &Host) -> Result<usize> {
        if host.template_files.is_empty() {
            return Ok(0);
        }

        let blended = self.resolver.blend(Entity::Host(host), false)?;
        let vars = blended.as_map();
        let root = self.settings.boot_root();

        let mut written = 0;
        for (destination, source) in host.template_files.iter() {
            let source = NormalizedPath::new(self.renderer.render(source, vars, None)?);
            let template = io::read_text(&source)?;
            let rendered = self.renderer.render(&template, vars, None)?;

            let destination = self.renderer.render(destination, vars, None)?;
            let destination = if Path::new(&destination).is_absolute() {
                NormalizedPath::new(&destination)
            } else {
                root.join(&destination)
            };
            io::write_text(&destination, &rendered)?;
            tracing::debug!(
                host = %host.name,
                destination = %destination,
                "Rendered host template"
            );
            written += 1;
        }
        Ok(written)
    }

    fn compute_menu_items(&self) -> Result<MenuItems> {
        let mut items = MenuItems::new(&self.settings.menu_title);

        for distro in self.registry.distros() {
            let blended = self.resolver.blend(Entity::Distro(distro), true)?;
            items.push(self.menu_entry(MenuEntryKind::Distro, &distro.name, distro, &blended)?);
        }

        for host in self.registry.hosts().iter().filter(|h| h.netboot_enabled) {
            let distro = self.resolve_distro(host)?;
            let blended = self.resolver.blend(Entity::Host(host), true)?;
            items.push(self.menu_entry(MenuEntryKind::Host, &host.name, distro, &blended)?);
        }

        Ok(items)
    }

    fn regenerate_menu(&self, menu: &MenuItems) -> Result<String> {
        let content = menu.render_pxe_menu();
        let path = self.config_dir().join(MENU_FILE);
        io::write_text(&path, &content)?;
        tracing::info!(path = %path, entries = menu.len(), "Regenerated boot menu");
        Ok(compute_content_checksum(&content))
    }

    fn stage_boot_loaders(&self, root: &NormalizedPath) -> Result<usize> {
        io::ensure_dir(root)?;
        let source_dir = NormalizedPath::new(&self.settings.bootloaders_dir);

        let mut copied = 0;
        for loader in &self.settings.bootloaders {
            let source = source_dir.join(loader);
            if !source.is_file() {
                tracing::warn!(
                    loader = %loader,
                    source = %source,
                    "Boot loader not found, skipping"
                );
                continue;
            }
            if io::copy_if_changed(&source, &root.join(loader))? == CopyStatus::Copied {
                copied += 1;
            }
        }
        Ok(copied)
    }

    fn copy_distro_images(&self, distro: &Distro) -> Result<()> {
        let dir = self.distro_image_dir(&distro.name);
        io::ensure_dir(&dir)?;
        for artifact in [&distro.kernel, &distro.initrd] {
            stage_artifact(&distro.name, artifact, &dir)?;
        }
        Ok(())
    }

    fn copy_images(&self) -> Result<usize> {
        let root = self.settings.boot_root().join(STANDALONE_IMAGES_DIR);
        let mut copied = 0;
        for image in self.registry.images() {
            let dir = root.join(&image.name);
            io::ensure_dir(&dir)?;
            if stage_artifact(&image.name, &image.file, &dir)? == CopyStatus::Copied {
                copied += 1;
            }
        }
        Ok(copied)
    }
}

fn artifact_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn stage_artifact(owner: &str, artifact: &Path, dir: &NormalizedPath) -> Result<CopyStatus> {
    let source = NormalizedPath::new(artifact);
    if !source.is_file() {
        return Err(Error::MissingArtifact {
            owner: owner.to_string(),
            path: artifact.to_path_buf(),
        });
    }
    let destination = dir.join(&artifact_name(artifact));
    let status = io::copy_if_changed(&source, &destination)?;
    tracing::debug!(owner, destination = %destination, ?status, "Staged boot artifact");
    Ok(status)
}
