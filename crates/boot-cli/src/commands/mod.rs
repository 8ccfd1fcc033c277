//! Command implementations for boot-cli

pub mod settings;
pub mod sync;

use std::path::Path;

use boot_core::{PlaceholderRenderer, PxeGenerator, SyncContext, SyncEngine};
use boot_fs::NormalizedPath;
use boot_meta::{BootSettings, InMemoryRegistry, InheritanceResolver};

use crate::error::{CliError, Result};

pub use settings::{run_settings_migrate, run_settings_validate};
pub use sync::{run_add_distro, run_copy_boot_files, run_menu, run_sync, run_sync_hosts};

/// Settings and registry a pipeline command runs against.
pub struct Workspace {
    pub settings: BootSettings,
    pub registry: InMemoryRegistry,
}

impl Workspace {
    /// Load the settings and registry files.
    ///
    /// A missing settings file means default settings; a missing registry
    /// is an error.
    pub fn load(settings_path: &Path, registry_path: &Path) -> Result<Self> {
        let settings_path = NormalizedPath::new(settings_path);
        let settings = if settings_path.is_file() {
            BootSettings::load(&settings_path)?
        } else {
            tracing::debug!(path = %settings_path, "No settings file, using defaults");
            BootSettings::default()
        };

        let registry_path = NormalizedPath::new(registry_path);
        if !registry_path.is_file() {
            return Err(CliError::user(format!(
                "Registry not found: {}",
                registry_path
            )));
        }
        let registry = InMemoryRegistry::load(&registry_path)?;

        Ok(Self { settings, registry })
    }

    /// Run `f` with an engine wired to the pxelinux generator.
    pub fn with_engine<T>(&self, f: impl FnOnce(&SyncEngine<'_>) -> Result<T>) -> Result<T> {
        let resolver = InheritanceResolver::new(&self.settings, &self.registry);
        let renderer = PlaceholderRenderer::new();
        let generator = PxeGenerator::new(&self.settings, &self.registry, &resolver, &renderer);
        let ctx = SyncContext::new(
            &self.settings,
            &self.registry,
            &resolver,
            &renderer,
            &generator,
        );
        f(&SyncEngine::new(ctx))
    }

    /// Run `f` with the pxelinux generator alone.
    pub fn with_generator<T>(&self, f: impl FnOnce(&PxeGenerator<'_>) -> Result<T>) -> Result<T> {
        let resolver = InheritanceResolver::new(&self.settings, &self.registry);
        let renderer = PlaceholderRenderer::new();
        let generator = PxeGenerator::new(&self.settings, &self.registry, &resolver, &renderer);
        f(&generator)
    }
}
