//! Explicit context shared by every pipeline component

use boot_fs::NormalizedPath;
use boot_meta::{BootSettings, Registry, VariableResolver};

use crate::generator::BootConfigGenerator;
use crate::template::TemplateRenderer;

/// Collaborators a sync pass works with.
///
/// Built once by whoever drives the sync and handed to each component by
/// reference; nothing in the pipeline reaches for global state.
#[derive(Clone, Copy)]
pub struct SyncContext<'a> {
    pub settings: &'a BootSettings,
    pub registry: &'a dyn Registry,
    pub resolver: &'a dyn VariableResolver,
    pub renderer: &'a dyn TemplateRenderer,
    pub generator: &'a dyn BootConfigGenerator,
}

impl<'a> SyncContext<'a> {
    pub fn new(
        settings: &'a BootSettings,
        registry: &'a dyn Registry,
        resolver: &'a dyn VariableResolver,
        renderer: &'a dyn TemplateRenderer,
        generator: &'a dyn BootConfigGenerator,
    ) -> Self {
        Self {
            settings,
            registry,
            resolver,
            renderer,
            generator,
        }
    }

    /// Root of the boot tree.
    pub fn boot_root(&self) -> NormalizedPath {
        self.settings.boot_root()
    }
}
