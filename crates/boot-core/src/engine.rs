//! SyncEngine implementation
//!
//! The SyncEngine decides the order in which boot loaders, distro files,
//! standalone images, host configurations and the aggregate menu are
//! written under the boot root.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boot_meta::{Distro, Host, HostMatch};

use crate::context::SyncContext;
use crate::copier::{BootFileCopier, CopyReport};
use crate::host::sync_host;
use crate::{Error, Result};

/// Report from a full or partial sync
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Whether the pass ran to completion
    pub success: bool,
    /// When the pass started
    pub started_at: DateTime<Utc>,
    /// Actions taken during the pass
    pub actions: Vec<String>,
    /// Errors that were caught and did not stop the pass
    pub errors: Vec<String>,
    /// Boot-file copy reports, one per distro processed
    pub distros: Vec<CopyReport>,
    /// Number of hosts whose boot configuration was written
    pub hosts_synced: usize,
    /// Checksum of the regenerated menu
    pub menu_checksum: Option<String>,
}

impl SyncReport {
    /// Create a successful sync report
    pub fn success() -> Self {
        Self {
            success: true,
            started_at: Utc::now(),
            actions: Vec::new(),
            errors: Vec::new(),
            distros: Vec::new(),
            hosts_synced: 0,
            menu_checksum: None,
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }

    /// Whether any caught error or failed copy was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.distros.iter().any(|r| !r.is_clean())
    }
}

/// What a sync pass covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Everything in the registry
    Full,
    /// The hosts named by these identifiers, in order
    Hosts(Vec<String>),
}

/// Orchestrates sync passes over the boot root
pub struct SyncEngine<'a> {
    ctx: SyncContext<'a>,
}

impl<'a> SyncEngine<'a> {
    pub fn new(ctx: SyncContext<'a>) -> Self {
        Self { ctx }
    }

    /// Run the pass described by `scope`.
    pub fn sync(&self, scope: &SyncScope, verbose: bool) -> Result<SyncReport> {
        match scope {
            SyncScope::Full => self.sync_all(),
            SyncScope::Hosts(identifiers) => self.sync_hosts(identifiers, verbose),
        }
    }

    /// Regenerate the whole boot tree.
    ///
    /// Distro failures are isolated and recorded in the report: a distro
    /// whose kernel or initrd cannot be staged still has its boot files
    /// copied. A host failure ends the pass with an error, and the menu is
    /// then left as it was before the pass.
    pub fn sync_all(&self) -> Result<SyncReport> {
        let root = self.ctx.boot_root();
        let span = tracing::info_span!("sync_all", root = %root);
        let _enter = span.enter();

        let mut report = SyncReport::success();

        let loaders = self.ctx.generator.stage_boot_loaders(&root)?;
        report = report.with_action(format!("Staged {} boot loader(s)", loaders));

        let copier = BootFileCopier::new(self.ctx);
        for distro in self.ctx.registry.distros() {
            tracing::info!(distro = %distro.name, "Copying files for distro");
            if let Err(e) = self.ctx.generator.copy_distro_images(distro) {
                tracing::error!(
                    distro = %distro.name,
                    error = %e,
                    "Failed to stage distro images"
                );
                report.errors.push(format!("{}: {}", distro.name, e));
            }
            match copier.copy_distro_files(distro) {
                Ok(copy_report) => {
                    report = report.with_action(format!(
                        "Copied {} of {} file(s) for {}",
                        copy_report.copied(),
                        copy_report.attempted(),
                        distro.name
                    ));
                    for failure in copy_report.failures() {
                        report.errors.push(failure.to_string());
                    }
                    report.distros.push(copy_report);
                }
                Err(e) => {
                    tracing::error!(
                        distro = %distro.name,
                        error = %e,
                        "Failed to copy distro files"
                    );
                    report.errors.push(format!("{}: {}", distro.name, e));
                }
            }
        }

        match self.ctx.generator.copy_images() {
            Ok(count) => report = report.with_action(format!("Staged {} image(s)", count)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to copy images");
                report.errors.push(format!("images: {}", e));
            }
        }

        let menu = self.ctx.generator.compute_menu_items()?;
        for host in self.ctx.registry.hosts() {
            tracing::debug!(host = %host.name, "Writing host boot config");
            sync_host(&self.ctx, host, Some(&menu))?;
            report.hosts_synced += 1;
        }
        let written = format!("Wrote boot config for {} host(s)", report.hosts_synced);
        report = report.with_action(written);

        report.menu_checksum = Some(self.ctx.generator.regenerate_menu(&menu)?);
        report = report.with_action("Regenerated boot menu".to_string());

        tracing::info!(
            distros = report.distros.len(),
            hosts = report.hosts_synced,
            errors = report.errors.len(),
            "Sync complete"
        );
        Ok(report)
    }

    /// Sync only the hosts named by `identifiers`.
    ///
    /// Every identifier is checked before anything is written: an empty one
    /// fails with [`Error::InvalidHostIdentifier`], one matching several
    /// hosts with [`Error::AmbiguousHost`]. Identifiers matching nothing are
    /// logged and skipped. The menu is regenerated exactly once.
    pub fn sync_hosts(&self, identifiers: &[String], verbose: bool) -> Result<SyncReport> {
        let span = tracing::info_span!("sync_hosts", count = identifiers.len());
        let _enter = span.enter();

        if let Some(index) = identifiers.iter().position(|id| id.trim().is_empty()) {
            return Err(Error::InvalidHostIdentifier { index });
        }

        let mut hosts: Vec<&Host> = Vec::with_capacity(identifiers.len());
        let mut report = SyncReport::success();
        for identifier in identifiers {
            match self.ctx.registry.find_host(identifier) {
                HostMatch::One(host) => hosts.push(host),
                HostMatch::None => {
                    tracing::info!(host = %identifier, "Host not found, skipping");
                    report = report.with_action(format!("Skipped unknown host {}", identifier));
                }
                HostMatch::Many(matches) => {
                    return Err(Error::AmbiguousHost {
                        identifier: identifier.clone(),
                        count: matches.len(),
                    });
                }
            }
        }

        let menu = self.ctx.generator.compute_menu_items()?;
        for host in hosts {
            if verbose {
                tracing::info!(host = %host.name, "Processing host");
            } else {
                tracing::debug!(host = %host.name, "Processing host");
            }
            sync_host(&self.ctx, host, Some(&menu))?;
            report.hosts_synced += 1;
            report = report.with_action(format!("Wrote boot config for {}", host.name));
        }

        report.menu_checksum = Some(self.ctx.generator.regenerate_menu(&menu)?);
        report = report.with_action("Regenerated boot menu".to_string());
        Ok(report)
    }

    /// Run the boot-file copier over every registered distro.
    ///
    /// A distro whose configuration cannot be blended is logged and left
    /// out of the result.
    pub fn copy_all_distro_files(&self) -> Vec<CopyReport> {
        let span = tracing::info_span!("copy_boot_files");
        let _enter = span.enter();

        let copier = BootFileCopier::new(self.ctx);
        self.ctx
            .registry
            .distros()
            .iter()
            .filter_map(|distro| match copier.copy_distro_files(distro) {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::error!(
                        distro = %distro.name,
                        error = %e,
                        "Failed to copy distro files"
                    );
                    None
                }
            })
            .collect()
    }

    /// Stage one distro's kernel and initrd, then copy its boot files.
    ///
    /// Unlike a full sync, a staging failure ends the operation.
    pub fn add_distro(&self, distro: &Distro) -> Result<CopyReport> {
        let span = tracing::info_span!("add_distro", distro = %distro.name);
        let _enter = span.enter();

        self.ctx.generator.copy_distro_images(distro)?;
        BootFileCopier::new(self.ctx).copy_distro_files(distro)
    }
}
