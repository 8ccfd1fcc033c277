//! Boot artifact synchronization for bootsync
//!
//! This crate turns the registry of distributions and hosts into the tree a
//! TFTP/PXE server hands out:
//!
//! - **Boot-file copier**: renders each distro's template-file mapping and
//!   copies the matched files, skipping files that already exist
//! - **Per-host writer**: writes one boot configuration per host interface
//! - **Generator**: the [`BootConfigGenerator`] seam and its pxelinux
//!   implementation [`PxeGenerator`]
//! - **SyncEngine**: full and partial sync passes, ending with a single
//!   menu regeneration
//!
//! # Architecture
//!
//! ```text
//!                 boot-cli
//!                     |
//!                 boot-core
//!                     |
//!          +----------+----------+
//!          |                     |
//!       boot-fs              boot-meta
//! ```
//!
//! Every component receives a [`SyncContext`] carrying the settings, the
//! registry, the variable resolver, the template renderer and the
//! generator. Log lines are emitted with `tracing` inside the span the
//! engine opens for each pass.

pub mod context;
pub mod copier;
pub mod engine;
pub mod error;
pub mod generator;
pub mod host;
pub mod logging;
pub mod menu;
pub mod pxe;
pub mod template;

pub use context::SyncContext;
pub use copier::{
    BootFileCopier, CopyFailure, CopyOutcome, CopyReport, ResolvedCopyTask, image_variables,
    resolve_copy_tasks,
};
pub use engine::{SyncEngine, SyncReport, SyncScope};
pub use error::{Error, Result};
pub use generator::BootConfigGenerator;
pub use host::sync_host;
pub use menu::{MenuEntry, MenuEntryKind, MenuItems};
pub use pxe::PxeGenerator;
pub use template::{PlaceholderRenderer, TemplateRenderer};
