//! Shared test utilities for the bootsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] scratch directory with a boot root, a web root
//!   and a boot loader source directory
//! - [`fixtures`]: distro and host builders backed by real files

pub mod fixtures;
pub mod tree;

pub use fixtures::{distro_with_artifacts, netboot_host};
pub use tree::TestTree;
