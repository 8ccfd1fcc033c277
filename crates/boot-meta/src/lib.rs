//! Settings, registry and variable blending for bootsync.
//!
//! This crate holds the records a sync operates on (distributions, hosts,
//! standalone images), the settings that locate the boot root, and the
//! resolver that flattens inherited configuration into a [`BlendedConfig`].

pub mod blend;
pub mod error;
pub mod item;
pub mod registry;
pub mod settings;

pub use blend::{BlendedConfig, Entity, InheritanceResolver, VariableResolver};
pub use error::{Error, Result};
pub use item::{BootImage, Distro, Host, Interface, TemplateFileMapping};
pub use registry::{HostMatch, InMemoryRegistry, Registry, RegistryDocument};
pub use settings::BootSettings;
