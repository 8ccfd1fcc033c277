//! Registry of distributions, hosts and images
//!
//! The sync pipeline only reads the registry. [`InMemoryRegistry`] is the
//! registry loaded from a registry document; other stores plug in through
//! the [`Registry`] trait.

use boot_fs::matching::matches_name;
use boot_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::item::validate_name;
use crate::{BootImage, Distro, Error, Host, Result};

/// Result of looking a host up by name or pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMatch<'a> {
    /// Nothing matched
    None,
    /// Exactly one host matched
    One(&'a Host),
    /// The identifier is ambiguous
    Many(Vec<&'a Host>),
}

/// Read access to registered records.
///
/// Iteration order of `distros()` and `hosts()` is the order a full sync
/// processes them in.
pub trait Registry {
    fn distros(&self) -> &[Distro];

    fn hosts(&self) -> &[Host];

    fn images(&self) -> &[BootImage] {
        &[]
    }

    fn find_distro(&self, name: &str) -> Option<&Distro> {
        self.distros().iter().find(|d| d.name == name)
    }

    /// Look a host up by name; shell-style wildcards are honoured, so one
    /// identifier may match several hosts.
    fn find_host(&self, identifier: &str) -> HostMatch<'_> {
        let mut matches: Vec<&Host> = self
            .hosts()
            .iter()
            .filter(|h| matches_name(identifier, &h.name))
            .collect();
        match matches.len() {
            0 => HostMatch::None,
            1 => HostMatch::One(matches.remove(0)),
            _ => HostMatch::Many(matches),
        }
    }
}

/// On-disk shape of a registry file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub distros: Vec<Distro>,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub images: Vec<BootImage>,
}

/// Registry held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    distros: Vec<Distro>,
    hosts: Vec<Host>,
    images: Vec<BootImage>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry document (TOML, JSON or YAML) and validate it.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let document: RegistryDocument = ConfigStore::new().load(path)?;
        let registry = Self::from_document(document)?;
        tracing::debug!(
            %path,
            distros = registry.distros.len(),
            hosts = registry.hosts.len(),
            "Loaded registry"
        );
        Ok(registry)
    }

    /// Build a registry from a parsed document.
    ///
    /// Distros are added before hosts so host references can be checked.
    pub fn from_document(document: RegistryDocument) -> Result<Self> {
        let mut registry = Self::new();
        for distro in document.distros {
            registry.add_distro(distro)?;
        }
        for host in document.hosts {
            registry.add_host(host)?;
        }
        for image in document.images {
            registry.add_image(image)?;
        }
        Ok(registry)
    }

    pub fn add_distro(&mut self, distro: Distro) -> Result<()> {
        validate_name("distro", &distro.name)?;
        if self.find_distro(&distro.name).is_some() {
            return Err(Error::DuplicateName {
                kind: "distro",
                name: distro.name,
            });
        }
        self.distros.push(distro);
        Ok(())
    }

    pub fn add_host(&mut self, host: Host) -> Result<()> {
        validate_name("host", &host.name)?;
        if self.hosts.iter().any(|h| h.name == host.name) {
            return Err(Error::DuplicateName {
                kind: "host",
                name: host.name,
            });
        }
        if self.find_distro(&host.distro).is_none() {
            return Err(Error::UnknownDistro {
                host: host.name,
                distro: host.distro,
            });
        }
        self.hosts.push(host);
        Ok(())
    }

    pub fn add_image(&mut self, image: BootImage) -> Result<()> {
        validate_name("image", &image.name)?;
        if self.images.iter().any(|i| i.name == image.name) {
            return Err(Error::DuplicateName {
                kind: "image",
                name: image.name,
            });
        }
        self.images.push(image);
        Ok(())
    }

    /// Snapshot of the registry as a serializable document.
    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            distros: self.distros.clone(),
            hosts: self.hosts.clone(),
            images: self.images.clone(),
        }
    }
}

impl Registry for InMemoryRegistry {
    fn distros(&self) -> &[Distro] {
        &self.distros
    }

    fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    fn images(&self) -> &[BootImage] {
        &self.images
    }
}
