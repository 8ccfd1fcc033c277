//! Registry records: distributions, hosts and standalone images

use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Ordered mapping from a destination template to a source template.
///
/// Entries keep the order they were declared in; inserting an existing
/// destination replaces its source in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFileMapping {
    entries: Vec<(String, String)>,
}

impl TemplateFileMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the source template for `destination`.
    pub fn insert(&mut self, destination: impl Into<String>, source: impl Into<String>) {
        let destination = destination.into();
        let source = source.into();
        match self.entries.iter_mut().find(|(dest, _)| *dest == destination) {
            Some(entry) => entry.1 = source,
            None => self.entries.push((destination, source)),
        }
    }

    /// Source template declared for `destination`.
    pub fn get(&self, destination: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(dest, _)| dest == destination)
            .map(|(_, src)| src.as_str())
    }

    /// Iterate `(destination, source)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(dest, src)| (dest.as_str(), src.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D: Into<String>, S: Into<String>> FromIterator<(D, S)> for TemplateFileMapping {
    fn from_iter<I: IntoIterator<Item = (D, S)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (destination, source) in iter {
            mapping.insert(destination, source);
        }
        mapping
    }
}

impl Serialize for TemplateFileMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (destination, source) in &self.entries {
            map.serialize_entry(destination, source)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TemplateFileMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = TemplateFileMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of destination templates to source templates")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut mapping = TemplateFileMapping::new();
                while let Some((destination, source)) = access.next_entry::<String, String>()? {
                    mapping.insert(destination, source);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

fn default_true() -> bool {
    true
}

/// A registered distribution: a kernel/initrd pair plus boot files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distro {
    pub name: String,
    #[serde(default)]
    pub arch: Option<String>,
    pub kernel: PathBuf,
    pub initrd: PathBuf,
    #[serde(default)]
    pub kernel_options: Map<String, Value>,
    /// Boot files copied into the boot root for this distro
    #[serde(default)]
    pub template_files: TemplateFileMapping,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl Distro {
    pub fn new(
        name: impl Into<String>,
        kernel: impl Into<PathBuf>,
        initrd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            arch: None,
            kernel: kernel.into(),
            initrd: initrd.into(),
            kernel_options: Map::new(),
            template_files: TemplateFileMapping::new(),
            variables: Map::new(),
        }
    }

    pub fn with_template_file(mut self, destination: &str, source: &str) -> Self {
        self.template_files.insert(destination, source);
        self
    }

    pub fn with_kernel_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.kernel_options.insert(key.to_string(), value.into());
        self
    }

    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }
}

/// A network interface of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>, mac_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac_address: Some(mac_address.into()),
            ip_address: None,
        }
    }

    /// File name pxelinux looks up for this interface (`01-aa-bb-cc-dd-ee-ff`).
    ///
    /// `None` when the interface has no MAC address.
    pub fn pxe_file_name(&self) -> Option<String> {
        let mac = self.mac_address.as_deref()?.trim();
        if mac.is_empty() {
            return None;
        }
        Some(format!("01-{}", mac.to_lowercase().replace(':', "-")))
    }
}

/// A registered host booting one distro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub distro: String,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Whether the host boots the installer or falls through to local disk
    #[serde(default = "default_true")]
    pub netboot_enabled: bool,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub kernel_options: Map<String, Value>,
    /// Ad-hoc templates: destination path template to template source file
    #[serde(default)]
    pub template_files: TemplateFileMapping,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl Host {
    pub fn new(name: impl Into<String>, distro: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distro: distro.into(),
            hostname: None,
            netboot_enabled: true,
            interfaces: Vec::new(),
            kernel_options: Map::new(),
            template_files: TemplateFileMapping::new(),
            variables: Map::new(),
        }
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_template_file(mut self, destination: &str, source: &str) -> Self {
        self.template_files.insert(destination, source);
        self
    }

    pub fn with_kernel_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.kernel_options.insert(key.to_string(), value.into());
        self
    }

    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }

    pub fn with_netboot(mut self, enabled: bool) -> Self {
        self.netboot_enabled = enabled;
        self
    }
}

/// A standalone boot image staged under `images2/<name>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootImage {
    pub name: String,
    pub file: PathBuf,
}

/// Reject names that cannot be used as a path segment.
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == "."
        || name == ".."
        || name.chars().any(char::is_whitespace);
    if invalid {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mapping_keeps_declaration_order() {
        let mapping: TemplateFileMapping =
            toml::from_str("\"/z\" = \"/src/z\"\n\"/a\" = \"/src/a\"\n").unwrap();

        let destinations: Vec<&str> = mapping.iter().map(|(dest, _)| dest).collect();
        assert_eq!(destinations, vec!["/z", "/a"]);
    }

    #[test]
    fn test_mapping_insert_replaces_in_place() {
        let mut mapping: TemplateFileMapping =
            [("/a", "/src/a"), ("/b", "/src/b")].into_iter().collect();
        mapping.insert("/a", "/src/other");

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("/a"), Some("/src/other"));
        assert_eq!(mapping.iter().next(), Some(("/a", "/src/other")));
    }

    #[test]
    fn test_pxe_file_name_from_mac() {
        let interface = Interface::new("eth0", "AA:BB:CC:DD:EE:FF");
        assert_eq!(
            interface.pxe_file_name().as_deref(),
            Some("01-aa-bb-cc-dd-ee-ff")
        );
    }

    #[test]
    fn test_pxe_file_name_without_mac() {
        let interface = Interface {
            name: "eth1".to_string(),
            mac_address: None,
            ip_address: Some("10.0.0.5".to_string()),
        };
        assert_eq!(interface.pxe_file_name(), None);
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("host", "web01").is_ok());
        assert!(validate_name("host", "").is_err());
        assert!(validate_name("host", "../etc").is_err());
        assert!(validate_name("distro", "centos 9").is_err());
    }
}
