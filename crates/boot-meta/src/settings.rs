//! Boot server settings
//!
//! Locates the boot root, the web root and the boot loader sources, and
//! carries the server-wide defaults every blended view starts from.

use std::path::PathBuf;

use boot_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

fn default_server() -> String {
    "127.0.0.1".to_string()
}

fn default_tftpboot_location() -> PathBuf {
    PathBuf::from("/srv/tftpboot")
}

fn default_webdir() -> PathBuf {
    PathBuf::from("/var/www/bootsync")
}

fn default_bootloaders_dir() -> PathBuf {
    PathBuf::from("/var/lib/bootsync/loaders")
}

fn default_bootloaders() -> Vec<String> {
    ["pxelinux.0", "ldlinux.c32", "menu.c32"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_menu_title() -> String {
    "Network Boot Menu".to_string()
}

/// Settings for a boot server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootSettings {
    /// Address hosts use to reach this server
    #[serde(default = "default_server")]
    pub server: String,

    /// TFTP server handed out to booting hosts; defaults to `server`
    #[serde(default)]
    pub next_server: Option<String>,

    /// Root of the tree served over TFTP
    #[serde(default = "default_tftpboot_location")]
    pub tftpboot_location: PathBuf,

    /// Root of the tree served over HTTP
    #[serde(default = "default_webdir")]
    pub webdir: PathBuf,

    /// Directory boot loaders are staged from
    #[serde(default = "default_bootloaders_dir")]
    pub bootloaders_dir: PathBuf,

    /// Boot loader file names copied into the boot root on every full sync
    #[serde(default = "default_bootloaders")]
    pub bootloaders: Vec<String>,

    /// Title written at the top of the generated boot menu
    #[serde(default = "default_menu_title")]
    pub menu_title: String,

    /// Kernel options applied to every distro and host
    #[serde(default)]
    pub kernel_options: Map<String, Value>,

    /// Free-form variables available to every template
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl Default for BootSettings {
    fn default() -> Self {
        Self {
            server: default_server(),
            next_server: None,
            tftpboot_location: default_tftpboot_location(),
            webdir: default_webdir(),
            bootloaders_dir: default_bootloaders_dir(),
            bootloaders: default_bootloaders(),
            menu_title: default_menu_title(),
            kernel_options: Map::new(),
            variables: Map::new(),
        }
    }
}

impl BootSettings {
    /// Load settings from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        tracing::debug!(%path, "Loading boot settings");
        Ok(ConfigStore::new().load(path)?)
    }

    /// Settings rooted at a specific boot root, everything else default.
    pub fn with_boot_root(root: impl Into<PathBuf>) -> Self {
        Self {
            tftpboot_location: root.into(),
            ..Self::default()
        }
    }

    /// The boot root as a normalized path.
    pub fn boot_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.tftpboot_location)
    }

    /// The web root as a normalized path.
    pub fn web_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.webdir)
    }

    /// The TFTP server address handed to hosts.
    pub fn next_server(&self) -> &str {
        self.next_server.as_deref().unwrap_or(&self.server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: BootSettings = toml::from_str(r#"server = "10.0.0.1""#).unwrap();
        assert_eq!(settings.server, "10.0.0.1");
        assert_eq!(settings.tftpboot_location, PathBuf::from("/srv/tftpboot"));
        assert_eq!(settings.bootloaders.len(), 3);
    }

    #[test]
    fn test_next_server_falls_back_to_server() {
        let mut settings = BootSettings::default();
        assert_eq!(settings.next_server(), "127.0.0.1");

        settings.next_server = Some("10.0.0.2".to_string());
        assert_eq!(settings.next_server(), "10.0.0.2");
    }
}
