//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bootsync - Keep a TFTP/PXE boot tree in step with its registry
#[derive(Parser, Debug)]
#[command(name = "bootsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Boot server settings file (TOML, JSON or YAML)
    #[arg(
        long,
        global = true,
        env = "BOOTSYNC_SETTINGS",
        default_value = "/etc/bootsync/settings.yaml"
    )]
    pub settings: PathBuf,

    /// Registry of distros, hosts and images
    #[arg(
        long,
        global = true,
        env = "BOOTSYNC_REGISTRY",
        default_value = "/etc/bootsync/registry.yaml"
    )]
    pub registry: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Regenerate the whole boot tree
    ///
    /// Stages boot loaders, copies every distro's boot files and images,
    /// writes every host's boot configuration and rebuilds the menu.
    Sync {
        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write boot configuration for selected hosts only
    ///
    /// Examples:
    ///   bootsync sync-hosts web01 db01
    ///   bootsync sync-hosts 'web*'     # must match exactly one host
    SyncHosts {
        /// Host names or patterns, processed in order
        #[arg(required = true)]
        hosts: Vec<String>,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stage one distro's kernel, initrd and boot files
    AddDistro {
        /// Name of a registered distro
        name: String,
    },

    /// Copy every distro's template files without touching host configs
    CopyBootFiles {
        /// Output the copy reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the boot menu
    Menu {
        /// Print the menu entries instead of writing the menu
        #[arg(long)]
        list: bool,
    },

    /// Validate or migrate a settings document
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Settings document actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Check a settings document against a schema version
    Validate {
        /// Settings document to check
        path: PathBuf,

        /// Schema version
        #[arg(long, default_value = "3.0.1")]
        version: String,
    },

    /// Migrate a settings document and its module configuration
    Migrate {
        /// Settings document to migrate
        path: PathBuf,

        /// Target version
        #[arg(long, default_value = "3.0.1")]
        version: String,

        /// Module configuration rewritten alongside the document
        #[arg(long, default_value = boot_settings::DEFAULT_MODULES_CONF)]
        modules_conf: PathBuf,

        /// Where to write the migrated document (defaults to PATH)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_hosts_keeps_order() {
        let cli = Cli::parse_from(["bootsync", "sync-hosts", "web02", "web01"]);
        assert_eq!(
            cli.command,
            Some(Commands::SyncHosts {
                hosts: vec!["web02".to_string(), "web01".to_string()],
                json: false,
            })
        );
    }

    #[test]
    fn parse_global_paths_after_subcommand() {
        let cli = Cli::parse_from(["bootsync", "sync", "--registry", "/tmp/r.yaml"]);
        assert_eq!(cli.registry, PathBuf::from("/tmp/r.yaml"));
    }

    #[test]
    fn parse_settings_migrate_defaults() {
        let cli = Cli::parse_from(["bootsync", "settings", "migrate", "settings.yaml"]);
        match cli.command {
            Some(Commands::Settings {
                action:
                    SettingsAction::Migrate {
                        version,
                        modules_conf,
                        output,
                        ..
                    },
            }) => {
                assert_eq!(version, "3.0.1");
                assert_eq!(modules_conf, PathBuf::from("/etc/bootsync/modules.conf"));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
