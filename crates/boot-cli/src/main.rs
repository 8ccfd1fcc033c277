//! bootsync CLI
//!
//! The command-line interface for keeping a boot server's TFTP tree in step
//! with its registry of distros and hosts.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, SettingsAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = boot_core::logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command.clone() {
        Some(cmd) => execute_command(&cli, cmd),
        None => {
            println!("{} boot tree synchronizer", "bootsync".green().bold());
            println!();
            println!("Run {} for available commands.", "bootsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cli: &Cli, cmd: Commands) -> Result<()> {
    let (settings, registry) = (cli.settings.as_path(), cli.registry.as_path());
    match cmd {
        Commands::Sync { json } => commands::run_sync(settings, registry, json),
        Commands::SyncHosts { hosts, json } => {
            commands::run_sync_hosts(settings, registry, &hosts, cli.verbose, json)
        }
        Commands::AddDistro { name } => commands::run_add_distro(settings, registry, &name),
        Commands::CopyBootFiles { json } => commands::run_copy_boot_files(settings, registry, json),
        Commands::Menu { list } => commands::run_menu(settings, registry, list),
        Commands::Settings { action } => match action {
            SettingsAction::Validate { path, version } => {
                commands::run_settings_validate(&path, &version)
            }
            SettingsAction::Migrate {
                path,
                version,
                modules_conf,
                output,
            } => commands::run_settings_migrate(&path, &version, &modules_conf, output.as_deref()),
        },
    }
}
