//! Settings validate and migrate command implementations

use std::path::Path;

use colored::Colorize;

use boot_fs::NormalizedPath;
use boot_settings::{Error as SettingsError, load_document, migrate_to, save_document};

use crate::error::{CliError, Result};

/// Run the settings validate command
pub fn run_settings_validate(path: &Path, version: &str) -> Result<()> {
    let migration = boot_settings::find(version)
        .ok_or_else(|| CliError::user(format!("Unknown settings version: {}", version)))?;
    let document = load_document(&NormalizedPath::new(path))?;

    match migration.normalize(document) {
        Ok(_) => {
            println!(
                "{} {} is valid for {}",
                "OK".green().bold(),
                path.display(),
                version
            );
            Ok(())
        }
        Err(SettingsError::Schema { violations, .. }) => {
            println!("{} {} is not valid for {}:", "INVALID".red().bold(), path.display(), version);
            for violation in &violations {
                println!("   {} {}", "!".red(), violation);
            }
            Err(CliError::user("Settings validation failed"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the settings migrate command
pub fn run_settings_migrate(
    path: &Path,
    version: &str,
    modules_conf: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let source = NormalizedPath::new(path);
    let document = load_document(&source)?;
    let migrated = migrate_to(document, version, &NormalizedPath::new(modules_conf))?;

    let destination = output.map(NormalizedPath::new).unwrap_or(source);
    save_document(&destination, &migrated)?;

    println!(
        "{} Migrated settings to {} ({})",
        "OK".green().bold(),
        version,
        destination
    );
    Ok(())
}
