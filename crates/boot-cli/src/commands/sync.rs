//! Sync, host, distro and menu command implementations

use std::path::Path;

use colored::Colorize;

use boot_core::{BootConfigGenerator, CopyOutcome, CopyReport, SyncReport};
use boot_meta::Registry;

use super::Workspace;
use crate::error::{CliError, Result};

/// Run the sync command
pub fn run_sync(settings: &Path, registry: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::load(settings, registry)?;
    if !json {
        println!("{} Synchronizing boot tree...", "=>".blue().bold());
    }

    let report = workspace.with_engine(|engine| Ok(engine.sync_all()?))?;
    print_report(&report, json)
}

/// Run the sync-hosts command
pub fn run_sync_hosts(
    settings: &Path,
    registry: &Path,
    hosts: &[String],
    verbose: bool,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::load(settings, registry)?;
    if !json {
        println!("{} Synchronizing {} host(s)...", "=>".blue().bold(), hosts.len());
    }

    let report = workspace.with_engine(|engine| Ok(engine.sync_hosts(hosts, verbose)?))?;
    print_report(&report, json)
}

/// Run the add-distro command
pub fn run_add_distro(settings: &Path, registry: &Path, name: &str) -> Result<()> {
    let workspace = Workspace::load(settings, registry)?;
    let distro = workspace
        .registry
        .find_distro(name)
        .ok_or_else(|| CliError::user(format!("Distro not found: {}", name)))?;

    println!("{} Adding distro {}...", "=>".blue().bold(), name.cyan());
    let report = workspace.with_engine(|engine| Ok(engine.add_distro(distro)?))?;
    print_copy_report(&report);

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::user(format!("Some files for {} could not be copied", name)))
    }
}

/// Run the copy-boot-files command
pub fn run_copy_boot_files(settings: &Path, registry: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::load(settings, registry)?;
    let reports = workspace.with_engine(|engine| Ok(engine.copy_all_distro_files()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for report in &reports {
        print_copy_report(report);
    }
    Ok(())
}

/// Run the menu command
pub fn run_menu(settings: &Path, registry: &Path, list: bool) -> Result<()> {
    let workspace = Workspace::load(settings, registry)?;

    workspace.with_generator(|generator| {
        let items = generator.compute_menu_items()?;
        if list {
            for entry in &items.entries {
                println!("{} {}", entry.label().cyan(), entry.kernel.dimmed());
            }
        } else {
            let checksum = generator.regenerate_menu(&items)?;
            println!("{} Menu regenerated ({})", "OK".green().bold(), checksum.dimmed());
        }
        Ok(())
    })
}

fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{} Synchronization complete:", "OK".green().bold());
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    if !report.errors.is_empty() {
        println!();
        println!("{} Some steps reported errors:", "WARN".yellow().bold());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
    }
    Ok(())
}

fn print_copy_report(report: &CopyReport) {
    println!(
        "{} {}: {} copied, {} skipped",
        "=>".blue().bold(),
        report.distro.cyan(),
        report.copied(),
        report.skipped()
    );
    for outcome in &report.outcomes {
        match outcome {
            CopyOutcome::Copied(task) => println!("   {} {}", "+".green(), task.destination),
            CopyOutcome::Skipped(_) => {}
            CopyOutcome::NoMatch { source, .. } => {
                println!("   {} no files match {}", "-".yellow(), source)
            }
            CopyOutcome::Failed(failure) => println!("   {} {}", "!".red(), failure),
        }
    }
}
