//! Boot-file copier
//!
//! Copies the files a distro declares in its `template_files` mapping into
//! the boot tree. Each entry maps a destination template to a source
//! template; the rendered source may be a glob, in which case every match
//! lands next to the rendered destination under its own file name.
//!
//! Failures are recorded per file in a [`CopyReport`] and never abort the
//! remaining entries.

use std::fmt;

use boot_fs::{CopyStatus, NormalizedPath, expand_glob, io, is_glob_pattern};
use boot_meta::{BootSettings, Distro, Entity};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;
use crate::context::SyncContext;

/// A concrete source to destination copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCopyTask {
    pub source: NormalizedPath,
    pub destination: NormalizedPath,
}

/// A copy that did not happen, with enough context to find it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub distro: String,
    pub source: String,
    pub destination: String,
    pub message: String,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to copy {} to {} for {}: {}",
            self.source, self.destination, self.distro, self.message
        )
    }
}

/// Result of one template-file entry or one matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied(ResolvedCopyTask),
    /// Destination already existed and was left alone
    Skipped(ResolvedCopyTask),
    /// The rendered source matched nothing
    NoMatch { source: String, destination: String },
    Failed(CopyFailure),
}

/// Per-distro batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub distro: String,
    pub outcomes: Vec<CopyOutcome>,
}

impl CopyReport {
    pub fn new(distro: impl Into<String>) -> Self {
        Self {
            distro: distro.into(),
            outcomes: Vec::new(),
        }
    }

    /// Number of files a copy was attempted for, failed ones included.
    pub fn attempted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o, CopyOutcome::NoMatch { .. }))
            .count()
    }

    pub fn copied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CopyOutcome::Copied(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CopyOutcome::Skipped(_)))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CopyFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            CopyOutcome::Failed(failure) => Some(failure),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Variables every distro template sees besides its blended configuration.
pub fn image_variables(settings: &BootSettings, distro: &Distro) -> Map<String, Value> {
    let mut vars = Map::new();
    vars.insert(
        "local_img_path".into(),
        Value::String(settings.boot_root().join("images").join(&distro.name).to_string()),
    );
    vars.insert(
        "web_img_path".into(),
        Value::String(
            settings
                .web_root()
                .join("distro_mirror")
                .join(&distro.name)
                .to_string(),
        ),
    );
    vars
}

/// Map a rendered destination/source pair to concrete copy tasks.
///
/// A source without glob metacharacters is a literal path: when it exists
/// the destination is used verbatim, otherwise there is nothing to copy.
/// A wildcard source sends each match to the destination's directory under
/// the match's own file name.
pub fn resolve_copy_tasks(
    destination: &str,
    source: &str,
) -> boot_fs::Result<Vec<ResolvedCopyTask>> {
    if !is_glob_pattern(source) {
        let literal = NormalizedPath::new(source);
        if !literal.exists() {
            return Ok(Vec::new());
        }
        return Ok(vec![ResolvedCopyTask {
            source: literal,
            destination: NormalizedPath::new(destination),
        }]);
    }

    let matches = expand_glob(source)?;
    let destination = NormalizedPath::new(destination);
    let tasks = matches
        .into_iter()
        .filter_map(|matched| {
            let name = matched.file_name()?.to_string();
            let target = if destination.as_str().ends_with('/') {
                destination.join(&name)
            } else {
                destination.with_file_name(&name)
            };
            Some(ResolvedCopyTask {
                source: matched,
                destination: target,
            })
        })
        .collect();
    Ok(tasks)
}

/// Copies a distro's template files into the boot tree.
pub struct BootFileCopier<'a> {
    ctx: SyncContext<'a>,
}

impl<'a> BootFileCopier<'a> {
    pub fn new(ctx: SyncContext<'a>) -> Self {
        Self { ctx }
    }

    /// Copy every file declared in the distro's template-file mapping.
    ///
    /// Per-file failures are logged and recorded in the report; only a
    /// failure to blend the distro's configuration is returned as an error.
    pub fn copy_distro_files(&self, distro: &Distro) -> Result<CopyReport> {
        let blended = self.ctx.resolver.blend(Entity::Distro(distro), false)?;
        let mapping = blended.template_files()?;

        let mut vars = blended.as_map().clone();
        vars.extend(image_variables(self.ctx.settings, distro));

        tracing::info!(
            distro = %distro.name,
            entries = mapping.len(),
            "Processing template files"
        );

        let mut report = CopyReport::new(&distro.name);
        for (destination, source) in mapping.iter() {
            self.copy_entry(distro, destination, source, &vars, &mut report);
        }
        Ok(report)
    }

    fn copy_entry(
        &self,
        distro: &Distro,
        destination_template: &str,
        source_template: &str,
        vars: &Map<String, Value>,
        report: &mut CopyReport,
    ) {
        let rendered = self
            .ctx
            .renderer
            .render(destination_template, vars, None)
            .and_then(|dest| {
                let src = self.ctx.renderer.render(source_template, vars, None)?;
                Ok((dest, src))
            });
        let (destination, source) = match rendered {
            Ok(pair) => pair,
            Err(e) => {
                record_failure(report, distro, source_template, destination_template, &e);
                return;
            }
        };

        let tasks = match resolve_copy_tasks(&destination, &source) {
            Ok(tasks) => tasks,
            Err(e) => {
                record_failure(report, distro, &source, &destination, &e);
                return;
            }
        };

        if tasks.is_empty() {
            tracing::warn!(distro = %distro.name, %source, %destination, "Source matched no files");
            report.outcomes.push(CopyOutcome::NoMatch {
                source,
                destination,
            });
            return;
        }

        for task in tasks {
            match copy_task(&task) {
                Ok(CopyStatus::Copied) => {
                    tracing::info!(
                        distro = %distro.name,
                        source = %task.source,
                        destination = %task.destination,
                        "Copied boot file"
                    );
                    report.outcomes.push(CopyOutcome::Copied(task));
                }
                Ok(CopyStatus::Skipped) => {
                    tracing::debug!(
                        distro = %distro.name,
                        destination = %task.destination,
                        "Destination exists, skipping"
                    );
                    report.outcomes.push(CopyOutcome::Skipped(task));
                }
                Err(e) => {
                    record_failure(
                        report,
                        distro,
                        task.source.as_str(),
                        task.destination.as_str(),
                        &e,
                    );
                }
            }
        }
    }
}

fn copy_task(task: &ResolvedCopyTask) -> boot_fs::Result<CopyStatus> {
    if let Some(parent) = task.destination.parent()
        && !parent.is_dir()
    {
        io::ensure_dir(&parent)?;
    }
    io::copy_if_absent(&task.source, &task.destination)
}

fn record_failure(
    report: &mut CopyReport,
    distro: &Distro,
    source: &str,
    destination: &str,
    error: &dyn std::error::Error,
) {
    let failure = CopyFailure {
        distro: distro.name.clone(),
        source: source.to_string(),
        destination: destination.to_string(),
        message: error.to_string(),
    };
    tracing::error!(
        distro = %failure.distro,
        source = %failure.source,
        destination = %failure.destination,
        error = %failure.message,
        "Failed to copy boot file"
    );
    report.outcomes.push(CopyOutcome::Failed(failure));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    use boot_meta::{InMemoryRegistry, InheritanceResolver};

    use crate::{PlaceholderRenderer, PxeGenerator};

    fn copy_with_defaults(settings: &BootSettings, distro: &Distro) -> CopyReport {
        let mut registry = InMemoryRegistry::new();
        registry.add_distro(distro.clone()).unwrap();
        let resolver = InheritanceResolver::new(settings, &registry);
        let renderer = PlaceholderRenderer::new();
        let generator = PxeGenerator::new(settings, &registry, &resolver, &renderer);
        let ctx = SyncContext::new(settings, &registry, &resolver, &renderer, &generator);
        BootFileCopier::new(ctx).copy_distro_files(distro).unwrap()
    }

    #[test]
    fn test_literal_source_keeps_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("cfg.txt");
        fs::write(&source, "cfg").unwrap();
        let source = NormalizedPath::new(&source);

        let tasks = resolve_copy_tasks("/boot/custom-name", source.as_str()).unwrap();

        assert_eq!(
            tasks,
            vec![ResolvedCopyTask {
                source,
                destination: NormalizedPath::new("/boot/custom-name"),
            }]
        );
    }

    #[test]
    fn test_glob_source_uses_match_basenames() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("cfg.txt"), "t").unwrap();
        fs::write(temp.path().join("cfg.bin"), "b").unwrap();
        let root = NormalizedPath::new(temp.path());

        let tasks = resolve_copy_tasks("/boot/cfg", root.join("cfg.*").as_str()).unwrap();

        let destinations: Vec<&str> = tasks.iter().map(|t| t.destination.as_str()).collect();
        assert_eq!(destinations, vec!["/boot/cfg.bin", "/boot/cfg.txt"]);
    }

    #[test]
    fn test_glob_into_directory_destination() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.c32"), "a").unwrap();
        let root = NormalizedPath::new(temp.path());

        let tasks = resolve_copy_tasks("/boot/loaders/", root.join("*.c32").as_str()).unwrap();

        assert_eq!(tasks[0].destination.as_str(), "/boot/loaders/a.c32");
    }

    #[test]
    fn test_literal_source_with_doubled_separator_keeps_destination() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dvd")).unwrap();
        fs::write(temp.path().join("dvd").join("vmlinuz"), "kernel").unwrap();
        let tree = format!("{}/dvd/", NormalizedPath::new(temp.path()));
        let source = format!("{tree}/vmlinuz");

        let tasks = resolve_copy_tasks("/boot/kernel-custom", &source).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].destination.as_str(), "/boot/kernel-custom");
        assert!(tasks[0].source.is_file());
    }

    #[test]
    fn test_missing_literal_source_resolves_to_nothing() {
        let tasks = resolve_copy_tasks("/boot/x", "/definitely/not/here").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_image_variables_are_namespaced_by_distro() {
        let mut settings = BootSettings::with_boot_root("/srv/tftpboot");
        settings.webdir = "/var/www/boot".into();
        let distro = Distro::new("d1", "/k", "/i");

        let vars = image_variables(&settings, &distro);

        assert_eq!(vars["local_img_path"], "/srv/tftpboot/images/d1");
        assert_eq!(vars["web_img_path"], "/var/www/boot/distro_mirror/d1");
    }

    #[test]
    fn test_report_counts() {
        let task = ResolvedCopyTask {
            source: NormalizedPath::new("/a"),
            destination: NormalizedPath::new("/b"),
        };
        let mut report = CopyReport::new("d1");
        report.outcomes.push(CopyOutcome::Copied(task.clone()));
        report.outcomes.push(CopyOutcome::Skipped(task));
        report.outcomes.push(CopyOutcome::NoMatch {
            source: "/x*".into(),
            destination: "/y".into(),
        });
        report.outcomes.push(CopyOutcome::Failed(CopyFailure {
            distro: "d1".into(),
            source: "/s".into(),
            destination: "/d".into(),
            message: "boom".into(),
        }));

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.copied(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    #[traced_test]
    fn test_zero_matches_is_logged_not_failed() {
        let temp = TempDir::new().unwrap();
        let settings = BootSettings::with_boot_root(temp.path().join("tftpboot"));
        let pattern = NormalizedPath::new(temp.path()).join("nothing-*.cfg");
        let distro = Distro::new("d1", "/k", "/i")
            .with_template_file("{{ local_img_path }}/nothing.cfg", pattern.as_str());

        let report = copy_with_defaults(&settings, &distro);

        assert_eq!(report.attempted(), 0);
        assert!(report.is_clean());
        assert!(logs_contain("Source matched no files"));
    }

    #[test]
    #[traced_test]
    fn test_unreadable_source_is_recorded_and_logged() {
        let temp = TempDir::new().unwrap();
        let settings = BootSettings::with_boot_root(temp.path().join("tftpboot"));
        // A directory matches the glob but cannot be copied as a file
        let source_dir = temp.path().join("not-a-file");
        fs::create_dir(&source_dir).unwrap();
        let source = NormalizedPath::new(&source_dir);
        let distro = Distro::new("d1", "/k", "/i")
            .with_template_file("{{ local_img_path }}/copy", source.as_str());

        let report = copy_with_defaults(&settings, &distro);

        assert_eq!(report.attempted(), 1);
        let failures: Vec<&CopyFailure> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].distro, "d1");
        assert!(logs_contain("Failed to copy boot file"));
    }
}
