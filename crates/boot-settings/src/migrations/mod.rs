//! Settings migrations
//!
//! Each migration knows the schema of its version and how to bring a
//! document (and any auxiliary files) up to it.

mod v3_0_0;
mod v3_0_1;

use boot_fs::NormalizedPath;
use serde_json::{Map, Value};

use crate::schema::Schema;
use crate::{Error, Result};

pub use v3_0_0::V3_0_0;
pub use v3_0_1::V3_0_1;

/// Well-known location of the module configuration file.
pub const DEFAULT_MODULES_CONF: &str = "/etc/bootsync/modules.conf";

/// Every known version, oldest first.
pub const VERSIONS: &[&str] = &[v3_0_0::VERSION, v3_0_1::VERSION];

/// A one-shot transform to a settings version.
pub trait Migration {
    fn schema(&self) -> &Schema;

    fn version(&self) -> &'static str {
        self.schema().version()
    }

    /// Whether `settings` conforms to this version's schema. Never fails.
    fn validate(&self, settings: &Map<String, Value>) -> bool {
        self.schema().normalize(settings).is_ok()
    }

    /// The schema-coerced document, or [`Error::Schema`].
    fn normalize(&self, settings: Map<String, Value>) -> Result<Map<String, Value>> {
        self.schema()
            .normalize(&settings)
            .map_err(|violations| Error::Schema {
                version: self.version().to_string(),
                violations,
            })
    }

    /// Upgrade `settings` to this version.
    fn migrate(&self, settings: Map<String, Value>) -> Result<Map<String, Value>>;

    /// Normalize for a migration, reporting violations as
    /// [`Error::MigrationSchema`].
    fn validated(&self, settings: Map<String, Value>) -> Result<Map<String, Value>> {
        self.schema()
            .normalize(&settings)
            .map_err(|violations| Error::MigrationSchema {
                version: self.version().to_string(),
                violations,
            })
    }
}

/// Migration for `version` using the default `modules.conf` location.
pub fn find(version: &str) -> Option<Box<dyn Migration>> {
    find_with(version, NormalizedPath::new(DEFAULT_MODULES_CONF))
}

/// Migration for `version` rewriting `modules_conf` where applicable.
pub fn find_with(version: &str, modules_conf: NormalizedPath) -> Option<Box<dyn Migration>> {
    match version {
        v3_0_0::VERSION => Some(Box::new(V3_0_0::new())),
        v3_0_1::VERSION => Some(Box::new(V3_0_1::new(modules_conf))),
        _ => None,
    }
}

/// Migrate `settings` to `version`.
pub fn migrate_to(
    settings: Map<String, Value>,
    version: &str,
    modules_conf: &NormalizedPath,
) -> Result<Map<String, Value>> {
    let migration = find_with(version, modules_conf.clone()).ok_or_else(|| Error::UnknownVersion {
        version: version.to_string(),
    })?;
    tracing::info!(version, "Migrating settings");
    migration.migrate(settings)
}
