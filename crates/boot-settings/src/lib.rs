//! Settings schema and migrations for bootsync
//!
//! Validates a persisted settings document against a versioned schema and
//! upgrades the auxiliary `modules.conf` file in lockstep. Independent of
//! the sync pipeline.

pub mod error;
pub mod migrations;
pub mod modules_conf;
pub mod schema;

use boot_fs::{ConfigStore, NormalizedPath};
use serde_json::{Map, Value};

pub use error::{Error, Result};
pub use migrations::{DEFAULT_MODULES_CONF, Migration, V3_0_0, V3_0_1, find, migrate_to};
pub use schema::{Field, FieldKind, Schema};

/// Load a settings document as an untyped mapping.
///
/// The format follows the file extension (`.yaml`, `.yml`, `.json` or
/// `.toml`).
pub fn load_document(path: &NormalizedPath) -> Result<Map<String, Value>> {
    let value: Value = ConfigStore::new().load(path)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::NotAMapping {
            found: kind_name(&other).to_string(),
        }),
    }
}

/// Write a settings document in the format given by the file extension.
pub fn save_document(path: &NormalizedPath, document: &Map<String, Value>) -> Result<()> {
    ConfigStore::new().save(path, document)?;
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
