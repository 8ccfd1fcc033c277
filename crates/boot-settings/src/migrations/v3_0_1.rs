//! Settings version 3.0.1
//!
//! The document schema is unchanged from 3.0.0. The migration renames the
//! module identifiers in `modules.conf` to their dotted form.

use boot_fs::NormalizedPath;
use serde_json::{Map, Value};

use super::{Migration, v3_0_0};
use crate::Result;
use crate::modules_conf;
use crate::schema::Schema;

pub const VERSION: &str = "3.0.1";

#[derive(Debug, Clone)]
pub struct V3_0_1 {
    schema: Schema,
    modules_conf: NormalizedPath,
}

impl V3_0_1 {
    pub fn new(modules_conf: NormalizedPath) -> Self {
        let base = v3_0_0::schema();
        Self {
            schema: Schema::new(VERSION, base.fields().to_vec()),
            modules_conf,
        }
    }

    pub fn modules_conf(&self) -> &NormalizedPath {
        &self.modules_conf
    }
}

impl Migration for V3_0_1 {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate the document, then rewrite `modules.conf`.
    ///
    /// An invalid document fails before the file is touched.
    fn migrate(&self, settings: Map<String, Value>) -> Result<Map<String, Value>> {
        let normalized = self.validated(settings)?;
        let renamed = modules_conf::rewrite(&self.modules_conf)?;
        tracing::info!(path = %self.modules_conf, renamed, "Rewrote module configuration");
        Ok(normalized)
    }
}
