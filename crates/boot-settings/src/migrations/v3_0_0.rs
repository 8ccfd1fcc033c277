//! Base settings schema, version 3.0.0

use serde_json::{Map, Value};

use super::Migration;
use crate::Result;
use crate::schema::{Field, FieldKind, Schema};

pub const VERSION: &str = "3.0.0";

/// Keys and types of a 3.0.0 settings document.
pub fn schema() -> Schema {
    Schema::new(
        VERSION,
        vec![
            Field::required("server", FieldKind::Str),
            Field::required("next_server", FieldKind::Str),
            Field::optional("tftpboot_location", FieldKind::Str, "/srv/tftpboot"),
            Field::optional("webdir", FieldKind::Str, "/var/www/bootsync"),
            Field::optional("bootloaders_dir", FieldKind::Str, "/var/lib/bootsync/loaders"),
            Field::optional("http_port", FieldKind::Int, 80),
            Field::optional("manage_dhcp", FieldKind::Bool, false),
            Field::optional("manage_dns", FieldKind::Bool, false),
            Field::optional("manage_tftpd", FieldKind::Bool, true),
            Field::optional("enable_menu", FieldKind::Bool, true),
            Field::optional("pxe_just_once", FieldKind::Bool, true),
            Field::optional("default_virt_ram", FieldKind::Int, 512),
            Field::optional("auth_token_expiration", FieldKind::Int, 3600),
            Field::optional("kernel_options", FieldKind::Map, Value::Object(Map::new())),
            Field::optional("build_reporting_email", FieldKind::List, Vec::<Value>::new()),
            Field::optional("default_ownership", FieldKind::List, vec![Value::from("admin")]),
            Field::optional("default_kickstart", FieldKind::Any, Value::Null),
        ],
    )
}

/// The first versioned schema; migrating to it only normalizes.
#[derive(Debug, Clone)]
pub struct V3_0_0 {
    schema: Schema,
}

impl V3_0_0 {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for V3_0_0 {
    fn default() -> Self {
        Self::new()
    }
}

impl Migration for V3_0_0 {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn migrate(&self, settings: Map<String, Value>) -> Result<Map<String, Value>> {
        self.validated(settings)
    }
}
