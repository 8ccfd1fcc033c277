//! Variable blending
//!
//! Builds the flattened variable view of a distro or host by layering the
//! server settings, the distro and (for hosts) the host itself, with later
//! layers overriding earlier ones and objects merged key by key.

use serde_json::{Map, Value};

use crate::item::TemplateFileMapping;
use crate::{BootSettings, Distro, Error, Host, Registry, Result};

/// The record a blended view is built for.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Distro(&'a Distro),
    Host(&'a Host),
}

impl Entity<'_> {
    pub fn name(&self) -> &str {
        match self {
            Entity::Distro(d) => &d.name,
            Entity::Host(h) => &h.name,
        }
    }
}

/// Read-only mapping from variable name to value.
///
/// Built fresh for every sync operation so configuration edits are always
/// picked up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlendedConfig {
    values: Map<String, Value>,
}

impl BlendedConfig {
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The blended `template_files` mapping, empty when absent.
    ///
    /// Only meaningful for a non-collapsed view; a collapsed view carries
    /// the mapping as a flat string and yields an error here.
    pub fn template_files(&self) -> Result<TemplateFileMapping> {
        match self.values.get("template_files") {
            None | Some(Value::Null) => Ok(TemplateFileMapping::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| Error::Blend {
                name: "template_files".to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Produces the blended view of a record.
pub trait VariableResolver {
    /// Blend `entity` with everything it inherits from.
    ///
    /// With `collapse` set, structured values are flattened into strings
    /// suitable for a kernel command line; otherwise they stay structured.
    fn blend(&self, entity: Entity<'_>, collapse: bool) -> Result<BlendedConfig>;
}

/// Resolver layering settings, distro and host.
pub struct InheritanceResolver<'a> {
    settings: &'a BootSettings,
    registry: &'a dyn Registry,
}

impl<'a> InheritanceResolver<'a> {
    pub fn new(settings: &'a BootSettings, registry: &'a dyn Registry) -> Self {
        Self { settings, registry }
    }

    fn settings_layer(&self) -> Map<String, Value> {
        let settings = self.settings;
        let mut layer = Map::new();
        layer.insert("server".into(), Value::String(settings.server.clone()));
        layer.insert(
            "next_server".into(),
            Value::String(settings.next_server().to_string()),
        );
        layer.insert(
            "tftpboot_location".into(),
            Value::String(settings.boot_root().to_string()),
        );
        layer.insert(
            "webdir".into(),
            Value::String(settings.web_root().to_string()),
        );
        layer.insert(
            "kernel_options".into(),
            Value::Object(settings.kernel_options.clone()),
        );
        for (key, value) in &settings.variables {
            layer.insert(key.clone(), value.clone());
        }
        layer
    }
}

impl VariableResolver for InheritanceResolver<'_> {
    fn blend(&self, entity: Entity<'_>, collapse: bool) -> Result<BlendedConfig> {
        let mut values = self.settings_layer();

        match entity {
            Entity::Distro(distro) => {
                merge_layer(&mut values, record_layer(&distro.name, distro)?);
            }
            Entity::Host(host) => {
                let distro =
                    self.registry
                        .find_distro(&host.distro)
                        .ok_or_else(|| Error::UnknownDistro {
                            host: host.name.clone(),
                            distro: host.distro.clone(),
                        })?;
                merge_layer(&mut values, record_layer(&distro.name, distro)?);
                merge_layer(&mut values, record_layer(&host.name, host)?);
            }
        }

        if collapse {
            for value in values.values_mut() {
                *value = collapse_value(value);
            }
        }
        tracing::trace!(entity = entity.name(), collapse, keys = values.len(), "Blended variables");
        Ok(BlendedConfig::from_map(values))
    }
}

/// Serialize a record into a layer, hoisting its free-form `variables` to
/// the top level.
fn record_layer<T: serde::Serialize>(name: &str, record: &T) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(record).map_err(|e| Error::Blend {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    let Value::Object(mut layer) = value else {
        return Err(Error::Blend {
            name: name.to_string(),
            message: "record did not serialize to an object".to_string(),
        });
    };
    if let Some(Value::Object(variables)) = layer.remove("variables") {
        for (key, value) in variables {
            layer.insert(key, value);
        }
    }
    Ok(layer)
}

fn merge_layer(base: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        match base.get_mut(&key) {
            Some(existing) => deep_merge_value(existing, &value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

/// Flatten a structured value into its command-line string form.
///
/// Objects become `key=value` pairs (`key` alone for null or empty values,
/// one pair per element for arrays); arrays become space-separated items.
/// Scalars are left untouched.
fn collapse_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut parts = Vec::new();
            for (key, item) in map {
                match item {
                    Value::Null => parts.push(key.clone()),
                    Value::String(s) if s.is_empty() => parts.push(key.clone()),
                    Value::Array(items) => {
                        for element in items {
                            parts.push(format!("{}={}", key, scalar_string(element)));
                        }
                    }
                    other => parts.push(format!("{}={}", key, scalar_string(other))),
                }
            }
            Value::String(parts.join(" "))
        }
        Value::Array(items) => Value::String(
            items
                .iter()
                .map(scalar_string)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        other => other.clone(),
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
