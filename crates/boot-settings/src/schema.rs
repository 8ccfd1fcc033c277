//! Typed settings schema
//!
//! A [`Schema`] lists the keys a settings document may carry, their types,
//! and defaults for optional keys. Normalizing a document coerces values
//! to the declared types and fills in defaults; anything that cannot be
//! coerced, any missing required key and any unknown key is a violation.

use serde_json::{Map, Number, Value};

/// Declared type of a settings value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Str,
    List,
    Map,
    Any,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::Str => "string",
            FieldKind::List => "list",
            FieldKind::Map => "map",
            FieldKind::Any => "any",
        }
    }

    /// Coerce `value` to this kind, or `None` when it cannot be.
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (FieldKind::Any, v) => Some(v.clone()),
            (FieldKind::Bool, Value::Bool(b)) => Some(Value::Bool(*b)),
            (FieldKind::Bool, Value::String(s)) => parse_bool(s).map(Value::Bool),
            (FieldKind::Bool, Value::Number(n)) => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            (FieldKind::Int, Value::Number(n)) => n.as_i64().map(|i| Value::Number(i.into())),
            (FieldKind::Int, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .ok()
                .map(|i| Value::Number(Number::from(i))),
            (FieldKind::Str, Value::String(s)) => Some(Value::String(s.clone())),
            (FieldKind::Str, Value::Number(n)) => Some(Value::String(n.to_string())),
            (FieldKind::List, Value::Array(items)) => Some(Value::Array(items.clone())),
            (FieldKind::Map, Value::Object(map)) => Some(Value::Object(map.clone())),
            _ => None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// One key of the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Value used when the key is absent; `None` makes the key required
    pub default: Option<Value>,
}

impl Field {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, default: impl Into<Value>) -> Self {
        Self {
            name,
            kind,
            default: Some(default.into()),
        }
    }
}

/// A versioned settings schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    version: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(version: &'static str, fields: Vec<Field>) -> Self {
        Self { version, fields }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Coerce `settings` into the schema.
    ///
    /// Returns the normalized document with keys in schema order, or every
    /// violation found.
    pub fn normalize(
        &self,
        settings: &Map<String, Value>,
    ) -> std::result::Result<Map<String, Value>, Vec<String>> {
        let mut violations = Vec::new();

        for key in settings.keys() {
            if self.field(key).is_none() {
                violations.push(format!("unknown key '{}'", key));
            }
        }

        let mut normalized = Map::new();
        for field in &self.fields {
            match (settings.get(field.name), &field.default) {
                (Some(value), _) => match field.kind.coerce(value) {
                    Some(coerced) => {
                        normalized.insert(field.name.to_string(), coerced);
                    }
                    None => violations.push(format!(
                        "key '{}' expects {}, got {}",
                        field.name,
                        field.kind.name(),
                        value
                    )),
                },
                (None, Some(default)) => {
                    normalized.insert(field.name.to_string(), default.clone());
                }
                (None, None) => violations.push(format!("missing required key '{}'", field.name)),
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(violations)
        }
    }
}
