//! Template rendering
//!
//! Paths in template-file mappings, kernel options and host templates are
//! rendered through a [`TemplateRenderer`]. The bundled
//! [`PlaceholderRenderer`] substitutes `{{ name }}` and `{{ a.b.c }}`
//! placeholders and nothing more.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Renders a template string against a variable mapping.
///
/// Implementations must be pure: the same inputs always render the same
/// output and nothing is retained between calls.
pub trait TemplateRenderer {
    /// Render `template`; entries in `extra` shadow entries in `vars`.
    fn render(
        &self,
        template: &str,
        vars: &Map<String, Value>,
        extra: Option<&Map<String, Value>>,
    ) -> Result<String>;
}

/// Placeholder substitution over `{{ ... }}` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer {
    strict: bool,
}

impl PlaceholderRenderer {
    /// Renderer that keeps unknown placeholders verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that fails on unknown placeholders.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(
        &self,
        template: &str,
        vars: &Map<String, Value>,
        extra: Option<&Map<String, Value>>,
    ) -> Result<String> {
        let mut result = String::with_capacity(template.len());
        let mut remaining = template;

        // Single left-to-right scan so substituted values are never rescanned
        while let Some(start) = remaining.find("{{") {
            result.push_str(&remaining[..start]);

            let Some(end) = remaining[start..].find("}}") else {
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };
            let end_abs = start + end + 2;
            let name = remaining[start + 2..start + end].trim();

            let value = extra
                .and_then(|extra| lookup(extra, name))
                .or_else(|| lookup(vars, name));
            match value {
                Some(value) => result.push_str(&value_to_string(value)),
                None if self.strict => {
                    return Err(Error::Template {
                        template: template.to_string(),
                        message: format!("unknown variable '{}'", name),
                    });
                }
                None => result.push_str(&remaining[start..end_abs]),
            }

            remaining = &remaining[end_abs..];
        }

        result.push_str(remaining);
        Ok(result)
    }
}

/// Look up a dot-separated path (`interfaces.0.mac_address`).
fn lookup<'a>(vars: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    if let Some(value) = vars.get(path) {
        return Some(value);
    }

    let mut parts = path.split('.');
    let mut current = vars.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
