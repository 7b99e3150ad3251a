//! # Template Resolution
//!
//! Looks up expression paths in a JSON data context, threads the value
//! through its pipes and concatenates the result with the literal text.
//!
//! Missing data never raises: an unresolved path is `null` going into the
//! pipeline and renders as an empty string coming out.

use crate::formatters::{stringify, FormatEnv, FormatterRegistry};
use crate::parser::{parse_template, TemplateToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Reserved path prefixes and the data-context key each one reads from
const NAMESPACES: [(&str, &str); 3] = [("$app", "app"), ("$page", "page"), ("$enum", "enums")];

/// Rendering hint carried by a display-only pipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayHint {
    Badge { variant: Option<String> },
}

/// Resolves templates against a registry and a format environment
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'r> {
    registry: &'r FormatterRegistry,
    env: FormatEnv,
}

impl<'r> TemplateResolver<'r> {
    pub fn new(registry: &'r FormatterRegistry, env: FormatEnv) -> Self {
        Self { registry, env }
    }

    pub fn resolve(&self, input: &str, data: &Value) -> String {
        let mut out = String::with_capacity(input.len());

        for token in parse_template(input) {
            match token {
                TemplateToken::Text { raw } => out.push_str(&raw),
                TemplateToken::Expression { path, pipes, .. } => {
                    let mut value = match resolve_path(data, &path) {
                        Some(value) => value.clone(),
                        None => {
                            trace!(path = %path, "Template path did not resolve");
                            Value::Null
                        }
                    };
                    for pipe in &pipes {
                        value = self.registry.apply(pipe, value, &self.env);
                    }
                    out.push_str(&stringify(&value));
                }
            }
        }

        out
    }
}

impl Default for TemplateResolver<'static> {
    fn default() -> Self {
        Self::new(FormatterRegistry::builtin(), FormatEnv::default())
    }
}

/// Resolve with the built-in formatters, default locale and the current time
pub fn resolve_template(input: &str, data: &Value) -> String {
    TemplateResolver::default().resolve(input, data)
}

pub fn resolve_template_with(input: &str, data: &Value, env: &FormatEnv) -> String {
    TemplateResolver::new(FormatterRegistry::builtin(), *env).resolve(input, data)
}

/// Walk a dotted path through `data`.
///
/// `$app.`, `$page.` and `$enum.` redirect into the `app`, `page` and
/// `enums` members of the context. Numeric segments index arrays.
pub fn resolve_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let (mut current, rest) = split_namespace(data, path)?;

    if rest.is_empty() {
        return Some(current);
    }

    for segment in rest.split('.') {
        let segment = segment.trim();
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

fn split_namespace<'a, 'p>(data: &'a Value, path: &'p str) -> Option<(&'a Value, &'p str)> {
    for (prefix, key) in NAMESPACES {
        if let Some(rest) = path.strip_prefix(prefix) {
            if rest.is_empty() {
                return Some((data.get(key)?, ""));
            }
            if let Some(rest) = rest.strip_prefix('.') {
                return Some((data.get(key)?, rest));
            }
        }
    }
    Some((data, path))
}

/// Display hint of the first expression that pipes through `badge`
pub fn get_display_hint(input: &str) -> Option<DisplayHint> {
    parse_template(input).into_iter().find_map(|token| match token {
        TemplateToken::Expression { pipes, .. } => pipes
            .into_iter()
            .find(|pipe| pipe.name == "badge")
            .map(|pipe| DisplayHint::Badge {
                variant: pipe.args.into_iter().next().filter(|v| !v.is_empty()),
            }),
        TemplateToken::Text { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_path_segments() {
        let data = json!({
            "user": { "name": "ana", "tags": ["a", "b"] },
            "app": { "title": "Loja" },
            "page": { "id": 7 },
            "enums": { "status": { "open": "Aberto" } }
        });

        assert_eq!(resolve_path(&data, "user.name"), Some(&json!("ana")));
        assert_eq!(resolve_path(&data, "user.tags.1"), Some(&json!("b")));
        assert_eq!(resolve_path(&data, "$app.title"), Some(&json!("Loja")));
        assert_eq!(resolve_path(&data, "$page.id"), Some(&json!(7)));
        assert_eq!(resolve_path(&data, "$enum.status.open"), Some(&json!("Aberto")));
        assert_eq!(resolve_path(&data, "$app"), Some(&json!({ "title": "Loja" })));
    }

    #[test]
    fn test_resolve_path_misses() {
        let data = json!({ "user": { "name": "ana" }, "n": 3 });

        assert_eq!(resolve_path(&data, "user.email"), None);
        assert_eq!(resolve_path(&data, "n.x"), None);
        assert_eq!(resolve_path(&data, "user..name"), None);
        assert_eq!(resolve_path(&data, "$app.title"), None);
        assert_eq!(resolve_path(&data, ""), None);
    }

    #[test]
    fn test_namespace_prefix_needs_dot() {
        let data = json!({ "$apple": 1, "app": { "x": 2 } });
        assert_eq!(resolve_path(&data, "$apple"), Some(&json!(1)));
    }

    #[test]
    fn test_display_hint() {
        assert_eq!(
            get_display_hint("{{ order.status | badge:success }}"),
            Some(DisplayHint::Badge {
                variant: Some("success".to_string())
            })
        );
        assert_eq!(
            get_display_hint("Status: {{ status | uppercase | badge }}"),
            Some(DisplayHint::Badge { variant: None })
        );
        assert_eq!(get_display_hint("{{ status | uppercase }}"), None);
        assert_eq!(get_display_hint("badge"), None);
    }
}
