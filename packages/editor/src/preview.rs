//! Template resolution over node props, for rendering previews.
//!
//! Only string props that contain a binding are touched; everything else is
//! copied through. Style maps are left alone.

use pagecraft_document::{Node, Props};
use pagecraft_template::{has_template_expr, FormatEnv, FormatterRegistry, TemplateResolver};
use serde_json::Value;

pub fn resolve_props(props: &Props, data: &Value, env: &FormatEnv) -> Props {
    let resolver = TemplateResolver::new(FormatterRegistry::builtin(), *env);
    resolve_with(&resolver, props, data)
}

/// Resolve every templated prop in a subtree
pub fn preview_node(node: &Node, data: &Value, env: &FormatEnv) -> Node {
    let resolver = TemplateResolver::new(FormatterRegistry::builtin(), *env);
    preview_with(&resolver, node, data)
}

fn preview_with(resolver: &TemplateResolver<'_>, node: &Node, data: &Value) -> Node {
    Node {
        id: node.id.clone(),
        kind: node.kind.clone(),
        props: resolve_with(resolver, &node.props, data),
        children: node
            .children
            .as_ref()
            .map(|children| children.iter().map(|child| preview_with(resolver, child, data)).collect()),
        style: node.style.clone(),
    }
}

fn resolve_with(resolver: &TemplateResolver<'_>, props: &Props, data: &Value) -> Props {
    props
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) if has_template_expr(text) => Value::String(resolver.resolve(text, data)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}
