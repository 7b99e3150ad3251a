//! Node kind registry.
//!
//! Each kind is described once (label, icon, category, container-ness and
//! default props) and looked up by name. Hosts may register their own kinds
//! on top of the built-in set.

use crate::id_generator::IdGenerator;
use crate::node::{Node, Props};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const STACK_KIND: &str = "stack";
pub const GRID_KIND: &str = "grid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindCategory {
    Layout,
    Typography,
    Input,
    Media,
    Data,
}

/// Descriptor for one node kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeKind {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub category: KindCategory,
    pub is_container: bool,
    #[serde(default)]
    pub default_props: Props,
}

impl NodeKind {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        category: KindCategory,
        is_container: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: icon.into(),
            category,
            is_container,
            default_props: Props::new(),
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_props.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    kinds: BTreeMap<String, NodeKind>,
}

impl NodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The kinds every editor ships with
    pub fn builtin() -> Self {
        use KindCategory::*;

        let mut catalog = Self::new();
        catalog.register(
            NodeKind::new(STACK_KIND, "Stack", "rows", Layout, true)
                .with_default("direction", json!("vertical"))
                .with_default("gap", json!(8)),
        );
        catalog.register(
            NodeKind::new(GRID_KIND, "Grid", "grid", Layout, true)
                .with_default("columns", json!(2))
                .with_default("gap", json!(16)),
        );
        catalog.register(
            NodeKind::new("card", "Card", "square", Layout, true).with_default("padding", json!(16)),
        );
        catalog.register(NodeKind::new("section", "Section", "layout", Layout, true));
        catalog.register(
            NodeKind::new("heading", "Heading", "heading", Typography, false)
                .with_default("text", json!("Heading"))
                .with_default("level", json!(2)),
        );
        catalog.register(
            NodeKind::new("text", "Text", "type", Typography, false).with_default("text", json!("")),
        );
        catalog.register(
            NodeKind::new("badge", "Badge", "tag", Typography, false)
                .with_default("text", json!("Badge"))
                .with_default("variant", json!("default")),
        );
        catalog.register(
            NodeKind::new("button", "Button", "mouse-pointer", Input, false)
                .with_default("label", json!("Button"))
                .with_default("variant", json!("primary")),
        );
        catalog.register(
            NodeKind::new("image", "Image", "image", Media, false)
                .with_default("src", json!(""))
                .with_default("alt", json!("")),
        );
        catalog.register(NodeKind::new("divider", "Divider", "minus", Layout, false));
        catalog.register(
            NodeKind::new("table", "Table", "table", Data, false)
                .with_default("columns", json!([]))
                .with_default("rows", json!([])),
        );
        catalog
    }

    /// Add or replace a kind
    pub fn register(&mut self, kind: NodeKind) {
        self.kinds.insert(kind.name.clone(), kind);
    }

    pub fn get(&self, name: &str) -> Option<&NodeKind> {
        self.kinds.get(name)
    }

    /// `None` when the kind is unknown
    pub fn is_container(&self, name: &str) -> Option<bool> {
        self.get(name).map(|kind| kind.is_container)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.kinds.values()
    }

    /// Build a fresh node of `kind` with its default props
    pub fn create_node(&self, kind: &str, ids: &mut IdGenerator) -> Option<Node> {
        let descriptor = self.get(kind)?;

        Some(Node {
            id: ids.new_id(),
            kind: descriptor.name.clone(),
            props: descriptor.default_props.clone(),
            children: descriptor.is_container.then(Vec::new),
            style: Props::new(),
        })
    }
}
