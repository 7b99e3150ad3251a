//! # Document Model
//!
//! Pages own exactly one root [`Node`]. Nodes are plain values: every edit
//! goes through the functions in [`crate::tree`], which hand back a new root.
//!
//! `props` and `style` are open maps. The engine never interprets them; each
//! renderer or form owns a typed view over the keys it cares about.

use crate::error::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Open attribute map used for both `props` and `style`
pub type Props = BTreeMap<String, Value>;

/// A node in a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    /// Kind tag, looked up in the [`crate::NodeCatalog`]
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub props: Props,

    /// `Some` for containers, `None` for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: Props,
}

impl Node {
    /// Create a leaf node
    pub fn leaf(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: Props::new(),
            children: None,
            style: Props::new(),
        }
    }

    /// Create an empty container node
    pub fn container(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::leaf(id, kind)
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Append a child. Leaves are turned into containers.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Children as a slice (empty for leaves)
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// A named document with a single root node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub label: String,
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_title: Option<String>,
    pub content: Node,
}

impl Page {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        route: impl Into<String>,
        content: Node,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            route: route.into(),
            browser_title: None,
            content,
        }
    }

    /// Parse a page from its serialized form
    pub fn from_json(source: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the tree invariants: unique ids, no children under leaves
    /// (when a container predicate is supplied).
    pub fn validate(&self, is_container: impl Fn(&str) -> Option<bool>) -> DocumentResult<()> {
        validate_subtree(&self.id, &self.content, is_container)
    }
}

/// Check one subtree of page `page_id`: unique ids, and no children under
/// a kind the catalog knows as a leaf.
pub fn validate_subtree(
    page_id: &str,
    node: &Node,
    is_container: impl Fn(&str) -> Option<bool>,
) -> DocumentResult<()> {
    let mut seen = HashSet::new();
    validate_node(page_id, node, &is_container, &mut seen)
}

/// Validate a whole page set: at least one page, unique page ids, and
/// every tree valid on its own.
pub fn validate_pages(pages: &[Page], is_container: impl Fn(&str) -> Option<bool>) -> DocumentResult<()> {
    if pages.is_empty() {
        return Err(DocumentError::EmptyDocument);
    }

    let mut page_ids = HashSet::new();
    for page in pages {
        if !page_ids.insert(page.id.as_str()) {
            return Err(DocumentError::DuplicatePage(page.id.clone()));
        }
        page.validate(&is_container)?;
    }

    Ok(())
}

fn validate_node<'a>(
    page_id: &str,
    node: &'a Node,
    is_container: &impl Fn(&str) -> Option<bool>,
    seen: &mut HashSet<&'a str>,
) -> DocumentResult<()> {
    if !seen.insert(node.id.as_str()) {
        return Err(DocumentError::duplicate_id(page_id, &node.id));
    }

    if node.children.is_some() && is_container(&node.kind) == Some(false) {
        return Err(DocumentError::children_on_leaf(&node.id, &node.kind));
    }

    for child in node.children() {
        validate_node(page_id, child, is_container, seen)?;
    }

    Ok(())
}
