//! # Grid Converter
//!
//! Projects a subtree onto a 2-D grid and back.
//!
//! `tree_to_grid` places every descendant, in pre-order, on consecutive cells
//! of a `columns`-wide grid. No span-aware packing is attempted: the index
//! alone decides the cell.
//!
//! `grid_to_tree` reads the items back in row-major order and builds a flat
//! `stack`. Nested hierarchy does not survive the round trip, only the order.

use crate::catalog::STACK_KIND;
use crate::node::{Node, Props};
use crate::tree::flatten_tree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_COLUMNS: u32 = 2;
pub const DEFAULT_ROW_HEIGHT: u32 = 80;
pub const DEFAULT_GAP: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    /// Id of the node placed in this cell
    pub component: String,
    pub col_start: u32,
    pub row_start: u32,
    pub col_span: u32,
    pub row_span: u32,
    /// Overrides merged over the node's own props on the way back
    #[serde(default)]
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayoutConfig {
    pub columns: u32,
    pub row_height: u32,
    pub gap: u32,
    pub items: Vec<GridItem>,
}

impl GridLayoutConfig {
    pub fn item(&self, component: &str) -> Option<&GridItem> {
        self.items.iter().find(|item| item.component == component)
    }

    /// Number of rows currently occupied
    pub fn row_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.row_start + item.row_span.max(1) - 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub columns: u32,
    pub row_height: u32,
    pub gap: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            row_height: DEFAULT_ROW_HEIGHT,
            gap: DEFAULT_GAP,
        }
    }
}

/// Lay out the descendants of `node` on a `columns`-wide grid
pub fn tree_to_grid(node: &Node, columns: u32) -> GridLayoutConfig {
    tree_to_grid_with(
        node,
        &GridOptions {
            columns,
            ..GridOptions::default()
        },
    )
}

pub fn tree_to_grid_with(node: &Node, options: &GridOptions) -> GridLayoutConfig {
    let columns = options.columns.max(1);

    let items: Vec<GridItem> = flatten_tree(node)
        .into_iter()
        .skip(1)
        .enumerate()
        .map(|(index, flat)| {
            let index = index as u32;
            GridItem {
                component: flat.node.id.clone(),
                col_start: index % columns + 1,
                row_start: index / columns + 1,
                col_span: 1,
                row_span: 1,
                props: Props::new(),
            }
        })
        .collect();

    debug!(root = %node.id, columns, items = items.len(), "Projected tree onto grid");

    GridLayoutConfig {
        columns,
        row_height: options.row_height,
        gap: options.gap,
        items,
    }
}

/// Rebuild a flat `stack` (with id `root_id`) from grid items in reading order.
///
/// Items whose node the lookup cannot resolve are skipped, as are repeated
/// items for an id already placed. A resolved container keeps its subtree,
/// minus any descendant that has a grid item of its own.
pub fn grid_to_tree<'a, L>(grid: &GridLayoutConfig, lookup: L, root_id: impl Into<String>) -> Node
where
    L: Fn(&str) -> Option<&'a Node>,
{
    let mut items: Vec<(&GridItem, &Node)> = grid
        .items
        .iter()
        .filter_map(|item| match lookup(item.component.as_str()) {
            Some(source) => Some((item, source)),
            None => {
                debug!(component = %item.component, "Skipping grid item with no matching node");
                None
            }
        })
        .collect();
    items.sort_by_key(|(item, _)| (item.row_start, item.col_start));

    let placed: HashSet<&str> = items.iter().map(|(_, source)| source.id.as_str()).collect();
    let mut emitted = HashSet::new();
    let mut children = Vec::with_capacity(items.len());

    for (item, source) in items {
        if !emitted.insert(source.id.as_str()) {
            continue;
        }

        let mut node = source.clone();
        node.props.extend(item.props.iter().map(|(k, v)| (k.clone(), v.clone())));
        strip_placed(&mut node, &placed);
        children.push(node);
    }

    Node {
        id: root_id.into(),
        kind: STACK_KIND.to_string(),
        props: Props::new(),
        children: Some(children),
        style: Props::new(),
    }
}

/// Drop descendants that appear as grid items of their own
fn strip_placed(node: &mut Node, placed: &HashSet<&str>) {
    if let Some(children) = node.children.as_mut() {
        children.retain(|child| !placed.contains(child.id.as_str()));
        for child in children {
            strip_placed(child, placed);
        }
    }
}
