//! # Actions
//!
//! The vocabulary accepted by [`crate::Editor::dispatch`]. Actions are plain
//! data so hosts can log, serialize and replay them.
//!
//! Every action is either undoable (changes page content and goes through
//! history) or transient (selection, drag lifecycle, copy).

use crate::state::{DragSource, DropTarget};
use pagecraft_document::{GridLayoutConfig, Node, Page, Props};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Action {
    /// Create a node of `kind` from the catalog and insert it
    AddNode {
        parent_id: String,
        #[serde(default)]
        index: Option<usize>,
        kind: String,
    },

    /// Insert a caller-built node (ids must not clash with the page)
    InsertNode {
        parent_id: String,
        #[serde(default)]
        index: Option<usize>,
        node: Node,
    },

    RemoveNode {
        node_id: String,
    },

    MoveNode {
        node_id: String,
        new_parent_id: String,
        index: usize,
    },

    /// Shallow-merge into the node's props
    UpdateNodeProps {
        node_id: String,
        props: Props,
    },

    /// Shallow-merge into the node's style
    UpdateNodeStyle {
        node_id: String,
        style: Props,
    },

    DuplicateNode {
        node_id: String,
    },

    WrapInContainer {
        node_id: String,
        container_kind: String,
    },

    AddPage {
        label: String,
        route: String,
    },

    RemovePage {
        page_id: String,
    },

    /// Absent fields are left as they are; an empty `browserTitle` clears it
    UpdatePage {
        page_id: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        route: Option<String>,
        #[serde(default)]
        browser_title: Option<String>,
    },

    /// Bulk import. Rejected with an error when the pages are invalid.
    ReplacePages {
        pages: Vec<Page>,
        #[serde(default)]
        current_page_id: Option<String>,
    },

    /// Commit the active drag at its recorded target
    Drop,

    Paste {
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Reorder a container's children from a grid layout
    ApplyGridLayout {
        node_id: String,
        grid: GridLayoutConfig,
    },

    SelectNode {
        #[serde(default)]
        node_id: Option<String>,
    },

    SetCurrentPage {
        page_id: String,
    },

    DragStart {
        source: DragSource,
    },

    DragOver {
        #[serde(default)]
        target: Option<DropTarget>,
    },

    /// Cancel the active drag
    DragEnd,

    CopyNode {
        node_id: String,
    },
}

/// Identifies edits that may be coalesced into one history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchKey {
    pub kind: &'static str,
    pub target_id: String,
}

impl Action {
    /// Wire name, also used as the history label
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddNode { .. } => "ADD_NODE",
            Action::InsertNode { .. } => "INSERT_NODE",
            Action::RemoveNode { .. } => "REMOVE_NODE",
            Action::MoveNode { .. } => "MOVE_NODE",
            Action::UpdateNodeProps { .. } => "UPDATE_NODE_PROPS",
            Action::UpdateNodeStyle { .. } => "UPDATE_NODE_STYLE",
            Action::DuplicateNode { .. } => "DUPLICATE_NODE",
            Action::WrapInContainer { .. } => "WRAP_IN_CONTAINER",
            Action::AddPage { .. } => "ADD_PAGE",
            Action::RemovePage { .. } => "REMOVE_PAGE",
            Action::UpdatePage { .. } => "UPDATE_PAGE",
            Action::ReplacePages { .. } => "REPLACE_PAGES",
            Action::Drop => "DROP",
            Action::Paste { .. } => "PASTE",
            Action::ApplyGridLayout { .. } => "APPLY_GRID_LAYOUT",
            Action::SelectNode { .. } => "SELECT_NODE",
            Action::SetCurrentPage { .. } => "SET_CURRENT_PAGE",
            Action::DragStart { .. } => "DRAG_START",
            Action::DragOver { .. } => "DRAG_OVER",
            Action::DragEnd => "DRAG_END",
            Action::CopyNode { .. } => "COPY_NODE",
        }
    }

    pub fn is_undoable(&self) -> bool {
        !matches!(
            self,
            Action::SelectNode { .. }
                | Action::SetCurrentPage { .. }
                | Action::DragStart { .. }
                | Action::DragOver { .. }
                | Action::DragEnd
                | Action::CopyNode { .. }
        )
    }

    /// Continuous prop/style edits batch per node
    pub fn batch_key(&self) -> Option<BatchKey> {
        match self {
            Action::UpdateNodeProps { node_id, .. } | Action::UpdateNodeStyle { node_id, .. } => Some(BatchKey {
                kind: self.name(),
                target_id: node_id.clone(),
            }),
            _ => None,
        }
    }
}
