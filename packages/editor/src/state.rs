//! # Document State
//!
//! Everything the editor owns, split by what undo is allowed to touch:
//!
//! - [`Document`]: pages, current page and selection. This is the history
//!   snapshot; undo and redo swap it wholesale.
//! - drag state and clipboard: UI state that survives undo untouched.

use pagecraft_document::{tree, Node, Page};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The undoable part of the editor state
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: BTreeMap<String, Page>,
    pub current_page_id: String,
    pub selected_node_id: Option<String>,
}

impl Document {
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(&self.current_page_id)
    }

    pub fn current_tree(&self) -> Option<&Node> {
        self.current_page().map(|page| &page.content)
    }

    /// Look a node up in the current page
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.current_tree().and_then(|root| tree::find_node(root, id))
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_node_id.as_deref().and_then(|id| self.find(id))
    }

    /// Drop a selection that no longer points into the current page
    pub(crate) fn settle_selection(&mut self) {
        if let Some(id) = self.selected_node_id.as_deref() {
            if self.find(id).is_none() {
                self.selected_node_id = None;
            }
        }
    }
}

/// Where a drag started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DragSource {
    /// A new node of `kind`, dragged from the palette
    Palette { kind: String },
    /// An existing node being repositioned
    Canvas { node_id: String },
}

/// Insertion point recorded while hovering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub parent_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        target: Option<DropTarget>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<&DragSource> {
        match self {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            DragState::Dragging { target, .. } => target.as_ref(),
            DragState::Idle => None,
        }
    }
}

/// Full editor state
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub document: Document,
    pub drag: DragState,

    /// Single-slot clipboard, already re-identified at copy time
    pub clipboard: Option<Node>,
}

impl DocumentState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            drag: DragState::Idle,
            clipboard: None,
        }
    }
}
