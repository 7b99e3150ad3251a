//! # Pagecraft Editor
//!
//! The action/history engine behind the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: clicks, keystrokes, pointer drags  │
//! └─────────────────────────────────────────────┘
//!                     ↓  Action
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor::dispatch                    │
//! │  - transient: selection, drag, clipboard    │
//! │  - undoable: tree primitives → new Document │
//! │  - UndoStack: snapshots + timed batching    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: pages, trees, grid projection     │
//! │ template: {{ bindings }} for previews       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: the [`Editor`] is the only writer of the document state
//! 2. **Values, not references**: every edit builds a new tree
//! 3. **No-ops over errors**: stale ids and invalid moves change nothing
//! 4. **Undo covers content only**: drag state and clipboard are left alone
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_document::{Node, Page};
//! use pagecraft_editor::{Action, DispatchOutcome, Editor};
//!
//! let page = Page::new("home", "Home", "/", Node::container("root", "stack"));
//! let mut editor = Editor::with_page(page).unwrap();
//!
//! let outcome = editor
//!     .dispatch(Action::AddNode {
//!         parent_id: "root".to_string(),
//!         index: None,
//!         kind: "heading".to_string(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(outcome, DispatchOutcome::Applied);
//! assert_eq!(editor.selected_node().map(|n| n.kind.as_str()), Some("heading"));
//!
//! editor.undo();
//! assert!(editor.current_tree().unwrap().children().is_empty());
//! ```

pub mod actions;
pub mod config;
pub mod engine;
pub mod errors;
pub mod preview;
pub mod state;
pub mod undo_stack;

pub use actions::{Action, BatchKey};
pub use config::{EditorConfig, DEFAULT_BATCH_WINDOW_MS, DEFAULT_CONFIG_NAME, DEFAULT_HISTORY_LIMIT};
pub use engine::{DispatchOutcome, Editor};
pub use errors::EditorError;
pub use state::{Document, DocumentState, DragSource, DragState, DropTarget};
pub use undo_stack::{HistoryEntry, PendingBatch, Recorded, UndoStack};
