//! # Pagecraft Document
//!
//! The page model shared by every other pagecraft crate:
//!
//! - [`Node`] / [`Page`]: immutable-by-convention trees of typed nodes
//! - [`NodeCatalog`]: which kinds exist and which of them hold children
//! - [`tree`]: pure edit primitives returning new roots
//! - [`grid`]: tree ↔ grid projection for layout mode
//!
//! ```rust
//! use pagecraft_document::{tree, Node};
//!
//! let root = Node::container("root", "stack")
//!     .with_child(Node::leaf("title", "heading"));
//!
//! let next = tree::remove_child(&root, "title");
//! assert!(next.children().is_empty());
//! assert_eq!(root.children().len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod grid;
pub mod id_generator;
pub mod node;
pub mod tree;

pub use catalog::{KindCategory, NodeCatalog, NodeKind, GRID_KIND, STACK_KIND};
pub use error::{DocumentError, DocumentResult};
pub use grid::{grid_to_tree, tree_to_grid, tree_to_grid_with, GridItem, GridLayoutConfig, GridOptions};
pub use id_generator::IdGenerator;
pub use node::{validate_pages, validate_subtree, Node, Page, Props};
pub use tree::{FlatNode, NodeSummary, ParentRef};
