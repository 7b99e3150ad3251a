//! # Editor Engine
//!
//! Owns the [`DocumentState`] and funnels every change through
//! [`Editor::dispatch`].
//!
//! Undoable actions are reduced to a candidate [`Document`] using the tree
//! primitives. Candidates equal to the current document are dropped as
//! no-ops, so stale ids and rejected moves never reach history. Everything
//! else is recorded in the [`UndoStack`] before it replaces the current
//! document.
//!
//! Transient actions (selection, drag lifecycle, copy) are applied in place
//! and close any pending batch.

use crate::actions::Action;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::preview;
use crate::state::{Document, DocumentState, DragSource, DragState};
use crate::undo_stack::{Recorded, UndoStack};
use pagecraft_document::{
    grid_to_tree, tree, tree_to_grid_with, validate_pages, validate_subtree, DocumentError, GridLayoutConfig,
    GridOptions, IdGenerator, Node, NodeCatalog, NodeSummary, Page, Props, STACK_KIND,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use tracing::{debug, warn};

/// What a dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Applied with a new history entry
    Applied,
    /// Applied and merged into the pending batch
    Batched,
    /// UI state only
    Transient,
    /// Nothing changed
    Noop,
}

#[derive(Debug)]
pub struct Editor {
    state: DocumentState,
    history: UndoStack<Document>,
    catalog: NodeCatalog,
    ids: IdGenerator,
    config: EditorConfig,
}

impl Editor {
    /// Start editing `pages`.
    ///
    /// Fails when the page set is empty, a page id repeats, a tree breaks the
    /// id or container rules, or `current_page_id` names no page. Without a
    /// current page id the first page is opened.
    pub fn new(
        pages: Vec<Page>,
        current_page_id: Option<String>,
        catalog: NodeCatalog,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let document = build_document(pages, current_page_id, &catalog)?;

        let mut ids = IdGenerator::new(&config.id_namespace);
        observe_pages(&mut ids, &document.pages);

        let history = UndoStack::with_max_levels(config.history_limit).with_batch_window(config.batch_window());

        debug!(
            pages = document.pages.len(),
            current_page = %document.current_page_id,
            "Editor initialized"
        );

        Ok(Self {
            state: DocumentState::new(document),
            history,
            catalog,
            ids,
            config,
        })
    }

    /// Single page, built-in catalog, default config
    pub fn with_page(page: Page) -> Result<Self, EditorError> {
        Self::new(vec![page], None, NodeCatalog::builtin(), EditorConfig::default())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchOutcome, EditorError> {
        self.dispatch_at(action, Instant::now())
    }

    /// Dispatch with an explicit clock reading for batching.
    ///
    /// Only `REPLACE_PAGES` can fail; the state is untouched when it does.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> Result<DispatchOutcome, EditorError> {
        let label = action.name();

        if !action.is_undoable() {
            self.history.close_batch();
            self.apply_transient(action);
            debug!(action = label, "Applied transient action");
            return Ok(DispatchOutcome::Transient);
        }

        let batch_key = action.batch_key();
        let next = match self.reduce(action)? {
            Some(next) if next != self.state.document => next,
            _ => {
                debug!(action = label, "Discarded no-op action");
                return Ok(DispatchOutcome::Noop);
            }
        };

        let before = std::mem::replace(&mut self.state.document, next);
        let outcome = match self.history.record(label, before, batch_key, now) {
            Recorded::Pushed => DispatchOutcome::Applied,
            Recorded::Coalesced => DispatchOutcome::Batched,
        };

        debug!(
            action = label,
            outcome = ?outcome,
            undo_levels = self.history.undo_levels(),
            "Dispatched action"
        );
        Ok(outcome)
    }

    /// Revert the last history entry. False when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }

        let current = self.state.document.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.state.document = previous;
                debug!(redo_levels = self.history.redo_levels(), "Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }

        let current = self.state.document.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.state.document = next;
                debug!(undo_levels = self.history.undo_levels(), "Redo");
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Undoable actions
    // ------------------------------------------------------------------

    fn reduce(&mut self, action: Action) -> Result<Option<Document>, EditorError> {
        let next = match action {
            Action::AddNode { parent_id, index, kind } => self.add_node(&parent_id, index, &kind),
            Action::InsertNode { parent_id, index, node } => self.insert_node(&parent_id, index, node),
            Action::RemoveNode { node_id } => self.remove_node(&node_id),
            Action::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => self.move_node(&node_id, &new_parent_id, index),
            Action::UpdateNodeProps { node_id, props } => self.edit_node(&node_id, |node| merge(&mut node.props, props)),
            Action::UpdateNodeStyle { node_id, style } => self.edit_node(&node_id, |node| merge(&mut node.style, style)),
            Action::DuplicateNode { node_id } => self.duplicate_node(&node_id),
            Action::WrapInContainer {
                node_id,
                container_kind,
            } => self.wrap_in_container(&node_id, &container_kind),
            Action::AddPage { label, route } => self.add_page(label, route),
            Action::RemovePage { page_id } => self.remove_page(&page_id),
            Action::UpdatePage {
                page_id,
                label,
                route,
                browser_title,
            } => self.update_page(&page_id, label, route, browser_title),
            Action::ReplacePages { pages, current_page_id } => Some(self.replace_pages(pages, current_page_id)?),
            Action::Drop => self.drop_dragged(),
            Action::Paste { parent_id, index } => self.paste(parent_id, index),
            Action::ApplyGridLayout { node_id, grid } => self.apply_grid_layout(&node_id, &grid),
            _ => None,
        };

        Ok(next.map(|mut document| {
            document.settle_selection();
            document
        }))
    }

    fn add_node(&mut self, parent_id: &str, index: Option<usize>, kind: &str) -> Option<Document> {
        self.container(parent_id)?;
        let node = self.catalog.create_node(kind, &mut self.ids)?;
        self.insert_and_select(parent_id, index, node)
    }

    fn insert_node(&mut self, parent_id: &str, index: Option<usize>, mut node: Node) -> Option<Document> {
        open_containers(&mut node, &self.catalog);
        if let Err(e) = validate_subtree(&self.state.document.current_page_id, &node, |kind| {
            self.catalog.is_container(kind)
        }) {
            warn!(node_id = %node.id, error = %e, "Rejected insert of a malformed node");
            return None;
        }

        let clash = {
            let root = self.current_root()?;
            let mut seen: HashSet<&str> = tree::collect_ids(root).into_iter().collect();
            tree::collect_ids(&node)
                .into_iter()
                .find(|id| !seen.insert(*id))
                .map(str::to_string)
        };
        if let Some(id) = clash {
            warn!(node_id = %id, "Rejected insert with a clashing node id");
            return None;
        }

        for id in tree::collect_ids(&node) {
            self.ids.observe(id);
        }
        self.insert_and_select(parent_id, index, node)
    }

    fn remove_node(&self, node_id: &str) -> Option<Document> {
        let root = self.current_root()?;
        if root.id == node_id || tree::find_node(root, node_id).is_none() {
            return None;
        }

        Some(self.with_tree(tree::remove_child(root, node_id)))
    }

    fn move_node(&self, node_id: &str, new_parent_id: &str, index: usize) -> Option<Document> {
        let root = self.current_root()?;

        if node_id == new_parent_id || tree::is_descendant(root, new_parent_id, node_id) {
            warn!(node_id, new_parent_id, "Rejected move into own subtree");
            return None;
        }

        let next = tree::move_node(root, node_id, new_parent_id, index);
        (next != *root).then(|| self.with_tree(next))
    }

    fn edit_node(&self, node_id: &str, edit: impl FnOnce(&mut Node)) -> Option<Document> {
        let root = self.current_root()?;
        tree::find_node(root, node_id)?;

        let next = tree::update_node(root, node_id, |node| {
            let mut node = node.clone();
            edit(&mut node);
            node
        });
        Some(self.with_tree(next))
    }

    fn duplicate_node(&mut self, node_id: &str) -> Option<Document> {
        let (parent_id, index, copy) = {
            let root = self.state.document.current_tree()?;
            let at = tree::find_parent(root, node_id)?;
            let original = &at.parent.children()[at.index];
            (at.parent.id.clone(), at.index, tree::clone_subtree(original, &mut self.ids))
        };

        self.insert_and_select(&parent_id, Some(index + 1), copy)
    }

    fn wrap_in_container(&mut self, node_id: &str, container_kind: &str) -> Option<Document> {
        if self.catalog.is_container(container_kind) != Some(true) {
            return None;
        }

        let root = self.state.document.current_tree()?;
        // The page root has no position to take over
        tree::find_parent(root, node_id)?;
        let original = tree::find_node(root, node_id)?.clone();

        let wrapper = self.catalog.create_node(container_kind, &mut self.ids)?.with_child(original);
        let wrapper_id = wrapper.id.clone();

        let mut next = self.with_tree(tree::replace_node(root, node_id, wrapper));
        next.selected_node_id = Some(wrapper_id);
        Some(next)
    }

    fn add_page(&mut self, label: String, route: String) -> Option<Document> {
        let page_id = self.ids.new_id();
        let content = self
            .catalog
            .create_node(STACK_KIND, &mut self.ids)
            .unwrap_or_else(|| Node::container(self.ids.new_id(), STACK_KIND));

        let mut next = self.state.document.clone();
        next.pages
            .insert(page_id.clone(), Page::new(page_id.clone(), label, route, content));
        next.current_page_id = page_id;
        next.selected_node_id = None;
        Some(next)
    }

    fn remove_page(&self, page_id: &str) -> Option<Document> {
        let document = &self.state.document;
        if document.pages.len() <= 1 || !document.pages.contains_key(page_id) {
            return None;
        }

        let mut next = document.clone();
        next.pages.remove(page_id);
        if next.current_page_id == page_id {
            next.current_page_id = next.pages.keys().next()?.clone();
            next.selected_node_id = None;
        }
        Some(next)
    }

    fn update_page(
        &self,
        page_id: &str,
        label: Option<String>,
        route: Option<String>,
        browser_title: Option<String>,
    ) -> Option<Document> {
        let mut next = self.state.document.clone();
        let page = next.pages.get_mut(page_id)?;

        if let Some(label) = label {
            page.label = label;
        }
        if let Some(route) = route {
            page.route = route;
        }
        if let Some(title) = browser_title {
            page.browser_title = (!title.is_empty()).then_some(title);
        }
        Some(next)
    }

    fn replace_pages(&mut self, pages: Vec<Page>, current_page_id: Option<String>) -> Result<Document, EditorError> {
        // Keep the open page when the import still has it
        let current_page_id = current_page_id.or_else(|| {
            let open = &self.state.document.current_page_id;
            pages.iter().any(|page| &page.id == open).then(|| open.clone())
        });

        let document = build_document(pages, current_page_id, &self.catalog).map_err(|e| {
            warn!(error = %e, "Rejected page import");
            EditorError::InvalidDocument(e.to_string())
        })?;

        observe_pages(&mut self.ids, &document.pages);
        Ok(document)
    }

    fn drop_dragged(&mut self) -> Option<Document> {
        let DragState::Dragging {
            source,
            target: Some(target),
        } = std::mem::take(&mut self.state.drag)
        else {
            return None;
        };

        match source {
            DragSource::Palette { kind } => self.add_node(&target.parent_id, Some(target.index), &kind),
            DragSource::Canvas { node_id } => {
                let mut next = self.move_node(&node_id, &target.parent_id, target.index)?;
                next.selected_node_id = Some(node_id);
                Some(next)
            }
        }
    }

    fn paste(&mut self, parent_id: Option<String>, index: Option<usize>) -> Option<Document> {
        let (parent_id, index) = match parent_id {
            Some(parent_id) => (parent_id, index),
            None => self.paste_anchor()?,
        };

        let held = self.state.clipboard.as_ref()?;
        let copy = tree::clone_subtree(held, &mut self.ids);
        self.insert_and_select(&parent_id, index, copy)
    }

    /// Right after the selected node, or at the end of the page root
    fn paste_anchor(&self) -> Option<(String, Option<usize>)> {
        let root = self.current_root()?;
        let after_selection = self
            .state
            .document
            .selected_node_id
            .as_deref()
            .and_then(|id| tree::find_parent(root, id))
            .map(|at| (at.parent.id.clone(), Some(at.index + 1)));

        Some(after_selection.unwrap_or_else(|| (root.id.clone(), None)))
    }

    fn apply_grid_layout(&self, node_id: &str, grid: &GridLayoutConfig) -> Option<Document> {
        let root = self.current_root()?;
        let target = tree::find_node(root, node_id).filter(|node| node.is_container())?;

        // Only the target's own descendants may be placed
        let lookup = tree::node_lookup(target);
        let stack = grid_to_tree(
            grid,
            |id| if id == node_id { None } else { lookup.get(id).copied() },
            node_id,
        );

        let mut replacement = target.clone();
        replacement.children = stack.children;
        Some(self.with_tree(tree::replace_node(root, node_id, replacement)))
    }

    fn insert_and_select(&self, parent_id: &str, index: Option<usize>, node: Node) -> Option<Document> {
        let parent = self.container(parent_id)?;
        let index = index.unwrap_or(parent.children().len());
        let root = self.current_root()?;

        let node_id = node.id.clone();
        let mut next = self.with_tree(tree::insert_child(root, parent_id, index, node));
        next.selected_node_id = Some(node_id);
        Some(next)
    }

    // ------------------------------------------------------------------
    // Transient actions
    // ------------------------------------------------------------------

    fn apply_transient(&mut self, action: Action) {
        let document = &mut self.state.document;

        match action {
            Action::SelectNode { node_id } => match node_id {
                Some(id) if document.find(&id).is_none() => {
                    debug!(node_id = %id, "Ignoring selection of unknown node");
                }
                node_id => document.selected_node_id = node_id,
            },
            Action::SetCurrentPage { page_id } => {
                if document.pages.contains_key(&page_id) && document.current_page_id != page_id {
                    document.current_page_id = page_id;
                    document.selected_node_id = None;
                }
            }
            Action::DragStart { source } => {
                self.state.drag = DragState::Dragging { source, target: None };
            }
            Action::DragOver { target } => {
                if let DragState::Dragging { target: current, .. } = &mut self.state.drag {
                    *current = target;
                }
            }
            Action::DragEnd => self.state.drag = DragState::Idle,
            Action::CopyNode { node_id } => {
                if let Some(node) = document.find(&node_id) {
                    self.state.clipboard = Some(tree::clone_subtree(node, &mut self.ids));
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    fn current_root(&self) -> Option<&Node> {
        self.state.document.current_tree()
    }

    fn container(&self, id: &str) -> Option<&Node> {
        self.state.document.find(id).filter(|node| node.is_container())
    }

    /// Copy of the document with the current page's tree swapped out
    fn with_tree(&self, root: Node) -> Document {
        let mut next = self.state.document.clone();
        if let Some(page) = next.pages.get_mut(&next.current_page_id) {
            page.content = root;
        }
        next
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn pages(&self) -> &BTreeMap<String, Page> {
        &self.state.document.pages
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.state.document.current_page()
    }

    pub fn current_tree(&self) -> Option<&Node> {
        self.state.document.current_tree()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.state.document.selected_node()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.state.drag
    }

    pub fn clipboard(&self) -> Option<&Node> {
        self.state.clipboard.as_ref()
    }

    pub fn history(&self) -> &UndoStack<Document> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    pub fn undo_label(&self) -> Option<&'static str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.history.redo_label()
    }

    /// Node counts for the current page
    pub fn summary(&self) -> Option<NodeSummary> {
        self.current_tree().map(tree::summarize)
    }

    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Grid projection of a node in the current page
    pub fn grid_layout(&self, node_id: &str, columns: Option<u32>) -> Option<GridLayoutConfig> {
        let node = self.state.document.find(node_id)?;
        let options = GridOptions {
            columns: columns.unwrap_or(self.config.default_grid_columns),
            ..GridOptions::default()
        };
        Some(tree_to_grid_with(node, &options))
    }

    /// Current tree with template props resolved against `data`
    pub fn preview(&self, data: &Value) -> Option<Node> {
        let env = self.config.format_env();
        self.current_tree().map(|root| preview::preview_node(root, data, &env))
    }
}

fn merge(target: &mut Props, patch: Props) {
    target.extend(patch);
}

fn build_document(
    pages: Vec<Page>,
    current_page_id: Option<String>,
    catalog: &NodeCatalog,
) -> Result<Document, DocumentError> {
    validate_pages(&pages, |kind| catalog.is_container(kind))?;

    let current_page_id = match current_page_id {
        Some(id) if pages.iter().any(|page| page.id == id) => id,
        Some(id) => return Err(DocumentError::PageNotFound(id)),
        None => pages.first().map(|page| page.id.clone()).ok_or(DocumentError::EmptyDocument)?,
    };

    Ok(Document {
        pages: pages.into_iter().map(|page| (page.id.clone(), page)).collect(),
        current_page_id,
        selected_node_id: None,
    })
}

/// Keep freshly minted ids clear of everything already in the document
fn observe_pages(ids: &mut IdGenerator, pages: &BTreeMap<String, Page>) {
    for page in pages.values() {
        ids.observe(&page.id);
        for id in tree::collect_ids(&page.content) {
            ids.observe(id);
        }
    }
}

/// Give container kinds that arrive without a child list an empty one
fn open_containers(node: &mut Node, catalog: &NodeCatalog) {
    if node.children.is_none() && catalog.is_container(&node.kind) == Some(true) {
        node.children = Some(Vec::new());
    }
    for child in node.children.iter_mut().flatten() {
        open_containers(child, catalog);
    }
}
