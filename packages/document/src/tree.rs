//! # Tree Primitives
//!
//! Pure functions over a page tree. Every edit takes the current root by
//! reference and returns a new root; the input is never touched.
//!
//! Only the path from the root down to the edited node is rebuilt. Targets
//! that cannot be found leave the result structurally equal to the input.
//!
//! `move_node` does not know about cycles. Callers that move user-chosen
//! nodes must check [`is_descendant`] first (the editor does).

use crate::id_generator::IdGenerator;
use crate::node::Node;
use serde::Serialize;
use std::collections::HashMap;

/// Parent of a node together with the node's position among its siblings
#[derive(Debug, Clone, Copy)]
pub struct ParentRef<'a> {
    pub parent: &'a Node,
    pub index: usize,
}

/// One entry of a pre-order walk
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub node: &'a Node,
    pub depth: usize,
    pub parent_id: Option<&'a str>,
}

/// Counts over a tree, used for page summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub total: usize,
    pub containers: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

/// Depth-first search by id
pub fn find_node<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find_node(child, id))
}

pub fn find_parent<'a>(root: &'a Node, id: &str) -> Option<ParentRef<'a>> {
    if let Some(index) = root.children().iter().position(|child| child.id == id) {
        return Some(ParentRef { parent: root, index });
    }
    root.children().iter().find_map(|child| find_parent(child, id))
}

/// Splice `node` into the children of `parent_id` at `index`.
///
/// An index past the end appends. Unknown parents and leaf parents are no-ops.
pub fn insert_child(root: &Node, parent_id: &str, index: usize, node: Node) -> Node {
    update_node(root, parent_id, move |parent| {
        let mut parent = parent.clone();
        if let Some(children) = parent.children.as_mut() {
            let index = index.min(children.len());
            children.insert(index, node);
        }
        parent
    })
}

/// Excise the node with `id` wherever it is. The root itself cannot be removed.
pub fn remove_child(root: &Node, id: &str) -> Node {
    let owns_target = |node: &Node| node.children().iter().any(|child| child.id == id);

    rebuild(root, &owns_target, &mut Some(|parent: &Node| {
        let mut parent = parent.clone();
        if let Some(children) = parent.children.as_mut() {
            children.retain(|child| child.id != id);
        }
        parent
    }))
    .unwrap_or_else(|| root.clone())
}

/// Remove `id` and reinsert it under `new_parent_id` at `new_index`.
///
/// Within the same parent, a target index after the current position is
/// shifted down by one to account for the removal. If the destination is
/// missing (or is a leaf) once the node has been taken out, nothing happens.
pub fn move_node(root: &Node, id: &str, new_parent_id: &str, new_index: usize) -> Node {
    let Some(from) = find_parent(root, id) else {
        return root.clone();
    };

    let moved = from.parent.children()[from.index].clone();
    let index = if from.parent.id == new_parent_id && new_index > from.index {
        new_index - 1
    } else {
        new_index
    };

    let without = remove_child(root, id);
    match find_node(&without, new_parent_id) {
        Some(parent) if parent.is_container() => insert_child(&without, new_parent_id, index, moved),
        _ => root.clone(),
    }
}

/// Deep copy with a fresh id on every node
pub fn clone_subtree(node: &Node, ids: &mut IdGenerator) -> Node {
    Node {
        id: ids.new_id(),
        kind: node.kind.clone(),
        props: node.props.clone(),
        children: node
            .children
            .as_ref()
            .map(|children| children.iter().map(|child| clone_subtree(child, ids)).collect()),
        style: node.style.clone(),
    }
}

/// True iff `candidate_id` lies strictly inside the subtree of `ancestor_id`
pub fn is_descendant(root: &Node, candidate_id: &str, ancestor_id: &str) -> bool {
    find_node(root, ancestor_id)
        .map(|ancestor| {
            ancestor
                .children()
                .iter()
                .any(|child| find_node(child, candidate_id).is_some())
        })
        .unwrap_or(false)
}

/// Pre-order listing of the whole tree, root included at depth 0
pub fn flatten_tree(root: &Node) -> Vec<FlatNode<'_>> {
    let mut out = Vec::new();
    flatten_into(root, 0, None, &mut out);
    out
}

fn flatten_into<'a>(node: &'a Node, depth: usize, parent_id: Option<&'a str>, out: &mut Vec<FlatNode<'a>>) {
    out.push(FlatNode {
        node,
        depth,
        parent_id,
    });
    for child in node.children() {
        flatten_into(child, depth + 1, Some(node.id.as_str()), out);
    }
}

/// Replace the node with `id` by whatever `edit` returns
pub fn update_node<F>(root: &Node, id: &str, edit: F) -> Node
where
    F: FnOnce(&Node) -> Node,
{
    rebuild(root, &|node: &Node| node.id == id, &mut Some(edit)).unwrap_or_else(|| root.clone())
}

pub fn replace_node(root: &Node, id: &str, replacement: Node) -> Node {
    update_node(root, id, move |_| replacement)
}

/// All ids in pre-order
pub fn collect_ids(root: &Node) -> Vec<&str> {
    flatten_tree(root).into_iter().map(|flat| flat.node.id.as_str()).collect()
}

/// Id → node index over a tree
pub fn node_lookup(root: &Node) -> HashMap<&str, &Node> {
    flatten_tree(root)
        .into_iter()
        .map(|flat| (flat.node.id.as_str(), flat.node))
        .collect()
}

pub fn summarize(root: &Node) -> NodeSummary {
    flatten_tree(root)
        .into_iter()
        .fold(NodeSummary::default(), |mut summary, flat| {
            summary.total += 1;
            if flat.node.is_container() {
                summary.containers += 1;
            } else {
                summary.leaves += 1;
            }
            summary.max_depth = summary.max_depth.max(flat.depth);
            summary
        })
}

/// Rebuild the path from `node` down to the first node matching `pred`,
/// replacing that node with the output of `edit`. `None` when nothing matched.
fn rebuild<P, E>(node: &Node, pred: &P, edit: &mut Option<E>) -> Option<Node>
where
    P: Fn(&Node) -> bool,
    E: FnOnce(&Node) -> Node,
{
    if pred(node) {
        return edit.take().map(|edit| edit(node));
    }

    for (index, child) in node.children().iter().enumerate() {
        if let Some(new_child) = rebuild(child, pred, edit) {
            let mut copy = node.clone();
            if let Some(children) = copy.children.as_mut() {
                children[index] = new_child;
            }
            return Some(copy);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::container("root", "stack")
            .with_child(Node::leaf("a", "heading"))
            .with_child(
                Node::container("b", "card")
                    .with_child(Node::leaf("b1", "text"))
                    .with_child(Node::leaf("b2", "button")),
            )
            .with_child(Node::leaf("c", "divider"))
    }

    fn child_ids(node: &Node) -> Vec<&str> {
        node.children().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_find_node_and_parent() {
        let root = sample();

        assert_eq!(find_node(&root, "b2").map(|n| n.kind.as_str()), Some("button"));
        assert!(find_node(&root, "zzz").is_none());

        let parent = find_parent(&root, "b2").unwrap();
        assert_eq!(parent.parent.id, "b");
        assert_eq!(parent.index, 1);
        assert!(find_parent(&root, "root").is_none());
    }

    #[test]
    fn test_rebuild_only_touches_target_path() {
        let root = sample();
        let updated = update_node(&root, "b1", |n| n.clone().with_prop("text", "hi"));

        assert_eq!(updated.children()[0], root.children()[0]);
        assert_eq!(updated.children()[2], root.children()[2]);
        assert_ne!(updated.children()[1], root.children()[1]);
    }

    #[test]
    fn test_move_index_correction_same_parent() {
        let root = sample();

        // "a" dropped before "c" (index 2 in the pre-removal order)
        let moved = move_node(&root, "a", "root", 2);
        assert_eq!(child_ids(&moved), vec!["b", "a", "c"]);

        // Moving backwards needs no correction
        let moved = move_node(&root, "c", "root", 0);
        assert_eq!(child_ids(&moved), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_into_leaf_keeps_node() {
        let root = sample();
        let moved = move_node(&root, "b1", "a", 0);
        assert_eq!(moved, root);
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&sample());
        assert_eq!(
            summary,
            NodeSummary {
                total: 6,
                containers: 2,
                leaves: 4,
                max_depth: 2,
            }
        );
    }
}
