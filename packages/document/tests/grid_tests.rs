//! Tree ↔ grid projection

use pagecraft_document::tree::{flatten_tree, node_lookup, remove_child};
use pagecraft_document::{grid_to_tree, tree_to_grid, GridItem, GridLayoutConfig, Node, Props};
use serde_json::json;

fn three_leaves() -> Node {
    Node::container("g", "grid")
        .with_child(Node::leaf("c1", "text").with_prop("text", "one"))
        .with_child(Node::leaf("c2", "text").with_prop("text", "two"))
        .with_child(Node::leaf("c3", "text").with_prop("text", "three"))
}

fn positions(grid: &GridLayoutConfig) -> Vec<(&str, u32, u32)> {
    grid.items
        .iter()
        .map(|i| (i.component.as_str(), i.col_start, i.row_start))
        .collect()
}

#[test]
fn test_two_columns_fill_row_major() {
    let grid = tree_to_grid(&three_leaves(), 2);

    assert_eq!(grid.columns, 2);
    assert_eq!(positions(&grid), vec![("c1", 1, 1), ("c2", 2, 1), ("c3", 1, 2)]);
    assert!(grid.items.iter().all(|i| i.col_span == 1 && i.row_span == 1));
}

#[test]
fn test_round_trip_preserves_order() {
    let root = three_leaves();
    let grid = tree_to_grid(&root, 2);
    let lookup = node_lookup(&root);

    let rebuilt = grid_to_tree(&grid, |id| lookup.get(id).copied(), "g");
    let order: Vec<&str> = rebuilt.children().iter().map(|c| c.id.as_str()).collect();

    assert_eq!(rebuilt.kind, "stack");
    assert_eq!(rebuilt.id, "g");
    assert_eq!(order, vec!["c1", "c2", "c3"]);
}

#[test]
fn test_changing_columns_recomputes_from_current_order() {
    let root = three_leaves();
    let _two = tree_to_grid(&root, 2);

    // The tree changed since the first projection
    let root = remove_child(&root, "c1");
    let three = tree_to_grid(&root, 3);

    assert_eq!(positions(&three), vec![("c2", 1, 1), ("c3", 2, 1)]);
}

#[test]
fn test_grid_to_tree_sorts_by_row_then_column() {
    let root = three_leaves();
    let lookup = node_lookup(&root);

    let grid = GridLayoutConfig {
        columns: 2,
        row_height: 80,
        gap: 16,
        items: vec![
            item("c1", 2, 2),
            item("c2", 2, 1),
            item("c3", 1, 1),
        ],
    };

    let rebuilt = grid_to_tree(&grid, |id| lookup.get(id).copied(), "out");
    let order: Vec<&str> = rebuilt.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["c3", "c2", "c1"]);
}

#[test]
fn test_missing_nodes_are_skipped_and_overrides_merge() {
    let root = three_leaves();
    let lookup = node_lookup(&root);

    let mut override_props = Props::new();
    override_props.insert("text".to_string(), json!("overridden"));
    override_props.insert("align".to_string(), json!("center"));

    let grid = GridLayoutConfig {
        columns: 2,
        row_height: 80,
        gap: 16,
        items: vec![
            GridItem {
                props: override_props,
                ..item("c2", 1, 1)
            },
            item("ghost", 2, 1),
            item("c2", 1, 2),
        ],
    };

    let rebuilt = grid_to_tree(&grid, |id| lookup.get(id).copied(), "out");

    assert_eq!(rebuilt.children().len(), 1);
    let c2 = &rebuilt.children()[0];
    assert_eq!(c2.props.get("text"), Some(&json!("overridden")));
    assert_eq!(c2.props.get("align"), Some(&json!("center")));

    // Source tree is untouched
    assert_eq!(root.children()[1].props.get("text"), Some(&json!("two")));
}

#[test]
fn test_nested_hierarchy_collapses_to_flat_stack() {
    let root = Node::container("page", "stack")
        .with_child(
            Node::container("card", "card")
                .with_child(Node::leaf("t", "text"))
                .with_child(Node::leaf("b", "button")),
        )
        .with_child(Node::leaf("f", "divider"));

    let grid = tree_to_grid(&root, 2);
    assert_eq!(
        positions(&grid),
        vec![("card", 1, 1), ("t", 2, 1), ("b", 1, 2), ("f", 2, 2)]
    );

    let lookup = node_lookup(&root);
    let rebuilt = grid_to_tree(&grid, |id| lookup.get(id).copied(), "page");
    let flat: Vec<(&str, usize)> = flatten_tree(&rebuilt)
        .iter()
        .map(|f| (f.node.id.as_str(), f.depth))
        .collect();

    assert_eq!(
        flat,
        vec![("page", 0), ("card", 1), ("t", 1), ("b", 1), ("f", 1)]
    );
    assert_ne!(rebuilt, root);
}

#[test]
fn test_grid_json_is_camel_case() {
    let grid = tree_to_grid(&three_leaves(), 2);
    let value = serde_json::to_value(&grid).unwrap();

    assert_eq!(value["rowHeight"], json!(80));
    assert_eq!(value["items"][2]["colStart"], json!(1));
    assert_eq!(value["items"][2]["rowStart"], json!(2));
}

fn item(component: &str, col: u32, row: u32) -> GridItem {
    GridItem {
        component: component.to_string(),
        col_start: col,
        row_start: row,
        col_span: 1,
        row_span: 1,
        props: Props::new(),
    }
}
