//! Per-action behavior of the editor

use pagecraft_document::{tree, validate_pages, Node, Page, Props};
use pagecraft_editor::{Action, DispatchOutcome, Editor, EditorError};
use serde_json::json;

fn sample_page() -> Page {
    let content = Node::container("root", "stack")
        .with_child(Node::leaf("title", "heading").with_prop("text", "Welcome"))
        .with_child(
            Node::container("card", "card")
                .with_child(Node::leaf("body", "text").with_prop("text", "Hello"))
                .with_child(Node::leaf("cta", "button").with_prop("label", "Go")),
        )
        .with_child(Node::leaf("footer", "text"));

    Page::new("home", "Home", "/", content)
}

fn editor() -> Editor {
    Editor::with_page(sample_page()).unwrap()
}

fn child_ids(editor: &Editor, id: &str) -> Vec<String> {
    let root = editor.current_tree().unwrap();
    tree::find_node(root, id)
        .unwrap()
        .children()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn props(value: serde_json::Value) -> Props {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_add_node_uses_catalog_defaults_and_selects() {
    let mut editor = editor();

    let outcome = editor
        .dispatch(Action::AddNode {
            parent_id: "card".to_string(),
            index: Some(0),
            kind: "button".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Applied);

    let added = editor.selected_node().unwrap().clone();
    assert_eq!(added.kind, "button");
    assert_eq!(added.props["label"], json!("Button"));
    assert!(!added.is_container());
    assert_eq!(child_ids(&editor, "card")[0], added.id);
}

#[test]
fn test_add_node_into_leaf_or_unknown_kind_is_noop() {
    let mut editor = editor();

    let into_leaf = Action::AddNode {
        parent_id: "title".to_string(),
        index: None,
        kind: "text".to_string(),
    };
    let unknown_kind = Action::AddNode {
        parent_id: "root".to_string(),
        index: None,
        kind: "carousel".to_string(),
    };

    assert_eq!(editor.dispatch(into_leaf).unwrap(), DispatchOutcome::Noop);
    assert_eq!(editor.dispatch(unknown_kind).unwrap(), DispatchOutcome::Noop);
    assert!(!editor.can_undo());
}

#[test]
fn test_insert_node_rejects_clashing_ids() {
    let mut editor = editor();

    let clash = Action::InsertNode {
        parent_id: "root".to_string(),
        index: None,
        node: Node::leaf("body", "text"),
    };
    assert_eq!(editor.dispatch(clash).unwrap(), DispatchOutcome::Noop);

    let fresh = Action::InsertNode {
        parent_id: "root".to_string(),
        index: Some(1),
        node: Node::leaf("hero", "image"),
    };
    assert_eq!(editor.dispatch(fresh).unwrap(), DispatchOutcome::Applied);
    assert_eq!(child_ids(&editor, "root"), vec!["title", "hero", "card", "footer"]);
    assert_eq!(editor.selected_node().map(|n| n.id.as_str()), Some("hero"));
}

#[test]
fn test_insert_node_rejects_children_on_leaf_kinds() {
    let mut editor = editor();
    let before = editor.document().clone();

    let malformed = Action::InsertNode {
        parent_id: "root".to_string(),
        index: None,
        node: Node::container("wrapper", "section")
            .with_child(Node::leaf("h", "heading").with_child(Node::leaf("x", "text"))),
    };
    assert_eq!(editor.dispatch(malformed).unwrap(), DispatchOutcome::Noop);
    assert_eq!(editor.document(), &before);
    assert!(!editor.can_undo());
}

#[test]
fn test_insert_node_opens_container_kinds() {
    let mut editor = editor();
    let bare = Node {
        children: None,
        ..Node::container("panel", "card")
    };

    let outcome = editor
        .dispatch(Action::InsertNode {
            parent_id: "root".to_string(),
            index: None,
            node: bare,
        })
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Applied);

    let panel = tree::find_node(editor.current_tree().unwrap(), "panel").unwrap();
    assert!(panel.is_container());

    let add = Action::AddNode {
        parent_id: "panel".to_string(),
        index: None,
        kind: "text".to_string(),
    };
    assert_eq!(editor.dispatch(add).unwrap(), DispatchOutcome::Applied);

    let pages: Vec<Page> = editor.pages().values().cloned().collect();
    let catalog = editor.catalog();
    assert!(validate_pages(&pages, |kind| catalog.is_container(kind)).is_ok());
}

#[test]
fn test_remove_node_clears_selection_inside_subtree() {
    let mut editor = editor();
    editor
        .dispatch(Action::SelectNode {
            node_id: Some("cta".to_string()),
        })
        .unwrap();

    editor
        .dispatch(Action::RemoveNode {
            node_id: "card".to_string(),
        })
        .unwrap();

    assert_eq!(child_ids(&editor, "root"), vec!["title", "footer"]);
    assert!(editor.selected_node().is_none());
    assert_eq!(editor.state().document.selected_node_id, None);
}

#[test]
fn test_remove_keeps_unrelated_selection() {
    let mut editor = editor();
    editor
        .dispatch(Action::SelectNode {
            node_id: Some("title".to_string()),
        })
        .unwrap();

    editor
        .dispatch(Action::RemoveNode {
            node_id: "footer".to_string(),
        })
        .unwrap();

    assert_eq!(editor.selected_node().map(|n| n.id.as_str()), Some("title"));
}

#[test]
fn test_remove_missing_or_root_is_noop() {
    let mut editor = editor();

    for id in ["ghost", "root"] {
        let outcome = editor
            .dispatch(Action::RemoveNode {
                node_id: id.to_string(),
            })
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Noop);
    }
    assert_eq!(editor.undo_levels(), 0);
}

#[test]
fn test_move_within_and_across_parents() {
    let mut editor = editor();

    editor
        .dispatch(Action::MoveNode {
            node_id: "title".to_string(),
            new_parent_id: "root".to_string(),
            index: 2,
        })
        .unwrap();
    assert_eq!(child_ids(&editor, "root"), vec!["card", "title", "footer"]);

    editor
        .dispatch(Action::MoveNode {
            node_id: "footer".to_string(),
            new_parent_id: "card".to_string(),
            index: 1,
        })
        .unwrap();
    assert_eq!(child_ids(&editor, "card"), vec!["body", "footer", "cta"]);
}

#[test]
fn test_cyclic_moves_are_rejected() {
    let mut editor = editor();
    let before = editor.current_tree().unwrap().clone();

    let into_self = Action::MoveNode {
        node_id: "card".to_string(),
        new_parent_id: "card".to_string(),
        index: 0,
    };
    let root_into_card = Action::MoveNode {
        node_id: "root".to_string(),
        new_parent_id: "card".to_string(),
        index: 0,
    };

    assert_eq!(editor.dispatch(into_self).unwrap(), DispatchOutcome::Noop);
    assert_eq!(editor.dispatch(root_into_card).unwrap(), DispatchOutcome::Noop);
    assert_eq!(editor.current_tree(), Some(&before));
}

#[test]
fn test_update_props_and_style_merge() {
    let mut editor = editor();

    editor
        .dispatch(Action::UpdateNodeProps {
            node_id: "title".to_string(),
            props: props(json!({"level": 1})),
        })
        .unwrap();
    editor
        .dispatch(Action::UpdateNodeStyle {
            node_id: "title".to_string(),
            style: props(json!({"color": "#333"})),
        })
        .unwrap();

    let title = tree::find_node(editor.current_tree().unwrap(), "title").unwrap();
    assert_eq!(title.props["text"], json!("Welcome"));
    assert_eq!(title.props["level"], json!(1));
    assert_eq!(title.style["color"], json!("#333"));
}

#[test]
fn test_update_with_same_values_is_noop() {
    let mut editor = editor();

    let outcome = editor
        .dispatch(Action::UpdateNodeProps {
            node_id: "title".to_string(),
            props: props(json!({"text": "Welcome"})),
        })
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Noop);

    let missing = editor
        .dispatch(Action::UpdateNodeProps {
            node_id: "ghost".to_string(),
            props: props(json!({"text": "x"})),
        })
        .unwrap();
    assert_eq!(missing, DispatchOutcome::Noop);
}

#[test]
fn test_duplicate_inserts_fresh_copy_after_original() {
    let mut editor = editor();

    editor
        .dispatch(Action::DuplicateNode {
            node_id: "card".to_string(),
        })
        .unwrap();

    let ids = child_ids(&editor, "root");
    assert_eq!(ids.len(), 4);
    assert_eq!(ids[1], "card");

    let copy = editor.selected_node().unwrap();
    assert_eq!(copy.id, ids[2]);
    assert_eq!(copy.kind, "card");
    assert_eq!(copy.children().len(), 2);
    assert!(copy.children().iter().all(|c| c.id != "body" && c.id != "cta"));
    assert_eq!(copy.children()[0].props["text"], json!("Hello"));
}

#[test]
fn test_duplicate_root_is_noop() {
    let mut editor = editor();
    let outcome = editor
        .dispatch(Action::DuplicateNode {
            node_id: "root".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Noop);
}

#[test]
fn test_wrap_in_container() {
    let mut editor = editor();

    editor
        .dispatch(Action::WrapInContainer {
            node_id: "footer".to_string(),
            container_kind: "grid".to_string(),
        })
        .unwrap();

    let wrapper = editor.selected_node().unwrap();
    assert_eq!(wrapper.kind, "grid");
    assert_eq!(wrapper.props["columns"], json!(2));
    assert_eq!(wrapper.children().len(), 1);
    assert_eq!(wrapper.children()[0].id, "footer");

    let ids = child_ids(&editor, "root");
    assert_eq!(ids[2], wrapper.id);
}

#[test]
fn test_wrap_rejects_leaf_kinds_and_root() {
    let mut editor = editor();

    let leaf_wrapper = Action::WrapInContainer {
        node_id: "footer".to_string(),
        container_kind: "text".to_string(),
    };
    let wrap_root = Action::WrapInContainer {
        node_id: "root".to_string(),
        container_kind: "card".to_string(),
    };

    assert_eq!(editor.dispatch(leaf_wrapper).unwrap(), DispatchOutcome::Noop);
    assert_eq!(editor.dispatch(wrap_root).unwrap(), DispatchOutcome::Noop);
}

#[test]
fn test_page_lifecycle() {
    let mut editor = editor();

    editor
        .dispatch(Action::AddPage {
            label: "About".to_string(),
            route: "/about".to_string(),
        })
        .unwrap();

    let about = editor.current_page().unwrap().clone();
    assert_eq!(about.label, "About");
    assert_eq!(about.content.kind, "stack");
    assert_eq!(editor.pages().len(), 2);

    editor
        .dispatch(Action::UpdatePage {
            page_id: about.id.clone(),
            label: None,
            route: Some("/sobre".to_string()),
            browser_title: Some("Sobre nós".to_string()),
        })
        .unwrap();
    let updated = &editor.pages()[&about.id];
    assert_eq!(updated.label, "About");
    assert_eq!(updated.route, "/sobre");
    assert_eq!(updated.browser_title.as_deref(), Some("Sobre nós"));

    editor
        .dispatch(Action::RemovePage {
            page_id: about.id.clone(),
        })
        .unwrap();
    assert_eq!(editor.current_page().map(|p| p.id.as_str()), Some("home"));

    let last = editor
        .dispatch(Action::RemovePage {
            page_id: "home".to_string(),
        })
        .unwrap();
    assert_eq!(last, DispatchOutcome::Noop);
    assert_eq!(editor.pages().len(), 1);
}

#[test]
fn test_set_current_page_is_transient() {
    let mut editor = editor();
    editor
        .dispatch(Action::AddPage {
            label: "About".to_string(),
            route: "/about".to_string(),
        })
        .unwrap();
    let levels = editor.undo_levels();

    let outcome = editor
        .dispatch(Action::SetCurrentPage {
            page_id: "home".to_string(),
        })
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Transient);
    assert_eq!(editor.current_page().map(|p| p.id.as_str()), Some("home"));
    assert_eq!(editor.undo_levels(), levels);
}

#[test]
fn test_replace_pages_validates() {
    let mut editor = editor();

    let duplicate_ids = Page::new(
        "p",
        "P",
        "/",
        Node::container("r", "stack")
            .with_child(Node::leaf("x", "text"))
            .with_child(Node::leaf("x", "text")),
    );
    let result = editor.dispatch(Action::ReplacePages {
        pages: vec![duplicate_ids],
        current_page_id: None,
    });
    assert!(matches!(result, Err(EditorError::InvalidDocument(_))));
    assert_eq!(editor.current_page().map(|p| p.id.as_str()), Some("home"));

    let empty = editor.dispatch(Action::ReplacePages {
        pages: vec![],
        current_page_id: None,
    });
    assert!(matches!(empty, Err(EditorError::InvalidDocument(_))));
    assert!(!editor.can_undo());
}

#[test]
fn test_replace_pages_is_undoable() {
    let mut editor = editor();
    let landing = Page::new("landing", "Landing", "/", Node::container("l-root", "section"));

    let outcome = editor
        .dispatch(Action::ReplacePages {
            pages: vec![landing],
            current_page_id: None,
        })
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(editor.current_page().map(|p| p.id.as_str()), Some("landing"));

    assert!(editor.undo());
    assert_eq!(editor.current_page().map(|p| p.id.as_str()), Some("home"));
}

#[test]
fn test_apply_grid_layout_reorders_children() {
    let mut editor = editor();
    let mut grid = editor.grid_layout("root", Some(3)).unwrap();

    // Put the footer first
    for item in grid.items.iter_mut() {
        if item.component == "footer" {
            item.row_start = 0;
            item.props.insert("align".to_string(), json!("center"));
        }
    }

    editor
        .dispatch(Action::ApplyGridLayout {
            node_id: "root".to_string(),
            grid,
        })
        .unwrap();

    let root = editor.current_tree().unwrap();
    assert_eq!(root.kind, "stack");
    let ids: Vec<&str> = root.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["footer", "title", "card", "body", "cta"]);
    assert_eq!(root.children()[0].props["align"], json!("center"));
    assert!(root.children()[2].children().is_empty());
}

#[test]
fn test_partial_grid_keeps_nested_content() {
    let mut editor = editor();
    let mut grid = editor.grid_layout("root", None).unwrap();
    grid.items.retain(|item| item.component == "footer" || item.component == "card");
    for item in grid.items.iter_mut() {
        if item.component == "footer" {
            item.row_start = 0;
        }
    }

    let outcome = editor
        .dispatch(Action::ApplyGridLayout {
            node_id: "root".to_string(),
            grid,
        })
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(child_ids(&editor, "root"), vec!["footer", "card"]);
    assert_eq!(child_ids(&editor, "card"), vec!["body", "cta"]);
}

#[test]
fn test_apply_grid_layout_ignores_outside_nodes() {
    let mut editor = editor();
    let mut grid = editor.grid_layout("card", None).unwrap();
    grid.items.extend(editor.grid_layout("root", None).unwrap().items);

    editor
        .dispatch(Action::ApplyGridLayout {
            node_id: "card".to_string(),
            grid,
        })
        .unwrap();

    assert_eq!(child_ids(&editor, "card"), vec!["body", "cta"]);
    assert_eq!(child_ids(&editor, "root"), vec!["title", "card", "footer"]);
}

#[test]
fn test_preview_resolves_bindings() {
    let page = Page::new(
        "home",
        "Home",
        "/",
        Node::container("root", "stack").with_child(Node::leaf("t", "text").with_prop("text", "Olá {{user.name}}")),
    );
    let editor = Editor::with_page(page).unwrap();

    let preview = editor.preview(&json!({"user": {"name": "Bia"}})).unwrap();
    assert_eq!(preview.children()[0].props["text"], json!("Olá Bia"));
    assert_eq!(
        editor.current_tree().unwrap().children()[0].props["text"],
        json!("Olá {{user.name}}")
    );
}
