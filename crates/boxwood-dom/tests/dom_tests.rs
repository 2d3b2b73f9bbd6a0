//! Tests for element tree mutation and traversal: append_child, remove_child,
//! insert_before, move_children, ancestors, flags.

use boxwood_dom::{ElementData, ElementFlags, ElementTree, NodeId};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut ElementTree, tag: &str) -> NodeId {
    tree.alloc_element(ElementData::new(tag))
}

/// A panel with three children `a`, `b`, `c`.
fn three_children() -> (ElementTree, NodeId, [NodeId; 3]) {
    let mut tree = ElementTree::new();
    let parent = alloc_element(&mut tree, "panel");
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);
    (tree, parent, [a, b, c])
}

// ========== append_child ==========

#[test]
fn test_append_child_links_siblings() {
    let (tree, parent, [a, b, c]) = three_children();

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(c), None);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.roots(), vec![parent]);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = ElementTree::new();
    let parent = alloc_element(&mut tree, "panel");
    let child = alloc_element(&mut tree, "label");
    tree.append_child(parent, child);

    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let (mut tree, parent, [a, b, c]) = three_children();

    tree.remove_child(parent, a);

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let (mut tree, parent, [a, b, c]) = three_children();

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let (mut tree, parent, [a, b, c]) = three_children();
    let stranger = alloc_element(&mut tree, "x");

    tree.remove_child(parent, stranger);

    assert_eq!(tree.children(parent), &[a, b, c]);
}

#[test]
fn test_removed_child_is_not_a_root() {
    let mut tree = ElementTree::new();
    let root = alloc_element(&mut tree, "window");
    let child = alloc_element(&mut tree, "panel");
    let grandchild = alloc_element(&mut tree, "label");
    tree.append_child(root, child);
    tree.append_child(child, grandchild);

    tree.remove_child(root, child);
    assert_eq!(tree.roots(), vec![root]);
    assert!(!tree.is_attached(child));
    assert!(!tree.is_attached(grandchild));
    assert_eq!(tree.subtree(child), vec![child, grandchild]);

    tree.add_root(child);
    assert_eq!(tree.roots(), vec![root, child]);
    assert!(tree.is_attached(grandchild));

    tree.remove_child(root, child);
    tree.append_child(root, child);
    assert!(tree.is_attached(child));
    assert_eq!(tree.roots(), vec![root]);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = ElementTree::new();
    let parent = alloc_element(&mut tree, "panel");
    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, Some(existing));

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_none_appends() {
    let (mut tree, parent, [a, b, c]) = three_children();
    let d = alloc_element(&mut tree, "d");

    tree.insert_before(parent, d, None);

    assert_eq!(tree.children(parent), &[a, b, c, d]);
    assert_eq!(tree.prev_sibling(d), Some(c));
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = ElementTree::new();
    let from = alloc_element(&mut tree, "panel");
    let to = alloc_element(&mut tree, "panel");

    let existing = alloc_element(&mut tree, "x");
    tree.append_child(to, existing);
    let moved = alloc_element(&mut tree, "y");
    tree.append_child(from, moved);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, moved]);
    assert_eq!(tree.parent(moved), Some(to));
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
}

// ========== traversal ==========

#[test]
fn test_ancestors_and_descendant_check() {
    let mut tree = ElementTree::new();
    let root = alloc_element(&mut tree, "window");
    let panel = alloc_element(&mut tree, "panel");
    let label = tree.alloc_text("hello");
    tree.append_child(root, panel);
    tree.append_child(panel, label);

    assert_eq!(tree.ancestors(label).collect::<Vec<_>>(), vec![panel, root]);
    assert!(tree.is_descendant_of(label, root));
    assert!(!tree.is_descendant_of(root, label));
    assert!(!tree.is_descendant_of(panel, panel));
    assert_eq!(tree.as_text(label), Some("hello"));
    assert!(tree.as_element(label).is_none());
}

#[test]
fn test_preceding_siblings_order() {
    let (tree, _, [a, b, c]) = three_children();

    assert_eq!(tree.preceding_siblings(c).collect::<Vec<_>>(), vec![b, a]);
    assert_eq!(tree.preceding_siblings(a).count(), 0);
}

// ========== element data and flags ==========

#[test]
fn test_element_identity() {
    let data = ElementData::new("button")
        .with_class("btn")
        .with_class("primary")
        .with_id("ok");

    assert!(data.has_class("btn"));
    assert!(data.has_class("primary"));
    assert!(!data.has_class("secondary"));
    assert!(data.has_id("ok"));
    assert!(!data.has_id("cancel"));
    assert!(data.intrinsic.is_empty());
}

#[test]
fn test_set_flags_reports_changes() {
    let mut tree = ElementTree::new();
    let button = tree.alloc_element(ElementData::new("button"));
    let text = tree.alloc_text("label");

    assert!(tree.set_flags(button, ElementFlags::HOVERED, true));
    assert!(!tree.set_flags(button, ElementFlags::HOVERED, true));
    assert!(tree.flags(button).contains(ElementFlags::HOVERED));
    assert!(tree.set_flags(button, ElementFlags::HOVERED, false));
    assert!(tree.flags(button).is_empty());

    assert!(!tree.set_flags(text, ElementFlags::HOVERED, true));
    assert!(ElementFlags::PRESSED_ANY.contains(ElementFlags::PRESSED_MIDDLE));
}

#[test]
fn test_hidden_is_inherited_from_ancestors() {
    let mut tree = ElementTree::new();
    let root = alloc_element(&mut tree, "window");
    let child = alloc_element(&mut tree, "panel");
    tree.append_child(root, child);

    assert!(!tree.is_hidden(child));
    let _ = tree.set_flags(root, ElementFlags::HIDDEN, true);
    assert!(tree.is_hidden(child));
}
