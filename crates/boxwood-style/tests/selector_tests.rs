//! Integration tests for selector matching against an element tree.

use boxwood_dom::{ElementData, ElementFlags, ElementTree, NodeId};
use boxwood_style::{Selector, Sheet, Specificity};

/// A `window` root holding a `#toolbar` panel with two buttons, the first
/// one `.a.b`, the second one `.a`, and a text label under the second.
struct Fixture {
    tree: ElementTree,
    toolbar: NodeId,
    first: NodeId,
    second: NodeId,
    label: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = ElementTree::new();
    let window = tree.alloc_element(ElementData::new("window").with_id("main"));
    let toolbar = tree.alloc_element(ElementData::new("panel").with_id("toolbar"));
    let first = tree.alloc_element(
        ElementData::new("button")
            .with_id("ok")
            .with_class("a")
            .with_class("b"),
    );
    let second = tree.alloc_element(ElementData::new("button").with_id("cancel").with_class("a"));
    let label = tree.alloc_element(ElementData::new("label").with_id("caption"));
    tree.append_child(window, toolbar);
    tree.append_child(toolbar, first);
    tree.append_child(toolbar, second);
    tree.append_child(second, label);
    Fixture {
        tree,
        toolbar,
        first,
        second,
        label,
    }
}

fn matches(selector: &str, tree: &ElementTree, node: NodeId) -> bool {
    Selector::parse(selector).unwrap().check(tree, node)
}

#[test]
fn test_compound_classes_all_required() {
    let f = fixture();
    assert!(matches(".a.b", &f.tree, f.first));
    assert!(!matches(".a.b", &f.tree, f.second));
    assert!(matches(".a", &f.tree, f.second));
    assert!(matches("button.a#cancel", &f.tree, f.second));
    assert!(!matches("panel.a", &f.tree, f.second));
}

#[test]
fn test_child_combinator() {
    let f = fixture();
    assert!(matches("#toolbar > #ok", &f.tree, f.first));
    assert!(!matches("#main > #ok", &f.tree, f.first));
}

#[test]
fn test_descendant_combinator() {
    let f = fixture();
    assert!(matches("#main #ok", &f.tree, f.first));
    assert!(matches("window label", &f.tree, f.label));
    assert!(!matches("#ok label", &f.tree, f.label));
}

#[test]
fn test_sibling_combinator() {
    let f = fixture();
    assert!(matches("#ok + #cancel", &f.tree, f.second));
    assert!(!matches("#cancel + #ok", &f.tree, f.first));
}

#[test]
fn test_mixed_chain() {
    let f = fixture();
    assert!(matches("window > panel .a + .a > label", &f.tree, f.label));
    assert!(!matches("window > .a", &f.tree, f.first));
}

#[test]
fn test_first_child() {
    let f = fixture();
    assert!(matches("button:first-child", &f.tree, f.first));
    assert!(!matches("button:first-child", &f.tree, f.second));
}

#[test]
fn test_interaction_pseudo_classes() {
    let mut f = fixture();
    assert!(!matches(".a:hover", &f.tree, f.second));

    let _ = f.tree.set_flags(f.second, ElementFlags::HOVERED, true);
    assert!(matches(".a:hover", &f.tree, f.second));
    assert!(!matches(".a:active", &f.tree, f.second));

    // only the left button counts as active
    let _ = f.tree.set_flags(f.second, ElementFlags::PRESSED_RIGHT, true);
    assert!(!matches(".a:active", &f.tree, f.second));
    let _ = f.tree.set_flags(f.second, ElementFlags::PRESSED_LEFT, true);
    assert!(matches(".a:active", &f.tree, f.second));
}

#[test]
fn test_text_never_matches() {
    let mut f = fixture();
    let text = f.tree.alloc_text("Cancel");
    f.tree.append_child(f.second, text);
    assert!(!matches("*", &f.tree, text));
    assert!(matches("*", &f.tree, f.toolbar));
}

#[test]
fn test_definition_reports_best_specificity() {
    let f = fixture();
    let sheet = Sheet::parse(".a, #ok, panel button { width: 1; }").unwrap();
    let definition = &sheet.definitions()[0];

    assert_eq!(
        definition.matched_specificity(&f.tree, f.first),
        Some(Specificity(1, 0, 0))
    );
    assert_eq!(
        definition.matched_specificity(&f.tree, f.second),
        Some(Specificity(0, 1, 0))
    );
    assert_eq!(definition.matched_specificity(&f.tree, f.toolbar), None);
    assert!(definition.check(&f.tree, f.second));
}

#[test]
fn test_specificity_ordering() {
    assert!(Specificity(1, 0, 0) > Specificity(0, 9, 9));
    assert!(Specificity(0, 2, 0) > Specificity(0, 1, 5));
    assert_eq!(
        Selector::parse(".btn:hover").unwrap().specificity(),
        Specificity::new(0, 2, 0)
    );
}
