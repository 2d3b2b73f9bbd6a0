//! Selector compilation and matching.
//!
//! A selector is a chain of [`SelectorElement`]s. Each one carries an
//! optional element name, any number of `.class` and `#id` requirements,
//! the `:first-child`, `:hover` and `:active` pseudo-classes, and the
//! combinator that links it to the element after it:
//!
//! ```text
//! panel > .row + button.primary:hover   .label
//! └─┬─┘   └┬─┘   └───────┬──────────┘   └─┬──┘
//!   │      │             │                subject (matched against the node)
//!   │      │             └── any ancestor of the subject (descendant)
//!   │      └── immediate previous sibling of `button` (`+` on `.row`)
//!   └── immediate parent of `.row` (`>` on `panel`)
//! ```

use boxwood_dom::{ElementFlags, ElementTree, NodeId};

use crate::error::{Diagnostics, StyleError};
use crate::parser::cursor::{Cursor, is_ident_char};

/// Selector precedence: `(ids, classes + pseudo-classes, element names)`.
///
/// Compared component by component; the universal `*` counts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

impl std::ops::Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

/// One compound step of a selector chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorElement {
    /// Required element name. `None` matches any element (`*` or omitted).
    pub element: Option<String>,
    /// Classes that must all be present.
    pub classes: Vec<String>,
    /// Identifiers that must all equal the element's id.
    pub ids: Vec<String>,
    /// `>` follows this element: the next element's parent must match it.
    pub immediate_parent: bool,
    /// `+` follows this element: the next element's previous sibling must
    /// match it.
    pub prev_sibling: bool,
    /// `:first-child`: the node has no previous sibling.
    pub first_child: bool,
    /// `:hover`: the pointer is over the node.
    pub hover: bool,
    /// `:active`: the left mouse button is held on the node.
    pub active: bool,
}

impl SelectorElement {
    /// Check this element against `node` alone, without looking at
    /// relatives. Text nodes never match.
    #[must_use]
    pub fn is_direct_match(&self, tree: &ElementTree, node: NodeId) -> bool {
        let Some(data) = tree.as_element(node) else {
            return false;
        };

        if self.first_child && tree.prev_sibling(node).is_some() {
            return false;
        }
        if self.hover && !data.flags.contains(ElementFlags::HOVERED) {
            return false;
        }
        if self.active && !data.flags.contains(ElementFlags::PRESSED_LEFT) {
            return false;
        }
        if let Some(name) = &self.element
            && *name != data.tag_name
        {
            return false;
        }

        self.classes.iter().all(|class| data.has_class(class))
            && self.ids.iter().all(|id| data.has_id(id))
    }

    /// This element's share of the selector's specificity.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn specificity(&self) -> Specificity {
        let pseudo = [self.first_child, self.hover, self.active]
            .iter()
            .filter(|&&set| set)
            .count();
        Specificity(
            self.ids.len() as u32,
            (self.classes.len() + pseudo) as u32,
            u32::from(self.element.is_some()),
        )
    }
}

/// A compiled selector. Matching walks the chain right to left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Left to right; the last element is the subject.
    pub elements: Vec<SelectorElement>,
}

impl Selector {
    /// Compile a standalone selector such as `"panel > .row"`.
    ///
    /// Returns `None` if the text is not a valid selector or has trailing
    /// characters.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut errors: Vec<StyleError> = Vec::new();
        let mut diag = Diagnostics::new(text, &mut errors);
        let mut cursor = Cursor::new(text);
        let selector = Self::compile(&mut cursor, &mut diag)?;
        cursor.is_empty().then_some(selector)
    }

    /// Compile one selector, stopping before the `,` or `{` that ends it.
    pub(crate) fn compile(cursor: &mut Cursor<'_>, diag: &mut Diagnostics<'_>) -> Option<Self> {
        let mut elements: Vec<SelectorElement> = Vec::new();
        loop {
            cursor.skip_whitespace();
            if cursor.is_empty() && !elements.is_empty() {
                break;
            }
            if cursor.starts_with(",") || cursor.starts_with("{") {
                break;
            }

            // A combinator belongs to the element before it.
            if let Some(last) = elements.last_mut() {
                if cursor.eat('>') {
                    last.immediate_parent = true;
                } else if cursor.eat('+') {
                    last.prev_sibling = true;
                }
                cursor.skip_whitespace();
            }

            let start = cursor.offset();
            let element = compile_element(cursor, diag)?;
            if cursor.offset() == start {
                let message = if cursor.is_empty() {
                    "unexpected end of selector"
                } else {
                    "unexpected character in selector"
                };
                diag.fail(message, start);
                return None;
            }
            elements.push(element);
        }

        if elements.is_empty() {
            diag.fail("expected selector", cursor.offset());
            return None;
        }
        Some(Self { elements })
    }

    /// Check whether `node` matches the whole chain.
    #[must_use]
    pub fn check(&self, tree: &ElementTree, node: NodeId) -> bool {
        !self.elements.is_empty() && self.check_one(tree, node, self.elements.len() - 1)
    }

    fn check_one(&self, tree: &ElementTree, node: NodeId, index: usize) -> bool {
        if !self.elements[index].is_direct_match(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let previous = &self.elements[index - 1];
        if previous.immediate_parent {
            return tree
                .parent(node)
                .is_some_and(|parent| self.check_one(tree, parent, index - 1));
        }
        if previous.prev_sibling {
            return tree
                .prev_sibling(node)
                .is_some_and(|prev| self.check_one(tree, prev, index - 1));
        }
        tree.ancestors(node)
            .any(|ancestor| self.check_one(tree, ancestor, index - 1))
    }

    /// Sum of the elements' specificities.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.elements
            .iter()
            .map(SelectorElement::specificity)
            .fold(Specificity::default(), |acc, s| acc + s)
    }
}

/// Compile the name and suffixes of one element. Consumes nothing if the
/// cursor is not at an element.
fn compile_element(cursor: &mut Cursor<'_>, diag: &mut Diagnostics<'_>) -> Option<SelectorElement> {
    let mut element = SelectorElement::default();
    if !cursor.eat('*') {
        let name = cursor.take_while(is_ident_char);
        if !name.is_empty() {
            element.element = Some(name.to_string());
        }
    }

    loop {
        if cursor.eat('.') {
            element.classes.push(take_name(cursor, diag, "expected class name")?);
        } else if cursor.eat('#') {
            element.ids.push(take_name(cursor, diag, "expected id")?);
        } else if cursor.eat_str(":first-child") {
            element.first_child = true;
        } else if cursor.eat_str(":hover") {
            element.hover = true;
        } else if cursor.eat_str(":active") {
            element.active = true;
        } else {
            match cursor.peek() {
                None | Some('>' | '+' | ',' | '{') => return Some(element),
                Some(c) if c.is_whitespace() => return Some(element),
                Some(_) => {
                    diag.fail("unexpected character in selector", cursor.offset());
                    return None;
                }
            }
        }
    }
}

fn take_name(cursor: &mut Cursor<'_>, diag: &mut Diagnostics<'_>, message: &str) -> Option<String> {
    let offset = cursor.offset();
    let name = cursor.take_while(is_ident_char);
    if name.is_empty() {
        diag.fail(message, offset);
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let selector = Selector::parse("button.primary#ok:hover").unwrap();
        assert_eq!(selector.elements.len(), 1);
        let element = &selector.elements[0];
        assert_eq!(element.element.as_deref(), Some("button"));
        assert_eq!(element.classes, vec!["primary"]);
        assert_eq!(element.ids, vec!["ok"]);
        assert!(element.hover);
        assert!(!element.active);
    }

    #[test]
    fn test_combinators_attach_to_previous_element() {
        let selector = Selector::parse("#a > #b + #c #d").unwrap();
        let flags: Vec<(bool, bool)> = selector
            .elements
            .iter()
            .map(|e| (e.immediate_parent, e.prev_sibling))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (false, true), (false, false), (false, false)]
        );
    }

    #[test]
    fn test_universal_has_no_name() {
        let selector = Selector::parse("* > .x").unwrap();
        assert_eq!(selector.elements[0].element, None);
        assert_eq!(selector.specificity(), Specificity(0, 1, 0));
    }

    #[test]
    fn test_specificity_counts() {
        let selector = Selector::parse("panel .a.b:first-child #x").unwrap();
        assert_eq!(selector.specificity(), Specificity(1, 3, 1));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("a[href]").is_none());
        assert!(Selector::parse(".").is_none());
        assert!(Selector::parse("a > > b").is_none());
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("a:focus").is_none());
    }
}
