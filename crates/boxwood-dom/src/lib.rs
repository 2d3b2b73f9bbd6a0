//! Element tree consumed by the Boxwood style and layout engine.
//!
//! The engine never owns widgets. It reads this tree: parent/child/sibling
//! links, the element's identity (tag name, classes, id), the interaction
//! flags maintained by the event system, and the intrinsic size a leaf
//! reports for itself.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

use bitflags::bitflags;

/// A type-safe index into the element tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

bitflags! {
    /// Interaction state of an element.
    ///
    /// These bits are owned by the event system; the style engine only reads
    /// them (`:hover` and `:active` matching, paint state).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u32 {
        /// The pointer is over the element.
        const HOVERED = 1 << 0;
        /// The left mouse button went down on the element and is still held.
        const PRESSED_LEFT = 1 << 1;
        /// The right mouse button went down on the element and is still held.
        const PRESSED_RIGHT = 1 << 2;
        /// The middle mouse button went down on the element and is still held.
        const PRESSED_MIDDLE = 1 << 3;
        /// The left button was pressed and released over the element.
        const CLICKED_LEFT = 1 << 4;
        /// The right button was pressed and released over the element.
        const CLICKED_RIGHT = 1 << 5;
        /// The middle button was pressed and released over the element.
        const CLICKED_MIDDLE = 1 << 6;
        /// The element and its subtree are skipped by layout and painting.
        const HIDDEN = 1 << 7;
        /// The element does not accept input.
        const DISABLED = 1 << 8;
        /// The element is in its checked/selected state.
        const CHECKED = 1 << 9;

        /// Any mouse button is held on the element.
        const PRESSED_ANY = Self::PRESSED_LEFT.bits()
            | Self::PRESSED_RIGHT.bits()
            | Self::PRESSED_MIDDLE.bits();
    }
}

/// Size an element reports for its own content, independent of styling.
///
/// This is the `GetSize` hook of a leaf widget (an image, a color swatch, a
/// fixed-size icon). An axis left as `None` stays undefined, so the layout
/// strategy decides that axis instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntrinsicSize {
    /// Intrinsic width in pixels, if the element has one.
    pub width: Option<f32>,
    /// Intrinsic height in pixels, if the element has one.
    pub height: Option<f32>,
}

impl IntrinsicSize {
    /// Both axes defined.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Check whether neither axis is defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// A node of the element tree.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// The parent element, `None` for a root.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one among its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one among its parent's children.
    pub prev_sibling: Option<NodeId>,

    /// Set when the node was removed from its parent. A detached node is not
    /// a root until it is attached again.
    pub detached: bool,
}

/// The kind of a tree node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// A styled element (panel, button, label...).
    Element(ElementData),
    /// A run of text. Text is laid out like an element whose intrinsic size
    /// comes from font metrics; it never matches a selector.
    Text(String),
}

/// Element-specific data.
///
/// Identity used by selector matching (tag name, classes, id) plus the
/// state the engine reads but never writes (flags, intrinsic size).
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element type name, matched by type selectors (`button`, `panel`).
    pub tag_name: String,
    /// Class names, matched by `.class` selectors.
    pub classes: Vec<String>,
    /// Identifier, matched by `#id` selectors.
    pub id: Option<String>,
    /// Interaction state.
    pub flags: ElementFlags,
    /// The element's own content size.
    pub intrinsic: IntrinsicSize,
}

impl ElementData {
    /// Create element data with the given tag name and nothing else.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            ..Self::default()
        }
    }

    /// Builder: add a class name.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Builder: set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Builder: set the intrinsic size on both axes.
    #[must_use]
    pub const fn with_intrinsic_size(mut self, width: f32, height: f32) -> Self {
        self.intrinsic = IntrinsicSize::new(width, height);
        self
    }

    /// Builder: set interaction flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check whether the element carries the class `name`.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Check whether the element's identifier is `name`.
    #[must_use]
    pub fn has_id(&self, name: &str) -> bool {
        self.id.as_deref() == Some(name)
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
///
/// A tree may hold several roots (one per window or overlay layer).
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl ElementTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            detached: false,
        });
        id
    }

    /// Allocate an element node.
    pub fn alloc_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// Allocate a text node.
    pub fn alloc_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].detached = false;

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Inserts `child` into `parent` immediately before `reference`.
    ///
    /// If `reference` is `None` or not a child of `parent`, `child` is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let Some(index) = reference
            .and_then(|r| self.nodes[parent.0].children.iter().position(|&c| c == r))
        else {
            self.append_child(parent, child);
            return;
        };

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].detached = false;
        self.relink_siblings(parent);
    }

    /// Detaches `child` from `parent`. The child keeps its own subtree but is
    /// no longer a root; see [`ElementTree::add_root`].
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0].children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        node.detached = true;
        self.relink_siblings(parent);
    }

    /// Make a parentless node a root again after it was detached.
    pub fn add_root(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0)
            && node.parent.is_none()
        {
            node.detached = false;
        }
    }

    /// Moves every child of `from` to the end of `to`'s children, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        for child in moved {
            let node = &mut self.nodes[child.0];
            node.prev_sibling = None;
            node.next_sibling = None;
            self.append_child(to, child);
        }
    }

    /// Rebuild prev/next links of every child of `parent` from the child list.
    fn relink_siblings(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        for (i, &child) in children.iter().enumerate() {
            let node = &mut self.nodes[child.0];
            node.prev_sibling = i.checked_sub(1).map(|p| children[p]);
            node.next_sibling = children.get(i + 1).copied();
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Nodes that have no parent and were never detached, in allocation
    /// order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none() && !n.detached)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Whether `id` hangs under a root, or is one.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let top = self.ancestors(id).last().unwrap_or(id);
        self.get(top).is_some_and(|n| !n.detached)
    }

    /// `id` followed by all of its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Interaction flags of a node. Text nodes have none.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> ElementFlags {
        self.as_element(id).map_or(ElementFlags::empty(), |e| e.flags)
    }

    /// Set or clear interaction flags on an element.
    ///
    /// Returns `true` if the flags actually changed.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags, set: bool) -> bool {
        let Some(element) = self.as_element_mut(id) else {
            return false;
        };
        let before = element.flags;
        element.flags.set(flags, set);
        before != element.flags
    }

    /// Check whether the node or any of its ancestors is hidden.
    #[must_use]
    pub fn is_hidden(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .any(|n| self.flags(n).contains(ElementFlags::HIDDEN))
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
