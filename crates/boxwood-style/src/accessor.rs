//! Local style storage, the accessor facade and themes.
//!
//! Elements own at most one local block, allocated on first write. A block
//! may also be assigned wholesale from a [`Theme`], in which case many
//! elements point at the same `Rc`. Writes through an [`Accessor`] never
//! touch a shared block: `Rc::make_mut` copies it first.

use std::collections::HashMap;
use std::rc::Rc;

use boxwood_common::warning::warn_once;
use boxwood_dom::{ElementTree, NodeId};

use crate::block::{BoxSizing, Edge, FontStyle, FontWeight, Layout, PaintFn, Presence, StackingDirection, StyleBlock};
use crate::coord::Coord;
use crate::layout::{DirtyStack, Placement};
use crate::parser::expand_edges;

/// Local style blocks by element.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    blocks: HashMap<NodeId, Rc<StyleBlock>>,
}

impl StyleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Local block of `node`, if it has one.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&StyleBlock> {
        self.blocks.get(&node).map(Rc::as_ref)
    }

    /// The `Rc` behind the local block of `node`.
    #[must_use]
    pub fn get_shared(&self, node: NodeId) -> Option<Rc<StyleBlock>> {
        self.blocks.get(&node).cloned()
    }

    /// Point `node` at `block`, possibly shared with other elements.
    pub fn set_shared(&mut self, node: NodeId, block: Rc<StyleBlock>) {
        let _ = self.blocks.insert(node, block);
    }

    /// Drop the local block of `node`.
    pub fn clear(&mut self, node: NodeId) {
        let _ = self.blocks.remove(&node);
    }

    /// A block of `node` that is safe to write: allocated if missing,
    /// copied if shared.
    pub fn block_mut(&mut self, node: NodeId) -> &mut StyleBlock {
        Rc::make_mut(self.blocks.entry(node).or_default())
    }

    /// Check whether the local block of `node` has other owners.
    #[must_use]
    pub fn is_shared(&self, node: NodeId) -> bool {
        self.blocks.get(&node).is_some_and(|block| Rc::strong_count(block) > 1)
    }
}

/// Named immutable blocks shared by many elements.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    blocks: HashMap<String, Rc<StyleBlock>>,
}

impl Theme {
    /// Create an empty theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace the block called `name`.
    pub fn define(&mut self, name: &str, block: StyleBlock) {
        let _ = self.blocks.insert(name.to_string(), Rc::new(block));
    }

    /// The block called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<StyleBlock>> {
        self.blocks.get(name).cloned()
    }
}

macro_rules! accessors {
    ($($field:ident, $setter:ident: $ty:ty;)*) => {
        $(
            #[doc = concat!("Local `", stringify!($field), "`, undefined if not set.")]
            #[must_use]
            pub fn $field(&self) -> $ty {
                self.store.get(self.node).map(|block| block.$field).unwrap_or_default()
            }

            #[doc = concat!("Set the local `", stringify!($field), "`.")]
            pub fn $setter(&mut self, value: $ty) {
                self.store.block_mut(self.node).$field = value;
                self.on_change_style();
            }
        )*
    };
}

/// Typed read/write access to one element's local style.
///
/// Getters return the raw local value, which may be undefined; the effective
/// value comes out of the cascade. Setters schedule the element for layout.
pub struct Accessor<'a> {
    tree: &'a ElementTree,
    store: &'a mut StyleStore,
    dirty: &'a mut DirtyStack,
    node: NodeId,
}

impl<'a> Accessor<'a> {
    /// Access the local style of `node`.
    pub const fn new(
        tree: &'a ElementTree,
        store: &'a mut StyleStore,
        dirty: &'a mut DirtyStack,
        node: NodeId,
    ) -> Self {
        Self {
            tree,
            store,
            dirty,
            node,
        }
    }

    /// The element being styled.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The whole local block, if allocated.
    #[must_use]
    pub fn block(&self) -> Option<&StyleBlock> {
        self.store.get(self.node)
    }

    accessors! {
        presence, set_presence: Presence;
        layout, set_layout: Layout;
        stacking_direction, set_stacking_direction: StackingDirection;
        edge, set_edge: Edge;
        box_sizing, set_box_sizing: BoxSizing;
        width, set_width: Coord;
        height, set_height: Coord;
        min_width, set_min_width: Coord;
        min_height, set_min_height: Coord;
        max_width, set_max_width: Coord;
        max_height, set_max_height: Coord;
        left, set_left: Coord;
        right, set_right: Coord;
        top, set_top: Coord;
        bottom, set_bottom: Coord;
        margin_left, set_margin_left: Coord;
        margin_right, set_margin_right: Coord;
        margin_top, set_margin_top: Coord;
        margin_bottom, set_margin_bottom: Coord;
        padding_left, set_padding_left: Coord;
        padding_right, set_padding_right: Coord;
        padding_top, set_padding_top: Coord;
        padding_bottom, set_padding_bottom: Coord;
        font_size, set_font_size: Coord;
        font_weight, set_font_weight: FontWeight;
        font_style, set_font_style: FontStyle;
    }

    /// Set the margins from 1 to 4 values in CSS shorthand order.
    pub fn set_margin(&mut self, values: &[Coord]) {
        let Some([top, right, bottom, left]) = expand_edges(values) else {
            warn_once("Style", &format!("margin takes 1 to 4 values, got {}", values.len()));
            return;
        };
        self.store.block_mut(self.node).set_margin(top, right, bottom, left);
        self.on_change_style();
    }

    /// Set the padding from 1 to 4 values in CSS shorthand order.
    pub fn set_padding(&mut self, values: &[Coord]) {
        let Some([top, right, bottom, left]) = expand_edges(values) else {
            warn_once("Style", &format!("padding takes 1 to 4 values, got {}", values.len()));
            return;
        };
        self.store.block_mut(self.node).set_padding(top, right, bottom, left);
        self.on_change_style();
    }

    /// Local placement override.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.store.get(self.node).and_then(|block| block.placement)
    }

    /// Set or clear the placement override.
    pub fn set_placement(&mut self, placement: Option<Placement>) {
        self.store.block_mut(self.node).placement = placement;
        self.on_change_style();
    }

    /// Local paint callback.
    #[must_use]
    pub fn paint_func(&self) -> Option<PaintFn> {
        self.store.get(self.node).and_then(|block| block.paint_func.clone())
    }

    /// Set or clear the paint callback. Painting does not affect layout, so
    /// nothing is scheduled; the next paint already uses the new callback.
    pub fn set_paint_func(&mut self, paint: Option<PaintFn>) {
        self.store.block_mut(self.node).paint_func = paint;
    }

    /// Drop the whole local block.
    pub fn reset(&mut self) {
        self.store.clear(self.node);
        self.on_change_style();
    }

    /// Schedule the parent (the element itself for a root) for layout: a
    /// size change moves the siblings too.
    fn on_change_style(&mut self) {
        self.dirty.add(self.tree.parent(self.node).unwrap_or(self.node));
    }
}
