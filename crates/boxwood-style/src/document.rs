//! The document facade: a tree with its styles and layout.
//!
//! [`UiDocument`] is what the widget layer talks to. It owns the element
//! tree, the local style store, the sheets, the cascade output, the committed
//! layout boxes and the layout context, and keeps them consistent:
//! mutations schedule layout, [`UiDocument::update_layout`] recomputes the
//! cascade and lays out either everything or only what was scheduled.

use std::collections::HashMap;
use std::rc::Rc;

use boxwood_common::warning::clear_warnings;
use boxwood_dom::{ElementData, ElementFlags, ElementTree, NodeId};

use crate::accessor::{Accessor, StyleStore};
use crate::block::{FontStyle, StyleBlock};
use crate::cascade::{ComputedStyles, StyleEngine, compute_styles};
use crate::layout::{
    EstSizeType, FontMetrics, LayoutBox, LayoutContext, LayoutPass, LayoutStats, Range, Rect, Size,
};
use crate::paint::{PaintInfo, Painter};
use crate::parser::Sheet;

/// An element tree together with its style and layout state.
#[derive(Debug)]
pub struct UiDocument {
    tree: ElementTree,
    local: StyleStore,
    engine: StyleEngine,
    computed: ComputedStyles,
    boxes: HashMap<NodeId, LayoutBox>,
    ctx: LayoutContext,
    laid_out_viewport: Option<Size>,
}

impl UiDocument {
    /// Wrap `tree`. Nothing is laid out until the first
    /// [`UiDocument::update_layout`].
    #[must_use]
    pub fn new(tree: ElementTree) -> Self {
        Self::with_context(tree, LayoutContext::new(Size::default()))
    }

    /// Wrap `tree`, measuring text with `metrics`.
    #[must_use]
    pub fn with_metrics(tree: ElementTree, metrics: Box<dyn FontMetrics>) -> Self {
        Self::with_context(tree, LayoutContext::with_metrics(Size::default(), metrics))
    }

    fn with_context(tree: ElementTree, ctx: LayoutContext) -> Self {
        Self {
            tree,
            local: StyleStore::new(),
            engine: StyleEngine::new(),
            computed: ComputedStyles::default(),
            boxes: HashMap::new(),
            ctx,
            laid_out_viewport: None,
        }
    }

    /// The element tree.
    #[must_use]
    pub const fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Allocate a detached element.
    pub fn alloc_element(&mut self, data: ElementData) -> NodeId {
        self.tree.alloc_element(data)
    }

    /// Allocate a detached text node.
    pub fn alloc_text(&mut self, text: &str) -> NodeId {
        self.tree.alloc_text(text)
    }

    /// Append `child` to `parent` and schedule `parent` for layout.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
        self.ctx.dirty.add(parent);
    }

    /// Detach `child` from `parent` and schedule `parent` for layout.
    ///
    /// The detached subtree loses its committed boxes and is neither laid
    /// out nor painted until it is attached again.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.tree.parent(child) != Some(parent) {
            return;
        }
        self.tree.remove_child(parent, child);
        for node in self.tree.subtree(child) {
            let _ = self.boxes.remove(&node);
        }
        self.ctx.dirty.add(parent);
    }

    /// Make a detached node a root again and schedule it for layout.
    pub fn add_root(&mut self, node: NodeId) {
        self.tree.add_root(node);
        self.ctx.dirty.add(node);
    }

    /// Read or write the local style of `node`.
    pub fn style(&mut self, node: NodeId) -> Accessor<'_> {
        Accessor::new(&self.tree, &mut self.local, &mut self.ctx.dirty, node)
    }

    /// Replace the local block of `node` with a possibly shared one, such as
    /// a theme block.
    pub fn set_style_block(&mut self, node: NodeId, block: Rc<StyleBlock>) {
        self.local.set_shared(node, block);
        self.mark_changed(node);
    }

    /// The local style store.
    #[must_use]
    pub const fn local_styles(&self) -> &StyleStore {
        &self.local
    }

    /// Set or clear `flags` on `node`. Interaction flags feed `:hover` and
    /// `:active`, so a change schedules layout.
    pub fn set_flags(&mut self, node: NodeId, flags: ElementFlags, set: bool) {
        if self.tree.set_flags(node, flags, set) {
            self.mark_changed(node);
        }
    }

    /// Set a single flag.
    pub fn set_flag(&mut self, node: NodeId, flag: ElementFlags) {
        self.set_flags(node, flag, true);
    }

    /// Append a sheet. The next layout pass covers the whole tree.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.engine.add_sheet(sheet);
        self.laid_out_viewport = None;
    }

    /// Replace every sheet. The next layout pass covers the whole tree, and
    /// warnings already printed may be printed again.
    pub fn set_sheets(&mut self, sheets: Vec<Sheet>) {
        clear_warnings();
        self.engine.set_sheets(sheets);
        self.laid_out_viewport = None;
    }

    /// Recompute styles and layout.
    ///
    /// A new viewport, new sheets or a first call lay out every root against
    /// the viewport. Otherwise only the scheduled elements are laid out
    /// again, from the rectangle they last received.
    pub fn update_layout(&mut self, viewport: Size) {
        self.ctx.begin_pass();
        self.ctx.viewport = viewport;
        self.computed = compute_styles(&self.tree, &self.local, &self.engine);

        if self.laid_out_viewport == Some(viewport) {
            let mut dirty = std::mem::take(&mut self.ctx.dirty);
            dirty.remove_children(&self.tree);
            let mut pass = LayoutPass::new(&self.tree, &self.computed, &mut self.boxes, &mut self.ctx);
            while let Some(node) = dirty.pop() {
                relayout_from(&mut pass, node);
            }
        } else {
            let mut pass = LayoutPass::new(&self.tree, &self.computed, &mut self.boxes, &mut self.ctx);
            for root in self.tree.roots() {
                if pass.needs_layout(root) {
                    pass.on_layout(root, Rect::from_size(viewport), viewport);
                }
            }
            self.ctx.dirty.clear();
        }
        self.laid_out_viewport = Some(viewport);
    }

    /// Effective style of `node` as of the last layout update.
    #[must_use]
    pub fn computed_style(&self, node: NodeId) -> &StyleBlock {
        self.computed.get(node)
    }

    /// Effective font size of `node` in pixels, 12 when nothing sets one.
    #[must_use]
    pub fn font_size(&self, node: NodeId) -> f32 {
        self.computed.get(node).font_size_px()
    }

    /// Effective numeric font weight of `node`, 400 when nothing sets one.
    #[must_use]
    pub fn font_weight(&self, node: NodeId) -> u16 {
        self.computed.get(node).font_weight_value()
    }

    /// Effective font style of `node`, normal when nothing sets one.
    #[must_use]
    pub fn font_style(&self, node: NodeId) -> FontStyle {
        self.computed.get(node).font_style_or_default()
    }

    /// Committed geometry of `node`, if it was ever laid out.
    #[must_use]
    pub fn layout_box(&self, node: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(&node).filter(|layout_box| layout_box.last_input.is_some())
    }

    /// Full width range of `node` inside `container` with the current
    /// styles, margins included.
    pub fn full_estimated_width(&mut self, node: NodeId, container: Size, ty: EstSizeType) -> Range {
        LayoutPass::new(&self.tree, &self.computed, &mut self.boxes, &mut self.ctx)
            .full_estimated_width(node, container, ty, true)
    }

    /// Full height range of `node`. See [`UiDocument::full_estimated_width`].
    pub fn full_estimated_height(&mut self, node: NodeId, container: Size, ty: EstSizeType) -> Range {
        LayoutPass::new(&self.tree, &self.computed, &mut self.boxes, &mut self.ctx)
            .full_estimated_height(node, container, ty, true)
    }

    /// Work counters of this document's layout passes.
    #[must_use]
    pub const fn layout_stats(&self) -> LayoutStats {
        self.ctx.stats
    }

    /// The layout context.
    #[must_use]
    pub const fn context(&self) -> &LayoutContext {
        &self.ctx
    }

    /// Paint records in tree order.
    #[must_use]
    pub fn paint_infos(&self) -> Vec<PaintInfo> {
        Painter::new(&self.tree, &self.computed, &self.local, &self.boxes).paint_infos()
    }

    /// Invoke every visible element's paint callback.
    pub fn paint(&self) {
        Painter::new(&self.tree, &self.computed, &self.local, &self.boxes).paint();
    }

    fn mark_changed(&mut self, node: NodeId) {
        self.ctx.dirty.add(self.tree.parent(node).unwrap_or(node));
    }
}

/// Lay `node` out again from its last input. A node that never was laid out
/// defers to its nearest laid-out ancestor, or to the viewport if it is a
/// root.
fn relayout_from(pass: &mut LayoutPass<'_>, node: NodeId) {
    let tree = pass.tree();
    if !tree.is_attached(node) || tree.is_hidden(node) || !pass.needs_layout(node) {
        return;
    }
    for candidate in std::iter::once(node).chain(tree.ancestors(node)) {
        if pass.relayout(candidate) {
            return;
        }
    }

    let root = tree.ancestors(node).last().unwrap_or(node);
    if pass.needs_layout(root) {
        let viewport = pass.viewport();
        pass.on_layout(root, Rect::from_size(viewport), viewport);
    }
}
