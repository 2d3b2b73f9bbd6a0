//! Two-pass box layout orchestration.
//!
//! Every element goes through the same protocol, driven by its parent's
//! strategy:
//!
//! 1. **Estimate.** [`LayoutPass::full_estimated_width`] and
//!    [`LayoutPass::full_estimated_height`] return the `[min, max]` range
//!    the element needs, margins included. Results are cached per layout
//!    frame, container size and estimate kind.
//! 2. **Commit.** [`LayoutPass::on_layout`] receives a rectangle, applies
//!    any placement override, strips margin and padding, lets the strategy
//!    position the children, rescales the result to honor explicit sizes and
//!    min/max bounds, and stores the content and padding boxes.

use std::collections::HashMap;

use boxwood_common::warning::warn_once;
use boxwood_dom::{ElementFlags, ElementTree, NodeId};

use super::box_model::{Axis, EdgeSizes, Point, Range, Rect, Size};
use super::context::LayoutContext;
use super::strategy::{EstSizeType, LayoutState, strategy_for};
use crate::block::{BoxSizing, Presence, StyleBlock};
use crate::cascade::ComputedStyles;
use crate::coord::{Coord, CoordUnit};

/// The arguments of an element's last commit, replayed by incremental
/// passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// Rectangle the parent allotted, margins included.
    pub rect: Rect,
    /// Size percentages were resolved against.
    pub container: Size,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EstimateCache {
    frame: u32,
    container: Size,
    ty: EstSizeType,
    value: Range,
}

/// Committed geometry and estimate caches of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutBox {
    /// Content rectangle.
    pub content: Rect,
    /// Content plus padding.
    pub padding_box: Rect,
    /// Padding box plus border. Borders have no width yet, so this equals
    /// the padding box.
    pub border_box: Rect,
    /// Arguments of the last commit, `None` until the element is laid out.
    pub last_input: Option<LayoutInput>,
    estimates: [Option<EstimateCache>; 2],
}

const fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

/// `(size, min, max)` coords of `style` along `axis`.
const fn size_coords(style: &StyleBlock, axis: Axis) -> (Coord, Coord, Coord) {
    match axis {
        Axis::Horizontal => (style.width, style.min_width, style.max_width),
        Axis::Vertical => (style.height, style.min_height, style.max_height),
    }
}

fn resolve_bound(coord: Coord, reference: f32) -> Option<f32> {
    coord.is_length().then(|| coord.resolve(reference))
}

/// Target content size along one axis.
///
/// With border-box sizing the explicit size and the bounds include the
/// padding, so the comparison happens outside it and the padding is taken
/// off afterwards.
fn fit_axis(
    current: f32,
    explicit: Option<f32>,
    min: Option<f32>,
    max: Option<f32>,
    padding: f32,
    border_box: bool,
) -> f32 {
    let outer_padding = if border_box { padding } else { 0.0 };
    let mut target = explicit.unwrap_or(current + outer_padding);
    if let Some(min) = min {
        target = target.max(min);
    }
    if let Some(max) = max {
        target = target.min(max);
    }
    (target - outer_padding).max(0.0)
}

/// Resize `rect` along `axis` to `to`, keeping `origin` fixed.
fn rescale(rect: Rect, origin: Point, axis: Axis, to: f32) -> Rect {
    let (start, from, pivot) = match axis {
        Axis::Horizontal => (rect.x, rect.width, origin.x),
        Axis::Vertical => (rect.y, rect.height, origin.y),
    };
    let start = if from == 0.0 {
        warn_once("Layout", "resizing an empty content box; its position is kept");
        start
    } else {
        (start - pivot).mul_add(to / from, pivot)
    };

    match axis {
        Axis::Horizontal => Rect::new(start, rect.y, to, rect.height),
        Axis::Vertical => Rect::new(rect.x, start, rect.width, to),
    }
}

/// One layout pass over a tree.
///
/// Borrows everything the pass reads (tree, computed styles) and writes
/// (layout boxes, context) for its duration. Strategies receive it to
/// estimate and commit children.
pub struct LayoutPass<'a> {
    tree: &'a ElementTree,
    styles: &'a ComputedStyles,
    boxes: &'a mut HashMap<NodeId, LayoutBox>,
    ctx: &'a mut LayoutContext,
}

impl<'a> LayoutPass<'a> {
    /// Start a pass. Call [`LayoutContext::begin_pass`] first when styles or
    /// the tree changed since the last one.
    pub const fn new(
        tree: &'a ElementTree,
        styles: &'a ComputedStyles,
        boxes: &'a mut HashMap<NodeId, LayoutBox>,
        ctx: &'a mut LayoutContext,
    ) -> Self {
        Self {
            tree,
            styles,
            boxes,
            ctx,
        }
    }

    /// The tree being laid out.
    #[must_use]
    pub const fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    /// Effective style of `node`.
    #[must_use]
    pub fn style(&self, node: NodeId) -> &'a StyleBlock {
        let styles: &'a ComputedStyles = self.styles;
        styles.get(node)
    }

    /// Size of the viewport the roots are laid out in.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.ctx.viewport
    }

    /// The element is laid out at all: not hidden and present.
    #[must_use]
    pub fn needs_layout(&self, node: NodeId) -> bool {
        !self.tree.flags(node).contains(ElementFlags::HIDDEN)
            && self.style(node).presence_or_default() != Presence::None
    }

    /// The element takes space in its parent's strategy: laid out, and not
    /// moved out of flow by a placement.
    #[must_use]
    pub fn part_of_parent_layout(&self, node: NodeId) -> bool {
        self.needs_layout(node)
            && self
                .style(node)
                .placement
                .is_none_or(|placement| placement.apply_on_layout)
    }

    /// Children of `node` that its strategy positions.
    #[must_use]
    pub fn flow_children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| self.part_of_parent_layout(child))
            .collect()
    }

    /// Full width range of `node`: its estimated width plus margin, plus
    /// padding unless a border-box explicit width already includes it.
    ///
    /// With `for_parent_layout`, an element outside its parent's flow
    /// reports [`Range::UNBOUNDED`]; otherwise only hidden elements do.
    pub fn full_estimated_width(
        &mut self,
        node: NodeId,
        container: Size,
        ty: EstSizeType,
        for_parent_layout: bool,
    ) -> Range {
        self.full_estimate(node, container, ty, Axis::Horizontal, for_parent_layout)
    }

    /// Full height range of `node`. See [`LayoutPass::full_estimated_width`].
    pub fn full_estimated_height(
        &mut self,
        node: NodeId,
        container: Size,
        ty: EstSizeType,
        for_parent_layout: bool,
    ) -> Range {
        self.full_estimate(node, container, ty, Axis::Vertical, for_parent_layout)
    }

    /// Full range of `node` along `axis`.
    pub fn full_estimate(
        &mut self,
        node: NodeId,
        container: Size,
        ty: EstSizeType,
        axis: Axis,
        for_parent_layout: bool,
    ) -> Range {
        let participating = if for_parent_layout {
            self.part_of_parent_layout(node)
        } else {
            self.needs_layout(node)
        };
        if !participating {
            return Range::UNBOUNDED;
        }

        let frame = self.ctx.frame;
        if let Some(cache) = self
            .boxes
            .get(&node)
            .and_then(|layout_box| layout_box.estimates[axis_index(axis)])
            && cache.frame == frame
            && cache.container == container
            && cache.ty == ty
        {
            return cache.value;
        }

        let style = self.style(node);
        let range = self.estimated_size(node, container, ty, axis);
        let margin = style.margin_edges(container.width).along(axis);
        let padding = style.padding_edges(container.width).along(axis);
        let folds_padding = style.box_sizing_or_default() == BoxSizing::BorderBox
            && self.explicit_size(node, axis, container.along(axis)).is_some();
        let value = range.grow(if folds_padding { margin } else { margin + padding });

        self.boxes.entry(node).or_default().estimates[axis_index(axis)] = Some(EstimateCache {
            frame,
            container,
            ty,
            value,
        });
        value
    }

    /// Estimated size range of `node` along `axis`, margins and padding
    /// excluded (padding included for a border-box explicit size).
    ///
    /// An explicit size pins both ends; otherwise the strategy estimates the
    /// minimum and the maximum is unbounded. Min/max bounds are applied on
    /// top, the minimum winning over the maximum.
    fn estimated_size(&mut self, node: NodeId, container: Size, ty: EstSizeType, axis: Axis) -> Range {
        let style = self.style(node);
        let reference = container.along(axis);
        let (_, min_coord, max_coord) = size_coords(style, axis);
        let min = resolve_bound(min_coord, reference);
        let max = resolve_bound(max_coord, reference);
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            warn_once("Layout", &format!("min size {min}px exceeds max size {max}px"));
        }

        let outer_padding = if style.box_sizing_or_default() == BoxSizing::BorderBox {
            style.padding_edges(container.width).along(axis)
        } else {
            0.0
        };
        let explicit = self.explicit_size(node, axis, reference);
        let (mut size, mut upper) = match explicit {
            Some(size) => (size, size),
            None => (
                self.strategy_estimate(node, container, ty, axis) + outer_padding,
                f32::INFINITY,
            ),
        };

        if let Some(min) = min {
            size = size.max(min);
            upper = upper.max(min);
        }
        if let Some(max) = max {
            size = size.min(max);
            upper = upper.min(max);
        }

        if explicit.is_none() {
            size = (size - outer_padding).max(0.0);
            if upper.is_finite() {
                upper = (upper - outer_padding).max(0.0);
            }
        }
        Range {
            min: size,
            max: upper,
        }
    }

    fn strategy_estimate(&mut self, node: NodeId, container: Size, ty: EstSizeType, axis: Axis) -> f32 {
        if self.tree.as_element(node).is_none() {
            return 0.0;
        }
        self.ctx.stats.strategy_estimates += 1;
        let strategy = strategy_for(self.style(node).layout_or_default());
        match axis {
            Axis::Horizontal => strategy.estimate_width(self, node, container, ty),
            Axis::Vertical => strategy.estimate_height(self, node, container, ty),
        }
    }

    /// The explicit size along `axis`: a pixel or percentage size from the
    /// style, else the size the element reports for itself. Fractions are
    /// never explicit.
    fn explicit_size(&self, node: NodeId, axis: Axis, reference: f32) -> Option<f32> {
        let (size, _, _) = size_coords(self.style(node), axis);
        if size.is_length() {
            return Some(size.resolve(reference));
        }
        if size.unit == CoordUnit::Fraction {
            return None;
        }
        self.intrinsic_size(node, axis)
    }

    /// Size a leaf reports for itself. Text is measured with the context's
    /// font metrics.
    fn intrinsic_size(&self, node: NodeId, axis: Axis) -> Option<f32> {
        if let Some(text) = self.tree.as_text(node) {
            let font_size = self.style(node).font_size_px();
            return Some(match axis {
                Axis::Horizontal => self.ctx.metrics.text_width(text, font_size),
                Axis::Vertical => self.ctx.metrics.line_height(font_size),
            });
        }
        let intrinsic = self.tree.as_element(node)?.intrinsic;
        match axis {
            Axis::Horizontal => intrinsic.width,
            Axis::Vertical => intrinsic.height,
        }
    }

    /// Commit `node` into `rect` if it is part of its parent's flow.
    pub fn perform_layout(&mut self, node: NodeId, rect: Rect, container: Size) {
        if self.part_of_parent_layout(node) {
            self.on_layout(node, rect, container);
        }
    }

    /// Commit `node` against its parent's content rectangle if it is placed
    /// out of flow.
    pub fn perform_placement(&mut self, node: NodeId, content: Rect, container: Size) {
        let out_of_flow = self
            .style(node)
            .placement
            .is_some_and(|placement| !placement.apply_on_layout);
        if out_of_flow && self.needs_layout(node) {
            self.on_layout(node, content, container);
        }
    }

    /// Commit `node` into `rect`.
    ///
    /// `rect` includes the margins. `container` is the size percentages of
    /// the element's own size resolve against.
    pub fn on_layout(&mut self, node: NodeId, rect: Rect, container: Size) {
        self.ctx.stats.element_layouts += 1;
        self.boxes.entry(node).or_default().last_input = Some(LayoutInput { rect, container });

        let style = self.style(node);
        let mut rect = rect;
        if let Some(placement) = style.placement {
            let reference = if placement.full_screen_relative {
                Rect::from_size(self.ctx.viewport)
            } else {
                rect
            };
            rect = placement.apply(self, node, reference);
        }

        let margin = style.margin_edges(rect.width);
        let padding = style.padding_edges(rect.width);
        let inrect = rect.shrink_by(margin + padding);

        let mut state = LayoutState::new(inrect);
        if self.tree.as_element(node).is_some() {
            self.ctx.stats.strategy_layouts += 1;
            strategy_for(style.layout_or_default()).on_layout(self, node, inrect, &mut state);
        }

        let content = self.constrain(node, state, container, padding);
        let padding_box = content.expand_by(padding);
        let layout_box = self.boxes.entry(node).or_default();
        layout_box.content = content;
        layout_box.padding_box = padding_box;
        layout_box.border_box = padding_box;

        #[cfg(feature = "layout-trace")]
        eprintln!("[LAYOUT] {node:?} rect={rect:?} content={content:?}");

        let tree = self.tree;
        for &child in tree.children(node) {
            self.perform_placement(child, content, content.size());
        }
    }

    /// Rescale the strategy's content rectangle so explicit sizes and
    /// min/max bounds hold.
    fn constrain(&self, node: NodeId, state: LayoutState, container: Size, padding: EdgeSizes) -> Rect {
        let style = self.style(node);
        let border_box = style.box_sizing_or_default() == BoxSizing::BorderBox;
        let mut content = state.final_content_rect;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let reference = container.along(axis);
            let (_, min, max) = size_coords(style, axis);
            let current = content.size().along(axis);
            let target = fit_axis(
                current,
                self.explicit_size(node, axis, reference),
                resolve_bound(min, reference),
                resolve_bound(max, reference),
                padding.along(axis),
                border_box,
            );
            if target != current {
                content = rescale(content, state.scale_origin, axis, target);
            }
        }
        content
    }

    /// Replay the last commit of `node`. Returns `false` if it was never
    /// laid out.
    pub fn relayout(&mut self, node: NodeId) -> bool {
        let Some(input) = self.boxes.get(&node).and_then(|layout_box| layout_box.last_input) else {
            return false;
        };
        self.on_layout(node, input.rect, input.container);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_axis_box_sizing() {
        // width: 100px; padding: 10px on both sides
        assert_eq!(fit_axis(500.0, Some(100.0), None, None, 20.0, true), 80.0);
        assert_eq!(fit_axis(500.0, Some(100.0), None, None, 20.0, false), 100.0);
    }

    #[test]
    fn test_fit_axis_bounds() {
        assert_eq!(fit_axis(50.0, None, Some(60.0), None, 0.0, false), 60.0);
        assert_eq!(fit_axis(50.0, None, None, Some(40.0), 0.0, false), 40.0);
        // max wins over an inverted min
        assert_eq!(fit_axis(50.0, None, Some(60.0), Some(40.0), 0.0, false), 40.0);
        // border-box bounds include the padding
        assert_eq!(fit_axis(50.0, None, None, Some(40.0), 10.0, true), 30.0);
        assert_eq!(fit_axis(0.0, Some(5.0), None, None, 10.0, true), 0.0);
    }

    #[test]
    fn test_rescale_keeps_origin() {
        let rect = Rect::new(10.0, 0.0, 100.0, 20.0);
        let left = rescale(rect, Point::new(10.0, 0.0), Axis::Horizontal, 50.0);
        assert_eq!(left, Rect::new(10.0, 0.0, 50.0, 20.0));

        let right = rescale(rect, Point::new(110.0, 0.0), Axis::Horizontal, 50.0);
        assert_eq!(right, Rect::new(60.0, 0.0, 50.0, 20.0));
    }

    #[test]
    fn test_rescale_empty_box() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        let grown = rescale(rect, Point::new(0.0, 0.0), Axis::Vertical, 12.0);
        assert_eq!(grown, Rect::new(5.0, 5.0, 0.0, 12.0));
    }
}
