//! Layout strategies.
//!
//! A strategy decides where an element's children go. It answers two kinds
//! of question for the element it is attached to:
//!
//! - how large is the content, given the size of the container
//!   ([`LayoutStrategy::estimate_width`], [`LayoutStrategy::estimate_height`])
//! - where does each child go inside the inner rectangle
//!   ([`LayoutStrategy::on_layout`])
//!
//! Strategies are stateless. Explicit sizes, min/max bounds, margins and
//! padding are the orchestration's business; a strategy only sees the inner
//! rectangle and reports the raw content rectangle plus the corner that
//! stays fixed if the orchestration has to rescale it.

use boxwood_dom::NodeId;

use super::box_model::{Axis, Point, Range, Rect, Size};
use super::engine::LayoutPass;
use crate::block::{Edge, Layout, StackingDirection};
use crate::coord::CoordUnit;

/// Which size an estimate asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstSizeType {
    /// The size the content takes when nothing constrains it: inline
    /// content on one line.
    Expanding,
    /// The size the content takes inside the given container: inline
    /// content wrapped at the container width.
    Exact,
}

/// Output of a strategy's commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// The content rectangle the strategy settled on.
    pub final_content_rect: Rect,
    /// Fixed point when the orchestration rescales the content rectangle.
    pub scale_origin: Point,
}

impl LayoutState {
    /// A state covering `inrect`, anchored at its top-left corner.
    #[must_use]
    pub const fn new(inrect: Rect) -> Self {
        Self {
            final_content_rect: inrect,
            scale_origin: inrect.origin(),
        }
    }
}

/// A child-positioning algorithm.
pub trait LayoutStrategy {
    /// Content width of `node` inside a container of size `container`.
    fn estimate_width(
        &self,
        pass: &mut LayoutPass<'_>,
        node: NodeId,
        container: Size,
        ty: EstSizeType,
    ) -> f32;

    /// Content height of `node` inside a container of size `container`.
    fn estimate_height(
        &self,
        pass: &mut LayoutPass<'_>,
        node: NodeId,
        container: Size,
        ty: EstSizeType,
    ) -> f32;

    /// Position the children of `node` inside `inrect` and write the content
    /// rectangle into `state`.
    fn on_layout(&self, pass: &mut LayoutPass<'_>, node: NodeId, inrect: Rect, state: &mut LayoutState);
}

/// The strategy implementing `layout`.
#[must_use]
pub fn strategy_for(layout: Layout) -> &'static dyn LayoutStrategy {
    match layout {
        Layout::InlineBlock => &InlineBlock,
        Layout::StackExpand => &StackExpand,
        Layout::EdgeSlice => &EdgeSlice,
        Layout::Stack | Layout::Undefined | Layout::Inherit => &Stack,
    }
}

/// Children one after another along the stacking direction, each at its
/// estimated minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stack;

/// [`Stack`], with leftover main-axis space shared among children whose
/// main-axis size is a fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackExpand;

/// Children flowing left to right, wrapping at the right edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineBlock;

/// Children cut from the edges of the remaining rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeSlice;

const fn main_axis(direction: StackingDirection) -> Axis {
    match direction {
        StackingDirection::LeftToRight | StackingDirection::RightToLeft => Axis::Horizontal,
        StackingDirection::TopDown
        | StackingDirection::BottomUp
        | StackingDirection::Undefined
        | StackingDirection::Inherit => Axis::Vertical,
    }
}

/// Children's minimums summed along the main axis, maximized across it.
fn estimate_stack(
    pass: &mut LayoutPass<'_>,
    node: NodeId,
    container: Size,
    ty: EstSizeType,
    axis: Axis,
) -> f32 {
    let main = main_axis(pass.style(node).stacking_direction_or_default());
    let mut total: f32 = 0.0;
    for child in pass.flow_children(node) {
        let size = pass.full_estimate(child, container, ty, axis, true).min;
        if axis == main {
            total += size;
        } else {
            total = total.max(size);
        }
    }
    total
}

fn layout_stack(
    pass: &mut LayoutPass<'_>,
    node: NodeId,
    inrect: Rect,
    state: &mut LayoutState,
    expand: bool,
) {
    let direction = pass.style(node).stacking_direction_or_default();
    let main = main_axis(direction);
    let container = inrect.size();
    let children = pass.flow_children(node);

    let ranges: Vec<Range> = children
        .iter()
        .map(|&child| pass.full_estimate(child, container, EstSizeType::Expanding, main, true))
        .collect();
    let mut sizes: Vec<f32> = ranges.iter().map(|range| range.min).collect();
    if expand {
        distribute_leftover(pass, &children, &ranges, &mut sizes, container.along(main), main);
    }

    state.final_content_rect = inrect;
    state.scale_origin = match direction {
        StackingDirection::BottomUp => Point::new(inrect.x, inrect.bottom()),
        StackingDirection::RightToLeft => Point::new(inrect.right(), inrect.y),
        StackingDirection::TopDown
        | StackingDirection::LeftToRight
        | StackingDirection::Undefined
        | StackingDirection::Inherit => inrect.origin(),
    };

    let mut offset = 0.0;
    for (&child, &size) in children.iter().zip(&sizes) {
        let cross = pass.full_estimate(child, container, EstSizeType::Expanding, main.cross(), true);
        let cross_size = cross.clamp(container.along(main.cross()));
        let rect = match direction {
            StackingDirection::BottomUp => {
                Rect::new(inrect.x, inrect.bottom() - offset - size, cross_size, size)
            }
            StackingDirection::LeftToRight => {
                Rect::new(inrect.x + offset, inrect.y, size, cross_size)
            }
            StackingDirection::RightToLeft => {
                Rect::new(inrect.right() - offset - size, inrect.y, size, cross_size)
            }
            StackingDirection::TopDown
            | StackingDirection::Undefined
            | StackingDirection::Inherit => Rect::new(inrect.x, inrect.y + offset, cross_size, size),
        };
        offset += size;
        pass.perform_layout(child, rect, container);
    }
}

/// Share the space left after every child got its minimum among the
/// fraction-sized children, in proportion to their fractions. A child never
/// grows past its estimated maximum.
fn distribute_leftover(
    pass: &LayoutPass<'_>,
    children: &[NodeId],
    ranges: &[Range],
    sizes: &mut [f32],
    available: f32,
    main: Axis,
) {
    let leftover = (available - sizes.iter().sum::<f32>()).max(0.0);
    let fractions: Vec<f32> = children
        .iter()
        .map(|&child| {
            let style = pass.style(child);
            let coord = match main {
                Axis::Horizontal => style.width,
                Axis::Vertical => style.height,
            };
            if coord.unit == CoordUnit::Fraction {
                coord.value.max(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total: f32 = fractions.iter().sum();
    if leftover <= 0.0 || total <= 0.0 {
        return;
    }

    for ((size, range), fraction) in sizes.iter_mut().zip(ranges).zip(fractions) {
        if fraction > 0.0 {
            *size = range.clamp(*size + leftover * fraction / total);
        }
    }
}

impl LayoutStrategy for Stack {
    fn estimate_width(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_stack(pass, node, container, ty, Axis::Horizontal)
    }

    fn estimate_height(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_stack(pass, node, container, ty, Axis::Vertical)
    }

    fn on_layout(&self, pass: &mut LayoutPass<'_>, node: NodeId, inrect: Rect, state: &mut LayoutState) {
        layout_stack(pass, node, inrect, state, false);
    }
}

impl LayoutStrategy for StackExpand {
    fn estimate_width(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_stack(pass, node, container, ty, Axis::Horizontal)
    }

    fn estimate_height(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_stack(pass, node, container, ty, Axis::Vertical)
    }

    fn on_layout(&self, pass: &mut LayoutPass<'_>, node: NodeId, inrect: Rect, state: &mut LayoutState) {
        layout_stack(pass, node, inrect, state, true);
    }
}

/// Extent of the children's line boxes when lines break at `wrap_width`.
fn flow_extent(pass: &mut LayoutPass<'_>, node: NodeId, container: Size, wrap_width: f32) -> Size {
    let mut extent = Size::default();
    let mut line = Size::default();
    for child in pass.flow_children(node) {
        let width = pass.full_estimated_width(child, container, EstSizeType::Expanding, true).min;
        let height = pass.full_estimated_height(child, container, EstSizeType::Expanding, true).min;
        if line.width > 0.0 && line.width + width > wrap_width {
            extent.width = extent.width.max(line.width);
            extent.height += line.height;
            line = Size::default();
        }
        line.width += width;
        line.height = line.height.max(height);
    }
    extent.width = extent.width.max(line.width);
    extent.height += line.height;
    extent
}

const fn wrap_width(container: Size, ty: EstSizeType) -> f32 {
    match ty {
        EstSizeType::Expanding => f32::INFINITY,
        EstSizeType::Exact => container.width,
    }
}

impl LayoutStrategy for InlineBlock {
    fn estimate_width(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        flow_extent(pass, node, container, wrap_width(container, ty)).width
    }

    fn estimate_height(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        flow_extent(pass, node, container, wrap_width(container, ty)).height
    }

    fn on_layout(&self, pass: &mut LayoutPass<'_>, node: NodeId, inrect: Rect, state: &mut LayoutState) {
        let container = inrect.size();
        let mut x = inrect.x;
        let mut y = inrect.y;
        let mut line_height: f32 = 0.0;
        for child in pass.flow_children(node) {
            let width = pass.full_estimated_width(child, container, EstSizeType::Expanding, true).min;
            let height = pass.full_estimated_height(child, container, EstSizeType::Expanding, true).min;
            if x > inrect.x && x + width > inrect.right() {
                x = inrect.x;
                y += line_height;
                line_height = 0.0;
            }
            pass.perform_layout(child, Rect::new(x, y, width, height), container);
            x += width;
            line_height = line_height.max(height);
        }
        *state = LayoutState::new(inrect);
    }
}

fn estimate_edge_slice(
    pass: &mut LayoutPass<'_>,
    node: NodeId,
    container: Size,
    ty: EstSizeType,
    axis: Axis,
) -> f32 {
    let children = pass.flow_children(node);
    let mut edged = Vec::new();
    let mut size: f32 = 0.0;
    for &child in &children {
        match pass.style(child).edge {
            Edge::Undefined | Edge::Inherit => {
                size = size.max(pass.full_estimate(child, container, ty, axis, true).min);
            }
            edge => edged.push((child, edge)),
        }
    }

    // Work outwards from the remainder: an edge slice adds its thickness
    // across its own axis and has to fit everything inside along the other.
    for &(child, edge) in edged.iter().rev() {
        let child_size = pass.full_estimate(child, container, ty, axis, true).min;
        let stacks = match axis {
            Axis::Horizontal => matches!(edge, Edge::Left | Edge::Right),
            Axis::Vertical => matches!(edge, Edge::Top | Edge::Bottom),
        };
        if stacks {
            size += child_size;
        } else {
            size = size.max(child_size);
        }
    }
    size
}

impl LayoutStrategy for EdgeSlice {
    fn estimate_width(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_edge_slice(pass, node, container, ty, Axis::Horizontal)
    }

    fn estimate_height(&self, pass: &mut LayoutPass<'_>, node: NodeId, container: Size, ty: EstSizeType) -> f32 {
        estimate_edge_slice(pass, node, container, ty, Axis::Vertical)
    }

    fn on_layout(&self, pass: &mut LayoutPass<'_>, node: NodeId, inrect: Rect, state: &mut LayoutState) {
        let container = inrect.size();
        let mut remaining = inrect;
        let mut rest = Vec::new();
        for child in pass.flow_children(node) {
            let edge = pass.style(child).edge;
            let rect = match edge {
                Edge::Top | Edge::Bottom => {
                    let height = pass
                        .full_estimated_height(child, container, EstSizeType::Expanding, true)
                        .min
                        .min(remaining.height);
                    remaining.height -= height;
                    if edge == Edge::Top {
                        remaining.y += height;
                        Rect::new(remaining.x, remaining.y - height, remaining.width, height)
                    } else {
                        Rect::new(remaining.x, remaining.bottom(), remaining.width, height)
                    }
                }
                Edge::Left | Edge::Right => {
                    let width = pass
                        .full_estimated_width(child, container, EstSizeType::Expanding, true)
                        .min
                        .min(remaining.width);
                    remaining.width -= width;
                    if edge == Edge::Left {
                        remaining.x += width;
                        Rect::new(remaining.x - width, remaining.y, width, remaining.height)
                    } else {
                        Rect::new(remaining.right(), remaining.y, width, remaining.height)
                    }
                }
                Edge::Undefined | Edge::Inherit => {
                    rest.push(child);
                    continue;
                }
            };
            pass.perform_layout(child, rect, container);
        }

        for child in rest {
            pass.perform_layout(child, remaining, container);
        }
        *state = LayoutState::new(inrect);
    }
}
