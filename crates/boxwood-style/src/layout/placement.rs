//! Placement overrides.
//!
//! A placement replaces the rectangle a parent strategy would hand an
//! element. Unless flagged `apply_on_layout`, the element drops out of its
//! parent's flow entirely and is positioned after the parent commits,
//! relative to the parent's content rectangle or to the viewport.

use boxwood_dom::NodeId;

use super::box_model::{EdgeSizes, Point, Rect};
use super::engine::LayoutPass;
use super::strategy::EstSizeType;

/// How a placement derives its rectangle from the reference rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementKind {
    /// Size the element from its own estimate, then put its `pivot` point
    /// on the reference rectangle's `anchor` point.
    PointAnchored {
        /// Anchor inside the reference rectangle, as fractions of its size.
        anchor: Point,
        /// Point of the element's own box that lands on the anchor, as
        /// fractions of the element's size.
        pivot: Point,
        /// Pixel offset added afterwards.
        bias: Point,
    },
    /// Interpolate every edge inside the reference rectangle.
    RectAnchored {
        /// Edge positions as fractions: `left`/`right` of the width,
        /// `top`/`bottom` of the height, all measured from the top-left.
        anchor: EdgeSizes,
        /// Pixel offsets added to each interpolated edge.
        bias: EdgeSizes,
    },
}

/// A placement override carried on a style block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The rectangle computation.
    pub kind: PlacementKind,
    /// Keep the element in its parent's flow and reposition it inside the
    /// rectangle the parent allots.
    pub apply_on_layout: bool,
    /// Position relative to the viewport instead of the parent's content.
    pub full_screen_relative: bool,
}

impl Placement {
    /// Out-of-flow placement anchoring a point of the element to a point of
    /// the parent's content rectangle.
    #[must_use]
    pub const fn point(anchor: Point, pivot: Point, bias: Point) -> Self {
        Self {
            kind: PlacementKind::PointAnchored {
                anchor,
                pivot,
                bias,
            },
            apply_on_layout: false,
            full_screen_relative: false,
        }
    }

    /// Out-of-flow placement interpolating each edge inside the parent's
    /// content rectangle.
    #[must_use]
    pub const fn rect(anchor: EdgeSizes, bias: EdgeSizes) -> Self {
        Self {
            kind: PlacementKind::RectAnchored { anchor, bias },
            apply_on_layout: false,
            full_screen_relative: false,
        }
    }

    /// Cover the whole viewport.
    #[must_use]
    pub const fn full_screen() -> Self {
        let mut placement = Self::rect(
            EdgeSizes {
                top: 0.0,
                right: 1.0,
                bottom: 1.0,
                left: 0.0,
            },
            EdgeSizes::uniform(0.0),
        );
        placement.full_screen_relative = true;
        placement
    }

    /// Return a copy that stays in the parent's flow.
    #[must_use]
    pub const fn on_layout(mut self) -> Self {
        self.apply_on_layout = true;
        self
    }

    /// Compute the rectangle for `node` inside `reference`.
    pub fn apply(&self, pass: &mut LayoutPass<'_>, node: NodeId, reference: Rect) -> Rect {
        match self.kind {
            PlacementKind::PointAnchored {
                anchor,
                pivot,
                bias,
            } => {
                let container = reference.size();
                let width = pass
                    .full_estimated_width(node, container, EstSizeType::Expanding, false)
                    .min;
                let height = pass
                    .full_estimated_height(node, container, EstSizeType::Expanding, false)
                    .min;
                Rect::new(
                    reference.x + reference.width * anchor.x - width * pivot.x + bias.x,
                    reference.y + reference.height * anchor.y - height * pivot.y + bias.y,
                    width,
                    height,
                )
            }
            PlacementKind::RectAnchored { anchor, bias } => {
                let left = lerp(reference.x, reference.right(), anchor.left) + bias.left;
                let right = lerp(reference.x, reference.right(), anchor.right) + bias.right;
                let top = lerp(reference.y, reference.bottom(), anchor.top) + bias.top;
                let bottom = lerp(reference.y, reference.bottom(), anchor.bottom) + bias.bottom;
                Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
            }
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}
