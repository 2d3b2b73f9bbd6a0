//! Box layout engine.
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles, edge sizes, sizes and estimate ranges
//! - [`strategy`] - The pluggable child-positioning strategies
//! - [`engine`] - Estimate and commit orchestration shared by all elements
//! - [`placement`] - Out-of-flow and anchored placement overrides
//! - [`context`] - Frame counter, dirty stack and counters of one tree
//! - [`text`] - Text measurement

pub mod box_model;
pub mod context;
pub mod engine;
pub mod placement;
pub mod strategy;
pub mod text;

// Re-exports for convenience
pub use box_model::{Axis, EdgeSizes, Point, Range, Rect, Size};
pub use context::{DirtyStack, LayoutContext, LayoutStats};
pub use engine::{LayoutBox, LayoutInput, LayoutPass};
pub use placement::{Placement, PlacementKind};
pub use strategy::{
    EdgeSlice, EstSizeType, InlineBlock, LayoutState, LayoutStrategy, Stack, StackExpand,
    strategy_for,
};
pub use text::{ApproximateFontMetrics, FontMetrics};
