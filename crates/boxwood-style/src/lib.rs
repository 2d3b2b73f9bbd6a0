//! Style cascade and box layout for the Boxwood UI toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Coordinates** - lengths in pixels, percent or fractions, plus the
//!   undefined, inherit and auto states
//! - **Style blocks** - one flat record of every style property, with the
//!   direct and parent merge policies
//! - **Stylesheets** - a small CSS-like grammar compiled into definitions,
//!   with error-tolerant declarations and line/column diagnostics
//! - **Selectors** - element, class, id and pseudo-class chains with
//!   descendant, child and sibling combinators
//! - **Cascade** - local styles, matched definitions by specificity, and
//!   inheritance folded into one effective block per element
//! - **Accessor** - typed get/set of an element's local style, with
//!   copy-on-write for blocks shared through a theme
//! - **Layout** - estimate-then-commit box layout with the stack,
//!   stack-expand, inline-block and edge-slice strategies, placements,
//!   box sizing, min/max clamping and per-frame estimate caching
//! - **Paint records** - visible elements, their rectangles and interaction
//!   state, in tree order
//!
//! # Not Yet Implemented
//!
//! - Borders (the border box equals the padding box)
//! - Full CSS: grid, general flexbox, attribute selectors, media queries
//! - Transitions and animations

/// Local style storage, accessor and themes.
pub mod accessor;
/// The style block and its keyword enums.
pub mod block;
/// Cascade and effective styles.
pub mod cascade;
/// Coordinates and unit resolution.
pub mod coord;
/// Document facade tying tree, styles and layout together.
pub mod document;
/// Compile diagnostics.
pub mod error;
/// Box layout.
pub mod layout;
/// Paint records.
pub mod paint;
/// Stylesheet compiler.
pub mod parser;
/// Selector compilation and matching.
pub mod selector;

// Re-exports for convenience
pub use accessor::{Accessor, StyleStore, Theme};
pub use block::{
    BoxSizing, DEFAULT_FONT_SIZE_PX, Edge, FontStyle, FontWeight, Layout, PaintFn, Presence,
    StackingDirection, StyleBlock,
};
pub use cascade::{ComputedStyles, StyleEngine, compute_styles};
pub use coord::{Coord, CoordUnit, resolve_units};
pub use document::UiDocument;
pub use error::{ErrorCallback, SheetError, StyleError, source_location};
pub use layout::{
    ApproximateFontMetrics, EdgeSizes, EstSizeType, FontMetrics, LayoutBox, LayoutContext,
    Placement, PlacementKind, Point, Range, Rect, Size,
};
pub use paint::{PaintInfo, PaintState, Painter};
pub use parser::{Definition, Sheet};
pub use selector::{Selector, SelectorElement, Specificity};
