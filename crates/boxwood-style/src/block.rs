//! The style block: one flat record of every style property.
//!
//! Elements hold at most one local block; stylesheet definitions hold one
//! each; themes share immutable blocks between many elements. The cascade
//! folds them together with [`StyleBlock::merge_direct`] and
//! [`StyleBlock::merge_parent`].

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use strum_macros::EnumString;

use crate::coord::{Coord, CoordUnit};
use crate::layout::{EdgeSizes, Placement};
use crate::paint::PaintInfo;

/// Font size used when nothing in the element's ancestry sets one.
pub const DEFAULT_FONT_SIZE_PX: f32 = 12.0;

/// Numeric weight of `font-weight: normal`.
pub const FONT_WEIGHT_NORMAL: u16 = 400;

/// Numeric weight of `font-weight: bold`.
pub const FONT_WEIGHT_BOLD: u16 = 700;

/// Callback invoked by the rendering collaborator to paint an element.
pub type PaintFn = Rc<dyn Fn(&PaintInfo)>;

/// Whether an element takes part in layout and painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Presence {
    /// Not set.
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Skipped by layout and painting.
    None,
    /// Laid out but never painted.
    LayoutOnly,
    /// Laid out and painted.
    Visible,
}

/// Which layout strategy positions an element's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Layout {
    /// Not set. Lays out as [`Layout::Stack`].
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Intrinsic size is authoritative, children flow inside it.
    InlineBlock,
    /// Children placed one after another along the stacking direction.
    Stack,
    /// Like `Stack`, leftover space shared among fraction-sized children.
    StackExpand,
    /// Children peeled off the edges of the remaining rectangle.
    EdgeSlice,
}

/// Main-axis direction of the stack layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StackingDirection {
    /// Not set. Stacks top-down.
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// First child at the top.
    TopDown,
    /// First child at the right.
    RightToLeft,
    /// First child at the bottom.
    BottomUp,
    /// First child at the left.
    LeftToRight,
}

/// The edge an edge-slice child is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Edge {
    /// Not set. The child receives the remaining rectangle.
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Slice from the top.
    Top,
    /// Slice from the right.
    Right,
    /// Slice from the bottom.
    Bottom,
    /// Slice from the left.
    Left,
}

/// Whether an explicit size includes padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSizing {
    /// Not set. Behaves as `ContentBox`.
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Explicit sizes measure the content; padding is added outside.
    ContentBox,
    /// Explicit sizes include the padding.
    BorderBox,
}

/// Slant of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FontStyle {
    /// Not set. Inherited from the parent, `Normal` at the root.
    #[default]
    #[strum(disabled)]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Upright.
    Normal,
    /// Slanted.
    Italic,
}

/// Thickness of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    /// Not set. Inherited from the parent, normal at the root.
    #[default]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Numeric weight, 100 to 900.
    Weight(u16),
}

impl FontWeight {
    /// `font-weight: normal`.
    pub const NORMAL: Self = Self::Weight(FONT_WEIGHT_NORMAL);
    /// `font-weight: bold`.
    pub const BOLD: Self = Self::Weight(FONT_WEIGHT_BOLD);
}

/// A property value that can be unset or inherited.
pub trait StyleValue: Copy {
    /// The value was never set.
    fn is_unset(&self) -> bool;
    /// The value defers to the parent.
    fn is_inherited(&self) -> bool;
}

impl StyleValue for Coord {
    fn is_unset(&self) -> bool {
        !self.is_defined()
    }

    fn is_inherited(&self) -> bool {
        self.unit == CoordUnit::Inherit
    }
}

macro_rules! impl_style_value {
    ($($ty:ident),* $(,)?) => {
        $(
            impl StyleValue for $ty {
                fn is_unset(&self) -> bool {
                    matches!(self, Self::Undefined)
                }

                fn is_inherited(&self) -> bool {
                    matches!(self, Self::Inherit)
                }
            }
        )*
    };
}

impl_style_value!(Presence, Layout, StackingDirection, Edge, BoxSizing, FontStyle, FontWeight);

/// Invoke `$callback!($args ; field, field, ...)` with every mergeable
/// value field of [`StyleBlock`].
macro_rules! with_value_fields {
    ($callback:ident!($($args:tt)*)) => {
        $callback!($($args)* ;
            presence, layout, stacking_direction, edge, box_sizing,
            width, height, min_width, min_height, max_width, max_height,
            left, right, top, bottom,
            margin_left, margin_right, margin_top, margin_bottom,
            padding_left, padding_right, padding_top, padding_bottom,
            font_size, font_weight, font_style
        )
    };
}

macro_rules! fill_if {
    ($dst:expr, $src:expr, $test:ident ; $($field:ident),*) => {
        $(
            if $dst.$field.$test() {
                $dst.$field = $src.$field;
            }
        )*
    };
}

macro_rules! fields_eq {
    ($a:expr, $b:expr ; $($field:ident),*) => {
        true $(&& $a.$field == $b.$field)*
    };
}

macro_rules! debug_fields {
    ($builder:expr, $block:expr ; $($field:ident),*) => {
        $( let _ = $builder.field(stringify!($field), &$block.$field); )*
    };
}

/// Every style property of one element.
///
/// All fields start out undefined. Which value an undefined field finally
/// takes is decided by the cascade or, for what is still undefined after it,
/// by the `*_or_default` accessors.
#[derive(Clone, Default)]
pub struct StyleBlock {
    /// Layout and paint participation.
    pub presence: Presence,
    /// Strategy for positioning children.
    pub layout: Layout,
    /// Main axis of the stack layouts.
    pub stacking_direction: StackingDirection,
    /// Edge this element is sliced from inside an edge-slice parent.
    pub edge: Edge,
    /// Whether explicit sizes include padding.
    pub box_sizing: BoxSizing,

    /// Explicit width.
    pub width: Coord,
    /// Explicit height.
    pub height: Coord,
    /// Lower bound on the width.
    pub min_width: Coord,
    /// Lower bound on the height.
    pub min_height: Coord,
    /// Upper bound on the width.
    pub max_width: Coord,
    /// Upper bound on the height.
    pub max_height: Coord,

    /// Left offset, read by placements.
    pub left: Coord,
    /// Right offset, read by placements.
    pub right: Coord,
    /// Top offset, read by placements.
    pub top: Coord,
    /// Bottom offset, read by placements.
    pub bottom: Coord,

    /// Left margin.
    pub margin_left: Coord,
    /// Right margin.
    pub margin_right: Coord,
    /// Top margin.
    pub margin_top: Coord,
    /// Bottom margin.
    pub margin_bottom: Coord,

    /// Left padding.
    pub padding_left: Coord,
    /// Right padding.
    pub padding_right: Coord,
    /// Top padding.
    pub padding_top: Coord,
    /// Bottom padding.
    pub padding_bottom: Coord,

    /// Text size.
    pub font_size: Coord,
    /// Text weight.
    pub font_weight: FontWeight,
    /// Text slant.
    pub font_style: FontStyle,

    /// Overrides the rectangle the parent assigns.
    pub placement: Option<Placement>,
    /// Paints the element.
    pub paint_func: Option<PaintFn>,
}

// Many elements allocate a block; keep it small.
const _: () = assert!(size_of::<StyleBlock>() <= 320);

impl StyleBlock {
    /// Fill every undefined field from `other`.
    ///
    /// Fields already defined here are never touched, so applying the same
    /// source twice is a no-op the second time. Callers merge the most
    /// important source first.
    pub fn merge_direct(&mut self, other: &Self) {
        with_value_fields!(fill_if!(self, other, is_unset));

        if self.placement.is_none() {
            self.placement = other.placement;
        }
        if self.paint_func.is_none() {
            self.paint_func.clone_from(&other.paint_func);
        }
    }

    /// Replace every field set to `inherit` with the value from `parent`.
    pub fn merge_parent(&mut self, parent: &Self) {
        with_value_fields!(fill_if!(self, parent, is_inherited));
    }

    /// The layout strategy, `Stack` when unset.
    #[must_use]
    pub const fn layout_or_default(&self) -> Layout {
        match self.layout {
            Layout::Undefined | Layout::Inherit => Layout::Stack,
            layout => layout,
        }
    }

    /// The stacking direction, `TopDown` when unset.
    #[must_use]
    pub const fn stacking_direction_or_default(&self) -> StackingDirection {
        match self.stacking_direction {
            StackingDirection::Undefined | StackingDirection::Inherit => {
                StackingDirection::TopDown
            }
            direction => direction,
        }
    }

    /// The box sizing, `ContentBox` when unset.
    #[must_use]
    pub const fn box_sizing_or_default(&self) -> BoxSizing {
        match self.box_sizing {
            BoxSizing::Undefined | BoxSizing::Inherit => BoxSizing::ContentBox,
            sizing => sizing,
        }
    }

    /// The presence, `Visible` when unset.
    #[must_use]
    pub const fn presence_or_default(&self) -> Presence {
        match self.presence {
            Presence::Undefined | Presence::Inherit => Presence::Visible,
            presence => presence,
        }
    }

    /// Font size in pixels.
    ///
    /// The cascade turns inherited and relative sizes into pixels, so any
    /// other unit left here means "nothing set anywhere".
    #[must_use]
    pub fn font_size_px(&self) -> f32 {
        match self.font_size.unit {
            CoordUnit::Pixels => self.font_size.value,
            _ => DEFAULT_FONT_SIZE_PX,
        }
    }

    /// Numeric font weight, 400 when unset.
    #[must_use]
    pub const fn font_weight_value(&self) -> u16 {
        match self.font_weight {
            FontWeight::Weight(weight) => weight,
            FontWeight::Undefined | FontWeight::Inherit => FONT_WEIGHT_NORMAL,
        }
    }

    /// Font style, `Normal` when unset.
    #[must_use]
    pub const fn font_style_or_default(&self) -> FontStyle {
        match self.font_style {
            FontStyle::Undefined | FontStyle::Inherit => FontStyle::Normal,
            style => style,
        }
    }

    /// Resolved margins. Every edge, vertical ones included, resolves
    /// percentages against `reference`, the inline-axis size.
    #[must_use]
    pub fn margin_edges(&self, reference: f32) -> EdgeSizes {
        EdgeSizes {
            top: self.margin_top.resolve(reference),
            right: self.margin_right.resolve(reference),
            bottom: self.margin_bottom.resolve(reference),
            left: self.margin_left.resolve(reference),
        }
    }

    /// Resolved padding, with the same inline-axis rule as
    /// [`StyleBlock::margin_edges`].
    #[must_use]
    pub fn padding_edges(&self, reference: f32) -> EdgeSizes {
        EdgeSizes {
            top: self.padding_top.resolve(reference),
            right: self.padding_right.resolve(reference),
            bottom: self.padding_bottom.resolve(reference),
            left: self.padding_left.resolve(reference),
        }
    }

    /// Set all four margins. Shorthand order: top, right, bottom, left.
    pub const fn set_margin(&mut self, top: Coord, right: Coord, bottom: Coord, left: Coord) {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
    }

    /// Set all four paddings. Shorthand order: top, right, bottom, left.
    pub const fn set_padding(&mut self, top: Coord, right: Coord, bottom: Coord, left: Coord) {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
    }
}

impl PartialEq for StyleBlock {
    fn eq(&self, other: &Self) -> bool {
        let paint_eq = match (&self.paint_func, &other.paint_func) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        paint_eq
            && self.placement == other.placement
            && with_value_fields!(fields_eq!(self, other))
    }
}

impl fmt::Debug for StyleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("StyleBlock");
        with_value_fields!(debug_fields!(builder, self));
        builder
            .field("placement", &self.placement)
            .field("paint_func", &self.paint_func.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn fully_defined() -> StyleBlock {
        let mut block = StyleBlock {
            presence: Presence::Visible,
            layout: Layout::EdgeSlice,
            stacking_direction: StackingDirection::LeftToRight,
            edge: Edge::Left,
            box_sizing: BoxSizing::BorderBox,
            width: Coord::px(100.0),
            height: Coord::percent(50.0),
            min_width: Coord::px(10.0),
            min_height: Coord::px(11.0),
            max_width: Coord::px(500.0),
            max_height: Coord::px(501.0),
            left: Coord::px(1.0),
            right: Coord::px(2.0),
            top: Coord::px(3.0),
            bottom: Coord::px(4.0),
            font_size: Coord::px(14.0),
            font_weight: FontWeight::BOLD,
            font_style: FontStyle::Italic,
            ..StyleBlock::default()
        };
        block.set_margin(
            Coord::px(5.0),
            Coord::px(6.0),
            Coord::px(7.0),
            Coord::px(8.0),
        );
        block.set_padding(
            Coord::px(9.0),
            Coord::AUTO,
            Coord::px(10.0),
            Coord::fraction(1.0),
        );
        block
    }

    #[test]
    fn test_merge_direct_into_empty_copies_everything() {
        let source = fully_defined();
        let mut block = StyleBlock::default();
        block.merge_direct(&source);
        assert_eq!(block, source);
    }

    #[test]
    fn test_merge_direct_twice_is_noop() {
        let source = fully_defined();
        let mut block = StyleBlock {
            width: Coord::px(1.0),
            ..StyleBlock::default()
        };
        block.merge_direct(&source);
        let once = block.clone();
        block.merge_direct(&source);
        assert_eq!(block, once);
        assert_eq!(block.width, Coord::px(1.0));
    }

    #[test]
    fn test_merge_direct_keeps_inherit() {
        let mut block = StyleBlock {
            width: Coord::INHERIT,
            ..StyleBlock::default()
        };
        block.merge_direct(&fully_defined());
        assert_eq!(block.width, Coord::INHERIT);
    }

    #[test]
    fn test_merge_parent_only_replaces_inherit() {
        let parent = fully_defined();
        let mut block = StyleBlock {
            width: Coord::INHERIT,
            layout: Layout::Inherit,
            height: Coord::px(3.0),
            ..StyleBlock::default()
        };
        block.merge_parent(&parent);
        assert_eq!(block.width, Coord::px(100.0));
        assert_eq!(block.layout, Layout::EdgeSlice);
        assert_eq!(block.height, Coord::px(3.0));
        assert_eq!(block.min_width, Coord::UNDEFINED);
    }

    #[test]
    fn test_defaults() {
        let block = StyleBlock::default();
        assert_eq!(block.layout_or_default(), Layout::Stack);
        assert_eq!(block.box_sizing_or_default(), BoxSizing::ContentBox);
        assert_eq!(block.presence_or_default(), Presence::Visible);
        assert_eq!(block.font_size_px(), DEFAULT_FONT_SIZE_PX);
        assert_eq!(block.font_weight_value(), FONT_WEIGHT_NORMAL);
        assert_eq!(block.font_style_or_default(), FontStyle::Normal);
    }

    #[test]
    fn test_keywords_parse_kebab_case() {
        assert_eq!(Layout::from_str("edge-slice"), Ok(Layout::EdgeSlice));
        assert_eq!(Layout::from_str("stack-expand"), Ok(Layout::StackExpand));
        assert_eq!(
            StackingDirection::from_str("right-to-left"),
            Ok(StackingDirection::RightToLeft)
        );
        assert_eq!(BoxSizing::from_str("border-box"), Ok(BoxSizing::BorderBox));
        assert_eq!(Presence::from_str("layout-only"), Ok(Presence::LayoutOnly));
        assert_eq!(Edge::from_str("inherit"), Ok(Edge::Inherit));
        assert!(Edge::from_str("undefined").is_err());
        assert!(Edge::from_str("middle").is_err());
    }

    #[test]
    fn test_paint_func_compares_by_identity() {
        let paint: PaintFn = Rc::new(|_| {});
        let a = StyleBlock {
            paint_func: Some(Rc::clone(&paint)),
            ..StyleBlock::default()
        };
        let b = StyleBlock {
            paint_func: Some(paint),
            ..StyleBlock::default()
        };
        let c = StyleBlock {
            paint_func: Some(Rc::new(|_| {})),
            ..StyleBlock::default()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
