//! Coordinate values and unit resolution.
//!
//! Every length in a style block is a [`Coord`]: a number tagged with a
//! unit, or one of the sentinel states `undefined`, `inherit` and `auto`.

use serde::Serialize;

/// The unit a [`Coord`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordUnit {
    /// Not set. Filled in by a cascade rule or treated as the default.
    #[default]
    Undefined,
    /// Take the parent's value.
    Inherit,
    /// Let the layout strategy decide.
    Auto,
    /// Percentage of a reference length.
    Percent,
    /// Absolute pixels.
    Pixels,
    /// Share of leftover main-axis space. Only stack-expand layouts give it
    /// meaning; everywhere else it multiplies the reference length.
    Fraction,
}

/// A length with a unit.
///
/// Undefined and inherit coords carry no numeric meaning until the cascade
/// merges them against a rule or a parent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coord {
    /// The numeric part, ignored for the sentinel units.
    pub value: f32,
    /// How `value` is interpreted.
    pub unit: CoordUnit,
}

impl Coord {
    /// The unset coordinate.
    pub const UNDEFINED: Self = Self::sentinel(CoordUnit::Undefined);
    /// The `inherit` keyword.
    pub const INHERIT: Self = Self::sentinel(CoordUnit::Inherit);
    /// The `auto` keyword.
    pub const AUTO: Self = Self::sentinel(CoordUnit::Auto);

    const fn sentinel(unit: CoordUnit) -> Self {
        Self { value: 0.0, unit }
    }

    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: CoordUnit::Pixels,
        }
    }

    /// A percentage of the reference length.
    #[must_use]
    pub const fn percent(value: f32) -> Self {
        Self {
            value,
            unit: CoordUnit::Percent,
        }
    }

    /// A fraction of leftover space.
    #[must_use]
    pub const fn fraction(value: f32) -> Self {
        Self {
            value,
            unit: CoordUnit::Fraction,
        }
    }

    /// True for every unit except `Undefined`.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        !matches!(self.unit, CoordUnit::Undefined)
    }

    /// True when the unit is exactly `Inherit`.
    #[must_use]
    pub const fn is_inherit(self) -> bool {
        matches!(self.unit, CoordUnit::Inherit)
    }

    /// True when the coord resolves to a concrete length on its own
    /// (pixels or a percentage of the container).
    ///
    /// Layout uses this instead of [`Coord::is_defined`] to decide whether an
    /// explicit size is present: `auto`, a leftover `inherit` and fractions
    /// all leave the size to the strategy.
    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(self.unit, CoordUnit::Pixels | CoordUnit::Percent)
    }

    /// Resolve against `reference`. See [`resolve_units`].
    #[must_use]
    pub fn resolve(self, reference: f32) -> f32 {
        resolve_units(self, reference)
    }
}

impl From<f32> for Coord {
    fn from(value: f32) -> Self {
        Self::px(value)
    }
}

/// Convert a coord to pixels.
///
/// - Pixels: the raw value
/// - Percent: `value * reference / 100`
/// - Fraction: `value * reference`
/// - Undefined, inherit and auto: `0`
///
/// Callers branch on definedness first; resolving a sentinel only ever
/// yields the neutral value.
#[must_use]
pub fn resolve_units(coord: Coord, reference: f32) -> f32 {
    match coord.unit {
        CoordUnit::Pixels => coord.value,
        CoordUnit::Percent => coord.value * reference / 100.0,
        CoordUnit::Fraction => coord.value * reference,
        CoordUnit::Undefined | CoordUnit::Inherit | CoordUnit::Auto => 0.0,
    }
}
