//! Text measurement.
//!
//! Text nodes have no style-driven size. Their intrinsic size comes from a
//! [`FontMetrics`] implementation supplied by the rendering collaborator.

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the advance width of a string and the line height
/// for a font size. The engine calls these to size text nodes.
pub trait FontMetrics {
    /// Measure the total advance width of a text string at the given font size.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Calculate the line height for a given font size.
    fn line_height(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Without font data, the average advance width of Latin glyphs in a
/// proportional font is taken as 0.6x the font size and the line height as
/// 1.2x. Used when no renderer supplies metrics, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }
}
