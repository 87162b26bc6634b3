use crate::render::Color;

/// Where a glyph of the winner banner sits and how far the celebration has progressed.
#[derive(Debug, Clone)]
pub(crate) struct GlyphContext {
    /// Celebration progress in degrees, one full color cycle every 360
    pub phase: f32,
    /// Index among the banner's visible glyphs, left to right, top to bottom
    pub glyph_index: usize,
    /// Total visible glyphs in the banner
    pub total_glyphs: usize,
    pub row_index: usize,
    pub total_rows: usize,
    pub column_index: usize,
    /// Width of the widest banner row
    pub total_columns: usize,
}

/// How a single banner glyph should be drawn
#[derive(Debug, PartialEq)]
pub(crate) struct GlyphStyle {
    pub color: Color,
    /// Drawn instead of the glyph when set
    pub replacement: Option<char>,
}

impl GlyphStyle {
    pub fn with_color(color: Color) -> Self {
        Self { color, replacement: None }
    }

    pub fn with_replacement(color: Color, replacement: char) -> Self {
        Self { color, replacement: Some(replacement) }
    }
}

/// A way of coloring the winner banner over time
pub(crate) trait BannerAnimation {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle;
}
