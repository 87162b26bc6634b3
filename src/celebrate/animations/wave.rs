use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::hsl_to_rgb;

/// Gold shimmer rolling across the columns
pub(crate) struct Wave;

impl BannerAnimation for Wave {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        let base = 42.0;
        let amplitude = 14.0;
        let position = ctx.column_index as f32 * 0.3 - ctx.row_index as f32 * 0.2;
        let wave = (position - ctx.phase.to_radians() * 2.0).sin();
        let hue = base + amplitude * wave;
        let lightness = 55.0 + 12.0 * wave;
        GlyphStyle::with_color(hsl_to_rgb(hue, 100.0, lightness))
    }
}
