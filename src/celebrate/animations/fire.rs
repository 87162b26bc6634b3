use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::hsl_to_rgb;

/// Flames licking up the banner: red at the bottom row, yellow at the top
pub(crate) struct Fire;

impl BannerAnimation for Fire {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        let rows = ctx.total_rows.max(1) as f32;
        let height = 1.0 - ctx.row_index as f32 / rows;

        let flicker = (ctx.phase * 0.12 + ctx.column_index as f32 * 0.4).sin() * 10.0;
        let hue = (height * 55.0 + flicker).clamp(0.0, 60.0);

        let glow = (ctx.phase * 0.2 + ctx.glyph_index as f32 * 0.25 + ctx.row_index as f32 * 0.5).sin() * 8.0;
        let lightness = (52.0 + glow).clamp(44.0, 64.0);

        GlyphStyle::with_color(hsl_to_rgb(hue, 100.0, lightness))
    }
}
