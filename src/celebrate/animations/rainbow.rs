use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::hsl_to_rgb;

/// Full spectrum sweeping across the glyphs
pub(crate) struct Rainbow;

impl BannerAnimation for Rainbow {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        let base_hue = (ctx.glyph_index as f32 / ctx.total_glyphs.max(1) as f32) * 360.0;
        GlyphStyle::with_color(hsl_to_rgb(base_hue + ctx.phase, 100.0, 60.0))
    }
}
