use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::hsl_to_rgb;

/// Neon sign tubes in the spinner's pink and purple, with a faint buzz
pub(crate) struct Neon;

impl BannerAnimation for Neon {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        // hot pink, violet, electric blue
        let tubes = [330.0, 275.0, 195.0];
        let span = 120.0;

        let position = (ctx.phase + ctx.row_index as f32 * 20.0) % (tubes.len() as f32 * span);
        let tube = (position / span) as usize % tubes.len();
        let next = (tube + 1) % tubes.len();
        let t = (position % span) / span;
        let hue = tubes[tube] * (1.0 - t) + tubes[next] * t;

        let buzz = (ctx.phase * 0.7 + ctx.glyph_index as f32).sin() * 4.0;
        GlyphStyle::with_color(hsl_to_rgb(hue, 100.0, 62.0 + buzz))
    }
}
