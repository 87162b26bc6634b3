use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::{hsl_to_rgb, palette};

/// Types the winner's name out column by column, then settles on gold
pub(crate) struct Typewriter;

/// Phase at which every column has been typed
pub(crate) const TYPING_PHASE: f32 = 300.0;

impl BannerAnimation for Typewriter {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        let progress = (ctx.phase / TYPING_PHASE).clamp(0.0, 1.0);
        let typed = (progress * ctx.total_columns as f32).floor() as usize;

        if typed >= ctx.total_columns || ctx.column_index < typed {
            GlyphStyle::with_color(palette::GOLD)
        } else if ctx.column_index == typed {
            GlyphStyle::with_replacement(hsl_to_rgb(200.0, 85.0, 65.0), '▌')
        } else {
            GlyphStyle::with_replacement(palette::GOLD, ' ')
        }
    }
}
