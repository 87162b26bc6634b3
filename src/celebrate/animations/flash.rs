use super::common::{BannerAnimation, GlyphContext, GlyphStyle};
use crate::render::{Color, palette};

/// The whole banner blinks between gold and white, like a trophy catching the light
pub(crate) struct Flash;

impl BannerAnimation for Flash {
    fn style_glyph(&self, ctx: &GlyphContext) -> GlyphStyle {
        // two flashes per cycle
        let flash = ((ctx.phase * 2.0).to_radians().sin() + 1.0) / 2.0;
        GlyphStyle::with_color(palette::GOLD.mix(Color::WHITE, flash))
    }
}
