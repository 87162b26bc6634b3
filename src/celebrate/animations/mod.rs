mod common;

mod fire;
mod flash;
mod neon;
mod rainbow;
mod typewriter;
mod wave;

pub(crate) use common::{BannerAnimation, GlyphContext, GlyphStyle};

use serde::Deserialize;

/// How the winner's name is colored while it's on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::EnumIter, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CelebrationStyle {
    #[default]
    Rainbow,
    Flash,
    Wave,
    Neon,
    Fire,
    Typewriter,
}

impl CelebrationStyle {
    /// The phase after which the style stops changing, if it ever does.
    pub fn settles_at(self) -> Option<f32> {
        match self {
            Self::Typewriter => Some(typewriter::TYPING_PHASE),
            _ => None,
        }
    }
}

/// Get the animation implementation for a given style
pub(crate) fn get_animation(style: CelebrationStyle) -> Box<dyn BannerAnimation> {
    match style {
        CelebrationStyle::Rainbow => Box::new(rainbow::Rainbow),
        CelebrationStyle::Flash => Box::new(flash::Flash),
        CelebrationStyle::Wave => Box::new(wave::Wave),
        CelebrationStyle::Neon => Box::new(neon::Neon),
        CelebrationStyle::Fire => Box::new(fire::Fire),
        CelebrationStyle::Typewriter => Box::new(typewriter::Typewriter),
    }
}
