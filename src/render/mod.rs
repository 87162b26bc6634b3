pub mod canvas;
pub mod color;
pub mod terminal;

pub use canvas::{Canvas, Cell, Rect, text_width};
pub use color::{Color, ColorError, hsl_to_rgb};

use std::time::Instant;

/// The result of polling an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// The animation moved and needs to be drawn again.
    Modified,
    /// Nothing changed since the last poll.
    Unmodified,
    /// The animation reached its final frame on this poll.
    Done,
}

impl PollableState {
    pub fn needs_redraw(self) -> bool {
        matches!(self, Self::Modified | Self::Done)
    }
}

/// Something that changes over time and gets polled once per frame.
pub trait Pollable {
    fn poll(&mut self, now: Instant) -> PollableState;
}

/// Brand colors shared by the different screens.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::new(0x0f, 0x17, 0x2a);
    pub const PANEL: Color = Color::new(0x1e, 0x29, 0x3b);
    pub const PANEL_BORDER: Color = Color::new(0x47, 0x55, 0x69);
    pub const INPUT: Color = Color::new(0x33, 0x41, 0x55);
    pub const TEXT: Color = Color::new(0xe2, 0xe8, 0xf0);
    pub const MUTED: Color = Color::new(0x94, 0xa3, 0xb8);
    pub const SUBTLE: Color = Color::new(0xcb, 0xd5, 0xe1);
    pub const ERROR: Color = Color::new(0xf8, 0x71, 0x71);
    pub const PURPLE: Color = Color::new(0xa8, 0x55, 0xf7);
    pub const PINK: Color = Color::new(0xec, 0x48, 0x99);
    pub const GOLD: Color = Color::new(0xfa, 0xcc, 0x15);
    pub const HUB: Color = Color::new(0x33, 0x41, 0x55);
}
