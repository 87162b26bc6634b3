//! The overlay announcing the winner once the wheel stops.

mod animations;
mod banner;
mod confetti;

pub use animations::CelebrationStyle;
pub use banner::{BUNDLED_FONT, BannerError, BannerGenerator, available_fonts};
pub use confetti::Confetti;

use crate::{
    config::CelebrationConfig,
    render::{Canvas, Pollable, PollableState, Rect, palette, text_width},
};
use animations::{BannerAnimation, GlyphContext, get_animation};
use std::time::{Duration, Instant};

/// One full trip around the color wheel for the banner styles.
const COLOR_CYCLE: Duration = Duration::from_millis(2000);
const HEADING: &str = "The Winner Is...";
const STARS: &str = "★ ★ ★ ★ ★";
const CONGRATULATIONS: &str = "Congratulations to the lucky winner!";
const ACTIONS: &str = "[N] Start New Raffle   [Enter] Spin Again   [Esc] Close";

/// Room for the action hints inside the frame with a blank column on either side.
const MIN_WIDTH: u16 = ACTIONS.len() as u16 + 4;

/// Shows who won, with their name in big letters and confetti raining down.
pub struct WinnerOverlay {
    winner: String,
    banner: Option<Vec<String>>,
    style: CelebrationStyle,
    animation: Box<dyn BannerAnimation>,
    confetti: Confetti,
    start_time: Option<Instant>,
    phase: f32,
}

impl WinnerOverlay {
    pub fn new(winner: &str, config: &CelebrationConfig, rng: &mut fastrand::Rng) -> Self {
        let banner = match BannerGenerator::new(&config.font).and_then(|generator| generator.generate(winner)) {
            Ok(lines) => Some(lines),
            Err(e) => {
                log::warn!("showing plain winner name: {e}");
                None
            }
        };
        Self {
            winner: winner.to_string(),
            banner,
            style: config.style,
            animation: get_animation(config.style),
            confetti: Confetti::new(config.confetti_pieces, rng),
            start_time: None,
            phase: 0.0,
        }
    }

    pub fn winner(&self) -> &str {
        &self.winner
    }

    /// The banner rows if they fit in `width` columns, otherwise the plain name.
    fn name_rows(&self, width: u16) -> Vec<&str> {
        match &self.banner {
            Some(lines) if lines.iter().all(|line| text_width(line) <= width as usize) => {
                lines.iter().map(String::as_str).collect()
            }
            _ => vec![self.winner.as_str()],
        }
    }

    /// The box the overlay takes up within `screen`.
    pub fn layout(&self, screen: Rect) -> Rect {
        let banner_width = self.banner.iter().flatten().map(|line| text_width(line)).max().unwrap_or(0);
        let wanted = (banner_width as u16 + 6).max(MIN_WIDTH).min(screen.width.saturating_sub(2));
        let rows = self.name_rows(wanted.saturating_sub(4)).len() as u16;
        // borders, padding, heading, stars, congratulations, actions and the gaps between them
        screen.centered(wanted, rows + 11)
    }

    pub fn draw(&self, canvas: &mut Canvas, screen: Rect) {
        let area = self.layout(screen);
        if area.width < 4 || area.height < 4 {
            return;
        }
        canvas.fill(area, palette::PANEL);
        let inner = area.inset(1);
        self.confetti.draw(canvas, inner);
        canvas.frame(area, palette::GOLD);

        let mut y = inner.y + 1;
        canvas.put_centered(inner, y, HEADING, palette::SUBTLE, true);
        y += 2;
        y = self.draw_name(canvas, inner, y);
        y += 1;
        canvas.put_centered(inner, y, STARS, palette::GOLD, false);
        y += 2;
        canvas.put_centered(inner, y, CONGRATULATIONS, palette::MUTED, false);
        y += 2;
        canvas.put_centered(inner, y, ACTIONS, palette::TEXT, true);
    }

    fn draw_name(&self, canvas: &mut Canvas, inner: Rect, mut y: u16) -> u16 {
        let rows = self.name_rows(inner.width.saturating_sub(2));
        let total_columns = rows.iter().map(|row| text_width(row)).max().unwrap_or(0);
        let total_glyphs = rows.iter().flat_map(|row| row.chars()).filter(|ch| !ch.is_whitespace()).count();
        let left = inner.x + (inner.width.saturating_sub(total_columns as u16)) / 2;

        let mut glyph_index = 0;
        for (row_index, row) in rows.iter().enumerate() {
            let mut x = left;
            for (column_index, ch) in row.chars().enumerate() {
                if !ch.is_whitespace() {
                    let ctx = GlyphContext {
                        phase: self.phase,
                        glyph_index,
                        total_glyphs,
                        row_index,
                        total_rows: rows.len(),
                        column_index,
                        total_columns,
                    };
                    let style = self.animation.style_glyph(&ctx);
                    canvas.put_str(x, y, &style.replacement.unwrap_or(ch).to_string(), style.color, true);
                    glyph_index += 1;
                }
                x += text_width(&ch.to_string()).max(1) as u16;
            }
            y += 1;
        }
        y
    }
}

impl Pollable for WinnerOverlay {
    fn poll(&mut self, now: Instant) -> PollableState {
        let confetti = self.confetti.poll(now);
        let Some(start_time) = self.start_time else {
            self.start_time = Some(now);
            return PollableState::Modified;
        };
        let elapsed = now.saturating_duration_since(start_time);
        let phase = elapsed.as_secs_f32() / COLOR_CYCLE.as_secs_f32() * 360.0;
        let settled = self.style.settles_at().is_some_and(|end| self.phase > end);
        if settled {
            return confetti;
        }
        self.phase = phase;
        PollableState::Modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn overlay(winner: &str, style: CelebrationStyle, confetti_pieces: usize) -> WinnerOverlay {
        let config = CelebrationConfig { style, confetti_pieces, ..Default::default() };
        WinnerOverlay::new(winner, &config, &mut fastrand::Rng::with_seed(5))
    }

    fn screen_text(canvas: &Canvas) -> String {
        (0..canvas.height()).map(|y| canvas.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn shows_heading_and_actions() {
        let overlay = overlay("Charlie", CelebrationStyle::Rainbow, 0);
        let mut canvas = Canvas::new(100, 30);
        let screen = canvas.area();
        overlay.draw(&mut canvas, screen);
        let text = screen_text(&canvas);
        assert!(text.contains(HEADING));
        assert!(text.contains(CONGRATULATIONS));
        assert!(text.contains(ACTIONS));
        assert!(text.contains(STARS));
        assert_eq!(overlay.winner(), "Charlie");
    }

    #[rstest]
    #[case::short_name("Al")]
    #[case::long_name("Bartholomew")]
    fn every_action_fits_in_the_frame(#[case] winner: &str) {
        let overlay = overlay(winner, CelebrationStyle::Rainbow, 0);
        let mut canvas = Canvas::new(120, 40);
        let screen = canvas.area();
        overlay.draw(&mut canvas, screen);
        let area = overlay.layout(screen);
        let row = (area.y..area.bottom()).map(|y| canvas.row_text(y)).find(|row| row.contains("[Esc] Close"));
        let row = row.expect("actions not drawn");
        assert!(row.contains(&format!(" {ACTIONS} ")));
    }

    #[test]
    fn narrow_screen_falls_back_to_plain_name() {
        let overlay = overlay("Bartholomew the Magnificent", CelebrationStyle::Flash, 0);
        let mut canvas = Canvas::new(40, 20);
        let screen = canvas.area();
        overlay.draw(&mut canvas, screen);
        assert!(screen_text(&canvas).contains("Bartholomew the Magnificent"));
    }

    #[test]
    fn layout_stays_on_screen() {
        let overlay = overlay("Dave", CelebrationStyle::Neon, 10);
        let screen = Rect::new(0, 0, 80, 24);
        let area = overlay.layout(screen);
        assert!(area.right() <= screen.right());
        assert!(area.bottom() <= screen.bottom());
        assert!(area.width >= MIN_WIDTH);
    }

    #[test]
    fn typewriter_settles_once_confetti_is_gone() {
        let mut overlay = overlay("Eve", CelebrationStyle::Typewriter, 0);
        let start = Instant::now();
        assert_eq!(overlay.poll(start), PollableState::Modified);
        assert_eq!(overlay.poll(start + Duration::from_millis(500)), PollableState::Modified);
        assert_eq!(overlay.poll(start + Duration::from_secs(3)), PollableState::Modified);
        assert_eq!(overlay.poll(start + Duration::from_secs(4)), PollableState::Unmodified);
    }

    #[test]
    fn cycling_styles_keep_animating() {
        let mut overlay = overlay("Eve", CelebrationStyle::Rainbow, 0);
        let start = Instant::now();
        overlay.poll(start);
        assert_eq!(overlay.poll(start + Duration::from_secs(60)), PollableState::Modified);
    }
}
