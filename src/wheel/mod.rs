//! Draws the wheel: colored segments, names, the pointer and the hub.

mod spin;

pub use spin::{CubicBezier, SpinAnimation};

use crate::{
    config::WheelConfig,
    draw::{ParticipantList, Rotation, segment_containing},
    render::{Canvas, Color, Rect, palette, text_width},
};
use unicode_width::UnicodeWidthChar;

const POINTER: char = '▼';
const HUB_RADIUS: f64 = 0.16;
const RIM_RADIUS: f64 = 0.93;
const LABEL_RADIUS: f64 = 0.62;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Names wider than `max_chars` columns keep their first `max_chars - 2` columns followed by `...`.
pub fn label(name: &str, max_chars: usize) -> String {
    if text_width(name) <= max_chars {
        return name.to_string();
    }
    let budget = max_chars.saturating_sub(2);
    let mut shortened = String::new();
    let mut used = 0;
    for ch in name.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        shortened.push(ch);
    }
    shortened.push_str("...");
    shortened
}

/// A wheel ready to be drawn for a given list of names.
pub struct Wheel<'a> {
    participants: &'a ParticipantList,
    config: &'a WheelConfig,
}

impl<'a> Wheel<'a> {
    pub fn new(participants: &'a ParticipantList, config: &'a WheelConfig) -> Self {
        Self { participants, config }
    }

    /// One segment per name, or the idle decoration while there aren't enough names to spin.
    pub fn segment_count(&self) -> usize {
        if self.participants.can_draw() { self.participants.len() } else { self.config.idle_segments }
    }

    pub fn segment_color(&self, index: usize) -> Color {
        let colors = &self.config.colors;
        colors.get(index % colors.len().max(1)).copied().unwrap_or(palette::PURPLE)
    }

    /// The segment at `screen_angle` degrees, clockwise from the top, with the wheel turned by
    /// `rotation` degrees.
    pub fn segment_at(&self, screen_angle: f64, rotation: f64) -> usize {
        let logical = (screen_angle - rotation).rem_euclid(360.0);
        let count = self.segment_count();
        segment_containing(Rotation::from_degrees(logical), count).unwrap_or(0).min(count - 1)
    }

    /// The largest wheel that fits in `area`, as its center and radius in rows.
    fn geometry(area: Rect) -> Option<(f64, f64, f64)> {
        // one row is left for the pointer
        let radius = ((area.height as f64 - 1.0) / 2.0).min(area.width as f64 / (2.0 * CELL_ASPECT)).floor();
        if radius < 2.0 {
            return None;
        }
        let center_x = area.x as f64 + area.width as f64 / 2.0;
        let center_y = area.y as f64 + 1.0 + (area.height as f64 - 1.0) / 2.0;
        Some((center_x, center_y, radius))
    }

    /// Draws the wheel into `area` turned clockwise by `rotation` degrees.
    pub fn draw(&self, canvas: &mut Canvas, area: Rect, rotation: f64) {
        let Some((center_x, center_y, radius)) = Self::geometry(area) else {
            return;
        };

        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let dx = (x as f64 + 0.5 - center_x) / (radius * CELL_ASPECT);
                let dy = (y as f64 + 0.5 - center_y) / radius;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > 1.0 {
                    continue;
                }
                let color = if distance <= HUB_RADIUS {
                    palette::HUB
                } else if distance > RIM_RADIUS {
                    let angle = dx.atan2(-dy).to_degrees().rem_euclid(360.0);
                    palette::PURPLE.mix(palette::PINK, (angle / 360.0) as f32)
                } else {
                    let angle = dx.atan2(-dy).to_degrees().rem_euclid(360.0);
                    self.segment_color(self.segment_at(angle, rotation))
                };
                canvas.set_background(x, y, color);
            }
        }

        if self.participants.can_draw() {
            self.draw_labels(canvas, (center_x, center_y, radius), rotation);
        }
        let pointer_y = (center_y - radius).floor().max(area.y as f64 + 1.0) as u16 - 1;
        canvas.put_char(center_x.floor() as u16, pointer_y, POINTER, palette::GOLD, true);
    }

    fn draw_labels(&self, canvas: &mut Canvas, (center_x, center_y, radius): (f64, f64, f64), rotation: f64) {
        let count = self.participants.len();
        let segment = 360.0 / count as f64;
        for (index, name) in self.participants.iter().enumerate() {
            let angle = (index as f64 * segment + segment / 2.0 + rotation).to_radians();
            let x = center_x + angle.sin() * LABEL_RADIUS * radius * CELL_ASPECT;
            let y = center_y - angle.cos() * LABEL_RADIUS * radius;
            let text = label(name, self.config.label_max_chars);
            let start = (x - text_width(&text) as f64 / 2.0).round().max(0.0) as u16;
            canvas.put_str(start, y.floor().max(0.0) as u16, &text, Color::WHITE, true);
        }
    }
}
