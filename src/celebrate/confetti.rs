use crate::render::{Canvas, Pollable, PollableState, Rect, hsl_to_rgb};
use std::time::{Duration, Instant};

const SHAPES: [char; 5] = ['■', '▪', '◆', '●', '▲'];

/// Pieces start this far above the area, as a fraction of its height, and fall until
/// `FALL_END` below its top.
const START_RANGE: (f32, f32) = (-1.2, -0.2);
const FALL_END: f32 = 1.2;

/// A single piece of confetti.
#[derive(Clone, Debug, PartialEq)]
struct Piece {
    /// Horizontal position as a fraction of the area's width.
    left: f32,
    /// Starting height as a fraction of the area's height, above the area.
    top: f32,
    hue: f32,
    /// Index into [SHAPES] the piece starts tumbling from.
    tumble: usize,
    fall: Duration,
    delay: Duration,
}

impl Piece {
    fn random(rng: &mut fastrand::Rng) -> Self {
        let (start_low, start_high) = START_RANGE;
        Self {
            left: rng.f32(),
            top: start_low + rng.f32() * (start_high - start_low),
            hue: rng.f32() * 360.0,
            tumble: rng.usize(..SHAPES.len()),
            fall: Duration::from_secs_f32(2.0 + rng.f32() * 3.0),
            delay: Duration::from_secs_f32(rng.f32() * 2.0),
        }
    }

    /// How far along its fall the piece is, `None` before it starts.
    fn progress(&self, elapsed: Duration) -> Option<f32> {
        let falling = elapsed.checked_sub(self.delay)?;
        Some((falling.as_secs_f32() / self.fall.as_secs_f32()).min(1.0))
    }

    fn landed_by(&self) -> Duration {
        self.delay + self.fall
    }
}

/// Confetti raining down over the winner.
#[derive(Debug)]
pub struct Confetti {
    pieces: Vec<Piece>,
    start_time: Option<Instant>,
    elapsed: Duration,
    completed: bool,
}

impl Confetti {
    pub fn new(count: usize, rng: &mut fastrand::Rng) -> Self {
        let pieces = (0..count).map(|_| Piece::random(rng)).collect();
        Self { pieces, start_time: None, elapsed: Duration::ZERO, completed: count == 0 }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Whether every piece has fallen out of view.
    pub fn is_finished(&self) -> bool {
        self.completed
    }

    fn total_duration(&self) -> Duration {
        self.pieces.iter().map(Piece::landed_by).max().unwrap_or_default()
    }

    pub fn draw(&self, canvas: &mut Canvas, area: Rect) {
        if self.completed || area.width == 0 || area.height == 0 {
            return;
        }
        for piece in &self.pieces {
            let Some(progress) = piece.progress(self.elapsed) else {
                continue;
            };
            let height = piece.top + (FALL_END - piece.top) * progress;
            if !(0.0..1.0).contains(&height) {
                continue;
            }
            let x = area.x + ((piece.left * area.width as f32) as u16).min(area.width - 1);
            let y = area.y + ((height * area.height as f32) as u16).min(area.height - 1);
            let shape = SHAPES[(piece.tumble + (progress * 12.0) as usize) % SHAPES.len()];
            let lightness = 60.0 - progress * 25.0;
            canvas.put_char(x, y, shape, hsl_to_rgb(piece.hue, 70.0, lightness), false);
        }
    }
}

impl Pollable for Confetti {
    fn poll(&mut self, now: Instant) -> PollableState {
        if self.completed {
            return PollableState::Unmodified;
        }
        let Some(start_time) = self.start_time else {
            self.start_time = Some(now);
            return PollableState::Modified;
        };
        self.elapsed = now.saturating_duration_since(start_time);
        if self.elapsed >= self.total_duration() {
            self.completed = true;
            return PollableState::Done;
        }
        PollableState::Modified
    }
}
