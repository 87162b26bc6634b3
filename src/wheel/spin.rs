use crate::{
    draw::Rotation,
    render::{Pollable, PollableState},
};
use std::time::{Duration, Instant};

/// A CSS style cubic bezier timing function going from `(0, 0)` to `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// The `ease-out` timing function.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let inverse = 1.0 - t;
        3.0 * inverse * inverse * t * p1 + 3.0 * inverse * t * t * p2 + t * t * t
    }

    fn slope(t: f64, p1: f64, p2: f64) -> f64 {
        let inverse = 1.0 - t;
        3.0 * inverse * inverse * p1 + 6.0 * inverse * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Maps linear progress `x` in `[0, 1]` to eased progress.
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        // Newton first, bisection if it doesn't converge
        let mut t = x;
        for _ in 0..8 {
            let error = Self::component(t, self.x1, self.x2) - x;
            if error.abs() < 1e-7 {
                return Self::component(t, self.y1, self.y2);
            }
            let slope = Self::slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut low, mut high) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = Self::component(t, self.x1, self.x2);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        Self::component(t, self.y1, self.y2)
    }
}

/// Turns the wheel from one rotation to another over a fixed duration.
///
/// The animation runs on the clock of the spin that started it, so it stops exactly when that
/// spin's reveal is due no matter when the first frame gets drawn.
#[derive(Debug)]
pub struct SpinAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    easing: CubicBezier,
    start_time: Instant,
    current: f64,
    completed: bool,
}

impl SpinAnimation {
    pub fn new(from: Rotation, to: Rotation, start_time: Instant, duration: Duration) -> Self {
        Self {
            from: from.degrees(),
            to: to.degrees(),
            duration: duration.max(Duration::from_millis(1)),
            easing: CubicBezier::EASE_OUT,
            start_time,
            current: from.degrees(),
            completed: false,
        }
    }

    /// A wheel standing still at `rotation`.
    pub fn resting(rotation: Rotation) -> Self {
        let mut animation = Self::new(rotation, rotation, Instant::now(), Duration::ZERO);
        animation.completed = true;
        animation
    }

    /// The rotation to draw right now, in degrees.
    pub fn current_degrees(&self) -> f64 {
        self.current
    }

    pub fn is_running(&self) -> bool {
        !self.completed
    }
}

impl Pollable for SpinAnimation {
    fn poll(&mut self, now: Instant) -> PollableState {
        if self.completed {
            return PollableState::Unmodified;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = self.to;
            self.completed = true;
            return PollableState::Done;
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.current = self.from + (self.to - self.from) * self.easing.apply(progress);
        PollableState::Modified
    }
}
