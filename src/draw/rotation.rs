use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// Sub-degree resolution of a [Rotation].
///
/// Every rotation is a whole number of ticks, so all the arithmetic that maps a rotation back to
/// the segment under the pointer is done on integers and is exact.
pub const TICKS_PER_DEGREE: u64 = 1 << 20;

/// Ticks in one full turn of the wheel.
pub const TICKS_PER_REVOLUTION: u64 = 360 * TICKS_PER_DEGREE;

/// A clockwise, cumulative wheel rotation.
///
/// Rotations only grow while a session is running: each draw adds whole extra turns on top of
/// the previous value instead of wrapping around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rotation(u64);

impl Rotation {
    pub const ZERO: Self = Self(0);

    pub fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Rounds to the nearest tick. Negative and NaN inputs map to zero.
    pub fn from_degrees(degrees: f64) -> Self {
        // float to int casts saturate
        Self((degrees * TICKS_PER_DEGREE as f64).round() as u64)
    }

    pub fn ticks(self) -> u64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0 as f64 / TICKS_PER_DEGREE as f64
    }

    /// The part of this rotation past the last full turn.
    pub fn within_revolution(self) -> Self {
        Self(self.0 % TICKS_PER_REVOLUTION)
    }

    /// The logical wheel angle that sits under the pointer once the wheel is turned by this much.
    ///
    /// The wheel turns clockwise while the pointer stays put, so the angle under it runs the
    /// opposite way: `(360 - (rotation mod 360)) mod 360`.
    pub fn angle_under_pointer(self) -> Self {
        let turned = self.0 % TICKS_PER_REVOLUTION;
        Self((TICKS_PER_REVOLUTION - turned) % TICKS_PER_REVOLUTION)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.degrees())
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.degrees())
    }
}

/// The ticks, within one revolution, that belong to segment `index` out of `count`.
///
/// Segment `i` covers `[i * 360/n, (i+1) * 360/n)`. The lower bound is the tick rounded up so a
/// landing exactly on a boundary belongs to the segment that starts there.
pub fn segment_ticks(index: usize, count: usize) -> Range<u64> {
    let count = count as u128;
    let revolution = TICKS_PER_REVOLUTION as u128;
    let ceil_div = |value: u128| value.div_ceil(count);
    let start = ceil_div(index as u128 * revolution);
    let end = ceil_div((index as u128 + 1) * revolution);
    start as u64..end as u64
}

/// The segment index whose arc contains `angle` (which must be within one revolution).
pub fn segment_containing(angle: Rotation, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let angle = angle.within_revolution().ticks() as u128;
    let index = angle * count as u128 / TICKS_PER_REVOLUTION as u128;
    Some(index as usize)
}

/// The segment the fixed pointer lands on after the wheel is turned by `rotation`.
pub fn landed_index(rotation: Rotation, count: usize) -> Option<usize> {
    segment_containing(rotation.angle_under_pointer(), count)
}

/// Computes the cumulative rotation that brings the logical angle `landing` under the pointer.
///
/// The result is `current` plus [super::EXTRA_REVOLUTIONS] full turns plus whatever partial turn
/// is needed, so it is always strictly greater than `current`.
pub fn rotation_for(current: Rotation, landing: Rotation) -> Rotation {
    let landing = landing.within_revolution().ticks();
    let turned = current.within_revolution().ticks();
    let partial = (2 * TICKS_PER_REVOLUTION - landing - turned) % TICKS_PER_REVOLUTION;
    Rotation(current.0 + super::EXTRA_REVOLUTIONS * TICKS_PER_REVOLUTION + partial)
}
