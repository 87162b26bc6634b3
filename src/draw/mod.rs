//! Picks the winner of a spin and the rotation that shows it.
//!
//! The engine is pure: it gets the participants and the wheel's current rotation and hands back
//! a [DrawResult]. Storing the new rotation and timing the reveal is up to the caller.

mod participants;
mod rotation;

pub use participants::ParticipantList;
pub use rotation::{
    TICKS_PER_DEGREE, TICKS_PER_REVOLUTION, Rotation, landed_index, rotation_for,
    segment_containing, segment_ticks,
};

use serde::Serialize;

/// Full turns added on top of every spin. Purely cosmetic.
pub const EXTRA_REVOLUTIONS: u64 = 5;

/// The fewest names a wheel can be spun with.
pub const MIN_PARTICIPANTS: usize = 2;

/// The most names that still leave every segment at least one tick wide.
pub const MAX_PARTICIPANTS: usize = TICKS_PER_REVOLUTION as usize;

/// Errors that can occur when drawing a winner
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("at least {min} participants are needed to spin, got {0}", min = MIN_PARTICIPANTS)]
    NotEnoughParticipants(usize),

    #[error("{0} participants do not fit on the wheel (at most {max})", max = MAX_PARTICIPANTS)]
    TooManyParticipants(usize),
}

/// The outcome of a single spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    /// Position of the winner in the participant list.
    pub winner_index: usize,
    /// Where the wheel ends up, counting every turn since the last reset.
    #[serde(rename = "total_rotation_degrees")]
    pub total_rotation: Rotation,
    /// The logical wheel angle that ends up under the pointer.
    #[serde(rename = "landing_degrees")]
    pub landing: Rotation,
}

/// Draws a winner using a fresh generator seeded from the thread local one.
pub fn draw(participants: &ParticipantList, current: Rotation) -> Result<DrawResult, DrawError> {
    draw_with(participants, current, &mut fastrand::Rng::new())
}

/// Draws a winner using the given random generator.
///
/// Every participant is equally likely to win. The landing point is then picked uniformly inside
/// the winner's segment, and the returned rotation always brings exactly that point under the
/// pointer, so `landed_index(result.total_rotation, n) == result.winner_index` holds for every
/// draw.
pub fn draw_with(
    participants: &ParticipantList,
    current: Rotation,
    rng: &mut fastrand::Rng,
) -> Result<DrawResult, DrawError> {
    let count = participants.len();
    if count < MIN_PARTICIPANTS {
        return Err(DrawError::NotEnoughParticipants(count));
    }
    if count > MAX_PARTICIPANTS {
        return Err(DrawError::TooManyParticipants(count));
    }

    let winner_index = rng.usize(..count);
    let landing = Rotation::from_ticks(rng.u64(segment_ticks(winner_index, count)));
    let total_rotation = rotation_for(current, landing);
    debug_assert_eq!(landed_index(total_rotation, count), Some(winner_index));

    log::debug!(
        "drew participant {winner_index} of {count}, landing at {landing}, rotating {current} -> {total_rotation}"
    );
    Ok(DrawResult { winner_index, total_rotation, landing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn names(count: usize) -> ParticipantList {
        (0..count).map(|i| format!("participant-{i}")).collect()
    }

    #[rstest]
    #[case::nobody(0)]
    #[case::single(1)]
    fn rejects_too_few_participants(#[case] count: usize) {
        let result = draw(&names(count), Rotation::ZERO);
        assert_eq!(result, Err(DrawError::NotEnoughParticipants(count)));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(25)]
    fn reported_winner_matches_the_landed_segment(#[case] count: usize) {
        let participants = names(count);
        let mut rng = fastrand::Rng::with_seed(count as u64);
        let mut current = Rotation::ZERO;
        for _ in 0..500 {
            let result = draw_with(&participants, current, &mut rng).expect("draw failed");
            assert!(result.winner_index < count);
            assert_eq!(landed_index(result.total_rotation, count), Some(result.winner_index));
            assert_eq!(result.total_rotation.angle_under_pointer(), result.landing);
            current = result.total_rotation;
        }
    }

    #[test]
    fn rotation_keeps_growing_between_draws() {
        let participants = names(5);
        let mut rng = fastrand::Rng::with_seed(7);
        let mut current = Rotation::from_degrees(123.5);
        for _ in 0..200 {
            let result = draw_with(&participants, current, &mut rng).expect("draw failed");
            let extra = result.total_rotation.ticks() - current.ticks();
            assert!(extra >= EXTRA_REVOLUTIONS * TICKS_PER_REVOLUTION);
            assert!(extra < (EXTRA_REVOLUTIONS + 1) * TICKS_PER_REVOLUTION);
            current = result.total_rotation;
        }
    }

    #[test]
    fn every_participant_is_equally_likely() {
        const DRAWS: usize = 40_000;
        let participants = names(4);
        let mut rng = fastrand::Rng::with_seed(0xfeed);
        let mut wins = [0usize; 4];
        for _ in 0..DRAWS {
            let result = draw_with(&participants, Rotation::ZERO, &mut rng).expect("draw failed");
            wins[result.winner_index] += 1;
        }
        for count in wins {
            let frequency = count as f64 / DRAWS as f64;
            assert!((frequency - 0.25).abs() < 0.02, "frequency {frequency} too far from 1/4");
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let participants = ParticipantList::from(vec!["Alice", "Bob", "Charlie", "Dave"]);
        let first = draw_with(&participants, Rotation::ZERO, &mut fastrand::Rng::with_seed(42));
        let second = draw_with(&participants, Rotation::ZERO, &mut fastrand::Rng::with_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_angles_in_degrees() {
        let result = DrawResult {
            winner_index: 2,
            total_rotation: Rotation::from_degrees(1970.0),
            landing: Rotation::from_degrees(190.0),
        };
        let json = serde_json::to_value(result).expect("serialization failed");
        assert_eq!(json["winner_index"], 2);
        assert_eq!(json["total_rotation_degrees"], 1970.0);
        assert_eq!(json["landing_degrees"], 190.0);
    }
}
