//! A single draw without the terminal UI, for scripts and quick checks.

use crate::draw::{self, DrawError, DrawResult, ParticipantList, Rotation};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct Report<'a> {
    participants: &'a ParticipantList,
    winner: &'a str,
    #[serde(flatten)]
    result: DrawResult,
}

/// Draws a winner from an unrotated wheel and prints it to `out`, as text or as JSON.
pub fn run_once<W: Write>(
    participants: &ParticipantList,
    rng: &mut fastrand::Rng,
    json: bool,
    mut out: W,
) -> Result<DrawResult, HeadlessError> {
    let result = draw::draw_with(participants, Rotation::ZERO, rng)?;
    let winner = participants.get(result.winner_index).unwrap_or_default();
    if json {
        let report = Report { participants, winner, result };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Winner: {winner} (#{} of {})", result.winner_index + 1, participants.len())?;
    }
    Ok(result)
}

/// Errors that can occur during a headless draw
#[derive(thiserror::Error, Debug)]
pub enum HeadlessError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error("writing the result: {0}")]
    Io(#[from] io::Error),

    #[error("encoding the result: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::landed_index;

    fn names() -> ParticipantList {
        ParticipantList::from(vec!["Alice", "Bob", "Charlie", "Dave"])
    }

    #[test]
    fn prints_the_winner() {
        let mut out = Vec::new();
        let result = run_once(&names(), &mut fastrand::Rng::with_seed(3), false, &mut out).expect("draw failed");
        let printed = String::from_utf8(out).expect("not utf8");
        let winner = names().get(result.winner_index).expect("no winner").to_string();
        assert_eq!(printed, format!("Winner: {winner} (#{} of 4)\n", result.winner_index + 1));
    }

    #[test]
    fn json_report() {
        let mut out = Vec::new();
        let result = run_once(&names(), &mut fastrand::Rng::with_seed(3), true, &mut out).expect("draw failed");
        let report: serde_json::Value = serde_json::from_slice(&out).expect("invalid json");
        assert_eq!(report["participants"], serde_json::json!(["Alice", "Bob", "Charlie", "Dave"]));
        assert_eq!(report["winner_index"], result.winner_index);
        assert_eq!(report["winner"], names().get(result.winner_index).expect("no winner"));
        let total = report["total_rotation_degrees"].as_f64().expect("no rotation");
        assert_eq!(landed_index(Rotation::from_degrees(total), 4), Some(result.winner_index));
    }

    #[test]
    fn same_seed_same_winner() {
        let first = run_once(&names(), &mut fastrand::Rng::with_seed(11), false, io::sink()).expect("draw failed");
        let second = run_once(&names(), &mut fastrand::Rng::with_seed(11), false, io::sink()).expect("draw failed");
        assert_eq!(first, second);
    }

    #[test]
    fn too_few_names() {
        let single = ParticipantList::from(vec!["Alice"]);
        let mut out = Vec::new();
        let result = run_once(&single, &mut fastrand::Rng::new(), false, &mut out);
        assert!(matches!(result, Err(HeadlessError::Draw(DrawError::NotEnoughParticipants(1)))));
        assert!(out.is_empty());
    }
}
