//! The state of one raffle: the typed names, the wheel's rotation and the winner once revealed.
//!
//! A session moves through `Idle -> Drawing -> Revealing -> Idle`. Spinning hands out a
//! [RevealTicket]; the winner only becomes visible once that ticket is redeemed after its due
//! time. Every spin and every reset bumps a generation counter, so tickets from a spin that was
//! reset away are refused instead of surfacing a stale winner.

use crate::draw::{self, DrawError, DrawResult, ParticipantList, Rotation};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a spin. Names can be edited.
    Idle,
    /// The wheel is turning. Names are locked and the winner is kept hidden.
    Drawing,
    /// The winner is shown.
    Revealing,
}

/// Permission to reveal the outcome of one spin, valid from `due` on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTicket {
    generation: u64,
    due: Instant,
}

impl RevealTicket {
    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Errors that can occur when driving a session
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error("the wheel is already spinning")]
    Busy,

    #[error("a winner is being shown, close it first")]
    WinnerShown,

    #[error("participants cannot be edited while the wheel is spinning")]
    InputLocked,

    #[error("reveal ticket belongs to a spin that is no longer running")]
    StaleTicket,

    #[error("the wheel is still spinning, reveal is due in {0:?}")]
    NotDue(Duration),
}

/// What a session looks like from the outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub state: SessionState,
    pub input: &'a str,
    pub participants: &'a ParticipantList,
    pub rotation: Rotation,
    pub winner: Option<&'a str>,
    pub error: Option<&'a str>,
}

#[derive(Debug)]
struct PendingDraw {
    ticket: RevealTicket,
    result: DrawResult,
}

#[derive(Debug)]
pub struct Session {
    input: String,
    participants: ParticipantList,
    rotation: Rotation,
    state: SessionState,
    pending: Option<PendingDraw>,
    winner: Option<String>,
    error: Option<String>,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Session {
    pub fn new(input: String) -> Self {
        Self {
            input,
            participants: ParticipantList::default(),
            rotation: Rotation::ZERO,
            state: SessionState::Idle,
            pending: None,
            winner: None,
            error: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The raw text the participants are typed into.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The names in the input box as they would be spun right now.
    pub fn parsed_input(&self) -> ParticipantList {
        ParticipantList::parse(&self.input)
    }

    /// The names that were on the wheel for the last spin.
    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The winner, only once revealed.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// The message for the last rejected spin.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            state: self.state,
            input: &self.input,
            participants: &self.participants,
            rotation: self.rotation,
            winner: self.winner(),
            error: self.error(),
        }
    }

    /// Changes the participant text. Refused while the wheel is spinning.
    pub fn edit_input<F: FnOnce(&mut String)>(&mut self, edit: F) -> Result<(), SessionError> {
        if self.state == SessionState::Drawing {
            return Err(SessionError::InputLocked);
        }
        edit(&mut self.input);
        Ok(())
    }

    /// Spins the wheel with the names currently in the input.
    pub fn spin(&mut self, now: Instant, delay: Duration) -> Result<RevealTicket, SessionError> {
        self.spin_with(&mut fastrand::Rng::new(), now, delay)
    }

    /// Spins the wheel using the given random generator.
    ///
    /// On success the session is `Drawing` and its rotation already points at the winner; the
    /// returned ticket can be redeemed through [Session::reveal] once `delay` has passed.
    pub fn spin_with(
        &mut self,
        rng: &mut fastrand::Rng,
        now: Instant,
        delay: Duration,
    ) -> Result<RevealTicket, SessionError> {
        match self.state {
            SessionState::Idle => (),
            SessionState::Drawing => return Err(SessionError::Busy),
            SessionState::Revealing => return Err(SessionError::WinnerShown),
        };
        let participants = self.parsed_input();
        let result = match draw::draw_with(&participants, self.rotation, rng) {
            Ok(result) => result,
            Err(e) => {
                log::info!("spin rejected: {e}");
                self.error = Some(rejection_message(&e));
                return Err(e.into());
            }
        };

        self.generation += 1;
        let ticket = RevealTicket { generation: self.generation, due: now + delay };
        log::info!(
            "spinning {} participants to {} (generation {})",
            participants.len(),
            result.total_rotation,
            ticket.generation
        );
        self.participants = participants;
        self.rotation = result.total_rotation;
        self.error = None;
        self.winner = None;
        self.pending = Some(PendingDraw { ticket, result });
        self.state = SessionState::Drawing;
        Ok(ticket)
    }

    /// Shows the winner of the spin `ticket` was handed out for.
    pub fn reveal(&mut self, ticket: RevealTicket, now: Instant) -> Result<&str, SessionError> {
        let pending = match &self.pending {
            Some(pending) if pending.ticket == ticket && self.state == SessionState::Drawing => pending,
            _ => {
                log::debug!("discarding stale reveal for generation {}", ticket.generation);
                return Err(SessionError::StaleTicket);
            }
        };
        if now < pending.ticket.due {
            return Err(SessionError::NotDue(pending.ticket.due - now));
        }

        let winner_index = pending.result.winner_index;
        let winner = self.participants.get(winner_index).map(String::from);
        self.pending = None;
        self.state = SessionState::Revealing;
        log::info!("revealing participant {winner_index}: {winner:?}");
        self.winner = winner;
        Ok(self.winner.as_deref().unwrap_or_default())
    }

    /// Dismisses the winner, keeping the names and the wheel where they are.
    ///
    /// Returns whether there was anything to close.
    pub fn close(&mut self) -> bool {
        if self.state != SessionState::Revealing {
            return false;
        }
        self.winner = None;
        self.state = SessionState::Idle;
        true
    }

    /// Dismisses the current winner, if any, and spins again with the same names.
    pub fn spin_again(&mut self, now: Instant, delay: Duration) -> Result<RevealTicket, SessionError> {
        self.spin_again_with(&mut fastrand::Rng::new(), now, delay)
    }

    pub fn spin_again_with(
        &mut self,
        rng: &mut fastrand::Rng,
        now: Instant,
        delay: Duration,
    ) -> Result<RevealTicket, SessionError> {
        self.close();
        self.spin_with(rng, now, delay)
    }

    /// Clears the board to run a fresh raffle. Same as [Session::reset].
    pub fn start_new_raffle(&mut self) {
        self.reset();
    }

    /// Goes back to an empty, unrotated wheel from any state.
    ///
    /// Any ticket handed out before this call is refused from now on.
    pub fn reset(&mut self) {
        if self.state == SessionState::Drawing {
            log::info!("reset while spinning, cancelling generation {}", self.generation);
        }
        self.generation += 1;
        self.input.clear();
        self.participants = ParticipantList::default();
        self.rotation = Rotation::ZERO;
        self.state = SessionState::Idle;
        self.pending = None;
        self.winner = None;
        self.error = None;
    }
}

/// The message shown next to the input box for a rejected spin.
fn rejection_message(error: &DrawError) -> String {
    match error {
        DrawError::NotEnoughParticipants(_) => "Please enter at least two participants.".into(),
        other => other.to_string(),
    }
}
