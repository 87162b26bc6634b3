use crate::session::RevealTicket;
use std::time::{Duration, Instant};

/// A one-shot timer that fires the reveal once the wheel has stopped.
///
/// There's at most one pending reveal. Scheduling replaces it and cancelling drops it; the
/// session still refuses tickets from spins it no longer runs, so a ticket that slips through a
/// reset is harmless.
#[derive(Debug, Default)]
pub struct RevealTimer {
    pending: Option<RevealTicket>,
}

impl RevealTimer {
    pub fn schedule(&mut self, ticket: RevealTicket) {
        if let Some(previous) = self.pending.replace(ticket) {
            log::debug!("replacing pending reveal for generation {}", previous.generation());
        }
    }

    pub fn cancel(&mut self) -> Option<RevealTicket> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How long until the pending reveal fires, zero if it's overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|ticket| ticket.due().saturating_duration_since(now))
    }

    /// Hands out the pending ticket if it's due.
    pub fn fire(&mut self, now: Instant) -> Option<RevealTicket> {
        match self.pending {
            Some(ticket) if ticket.due() <= now => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionError};

    const DELAY: Duration = Duration::from_millis(6000);

    fn spin(session: &mut Session, now: Instant) -> RevealTicket {
        session.spin_with(&mut fastrand::Rng::with_seed(3), now, DELAY).expect("spin failed")
    }

    #[test]
    fn fires_once_when_due() {
        let mut session = Session::new("Alice\nBob".into());
        let now = Instant::now();
        let mut timer = RevealTimer::default();
        timer.schedule(spin(&mut session, now));

        assert_eq!(timer.fire(now + Duration::from_millis(10)), None);
        assert_eq!(timer.time_until_due(now), Some(DELAY));
        let ticket = timer.fire(now + DELAY).expect("timer did not fire");
        assert_eq!(timer.fire(now + DELAY), None);
        assert!(!timer.is_pending());
        assert!(session.reveal(ticket, now + DELAY).is_ok());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut session = Session::new("Alice\nBob".into());
        let now = Instant::now();
        let mut timer = RevealTimer::default();
        timer.schedule(spin(&mut session, now));
        session.reset();
        assert!(timer.cancel().is_some());
        assert_eq!(timer.fire(now + DELAY * 2), None);
        assert_eq!(timer.time_until_due(now), None);
    }

    #[test]
    fn ticket_surviving_reset_is_discarded() {
        let mut session = Session::new("Alice\nBob".into());
        let now = Instant::now();
        let mut timer = RevealTimer::default();
        timer.schedule(spin(&mut session, now));
        session.reset();

        let ticket = timer.fire(now + DELAY).expect("timer did not fire");
        assert_eq!(session.reveal(ticket, now + DELAY), Err(SessionError::StaleTicket));
        assert_eq!(session.winner(), None);
    }

    #[test]
    fn overdue_reports_zero_wait() {
        let mut session = Session::new("Alice\nBob".into());
        let now = Instant::now();
        let mut timer = RevealTimer::default();
        timer.schedule(spin(&mut session, now));
        assert_eq!(timer.time_until_due(now + DELAY * 3), Some(Duration::ZERO));
    }
}
