//! Score Session
//!
//! Tracks the recycling score of the signed-in user. A successful drop onto the
//! recycle zone bumps the score immediately; the new value is written back only
//! after it has been stable for the debounce interval, and only if it differs
//! from what is known to be persisted.

use std::time::Duration;

use log::{debug, warn};

use crate::debounce::Debouncer;
use crate::models::UserProfile;

/// Drop zone id that counts as recycling
pub const RECYCLE_ZONE: &str = "recycle-bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { uid: String, score: u64 },
}

/// A score write that is due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub uid: String,
    pub score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecycleOutcome {
    /// Dropped on the recycle zone; carries the new score
    Recycled(u64),
    /// Released anywhere else
    Missed,
    /// Dropped on the zone without a signed-in user
    SignInRequired,
}

#[derive(Debug, Clone)]
pub struct ScoreSession {
    state: SessionState,
    persisted: u64,
    debouncer: Debouncer<u64>,
}

impl ScoreSession {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: SessionState::Anonymous,
            persisted: 0,
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        match &self.state {
            SessionState::Anonymous => 0,
            SessionState::Authenticated { score, .. } => *score,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Authenticated { uid, .. } => Some(uid),
        }
    }

    /// Seed the session from the user's stored record
    pub fn sign_in(&mut self, profile: &UserProfile) {
        self.debouncer.cancel();
        self.persisted = profile.score;
        self.state = SessionState::Authenticated {
            uid: profile.uid.clone(),
            score: profile.score,
        };
    }

    /// Back to anonymous. Nothing is written; the stored score is kept.
    pub fn sign_out(&mut self) {
        if let Some(score) = self.debouncer.cancel() {
            debug!("dropping pending score write ({}) on sign-out", score);
        }
        self.persisted = 0;
        self.state = SessionState::Anonymous;
    }

    /// Evaluate the end of a recycle gesture released over `target`
    pub fn on_drop(&mut self, target: Option<&str>, now: Duration) -> RecycleOutcome {
        if target != Some(RECYCLE_ZONE) {
            return RecycleOutcome::Missed;
        }

        match &mut self.state {
            SessionState::Anonymous => RecycleOutcome::SignInRequired,
            SessionState::Authenticated { score, .. } => {
                *score += 1;
                let score = *score;
                self.debouncer.schedule(score, now);
                RecycleOutcome::Recycled(score)
            }
        }
    }

    /// When the pending write (if any) becomes due
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Hand out the write that is due at `now`, skipping unchanged values
    pub fn poll_persist(&mut self, now: Duration) -> Option<PendingWrite> {
        let score = self.debouncer.poll(now)?;
        let uid = self.uid()?.to_string();

        if score == self.persisted {
            debug!("score {} already persisted, skipping write", score);
            return None;
        }

        Some(PendingWrite { uid, score })
    }

    /// Record a successful write; ignored if the user has changed since
    pub fn confirm_persisted(&mut self, write: &PendingWrite) {
        if self.uid() == Some(write.uid.as_str()) {
            self.persisted = write.score;
        }
    }

    /// The optimistic score stays; the next change schedules a fresh attempt
    pub fn persist_failed(&mut self, write: &PendingWrite) {
        warn!("score write {} for {} failed, keeping local score {}", write.score, write.uid, self.score());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn profile(uid: &str, score: u64) -> UserProfile {
        UserProfile {
            uid: uid.to_string(),
            display_name: uid.to_uppercase(),
            avatar: String::new(),
            score,
            is_admin: false,
        }
    }

    fn signed_in(score: u64) -> ScoreSession {
        let mut session = ScoreSession::new(ms(1500));
        session.sign_in(&profile("ada", score));
        session
    }

    /// Poll every 100ms up to `until`, collecting (time, write)
    fn drain(session: &mut ScoreSession, from: u64, until: u64) -> Vec<(u64, PendingWrite)> {
        let mut writes = Vec::new();
        let mut t = from;
        while t <= until {
            if let Some(write) = session.poll_persist(ms(t)) {
                session.confirm_persisted(&write);
                writes.push((t, write));
            }
            t += 100;
        }
        writes
    }

    #[test]
    fn test_starts_anonymous_at_zero() {
        let session = ScoreSession::new(ms(1500));
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_sign_in_seeds_stored_score() {
        let session = signed_in(7);
        assert_eq!(session.score(), 7);
        assert_eq!(session.uid(), Some("ada"));
    }

    #[test]
    fn test_drops_on_zone_increment() {
        let mut session = signed_in(3);
        for _ in 0..3 {
            session.on_drop(Some(RECYCLE_ZONE), ms(0));
        }
        assert_eq!(session.score(), 6);
    }

    #[test]
    fn test_missed_drop_leaves_score() {
        let mut session = signed_in(3);
        assert_eq!(session.on_drop(Some(RECYCLE_ZONE), ms(0)), RecycleOutcome::Recycled(4));
        assert_eq!(session.on_drop(None, ms(100)), RecycleOutcome::Missed);
        assert_eq!(session.on_drop(Some("navbar"), ms(200)), RecycleOutcome::Missed);
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn test_anonymous_drop_does_not_score() {
        let mut session = ScoreSession::new(ms(1500));
        assert_eq!(session.on_drop(Some(RECYCLE_ZONE), ms(0)), RecycleOutcome::SignInRequired);
        assert_eq!(session.score(), 0);
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn test_burst_yields_single_write_with_final_value() {
        let mut session = signed_in(0);
        session.on_drop(Some(RECYCLE_ZONE), ms(0));
        session.on_drop(Some(RECYCLE_ZONE), ms(200));
        session.on_drop(Some(RECYCLE_ZONE), ms(400));

        let writes = drain(&mut session, 0, 4000);
        assert_eq!(writes.len(), 1);
        let (at, write) = &writes[0];
        assert_eq!(*at, 1900);
        assert_eq!(write.score, 3);
        assert_eq!(write.uid, "ada");
    }

    #[test]
    fn test_sign_out_resets_without_writing() {
        let mut session = signed_in(5);
        session.on_drop(Some(RECYCLE_ZONE), ms(0));
        session.sign_out();

        assert_eq!(session.score(), 0);
        assert!(drain(&mut session, 0, 4000).is_empty());
    }

    #[test]
    fn test_failed_write_keeps_score_and_retries_on_next_change() {
        let mut session = signed_in(0);
        session.on_drop(Some(RECYCLE_ZONE), ms(0));

        let write = session.poll_persist(ms(1500)).unwrap();
        session.persist_failed(&write);
        assert_eq!(session.score(), 1);

        session.on_drop(Some(RECYCLE_ZONE), ms(2000));
        let retry = session.poll_persist(ms(3500)).unwrap();
        assert_eq!(retry.score, 2);
    }

    #[test]
    fn test_confirmation_for_previous_user_is_ignored() {
        let mut session = signed_in(0);
        session.on_drop(Some(RECYCLE_ZONE), ms(0));
        let write = session.poll_persist(ms(1500)).unwrap();

        session.sign_out();
        session.sign_in(&profile("bob", 1));
        session.confirm_persisted(&write);

        session.on_drop(Some(RECYCLE_ZONE), ms(2000));
        assert_eq!(session.poll_persist(ms(3500)).map(|w| w.score), Some(2));
    }
}
