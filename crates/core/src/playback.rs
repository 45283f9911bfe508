//! Autoplay scheduling.
//!
//! A [`Player`] owns the live [`Session`] and at most one pending tick.
//! Every dispatched operation cancels the pending tick and schedules a
//! fresh one if the new state is still playing. Time is whatever
//! millisecond counter the caller drives it with.

use crate::session::{Op, Session};

/// A scheduled autoplay advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    /// When the tick is due, in caller milliseconds.
    pub due_ms: u64,
    /// Session generation the tick was scheduled against.
    pub generation: u64,
    /// Scheduling epoch; bumped on every cancellation.
    pub epoch: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    session: Session,
    pending: Option<PendingTick>,
    epoch: u64,
}

impl Player {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            pending: None,
            epoch: 0,
        }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// When the event loop next needs to call [`Player::poll`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.map(|t| t.due_ms)
    }

    /// Apply a user operation at time `now_ms`, then reschedule.
    pub fn dispatch(&mut self, op: Op, now_ms: u64) {
        self.session = self.session.apply(op);
        self.reschedule(now_ms);
    }

    /// Fire the pending tick if it is due. Returns true if the frame index
    /// moved.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(tick) = self.pending else {
            return false;
        };
        if tick.due_ms > now_ms {
            return false;
        }
        if tick.epoch != self.epoch || tick.generation != self.session.generation() {
            log::warn!(
                "discarding stale tick (epoch {} vs {}, generation {} vs {})",
                tick.epoch,
                self.epoch,
                tick.generation,
                self.session.generation()
            );
            self.pending = None;
            return false;
        }

        let before = self.session.index();
        self.session = self.session.apply(Op::Tick);
        self.reschedule(now_ms);
        self.session.index() != before
    }

    /// Drop any pending tick.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    fn reschedule(&mut self, from_ms: u64) {
        self.cancel();
        if !self.session.is_playing() {
            return;
        }
        if self.session.is_at_end() {
            self.session = self.session.apply(Op::Tick);
            return;
        }
        self.pending = Some(PendingTick {
            due_ms: from_ms.saturating_add(self.session.speed_ms()),
            generation: self.session.generation(),
            epoch: self.epoch,
        });
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::HeightArray;

    #[test]
    fn autoplay_advances_once_per_interval() {
        let mut player = Player::default();
        player.dispatch(Op::SetSpeed(100), 0);
        player.dispatch(Op::TogglePlay, 0);
        assert_eq!(player.next_deadline(), Some(100));

        assert!(!player.poll(99));
        assert_eq!(player.session().index(), 0);
        assert!(player.poll(100));
        assert_eq!(player.session().index(), 1);
        assert_eq!(player.next_deadline(), Some(200));
    }

    #[test]
    fn autoplay_stops_on_last_frame() {
        let mut player = Player::default();
        player.dispatch(Op::SetSpeed(100), 0);
        player.dispatch(Op::TogglePlay, 0);
        let n = player.session().frame_count() as u64;

        let mut now = 0;
        while player.session().is_playing() {
            now += 100;
            assert!(player.poll(now));
        }
        assert_eq!(now, (n - 1) * 100);
        assert!(player.session().is_at_end());
        assert_eq!(player.pending(), None);
        assert!(!player.poll(now + 1000));
        assert!(player.session().is_at_end());
    }

    #[test]
    fn play_at_last_frame_stops_immediately() {
        let mut player = Player::default();
        player.dispatch(Op::SeekTo(usize::MAX), 0);
        player.dispatch(Op::TogglePlay, 0);
        assert!(!player.session().is_playing());
        assert_eq!(player.pending(), None);
    }

    #[test]
    fn pausing_cancels_the_tick() {
        let mut player = Player::default();
        player.dispatch(Op::TogglePlay, 0);
        player.dispatch(Op::TogglePlay, 10);
        assert_eq!(player.pending(), None);
        assert!(!player.poll(10_000));
        assert_eq!(player.session().index(), 0);
    }

    #[test]
    fn manual_step_cancels_autoplay() {
        let mut player = Player::default();
        player.dispatch(Op::TogglePlay, 0);
        player.dispatch(Op::NextStep, 50);
        assert!(!player.session().is_playing());
        assert_eq!(player.pending(), None);
    }

    #[test]
    fn speed_change_applies_to_next_tick() {
        let mut player = Player::default();
        player.dispatch(Op::TogglePlay, 0);
        assert_eq!(player.next_deadline(), Some(800));
        player.dispatch(Op::SetSpeed(200), 300);
        assert_eq!(player.next_deadline(), Some(500));
    }

    #[test]
    fn huge_speed_saturates_instead_of_firing_early() {
        let mut player = Player::default();
        player.dispatch(Op::SetSpeed(u64::MAX), 0);
        player.dispatch(Op::TogglePlay, 5);
        assert_eq!(player.next_deadline(), Some(u64::MAX));
        assert!(!player.poll(5));
        assert!(!player.poll(u64::MAX - 1));
        assert_eq!(player.session().index(), 0);
        assert!(player.poll(u64::MAX));
        assert_eq!(player.session().index(), 1);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut player = Player::default();
        player.dispatch(Op::TogglePlay, 0);
        let stale = player.pending();

        let heights = HeightArray::new(vec![5, 5]).unwrap_or_default();
        player.dispatch(Op::SetHeights(heights), 10);
        assert_eq!(player.pending(), None);

        // Re-inject the old tick to simulate a timer that already fired.
        player.pending = stale;
        assert!(!player.poll(10_000));
        assert_eq!(player.session().index(), 0);
        assert_eq!(player.pending(), None);
    }

    #[test]
    fn cancel_on_teardown() {
        let mut player = Player::default();
        player.dispatch(Op::TogglePlay, 0);
        player.cancel();
        assert!(!player.poll(u64::MAX));
    }
}
