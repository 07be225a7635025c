//! Capsule lifecycle engine.
//!
//! A capsule is locked while `now < open_at` and unlocked from that instant
//! on. Nothing here is stored: status and remaining time are recomputed
//! from the wall clock on every poll, so a missed tick (suspended process,
//! closed app) self-corrects on the next computation.

use crate::models::Capsule;
use crate::utils;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MIN: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleStatus {
    Locked,
    Unlocked,
}

impl CapsuleStatus {
    /// Locked iff `now < open_at`; equality means unlocked.
    pub fn of(open_at: i64, now: i64) -> Self {
        if now < open_at {
            CapsuleStatus::Locked
        } else {
            CapsuleStatus::Unlocked
        }
    }
}

/// Whole seconds until `open_at`, clamped at zero so clock skew can never
/// produce a negative countdown.
pub fn remaining_seconds(open_at: i64, now: i64) -> i64 {
    ((open_at - now) / 1000).max(0)
}

/// Countdown decomposition of a remaining-seconds value. Seconds are
/// computed but the display shows only days, hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_seconds(s: i64) -> Self {
        let s = s.max(0);
        Self {
            days: s / SECS_PER_DAY,
            hours: (s % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (s % SECS_PER_HOUR) / SECS_PER_MIN,
            seconds: s % SECS_PER_MIN,
        }
    }

    /// `DD : HH : MM`, each zero-padded to two digits.
    pub fn display(&self) -> String {
        format!("{:02} : {:02} : {:02}", self.days, self.hours, self.minutes)
    }
}

/// Event emitted exactly once when a watched capsule crosses its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockEvent;

/// One-shot unlock watcher for a capsule detail view.
///
/// Created on view entry and dropped on dismissal; the owning view polls it
/// once per second (plus an immediate poll on entry). If the capsule is
/// already unlocked when the watch is created, the view renders unlocked
/// directly and the watch never fires.
#[derive(Debug)]
pub struct UnlockWatch {
    open_at: i64,
    fired: bool,
    /// Unlocked at entry: the locked presentation is never shown.
    entered_unlocked: bool,
}

impl UnlockWatch {
    pub fn new(capsule: &Capsule) -> Self {
        Self::with_now(capsule.open_at, utils::now_millis())
    }

    pub fn with_now(open_at: i64, now: i64) -> Self {
        let entered_unlocked = CapsuleStatus::of(open_at, now) == CapsuleStatus::Unlocked;
        Self {
            open_at,
            // An already-open capsule has no crossing left to announce.
            fired: entered_unlocked,
            entered_unlocked,
        }
    }

    pub fn entered_unlocked(&self) -> bool {
        self.entered_unlocked
    }

    pub fn status(&self, now: i64) -> CapsuleStatus {
        CapsuleStatus::of(self.open_at, now)
    }

    pub fn remaining(&self, now: i64) -> Countdown {
        Countdown::from_seconds(remaining_seconds(self.open_at, now))
    }

    /// Recompute from the clock. Returns the unlock event on the first poll
    /// that observes the threshold crossed, and never again after that.
    pub fn poll(&mut self, now: i64) -> Option<UnlockEvent> {
        if self.fired || CapsuleStatus::of(self.open_at, now) == CapsuleStatus::Locked {
            return None;
        }
        self.fired = true;
        Some(UnlockEvent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_locked_strictly_before_open_at() {
        assert_eq!(CapsuleStatus::of(1000, 999), CapsuleStatus::Locked);
        assert_eq!(CapsuleStatus::of(1000, 1000), CapsuleStatus::Unlocked);
        assert_eq!(CapsuleStatus::of(1000, 1001), CapsuleStatus::Unlocked);
    }

    #[test]
    fn remaining_seconds_clamps_and_floors() {
        assert_eq!(remaining_seconds(10_000, 0), 10);
        assert_eq!(remaining_seconds(10_999, 0), 10);
        assert_eq!(remaining_seconds(10_000, 10_000), 0);
        // Clock skew past the threshold never goes negative.
        assert_eq!(remaining_seconds(10_000, 99_999), 0);
    }

    #[test]
    fn remaining_seconds_is_non_increasing() {
        let open_at = 1_000_000;
        let mut last = i64::MAX;
        for now in (0..1_100_000).step_by(37_000) {
            let r = remaining_seconds(open_at, now);
            assert!(r <= last);
            assert!(r >= 0);
            last = r;
        }
    }

    #[test]
    fn countdown_decomposition_round_trips() {
        for &s in &[0, 59, 60, 3_599, 3_600, 86_399, 86_400, 123_456_789] {
            let c = Countdown::from_seconds(s);
            let floor = c.days * 86_400 + c.hours * 3_600 + c.minutes * 60;
            assert!(floor <= s, "floor {} > s {}", floor, s);
            assert!(s < floor + 60, "s {} >= floor {} + 60", s, floor);
            assert_eq!(floor + c.seconds, s);
        }
    }

    #[test]
    fn countdown_display_zero_pads() {
        let c = Countdown::from_seconds(90_061); // 1d 1h 1m 1s
        assert_eq!(c.display(), "01 : 01 : 01");
        assert_eq!(Countdown::from_seconds(0).display(), "00 : 00 : 00");
    }

    #[test]
    fn watch_fires_exactly_once_at_crossing() {
        let mut w = UnlockWatch::with_now(5_000, 0);
        assert!(!w.entered_unlocked());
        assert_eq!(w.poll(1_000), None);
        assert_eq!(w.poll(4_999), None);
        assert_eq!(w.poll(5_000), Some(UnlockEvent));
        // Remaining time pinned at zero must not re-fire the event.
        assert_eq!(w.poll(6_000), None);
        assert_eq!(w.poll(7_000), None);
    }

    #[test]
    fn watch_entered_after_open_never_fires() {
        let mut w = UnlockWatch::with_now(5_000, 5_000);
        assert!(w.entered_unlocked());
        assert_eq!(w.poll(5_000), None);
        assert_eq!(w.poll(10_000), None);
    }

    #[test]
    fn capsule_unlocks_end_to_end() {
        // Capsule opening 2000 ms from "now": locked with ~2 s remaining,
        // then exactly one unlock event once the threshold passes.
        let now = 1_700_000_000_000;
        let capsule = Capsule::new("later".into(), "p.jpg".into(), "hi".into(), now + 2_000);
        let mut w = UnlockWatch::with_now(capsule.open_at, now);

        assert_eq!(w.status(now), CapsuleStatus::Locked);
        assert_eq!(remaining_seconds(capsule.open_at, now), 2);
        assert_eq!(w.poll(now), None);

        let later = now + 2_100;
        assert_eq!(w.status(later), CapsuleStatus::Unlocked);
        assert_eq!(w.poll(later), Some(UnlockEvent));
        assert_eq!(w.poll(later + 1_000), None);
    }
}
