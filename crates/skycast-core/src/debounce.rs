// crates/skycast-core/src/debounce.rs

//! Debounced commit of a rapidly changing value.
//!
//! The controller owns no timer. It hands out a [`Deadline`] per change and
//! the host arms a real timer (browser `setTimeout`, a tokio sleep, a test
//! clock) that calls [`DebounceController::fire`] with the deadline's token.
//! Every change invalidates the previous token, so a superseded timer that
//! still fires commits nothing.
//!
//! Time is a [`Duration`] measured from any origin the host likes; the
//! controller only compares values it was given.

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// When the host should call back, and with which token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub token: TimerToken,
    pub at: Duration,
}

impl Deadline {
    /// Time left until the deadline, saturating at zero.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.at.saturating_sub(now)
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit<'a> {
    pub value: &'a str,
    /// The value differs from the previous commit.
    pub changed: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    token: TimerToken,
    value: String,
    due: Duration,
}

#[derive(Debug, Clone)]
pub struct DebounceController {
    delay: Duration,
    pending: Option<Pending>,
    committed: String,
    next_token: u64,
}

impl Default for DebounceController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebounceController {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            committed: String::new(),
            next_token: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value and restarts the quiet period. Any earlier pending
    /// commit is cancelled.
    pub fn on_change(&mut self, value: impl Into<String>, now: Duration) -> Deadline {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let due = now + self.delay;

        self.pending = Some(Pending {
            token,
            value: value.into(),
            due,
        });

        Deadline { token, at: due }
    }

    /// Timer callback. Commits only if `token` belongs to the live pending
    /// value and its deadline has passed.
    pub fn fire(&mut self, token: TimerToken, now: Duration) -> Option<Commit<'_>> {
        let Some(pending) = &self.pending else {
            return None;
        };
        if pending.token != token {
            tracing::trace!(token = token.get(), "stale debounce timer ignored");
            return None;
        }
        if now < pending.due {
            return None;
        }
        self.commit()
    }

    /// Tick-style alternative to [`fire`](Self::fire) for hosts without timers.
    pub fn poll(&mut self, now: Duration) -> Option<Commit<'_>> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.commit()
        } else {
            None
        }
    }

    /// Drops the pending commit, if any. Returns whether something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Deadline> {
        self.pending.as_ref().map(|p| Deadline {
            token: p.token,
            at: p.due,
        })
    }

    /// The last committed value ("" before the first commit).
    pub fn committed(&self) -> &str {
        &self.committed
    }

    fn commit(&mut self) -> Option<Commit<'_>> {
        let pending = self.pending.take()?;
        let changed = pending.value != self.committed;
        tracing::debug!(value = %pending.value, changed, "debounced value committed");
        self.committed = pending.value;
        Some(Commit {
            value: &self.committed,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn commits_after_quiet_period() {
        let mut d = DebounceController::default();
        let deadline = d.on_change("par", ms(0));

        assert_eq!(deadline.at, ms(500));
        assert_eq!(d.fire(deadline.token, ms(499)), None);
        assert!(d.is_pending());
        assert_eq!(d.fire(deadline.token, ms(500)).map(|c| c.value), Some("par"));
        assert_eq!(d.committed(), "par");
        assert!(!d.is_pending());
    }

    #[test]
    fn superseded_token_never_commits() {
        let mut d = DebounceController::default();
        let first = d.on_change("p", ms(0));
        let second = d.on_change("pa", ms(100));

        assert_eq!(d.fire(first.token, ms(500)), None);
        assert_eq!(d.committed(), "");
        assert_eq!(d.fire(second.token, ms(600)).map(|c| c.value), Some("pa"));
    }

    #[test]
    fn token_fires_at_most_once() {
        let mut d = DebounceController::default();
        let deadline = d.on_change("x", ms(0));
        assert!(d.fire(deadline.token, ms(500)).is_some());
        assert!(d.fire(deadline.token, ms(900)).is_none());
    }

    #[test]
    fn poll_commits_latest_value_only() {
        let mut d = DebounceController::new(ms(50));
        d.on_change("a", ms(0));
        d.on_change("ab", ms(10));
        assert_eq!(d.poll(ms(55)), None);
        assert_eq!(d.poll(ms(60)).map(|c| c.value), Some("ab"));
        assert_eq!(d.poll(ms(200)), None);
    }

    #[test]
    fn cancel_drops_pending_commit() {
        let mut d = DebounceController::default();
        let deadline = d.on_change("lon", ms(0));
        assert!(d.cancel());
        assert!(!d.cancel());
        assert_eq!(d.fire(deadline.token, ms(1000)), None);
        assert_eq!(d.committed(), "");
    }

    #[test]
    fn commit_reports_whether_value_changed() {
        let mut d = DebounceController::default();
        let first = d.on_change("oslo", ms(0));
        let commit = d.fire(first.token, ms(500)).unwrap();
        assert!(commit.changed);

        let again = d.on_change("oslo", ms(1000));
        assert_eq!(
            d.fire(again.token, ms(1500)),
            Some(Commit {
                value: "oslo",
                changed: false
            })
        );

        let other = d.on_change("", ms(2000));
        assert!(d.fire(other.token, ms(2500)).unwrap().changed);
    }

    #[test]
    fn deadline_reports_remaining_time() {
        let mut d = DebounceController::default();
        let deadline = d.on_change("a", ms(100));
        assert_eq!(deadline.remaining(ms(300)), ms(300));
        assert_eq!(deadline.remaining(ms(900)), Duration::ZERO);
        assert_eq!(d.next_deadline(), Some(deadline));
    }
}
