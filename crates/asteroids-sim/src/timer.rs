//! One-shot timers on the simulation clock.
//!
//! A timer carries the token of the event that armed it. The engine only
//! honours a timer whose token still matches the current round, and drops
//! pending timers on every round start, so a timer armed in one round can
//! never fire in the next.

use std::time::Duration;

/// Identifies the round a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShotTimer {
    pub token: TimerToken,
    pub deadline: Duration,
}

impl OneShotTimer {
    pub fn new(token: TimerToken, now: Duration, delay: Duration) -> Self {
        Self {
            token,
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.deadline
    }
}

/// Take the timer out of the slot if it is due for `token`. A due timer
/// with a stale token is discarded without firing.
pub fn take_due(slot: &mut Option<OneShotTimer>, token: TimerToken, now: Duration) -> bool {
    match *slot {
        Some(timer) if timer.is_due(now) => {
            *slot = None;
            timer.token == token
        }
        _ => false,
    }
}
