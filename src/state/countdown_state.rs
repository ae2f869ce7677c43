//! Festival countdown

use chrono::{DateTime, Utc};

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Time from `now` until `target`, all zero once the target has passed
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = (target - now).num_seconds();
        if remaining <= 0 {
            return Self::default();
        }
        Self {
            days: remaining / 86_400,
            hours: (remaining % 86_400) / 3_600,
            minutes: (remaining % 3_600) / 60,
            seconds: remaining % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug)]
pub struct CountdownState {
    target: DateTime<Utc>,
    time_left: TimeLeft,
    ended: bool,
}

impl CountdownState {
    /// A target already reached at `now` counts as ended, so no end event fires
    pub fn new(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            target,
            time_left: TimeLeft::until(target, now),
            ended: now >= target,
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn time_left(&self) -> TimeLeft {
        self.time_left
    }

    /// Recompute the remaining time. Returns true exactly once, on the
    /// first update at or after the target.
    pub fn update(&mut self, now: DateTime<Utc>) -> bool {
        self.time_left = TimeLeft::until(self.target, now);
        if now >= self.target && !self.ended {
            self.ended = true;
            return true;
        }
        false
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }
}
