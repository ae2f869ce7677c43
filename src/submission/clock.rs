//! Time source for the revert timers and the countdown

use chrono::{DateTime, Utc};
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::time::Duration;
use std::time::Instant;

/// Clock consulted by the submission controller and the countdown
pub trait Clock: Send + Sync {
    /// Monotonic time for deadlines
    fn now(&self) -> Instant;

    /// Calendar time for the countdown
    fn wall_now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<(Instant, DateTime<Utc>)>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Start with calendar time fixed at `wall`
    pub fn at(wall: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new((Instant::now(), wall))),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        now.0 += by;
        now.1 += chrono::Duration::from_std(by).unwrap();
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.lock().unwrap_or_else(|e| e.into_inner()).0
    }

    fn wall_now(&self) -> DateTime<Utc> {
        self.now.lock().unwrap_or_else(|e| e.into_inner()).1
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        (**self).wall_now()
    }
}
