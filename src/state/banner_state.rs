//! Notification banner state

use crate::storage::FlagStore;
use anyhow::Result;
use std::time::{Duration, Instant};

/// Flag key recording that the user closed the banner
pub const BANNER_DISMISSED_KEY: &str = "bannerDismissed";

pub const BANNER_MESSAGES: [&str; 3] = [
    "Early Bird Registration ends Jan 15 - Save 30%!",
    "Speaker Lineup Announced - Check the Events page!",
    "New Workshops just added - Limited spots!",
];

/// Rotating announcement shown above the forms
#[derive(Debug)]
pub struct BannerState {
    visible: bool,
    current: usize,
    shown_at: Instant,
    rotate_every: Duration,
    auto_hide_after: Duration,
}

impl BannerState {
    /// Read the dismissed flag once; any stored value keeps the banner hidden
    pub fn load(
        store: &dyn FlagStore,
        now: Instant,
        rotate_every: Duration,
        auto_hide_after: Duration,
    ) -> Self {
        let dismissed = match store.get(BANNER_DISMISSED_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read banner flag: {e:#}");
                false
            }
        };
        Self {
            visible: !dismissed,
            current: 0,
            shown_at: now,
            rotate_every,
            auto_hide_after,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &'static str {
        BANNER_MESSAGES[self.current]
    }

    /// Advance rotation and auto-hide. Auto-hiding is not persisted.
    pub fn tick(&mut self, now: Instant) {
        if !self.visible {
            return;
        }
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed >= self.auto_hide_after {
            self.visible = false;
            return;
        }
        if !self.rotate_every.is_zero() {
            let steps = (elapsed.as_millis() / self.rotate_every.as_millis()) as usize;
            self.current = steps % BANNER_MESSAGES.len();
        }
    }

    /// Hide the banner for good
    pub fn dismiss(&mut self, store: &mut dyn FlagStore) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        self.visible = false;
        store.set(BANNER_DISMISSED_KEY, "true")
    }
}
