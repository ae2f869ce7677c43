//! Configuration handling

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::forms::FormKind;

/// Environment variable overriding the countdown target
pub const EVENT_START_ENV: &str = "FEST_FORMS_EVENT_START";

const DEFAULT_CONTACT_REVERT_MS: u64 = 5000;
const DEFAULT_LOGIN_REVERT_MS: u64 = 8000;
const DEFAULT_SIGNUP_REVERT_MS: u64 = 8000;
const DEFAULT_SIMULATED_LATENCY_MS: u64 = 2000;
const DEFAULT_BANNER_ROTATE_SECS: u64 = 6;
const DEFAULT_BANNER_AUTO_HIDE_SECS: u64 = 10;
const DEFAULT_EVENT_START: &str = "2027-02-13T09:00:00+05:30";

/// User configuration. Every field is optional and falls back to a default.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FestConfig {
    /// How long the contact form shows its result
    pub contact_revert_ms: Option<u64>,
    /// How long the login form shows its result
    pub login_revert_ms: Option<u64>,
    /// How long the signup form shows its result
    pub signup_revert_ms: Option<u64>,
    /// Delay of the simulated backend
    pub simulated_latency_ms: Option<u64>,
    /// Countdown target (RFC 3339)
    pub event_start: Option<String>,
    /// Seconds between banner messages
    pub banner_rotate_secs: Option<u64>,
    /// Seconds before the banner hides itself
    pub banner_auto_hide_secs: Option<u64>,
}

impl FestConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "finfest", "fest-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: FestConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Display window after a success or error for the given form
    pub fn revert_after(&self, kind: FormKind) -> Duration {
        let ms = match kind {
            FormKind::Contact => self.contact_revert_ms.unwrap_or(DEFAULT_CONTACT_REVERT_MS),
            FormKind::Login => self.login_revert_ms.unwrap_or(DEFAULT_LOGIN_REVERT_MS),
            FormKind::Signup => self.signup_revert_ms.unwrap_or(DEFAULT_SIGNUP_REVERT_MS),
        };
        Duration::from_millis(ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(
            self.simulated_latency_ms
                .unwrap_or(DEFAULT_SIMULATED_LATENCY_MS),
        )
    }

    pub fn banner_rotate(&self) -> Duration {
        Duration::from_secs(self.banner_rotate_secs.unwrap_or(DEFAULT_BANNER_ROTATE_SECS))
    }

    pub fn banner_auto_hide(&self) -> Duration {
        Duration::from_secs(
            self.banner_auto_hide_secs
                .unwrap_or(DEFAULT_BANNER_AUTO_HIDE_SECS),
        )
    }

    /// Countdown target: environment, then config file, then the built-in date
    pub fn event_start(&self) -> DateTime<Utc> {
        let from_env = std::env::var(EVENT_START_ENV).ok();
        for candidate in [from_env.as_deref(), self.event_start.as_deref()]
            .into_iter()
            .flatten()
        {
            match DateTime::parse_from_rfc3339(candidate) {
                Ok(dt) => return dt.with_timezone(&Utc),
                Err(e) => tracing::warn!("Ignoring invalid event start {candidate:?}: {e}"),
            }
        }
        DateTime::parse_from_rfc3339(DEFAULT_EVENT_START)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }
}
