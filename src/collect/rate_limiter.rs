//! Rate limiting support

use chrono::{DateTime, Utc};
use log::info;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::PacingConfig;

/// Sleeps around the API rate limit.
///
/// Two kinds of pause exist: waiting for the budget to reset (plus a grace
/// period) and a fixed cooldown after each processed batch.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    cooldown: Duration,
    grace: Duration,
}

impl RateLimiter {
    #[must_use]
    pub fn new(cooldown: Duration, grace: Duration) -> Self {
        Self { cooldown, grace }
    }

    #[must_use]
    pub fn from_config(pacing: &PacingConfig) -> Self {
        Self::new(pacing.cooldown(), pacing.grace())
    }

    /// Whether a batch of `batch` results may exhaust the budget.
    ///
    /// Each result costs up to two calls (README probe and fetch).
    #[must_use]
    pub fn budget_too_low(remaining: u64, batch: u64) -> bool {
        remaining < batch.saturating_mul(2)
    }

    /// Time left until `reset`, plus the grace period.
    #[must_use]
    pub fn reset_delay(&self, reset: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        (reset - now).to_std().unwrap_or(Duration::ZERO) + self.grace
    }

    /// Block until the rate window resets.
    pub async fn wait_for_reset(&self, reset: DateTime<Utc>) {
        let wait_time = self.reset_delay(reset, Utc::now());
        info!("Waiting {wait_time:?} for the rate limit to reset");
        sleep(wait_time).await;
    }

    /// Fixed pause after a processed batch.
    pub async fn cool_down(&self) {
        info!("Cooling down for {:?}", self.cooldown);
        sleep(self.cooldown).await;
    }
}
