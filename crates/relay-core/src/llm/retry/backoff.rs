//! Backoff delays between retry attempts

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const JITTER_RATIO: f64 = 0.2;

/// Exponential backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
    /// Growth factor per retry
    pub multiplier: f64,
    /// Add up to 20% random jitter
    #[serde(default)]
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl BackoffConfig {
    /// Create a new backoff config with custom initial delay
    pub fn with_initial_delay(initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            ..Default::default()
        }
    }

    /// Set the maximum delay
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the multiplier
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Enable or disable jitter
    pub fn jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before retry number `retry` (0-indexed), capped at `max_delay`
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let max = self.max_delay.as_secs_f64();
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let mut secs = if base.is_finite() { base.clamp(0.0, max) } else { max };

        if self.jitter && secs > 0.0 {
            secs += rand::thread_rng().gen_range(0.0..=secs * JITTER_RATIO);
            secs = secs.min(max);
        }

        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> BackoffConfig {
        BackoffConfig::with_initial_delay(Duration::from_millis(100))
            .max_delay(Duration::from_secs(10))
            .jitter(false)
    }

    #[test]
    fn test_exponential_delays() {
        let backoff = no_jitter();
        assert_eq!(backoff.delay_for_retry(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_retry(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_retry(2), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_retry(3), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_is_capped() {
        let backoff = no_jitter();
        assert_eq!(backoff.delay_for_retry(20), Duration::from_secs(10));
        assert_eq!(backoff.delay_for_retry(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let backoff = no_jitter().jitter(true);
        for _ in 0..50 {
            let delay = backoff.delay_for_retry(1);
            assert!(delay >= Duration::from_millis(200));
            assert!(delay <= Duration::from_millis(240));
        }
    }

    #[test]
    fn test_negative_multiplier_never_panics() {
        let backoff = no_jitter().multiplier(-3.0);
        assert_eq!(backoff.delay_for_retry(1), Duration::ZERO);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"initial_delay":"250ms","max_delay":"5s","multiplier":1.5}"#;
        let backoff: BackoffConfig = serde_json::from_str(json).unwrap();
        assert_eq!(backoff.initial_delay, Duration::from_millis(250));
        assert!(!backoff.jitter);
    }
}
