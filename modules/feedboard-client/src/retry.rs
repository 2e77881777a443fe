use std::time::Duration;

use feedboard_common::Config;

/// Bounded retry with linearly growing waits: `base`, `2 * base`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, the first one included. Zero behaves as one.
    pub attempts: u32,
    pub base: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE: Duration = Duration::from_secs(1);

    pub fn new(attempts: u32, base: Duration) -> Self {
        Self { attempts, base }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.retry_attempts, config.retry_base)
    }

    pub fn max_attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    /// Wait after the zero-based `attempt` failed.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt.saturating_add(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_waits_one_two_three_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        let waits: Vec<_> = (0..3).map(|a| policy.delay(a)).collect();
        assert_eq!(
            waits,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3)
            ]
        );
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn built_from_config() {
        let config = Config {
            retry_attempts: 5,
            retry_base: Duration::from_millis(250),
            ..Config::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.attempts, 5);
        assert_eq!(policy.delay(1), Duration::from_millis(500));
    }
}
