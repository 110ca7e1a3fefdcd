//! Bounded polling for long-running remote jobs.

use std::time::Duration;

/// Fixed-interval polling with an attempt cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Status checks after creation before giving up
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 90,
        }
    }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Upper bound on the time spent waiting
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_three_minutes() {
        assert_eq!(PollPolicy::default().budget(), Duration::from_secs(180));
    }
}
