//! Request pacing between consecutive claims.
//!
//! The grounding service imposes a rate limit, so the sequencer waits between
//! claims. The wait is behind a trait so tests can run without real delays.

use async_trait::async_trait;
use std::time::Duration;

/// Waits between two consecutive grounding requests.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed-interval pause.
#[derive(Debug, Clone, Copy)]
pub struct IntervalPacer {
    interval: Duration,
}

impl IntervalPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_interval_pacer_waits_full_interval() {
        let pacer = IntervalPacer::new(Duration::from_millis(500));
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_pacing_returns_immediately() {
        let start = Instant::now();
        NoPacing.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(IntervalPacer::default().interval(), Duration::from_millis(500));
    }
}
