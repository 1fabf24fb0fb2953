//! Periodic progress signal for long retrievals.

use std::time::Duration;

use tokio::time::Instant;

/// Arms on the first [`Heartbeat::beat`], fires once `interval` has passed,
/// then disarms so the next beat re-arms it.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    interval: Duration,
    armed_at: Option<Instant>,
    fired: u64,
}

impl Heartbeat {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed_at: None,
            fired: 0,
        }
    }

    /// Returns `true` when a progress line is due.
    pub fn beat(&mut self) -> bool {
        let now = Instant::now();
        let armed_at = *self.armed_at.get_or_insert(now);
        if now.duration_since(armed_at) > self.interval {
            self.armed_at = None;
            self.fired += 1;
            return true;
        }
        false
    }

    /// How many times a beat has come due. Survives [`Heartbeat::reset`].
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn reset(&mut self) {
        self.armed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_only_after_interval() {
        let mut heartbeat = Heartbeat::new(Duration::from_secs(5));
        assert!(!heartbeat.beat());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(!heartbeat.beat());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(heartbeat.beat());
    }

    #[tokio::test(start_paused = true)]
    async fn rearms_after_firing() {
        let mut heartbeat = Heartbeat::new(Duration::from_secs(5));
        heartbeat.beat();
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(heartbeat.beat());
        // Disarmed: this beat re-arms from now.
        assert!(!heartbeat.beat());
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(heartbeat.beat());
        assert_eq!(heartbeat.fired(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_disarms() {
        let mut heartbeat = Heartbeat::new(Duration::from_secs(5));
        heartbeat.beat();
        tokio::time::advance(Duration::from_secs(6)).await;
        heartbeat.reset();
        assert!(!heartbeat.beat());
    }
}
