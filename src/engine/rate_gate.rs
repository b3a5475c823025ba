use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Fixed-interval gate: consecutive passes are at least `interval` apart.
///
/// Only the start of work is paced; whatever runs after a pass is not awaited.
pub struct RateGate {
    interval: Duration,
    last_pass: Option<Instant>
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None
        }
    }

    /// Waits until the gate may be passed again. The first pass is immediate.
    pub async fn pass(&mut self) -> Instant {
        if let Some(last_pass) = self.last_pass {
            sleep_until(last_pass + self.interval).await;
        }

        let now = Instant::now();
        self.last_pass = Some(now);
        now
    }
}
