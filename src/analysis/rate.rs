use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Spaces out calls so that no more than `per_minute` start in any minute,
/// no matter how many workers share the limiter.
pub struct RateLimiter {
    spacing: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Returns `None` for a zero ceiling, meaning unthrottled.
    pub fn per_minute(per_minute: u32) -> Option<Self> {
        if per_minute == 0 {
            return None;
        }
        Some(Self {
            spacing: Duration::from_secs(60) / per_minute,
            next_slot: Mutex::new(None),
        })
    }

    /// Waits for the next free slot.
    pub async fn acquire(&self) {
        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(free_at) if free_at > now => free_at,
                _ => now,
            };
            *next_slot = Some(slot + self.spacing);
            slot
        };
        sleep_until(slot).await;
    }
}
