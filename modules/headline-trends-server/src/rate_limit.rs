use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Sliding-window request limit per client IP.
pub struct RateLimiter {
    max_per_window: usize,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

/// Above this many tracked clients, idle entries are dropped on the next check.
const PRUNE_THRESHOLD: usize = 1000;

impl RateLimiter {
    /// A `max_per_window` of zero allows everything.
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_per_window > 0 && !self.window.is_zero()
    }

    /// Record a request from `ip` at `now`. Returns false if it is over the limit.
    pub async fn check(&self, ip: IpAddr, now: Instant) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let mut hits = self.hits.lock().await;
        if hits.len() > PRUNE_THRESHOLD {
            prune_idle(&mut hits, now, self.window);
        }
        let entries = hits.entry(ip).or_default();
        check_rate_limit(entries, now, self.window, self.max_per_window)
    }

    pub async fn tracked_clients(&self) -> usize {
        self.hits.lock().await.len()
    }
}

/// Prunes entries older than `window` and records `now` if still under `max`.
pub fn check_rate_limit(
    entries: &mut Vec<Instant>,
    now: Instant,
    window: Duration,
    max: usize,
) -> bool {
    if let Some(cutoff) = now.checked_sub(window) {
        entries.retain(|t| *t > cutoff);
    }
    if entries.len() >= max {
        return false;
    }
    entries.push(now);
    true
}

fn prune_idle(hits: &mut HashMap<IpAddr, Vec<Instant>>, now: Instant, window: Duration) {
    let Some(cutoff) = now.checked_sub(window) else {
        return;
    };
    hits.retain(|_, entries| {
        entries.retain(|t| *t > cutoff);
        !entries.is_empty()
    });
}
