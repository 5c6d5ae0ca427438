//! Application state and rate limiting.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Instant;

use hmsim_eval::Registry;
use tokio::sync::Mutex;

use super::RATE_LIMIT_WINDOW_SECS;

/// Per-IP request tracker: (request count, window start time).
type IpTracker = HashMap<IpAddr, (u64, Instant)>;

struct Windows {
    clients: IpTracker,
    /// When expired client windows were last dropped.
    last_sweep: Instant,
}

/// In-memory per-IP rate limiter.
pub(crate) struct RateLimiter {
    /// Request counts per IP per window.
    tracker: Mutex<Windows>,
    /// Maximum requests per window.
    pub(crate) max_requests: u64,
}

impl RateLimiter {
    pub(crate) fn new(max_requests: u64) -> Self {
        Self {
            tracker: Mutex::new(Windows {
                clients: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            max_requests,
        }
    }

    /// Check if a request from the given IP is allowed.
    /// Returns Ok(()) if allowed, Err(retry_after_secs) if rate limited.
    pub(crate) async fn check(&self, ip: IpAddr) -> Result<(), u64> {
        let mut windows = self.tracker.lock().await;
        let now = Instant::now();

        // Drop clients whose window has expired, at most once per window
        if now.duration_since(windows.last_sweep).as_secs() >= RATE_LIMIT_WINDOW_SECS {
            windows.clients.retain(|_, (_, start)| {
                now.duration_since(*start).as_secs() < RATE_LIMIT_WINDOW_SECS
            });
            windows.last_sweep = now;
        }

        let entry = windows.clients.entry(ip).or_insert((0, now));

        // Reset window if expired
        let elapsed = now.duration_since(entry.1).as_secs();
        if elapsed >= RATE_LIMIT_WINDOW_SECS {
            entry.0 = 0;
            entry.1 = now;
        }

        entry.0 += 1;
        if entry.0 > self.max_requests {
            Err(RATE_LIMIT_WINDOW_SECS.saturating_sub(elapsed))
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.tracker.lock().await.clients.len()
    }
}

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// Loaded once at startup; never mutated.
    pub(crate) registry: Registry,
    /// Per-IP rate limiter.
    pub(crate) rate_limiter: RateLimiter,
    /// Optional API key for authentication. None = no auth required.
    pub(crate) api_key: Option<String>,
}
