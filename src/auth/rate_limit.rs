use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Sliding-window login throttle, keyed by client address.
///
/// Counts every attempt, successful or not; once a client has used up its
/// allowance inside the window, further attempts are rejected before the
/// password is even checked. State is in-process only and injected into the
/// handlers through application state.
pub struct LoginRateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl LoginRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_attempts: config.max_attempts as usize,
            window: Duration::from_secs(config.window_secs),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `client`; returns false when the client has
    /// exhausted its allowance within the current window.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut attempts = self.attempts.lock().unwrap_or_else(|e| e.into_inner());

        // Evict clients whose window has fully expired, or the map grows
        // by one key per distinct client string forever
        attempts.retain(|_, stamps| {
            stamps.retain(|t| now.duration_since(*t) < self.window);
            !stamps.is_empty()
        });

        let entry = attempts.entry(client.to_string()).or_default();
        if entry.len() >= self.max_attempts {
            return false;
        }

        entry.push(now);
        true
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, window_secs: u64) -> LoginRateLimiter {
        LoginRateLimiter::new(&RateLimitConfig {
            max_attempts: max,
            window_secs,
        })
    }

    #[test]
    fn allows_up_to_max_then_blocks() {
        let limiter = limiter(6, 900);
        for _ in 0..6 {
            assert!(limiter.check("1.2.3.4"));
        }
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn clients_are_independent() {
        let limiter = limiter(1, 900);
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        assert!(limiter.check("b"));
    }

    #[test]
    fn expired_clients_are_evicted_from_the_map() {
        let limiter = limiter(6, 900);
        let start = Instant::now();
        for i in 0..50 {
            assert!(limiter.check_at(&format!("10.0.0.{i}"), start));
        }
        assert_eq!(limiter.tracked_clients(), 50);

        // One fresh attempt past the window sweeps all stale keys
        assert!(limiter.check_at("fresh", start + Duration::from_secs(901)));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn window_expiry_frees_allowance() {
        let limiter = limiter(1, 900);
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(!limiter.check_at("a", start + Duration::from_secs(10)));
        assert!(limiter.check_at("a", start + Duration::from_secs(901)));
    }
}
