use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Tracks the rate limit budget GitHub reports on each response.
///
/// Nothing here waits or retries; an exhausted budget is surfaced as an
/// error by the client and ends the scan.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

#[derive(Debug, Clone, Copy, Default)]
struct RateLimitState {
    remaining: Option<u32>,
    reset_epoch: Option<u64>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState::default()),
        }
    }

    pub fn update_from_headers(&self, headers: &HeaderMap) {
        let remaining = header_number::<u32>(headers, "x-ratelimit-remaining");
        let reset = header_number::<u64>(headers, "x-ratelimit-reset");

        if remaining.is_none() && reset.is_none() {
            return;
        }

        if let Ok(mut state) = self.state.lock() {
            if remaining.is_some() {
                state.remaining = remaining;
            }
            if reset.is_some() {
                state.reset_epoch = reset;
            }
        }
    }

    /// Requests left in the current window, if GitHub has told us.
    pub fn remaining(&self) -> Option<u32> {
        self.state.lock().ok().and_then(|s| s.remaining)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Seconds to wait if a response was refused by the primary or secondary
    /// rate limit, `None` for any other response.
    ///
    /// 429 is always a rate limit. 403 is one only when it carries
    /// `retry-after` or the budget is spent; otherwise it means missing access.
    pub fn rate_limit_wait(&self, status: StatusCode, headers: &HeaderMap) -> Option<u64> {
        let retry_after = header_number::<u64>(headers, "retry-after");
        let limited = match status {
            StatusCode::TOO_MANY_REQUESTS => true,
            StatusCode::FORBIDDEN => retry_after.is_some() || self.is_exhausted(),
            _ => false,
        };

        limited.then(|| retry_after.unwrap_or_else(|| self.seconds_until_reset()))
    }

    pub fn seconds_until_reset(&self) -> u64 {
        let reset = match self.state.lock().ok().and_then(|s| s.reset_epoch) {
            Some(reset) => reset,
            None => return 0,
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        reset.saturating_sub(now)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
