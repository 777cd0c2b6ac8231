use std::num::NonZeroU32;

use governor::{Quota, RateLimiter as GovernorLimiter};
use governor::state::{InMemoryState, NotKeyed};
use governor::clock::DefaultClock;

/// Token-bucket rate limiter in front of the external embedder (§4.1 Rate
/// limiting). Exposes a non-blocking capacity check so callers can choose
/// to skip rather than wait.
pub struct RateLimiter {
    inner: GovernorLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RateLimiter {
    pub fn new(per_second: u32) -> Self {
        let per_second = NonZeroU32::new(per_second.max(1)).expect("per_second >= 1");
        Self {
            inner: GovernorLimiter::direct(Quota::per_second(per_second)),
        }
    }

    /// Non-blocking capacity check: `true` if a request may proceed now.
    pub fn try_acquire(&self) -> bool {
        self.inner.check().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_then_recovers_is_bounded() {
        let limiter = RateLimiter::new(1);
        // First call should succeed (token bucket starts full enough for burst 1).
        assert!(limiter.try_acquire());
    }
}
