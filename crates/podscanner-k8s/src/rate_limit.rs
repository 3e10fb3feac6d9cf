use parking_lot::Mutex;
use tokio::time::{Duration, Instant};

use crate::ClusterError;

/// Token bucket shared by every request the client issues
///
/// Holds at most `burst` tokens and refills at `qps` tokens per second.
/// Each request takes one token; when the bucket is empty the caller sleeps
/// until its reserved token has been refilled.
#[derive(Debug)]
pub struct RateLimiter {
    burst: f64,
    qps: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    /// May go negative: each waiter reserves its token up front
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a limiter with a full bucket
    pub fn new(burst: u32, qps: f32) -> Result<Self, ClusterError> {
        if burst == 0 || !qps.is_finite() || qps <= 0.0 {
            return Err(ClusterError::RateLimit { burst, qps });
        }

        Ok(Self {
            burst: f64::from(burst),
            qps: f64::from(qps),
            bucket: Mutex::new(Bucket {
                tokens: f64::from(burst),
                last_refill: Instant::now(),
            }),
        })
    }

    /// Wait until a request may be issued
    pub async fn acquire(&self) {
        let wait = {
            let mut bucket = self.bucket.lock();
            let now = Instant::now();
            let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
            bucket.tokens = (bucket.tokens + elapsed * self.qps).min(self.burst);
            bucket.last_refill = now;
            bucket.tokens -= 1.0;

            if bucket.tokens >= 0.0 {
                None
            } else {
                Some(Duration::from_secs_f64(-bucket.tokens / self.qps))
            }
        };

        if let Some(wait) = wait {
            tracing::trace!(?wait, "rate limited");
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_settings() {
        assert!(RateLimiter::new(0, 25.0).is_err());
        assert!(RateLimiter::new(50, 0.0).is_err());
        assert!(RateLimiter::new(50, f32::NAN).is_err());
        assert!(RateLimiter::new(50, 25.0).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_immediate() {
        let limiter = RateLimiter::new(3, 1.0).unwrap();
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_refill_after_burst() {
        let limiter = RateLimiter::new(2, 2.0).unwrap();
        let start = Instant::now();

        // two from the burst, then two more at 2/s
        for _ in 0..4 {
            limiter.acquire().await;
        }

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1100), "elapsed {elapsed:?}");
    }
}
