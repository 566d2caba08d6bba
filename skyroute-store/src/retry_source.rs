use async_trait::async_trait;
use rand::Rng;
use skyroute_core::{FlightOffer, FlightOfferSource, OfferQuery, SourceError};
use std::time::Duration;

/// Backoff schedule for [`RetryingOfferSource`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Fraction of the current delay added as random jitter (0.0 disables it)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            jitter_factor: 0.5,
        }
    }
}

impl RetryPolicy {
    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return delay;
        }
        let jitter_ms = (delay.as_millis() as f64 * self.jitter_factor) as u64;
        let extra = rand::thread_rng().gen_range(0..=jitter_ms);
        delay + Duration::from_millis(extra)
    }
}

/// Retries a flaky upstream source with exponential backoff.
///
/// The search engine never retries on its own; wrap the source in this when
/// transient failures are expected. The last error is returned once retries
/// run out.
pub struct RetryingOfferSource<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: FlightOfferSource> RetryingOfferSource<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<S: FlightOfferSource> FlightOfferSource for RetryingOfferSource<S> {
    async fn search(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, SourceError> {
        let mut attempt = 0;
        let mut delay = self.policy.initial_delay;

        loop {
            match self.inner.search(query).await {
                Ok(offers) => return Ok(offers),
                Err(e) if attempt >= self.policy.max_retries => {
                    tracing::error!(
                        origin = %query.origin_code,
                        destination = %query.destination_code,
                        attempts = attempt + 1,
                        "Offer lookup failed: {}",
                        e
                    );
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    tracing::warn!(
                        origin = %query.origin_code,
                        destination = %query.destination_code,
                        attempt,
                        "Offer lookup failed, retrying: {}",
                        e
                    );
                    tokio::time::sleep(self.policy.jittered(delay)).await;
                    delay = std::cmp::min(delay * 2, self.policy.max_delay);
                }
            }
        }
    }
}
