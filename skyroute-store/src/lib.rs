pub mod app_config;
pub mod memory_source;
pub mod retry_source;

pub use memory_source::{FixtureError, InMemoryOfferSource};
pub use retry_source::{RetryPolicy, RetryingOfferSource};

use app_config::OfferSourceConfig;
use skyroute_core::FlightOfferSource;
use std::sync::Arc;
use std::time::Duration;

/// Build the configured offer source: fixture-backed when a path is set,
/// empty otherwise, optionally wrapped in retries.
pub async fn build_offer_source(
    config: &OfferSourceConfig,
) -> Result<Arc<dyn FlightOfferSource>, FixtureError> {
    let source = match &config.fixture_path {
        Some(path) => InMemoryOfferSource::from_fixture(path).await?,
        None => {
            tracing::warn!("No offer fixture configured, searches will return no results");
            InMemoryOfferSource::new(Vec::new())
        }
    }
    .with_latency(Duration::from_millis(config.latency_ms));

    if config.max_retries == 0 {
        return Ok(Arc::new(source));
    }

    let policy = RetryPolicy {
        max_retries: config.max_retries,
        initial_delay: Duration::from_millis(config.retry_initial_delay_ms.max(1)),
        ..Default::default()
    };
    Ok(Arc::new(RetryingOfferSource::new(source, policy)))
}
