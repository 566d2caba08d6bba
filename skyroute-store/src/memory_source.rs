use async_trait::async_trait;
use skyroute_core::{FlightOffer, FlightOfferSource, OfferQuery, SourceError};
use std::path::Path;
use std::time::Duration;

/// Fixture loading errors
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read offer fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed offer fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Offer source backed by a list held in memory, in fixture order.
pub struct InMemoryOfferSource {
    offers: Vec<FlightOffer>,
    latency: Duration,
}

impl InMemoryOfferSource {
    pub fn new(offers: Vec<FlightOffer>) -> Self {
        Self {
            offers,
            latency: Duration::ZERO,
        }
    }

    /// Load offers from a JSON array. Each record goes through the same
    /// validation as any other offer.
    pub async fn from_fixture(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| FixtureError::Io {
            path: path_str.clone(),
            source,
        })?;
        let offers: Vec<FlightOffer> = serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: path_str.clone(),
            source,
        })?;
        tracing::info!(path = %path_str, count = offers.len(), "Loaded flight offers");
        Ok(Self::new(offers))
    }

    /// Delay every lookup, to mimic a remote supplier.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    fn matches(offer: &FlightOffer, query: &OfferQuery) -> bool {
        offer.origin().code() == query.origin_code
            && offer.destination().code() == query.destination_code
            && offer.departure_utc().date_naive() == query.date
            && query.cabin_preference.map_or(true, |cabin| offer.cabin_class() == cabin)
    }
}

#[async_trait]
impl FlightOfferSource for InMemoryOfferSource {
    async fn search(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let limit = query.limit_hint.unwrap_or(usize::MAX);
        let offers: Vec<FlightOffer> = self
            .offers
            .iter()
            .filter(|offer| Self::matches(offer, query))
            .take(limit)
            .cloned()
            .collect();

        tracing::debug!(
            origin = %query.origin_code,
            destination = %query.destination_code,
            date = %query.date,
            found = offers.len(),
            "In-memory offer lookup"
        );
        Ok(offers)
    }
}
