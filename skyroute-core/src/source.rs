use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::{CabinClass, FlightOffer};

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// One directional lookup against an offer source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub origin_code: String,
    pub destination_code: String,
    pub date: NaiveDate,
    pub cabin_preference: Option<CabinClass>,
    /// Sources may stop early once they have this many offers.
    pub limit_hint: Option<usize>,
}

/// Supplies flight offers for a route and date.
///
/// Implementations own collection, pricing and storage of offers. Errors are
/// passed through by the engine untouched; any retry policy lives here.
#[async_trait]
pub trait FlightOfferSource: Send + Sync {
    async fn search(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, SourceError>;
}

#[async_trait]
impl<T: FlightOfferSource + ?Sized> FlightOfferSource for Arc<T> {
    async fn search(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, SourceError> {
        (**self).search(query).await
    }
}
