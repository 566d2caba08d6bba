pub mod money;
pub mod airport;
pub mod offer;
pub mod leg;
pub mod itinerary;
pub mod criteria;
pub mod options;
pub mod source;
pub mod engine;

pub use money::Money;
pub use airport::Airport;
pub use offer::{CabinClass, FlightOffer, FlightOfferRecord};
pub use leg::{ItineraryLeg, LegDirection};
pub use itinerary::Itinerary;
pub use criteria::SearchCriteria;
pub use options::{SearchOptions, SortBy, SortOrder};
pub use source::{FlightOfferSource, OfferQuery, SourceError};
pub use engine::{ItinerarySearchEngine, SearchResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid itinerary: {0}")]
    InvalidItinerary(String),
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
    #[error("Invalid search options: {0}")]
    InvalidSearchOptions(String),
    #[error("Invalid search criteria: {0}")]
    InvalidSearchCriteria(String),
    #[error("Offer source failure: {0}")]
    OfferSourceFailure(#[source] SourceError),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Three ASCII letters, as used by IATA airport codes and ISO 4217 currencies.
pub(crate) fn is_three_letter_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}
