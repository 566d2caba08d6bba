use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use skyroute_core::{
    CabinClass, CoreError, ItinerarySearchEngine, SearchCriteria, SearchOptions, SearchResult,
};
use std::time::Instant;
use tracing::Instrument;

use crate::dto::SearchResponse;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub max_outbound_flights: Option<usize>,
    pub max_return_flights: Option<usize>,
    pub max_combinations: Option<usize>,
}

impl ItinerarySearchQuery {
    /// Split into criteria and options, filling unset options from `defaults`.
    pub fn into_request(
        self,
        defaults: &SearchOptions,
    ) -> Result<(SearchCriteria, SearchOptions), CoreError> {
        let cabin_preference = self
            .cabin_class
            .as_deref()
            .map(str::parse::<CabinClass>)
            .transpose()?;

        let options = SearchOptions {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            sort_by: match self.sort_by.as_deref() {
                Some(s) => s.parse()?,
                None => defaults.sort_by,
            },
            sort_order: match self.sort_order.as_deref() {
                Some(s) => s.parse()?,
                None => defaults.sort_order,
            },
            max_outbound_flights: self.max_outbound_flights.unwrap_or(defaults.max_outbound_flights),
            max_return_flights: self.max_return_flights.unwrap_or(defaults.max_return_flights),
            max_combinations: self.max_combinations.unwrap_or(defaults.max_combinations),
        };

        let criteria = SearchCriteria {
            origin_code: self.origin,
            destination_code: self.destination,
            departure_date: self.departure_date,
            return_date: self.return_date,
            cabin_preference,
        };

        Ok((criteria, options))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/itineraries/search", get(search_itineraries))
}

/// GET /v1/itineraries/search
async fn search_itineraries(
    State(state): State<AppState>,
    query: Result<Query<ItinerarySearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(query) = query?;
    let (criteria, options) = query.into_request(&state.search_defaults)?;
    let result = run_search(&state.engine, &criteria, &options).await?;
    Ok(Json(SearchResponse::from(result)))
}

/// Call the engine inside a span, logging before and after.
pub async fn run_search(
    engine: &ItinerarySearchEngine,
    criteria: &SearchCriteria,
    options: &SearchOptions,
) -> Result<SearchResult, CoreError> {
    let span = tracing::info_span!(
        "itinerary_search",
        origin = %criteria.origin_code,
        destination = %criteria.destination_code,
        departure_date = %criteria.departure_date,
        round_trip = criteria.is_round_trip(),
    );

    async move {
        let started = Instant::now();
        tracing::debug!(?options, "Searching itineraries");

        match engine.search(criteria, options).await {
            Ok(result) => {
                tracing::info!(
                    candidates = result.total_candidates,
                    returned = result.returned,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Itinerary search completed"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Itinerary search failed"
                );
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}
