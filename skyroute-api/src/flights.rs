use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use skyroute_core::{CabinClass, CoreError, OfferQuery, SearchCriteria};

use crate::dto::FlightOfferResponse;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFlightsQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub cabin_class: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flights", get(list_flights))
}

/// GET /v1/flights
/// Raw offers for one direction, in source order
async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<ListFlightsQuery>, QueryRejection>,
) -> Result<Json<Vec<FlightOfferResponse>>, AppError> {
    let Query(query) = query?;
    let cabin_preference = query
        .cabin_class
        .as_deref()
        .map(str::parse::<CabinClass>)
        .transpose()?;
    let route = SearchCriteria::one_way(&query.origin, &query.destination, query.date).validated()?;

    let offers = state
        .offers
        .search(&OfferQuery {
            origin_code: route.origin_code,
            destination_code: route.destination_code,
            date: query.date,
            cabin_preference,
            limit_hint: None,
        })
        .await
        .map_err(CoreError::OfferSourceFailure)?;

    Ok(Json(offers.iter().map(FlightOfferResponse::from).collect()))
}
