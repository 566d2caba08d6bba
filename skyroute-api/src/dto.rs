use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use skyroute_core::{
    Airport, CabinClass, FlightOffer, Itinerary, ItineraryLeg, LegDirection, SearchResult, SortBy,
    SortOrder,
};
use uuid::Uuid;

// ============================================================================
// Itinerary search
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<ItineraryResponse>,
    pub page: usize,
    pub page_size: usize,
    pub returned: usize,
    pub total_candidates: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub round_trip_requested: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub id: Uuid,
    pub origin: String,
    pub final_destination: String,
    pub is_round_trip: bool,
    pub outbound_departure_utc: DateTime<Utc>,
    pub return_departure_utc: Option<DateTime<Utc>>,
    pub total_price: Decimal,
    pub currency: String,
    pub total_duration_minutes: i64,
    pub leg_count: usize,
    pub legs: Vec<LegResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResponse {
    pub sequence: u32,
    pub flight_number: String,
    pub airline_code: String,
    pub origin: String,
    pub destination: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub duration_minutes: i64,
    pub cabin_class: CabinClass,
    pub price: Decimal,
    pub currency: String,
    pub direction: LegDirection,
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            items: result.items.iter().map(ItineraryResponse::from).collect(),
            page: result.page,
            page_size: result.page_size,
            returned: result.returned,
            total_candidates: result.total_candidates,
            sort_by: result.sort_by,
            sort_order: result.sort_order,
            round_trip_requested: result.round_trip_requested,
        }
    }
}

impl From<&Itinerary> for ItineraryResponse {
    fn from(it: &Itinerary) -> Self {
        Self {
            id: it.id(),
            origin: it.origin().to_string(),
            final_destination: it.final_destination().to_string(),
            is_round_trip: it.is_round_trip(),
            outbound_departure_utc: it.outbound_departure(),
            return_departure_utc: it.return_departure(),
            total_price: it.total_price().amount(),
            currency: it.total_price().currency().to_string(),
            total_duration_minutes: it.total_duration().num_minutes(),
            leg_count: it.leg_count(),
            legs: it.legs().iter().map(LegResponse::from).collect(),
        }
    }
}

impl From<&ItineraryLeg> for LegResponse {
    fn from(leg: &ItineraryLeg) -> Self {
        Self {
            sequence: leg.sequence(),
            flight_number: leg.flight_number().to_string(),
            airline_code: leg.airline_code().to_string(),
            origin: leg.origin_code().to_string(),
            destination: leg.destination_code().to_string(),
            departure_utc: leg.departure_utc(),
            arrival_utc: leg.arrival_utc(),
            duration_minutes: leg.duration().num_minutes(),
            cabin_class: leg.cabin_class(),
            price: leg.price().amount(),
            currency: leg.price().currency().to_string(),
            direction: leg.direction(),
        }
    }
}

// ============================================================================
// Flight offers
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOfferResponse {
    pub id: Uuid,
    pub flight_number: String,
    pub airline_code: String,
    pub airline_name: String,
    pub origin: Airport,
    pub destination: Airport,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub duration_minutes: i64,
    pub price: Decimal,
    pub currency: String,
    pub cabin_class: CabinClass,
}

impl From<&FlightOffer> for FlightOfferResponse {
    fn from(offer: &FlightOffer) -> Self {
        Self {
            id: offer.id(),
            flight_number: offer.flight_number().to_string(),
            airline_code: offer.airline_code().to_string(),
            airline_name: offer.airline_name().to_string(),
            origin: offer.origin().clone(),
            destination: offer.destination().clone(),
            departure_utc: offer.departure_utc(),
            arrival_utc: offer.arrival_utc(),
            duration_minutes: offer.duration().num_minutes(),
            price: offer.price().amount(),
            currency: offer.price().currency().to_string(),
            cabin_class: offer.cabin_class(),
        }
    }
}
