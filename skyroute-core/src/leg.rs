use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CabinClass, FlightOffer, Money};

/// Role of a leg inside an itinerary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegDirection {
    Outbound,
    Return,
    Intermediate,
}

/// One flight offer placed at a position within an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItineraryLeg {
    sequence: u32,
    source_flight_id: Uuid,
    flight_number: String,
    airline_code: String,
    origin_code: String,
    destination_code: String,
    departure_utc: DateTime<Utc>,
    arrival_utc: DateTime<Utc>,
    price: Money,
    cabin_class: CabinClass,
    direction: LegDirection,
}

impl ItineraryLeg {
    pub fn from_offer(offer: &FlightOffer, sequence: u32, direction: LegDirection) -> Self {
        Self {
            sequence,
            source_flight_id: offer.id(),
            flight_number: offer.flight_number().to_string(),
            airline_code: offer.airline_code().to_string(),
            origin_code: offer.origin().code().to_string(),
            destination_code: offer.destination().code().to_string(),
            departure_utc: offer.departure_utc(),
            arrival_utc: offer.arrival_utc(),
            price: offer.price().clone(),
            cabin_class: offer.cabin_class(),
            direction,
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn source_flight_id(&self) -> Uuid {
        self.source_flight_id
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn airline_code(&self) -> &str {
        &self.airline_code
    }

    pub fn origin_code(&self) -> &str {
        &self.origin_code
    }

    pub fn destination_code(&self) -> &str {
        &self.destination_code
    }

    pub fn departure_utc(&self) -> DateTime<Utc> {
        self.departure_utc
    }

    pub fn arrival_utc(&self) -> DateTime<Utc> {
        self.arrival_utc
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }

    pub fn direction(&self) -> LegDirection {
        self.direction
    }

    pub fn duration(&self) -> chrono::Duration {
        self.arrival_utc - self.departure_utc
    }
}
