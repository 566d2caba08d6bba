use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Airport, CoreError, CoreResult, Money};

/// Cabin service tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premiumeconomy" => Ok(CabinClass::PremiumEconomy),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            _ => Err(CoreError::ValidationError(format!("unknown cabin class '{}'", s))),
        }
    }
}

/// Lower-cases and strips separators so `premium_economy`, `PremiumEconomy`
/// and `premium economy` compare equal.
pub(crate) fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A priced, scheduled flight supplied by an offer source. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FlightOfferRecord")]
pub struct FlightOffer {
    id: Uuid,
    flight_number: String,
    airline_code: String,
    airline_name: String,
    origin: Airport,
    destination: Airport,
    departure_utc: DateTime<Utc>,
    arrival_utc: DateTime<Utc>,
    price: Money,
    cabin_class: CabinClass,
}

/// Unvalidated offer fields, as read from a fixture or an upstream feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightOfferRecord {
    pub id: Uuid,
    pub flight_number: String,
    pub airline_code: String,
    pub airline_name: String,
    pub origin: Airport,
    pub destination: Airport,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub price: Money,
    pub cabin_class: CabinClass,
}

impl TryFrom<FlightOfferRecord> for FlightOffer {
    type Error = CoreError;

    fn try_from(r: FlightOfferRecord) -> CoreResult<Self> {
        if r.arrival_utc <= r.departure_utc {
            return Err(CoreError::ValidationError(format!(
                "flight {} arrives at {} before departing at {}",
                r.flight_number, r.arrival_utc, r.departure_utc
            )));
        }
        if r.origin.code() == r.destination.code() {
            return Err(CoreError::ValidationError(format!(
                "flight {} has identical origin and destination {}",
                r.flight_number,
                r.origin.code()
            )));
        }
        if r.flight_number.trim().is_empty() || r.airline_code.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "flight number and airline code are required".to_string(),
            ));
        }

        Ok(Self {
            id: r.id,
            flight_number: r.flight_number.trim().to_string(),
            airline_code: r.airline_code.trim().to_ascii_uppercase(),
            airline_name: r.airline_name,
            origin: r.origin,
            destination: r.destination,
            departure_utc: r.departure_utc,
            arrival_utc: r.arrival_utc,
            price: r.price,
            cabin_class: r.cabin_class,
        })
    }
}

impl FlightOffer {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn airline_code(&self) -> &str {
        &self.airline_code
    }

    pub fn airline_name(&self) -> &str {
        &self.airline_name
    }

    pub fn origin(&self) -> &Airport {
        &self.origin
    }

    pub fn destination(&self) -> &Airport {
        &self.destination
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

    pub fn duration(&self) -> chrono::Duration {
        self.arrival_utc - self.departure_utc
    }
}
