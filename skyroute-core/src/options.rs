use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::offer::normalize_token;
use crate::{CoreError, CoreResult, Itinerary};

pub const MAX_PAGE_SIZE: usize = 100;
pub const MAX_FLIGHTS_PER_DIRECTION: usize = 200;
pub const MAX_COMBINATIONS: usize = 2000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Price,
    Duration,
    Stops,
    DepartureTime,
    ArrivalTime,
    Airline,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::Duration => "duration",
            SortBy::Stops => "stops",
            SortBy::DepartureTime => "departure_time",
            SortBy::ArrivalTime => "arrival_time",
            SortBy::Airline => "airline",
        }
    }

    /// Ascending comparison of two itineraries under this key.
    pub fn compare(&self, a: &Itinerary, b: &Itinerary) -> Ordering {
        match self {
            SortBy::Price => a.total_price().amount().cmp(&b.total_price().amount()),
            SortBy::Duration => a.total_duration().cmp(&b.total_duration()),
            SortBy::Stops => a.stops().cmp(&b.stops()),
            SortBy::DepartureTime => a.first_leg().departure_utc().cmp(&b.first_leg().departure_utc()),
            SortBy::ArrivalTime => a.last_leg().arrival_utc().cmp(&b.last_leg().arrival_utc()),
            SortBy::Airline => a.first_leg().airline_code().cmp(b.first_leg().airline_code()),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "price" => Ok(SortBy::Price),
            "duration" => Ok(SortBy::Duration),
            "stops" => Ok(SortBy::Stops),
            "departuretime" => Ok(SortBy::DepartureTime),
            "arrivaltime" => Ok(SortBy::ArrivalTime),
            "airline" => Ok(SortBy::Airline),
            _ => Err(CoreError::InvalidSearchOptions(format!("unknown sort key '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(CoreError::InvalidSearchOptions(format!("unknown sort order '{}'", s))),
        }
    }
}

/// Result shape and combinatorial limits for a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub page: usize,
    pub page_size: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub max_outbound_flights: usize,
    pub max_return_flights: usize,
    pub max_combinations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            sort_by: SortBy::Price,
            sort_order: SortOrder::Ascending,
            max_outbound_flights: 50,
            max_return_flights: 50,
            max_combinations: 500,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> CoreResult<()> {
        if self.page < 1 {
            return Err(invalid("page must be at least 1".to_string()));
        }
        check_range("page_size", self.page_size, MAX_PAGE_SIZE)?;
        check_range("max_outbound_flights", self.max_outbound_flights, MAX_FLIGHTS_PER_DIRECTION)?;
        check_range("max_return_flights", self.max_return_flights, MAX_FLIGHTS_PER_DIRECTION)?;
        check_range("max_combinations", self.max_combinations, MAX_COMBINATIONS)?;
        Ok(())
    }

    /// Zero-based index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

fn check_range(name: &str, value: usize, max: usize) -> CoreResult<()> {
    if value < 1 || value > max {
        return Err(invalid(format!("{} must be between 1 and {}, got {}", name, max, value)));
    }
    Ok(())
}

fn invalid(msg: String) -> CoreError {
    CoreError::InvalidSearchOptions(msg)
}

/// Stable sort: ties keep construction order in both directions.
pub fn sort_itineraries(items: &mut [Itinerary], sort_by: SortBy, sort_order: SortOrder) {
    match sort_order {
        SortOrder::Ascending => items.sort_by(|a, b| sort_by.compare(a, b)),
        SortOrder::Descending => items.sort_by(|a, b| sort_by.compare(b, a)),
    }
}

pub fn paginate<T>(items: Vec<T>, options: &SearchOptions) -> Vec<T> {
    items
        .into_iter()
        .skip(options.offset())
        .take(options.page_size)
        .collect()
}
