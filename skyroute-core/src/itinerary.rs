use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{CoreError, CoreResult, ItineraryLeg, LegDirection, Money};

/// A validated, ordered sequence of legs forming a purchasable trip.
///
/// Every invariant is checked in [`Itinerary::create`]; there is no way to
/// obtain an instance that violates them, and no way to mutate one afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Itinerary {
    id: Uuid,
    legs: Vec<ItineraryLeg>,
    origin: String,
    final_destination: String,
    is_round_trip: bool,
    total_price: Money,
    total_duration: Duration,
}

impl Itinerary {
    /// Build an itinerary from legs given in travel order.
    ///
    /// Fails with [`CoreError::InvalidItinerary`] when the legs are empty, when
    /// sequence numbers are not exactly `0..n`, when a leg departs before the
    /// previous one arrives, or when leg prices use more than one currency.
    pub fn create(legs: Vec<ItineraryLeg>) -> CoreResult<Self> {
        let (first, last) = match (legs.first(), legs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(CoreError::InvalidItinerary(
                    "an itinerary needs at least one leg".to_string(),
                ))
            }
        };

        for (expected, leg) in legs.iter().enumerate() {
            if leg.sequence() as usize != expected {
                return Err(CoreError::InvalidItinerary(format!(
                    "leg at position {} has sequence {}",
                    expected,
                    leg.sequence()
                )));
            }
        }

        for pair in legs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.departure_utc() < prev.arrival_utc() {
                return Err(CoreError::InvalidItinerary(format!(
                    "flight {} departs at {} before flight {} arrives at {}",
                    next.flight_number(),
                    next.departure_utc(),
                    prev.flight_number(),
                    prev.arrival_utc()
                )));
            }
        }

        let mut total_price = Money::zero(first.price().currency())?;
        let mut total_duration = Duration::zero();
        for leg in &legs {
            total_price = total_price.add(leg.price()).map_err(|e| match e {
                CoreError::CurrencyMismatch { left, right } => CoreError::InvalidItinerary(
                    format!("legs are priced in both {} and {}", left, right),
                ),
                other => other,
            })?;
            total_duration = total_duration + leg.duration();
        }

        let origin = first.origin_code().to_string();
        let final_destination = last.destination_code().to_string();
        let is_round_trip = legs.len() >= 2 && origin == final_destination;

        Ok(Self {
            id: itinerary_id(&legs),
            legs,
            origin,
            final_destination,
            is_round_trip,
            total_price,
            total_duration,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn legs(&self) -> &[ItineraryLeg] {
        &self.legs
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn final_destination(&self) -> &str {
        &self.final_destination
    }

    pub fn is_round_trip(&self) -> bool {
        self.is_round_trip
    }

    pub fn total_price(&self) -> &Money {
        &self.total_price
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Legs beyond the first; a proxy for connections.
    pub fn stops(&self) -> usize {
        self.legs.len() - 1
    }

    pub fn first_leg(&self) -> &ItineraryLeg {
        &self.legs[0]
    }

    pub fn last_leg(&self) -> &ItineraryLeg {
        &self.legs[self.legs.len() - 1]
    }

    pub fn outbound_departure(&self) -> DateTime<Utc> {
        self.first_leg().departure_utc()
    }

    pub fn return_departure(&self) -> Option<DateTime<Utc>> {
        self.legs
            .iter()
            .find(|leg| leg.direction() == LegDirection::Return)
            .map(|leg| leg.departure_utc())
    }
}

// Same legs, same id: repeated searches yield identical output.
fn itinerary_id(legs: &[ItineraryLeg]) -> Uuid {
    let mut name = Vec::with_capacity(legs.len() * 17);
    for leg in legs {
        name.extend_from_slice(leg.source_flight_id().as_bytes());
        name.push(match leg.direction() {
            LegDirection::Outbound => b'O',
            LegDirection::Return => b'R',
            LegDirection::Intermediate => b'I',
        });
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, &name)
}
