use futures_util::future::try_join;
use std::sync::Arc;

use crate::options::{paginate, sort_itineraries};
use crate::{
    CoreError, CoreResult, FlightOffer, FlightOfferSource, Itinerary, ItineraryLeg, LegDirection,
    OfferQuery, SearchCriteria, SearchOptions, SortBy, SortOrder,
};

/// One page of itineraries plus the shape it was produced under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub items: Vec<Itinerary>,
    pub page: usize,
    pub page_size: usize,
    pub returned: usize,
    /// Candidates built before pagination was applied.
    pub total_candidates: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub round_trip_requested: bool,
}

/// Turns offer sets into sorted, paginated itineraries.
///
/// Stateless between calls: a single instance can serve concurrent searches.
pub struct ItinerarySearchEngine {
    source: Arc<dyn FlightOfferSource>,
}

impl ItinerarySearchEngine {
    pub fn new(source: Arc<dyn FlightOfferSource>) -> Self {
        Self { source }
    }

    /// Run a search.
    ///
    /// Options and criteria are checked before the source is queried. For a
    /// round trip the outbound and return lookups run concurrently and both
    /// must succeed. Dropping the returned future abandons in-flight lookups.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        options: &SearchOptions,
    ) -> CoreResult<SearchResult> {
        options.validate()?;
        let criteria = criteria.validated()?;

        let outbound_query = OfferQuery {
            origin_code: criteria.origin_code.clone(),
            destination_code: criteria.destination_code.clone(),
            date: criteria.departure_date,
            cabin_preference: criteria.cabin_preference,
            limit_hint: Some(options.max_outbound_flights),
        };

        let (outbound, inbound) = match criteria.return_date {
            Some(return_date) => {
                let return_query = OfferQuery {
                    origin_code: criteria.destination_code.clone(),
                    destination_code: criteria.origin_code.clone(),
                    date: return_date,
                    cabin_preference: criteria.cabin_preference,
                    limit_hint: Some(options.max_return_flights),
                };
                let (outbound, inbound) = try_join(
                    self.fetch(&outbound_query, options.max_outbound_flights),
                    self.fetch(&return_query, options.max_return_flights),
                )
                .await?;
                (outbound, Some(inbound))
            }
            None => (self.fetch(&outbound_query, options.max_outbound_flights).await?, None),
        };

        let mut candidates = match inbound {
            Some(inbound) => pair_round_trips(&outbound, &inbound, options.max_combinations),
            None => build_one_way(&outbound)?,
        };
        let total_candidates = candidates.len();

        sort_itineraries(&mut candidates, options.sort_by, options.sort_order);
        let items = paginate(candidates, options);

        Ok(SearchResult {
            returned: items.len(),
            items,
            page: options.page,
            page_size: options.page_size,
            total_candidates,
            sort_by: options.sort_by,
            sort_order: options.sort_order,
            round_trip_requested: criteria.is_round_trip(),
        })
    }

    // Keeps the first `cap` offers in source order.
    async fn fetch(&self, query: &OfferQuery, cap: usize) -> CoreResult<Vec<FlightOffer>> {
        let mut offers = self
            .source
            .search(query)
            .await
            .map_err(CoreError::OfferSourceFailure)?;
        offers.truncate(cap);
        Ok(offers)
    }
}

/// One single-leg itinerary per offer. A failure here means corrupt offer data
/// and is returned rather than skipped.
pub fn build_one_way(outbound: &[FlightOffer]) -> CoreResult<Vec<Itinerary>> {
    outbound
        .iter()
        .map(|offer| Itinerary::create(vec![ItineraryLeg::from_offer(offer, 0, LegDirection::Outbound)]))
        .collect()
}

/// Pair outbound and return offers, outbound-major, in source order.
///
/// Pairs that fail itinerary validation are skipped. Generation stops once
/// `max_combinations` itineraries exist.
pub fn pair_round_trips(
    outbound: &[FlightOffer],
    inbound: &[FlightOffer],
    max_combinations: usize,
) -> Vec<Itinerary> {
    let mut itineraries = Vec::new();
    if max_combinations == 0 {
        return itineraries;
    }

    for out in outbound {
        for ret in inbound {
            let legs = vec![
                ItineraryLeg::from_offer(out, 0, LegDirection::Outbound),
                ItineraryLeg::from_offer(ret, 1, LegDirection::Return),
            ];
            if let Ok(itinerary) = Itinerary::create(legs) {
                itineraries.push(itinerary);
                if itineraries.len() >= max_combinations {
                    return itineraries;
                }
            }
        }
    }

    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Airport, CabinClass, FlightOfferRecord, Money};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn offer(from: &str, to: &str, dep_h: i64, price: i64, currency: &str) -> FlightOffer {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        FlightOffer::try_from(FlightOfferRecord {
            id: Uuid::new_v4(),
            flight_number: format!("ZZ{}", dep_h),
            airline_code: "ZZ".to_string(),
            airline_name: "Zed".to_string(),
            origin: Airport::new(from, from, from, "ZZ").unwrap(),
            destination: Airport::new(to, to, to, "ZZ").unwrap(),
            departure_utc: base + Duration::hours(dep_h),
            arrival_utc: base + Duration::hours(dep_h + 2),
            price: Money::new(Decimal::new(price, 0), currency).unwrap(),
            cabin_class: CabinClass::Economy,
        })
        .unwrap()
    }

    #[test]
    fn test_pairing_skips_invalid_pairs() {
        let outbound = vec![offer("AAA", "BBB", 8, 100, "USD")];
        let inbound = vec![
            offer("BBB", "AAA", 9, 90, "USD"),
            offer("BBB", "AAA", 30, 120, "USD"),
            offer("BBB", "AAA", 31, 80, "EUR"),
        ];
        let pairs = pair_round_trips(&outbound, &inbound, 10);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].total_price().amount(), Decimal::new(220, 0));
        assert!(pairs[0].is_round_trip());
    }

    #[test]
    fn test_pairing_respects_cap_in_source_order() {
        let outbound: Vec<_> = (0..3).map(|i| offer("AAA", "BBB", i, 100 + i, "USD")).collect();
        let inbound: Vec<_> = (0..3).map(|i| offer("BBB", "AAA", 48 + i, 100 + i, "USD")).collect();

        let capped = pair_round_trips(&outbound, &inbound, 4);
        assert_eq!(capped.len(), 4);
        let ids: Vec<_> = capped
            .iter()
            .map(|it| (it.legs()[0].source_flight_id(), it.legs()[1].source_flight_id()))
            .collect();
        assert_eq!(ids[0], (outbound[0].id(), inbound[0].id()));
        assert_eq!(ids[2], (outbound[0].id(), inbound[2].id()));
        assert_eq!(ids[3], (outbound[1].id(), inbound[0].id()));

        assert_eq!(pair_round_trips(&outbound, &inbound, 2000).len(), 9);
    }

    #[test]
    fn test_one_way_builds_one_itinerary_per_offer() {
        let outbound = vec![offer("AAA", "BBB", 8, 100, "USD"), offer("AAA", "BBB", 12, 150, "EUR")];
        let built = build_one_way(&outbound).unwrap();
        assert_eq!(built.len(), 2);
        assert!(built.iter().all(|it| it.leg_count() == 1 && !it.is_round_trip()));
        assert_eq!(built[1].total_price().currency(), "EUR");
    }
}
