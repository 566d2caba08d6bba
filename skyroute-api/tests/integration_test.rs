use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use skyroute_api::dto::{FlightOfferResponse, SearchResponse};
use skyroute_api::{app, AppState};
use skyroute_core::{
    Airport, CabinClass, FlightOffer, FlightOfferRecord, FlightOfferSource, LegDirection, Money,
    OfferQuery, SearchOptions, SortBy, SourceError,
};
use skyroute_store::InMemoryOfferSource;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0).unwrap()
}

fn offer(flight: &str, from: &str, to: &str, dep: DateTime<Utc>, hours: i64, price: i64, cabin: CabinClass) -> FlightOffer {
    FlightOffer::try_from(FlightOfferRecord {
        id: Uuid::new_v4(),
        flight_number: flight.to_string(),
        airline_code: flight[..2].to_string(),
        airline_name: "Test Airline".to_string(),
        origin: Airport::new(from, format!("{} Airport", from), from, "ZZ").unwrap(),
        destination: Airport::new(to, format!("{} Airport", to), to, "ZZ").unwrap(),
        departure_utc: dep,
        arrival_utc: dep + Duration::hours(hours),
        price: Money::new(Decimal::new(price, 0), "USD").unwrap(),
        cabin_class: cabin,
    })
    .unwrap()
}

fn fixture() -> Vec<FlightOffer> {
    vec![
        offer("BA117", "LHR", "JFK", at(1, 8), 8, 450, CabinClass::Economy),
        offer("VS003", "LHR", "JFK", at(1, 11), 8, 390, CabinClass::Economy),
        offer("BA175", "LHR", "JFK", at(1, 14), 8, 1900, CabinClass::Business),
        offer("BA112", "JFK", "LHR", at(8, 18), 7, 420, CabinClass::Economy),
        offer("VS004", "JFK", "LHR", at(8, 21), 7, 380, CabinClass::Economy),
    ]
}

fn test_app(source: Arc<dyn FlightOfferSource>) -> axum::Router {
    app(AppState::new(source, SearchOptions::default()))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(test_app(Arc::new(InMemoryOfferSource::new(vec![]))), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_one_way_search_sorted_by_price() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, body) = get(app, "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=2025-07-01").await;
    assert_eq!(status, StatusCode::OK);

    let result: SearchResponse = serde_json::from_slice(&body).unwrap();
    assert!(!result.round_trip_requested);
    assert_eq!(result.returned, 3);
    assert_eq!(result.sort_by, SortBy::Price);
    let flights: Vec<_> = result.items.iter().map(|it| it.legs[0].flight_number.as_str()).collect();
    assert_eq!(flights, vec!["VS003", "BA117", "BA175"]);

    let cheapest = &result.items[0];
    assert_eq!(cheapest.leg_count, 1);
    assert!(!cheapest.is_round_trip);
    assert_eq!(cheapest.total_duration_minutes, 480);
    assert_eq!(cheapest.return_departure_utc, None);
    assert_eq!(cheapest.legs[0].direction, LegDirection::Outbound);
}

#[tokio::test]
async fn test_round_trip_search_json_shape() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, body) = get(
        app,
        "/v1/itineraries/search?origin=lhr&destination=jfk&departureDate=2025-07-01&returnDate=2025-07-08&cabinClass=economy&pageSize=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["roundTripRequested"], true);
    assert_eq!(json["totalCandidates"], 4);
    assert_eq!(json["returned"], 1);
    assert_eq!(json["sortBy"], "price");
    assert_eq!(json["sortOrder"], "ascending");

    let cheapest = &json["items"][0];
    assert_eq!(cheapest["origin"], "LHR");
    assert_eq!(cheapest["finalDestination"], "LHR");
    assert_eq!(cheapest["isRoundTrip"], true);
    assert_eq!(cheapest["totalPrice"], "770");
    assert_eq!(cheapest["currency"], "USD");
    assert_eq!(cheapest["totalDurationMinutes"], 900);
    assert_eq!(cheapest["legCount"], 2);
    assert_eq!(cheapest["legs"][0]["flightNumber"], "VS003");
    assert_eq!(cheapest["legs"][0]["direction"], "OUTBOUND");
    assert_eq!(cheapest["legs"][1]["flightNumber"], "VS004");
    assert_eq!(cheapest["legs"][1]["sequence"], 1);
    assert_eq!(cheapest["legs"][1]["direction"], "RETURN");
    assert_eq!(cheapest["legs"][1]["cabinClass"], "ECONOMY");
    assert_eq!(cheapest["returnDepartureUtc"], "2025-07-08T21:00:00Z");
}

#[tokio::test]
async fn test_repeated_search_is_byte_identical() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let uri = "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=2025-07-01&returnDate=2025-07-08&sortBy=duration";
    let (_, first) = get(app.clone(), uri).await;
    let (_, second) = get(app, uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_out_of_range_options_rejected() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, body) = get(
        app,
        "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=2025-07-01&pageSize=1000",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("page_size"));
}

#[tokio::test]
async fn test_unknown_sort_key_rejected() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, _) = get(
        app,
        "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=2025-07-01&sortBy=comfort",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

struct DownSource;

#[async_trait]
impl FlightOfferSource for DownSource {
    async fn search(&self, _query: &OfferQuery) -> Result<Vec<FlightOffer>, SourceError> {
        Err("supplier gateway timed out".into())
    }
}

#[tokio::test]
async fn test_source_failure_is_service_unavailable() {
    let (status, body) = get(
        test_app(Arc::new(DownSource)),
        "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=2025-07-01",
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Flight offer source unavailable");
}

#[tokio::test]
async fn test_list_flights_filters_cabin() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, body) = get(app, "/v1/flights?origin=LHR&destination=JFK&date=2025-07-01&cabinClass=BUSINESS").await;
    assert_eq!(status, StatusCode::OK);

    let offers: Vec<FlightOfferResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].flight_number, "BA175");
    assert_eq!(offers[0].origin.code(), "LHR");
    assert_eq!(offers[0].duration_minutes, 480);
}

#[tokio::test]
async fn test_list_flights_rejects_bad_airport() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, _) = get(app, "/v1/flights?origin=LONDON&destination=JFK&date=2025-07-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_query_returns_json_error() {
    let app = test_app(Arc::new(InMemoryOfferSource::new(fixture())));
    let (status, body) = get(
        app.clone(),
        "/v1/itineraries/search?origin=LHR&destination=JFK&departureDate=yesterday",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());

    let (status, body) = get(app, "/v1/flights?origin=LHR&destination=JFK").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}
