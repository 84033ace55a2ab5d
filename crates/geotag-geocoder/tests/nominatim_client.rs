//! Integration tests for `NominatimClient` using wiremock HTTP mocks.
//!
//! The rate limiter runs on real time here (wiremock needs real I/O), so
//! these tests use a short interval and assert lower bounds on elapsed time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use geotag_core::{Coordinate, CoordinateValue};
use geotag_geocoder::{Geocode, GeocodeError, NominatimClient, RateLimiter};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_INTERVAL: Duration = Duration::from_millis(150);

fn test_client(base_url: &str, limiter: Arc<RateLimiter>) -> NominatimClient {
    NominatimClient::with_base_url("geotag-test/0.1 (tests)", 5, base_url, limiter)
        .expect("client construction should not fail")
}

fn fresh_limiter() -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(TEST_INTERVAL))
}

fn eiffel_body() -> serde_json::Value {
    json!([{
        "place_id": 88066702,
        "lat": "48.8584",
        "lon": "2.2945",
        "display_name": "Tour Eiffel, Paris, France",
        "address": { "city": "Paris", "country": "France" }
    }])
}

#[tokio::test]
async fn lookup_returns_coordinate_for_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("q", "Eiffel Tower, Paris"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "geotag-test/0.1 (tests)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(eiffel_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let coord = client
        .lookup("Eiffel Tower, Paris")
        .await
        .expect("lookup should succeed")
        .expect("provider returned a match");

    assert_eq!(coord, Coordinate::new(48.8584, 2.2945));
}

#[tokio::test]
async fn lookup_empty_result_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let result = client.lookup("Atlantis").await;

    assert!(
        matches!(result, Ok(None)),
        "expected Ok(None), got: {result:?}"
    );
}

#[tokio::test]
async fn lookup_non_success_status_is_error_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let err = client.lookup("Paris").await.unwrap_err();

    assert!(
        matches!(err, GeocodeError::UnexpectedStatus { status: 403, ref query } if query == "Paris"),
        "expected UnexpectedStatus(403), got: {err:?}"
    );
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn lookup_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let err = client.lookup("Paris").await.unwrap_err();

    assert!(
        matches!(err, GeocodeError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn lookup_keeps_unparseable_coordinate_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "lat": "48.8584", "lon": "two point three" }])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let coord = client.lookup("Paris").await.unwrap().unwrap();

    assert_eq!(coord.latitude(), &CoordinateValue::Number(48.8584));
    assert_eq!(
        coord.longitude(),
        &CoordinateValue::RawText("two point three".to_owned())
    );
}

#[tokio::test]
async fn lookup_transport_failure_is_http_error() {
    // Nothing listens on port 9 (discard) on a test host.
    let client = test_client("http://127.0.0.1:9", fresh_limiter());
    let err = client.lookup("Paris").await.unwrap_err();

    assert!(
        matches!(err, GeocodeError::Http(_)),
        "expected Http, got: {err:?}"
    );
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn concurrent_lookups_are_spaced_by_the_limiter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(eiffel_body()))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let start = Instant::now();
    let (a, b, c) = tokio::join!(
        client.lookup("one"),
        client.lookup("two"),
        client.lookup("three"),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert!(
        start.elapsed() >= TEST_INTERVAL * 2,
        "three dispatches must span at least two intervals, took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn failed_lookup_does_not_block_queued_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(eiffel_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), fresh_limiter());
    let (first, second, third) = tokio::join!(
        client.lookup("broken"),
        client.lookup("Paris"),
        client.lookup("Paris"),
    );

    assert_eq!(first.unwrap_err().status(), Some(500));
    assert!(second.unwrap().is_some());
    assert!(third.unwrap().is_some());
}

#[tokio::test]
async fn clients_sharing_a_limiter_share_the_interval() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(eiffel_body()))
        .mount(&server)
        .await;

    let limiter = fresh_limiter();
    let batch = test_client(&server.uri(), Arc::clone(&limiter));
    let interactive = test_client(&server.uri(), Arc::clone(&limiter));

    let start = Instant::now();
    let (a, b) = tokio::join!(batch.lookup("Paris"), interactive.lookup("Lyon"));

    assert!(a.is_ok() && b.is_ok());
    assert!(
        start.elapsed() >= TEST_INTERVAL,
        "second dispatch must wait for the shared interval, took {:?}",
        start.elapsed()
    );
}
