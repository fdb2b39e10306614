use laborstat_api::series::{unemployment_rate, SeriesId};
use laborstat_api::{Client, FetchError, YearRange};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/publicAPI/v2/timeseries/data/";

fn ids(raw: &[&str]) -> Vec<SeriesId> {
    raw.iter()
        .map(|s| laborstat_api::decode(s).unwrap().encode())
        .collect()
}

#[tokio::test]
async fn provider_envelope_fetch_succeeds() {
    let server = MockServer::start().await;
    let fixture: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/cps_trio.json")).unwrap();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "seriesid": ["LNS14000000", "LNS12000000", "LNS11300000"],
            "startyear": "2024",
            "endyear": "2025"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let outcome = client
        .fetch_series(
            &ids(&["LNS14000000", "LNS12000000", "LNS11300000"]),
            YearRange::new(2024, 2025),
        )
        .await
        .unwrap();

    assert_eq!(outcome.series.len(), 3);
    assert!(outcome.warnings.is_empty());
    let rate = outcome
        .series
        .iter()
        .find(|s| s.series_id == "LNS14000000")
        .unwrap();
    assert_eq!(rate.latest().unwrap().value, 4.1);
    assert_eq!(rate.latest().unwrap().period, "M06");
}

#[tokio::test]
async fn proxy_envelope_shape_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_SUCCEEDED",
            "messages": [],
            "results": {
                "series": [{
                    "seriesId": "LNS14000000",
                    "data": [{"year": "2025", "period": "M06", "value": "4.1"}]
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let outcome = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap();

    assert_eq!(outcome.series.len(), 1);
    assert_eq!(outcome.series[0].latest().unwrap().value, 4.1);
}

#[tokio::test]
async fn http_429_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let err = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::RateLimited);
}

#[tokio::test]
async fn http_500_maps_to_api_error_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let err = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap_err();

    match err {
        FetchError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("maintenance"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn envelope_rejection_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_NOT_PROCESSED",
            "message": ["daily threshold has been reached"],
            "Results": null
        })))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let err = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap_err();

    match err {
        FetchError::Api { message, .. } => {
            assert!(message.contains("daily threshold"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn partially_empty_batch_yields_warnings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_SUCCEEDED",
            "message": [],
            "Results": {
                "series": [
                    {
                        "seriesID": "LNS14000000",
                        "data": [{"year": "2025", "period": "M06", "value": "4.1"}]
                    },
                    {"seriesID": "LNS11300000", "data": []}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let outcome = client
        .fetch_series(
            &ids(&["LNS14000000", "LNS11300000"]),
            YearRange::new(2024, 2025),
        )
        .await
        .unwrap();

    assert_eq!(outcome.series.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].to_string().contains("LNS11300000"));
}

#[tokio::test]
async fn all_empty_series_is_no_data_available() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_SUCCEEDED",
            "message": [],
            "Results": {
                "series": [
                    {"seriesID": "LNS14000000", "data": []},
                    {"seriesID": "LNS11300000", "data": []}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let err = client
        .fetch_series(
            &ids(&["LNS14000000", "LNS11300000"]),
            YearRange::new(2024, 2025),
        )
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::NoDataAvailable);
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri()).unwrap();
    let err = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn validation_fails_fast_without_network() {
    // No mock server mounted: a network call would error differently.
    let client = Client::with_base_url("http://127.0.0.1:9").unwrap();

    let err = client
        .fetch_series(&[], YearRange::new(2024, 2025))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidSeriesId(_)));

    let too_many: Vec<SeriesId> = std::iter::repeat(unemployment_rate()).take(51).collect();
    let err = client
        .fetch_series(&too_many, YearRange::new(2024, 2025))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidSeriesId(_)));

    let err = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2025, 2024))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::InvalidDateRange { start: 2025, end: 2024 });
}

#[tokio::test]
async fn registration_key_is_included_in_request_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "registrationkey": "abc123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_SUCCEEDED",
            "message": [],
            "Results": {
                "series": [{
                    "seriesID": "LNS14000000",
                    "data": [{"year": "2025", "period": "M06", "value": "4.1"}]
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri())
        .unwrap()
        .with_registration_key("abc123");
    let outcome = client
        .fetch_series(&[unemployment_rate()], YearRange::new(2024, 2025))
        .await
        .unwrap();
    assert_eq!(outcome.series.len(), 1);
}
