//! Live carbon-intensity resolver behavior against a mocked API.
//!
//! The contract under test: a good reading becomes a live electricity
//! factor (g -> kg), and every failure mode degrades silently to the
//! static default.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carbonscope::factors::DEFAULT_ELECTRICITY_FACTOR;
use carbonscope::intensity::{ElectricityFactor, IntensityClient};

const TIMEOUT: Duration = Duration::from_millis(500);

async fn mock_intensity_api(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intensity"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> IntensityClient {
    IntensityClient::new(format!("{}/intensity", server.uri()), TIMEOUT)
}

#[tokio::test]
async fn live_reading_converts_grams_to_kilograms() {
    let body = serde_json::json!({ "data": [{ "intensity": { "actual": 200.0 } }] });
    let server = mock_intensity_api(ResponseTemplate::new(200).set_body_json(body)).await;

    let factor = client_for(&server).resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Live(0.2));
    assert!(factor.is_live());
    assert_eq!(factor.value(), 0.2);
}

#[tokio::test]
async fn server_error_falls_back_to_default() {
    let server = mock_intensity_api(ResponseTemplate::new(500)).await;

    let factor = client_for(&server).resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR));
    assert!(!factor.is_live());
}

#[tokio::test]
async fn null_reading_falls_back_to_default() {
    let body = serde_json::json!({ "data": [{ "intensity": { "actual": null } }] });
    let server = mock_intensity_api(ResponseTemplate::new(200).set_body_json(body)).await;

    let factor = client_for(&server).resolve_electricity_factor().await;
    assert_eq!(factor.value(), DEFAULT_ELECTRICITY_FACTOR);
}

#[tokio::test]
async fn empty_data_falls_back_to_default() {
    let body = serde_json::json!({ "data": [] });
    let server = mock_intensity_api(ResponseTemplate::new(200).set_body_json(body)).await;

    let factor = client_for(&server).resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR));
}

#[tokio::test]
async fn malformed_body_falls_back_to_default() {
    let server =
        mock_intensity_api(ResponseTemplate::new(200).set_body_string("not json at all")).await;

    let factor = client_for(&server).resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR));
}

#[tokio::test]
async fn unreachable_endpoint_falls_back_to_default() {
    // Nothing listens on this port.
    let client = IntensityClient::new("http://127.0.0.1:9", TIMEOUT);

    let factor = client.resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR));
}

#[tokio::test]
async fn slow_response_times_out_and_falls_back() {
    let body = serde_json::json!({ "data": [{ "intensity": { "actual": 200.0 } }] });
    let server = mock_intensity_api(
        ResponseTemplate::new(200)
            .set_body_json(body)
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let client = IntensityClient::new(
        format!("{}/intensity", server.uri()),
        Duration::from_millis(50),
    );
    let factor = client.resolve_electricity_factor().await;
    assert_eq!(factor, ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR));
}
