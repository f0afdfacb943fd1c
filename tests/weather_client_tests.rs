//! WeatherClient and city suggestion behaviour against a mocked provider.

use serde_json::json;
use weather_desk::{
    WeatherApiConfig, WeatherClient, city_resolver, models::Units, services::WeatherClientMetrics,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::new(WeatherApiConfig::with_base("test-key", &server.uri()), None)
        .expect("client should build")
}

fn offline_client() -> WeatherClient {
    WeatherClient::new(WeatherApiConfig::with_base("test-key", "http://127.0.0.1:9"), None)
        .expect("client should build")
}

#[tokio::test]
async fn test_fetch_current_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Tokyo"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Tokyo",
            "weather": [{"main": "Rain", "description": "light rain", "icon": "10n"}],
            "main": {"temp": 18.2, "feels_like": 17.9, "temp_min": 17.0, "temp_max": 19.0, "humidity": 88},
            "wind": {"speed": 5.1},
            "sys": {"country": "JP"}
        })))
        .mount(&server)
        .await;

    let current = client_for(&server)
        .fetch_current("Tokyo", Units::Metric)
        .await
        .expect("lookup should succeed");

    assert_eq!(current.location_label(), "Tokyo, JP");
    assert_eq!(current.status(), "Light rain");
    assert_eq!(current.icon(), "10n");
    assert_eq!(current.main.humidity, 88);
}

#[tokio::test]
async fn test_error_status_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .fetch_current("Atlantis", Units::Imperial)
        .await
        .unwrap_err();

    assert_eq!(failure.code, 404);
    assert_eq!(failure.message, "city not found");
    assert!(failure.is_not_found());
}

#[tokio::test]
async fn test_error_without_json_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .fetch_forecast("Paris", Units::Metric)
        .await
        .unwrap_err();

    assert_eq!(failure.code, 502);
    assert_eq!(failure.message, "Bad Gateway");
}

#[tokio::test]
async fn test_undecodable_body_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .fetch_current("Paris", Units::Metric)
        .await
        .unwrap_err();

    assert_eq!(failure.code, 500);
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_failure() {
    let failure = offline_client()
        .fetch_current("Paris", Units::Metric)
        .await
        .unwrap_err();

    assert_eq!(failure.code, 500);
    assert!(!failure.message.contains("test-key"), "credential must not leak");
}

#[tokio::test]
async fn test_reverse_geocode_empty_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let failure = client_for(&server).reverse_geocode(0.0, 0.0).await.unwrap_err();
    assert_eq!(failure.code, 404);
    assert_eq!(failure.message, "Location not found");
}

#[tokio::test]
async fn test_search_sends_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Springfield", "country": "US", "state": "Illinois", "lat": 39.8, "lon": -89.6},
            {"name": "Springfield", "country": "US", "state": "Missouri", "lat": 37.2, "lon": -93.3}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let places = client_for(&server).search("Springfield").await.unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[1].state.as_deref(), Some("Missouri"));
}

#[tokio::test]
async fn test_provider_metrics_are_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let registry = prometheus::Registry::new();
    let metrics = WeatherClientMetrics::new(&registry).unwrap();
    let client = WeatherClient::new(
        WeatherApiConfig::with_base("test-key", &server.uri()),
        Some(metrics.clone()),
    )
    .unwrap();

    client.search("Nowhere").await.unwrap();

    let count = metrics
        .requests_total
        .with_label_values(&["search", "success"])
        .get();
    assert_eq!(count, 1.0);
}

#[tokio::test]
async fn test_suggest_typo_makes_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let suggestions = city_resolver::suggest("Lodon", &client_for(&server)).await;
    assert_eq!(suggestions, vec!["London"]);
}

#[tokio::test]
async fn test_suggest_unknown_city_offline_is_empty() {
    let suggestions = city_resolver::suggest("Zzzznotacity", &offline_client()).await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_suggest_falls_back_to_geocoding_and_dedups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfeld"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Springfield", "country": "US", "state": "Illinois", "lat": 39.8, "lon": -89.6},
            {"name": "Springfield", "country": "US", "state": "Missouri", "lat": 37.2, "lon": -93.3},
            {"name": "Springfield", "country": "AU", "lat": -33.9, "lon": 150.9},
            {"name": "Springfield", "lat": 0.0, "lon": 0.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = city_resolver::suggest("Springfeld", &client_for(&server)).await;
    assert_eq!(
        suggestions,
        vec!["Springfield, US", "Springfield, AU", "Springfield"]
    );
}

#[tokio::test]
async fn test_suggest_geocoding_error_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(city_resolver::suggest("Qwxzv", &client_for(&server)).await.is_empty());
}
