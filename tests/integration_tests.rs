use actix_web::{http::StatusCode, test};
use weather_desk::{
    AppState, AuthConfig, MetricsConfig, RateLimitConfig, SecurityHeadersConfig,
    WeatherApiConfig, create_app,
};

/// Provider base nothing listens on; these tests never reach it
const UNUSED_PROVIDER: &str = "http://127.0.0.1:9";

fn default_state() -> AppState {
    AppState::with_weather_config(WeatherApiConfig::with_base("test-key", UNUSED_PROVIDER))
        .expect("state should build")
}

fn state_with(rate_limit: RateLimitConfig, metrics: MetricsConfig) -> AppState {
    AppState::new(
        WeatherApiConfig::with_base("test-key", UNUSED_PROVIDER),
        rate_limit,
        AuthConfig::default(),
        metrics,
        SecurityHeadersConfig::default(),
    )
    .expect("state should build")
}

/// The health endpoint answers through the full middleware stack
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.contains("application/json"),
        "Expected JSON content type, got: {content_type}"
    );

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json, serde_json::json!({"status": "healthy"}));
}

#[actix_web::test]
async fn test_version_endpoint_integration() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string(), "Commit should be a string");
    assert!(json["build_time"].is_string(), "Build time should be a string");
}

/// Version is rate limited; health is not
#[actix_web::test]
async fn test_rate_limiting() {
    let state = state_with(
        RateLimitConfig {
            requests_per_minute: 2,
            period_seconds: 60,
        },
        MetricsConfig::default(),
    );
    let app = test::init_service(create_app(&state)).await;

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/api/version").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Third request inside the window should be limited"
    );
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Too Many Requests");

    for _ in 0..5 {
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "Health must never be limited");
    }
}

#[actix_web::test]
async fn test_rate_limit_is_per_client_ip() {
    let state = state_with(
        RateLimitConfig {
            requests_per_minute: 1,
            period_seconds: 60,
        },
        MetricsConfig::default(),
    );
    let app = test::init_service(create_app(&state)).await;

    let first = test::TestRequest::get()
        .uri("/api/version")
        .insert_header(("X-Forwarded-For", "198.51.100.1"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let other_ip = test::TestRequest::get()
        .uri("/api/version")
        .insert_header(("X-Forwarded-For", "198.51.100.2"))
        .to_request();
    assert_eq!(test::call_service(&app, other_ip).await.status(), StatusCode::OK);

    let repeat = test::TestRequest::get()
        .uri("/api/version")
        .insert_header(("X-Forwarded-For", "198.51.100.1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, repeat).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[actix_web::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("response should carry a request id");
    assert!(uuid::Uuid::parse_str(generated).is_ok(), "Generated id should be a UUID");

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "client-supplied-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").unwrap(),
        "client-supplied-42"
    );
}

#[actix_web::test]
async fn test_security_headers_on_success_and_error() {
    let app = test::init_service(create_app(&default_state())).await;

    for uri in ["/api/health", "/api/weather"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let headers = resp.headers();

        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff", "{uri}");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{uri}");
        assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer", "{uri}");
        assert!(headers.get("content-security-policy").is_some(), "{uri}");
        assert!(
            headers
                .get("strict-transport-security")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("max-age=31536000")),
            "{uri}"
        );
    }
}

#[actix_web::test]
async fn test_disabled_security_headers_are_not_sent() {
    let state = AppState::new(
        WeatherApiConfig::with_base("test-key", UNUSED_PROVIDER),
        RateLimitConfig::default(),
        AuthConfig::default(),
        MetricsConfig::default(),
        SecurityHeadersConfig {
            hsts_enabled: false,
            csp_enabled: false,
            frame_options: String::new(),
            referrer_policy: "same-origin".to_string(),
            ..SecurityHeadersConfig::default()
        },
    )
    .expect("state should build");
    let app = test::init_service(create_app(&state)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();

    assert!(headers.get("strict-transport-security").is_none());
    assert!(headers.get("content-security-policy").is_none());
    assert!(headers.get("x-frame-options").is_none());
    assert_eq!(headers.get("referrer-policy").unwrap(), "same-origin");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
}

#[actix_web::test]
async fn test_metrics_endpoint_reports_requests() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("route=\"/api/health\""));
    assert!(text.contains("app_uptime_seconds"));
}

#[actix_web::test]
async fn test_unmatched_paths_share_one_metric_label() {
    let app = test::init_service(create_app(&default_state())).await;

    for uri in ["/wp-admin", "/.env", "/api/nope"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let body = test::read_body(test::call_service(&app, req).await).await;
    let text = std::str::from_utf8(&body).unwrap();

    let unknown = text
        .lines()
        .find(|line| {
            line.starts_with("http_requests_total")
                && line.contains("route=\"/unknown\"")
                && line.contains("status=\"404\"")
        })
        .expect("unmatched requests should be counted");
    assert!(unknown.ends_with(" 3"), "{unknown}");
    assert!(!text.contains("wp-admin"));
}

#[actix_web::test]
async fn test_metrics_endpoint_disabled() {
    let state = state_with(RateLimitConfig::default(), MetricsConfig { enabled: false });
    let app = test::init_service(create_app(&state)).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_openapi_spec_lists_routes() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["info"]["title"], "Weather Desk API");
    for path in ["/api/weather", "/api/forecast", "/api/suggestions", "/auth/login"] {
        assert!(json["paths"].get(path).is_some(), "spec should document {path}");
    }
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let app = test::init_service(create_app(&default_state())).await;

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
