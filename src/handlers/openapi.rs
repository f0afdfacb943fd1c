//! OpenAPI specification generation and app factory.

use super::{
    error::{json_error_handler, query_error_handler},
    forecast, get_metrics, health, list_favorites, location_weather, login, logout,
    page_context, register, suggestions, toggle_favorite, version, weather,
};
use crate::{
    middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders},
    state::AppState,
};
use actix_web::App;
use actix_web::web::{JsonConfig, QueryConfig};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Swagger 2 document served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Desk API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Current conditions, 5-day forecasts and city suggestions backed by OpenWeatherMap, \
                with optional accounts and per-user favorite cities.\n\n\
                ## Units\n\
                Weather endpoints accept `units=imperial` (default, °F) or `units=metric` (°C).\n\
                \n\
                ## Authentication\n\
                `POST /auth/login` returns a token. Send it as `Authorization: Bearer <token>` to \
                the favorites endpoints, and optionally to the weather endpoints to receive current \
                conditions for your favorite cities in the `context` field.\n\
                \n\
                ## Errors\n\
                Failures answer `{\"error\", \"message\"}`. An unknown city answers 404 and adds a \
                `suggestions` array of alternative names."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the application around already-constructed shared state.
///
/// Used by `main` for every worker and by the integration tests, so both run
/// the same routes and middleware.
pub fn create_app(
    state: &AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .wrap(SecurityHeaders::new(state.security.clone()))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware::new(state.metrics.clone()))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(JsonConfig::default().error_handler(json_error_handler))
        .app_data(QueryConfig::default().error_handler(query_error_handler))
        .app_data(state.weather.clone())
        .app_data(state.accounts.clone())
        .app_data(state.limiter.clone())
        .app_data(state.login_tracker.clone())
        .app_data(state.metrics.clone())
        .app_data(state.metrics_config.clone())
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(web::resource("/api/context").route(web::get().to(page_context)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/location-weather").route(web::get().to(location_weather)))
        .service(web::resource("/api/forecast").route(web::get().to(forecast)))
        .service(web::resource("/api/suggestions").route(web::get().to(suggestions)))
        .service(web::resource("/api/favorites").route(web::get().to(list_favorites)))
        .service(web::resource("/api/favorites/toggle").route(web::post().to(toggle_favorite)))
        .service(web::resource("/auth/register").route(web::post().to(register)))
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(web::resource("/auth/logout").route(web::post().to(logout)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
