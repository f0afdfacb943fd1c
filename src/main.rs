use actix_web::HttpServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_desk::{AppState, ServerConfig, create_app};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weather_desk=info,actix_web=info".into());

    // JSON for log shippers, human-readable text otherwise
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(e) = dotenv
        && !e.not_found()
    {
        tracing::warn!(error = %e, "Failed to read .env file");
    }

    let server_config = ServerConfig::from_env();
    let state = AppState::from_env().map_err(std::io::Error::other)?;

    tracing::info!(
        bind_address = %server_config.bind_address,
        version = env!("CARGO_PKG_VERSION"),
        "Starting weather desk"
    );

    HttpServer::new(move || create_app(&state))
        .bind(&server_config.bind_address)?
        .run()
        .await
}
