//! Metrics endpoint handler.

use crate::{config::MetricsConfig, services::AppMetrics};
use actix_web::{Error, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Prometheus scrape target
#[api_v2_operation(
    summary = "Prometheus Metrics Endpoint",
    description = "Returns Prometheus-formatted HTTP and weather provider metrics. Answers 503 when METRICS_ENABLED=false.",
    tags("Metrics")
)]
pub async fn get_metrics(
    config: web::Data<MetricsConfig>,
    metrics: web::Data<AppMetrics>,
) -> Result<HttpResponse, Error> {
    if !config.enabled {
        return Ok(HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("Metrics collection is disabled"));
    }

    metrics.update_uptime();
    let output = metrics.render().map_err(|e| {
        tracing::error!(error = %e, "Failed to render metrics");
        actix_web::error::ErrorInternalServerError("Failed to render metrics")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(output))
}
