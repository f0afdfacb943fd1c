//! HTTP metrics middleware.

use crate::{services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};

/// Label used when the request failed before a route produced a response
const UNROUTED: &str = "/unknown";

/// Records count and latency of every request in [`AppMetrics`], labelled
/// by method, status and matched route pattern.
///
/// Errors raised by inner middleware are counted under their error status.
pub struct MetricsMiddleware {
    metrics: web::Data<AppMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: web::Data<AppMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService {
            service,
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsService<S> {
    service: S,
    metrics: web::Data<AppMetrics>,
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().clone();
        let metrics = self.metrics.clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            let outcome = fut.await;
            let (route, status) = route_and_status(&outcome);

            metrics.record_request(method.as_str(), &route, status.as_u16(), started.elapsed());
            metrics.update_uptime();

            outcome
        })
    }
}

/// The pattern is only known once routing has happened, so it is read from
/// the finished response.
fn route_and_status<B>(outcome: &Result<ServiceResponse<B>, Error>) -> (String, StatusCode) {
    match outcome {
        Ok(res) => (extract_route_pattern(res.request()), res.status()),
        Err(err) => (UNROUTED.to_string(), err.as_response_error().status_code()),
    }
}
