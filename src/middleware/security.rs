//! Security response headers.

use crate::config::SecurityHeadersConfig;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{
        CONTENT_SECURITY_POLICY, HeaderName, HeaderValue, REFERRER_POLICY,
        STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
    },
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};

type HeaderSet = Rc<[(HeaderName, HeaderValue)]>;

/// Stamps the headers enabled in [`SecurityHeadersConfig`] onto every
/// response, handler errors included.
///
/// The set is resolved once per worker. A blank string setting disables its
/// header; a value that is not a legal header value is logged and skipped.
pub struct SecurityHeaders {
    headers: HeaderSet,
}

impl SecurityHeaders {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self {
            headers: header_set(&config).into(),
        }
    }
}

/// Headers (name, value) produced by `config`, in a stable order
fn header_set(config: &SecurityHeadersConfig) -> Vec<(HeaderName, HeaderValue)> {
    let mut wanted: Vec<(HeaderName, String)> = Vec::with_capacity(5);

    if config.content_type_options {
        wanted.push((X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()));
    }
    if !config.frame_options.trim().is_empty() {
        wanted.push((X_FRAME_OPTIONS, config.frame_options.trim().to_string()));
    }
    if !config.referrer_policy.trim().is_empty() {
        wanted.push((REFERRER_POLICY, config.referrer_policy.trim().to_string()));
    }
    if config.csp_enabled && !config.csp_directives.trim().is_empty() {
        wanted.push((CONTENT_SECURITY_POLICY, config.csp_directives.trim().to_string()));
    }
    if config.hsts_enabled {
        wanted.push((
            STRICT_TRANSPORT_SECURITY,
            format!("max-age={}; includeSubDomains", config.hsts_max_age),
        ));
    }

    wanted
        .into_iter()
        .filter_map(|(name, value)| match HeaderValue::from_str(&value) {
            Ok(value) => Some((name, value)),
            Err(_) => {
                tracing::warn!(header = %name, value = %value, "Ignoring invalid security header value");
                None
            }
        })
        .collect()
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service,
            headers: Rc::clone(&self.headers),
        }))
    }
}

pub struct SecurityHeadersMiddleware<S> {
    service: S,
    headers: HeaderSet,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
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
        let fut = self.service.call(req);
        let headers = Rc::clone(&self.headers);

        Box::pin(async move {
            let mut res = fut.await?;
            let response_headers = res.headers_mut();
            for (name, value) in headers.iter() {
                response_headers.insert(name.clone(), value.clone());
            }
            Ok(res)
        })
    }
}
