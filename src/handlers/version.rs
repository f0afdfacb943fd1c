//! Version information endpoint handler.

use super::common::enforce_rate_limit;
use crate::{
    models::VersionResponse,
    services::{BuildInfo, SimpleRateLimiter},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current API version, commit hash, and build time. Rate limited per client IP.",
    tags("Version")
)]
pub async fn version(
    req: HttpRequest,
    limiter: web::Data<SimpleRateLimiter>,
) -> Result<web::Json<VersionResponse>, Error> {
    enforce_rate_limit(&req, &limiter)?;

    let info = BuildInfo::current();
    Ok(web::Json(VersionResponse {
        version: info.version.to_string(),
        commit: info.commit.to_string(),
        build_time: info.build_time.to_string(),
    }))
}
