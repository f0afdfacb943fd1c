//! Route pattern extraction for metric labels.

use actix_web::HttpRequest;

/// Registered route pattern for the request, or `/unknown` when nothing matched.
///
/// Unmatched paths collapse into one label so scanners cannot grow the
/// metric cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unknown".to_string())
}
