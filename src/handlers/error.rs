//! JSON error responses for the handlers.

use crate::{models::ErrorResponse, services::AccountError};
use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    http::StatusCode,
};

/// Errors a handler can answer with. Each renders as an [`ErrorResponse`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    /// Unknown city, with alternatives the caller may retry with
    #[error("{message}")]
    CityNotFound {
        message: String,
        suggestions: Vec<String>,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    TooManyRequests(String),
    #[error("Weather service temporarily unavailable")]
    WeatherUnavailable,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn rate_limited() -> Self {
        Self::TooManyRequests("Rate limit exceeded. Please try again later.".to_string())
    }

    fn body(&self) -> ErrorResponse {
        let label = self.status_code().canonical_reason().unwrap_or("Error");
        let body = ErrorResponse::new(label, self.to_string());
        match self {
            Self::CityNotFound { suggestions, .. } => body.with_suggestions(suggestions.clone()),
            _ => body,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) | Self::CityNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::WeatherUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailTaken | AccountError::UsernameTaken => {
                Self::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                Self::Unauthorized(err.to_string())
            }
            AccountError::Internal(_) => Self::Internal("Internal server error".to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

/// Malformed JSON bodies answer 400 `Invalid JSON` in the common error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected JSON body");
    let response = ApiError::BadRequest("Invalid JSON".to_string()).error_response();
    InternalError::from_response(err, response).into()
}

/// Undecodable query strings (e.g. `units=kelvin`) answer 400
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ApiError::BadRequest(format!("Invalid query parameters: {err}")).error_response();
    InternalError::from_response(err, response).into()
}
