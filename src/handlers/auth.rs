//! Registration, login and logout handlers.

use super::{ApiError, common::require_token};
use crate::{
    models::{
        AuthAuditEvent, AuthEventOutcome, AuthEventType, LoginRequest, LoginResponse,
        MessageResponse, RegisterRequest, RegisterResponse,
    },
    services::{AccountStore, Registration, SuspiciousActivityTracker},
    utils::http::{extract_client_ip, extract_request_id, extract_user_agent},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Audit event pre-filled with the request's client details
fn audit(req: &HttpRequest, event_type: AuthEventType, outcome: AuthEventOutcome) -> AuthAuditEvent {
    AuthAuditEvent::new(
        event_type,
        outcome,
        extract_client_ip(req),
        req.method().to_string(),
        req.uri().path().to_string(),
    )
    .with_user_agent(extract_user_agent(req))
    .with_request_id(extract_request_id(req))
}

/// Run password hashing on the blocking pool
async fn off_worker<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|e| {
        tracing::error!(error = %e, "Password hashing task failed");
        ApiError::Internal("Internal server error".to_string())
    })
}

/// Create an account
#[api_v2_operation(
    summary = "Register",
    description = "Creates an account. All fields are required; the password needs at least 8 characters with a letter and a digit. Duplicate email or username answers 409.",
    tags("Authentication")
)]
pub async fn register(
    req: HttpRequest,
    payload: web::Json<RegisterRequest>,
    accounts: web::Data<AccountStore>,
) -> Result<web::Json<RegisterResponse>, Error> {
    let form = payload.into_inner();
    let attempted_username = form.username.clone();
    let store = accounts.into_inner();
    let outcome = off_worker(move || {
        store.register(Registration {
            email: form.email.as_deref(),
            username: form.username.as_deref(),
            password: form.password.as_deref(),
            confirm_password: form.confirm_password.as_deref(),
        })
    })
    .await?;

    match outcome {
        Ok(username) => {
            audit(&req, AuthEventType::RegistrationSuccess, AuthEventOutcome::Success)
                .with_user_id(Some(username.clone()))
                .log();

            Ok(web::Json(RegisterResponse {
                username,
                message: "Registration successful! Please login.".to_string(),
            }))
        }
        Err(err) => {
            audit(&req, AuthEventType::RegistrationFailure, AuthEventOutcome::Failure)
                .with_user_id(attempted_username)
                .with_details(Some(err.to_string()))
                .log();

            Err(ApiError::from(err).into())
        }
    }
}

/// Exchange email and password for a bearer token
///
/// Repeated failures from one IP inside the configured window lock that IP
/// out with 429 until the window passes.
#[api_v2_operation(
    summary = "Login",
    description = "Authenticates with email and password and returns a bearer token for the favorites endpoints.",
    tags("Authentication")
)]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
    accounts: web::Data<AccountStore>,
    tracker: web::Data<SuspiciousActivityTracker>,
) -> Result<web::Json<LoginResponse>, Error> {
    let ip_address = extract_client_ip(&req);

    if tracker.is_suspicious(&ip_address) {
        audit(&req, AuthEventType::SuspiciousActivity, AuthEventOutcome::Failure)
            .with_user_id(Some(payload.email.clone()))
            .with_details(Some("login refused while over failure threshold".to_string()))
            .log();

        return Err(ApiError::TooManyRequests(
            "Too many failed login attempts. Please try again later.".to_string(),
        )
        .into());
    }

    let LoginRequest { email, password } = payload.into_inner();
    let store = accounts.into_inner();
    let attempted_email = email.clone();
    let outcome = off_worker(move || store.login(&attempted_email, &password)).await?;

    match outcome {
        Ok(token) => {
            tracker.clear(&ip_address);
            audit(&req, AuthEventType::LoginSuccess, AuthEventOutcome::Success)
                .with_user_id(Some(email.clone()))
                .log();

            Ok(web::Json(LoginResponse {
                success: true,
                token: Some(token),
                message: "Login successful".to_string(),
            }))
        }
        Err(err) => {
            audit(&req, AuthEventType::LoginFailure, AuthEventOutcome::Failure)
                .with_user_id(Some(email.clone()))
                .log();

            if tracker.record_failure(&ip_address) {
                audit(&req, AuthEventType::SuspiciousActivity, AuthEventOutcome::Failure)
                    .with_user_id(Some(email.clone()))
                    .with_details(Some("failed login threshold reached".to_string()))
                    .log();
            }

            Err(ApiError::from(err).into())
        }
    }
}

/// End the session named by the bearer token
#[api_v2_operation(
    summary = "Logout",
    description = "Invalidates the bearer token. Unknown tokens are accepted and ignored.",
    tags("Authentication")
)]
pub async fn logout(
    req: HttpRequest,
    accounts: web::Data<AccountStore>,
) -> Result<web::Json<MessageResponse>, Error> {
    let token = require_token(&req)?;
    let email = accounts.logout(&token);

    audit(&req, AuthEventType::Logout, AuthEventOutcome::Success)
        .with_user_id(email)
        .log();

    Ok(web::Json(MessageResponse {
        message: "You have been logged out".to_string(),
    }))
}
