//! In-memory account store: registration, sessions and favorite cities.

use crate::config::AuthConfig;
use crate::models::FavoriteToggle;
use crate::services::favorites::FavoriteCityList;
use crate::utils::password::PasswordDigest;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Account operation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Password must contain at least one letter and one number")]
    PasswordTooWeak,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Registration input, already unwrapped from the request body
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub confirm_password: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub username: String,
    password: PasswordDigest,
    pub favorites: FavoriteCityList,
}

struct Session {
    /// Normalized email of the owner
    email: String,
    issued_at: Instant,
}

impl Session {
    fn is_live(&self, ttl: Duration) -> bool {
        self.issued_at.elapsed() < ttl
    }
}

#[derive(Default)]
struct Inner {
    /// Keyed by normalized email
    accounts: HashMap<String, Account>,
    /// Keyed by bearer token
    sessions: HashMap<String, Session>,
}

impl Inner {
    /// Owner of `token` while the session is within its lifetime
    fn session_email(&self, token: &str, ttl: Duration) -> Result<&str, AccountError> {
        self.sessions
            .get(token)
            .filter(|session| session.is_live(ttl))
            .map(|session| session.email.as_str())
            .ok_or(AccountError::Unauthenticated)
    }
}

/// Accounts and sessions shared across workers
pub struct AccountStore {
    config: AuthConfig,
    session_ttl: Duration,
    email_pattern: Regex,
    inner: RwLock<Inner>,
}

impl AccountStore {
    pub fn new(config: AuthConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            session_ttl: Duration::from_secs(config.session_ttl_seconds),
            config,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            inner: RwLock::new(Inner::default()),
        })
    }

    /// Validate the form and create the account. Returns the stored account's
    /// username.
    ///
    /// Checks run in a fixed order and the first failure wins: required
    /// fields, password confirmation, length, letter+digit, email shape, then
    /// uniqueness of email and username.
    pub fn register(&self, form: Registration<'_>) -> Result<String, AccountError> {
        let (Some(email), Some(username), Some(password), Some(confirm)) = (
            non_blank(form.email),
            non_blank(form.username),
            form.password.filter(|p| !p.is_empty()),
            form.confirm_password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AccountError::MissingFields);
        };

        if password != confirm {
            return Err(AccountError::PasswordMismatch);
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(AccountError::PasswordTooShort(
                self.config.min_password_length,
            ));
        }
        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(char::is_numeric);
        if !(has_letter && has_digit) {
            return Err(AccountError::PasswordTooWeak);
        }

        let email = normalize_email(email);
        if !self.email_pattern.is_match(&email) {
            return Err(AccountError::InvalidEmail);
        }

        let digest = PasswordDigest::create(password)
            .map_err(|e| AccountError::Internal(format!("password hashing failed: {e}")))?;

        let mut inner = self.write();
        if inner.accounts.contains_key(&email) {
            return Err(AccountError::EmailTaken);
        }
        if inner.accounts.values().any(|a| a.username == username) {
            return Err(AccountError::UsernameTaken);
        }

        inner.accounts.insert(
            email.clone(),
            Account {
                email,
                username: username.to_string(),
                password: digest,
                favorites: FavoriteCityList::new(),
            },
        );

        Ok(username.to_string())
    }

    /// Check credentials and open a session, returning its bearer token.
    ///
    /// The hash is verified without holding the store lock. Expired sessions
    /// are dropped whenever a new one is opened.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AccountError> {
        let email = normalize_email(email);
        let digest = self
            .read()
            .accounts
            .get(&email)
            .map(|account| account.password.clone());

        if !digest.is_some_and(|digest| digest.verify(password)) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = format!("token_{}", Uuid::new_v4());
        let ttl = self.session_ttl;
        let mut inner = self.write();
        inner.sessions.retain(|_, session| session.is_live(ttl));
        inner.sessions.insert(
            token.clone(),
            Session {
                email,
                issued_at: Instant::now(),
            },
        );
        Ok(token)
    }

    /// Close a session; unknown tokens are ignored. Returns the email the
    /// session belonged to.
    pub fn logout(&self, token: &str) -> Option<String> {
        self.write()
            .sessions
            .remove(token)
            .map(|session| session.email)
    }

    pub fn favorites(&self, token: &str) -> Result<Vec<String>, AccountError> {
        let inner = self.read();
        let email = inner.session_email(token, self.session_ttl)?;
        let account = inner
            .accounts
            .get(email)
            .ok_or(AccountError::Unauthenticated)?;
        Ok(account.favorites.as_slice().to_vec())
    }

    /// Add when absent, remove when present, under one write lock
    pub fn toggle_favorite(&self, token: &str, city: &str) -> Result<FavoriteToggle, AccountError> {
        self.with_favorites(token, |favorites| favorites.toggle(city))
    }

    fn with_favorites<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut FavoriteCityList) -> T,
    ) -> Result<T, AccountError> {
        let mut inner = self.write();
        let email = inner.session_email(token, self.session_ttl)?.to_string();
        let account = inner
            .accounts
            .get_mut(&email)
            .ok_or(AccountError::Unauthenticated)?;
        Ok(f(&mut account.favorites))
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
