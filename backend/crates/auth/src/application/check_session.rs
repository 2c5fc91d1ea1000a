//! Session check
//!
//! The single verification primitive behind every guarded route.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::application::token::{self, TokenPurpose};
use crate::domain::value_object::role::Role;

/// Authenticated caller, inserted into request extensions by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
    pub role: Role,
}

/// Outcome of checking a request's session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionVerdict {
    Authenticated(Identity),
    /// No cookie
    Missing,
    /// Bad signature, wrong purpose or expired
    Invalid,
    /// Valid session for another role
    WrongRole { found: Role },
}

/// Verify the session cookie carried by `headers`.
pub fn verify_session(
    headers: &HeaderMap,
    config: &AuthConfig,
    required: Option<Role>,
) -> SessionVerdict {
    let token = platform::cookie::extract_cookie(headers, &config.cookie_name);
    verify_session_token(token.as_deref(), config, required, Utc::now())
}

/// Verify a raw session token at `now`.
pub fn verify_session_token(
    token: Option<&str>,
    config: &AuthConfig,
    required: Option<Role>,
    now: DateTime<Utc>,
) -> SessionVerdict {
    let Some(token) = token else {
        return SessionVerdict::Missing;
    };

    let claims = match token::decode(config, token, TokenPurpose::Session) {
        Ok(claims) if !claims.is_expired(now) => claims,
        _ => return SessionVerdict::Invalid,
    };

    match required {
        Some(role) if role != claims.role => SessionVerdict::WrongRole { found: claims.role },
        _ => SessionVerdict::Authenticated(Identity {
            account_id: claims.account_id(),
            role: claims.role,
        }),
    }
}
