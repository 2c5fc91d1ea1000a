//! Signed tokens
//!
//! Session cookies and verification links carry the same claims shape,
//! signed with the session secret. The purpose claim keeps one kind from
//! being replayed as the other.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::crypto::{sign_token, verify_token};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::role::Role;
use crate::error::AuthResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    VerifyEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub purpose: TokenPurpose,
    /// Unix seconds
    pub exp: i64,
}

impl Claims {
    pub fn account_id(&self) -> AccountId {
        AccountId::from_uuid(self.sub)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Why a token was refused before its expiry was even looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Malformed or signed with another key
    Forged,
    /// Valid signature, other purpose
    WrongPurpose,
}

pub fn issue(
    config: &AuthConfig,
    account_id: &AccountId,
    role: Role,
    purpose: TokenPurpose,
    now: DateTime<Utc>,
) -> AuthResult<String> {
    let ttl = match purpose {
        TokenPurpose::Session => config.session_ttl,
        TokenPurpose::VerifyEmail => config.verification_ttl,
    };
    let claims = Claims {
        sub: account_id.into_uuid(),
        role,
        purpose,
        exp: now.timestamp() + ttl.as_secs() as i64,
    };
    Ok(sign_token(&claims, &config.session_secret)?)
}

/// Check signature and purpose. Expiry is left to the caller.
pub fn decode(
    config: &AuthConfig,
    token: &str,
    purpose: TokenPurpose,
) -> Result<Claims, TokenRejection> {
    let claims: Claims =
        verify_token(token, &config.session_secret).map_err(|_| TokenRejection::Forged)?;
    if claims.purpose != purpose {
        return Err(TokenRejection::WrongPurpose);
    }
    Ok(claims)
}
