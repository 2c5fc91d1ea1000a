//! Account Entity
//!
//! Login identity of a company, candidate or administrator. Profiles live
//! in the recruitment context and share the account's id.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{account_password::AccountPassword, email::Email, role::Role};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub role: Role,
    /// Unique per role
    pub email: Email,
    pub password: AccountPassword,
    pub email_verified: bool,
    /// Outstanding verification token; cleared once used
    pub verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New, unverified account
    pub fn new(account_id: AccountId, role: Role, email: Email, password: AccountPassword) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            role,
            email,
            password,
            email_verified: false,
            verification_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_verification_token(&mut self, token: String) {
        self.verification_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Flip the flag and burn the token
    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.verification_token = None;
        self.updated_at = Utc::now();
    }
}
