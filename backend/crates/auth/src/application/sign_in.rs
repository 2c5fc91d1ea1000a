//! Sign In Use Case
//!
//! Checks credentials for one role and issues a session token.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::application::token::{self, TokenPurpose};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    role::Role,
};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub role: Role,
    pub email: String,
    pub password: String,
}

#[cfg_attr(test, derive(Debug))]
pub struct SignInOutput {
    pub account_id: AccountId,
    /// Value for the session cookie
    pub session_token: String,
}

pub struct SignInUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let mut errors = Vec::new();
        let email = Email::new(input.email)
            .map_err(|e| errors.push(e.message().to_string()))
            .ok();
        if input.password.is_empty() {
            errors.push("A senha é obrigatória.".to_string());
        }
        let Some(email) = email.filter(|_| errors.is_empty()) else {
            return Err(AuthError::Validation(errors));
        };

        // Unknown e-mail, wrong password and pending verification share one answer
        let account = self.repo.find_account_by_email(input.role, &email).await?;
        let raw = RawPassword::for_login(input.password);
        let Some(account) = account else {
            AccountPassword::verify_missing(&raw, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !account.password.verify(&raw, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if self.config.require_email_verification && !account.email_verified {
            tracing::info!(account_id = %account.account_id, "Login refused: e-mail not verified");
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = token::issue(
            &self.config,
            &account.account_id,
            account.role,
            TokenPurpose::Session,
            Utc::now(),
        )?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account signed in"
        );

        Ok(SignInOutput {
            account_id: account.account_id,
            session_token,
        })
    }
}
