//! Sign Up Use Case
//!
//! Validates credentials and builds a new account. Profile registration in
//! the recruitment context calls [`prepare_account`] and persists the
//! account together with its profile; [`SignUpUseCase::execute`] persists
//! the account on its own.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::application::token::{self, TokenPurpose};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    role::Role,
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub role: Role,
    pub email: String,
    pub password: String,
}

/// Validate, hash and mint the verification token without persisting.
///
/// All field problems are reported together as `AuthError::Validation`.
pub fn prepare_account(config: &AuthConfig, input: SignUpInput) -> AuthResult<Account> {
    let mut errors = Vec::new();

    let email = Email::new(input.email)
        .map_err(|e| errors.push(e.message().to_string()))
        .ok();
    let raw = RawPassword::new(input.password)
        .map_err(|e| errors.push(e))
        .ok();

    let (Some(email), Some(raw)) = (email, raw) else {
        return Err(AuthError::Validation(errors));
    };

    let password = AccountPassword::from_raw(&raw, config.pepper())?;
    let mut account = Account::new(AccountId::new(), input.role, email, password);
    let token = token::issue(
        config,
        &account.account_id,
        account.role,
        TokenPurpose::VerifyEmail,
        Utc::now(),
    )?;
    account.set_verification_token(token);

    Ok(account)
}

pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate, hash and mint the verification token without persisting.
    pub fn prepare(&self, input: SignUpInput) -> AuthResult<Account> {
        prepare_account(&self.config, input)
    }

    /// Prepare and persist an account.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<Account> {
        let account = self.prepare(input)?;
        self.repo.create_account(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account signed up"
        );

        Ok(account)
    }

    /// Create a pre-verified administrator unless one already uses `email`.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AuthResult<bool> {
        let normalized = Email::new(email).map_err(|e| AuthError::Validation(vec![e.message().to_string()]))?;
        if self
            .repo
            .find_account_by_email(Role::Admin, &normalized)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let mut account = self.prepare(SignUpInput {
            role: Role::Admin,
            email: email.to_string(),
            password: password.to_string(),
        })?;
        account.mark_verified();

        match self.repo.create_account(&account).await {
            Ok(()) => {}
            // Another instance won the race
            Err(AuthError::EmailTaken) => return Ok(false),
            Err(e) => return Err(e),
        }

        tracing::info!(account_id = %account.account_id, "Administrator account created");
        Ok(true)
    }
}
