//! E-mail verification
//!
//! Sending the link, consuming it, and re-issuing it on request.

use std::sync::Arc;

use chrono::Utc;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::token::{self, TokenPurpose};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    /// Second visit to a used link
    AlreadyVerified,
}

impl VerifyOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "E-mail verificado com sucesso.",
            VerifyOutcome::AlreadyVerified => "E-mail já verificado.",
        }
    }
}

/// Mail the account its verification link.
///
/// Delivery failures are logged; the account stays as it is.
pub async fn send_verification_mail(mailer: &Mailer, config: &AuthConfig, account: &Account) {
    let Some(token) = account.verification_token.as_deref() else {
        return;
    };
    let link = config.verification_link(token);
    let text = format!(
        "Olá!\n\nConfirme seu e-mail acessando o link abaixo:\n\n{link}\n\n\
         O link expira em {} horas.\n",
        config.verification_ttl.as_secs() / 3600
    );

    if let Err(e) = mailer
        .send(account.email.as_str(), "Confirme seu e-mail", &text)
        .await
    {
        tracing::error!(account_id = %account.account_id, error = %e, "Failed to send verification mail");
    }
}

pub struct VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<VerifyOutcome> {
        let claims = token::decode(&self.config, token, TokenPurpose::VerifyEmail)
            .map_err(|_| AuthError::InvalidVerificationLink)?;

        let mut account = self
            .repo
            .find_account_by_id(&claims.account_id())
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if account.email_verified {
            return Ok(VerifyOutcome::AlreadyVerified);
        }
        if claims.is_expired(Utc::now()) {
            return Err(AuthError::VerificationLinkExpired);
        }
        // A re-issued link supersedes older ones
        if account.verification_token.as_deref() != Some(token) {
            return Err(AuthError::InvalidVerificationLink);
        }

        account.mark_verified();
        self.repo.update_account(&account).await?;

        tracing::info!(account_id = %account.account_id, "E-mail verified");
        Ok(VerifyOutcome::Verified)
    }

    /// Issue a fresh link for a pending account.
    ///
    /// Returns the updated account when there is something to mail; unknown
    /// or already verified addresses yield `None`.
    pub async fn reissue(&self, role: Role, email: &str) -> AuthResult<Option<Account>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };
        let Some(mut account) = self.repo.find_account_by_email(role, &email).await? else {
            return Ok(None);
        };
        if account.email_verified {
            return Ok(None);
        }

        let token = token::issue(
            &self.config,
            &account.account_id,
            account.role,
            TokenPurpose::VerifyEmail,
            Utc::now(),
        )?;
        account.set_verification_token(token);
        self.repo.update_account(&account).await?;

        tracing::info!(account_id = %account.account_id, "Verification link re-issued");
        Ok(Some(account))
    }
}
