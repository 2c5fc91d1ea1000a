//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Field-level problems, shown as a list next to the form
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    /// Unknown e-mail, wrong password and unverified account all look alike
    #[error("E-mail ou senha incorretos.")]
    InvalidCredentials,

    #[error("E-mail já registrado.")]
    EmailTaken,

    #[error("Link de verificação inválido.")]
    InvalidVerificationLink,

    #[error("Link de verificação expirado.")]
    VerificationLinkExpired,

    #[error("Conta não encontrada.")]
    AccountNotFound,

    #[error("Acesso negado.")]
    AccessDenied,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidCredentials
            | AuthError::EmailTaken
            | AuthError::InvalidVerificationLink
            | AuthError::VerificationLinkExpired => ErrorKind::BadRequest,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::AccessDenied => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Messages to list above a re-rendered form, if this error belongs there
    pub fn form_errors(&self) -> Option<Vec<String>> {
        match self {
            AuthError::Validation(errors) => Some(errors.clone()),
            AuthError::InvalidCredentials | AuthError::EmailTaken => Some(vec![self.to_string()]),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccessDenied => {
                tracing::warn!("Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Internal(format!("token encoding failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_taxonomy() {
        assert_eq!(AuthError::Validation(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = AuthError::Validation(vec!["E-mail inválido.".into(), "Senha curta.".into()]);
        assert_eq!(err.to_string(), "E-mail inválido. Senha curta.");
        assert_eq!(err.form_errors().unwrap().len(), 2);
    }

    #[test]
    fn test_internal_errors_are_not_form_errors() {
        assert!(AuthError::Internal("boom".into()).form_errors().is_none());
        assert_eq!(
            AuthError::EmailTaken.form_errors(),
            Some(vec!["E-mail já registrado.".to_string()])
        );
    }
}
