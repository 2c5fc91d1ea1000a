//! Recruitment Error Types
//!
//! Recruitment-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::media::UploadError;
use thiserror::Error;

pub type RecruitmentResult<T> = Result<T, RecruitmentError>;

#[derive(Debug, Error)]
pub enum RecruitmentError {
    /// Field-level problems, listed above the re-rendered form
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("E-mail já registrado.")]
    EmailTaken,

    #[error("Você já se candidatou a esta vaga.")]
    AlreadyApplied,

    #[error("Você já avaliou esta empresa.")]
    AlreadyEvaluated,

    /// Evaluation attempted without a selected application at the company
    #[error("Só é possível avaliar empresas que selecionaram você em uma vaga.")]
    NotSelected,

    /// Wrong owner
    #[error("Acesso negado.")]
    AccessDenied,

    #[error("Empresa não encontrada.")]
    CompanyNotFound,

    #[error("Candidato não encontrado.")]
    CandidateNotFound,

    #[error("Vaga não encontrada.")]
    JobNotFound,

    #[error("Curso não encontrado.")]
    CourseNotFound,

    #[error("Experiência não encontrada.")]
    ExperienceNotFound,

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecruitmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecruitmentError::Validation(_)
            | RecruitmentError::EmailTaken
            | RecruitmentError::AlreadyApplied
            | RecruitmentError::AlreadyEvaluated => ErrorKind::BadRequest,
            RecruitmentError::NotSelected | RecruitmentError::AccessDenied => ErrorKind::Forbidden,
            RecruitmentError::CompanyNotFound
            | RecruitmentError::CandidateNotFound
            | RecruitmentError::JobNotFound
            | RecruitmentError::CourseNotFound
            | RecruitmentError::ExperienceNotFound => ErrorKind::NotFound,
            RecruitmentError::Upload(e) if e.is_client_error() => ErrorKind::BadRequest,
            RecruitmentError::Upload(_)
            | RecruitmentError::Database(_)
            | RecruitmentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Messages to list above a re-rendered form, if this error belongs there
    pub fn form_errors(&self) -> Option<Vec<String>> {
        match self {
            RecruitmentError::Validation(errors) => Some(errors.clone()),
            RecruitmentError::EmailTaken => Some(vec![self.to_string()]),
            RecruitmentError::Upload(e) if e.is_client_error() => Some(vec![e.to_string()]),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    pub fn log(&self) {
        match self {
            RecruitmentError::Database(e) => {
                tracing::error!(error = %e, "Recruitment database error");
            }
            RecruitmentError::Internal(msg) => {
                tracing::error!(message = %msg, "Recruitment internal error");
            }
            RecruitmentError::Upload(e) if !e.is_client_error() => {
                tracing::error!(error = %e, "Upload storage error");
            }
            RecruitmentError::AccessDenied | RecruitmentError::NotSelected => {
                tracing::warn!(error = %self, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Recruitment error");
            }
        }
    }
}

impl IntoResponse for RecruitmentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for RecruitmentError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => RecruitmentError::Validation(errors),
            AuthError::EmailTaken => RecruitmentError::EmailTaken,
            AuthError::Database(e) => RecruitmentError::Database(e),
            AuthError::AccessDenied => RecruitmentError::AccessDenied,
            other => RecruitmentError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_taxonomy() {
        assert_eq!(RecruitmentError::Validation(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RecruitmentError::AlreadyApplied.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RecruitmentError::AlreadyEvaluated.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RecruitmentError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(RecruitmentError::NotSelected.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(RecruitmentError::JobNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RecruitmentError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upload_errors_split_by_origin() {
        let too_large = RecruitmentError::Upload(UploadError::TooLarge {
            max: 2 * 1024 * 1024,
            actual: 3 * 1024 * 1024,
        });
        assert_eq!(too_large.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            too_large.form_errors(),
            Some(vec!["O arquivo excede o limite de 2 MB.".to_string()])
        );

        let io = RecruitmentError::Upload(UploadError::Io(std::io::Error::other("disk")));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(io.form_errors().is_none());
    }

    #[test]
    fn test_auth_errors_keep_meaning() {
        assert!(matches!(
            RecruitmentError::from(AuthError::EmailTaken),
            RecruitmentError::EmailTaken
        ));
        assert!(matches!(
            RecruitmentError::from(AuthError::Validation(vec!["E-mail inválido.".into()])),
            RecruitmentError::Validation(v) if v.len() == 1
        ));
    }
}
