//! HTTP Handlers

use axum::extract::{Form, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInUseCase, VerifyEmailUseCase, send_verification_mail,
};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::role::Role;
use crate::error::AuthError;
use crate::presentation::dto::{LoginForm, ResendVerificationForm, VerifyQuery};
use crate::presentation::views;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub mailer: Mailer,
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /auth/login_{role}
pub fn login_page(role: Role) -> Response {
    views::login_page(role, "", &[])
}

/// POST /auth/login_{role}
pub async fn login<R>(state: AuthAppState<R>, role: Role, form: LoginForm) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let email = form.email.clone();

    let result = use_case
        .execute(SignInInput {
            role,
            email: form.email,
            password: form.password,
        })
        .await;

    match result {
        Ok(output) => signed_in(&state.config, role, &output.session_token),
        Err(e) => match e.form_errors() {
            Some(errors) => {
                e.log();
                views::login_page(role, &email, &errors)
            }
            None => e.into_response(),
        },
    }
}

/// Redirect home carrying the new session cookie
fn signed_in(config: &AuthConfig, role: Role, session_token: &str) -> Response {
    match config.session_cookie().set_header(session_token) {
        Some(value) => ([(header::SET_COOKIE, value)], Redirect::to(role.home_path())).into_response(),
        None => AuthError::Internal("session cookie is not a valid header value".to_string())
            .into_response(),
    }
}

/// GET /auth/logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let redirect = Redirect::to("/");
    match state.config.session_cookie().delete_header() {
        Some(value) => ([(header::SET_COOKIE, value)], redirect).into_response(),
        None => redirect.into_response(),
    }
}

// ============================================================================
// E-mail verification
// ============================================================================

/// GET /auth/verificar?token=
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<VerifyQuery>,
) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    const TITLE: &str = "Verificação de e-mail";
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(query.token.trim()).await {
        Ok(outcome) => views::message_page(StatusCode::OK, TITLE, outcome.message()),
        Err(e) if e.status_code() == StatusCode::BAD_REQUEST => {
            e.log();
            views::message_page(e.status_code(), TITLE, &e.to_string())
        }
        Err(e) => e.into_response(),
    }
}

/// GET /auth/reenviar_verificacao
pub async fn resend_verification_page() -> Response {
    views::resend_page()
}

/// POST /auth/reenviar_verificacao
///
/// Always answers with the same text, whether or not an account matched.
pub async fn resend_verification<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<ResendVerificationForm>,
) -> Response
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.config.clone());

    if let Some(role) = Role::from_code(&form.role).filter(|r| *r != Role::Admin) {
        match use_case.reissue(role, &form.email).await {
            Ok(Some(account)) => {
                send_verification_mail(&state.mailer, &state.config, &account).await;
            }
            Ok(None) => {}
            Err(e) => return e.into_response(),
        }
    }

    views::message_page(
        StatusCode::OK,
        "Reenviar verificação",
        "Se houver uma conta pendente com este e-mail, enviamos um novo link de verificação.",
    )
}
