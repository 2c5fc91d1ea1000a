//! Auth Router

use axum::extract::{Form, State};
use axum::{
    Router,
    routing::{MethodRouter, get},
};
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::role::Role;
use crate::presentation::dto::LoginForm;
use crate::presentation::handlers::{self, AuthAppState};

fn login_route<R>(role: Role) -> MethodRouter<AuthAppState<R>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    get(move || async move { handlers::login_page(role) }).post(
        move |State(state): State<AuthAppState<R>>, Form(form): Form<LoginForm>| async move {
            handlers::login(state, role, form).await
        },
    )
}

/// Routes mounted under `/auth`
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>, mailer: Mailer) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        config,
        mailer,
    };

    Router::new()
        .route("/login_empresa", login_route::<R>(Role::Company))
        .route("/login_candidato", login_route::<R>(Role::Candidate))
        .route("/login_admin", login_route::<R>(Role::Admin))
        .route("/logout", get(handlers::logout::<R>))
        .route("/verificar", get(handlers::verify_email::<R>))
        .route(
            "/reenviar_verificacao",
            get(handlers::resend_verification_page).post(handlers::resend_verification::<R>),
        )
        .with_state(state)
}
