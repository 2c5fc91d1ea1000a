//! Role guard
//!
//! One middleware protects the company, candidate and admin areas. It
//! verifies the session cookie, stores the caller's [`Identity`] in the
//! request extensions and redirects everyone else to the role's login page.

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::check_session::{SessionVerdict, verify_session};
use crate::application::config::AuthConfig;
use crate::domain::value_object::role::Role;

#[derive(Clone)]
pub struct RoleGuard {
    pub config: Arc<AuthConfig>,
    pub role: Role,
}

pub fn require_role(config: Arc<AuthConfig>, role: Role) -> RoleGuard {
    RoleGuard { config, role }
}

pub async fn guard_role(
    State(guard): State<RoleGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match verify_session(req.headers(), &guard.config, Some(guard.role)) {
        SessionVerdict::Authenticated(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        verdict => {
            tracing::debug!(?verdict, required = %guard.role, path = %req.uri().path(), "Session rejected");
            Redirect::to(guard.role.login_path()).into_response()
        }
    }
}

/// Put every route of `router` behind the guard.
///
/// Applied as a route layer so unknown paths still answer 404.
pub fn guarded<S>(router: Router<S>, guard: RoleGuard) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(guard, guard_role))
}
