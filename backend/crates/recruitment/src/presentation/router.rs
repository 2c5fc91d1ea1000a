//! Recruitment Routers

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use auth::Role;
use auth::presentation::{guarded, require_role};

use crate::domain::repository::RecruitmentStore;
use crate::presentation::handlers::{admin, candidate, company, public, registration};
use crate::presentation::state::RecruitmentState;

/// Request ceiling for upload routes. Above the 2 MB file limit so that
/// oversized files reach the upload policy and get a form error.
pub const UPLOAD_BODY_LIMIT: usize = 4 * 1024 * 1024;

/// Sign-up routes, merged into the `/auth` router
pub fn registration_router<S>(state: RecruitmentState<S>) -> Router
where
    S: RecruitmentStore,
{
    Router::new()
        .route(
            "/register_empresa",
            get(registration::company_page).post(registration::register_company::<S>),
        )
        .route(
            "/register_candidato",
            get(registration::candidate_page)
                .post(registration::register_candidate::<S>)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}

fn company_routes<S>() -> Router<RecruitmentState<S>>
where
    S: RecruitmentStore,
{
    Router::new()
        .route("/dashboard", get(company::dashboard::<S>))
        .route("/perfil", get(company::profile::<S>))
        .route("/editar", post(company::edit_profile::<S>))
        .route(
            "/logo",
            post(company::upload_logo::<S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/vagas", get(company::jobs::<S>))
        .route(
            "/vagas/criar",
            get(company::new_job).post(company::create_job::<S>),
        )
        .route(
            "/vagas/{id}/editar",
            get(company::edit_job_page::<S>).post(company::update_job::<S>),
        )
        .route("/vagas/{id}/excluir", post(company::delete_job::<S>))
        .route("/vagas/{id}/candidatos", get(company::applicants::<S>))
        .route("/vagas/{id}/selecionar", post(company::select_applicants::<S>))
}

fn candidate_routes<S>() -> Router<RecruitmentState<S>>
where
    S: RecruitmentStore,
{
    Router::new()
        .route("/dashboard", get(candidate::dashboard::<S>))
        .route("/perfil", get(candidate::profile::<S>))
        .route("/editar", post(candidate::edit_profile::<S>))
        .route("/metas", post(candidate::set_goals::<S>))
        .route(
            "/curriculo",
            post(candidate::upload_resume::<S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/vagas", get(candidate::search::<S>))
        .route("/candidatar", post(candidate::apply::<S>))
        .route("/candidaturas", get(candidate::applications::<S>))
        .route("/avaliar", post(candidate::evaluate::<S>))
        .route(
            "/cursos",
            get(candidate::courses::<S>).post(candidate::add_course::<S>),
        )
        .route("/cursos/{id}/editar", post(candidate::edit_course::<S>))
        .route("/cursos/{id}/excluir", post(candidate::delete_course::<S>))
        .route(
            "/experiencias",
            get(candidate::experiences::<S>).post(candidate::add_experience::<S>),
        )
        .route(
            "/experiencias/{id}/editar",
            post(candidate::edit_experience::<S>),
        )
        .route(
            "/experiencias/{id}/excluir",
            post(candidate::delete_experience::<S>),
        )
}

fn admin_routes<S>() -> Router<RecruitmentState<S>>
where
    S: RecruitmentStore,
{
    Router::new()
        .route("/dashboard", get(admin::dashboard::<S>))
        .route("/empresas", get(admin::companies::<S>))
        .route("/empresas/{id}/delete", post(admin::delete_company::<S>))
        .route("/candidatos", get(admin::candidates::<S>))
        .route("/candidatos/{id}/delete", post(admin::delete_candidate::<S>))
        .route("/vagas", get(admin::jobs::<S>))
        .route("/vagas/{id}/delete", post(admin::delete_job::<S>))
}

/// Company, candidate and admin areas behind their role guards, plus the
/// public company pages
pub fn recruitment_router<S>(state: RecruitmentState<S>) -> Router
where
    S: RecruitmentStore,
{
    let auth = state.auth.clone();

    Router::new()
        .nest(
            "/empresa",
            guarded(company_routes::<S>(), require_role(auth.clone(), Role::Company)),
        )
        .nest(
            "/candidato",
            guarded(candidate_routes::<S>(), require_role(auth.clone(), Role::Candidate)),
        )
        .nest(
            "/admin",
            guarded(admin_routes::<S>(), require_role(auth, Role::Admin)),
        )
        .route("/empresas/{id}", get(public::company::<S>))
        .with_state(state)
}
