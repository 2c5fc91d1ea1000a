//! Administration area (`/admin`)

use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use kernel::id::{CandidateId, CompanyId, JobId};

use crate::application::AdminUseCase;
use crate::domain::repository::RecruitmentStore;
use crate::error::RecruitmentResult;
use crate::presentation::handlers::see_other;
use crate::presentation::state::RecruitmentState;
use crate::presentation::views::admin as views;

/// GET /admin/dashboard
pub async fn dashboard<S>(State(state): State<RecruitmentState<S>>) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let counts = AdminUseCase::new(state.store.clone()).counts().await?;
    Ok(views::dashboard(&counts))
}

/// GET /admin/empresas
pub async fn companies<S>(State(state): State<RecruitmentState<S>>) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let companies = AdminUseCase::new(state.store.clone()).companies().await?;
    Ok(views::companies_page(&companies))
}

/// POST /admin/empresas/{id}/delete
pub async fn delete_company<S>(
    State(state): State<RecruitmentState<S>>,
    Path(company_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    AdminUseCase::new(state.store.clone())
        .delete_company(&state.uploads, &CompanyId::from(company_id))
        .await?;
    Ok(see_other("/admin/empresas"))
}

/// GET /admin/candidatos
pub async fn candidates<S>(State(state): State<RecruitmentState<S>>) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let candidates = AdminUseCase::new(state.store.clone()).candidates().await?;
    Ok(views::candidates_page(&candidates))
}

/// POST /admin/candidatos/{id}/delete
pub async fn delete_candidate<S>(
    State(state): State<RecruitmentState<S>>,
    Path(candidate_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    AdminUseCase::new(state.store.clone())
        .delete_candidate(&state.uploads, &CandidateId::from(candidate_id))
        .await?;
    Ok(see_other("/admin/candidatos"))
}

/// GET /admin/vagas
pub async fn jobs<S>(State(state): State<RecruitmentState<S>>) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let jobs = AdminUseCase::new(state.store.clone()).jobs().await?;
    Ok(views::jobs_page(&jobs))
}

/// POST /admin/vagas/{id}/delete
pub async fn delete_job<S>(
    State(state): State<RecruitmentState<S>>,
    Path(job_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    AdminUseCase::new(state.store.clone())
        .delete_job(&JobId::from(job_id))
        .await?;
    Ok(see_other("/admin/vagas"))
}
