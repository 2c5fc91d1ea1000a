//! Public pages

use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use kernel::id::CompanyId;

use crate::application::EvaluationUseCase;
use crate::domain::repository::RecruitmentStore;
use crate::error::RecruitmentResult;
use crate::presentation::state::RecruitmentState;
use crate::presentation::views::public as views;

/// GET /empresas/{id}
pub async fn company<S>(
    State(state): State<RecruitmentState<S>>,
    Path(company_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let page = EvaluationUseCase::new(state.store.clone())
        .company_page(&CompanyId::from(company_id))
        .await?;
    Ok(views::company_page(&page))
}
