//! Company area (`/empresa`)

use axum::extract::{Extension, Form, Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use auth::Identity;
use kernel::id::{CompanyId, JobApplicationId, JobId};

use crate::application::{
    ApplicationUseCase, CompanyEditInput, CompanyProfileUseCase, EvaluationUseCase, JobInput,
    JobPostingUseCase,
};
use crate::domain::entity::application::SelectionStatus;
use crate::domain::repository::RecruitmentStore;
use crate::domain::search::Pagination;
use crate::error::{RecruitmentError, RecruitmentResult};
use crate::presentation::dto::{ApplicantsQuery, CompanyForm, JobForm, PageQuery, selected_applications};
use crate::presentation::handlers::{form_failure, see_other};
use crate::presentation::multipart::MultipartForm;
use crate::presentation::state::RecruitmentState;
use crate::presentation::views::company as views;

fn company_id(identity: &Identity) -> CompanyId {
    identity.account_id.retag()
}

/// GET /empresa/dashboard
pub async fn dashboard<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = company_id(&identity);
    let page = EvaluationUseCase::new(state.store.clone()).company_page(&id).await?;
    let jobs = JobPostingUseCase::new(state.store.clone())
        .list(&id, Pagination::new(None))
        .await?;
    Ok(views::dashboard(&page.company, &jobs, &page.summary))
}

/// GET /empresa/perfil
pub async fn profile<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let company = CompanyProfileUseCase::new(state.store.clone())
        .get(&company_id(&identity))
        .await?;
    Ok(views::profile_page(&company, &CompanyEditInput::from_company(&company), &[]))
}

/// POST /empresa/editar
pub async fn edit_profile<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<CompanyForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = company_id(&identity);
    let use_case = CompanyProfileUseCase::new(state.store.clone());
    let company = use_case.get(&id).await?;
    let input = form.edit();

    Ok(match use_case.edit(&id, &input).await {
        Ok(_) => see_other("/empresa/perfil"),
        Err(e) => form_failure(e, |errors| views::profile_page(&company, &input, errors)),
    })
}

/// POST /empresa/logo (multipart `logo`)
pub async fn upload_logo<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    multipart: Multipart,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let form = match MultipartForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    let id = company_id(&identity);
    let use_case = CompanyProfileUseCase::new(state.store.clone());
    let company = use_case.get(&id).await?;

    let result = match form.file("logo") {
        Some(file) => use_case.replace_logo(&state.uploads, &id, file).await,
        None => Err(RecruitmentError::Validation(vec![
            "Selecione uma imagem.".to_string(),
        ])),
    };

    Ok(match result {
        Ok(_) => see_other("/empresa/perfil"),
        Err(e) => form_failure(e, |errors| {
            views::profile_page(&company, &CompanyEditInput::from_company(&company), errors)
        }),
    })
}

/// GET /empresa/vagas?pagina=
pub async fn jobs<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<PageQuery>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let jobs = JobPostingUseCase::new(state.store.clone())
        .list(&company_id(&identity), Pagination::new(query.page))
        .await?;
    Ok(views::jobs_page(&jobs))
}

const CREATE_TITLE: &str = "Nova Vaga";
const CREATE_ACTION: &str = "/empresa/vagas/criar";
const EDIT_TITLE: &str = "Editar Vaga";

/// GET /empresa/vagas/criar
pub async fn new_job() -> Response {
    views::job_form_page(CREATE_TITLE, CREATE_ACTION, &JobInput::default(), &[])
}

/// POST /empresa/vagas/criar
pub async fn create_job<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<JobForm>,
) -> Response
where
    S: RecruitmentStore,
{
    let input = JobInput::from(form);
    match JobPostingUseCase::new(state.store.clone())
        .create(&company_id(&identity), &input)
        .await
    {
        Ok(_) => see_other("/empresa/vagas"),
        Err(e) => form_failure(e, |errors| {
            views::job_form_page(CREATE_TITLE, CREATE_ACTION, &input, errors)
        }),
    }
}

/// GET /empresa/vagas/{id}/editar
pub async fn edit_job_page<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let job = JobPostingUseCase::new(state.store.clone())
        .owned(&company_id(&identity), &JobId::from(job_id))
        .await?;
    let action = format!("/empresa/vagas/{job_id}/editar");
    Ok(views::job_form_page(EDIT_TITLE, &action, &JobInput::from_job(&job), &[]))
}

/// POST /empresa/vagas/{id}/editar
pub async fn update_job<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
    Form(form): Form<JobForm>,
) -> Response
where
    S: RecruitmentStore,
{
    let input = JobInput::from(form);
    match JobPostingUseCase::new(state.store.clone())
        .update(&company_id(&identity), &JobId::from(job_id), &input)
        .await
    {
        Ok(_) => see_other("/empresa/vagas"),
        Err(e) => {
            let action = format!("/empresa/vagas/{job_id}/editar");
            form_failure(e, |errors| views::job_form_page(EDIT_TITLE, &action, &input, errors))
        }
    }
}

/// POST /empresa/vagas/{id}/excluir
pub async fn delete_job<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    JobPostingUseCase::new(state.store.clone())
        .delete(&company_id(&identity), &JobId::from(job_id))
        .await?;
    Ok(see_other("/empresa/vagas"))
}

/// GET /empresa/vagas/{id}/candidatos?status=
pub async fn applicants<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<ApplicantsQuery>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let status = SelectionStatus::from_code(&query.status);
    let (job, applicants) = ApplicationUseCase::new(state.store.clone())
        .applicants(&company_id(&identity), &JobId::from(job_id), status)
        .await?;
    Ok(views::applicants_page(&job, &applicants, status))
}

/// POST /empresa/vagas/{id}/selecionar (repeated `candidatura`)
pub async fn select_applicants<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let ids: Vec<JobApplicationId> = selected_applications(&pairs)
        .into_iter()
        .map(JobApplicationId::from)
        .collect();
    ApplicationUseCase::new(state.store.clone())
        .select(&company_id(&identity), &JobId::from(job_id), &ids)
        .await?;
    Ok(see_other(&format!("/empresa/vagas/{job_id}/candidatos")))
}
