//! Candidate area (`/candidato`)

use axum::extract::{Extension, Form, Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use auth::Identity;
use kernel::id::{CandidateId, CourseId, ExperienceId, JobId};

use crate::application::{
    ApplicationUseCase, CandidateDetailsInput, CandidateProfileUseCase, CourseInput,
    EvaluationInput, EvaluationUseCase, ExperienceInput, GoalsInput, HistoryUseCase,
    JobSearchInput, JobSearchUseCase,
};
use crate::domain::entity::candidate::Candidate;
use crate::domain::repository::RecruitmentStore;
use crate::error::{RecruitmentError, RecruitmentResult};
use crate::presentation::dto::{
    ApplyForm, CandidateForm, CourseForm, EvaluationForm, ExperienceForm, GoalsForm,
    JobSearchQuery,
};
use crate::presentation::handlers::{form_failure, see_other};
use crate::presentation::multipart::MultipartForm;
use crate::presentation::state::RecruitmentState;
use crate::presentation::views::candidate as views;

fn candidate_id(identity: &Identity) -> CandidateId {
    identity.account_id.retag()
}

fn profile_with_errors(
    candidate: &Candidate,
    details: Option<&CandidateDetailsInput>,
    goals: Option<&GoalsInput>,
    errors: &[String],
) -> Response {
    let details = details
        .cloned()
        .unwrap_or_else(|| CandidateDetailsInput::from_details(&candidate.details));
    let goals = goals
        .cloned()
        .unwrap_or_else(|| GoalsInput::from_candidate(candidate));
    views::profile_page(candidate, &details, &goals, errors)
}

/// GET /candidato/dashboard
pub async fn dashboard<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let candidate = CandidateProfileUseCase::new(state.store.clone()).get(&id).await?;
    let applications = ApplicationUseCase::new(state.store.clone())
        .of_candidate(&id)
        .await?;
    let jobs = JobSearchUseCase::new(state.store.clone())
        .available(&id, &JobSearchInput::default())
        .await?;
    Ok(views::dashboard(&candidate, &applications, &jobs))
}

/// GET /candidato/perfil
pub async fn profile<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let candidate = CandidateProfileUseCase::new(state.store.clone())
        .get(&candidate_id(&identity))
        .await?;
    Ok(profile_with_errors(&candidate, None, None, &[]))
}

/// POST /candidato/editar
pub async fn edit_profile<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<CandidateForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let use_case = CandidateProfileUseCase::new(state.store.clone());
    let candidate = use_case.get(&id).await?;
    let input = form.details();

    Ok(match use_case.edit(&id, &input).await {
        Ok(_) => see_other("/candidato/perfil"),
        Err(e) => form_failure(e, |errors| {
            profile_with_errors(&candidate, Some(&input), None, errors)
        }),
    })
}

/// POST /candidato/metas
pub async fn set_goals<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<GoalsForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let use_case = CandidateProfileUseCase::new(state.store.clone());
    let candidate = use_case.get(&id).await?;
    let input = GoalsInput::from(form);

    Ok(match use_case.set_goals(&id, &input).await {
        Ok(_) => see_other("/candidato/perfil"),
        Err(e) => form_failure(e, |errors| {
            profile_with_errors(&candidate, None, Some(&input), errors)
        }),
    })
}

/// POST /candidato/curriculo (multipart `curriculo`)
pub async fn upload_resume<S>(
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

    let id = candidate_id(&identity);
    let use_case = CandidateProfileUseCase::new(state.store.clone());
    let candidate = use_case.get(&id).await?;

    let result = match form.file("curriculo") {
        Some(file) => use_case.replace_resume(&state.uploads, &id, file).await,
        None => Err(RecruitmentError::Validation(vec![
            "Selecione um arquivo.".to_string(),
        ])),
    };

    Ok(match result {
        Ok(_) => see_other("/candidato/perfil"),
        Err(e) => form_failure(e, |errors| profile_with_errors(&candidate, None, None, errors)),
    })
}

// ============================================================================
// Search and applications
// ============================================================================

/// GET /candidato/vagas?q=&salario=&contrato=&disponibilidade=&pagina=
pub async fn search<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<JobSearchQuery>,
) -> Response
where
    S: RecruitmentStore,
{
    let input = JobSearchInput::from(query);
    match JobSearchUseCase::new(state.store.clone())
        .available(&candidate_id(&identity), &input)
        .await
    {
        Ok(page) => views::search_page(&input, Some(&page), &[]),
        Err(e) => form_failure(e, |errors| views::search_page(&input, None, errors)),
    }
}

/// POST /candidato/candidatar (`vagaId`)
pub async fn apply<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<ApplyForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let job_id = form.job_id().ok_or(RecruitmentError::JobNotFound)?;
    ApplicationUseCase::new(state.store.clone())
        .apply(&candidate_id(&identity), &JobId::from(job_id))
        .await?;
    Ok(see_other("/candidato/candidaturas"))
}

/// GET /candidato/candidaturas
pub async fn applications<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let applications = ApplicationUseCase::new(state.store.clone())
        .of_candidate(&candidate_id(&identity))
        .await?;
    Ok(views::applications_page(&applications))
}

/// POST /candidato/avaliar (`empresaId`, `nota`, `comentario`)
pub async fn evaluate<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<EvaluationForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let input = EvaluationInput::from(form);
    let evaluation = EvaluationUseCase::new(state.store.clone())
        .evaluate(&candidate_id(&identity), &input)
        .await?;
    Ok(see_other(&format!("/empresas/{}", evaluation.company_id)))
}

// ============================================================================
// Courses
// ============================================================================

async fn render_courses<S>(
    state: &RecruitmentState<S>,
    candidate_id: &CandidateId,
    input: &CourseInput,
    errors: &[String],
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let courses = HistoryUseCase::new(state.store.clone())
        .courses(candidate_id)
        .await?;
    Ok(views::courses_page(&courses, input, errors))
}

/// GET /candidato/cursos
pub async fn courses<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    render_courses(&state, &candidate_id(&identity), &CourseInput::default(), &[]).await
}

/// POST /candidato/cursos
pub async fn add_course<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<CourseForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let input = CourseInput::from(form);
    match HistoryUseCase::new(state.store.clone()).add_course(&id, &input).await {
        Ok(_) => Ok(see_other("/candidato/cursos")),
        Err(e) => course_failure(&state, &id, &input, e).await,
    }
}

/// POST /candidato/cursos/{id}/editar
pub async fn edit_course<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(course_id): Path<Uuid>,
    Form(form): Form<CourseForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let input = CourseInput::from(form);
    match HistoryUseCase::new(state.store.clone())
        .edit_course(&id, &CourseId::from(course_id), &input)
        .await
    {
        Ok(_) => Ok(see_other("/candidato/cursos")),
        Err(e) => course_failure(&state, &id, &input, e).await,
    }
}

async fn course_failure<S>(
    state: &RecruitmentState<S>,
    candidate_id: &CandidateId,
    input: &CourseInput,
    e: RecruitmentError,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let Some(errors) = e.form_errors() else {
        return Err(e);
    };
    e.log();
    render_courses(state, candidate_id, input, &errors).await
}

/// POST /candidato/cursos/{id}/excluir
pub async fn delete_course<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(course_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    HistoryUseCase::new(state.store.clone())
        .delete_course(&candidate_id(&identity), &CourseId::from(course_id))
        .await?;
    Ok(see_other("/candidato/cursos"))
}

// ============================================================================
// Experiences
// ============================================================================

async fn render_experiences<S>(
    state: &RecruitmentState<S>,
    candidate_id: &CandidateId,
    input: &ExperienceInput,
    errors: &[String],
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let experiences = HistoryUseCase::new(state.store.clone())
        .experiences(candidate_id)
        .await?;
    Ok(views::experiences_page(&experiences, input, errors))
}

async fn experience_failure<S>(
    state: &RecruitmentState<S>,
    candidate_id: &CandidateId,
    input: &ExperienceInput,
    e: RecruitmentError,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let Some(errors) = e.form_errors() else {
        return Err(e);
    };
    e.log();
    render_experiences(state, candidate_id, input, &errors).await
}

/// GET /candidato/experiencias
pub async fn experiences<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    render_experiences(&state, &candidate_id(&identity), &ExperienceInput::default(), &[]).await
}

/// POST /candidato/experiencias
pub async fn add_experience<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<ExperienceForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let input = ExperienceInput::from(form);
    match HistoryUseCase::new(state.store.clone())
        .add_experience(&id, &input)
        .await
    {
        Ok(_) => Ok(see_other("/candidato/experiencias")),
        Err(e) => experience_failure(&state, &id, &input, e).await,
    }
}

/// POST /candidato/experiencias/{id}/editar
pub async fn edit_experience<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(experience_id): Path<Uuid>,
    Form(form): Form<ExperienceForm>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    let id = candidate_id(&identity);
    let input = ExperienceInput::from(form);
    match HistoryUseCase::new(state.store.clone())
        .edit_experience(&id, &ExperienceId::from(experience_id), &input)
        .await
    {
        Ok(_) => Ok(see_other("/candidato/experiencias")),
        Err(e) => experience_failure(&state, &id, &input, e).await,
    }
}

/// POST /candidato/experiencias/{id}/excluir
pub async fn delete_experience<S>(
    State(state): State<RecruitmentState<S>>,
    Extension(identity): Extension<Identity>,
    Path(experience_id): Path<Uuid>,
) -> RecruitmentResult<Response>
where
    S: RecruitmentStore,
{
    HistoryUseCase::new(state.store.clone())
        .delete_experience(&candidate_id(&identity), &ExperienceId::from(experience_id))
        .await?;
    Ok(see_other("/candidato/experiencias"))
}
