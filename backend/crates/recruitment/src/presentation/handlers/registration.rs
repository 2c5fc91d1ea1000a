//! Company and candidate sign-up

use axum::extract::{Form, Multipart, State};
use axum::response::{IntoResponse, Response};

use auth::Role;
use auth::application::send_verification_mail;

use crate::application::{RegisterCandidateUseCase, RegisterCompanyUseCase};
use crate::domain::repository::RecruitmentStore;
use crate::error::RecruitmentError;
use crate::presentation::dto::{CandidateForm, CompanyForm};
use crate::presentation::handlers::{form_failure, see_other};
use crate::presentation::multipart::MultipartForm;
use crate::presentation::state::RecruitmentState;
use crate::presentation::views::registration as views;

/// GET /auth/register_empresa
pub async fn company_page() -> Response {
    views::company_page(&Default::default(), &[])
}

/// POST /auth/register_empresa
pub async fn register_company<S>(
    State(state): State<RecruitmentState<S>>,
    Form(form): Form<CompanyForm>,
) -> Response
where
    S: RecruitmentStore,
{
    let input = form.registration();
    let details = input.details.clone();
    let use_case = RegisterCompanyUseCase::new(state.store.clone(), state.auth.clone());

    match use_case.execute(input).await {
        Ok(account) => {
            send_verification_mail(&state.mailer, &state.auth, &account).await;
            see_other(Role::Company.login_path())
        }
        Err(e) => form_failure(e, |errors| views::company_page(&details, errors)),
    }
}

/// GET /auth/register_candidato
pub async fn candidate_page() -> Response {
    views::candidate_page(&Default::default(), &[])
}

/// POST /auth/register_candidato (multipart, optional `curriculo`)
pub async fn register_candidate<S>(
    State(state): State<RecruitmentState<S>>,
    multipart: Multipart,
) -> Response
where
    S: RecruitmentStore,
{
    let form = match MultipartForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };
    let fields: CandidateForm = match form.parse() {
        Ok(fields) => fields,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable registration form");
            return RecruitmentError::Validation(vec!["Formulário inválido.".to_string()])
                .into_response();
        }
    };

    let details = fields.details();
    let use_case = RegisterCandidateUseCase::new(state.store.clone(), state.auth.clone());

    match use_case
        .execute(&state.uploads, fields.registration(), form.file("curriculo"))
        .await
    {
        Ok(account) => {
            send_verification_mail(&state.mailer, &state.auth, &account).await;
            see_other(Role::Candidate.login_path())
        }
        Err(e) => form_failure(e, |errors| views::candidate_page(&details, errors)),
    }
}
