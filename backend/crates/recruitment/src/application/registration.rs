//! Company and candidate registration
//!
//! Account and profile are validated together and stored in one
//! transaction. Mailing the verification link is left to the caller so a
//! failed delivery never undoes a registration.

use std::sync::Arc;

use auth::application::{AuthConfig, SignUpInput, prepare_account};
use auth::domain::value_object::account_password::RawPassword;
use auth::domain::{Account, Role};
use platform::media::{UploadPolicy, UploadStore, UploadedFile};

use crate::application::candidate_profile::CandidateDetailsInput;
use crate::application::company_profile::CompanyDetailsInput;
use crate::domain::entity::{candidate::Candidate, company::Company};
use crate::domain::repository::{CandidateRepository, CompanyRepository};
use crate::domain::value_object::fields::FieldErrors;
use crate::error::{RecruitmentError, RecruitmentResult};

#[derive(Debug, Clone, Default)]
pub struct CompanyRegistrationInput {
    pub details: CompanyDetailsInput,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateRegistrationInput {
    pub details: CandidateDetailsInput,
    pub password: String,
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    errors.check(RawPassword::new(password.to_string()));
}

fn sign_up(config: &AuthConfig, role: Role, email: &str, password: String) -> RecruitmentResult<Account> {
    Ok(prepare_account(
        config,
        SignUpInput {
            role,
            email: email.to_string(),
            password,
        },
    )?)
}

pub struct RegisterCompanyUseCase<S>
where
    S: CompanyRepository,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterCompanyUseCase<S>
where
    S: CompanyRepository,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, input: CompanyRegistrationInput) -> RecruitmentResult<Account> {
        let mut errors = FieldErrors::new();
        let details = input.details.validate(&mut errors);
        check_password(&input.password, &mut errors);
        errors.finish()?;
        let details =
            details.ok_or_else(|| RecruitmentError::Internal("validated details missing".into()))?;

        let account = sign_up(&self.config, Role::Company, details.email.as_str(), input.password)?;
        let company = Company::new(account.account_id.retag(), details);
        self.store.register_company(&account, &company).await?;

        tracing::info!(
            company_id = %company.company_id,
            cnpj = %company.details.cnpj.as_str(),
            "Company registered"
        );
        Ok(account)
    }
}

pub struct RegisterCandidateUseCase<S>
where
    S: CandidateRepository,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterCandidateUseCase<S>
where
    S: CandidateRepository,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    /// Register a candidate, optionally with a résumé.
    ///
    /// The file is checked alongside the form fields and written only once
    /// everything else is valid; it is removed again if the insert fails.
    pub async fn execute(
        &self,
        uploads: &UploadStore,
        input: CandidateRegistrationInput,
        resume: Option<&UploadedFile>,
    ) -> RecruitmentResult<Account> {
        let resume = resume.filter(|file| !file.is_empty());

        let mut errors = FieldErrors::new();
        let details = input.details.validate(&mut errors);
        check_password(&input.password, &mut errors);
        if let Some(file) = resume {
            errors.check(UploadPolicy::document().validate(file).map_err(|e| e.to_string()));
        }
        errors.finish()?;
        let details =
            details.ok_or_else(|| RecruitmentError::Internal("validated details missing".into()))?;

        let account = sign_up(&self.config, Role::Candidate, details.email.as_str(), input.password)?;
        let mut candidate = Candidate::new(account.account_id.retag(), details);

        if let Some(file) = resume {
            candidate.resume_path = Some(uploads.store_document(file).await?);
        }

        if let Err(e) = self.store.register_candidate(&account, &candidate).await {
            uploads.discard(candidate.resume_path.as_deref()).await;
            return Err(e);
        }

        tracing::info!(candidate_id = %candidate.candidate_id, "Candidate registered");
        Ok(account)
    }
}
