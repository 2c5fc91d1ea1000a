//! Job posting CRUD for the owning company

use std::sync::Arc;

use kernel::id::{CompanyId, JobId};

use crate::domain::entity::job::{Job, JobDetails, JobListing};
use crate::domain::repository::JobRepository;
use crate::domain::search::{JobFilter, Page, Pagination};
use crate::domain::value_object::{
    catalog::{Availability, ContractType, SalaryBand, WorkMode},
    fields::{FieldErrors, split_list},
};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;

#[derive(Debug, Clone, Default)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub role: String,
    /// Comma-separated
    pub tags: String,
    pub salary_band: String,
    pub contract_type: String,
    pub work_mode: String,
    pub schedule: String,
    pub availability: String,
}

impl JobInput {
    pub fn from_job(job: &Job) -> Self {
        let details = &job.details;
        Self {
            title: details.title.clone(),
            description: details.description.clone(),
            role: details.role.clone(),
            tags: details.tags.join(", "),
            salary_band: details.salary_band.code().to_string(),
            contract_type: details.contract_type.code().to_string(),
            work_mode: details.work_mode.code().to_string(),
            schedule: details.schedule.clone().unwrap_or_default(),
            availability: details.availability.code().to_string(),
        }
    }

    pub fn validate(&self) -> RecruitmentResult<JobDetails> {
        let mut errors = FieldErrors::new();

        let title = errors.required(&self.title, "Título é obrigatório.");
        errors.max_len(&title, MAX_TITLE_CHARS, "O título deve ter no máximo 200 caracteres.");
        let description = errors.required(&self.description, "Descrição é obrigatória.");
        errors.max_len(
            &description,
            MAX_DESCRIPTION_CHARS,
            "A descrição deve ter no máximo 5000 caracteres.",
        );
        let role = errors.required(&self.role, "Cargo é obrigatório.");
        let salary_band = errors.check(SalaryBand::parse_required(&self.salary_band));
        let contract_type = errors.check(ContractType::parse_required(&self.contract_type));
        let work_mode = errors.check(WorkMode::parse_required(&self.work_mode));
        let availability = errors.check(Availability::parse_required(&self.availability));

        match (salary_band, contract_type, work_mode, availability) {
            (Some(salary_band), Some(contract_type), Some(work_mode), Some(availability))
                if errors.is_empty() =>
            {
                Ok(JobDetails {
                    title,
                    description,
                    role,
                    tags: split_list(&self.tags),
                    salary_band,
                    contract_type,
                    work_mode,
                    schedule: FieldErrors::optional(&self.schedule),
                    availability,
                })
            }
            _ => Err(RecruitmentError::Validation(errors.into_vec())),
        }
    }
}

pub struct JobPostingUseCase<S>
where
    S: JobRepository,
{
    store: Arc<S>,
}

impl<S> JobPostingUseCase<S>
where
    S: JobRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, company_id: &CompanyId, input: &JobInput) -> RecruitmentResult<Job> {
        let details = input.validate()?;
        let job = Job::new(*company_id, details);
        self.store.create_job(&job).await?;

        tracing::info!(job_id = %job.job_id, company_id = %company_id, "Job created");
        Ok(job)
    }

    /// The job, provided `company_id` owns it
    pub async fn owned(&self, company_id: &CompanyId, job_id: &JobId) -> RecruitmentResult<Job> {
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or(RecruitmentError::JobNotFound)?;
        if !job.is_owned_by(company_id) {
            return Err(RecruitmentError::AccessDenied);
        }
        Ok(job)
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        job_id: &JobId,
        input: &JobInput,
    ) -> RecruitmentResult<Job> {
        let mut job = self.owned(company_id, job_id).await?;
        let details = input.validate()?;
        job.edit(details);
        self.store.update_job(&job).await?;

        tracing::info!(job_id = %job_id, "Job updated");
        Ok(job)
    }

    pub async fn delete(&self, company_id: &CompanyId, job_id: &JobId) -> RecruitmentResult<()> {
        self.owned(company_id, job_id).await?;
        if !self.store.delete_job(job_id).await? {
            return Err(RecruitmentError::JobNotFound);
        }

        tracing::info!(job_id = %job_id, company_id = %company_id, "Job deleted");
        Ok(())
    }

    /// The company's own postings, newest first
    pub async fn list(
        &self,
        company_id: &CompanyId,
        pagination: Pagination,
    ) -> RecruitmentResult<Page<JobListing>> {
        self.store
            .search_jobs(&JobFilter::new().posted_by(*company_id), pagination)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> JobInput {
        JobInput {
            title: "Desenvolvedor Rust".into(),
            description: "Serviços de alta disponibilidade".into(),
            role: "Backend".into(),
            tags: "rust, tokio,".into(),
            salary_band: "6000_10000".into(),
            contract_type: "clt".into(),
            work_mode: "remoto".into(),
            schedule: String::new(),
            availability: "imediata".into(),
        }
    }

    #[test]
    fn test_valid_job() {
        let details = input().validate().unwrap();
        assert_eq!(details.tags, vec!["rust", "tokio"]);
        assert_eq!(details.work_mode, WorkMode::Remote);
        assert!(details.schedule.is_none());
    }

    #[test]
    fn test_missing_fields_and_codes_are_listed() {
        let raw = JobInput {
            title: " ".into(),
            contract_type: "vitalicio".into(),
            ..input()
        };
        let errors = raw.validate().unwrap_err().form_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Título é obrigatório.");
    }

    #[test]
    fn test_edit_form_prefill_round_trips() {
        let job = Job::new(CompanyId::new(), input().validate().unwrap());
        let details = JobInput::from_job(&job).validate().unwrap();
        assert_eq!(details, job.details);
    }
}
