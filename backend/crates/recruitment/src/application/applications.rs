//! Apply and select
//!
//! Applying and selecting rely on store-level uniqueness and ownership
//! checks made before any row changes.

use std::sync::Arc;

use kernel::id::{CandidateId, CompanyId, JobApplicationId, JobId};

use crate::domain::entity::{
    application::{Applicant, CandidateApplication, JobApplication, SelectionStatus},
    job::Job,
};
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::error::{RecruitmentError, RecruitmentResult};

pub struct ApplicationUseCase<S>
where
    S: JobRepository + ApplicationRepository,
{
    store: Arc<S>,
}

impl<S> ApplicationUseCase<S>
where
    S: JobRepository + ApplicationRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn apply(
        &self,
        candidate_id: &CandidateId,
        job_id: &JobId,
    ) -> RecruitmentResult<JobApplication> {
        if self.store.find_job(job_id).await?.is_none() {
            return Err(RecruitmentError::JobNotFound);
        }

        let application = JobApplication::new(*candidate_id, *job_id);
        self.store.create_application(&application).await?;

        tracing::info!(
            application_id = %application.application_id,
            candidate_id = %candidate_id,
            job_id = %job_id,
            "Application created"
        );
        Ok(application)
    }

    async fn owned_job(&self, company_id: &CompanyId, job_id: &JobId) -> RecruitmentResult<Job> {
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

    pub async fn applicants(
        &self,
        company_id: &CompanyId,
        job_id: &JobId,
        status: SelectionStatus,
    ) -> RecruitmentResult<(Job, Vec<Applicant>)> {
        let job = self.owned_job(company_id, job_id).await?;
        let applicants = self.store.list_applicants(job_id, status).await?;
        Ok((job, applicants))
    }

    /// Mark applications of an owned job as selected.
    ///
    /// Ownership is checked before anything changes; ids that belong to
    /// other jobs are ignored.
    pub async fn select(
        &self,
        company_id: &CompanyId,
        job_id: &JobId,
        application_ids: &[JobApplicationId],
    ) -> RecruitmentResult<u64> {
        self.owned_job(company_id, job_id).await?;
        if application_ids.is_empty() {
            return Err(RecruitmentError::Validation(vec![
                "Selecione pelo menos um candidato.".to_string(),
            ]));
        }

        let changed = self.store.select_applications(job_id, application_ids).await?;
        tracing::info!(job_id = %job_id, selected = changed, "Applicants selected");
        Ok(changed)
    }

    pub async fn of_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<CandidateApplication>> {
        self.store.list_candidate_applications(candidate_id).await
    }
}
