//! Administration: counts, listings and cascading deletes

use std::sync::Arc;

use kernel::id::{CandidateId, CompanyId, JobId};
use platform::media::UploadStore;

use crate::domain::entity::{candidate::Candidate, company::Company, job::JobListing};
use crate::domain::repository::{
    AdminRepository, CandidateRepository, CompanyRepository, EntityCounts, JobRepository,
};
use crate::error::{RecruitmentError, RecruitmentResult};

pub struct AdminUseCase<S>
where
    S: CompanyRepository + CandidateRepository + JobRepository + AdminRepository,
{
    store: Arc<S>,
}

impl<S> AdminUseCase<S>
where
    S: CompanyRepository + CandidateRepository + JobRepository + AdminRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn counts(&self) -> RecruitmentResult<EntityCounts> {
        self.store.entity_counts().await
    }

    pub async fn companies(&self) -> RecruitmentResult<Vec<Company>> {
        self.store.list_companies().await
    }

    pub async fn candidates(&self) -> RecruitmentResult<Vec<Candidate>> {
        self.store.list_candidates().await
    }

    pub async fn jobs(&self) -> RecruitmentResult<Vec<JobListing>> {
        self.store.list_jobs().await
    }

    /// Delete the company with everything it owns; the logo goes after commit
    pub async fn delete_company(
        &self,
        uploads: &UploadStore,
        company_id: &CompanyId,
    ) -> RecruitmentResult<()> {
        let company = self.store.delete_company(company_id).await?;
        uploads.discard(company.logo_path.as_deref()).await;

        tracing::warn!(company_id = %company_id, "Company deleted by administrator");
        Ok(())
    }

    /// Delete the candidate with everything they own; the résumé goes after commit
    pub async fn delete_candidate(
        &self,
        uploads: &UploadStore,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<()> {
        let candidate = self.store.delete_candidate(candidate_id).await?;
        uploads.discard(candidate.resume_path.as_deref()).await;

        tracing::warn!(candidate_id = %candidate_id, "Candidate deleted by administrator");
        Ok(())
    }

    pub async fn delete_job(&self, job_id: &JobId) -> RecruitmentResult<()> {
        if !self.store.delete_job(job_id).await? {
            return Err(RecruitmentError::JobNotFound);
        }

        tracing::warn!(job_id = %job_id, "Job deleted by administrator");
        Ok(())
    }
}
