//! Job search for candidates

use std::sync::Arc;

use kernel::id::CandidateId;

use crate::domain::entity::job::JobListing;
use crate::domain::repository::JobRepository;
use crate::domain::search::{JobFilter, Page, Pagination};
use crate::domain::value_object::{
    catalog::{Availability, ContractType, SalaryBand},
    fields::FieldErrors,
};
use crate::error::RecruitmentResult;

/// Search form as submitted; facets carry catalog codes, blank means "any"
#[derive(Debug, Clone, Default)]
pub struct JobSearchInput {
    pub text: String,
    pub salary_band: String,
    pub contract_type: String,
    pub availability: String,
    pub page: Option<u32>,
}

impl JobSearchInput {
    /// Conjunction of the requested predicates
    pub fn filter(&self) -> RecruitmentResult<JobFilter> {
        let mut errors = FieldErrors::new();
        let salary_band = errors.check(SalaryBand::parse_optional(&self.salary_band));
        let contract_type = errors.check(ContractType::parse_optional(&self.contract_type));
        let availability = errors.check(Availability::parse_optional(&self.availability));
        errors.finish()?;

        Ok(JobFilter::new()
            .text(&self.text)
            .salary_band(salary_band.flatten())
            .contract_type(contract_type.flatten())
            .availability(availability.flatten()))
    }
}

pub struct JobSearchUseCase<S>
where
    S: JobRepository,
{
    store: Arc<S>,
}

impl<S> JobSearchUseCase<S>
where
    S: JobRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Jobs matching the search that the candidate has not applied to yet
    pub async fn available(
        &self,
        candidate_id: &CandidateId,
        input: &JobSearchInput,
    ) -> RecruitmentResult<Page<JobListing>> {
        let filter = input.filter()?.not_applied_by(*candidate_id);
        let page = self
            .store
            .search_jobs(&filter, Pagination::new(input.page))
            .await?;

        tracing::debug!(
            candidate_id = %candidate_id,
            predicates = filter.predicates().len(),
            total = page.total,
            "Job search"
        );
        Ok(page)
    }
}
