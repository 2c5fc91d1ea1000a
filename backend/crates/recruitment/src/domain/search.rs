//! Job search: filter builder and pagination
//!
//! A [`JobFilter`] is a conjunction of typed predicates. Stores evaluate the
//! same predicate list for the total count and for the page fetch.

use kernel::id::{CandidateId, CompanyId, JobId};

use crate::domain::entity::job::Job;
use crate::domain::value_object::catalog::{Availability, ContractType, SalaryBand};

/// Fixed page size of job listings
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPredicate {
    /// Case-insensitive substring of title, description or role
    Text(String),
    SalaryBand(SalaryBand),
    ContractType(ContractType),
    Availability(Availability),
    PostedBy(CompanyId),
    NotAppliedBy(CandidateId),
}

impl JobPredicate {
    /// Evaluate against a job; `applied` answers whether a candidate applied
    pub fn matches(&self, job: &Job, applied: &dyn Fn(&CandidateId, &JobId) -> bool) -> bool {
        match self {
            JobPredicate::Text(needle) => {
                let needle = needle.to_lowercase();
                [&job.details.title, &job.details.description, &job.details.role]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            JobPredicate::SalaryBand(band) => job.details.salary_band == *band,
            JobPredicate::ContractType(contract) => job.details.contract_type == *contract,
            JobPredicate::Availability(availability) => job.details.availability == *availability,
            JobPredicate::PostedBy(company_id) => job.is_owned_by(company_id),
            JobPredicate::NotAppliedBy(candidate_id) => !applied(candidate_id, &job.job_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    predicates: Vec<JobPredicate>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank text adds nothing
    pub fn text(mut self, needle: &str) -> Self {
        let needle = needle.trim();
        if !needle.is_empty() {
            self.predicates.push(JobPredicate::Text(needle.to_string()));
        }
        self
    }

    pub fn salary_band(self, band: Option<SalaryBand>) -> Self {
        self.push_some(band.map(JobPredicate::SalaryBand))
    }

    pub fn contract_type(self, contract: Option<ContractType>) -> Self {
        self.push_some(contract.map(JobPredicate::ContractType))
    }

    pub fn availability(self, availability: Option<Availability>) -> Self {
        self.push_some(availability.map(JobPredicate::Availability))
    }

    pub fn posted_by(self, company_id: CompanyId) -> Self {
        self.push_some(Some(JobPredicate::PostedBy(company_id)))
    }

    pub fn not_applied_by(self, candidate_id: CandidateId) -> Self {
        self.push_some(Some(JobPredicate::NotAppliedBy(candidate_id)))
    }

    fn push_some(mut self, predicate: Option<JobPredicate>) -> Self {
        if let Some(p) = predicate {
            self.predicates.push(p);
        }
        self
    }

    pub fn predicates(&self) -> &[JobPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, job: &Job, applied: &dyn Fn(&CandidateId, &JobId) -> bool) -> bool {
        self.predicates.iter().all(|p| p.matches(job, applied))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Page numbers below 1 (or missing) mean the first page
    pub fn new(page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: PAGE_SIZE,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    /// At least 1, even when empty
    pub page_count: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let per_page = pagination.per_page.max(1) as u64;
        let page_count = total.div_ceil(per_page).max(1) as u32;
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            page_count,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}
