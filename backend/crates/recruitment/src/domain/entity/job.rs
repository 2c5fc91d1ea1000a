//! Job posting entity

use chrono::{DateTime, Utc};
use kernel::id::{CompanyId, JobId};

use crate::domain::value_object::catalog::{Availability, ContractType, SalaryBand, WorkMode};

/// Validated posting content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub title: String,
    pub description: String,
    /// Position, e.g. "Desenvolvedor backend"
    pub role: String,
    pub tags: Vec<String>,
    pub salary_band: SalaryBand,
    pub contract_type: ContractType,
    pub work_mode: WorkMode,
    pub schedule: Option<String>,
    pub availability: Availability,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub job_id: JobId,
    pub company_id: CompanyId,
    pub details: JobDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(company_id: CompanyId, details: JobDetails) -> Self {
        let now = Utc::now();
        Self {
            job_id: JobId::new(),
            company_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, company_id: &CompanyId) -> bool {
        &self.company_id == company_id
    }

    pub fn edit(&mut self, details: JobDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }
}

/// A job with the name of the company that posted it
#[derive(Debug, Clone)]
pub struct JobListing {
    pub job: Job,
    pub company_name: String,
}
