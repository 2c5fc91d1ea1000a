//! Candidate entity

use auth::domain::Email;
use chrono::{DateTime, Utc};
use kernel::id::CandidateId;

use crate::domain::value_object::{
    address::Address,
    catalog::{Availability, ContractType, SalaryBand},
    document::Cpf,
};

/// Validated personal data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDetails {
    pub full_name: String,
    pub cpf: Cpf,
    pub phone: String,
    pub email: Email,
    pub address: Address,
}

/// What the candidate is looking for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateGoals {
    pub desired_contract: Option<ContractType>,
    pub occupation: Option<String>,
    pub salary_band: Option<SalaryBand>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    /// Same UUID as the owning account
    pub candidate_id: CandidateId,
    pub details: CandidateDetails,
    /// Public path of the résumé
    pub resume_path: Option<String>,
    pub goals: CandidateGoals,
    pub languages: Vec<String>,
    pub education: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn new(candidate_id: CandidateId, details: CandidateDetails) -> Self {
        let now = Utc::now();
        Self {
            candidate_id,
            details,
            resume_path: None,
            goals: CandidateGoals::default(),
            languages: Vec::new(),
            education: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn edit(&mut self, details: CandidateDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }

    pub fn set_goals(&mut self, goals: CandidateGoals, languages: Vec<String>, education: Vec<String>) {
        self.goals = goals;
        self.languages = languages;
        self.education = education;
        self.updated_at = Utc::now();
    }
}
