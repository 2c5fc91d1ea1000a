//! Application Layer
//!
//! Use cases of the company, candidate and admin workflows.

pub mod admin;
pub mod applications;
pub mod candidate_profile;
pub mod company_profile;
pub mod evaluations;
pub mod history;
pub mod jobs;
pub mod registration;
pub mod search;

// Re-exports
pub use admin::AdminUseCase;
pub use applications::ApplicationUseCase;
pub use candidate_profile::{CandidateDetailsInput, CandidateProfileUseCase, GoalsInput};
pub use company_profile::{CompanyDetailsInput, CompanyEditInput, CompanyProfileUseCase};
pub use evaluations::{CompanyPage, EvaluationInput, EvaluationUseCase};
pub use history::{CourseInput, ExperienceInput, HistoryUseCase};
pub use jobs::{JobInput, JobPostingUseCase};
pub use registration::{
    CandidateRegistrationInput, CompanyRegistrationInput, RegisterCandidateUseCase,
    RegisterCompanyUseCase,
};
pub use search::{JobSearchInput, JobSearchUseCase};
