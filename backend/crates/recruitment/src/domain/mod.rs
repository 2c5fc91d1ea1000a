//! Domain Layer
//!
//! Profiles, postings, applications and evaluations; repository traits;
//! the job search filter.

pub mod entity;
pub mod repository;
pub mod search;
pub mod value_object;

// Re-exports
pub use entity::{
    application::{Applicant, CandidateApplication, JobApplication, SelectionStatus},
    candidate::{Candidate, CandidateDetails, CandidateGoals},
    company::{Company, CompanyDetails, CompanyProfile},
    evaluation::Evaluation,
    history::{Course, CourseDetails, Experience, ExperienceDetails},
    job::{Job, JobDetails, JobListing},
};
pub use repository::RecruitmentStore;
pub use search::{JobFilter, JobPredicate, Page, Pagination};
