//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use auth::domain::Account;
use kernel::id::{
    CandidateId, CompanyId, CourseId, ExperienceId, JobApplicationId, JobId,
};

use crate::domain::entity::{
    application::{Applicant, CandidateApplication, JobApplication, SelectionStatus},
    candidate::Candidate,
    company::Company,
    evaluation::Evaluation,
    history::{Course, Experience},
    job::{Job, JobListing},
};
use crate::domain::search::{JobFilter, Page, Pagination};
use crate::error::RecruitmentResult;

#[trait_variant::make(CompanyRepository: Send)]
pub trait LocalCompanyRepository {
    /// Insert account and profile atomically (`EmailTaken` on duplicate)
    async fn register_company(&self, account: &Account, company: &Company) -> RecruitmentResult<()>;

    async fn find_company(&self, company_id: &CompanyId) -> RecruitmentResult<Option<Company>>;

    /// Save profile fields; the login e-mail follows `details.email`
    async fn update_company(&self, company: &Company) -> RecruitmentResult<()>;

    /// Point the company at a new logo; returns the previous path
    async fn replace_company_logo(
        &self,
        company_id: &CompanyId,
        logo_path: &str,
    ) -> RecruitmentResult<Option<String>>;

    async fn list_companies(&self) -> RecruitmentResult<Vec<Company>>;

    /// Remove account, profile, jobs, applications and evaluations; returns
    /// the removed profile
    async fn delete_company(&self, company_id: &CompanyId) -> RecruitmentResult<Company>;
}

#[trait_variant::make(CandidateRepository: Send)]
pub trait LocalCandidateRepository {
    /// Insert account and profile atomically (`EmailTaken` on duplicate)
    async fn register_candidate(
        &self,
        account: &Account,
        candidate: &Candidate,
    ) -> RecruitmentResult<()>;

    async fn find_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Option<Candidate>>;

    /// Save personal data and goals; the login e-mail follows `details.email`
    async fn update_candidate(&self, candidate: &Candidate) -> RecruitmentResult<()>;

    /// Point the candidate at a new résumé; returns the previous path
    async fn replace_candidate_resume(
        &self,
        candidate_id: &CandidateId,
        resume_path: &str,
    ) -> RecruitmentResult<Option<String>>;

    async fn list_candidates(&self) -> RecruitmentResult<Vec<Candidate>>;

    /// Remove account, profile and everything the candidate owns; returns
    /// the removed profile
    async fn delete_candidate(&self, candidate_id: &CandidateId) -> RecruitmentResult<Candidate>;
}

#[trait_variant::make(JobRepository: Send)]
pub trait LocalJobRepository {
    async fn create_job(&self, job: &Job) -> RecruitmentResult<()>;

    async fn find_job(&self, job_id: &JobId) -> RecruitmentResult<Option<Job>>;

    async fn update_job(&self, job: &Job) -> RecruitmentResult<()>;

    /// Remove a job and its applications; `false` when it did not exist
    async fn delete_job(&self, job_id: &JobId) -> RecruitmentResult<bool>;

    /// Newest first; count and page use the same predicates
    async fn search_jobs(
        &self,
        filter: &JobFilter,
        pagination: Pagination,
    ) -> RecruitmentResult<Page<JobListing>>;

    /// Every job, newest first
    async fn list_jobs(&self) -> RecruitmentResult<Vec<JobListing>>;
}

#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    /// `AlreadyApplied` when the pair exists
    async fn create_application(&self, application: &JobApplication) -> RecruitmentResult<()>;

    async fn list_applicants(
        &self,
        job_id: &JobId,
        status: SelectionStatus,
    ) -> RecruitmentResult<Vec<Applicant>>;

    /// Mark applications of `job_id` selected; ids of other jobs are ignored.
    /// Returns how many rows changed.
    async fn select_applications(
        &self,
        job_id: &JobId,
        application_ids: &[JobApplicationId],
    ) -> RecruitmentResult<u64>;

    async fn list_candidate_applications(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<CandidateApplication>>;

    /// Whether the candidate was selected for any job of the company
    async fn has_selected_application(
        &self,
        candidate_id: &CandidateId,
        company_id: &CompanyId,
    ) -> RecruitmentResult<bool>;
}

#[trait_variant::make(HistoryRepository: Send)]
pub trait LocalHistoryRepository {
    async fn create_course(&self, course: &Course) -> RecruitmentResult<()>;
    async fn find_course(&self, course_id: &CourseId) -> RecruitmentResult<Option<Course>>;
    async fn update_course(&self, course: &Course) -> RecruitmentResult<()>;
    async fn delete_course(&self, course_id: &CourseId) -> RecruitmentResult<()>;
    async fn list_courses(&self, candidate_id: &CandidateId) -> RecruitmentResult<Vec<Course>>;

    async fn create_experience(&self, experience: &Experience) -> RecruitmentResult<()>;
    async fn find_experience(
        &self,
        experience_id: &ExperienceId,
    ) -> RecruitmentResult<Option<Experience>>;
    async fn update_experience(&self, experience: &Experience) -> RecruitmentResult<()>;
    async fn delete_experience(&self, experience_id: &ExperienceId) -> RecruitmentResult<()>;
    async fn list_experiences(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<Experience>>;
}

#[trait_variant::make(EvaluationRepository: Send)]
pub trait LocalEvaluationRepository {
    /// `AlreadyEvaluated` when the pair exists
    async fn create_evaluation(&self, evaluation: &Evaluation) -> RecruitmentResult<()>;

    /// Newest first
    async fn list_company_evaluations(
        &self,
        company_id: &CompanyId,
    ) -> RecruitmentResult<Vec<Evaluation>>;
}

/// Row counts for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub companies: u64,
    pub candidates: u64,
    pub jobs: u64,
    pub applications: u64,
}

#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    async fn entity_counts(&self) -> RecruitmentResult<EntityCounts>;
}

/// Everything the recruitment handlers need from one store handle
pub trait RecruitmentStore:
    CompanyRepository
    + CandidateRepository
    + JobRepository
    + ApplicationRepository
    + HistoryRepository
    + EvaluationRepository
    + AdminRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> RecruitmentStore for T where
    T: CompanyRepository
        + CandidateRepository
        + JobRepository
        + ApplicationRepository
        + HistoryRepository
        + EvaluationRepository
        + AdminRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
