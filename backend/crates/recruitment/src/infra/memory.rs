//! In-memory recruitment store for tests
//!
//! Mirrors the PostgreSQL constraints: one account per (role, e-mail), one
//! application per (candidate, job), one evaluation per (candidate,
//! company), and cascading deletes from accounts and jobs. It also serves
//! as the account repository so the login routes can run on top of it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use auth::domain::repository::AccountRepository;
use auth::domain::{Account, Email, Role};
use auth::{AuthError, AuthResult};
use kernel::id::{
    AccountId, CandidateId, CompanyId, CourseId, ExperienceId, JobApplicationId, JobId,
};

use crate::domain::entity::{
    application::{Applicant, CandidateApplication, JobApplication, SelectionStatus},
    candidate::Candidate,
    company::Company,
    evaluation::Evaluation,
    history::{Course, Experience},
    job::{Job, JobListing},
};
use crate::domain::repository::{
    AdminRepository, ApplicationRepository, CandidateRepository, CompanyRepository, EntityCounts,
    EvaluationRepository, HistoryRepository, JobRepository,
};
use crate::domain::search::{JobFilter, Page, Pagination};
use crate::error::{RecruitmentError, RecruitmentResult};

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    companies: HashMap<CompanyId, Company>,
    candidates: HashMap<CandidateId, Candidate>,
    /// Insertion order, oldest first
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    courses: Vec<Course>,
    experiences: Vec<Experience>,
    evaluations: Vec<Evaluation>,
}

impl State {
    fn email_taken(&self, role: Role, email: &Email, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|a| a.role == role && &a.email == email && Some(a.account_id) != except)
    }

    fn insert_account(&mut self, account: &Account) -> RecruitmentResult<()> {
        if self.email_taken(account.role, &account.email, None) {
            return Err(RecruitmentError::EmailTaken);
        }
        self.accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    fn set_account_email(&mut self, account_id: AccountId, email: &Email) -> RecruitmentResult<()> {
        let role = self
            .accounts
            .get(&account_id)
            .map(|a| a.role)
            .ok_or_else(|| RecruitmentError::Internal("profile without account".into()))?;
        if self.email_taken(role, email, Some(account_id)) {
            return Err(RecruitmentError::EmailTaken);
        }
        if let Some(account) = self.accounts.get_mut(&account_id) {
            account.email = email.clone();
        }
        Ok(())
    }

    fn listing(&self, job: &Job) -> JobListing {
        JobListing {
            job: job.clone(),
            company_name: self
                .companies
                .get(&job.company_id)
                .map(|c| c.display_name().to_string())
                .unwrap_or_default(),
        }
    }

    fn has_applied(&self, candidate_id: &CandidateId, job_id: &JobId) -> bool {
        self.applications
            .iter()
            .any(|a| &a.candidate_id == candidate_id && &a.job_id == job_id)
    }

    fn remove_jobs(&mut self, doomed: impl Fn(&Job) -> bool) {
        let removed: Vec<JobId> = self
            .jobs
            .iter()
            .filter(|j| doomed(j))
            .map(|j| j.job_id)
            .collect();
        self.jobs.retain(|j| !removed.contains(&j.job_id));
        self.applications.retain(|a| !removed.contains(&a.job_id));
    }
}

#[derive(Clone, Default)]
pub struct MemoryRecruitmentStore {
    state: Arc<Mutex<State>>,
}

impl MemoryRecruitmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    pub fn application_count(&self, candidate_id: &CandidateId, job_id: &JobId) -> usize {
        self.lock()
            .applications
            .iter()
            .filter(|a| &a.candidate_id == candidate_id && &a.job_id == job_id)
            .count()
    }

    pub fn evaluation_count(&self, candidate_id: &CandidateId, company_id: &CompanyId) -> usize {
        self.lock()
            .evaluations
            .iter()
            .filter(|e| &e.candidate_id == candidate_id && &e.company_id == company_id)
            .count()
    }

    pub fn application(&self, application_id: &JobApplicationId) -> Option<JobApplication> {
        self.lock()
            .applications
            .iter()
            .find(|a| &a.application_id == application_id)
            .cloned()
    }

    /// Mark an account verified, as following the mailed link would
    pub fn verify(&self, account_id: &AccountId) {
        if let Some(account) = self.lock().accounts.get_mut(account_id) {
            account.mark_verified();
        }
    }
}

impl AccountRepository for MemoryRecruitmentStore {
    async fn create_account(&self, account: &Account) -> AuthResult<()> {
        self.lock()
            .insert_account(account)
            .map_err(|_| AuthError::EmailTaken)
    }

    async fn find_account_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self.lock().accounts.get(account_id).cloned())
    }

    async fn find_account_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> AuthResult<Option<Account>> {
        Ok(self
            .lock()
            .accounts
            .values()
            .find(|a| a.role == role && &a.email == email)
            .cloned())
    }

    async fn update_account(&self, account: &Account) -> AuthResult<()> {
        let mut state = self.lock();
        let slot = state
            .accounts
            .get_mut(&account.account_id)
            .ok_or(AuthError::AccountNotFound)?;
        *slot = account.clone();
        Ok(())
    }
}

impl CompanyRepository for MemoryRecruitmentStore {
    async fn register_company(&self, account: &Account, company: &Company) -> RecruitmentResult<()> {
        let mut state = self.lock();
        state.insert_account(account)?;
        state.companies.insert(company.company_id, company.clone());
        Ok(())
    }

    async fn find_company(&self, company_id: &CompanyId) -> RecruitmentResult<Option<Company>> {
        Ok(self.lock().companies.get(company_id).cloned())
    }

    async fn update_company(&self, company: &Company) -> RecruitmentResult<()> {
        let mut state = self.lock();
        if !state.companies.contains_key(&company.company_id) {
            return Err(RecruitmentError::CompanyNotFound);
        }
        state.set_account_email(company.company_id.retag(), &company.details.email)?;
        state.companies.insert(company.company_id, company.clone());
        Ok(())
    }

    async fn replace_company_logo(
        &self,
        company_id: &CompanyId,
        logo_path: &str,
    ) -> RecruitmentResult<Option<String>> {
        let mut state = self.lock();
        let company = state
            .companies
            .get_mut(company_id)
            .ok_or(RecruitmentError::CompanyNotFound)?;
        Ok(company.logo_path.replace(logo_path.to_string()))
    }

    async fn list_companies(&self) -> RecruitmentResult<Vec<Company>> {
        let mut companies: Vec<Company> = self.lock().companies.values().cloned().collect();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(companies)
    }

    async fn delete_company(&self, company_id: &CompanyId) -> RecruitmentResult<Company> {
        let mut state = self.lock();
        let company = state
            .companies
            .remove(company_id)
            .ok_or(RecruitmentError::CompanyNotFound)?;
        state.accounts.remove(&company_id.retag());
        state.remove_jobs(|j| &j.company_id == company_id);
        state.evaluations.retain(|e| &e.company_id != company_id);
        Ok(company)
    }
}

impl CandidateRepository for MemoryRecruitmentStore {
    async fn register_candidate(
        &self,
        account: &Account,
        candidate: &Candidate,
    ) -> RecruitmentResult<()> {
        let mut state = self.lock();
        state.insert_account(account)?;
        state.candidates.insert(candidate.candidate_id, candidate.clone());
        Ok(())
    }

    async fn find_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Option<Candidate>> {
        Ok(self.lock().candidates.get(candidate_id).cloned())
    }

    async fn update_candidate(&self, candidate: &Candidate) -> RecruitmentResult<()> {
        let mut state = self.lock();
        if !state.candidates.contains_key(&candidate.candidate_id) {
            return Err(RecruitmentError::CandidateNotFound);
        }
        state.set_account_email(candidate.candidate_id.retag(), &candidate.details.email)?;
        state.candidates.insert(candidate.candidate_id, candidate.clone());
        Ok(())
    }

    async fn replace_candidate_resume(
        &self,
        candidate_id: &CandidateId,
        resume_path: &str,
    ) -> RecruitmentResult<Option<String>> {
        let mut state = self.lock();
        let candidate = state
            .candidates
            .get_mut(candidate_id)
            .ok_or(RecruitmentError::CandidateNotFound)?;
        Ok(candidate.resume_path.replace(resume_path.to_string()))
    }

    async fn list_candidates(&self) -> RecruitmentResult<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = self.lock().candidates.values().cloned().collect();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(candidates)
    }

    async fn delete_candidate(&self, candidate_id: &CandidateId) -> RecruitmentResult<Candidate> {
        let mut state = self.lock();
        let candidate = state
            .candidates
            .remove(candidate_id)
            .ok_or(RecruitmentError::CandidateNotFound)?;
        state.accounts.remove(&candidate_id.retag());
        state.applications.retain(|a| &a.candidate_id != candidate_id);
        state.courses.retain(|c| &c.candidate_id != candidate_id);
        state.experiences.retain(|e| &e.candidate_id != candidate_id);
        state.evaluations.retain(|e| &e.candidate_id != candidate_id);
        Ok(candidate)
    }
}

impl JobRepository for MemoryRecruitmentStore {
    async fn create_job(&self, job: &Job) -> RecruitmentResult<()> {
        self.lock().jobs.push(job.clone());
        Ok(())
    }

    async fn find_job(&self, job_id: &JobId) -> RecruitmentResult<Option<Job>> {
        Ok(self.lock().jobs.iter().find(|j| &j.job_id == job_id).cloned())
    }

    async fn update_job(&self, job: &Job) -> RecruitmentResult<()> {
        let mut state = self.lock();
        let slot = state
            .jobs
            .iter_mut()
            .find(|j| j.job_id == job.job_id)
            .ok_or(RecruitmentError::JobNotFound)?;
        *slot = job.clone();
        Ok(())
    }

    async fn delete_job(&self, job_id: &JobId) -> RecruitmentResult<bool> {
        let mut state = self.lock();
        let existed = state.jobs.iter().any(|j| &j.job_id == job_id);
        state.remove_jobs(|j| &j.job_id == job_id);
        Ok(existed)
    }

    async fn search_jobs(
        &self,
        filter: &JobFilter,
        pagination: Pagination,
    ) -> RecruitmentResult<Page<JobListing>> {
        let state = self.lock();
        let applied = |candidate_id: &CandidateId, job_id: &JobId| state.has_applied(candidate_id, job_id);

        let matching: Vec<&Job> = state
            .jobs
            .iter()
            .rev()
            .filter(|job| filter.matches(job, &applied))
            .collect();
        let items = matching
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|job| state.listing(job))
            .collect();

        Ok(Page::new(items, matching.len() as u64, pagination))
    }

    async fn list_jobs(&self) -> RecruitmentResult<Vec<JobListing>> {
        let state = self.lock();
        Ok(state.jobs.iter().rev().map(|j| state.listing(j)).collect())
    }
}

impl ApplicationRepository for MemoryRecruitmentStore {
    async fn create_application(&self, application: &JobApplication) -> RecruitmentResult<()> {
        let mut state = self.lock();
        if state.has_applied(&application.candidate_id, &application.job_id) {
            return Err(RecruitmentError::AlreadyApplied);
        }
        state.applications.push(application.clone());
        Ok(())
    }

    async fn list_applicants(
        &self,
        job_id: &JobId,
        status: SelectionStatus,
    ) -> RecruitmentResult<Vec<Applicant>> {
        let state = self.lock();
        Ok(state
            .applications
            .iter()
            .filter(|a| &a.job_id == job_id && status.admits(a.selected))
            .filter_map(|a| {
                state.candidates.get(&a.candidate_id).map(|candidate| Applicant {
                    application: a.clone(),
                    candidate: candidate.clone(),
                })
            })
            .collect())
    }

    async fn select_applications(
        &self,
        job_id: &JobId,
        application_ids: &[JobApplicationId],
    ) -> RecruitmentResult<u64> {
        let mut state = self.lock();
        let mut changed = 0;
        for application in state.applications.iter_mut().filter(|a| {
            &a.job_id == job_id && !a.selected && application_ids.contains(&a.application_id)
        }) {
            application.selected = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn list_candidate_applications(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<CandidateApplication>> {
        let state = self.lock();
        Ok(state
            .applications
            .iter()
            .rev()
            .filter(|a| &a.candidate_id == candidate_id)
            .filter_map(|a| {
                state
                    .jobs
                    .iter()
                    .find(|j| j.job_id == a.job_id)
                    .map(|job| CandidateApplication {
                        application: a.clone(),
                        listing: state.listing(job),
                    })
            })
            .collect())
    }

    async fn has_selected_application(
        &self,
        candidate_id: &CandidateId,
        company_id: &CompanyId,
    ) -> RecruitmentResult<bool> {
        let state = self.lock();
        Ok(state.applications.iter().any(|a| {
            &a.candidate_id == candidate_id
                && a.selected
                && state
                    .jobs
                    .iter()
                    .any(|j| j.job_id == a.job_id && &j.company_id == company_id)
        }))
    }
}

impl HistoryRepository for MemoryRecruitmentStore {
    async fn create_course(&self, course: &Course) -> RecruitmentResult<()> {
        self.lock().courses.push(course.clone());
        Ok(())
    }

    async fn find_course(&self, course_id: &CourseId) -> RecruitmentResult<Option<Course>> {
        Ok(self
            .lock()
            .courses
            .iter()
            .find(|c| &c.course_id == course_id)
            .cloned())
    }

    async fn update_course(&self, course: &Course) -> RecruitmentResult<()> {
        let mut state = self.lock();
        let slot = state
            .courses
            .iter_mut()
            .find(|c| c.course_id == course.course_id)
            .ok_or(RecruitmentError::CourseNotFound)?;
        *slot = course.clone();
        Ok(())
    }

    async fn delete_course(&self, course_id: &CourseId) -> RecruitmentResult<()> {
        let mut state = self.lock();
        let before = state.courses.len();
        state.courses.retain(|c| &c.course_id != course_id);
        if state.courses.len() == before {
            return Err(RecruitmentError::CourseNotFound);
        }
        Ok(())
    }

    async fn list_courses(&self, candidate_id: &CandidateId) -> RecruitmentResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .lock()
            .courses
            .iter()
            .filter(|c| &c.candidate_id == candidate_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.details.period.started_on.cmp(&a.details.period.started_on));
        Ok(courses)
    }

    async fn create_experience(&self, experience: &Experience) -> RecruitmentResult<()> {
        self.lock().experiences.push(experience.clone());
        Ok(())
    }

    async fn find_experience(
        &self,
        experience_id: &ExperienceId,
    ) -> RecruitmentResult<Option<Experience>> {
        Ok(self
            .lock()
            .experiences
            .iter()
            .find(|e| &e.experience_id == experience_id)
            .cloned())
    }

    async fn update_experience(&self, experience: &Experience) -> RecruitmentResult<()> {
        let mut state = self.lock();
        let slot = state
            .experiences
            .iter_mut()
            .find(|e| e.experience_id == experience.experience_id)
            .ok_or(RecruitmentError::ExperienceNotFound)?;
        *slot = experience.clone();
        Ok(())
    }

    async fn delete_experience(&self, experience_id: &ExperienceId) -> RecruitmentResult<()> {
        let mut state = self.lock();
        let before = state.experiences.len();
        state.experiences.retain(|e| &e.experience_id != experience_id);
        if state.experiences.len() == before {
            return Err(RecruitmentError::ExperienceNotFound);
        }
        Ok(())
    }

    async fn list_experiences(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<Experience>> {
        let mut experiences: Vec<Experience> = self
            .lock()
            .experiences
            .iter()
            .filter(|e| &e.candidate_id == candidate_id)
            .cloned()
            .collect();
        experiences.sort_by(|a, b| b.details.period.started_on.cmp(&a.details.period.started_on));
        Ok(experiences)
    }
}

impl EvaluationRepository for MemoryRecruitmentStore {
    async fn create_evaluation(&self, evaluation: &Evaluation) -> RecruitmentResult<()> {
        let mut state = self.lock();
        if state
            .evaluations
            .iter()
            .any(|e| e.candidate_id == evaluation.candidate_id && e.company_id == evaluation.company_id)
        {
            return Err(RecruitmentError::AlreadyEvaluated);
        }
        state.evaluations.push(evaluation.clone());
        Ok(())
    }

    async fn list_company_evaluations(
        &self,
        company_id: &CompanyId,
    ) -> RecruitmentResult<Vec<Evaluation>> {
        Ok(self
            .lock()
            .evaluations
            .iter()
            .rev()
            .filter(|e| &e.company_id == company_id)
            .cloned()
            .collect())
    }
}

impl AdminRepository for MemoryRecruitmentStore {
    async fn entity_counts(&self) -> RecruitmentResult<EntityCounts> {
        let state = self.lock();
        Ok(EntityCounts {
            companies: state.companies.len() as u64,
            candidates: state.candidates.len() as u64,
            jobs: state.jobs.len() as u64,
            applications: state.applications.len() as u64,
        })
    }
}
