//! PostgreSQL Repository Implementation
//!
//! Profiles share the primary key of their account, and every owned row
//! hangs off its owner with `ON DELETE CASCADE`, so deleting an account
//! removes everything below it in one statement.

use auth::domain::{Account, Email};
use auth::infra::postgres::{insert_account, update_account_email};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    CandidateId, CompanyId, CourseId, EvaluationId, ExperienceId, JobApplicationId, JobId,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    application::{Applicant, CandidateApplication, JobApplication, SelectionStatus},
    candidate::{Candidate, CandidateDetails, CandidateGoals},
    company::{Company, CompanyDetails, CompanyProfile},
    evaluation::Evaluation,
    history::{Course, CourseDetails, Experience, ExperienceDetails},
    job::{Job, JobDetails, JobListing},
};
use crate::domain::repository::{
    AdminRepository, ApplicationRepository, CandidateRepository, CompanyRepository, EntityCounts,
    EvaluationRepository, HistoryRepository, JobRepository,
};
use crate::domain::search::{JobFilter, JobPredicate, Page, Pagination};
use crate::domain::value_object::{
    address::Address,
    catalog::{Availability, ContractType, SalaryBand, WorkMode},
    document::{Cnpj, Cpf},
    period::Period,
    rating::Rating,
};
use crate::error::{RecruitmentError, RecruitmentResult};

/// PostgreSQL-backed recruitment store
#[derive(Clone)]
pub struct PgRecruitmentRepository {
    pool: PgPool,
}

impl PgRecruitmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const COMPANY_SELECT: &str = r#"
    SELECT
        c.company_id,
        a.email,
        c.cnpj,
        c.legal_name,
        c.trade_name,
        c.state_registration,
        c.postal_code,
        c.street,
        c.number,
        c.district,
        c.city,
        c.state,
        c.complement,
        c.phone,
        c.whatsapp,
        c.contact_person,
        c.bio,
        c.website,
        c.linkedin,
        c.instagram,
        c.logo_path,
        c.created_at,
        c.updated_at
    FROM companies c
    JOIN accounts a ON a.account_id = c.company_id
"#;

const CANDIDATE_COLUMNS: &str = r#"
        c.candidate_id,
        a.email,
        c.full_name,
        c.cpf,
        c.phone,
        c.postal_code,
        c.street,
        c.number,
        c.district,
        c.city,
        c.state,
        c.complement,
        c.resume_path,
        c.desired_contract,
        c.occupation,
        c.salary_band,
        c.availability,
        c.languages,
        c.education,
        c.created_at,
        c.updated_at
"#;

const CANDIDATE_FROM: &str = r#"
    FROM candidates c
    JOIN accounts a ON a.account_id = c.candidate_id
"#;

const JOB_COLUMNS: &str = r#"
        j.job_id,
        j.company_id,
        j.title,
        j.description,
        j.role,
        j.tags,
        j.salary_band,
        j.contract_type,
        j.work_mode,
        j.schedule,
        j.availability,
        j.created_at,
        j.updated_at,
        co.trade_name AS company_name
"#;

/// Shared by the page fetch and its count
const JOB_FROM: &str = r#"
    FROM jobs j
    JOIN companies co ON co.company_id = j.company_id
"#;

const COURSE_COLUMNS: &str =
    "course_id, candidate_id, name, institution, started_on, finished_on";

const EXPERIENCE_COLUMNS: &str =
    "experience_id, candidate_id, company_name, position, description, started_on, finished_on";

/// Escape `%`, `_` and `\` for an `ILIKE ... ESCAPE '\'` pattern
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Render the filter as a `WHERE` clause over `jobs j`
fn push_job_predicates(query: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    query.push(" WHERE TRUE");
    for predicate in filter.predicates() {
        match predicate {
            JobPredicate::Text(needle) => {
                let pattern = like_pattern(needle);
                query
                    .push(" AND (j.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR j.description ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR j.role ILIKE ")
                    .push_bind(pattern)
                    .push(" ESCAPE '\\')");
            }
            JobPredicate::SalaryBand(band) => {
                query.push(" AND j.salary_band = ").push_bind(band.code());
            }
            JobPredicate::ContractType(contract) => {
                query.push(" AND j.contract_type = ").push_bind(contract.code());
            }
            JobPredicate::Availability(availability) => {
                query.push(" AND j.availability = ").push_bind(availability.code());
            }
            JobPredicate::PostedBy(company_id) => {
                query.push(" AND j.company_id = ").push_bind(company_id.into_uuid());
            }
            JobPredicate::NotAppliedBy(candidate_id) => {
                query
                    .push(
                        " AND NOT EXISTS (SELECT 1 FROM job_applications ja \
                         WHERE ja.job_id = j.job_id AND ja.candidate_id = ",
                    )
                    .push_bind(candidate_id.into_uuid())
                    .push(")");
            }
        }
    }
}

// ============================================================================
// Companies
// ============================================================================

impl CompanyRepository for PgRecruitmentRepository {
    async fn register_company(&self, account: &Account, company: &Company) -> RecruitmentResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_account(&mut tx, account).await?;

        let d = &company.details;
        sqlx::query(
            r#"
            INSERT INTO companies (
                company_id, cnpj, legal_name, trade_name, state_registration,
                postal_code, street, number, district, city, state, complement,
                phone, whatsapp, contact_person,
                bio, website, linkedin, instagram, logo_path,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15,
                $16, $17, $18, $19, $20,
                $21, $22
            )
            "#,
        )
        .bind(company.company_id.as_uuid())
        .bind(d.cnpj.as_str())
        .bind(&d.legal_name)
        .bind(&d.trade_name)
        .bind(d.state_registration.as_deref())
        .bind(&d.address.postal_code)
        .bind(&d.address.street)
        .bind(&d.address.number)
        .bind(&d.address.district)
        .bind(&d.address.city)
        .bind(&d.address.state)
        .bind(d.address.complement.as_deref())
        .bind(&d.phone)
        .bind(&d.whatsapp)
        .bind(&d.contact_person)
        .bind(company.profile.bio.as_deref())
        .bind(company.profile.website.as_deref())
        .bind(company.profile.linkedin.as_deref())
        .bind(company.profile.instagram.as_deref())
        .bind(company.logo_path.as_deref())
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_company(&self, company_id: &CompanyId) -> RecruitmentResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "{COMPANY_SELECT} WHERE c.company_id = $1"
        ))
        .bind(company_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CompanyRow::into_company))
    }

    async fn update_company(&self, company: &Company) -> RecruitmentResult<()> {
        let mut tx = self.pool.begin().await?;

        let d = &company.details;
        let done = sqlx::query(
            r#"
            UPDATE companies SET
                cnpj = $2,
                legal_name = $3,
                trade_name = $4,
                state_registration = $5,
                postal_code = $6,
                street = $7,
                number = $8,
                district = $9,
                city = $10,
                state = $11,
                complement = $12,
                phone = $13,
                whatsapp = $14,
                contact_person = $15,
                bio = $16,
                website = $17,
                linkedin = $18,
                instagram = $19,
                updated_at = $20
            WHERE company_id = $1
            "#,
        )
        .bind(company.company_id.as_uuid())
        .bind(d.cnpj.as_str())
        .bind(&d.legal_name)
        .bind(&d.trade_name)
        .bind(d.state_registration.as_deref())
        .bind(&d.address.postal_code)
        .bind(&d.address.street)
        .bind(&d.address.number)
        .bind(&d.address.district)
        .bind(&d.address.city)
        .bind(&d.address.state)
        .bind(d.address.complement.as_deref())
        .bind(&d.phone)
        .bind(&d.whatsapp)
        .bind(&d.contact_person)
        .bind(company.profile.bio.as_deref())
        .bind(company.profile.website.as_deref())
        .bind(company.profile.linkedin.as_deref())
        .bind(company.profile.instagram.as_deref())
        .bind(company.updated_at)
        .execute(&mut *tx)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::CompanyNotFound);
        }
        update_account_email(&mut tx, &company.company_id.retag(), &d.email).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn replace_company_logo(
        &self,
        company_id: &CompanyId,
        logo_path: &str,
    ) -> RecruitmentResult<Option<String>> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<Option<String>> = sqlx::query_scalar(
            "SELECT logo_path FROM companies WHERE company_id = $1 FOR UPDATE",
        )
        .bind(company_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(previous) = previous else {
            return Err(RecruitmentError::CompanyNotFound);
        };

        sqlx::query("UPDATE companies SET logo_path = $2, updated_at = NOW() WHERE company_id = $1")
            .bind(company_id.as_uuid())
            .bind(logo_path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(previous)
    }

    async fn list_companies(&self) -> RecruitmentResult<Vec<Company>> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            "{COMPANY_SELECT} ORDER BY c.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CompanyRow::into_company).collect())
    }

    async fn delete_company(&self, company_id: &CompanyId) -> RecruitmentResult<Company> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_as::<_, CompanyRow>(&format!(
            "{COMPANY_SELECT} WHERE c.company_id = $1 FOR UPDATE OF c"
        ))
        .bind(company_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .map(CompanyRow::into_company)
        .ok_or(RecruitmentError::CompanyNotFound)?;

        // Cascades to the profile, its jobs, their applications and the
        // company's evaluations
        sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(company_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(company)
    }
}

// ============================================================================
// Candidates
// ============================================================================

impl CandidateRepository for PgRecruitmentRepository {
    async fn register_candidate(
        &self,
        account: &Account,
        candidate: &Candidate,
    ) -> RecruitmentResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_account(&mut tx, account).await?;

        let d = &candidate.details;
        let g = &candidate.goals;
        sqlx::query(
            r#"
            INSERT INTO candidates (
                candidate_id, full_name, cpf, phone,
                postal_code, street, number, district, city, state, complement,
                resume_path, desired_contract, occupation, salary_band, availability,
                languages, education, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16,
                $17, $18, $19, $20
            )
            "#,
        )
        .bind(candidate.candidate_id.as_uuid())
        .bind(&d.full_name)
        .bind(d.cpf.as_str())
        .bind(&d.phone)
        .bind(&d.address.postal_code)
        .bind(&d.address.street)
        .bind(&d.address.number)
        .bind(&d.address.district)
        .bind(&d.address.city)
        .bind(&d.address.state)
        .bind(d.address.complement.as_deref())
        .bind(candidate.resume_path.as_deref())
        .bind(g.desired_contract.map(|c| c.code()))
        .bind(g.occupation.as_deref())
        .bind(g.salary_band.map(|s| s.code()))
        .bind(g.availability.map(|a| a.code()))
        .bind(candidate.languages.as_slice())
        .bind(candidate.education.as_slice())
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} {CANDIDATE_FROM} WHERE c.candidate_id = $1"
        ))
        .bind(candidate_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CandidateRow::into_candidate).transpose()
    }

    async fn update_candidate(&self, candidate: &Candidate) -> RecruitmentResult<()> {
        let mut tx = self.pool.begin().await?;

        let d = &candidate.details;
        let g = &candidate.goals;
        let done = sqlx::query(
            r#"
            UPDATE candidates SET
                full_name = $2,
                cpf = $3,
                phone = $4,
                postal_code = $5,
                street = $6,
                number = $7,
                district = $8,
                city = $9,
                state = $10,
                complement = $11,
                desired_contract = $12,
                occupation = $13,
                salary_band = $14,
                availability = $15,
                languages = $16,
                education = $17,
                updated_at = $18
            WHERE candidate_id = $1
            "#,
        )
        .bind(candidate.candidate_id.as_uuid())
        .bind(&d.full_name)
        .bind(d.cpf.as_str())
        .bind(&d.phone)
        .bind(&d.address.postal_code)
        .bind(&d.address.street)
        .bind(&d.address.number)
        .bind(&d.address.district)
        .bind(&d.address.city)
        .bind(&d.address.state)
        .bind(d.address.complement.as_deref())
        .bind(g.desired_contract.map(|c| c.code()))
        .bind(g.occupation.as_deref())
        .bind(g.salary_band.map(|s| s.code()))
        .bind(g.availability.map(|a| a.code()))
        .bind(candidate.languages.as_slice())
        .bind(candidate.education.as_slice())
        .bind(candidate.updated_at)
        .execute(&mut *tx)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::CandidateNotFound);
        }
        update_account_email(&mut tx, &candidate.candidate_id.retag(), &d.email).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn replace_candidate_resume(
        &self,
        candidate_id: &CandidateId,
        resume_path: &str,
    ) -> RecruitmentResult<Option<String>> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<Option<String>> = sqlx::query_scalar(
            "SELECT resume_path FROM candidates WHERE candidate_id = $1 FOR UPDATE",
        )
        .bind(candidate_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(previous) = previous else {
            return Err(RecruitmentError::CandidateNotFound);
        };

        sqlx::query(
            "UPDATE candidates SET resume_path = $2, updated_at = NOW() WHERE candidate_id = $1",
        )
        .bind(candidate_id.as_uuid())
        .bind(resume_path)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(previous)
    }

    async fn list_candidates(&self) -> RecruitmentResult<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} {CANDIDATE_FROM} ORDER BY c.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CandidateRow::into_candidate).collect()
    }

    async fn delete_candidate(&self, candidate_id: &CandidateId) -> RecruitmentResult<Candidate> {
        let mut tx = self.pool.begin().await?;

        let candidate = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} {CANDIDATE_FROM} WHERE c.candidate_id = $1 FOR UPDATE OF c"
        ))
        .bind(candidate_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .map(CandidateRow::into_candidate)
        .transpose()?
        .ok_or(RecruitmentError::CandidateNotFound)?;

        // Cascades to applications, courses, experiences and evaluations
        sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(candidate_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(candidate)
    }
}

// ============================================================================
// Jobs
// ============================================================================

impl JobRepository for PgRecruitmentRepository {
    async fn create_job(&self, job: &Job) -> RecruitmentResult<()> {
        let d = &job.details;
        sqlx::query(
            r#"
            INSERT INTO jobs (
                job_id, company_id, title, description, role, tags,
                salary_band, contract_type, work_mode, schedule, availability,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(job.job_id.as_uuid())
        .bind(job.company_id.as_uuid())
        .bind(&d.title)
        .bind(&d.description)
        .bind(&d.role)
        .bind(d.tags.as_slice())
        .bind(d.salary_band.code())
        .bind(d.contract_type.code())
        .bind(d.work_mode.code())
        .bind(d.schedule.as_deref())
        .bind(d.availability.code())
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_job(&self, job_id: &JobId) -> RecruitmentResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} {JOB_FROM} WHERE j.job_id = $1"
        ))
        .bind(job_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_listing().map(|listing| listing.job))
            .transpose()
    }

    async fn update_job(&self, job: &Job) -> RecruitmentResult<()> {
        let d = &job.details;
        let done = sqlx::query(
            r#"
            UPDATE jobs SET
                title = $2,
                description = $3,
                role = $4,
                tags = $5,
                salary_band = $6,
                contract_type = $7,
                work_mode = $8,
                schedule = $9,
                availability = $10,
                updated_at = $11
            WHERE job_id = $1
            "#,
        )
        .bind(job.job_id.as_uuid())
        .bind(&d.title)
        .bind(&d.description)
        .bind(&d.role)
        .bind(d.tags.as_slice())
        .bind(d.salary_band.code())
        .bind(d.contract_type.code())
        .bind(d.work_mode.code())
        .bind(d.schedule.as_deref())
        .bind(d.availability.code())
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::JobNotFound);
        }
        Ok(())
    }

    async fn delete_job(&self, job_id: &JobId) -> RecruitmentResult<bool> {
        let done = sqlx::query("DELETE FROM jobs WHERE job_id = $1")
            .bind(job_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn search_jobs(
        &self,
        filter: &JobFilter,
        pagination: Pagination,
    ) -> RecruitmentResult<Page<JobListing>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        count.push(JOB_FROM);
        push_job_predicates(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut fetch = QueryBuilder::<Postgres>::new("SELECT");
        fetch.push(JOB_COLUMNS).push(JOB_FROM);
        push_job_predicates(&mut fetch, filter);
        fetch
            .push(" ORDER BY j.created_at DESC, j.job_id DESC LIMIT ")
            .push_bind(pagination.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pagination.offset() as i64);
        let rows = fetch.build_query_as::<JobRow>().fetch_all(&self.pool).await?;

        let items = rows
            .into_iter()
            .map(JobRow::into_listing)
            .collect::<RecruitmentResult<Vec<_>>>()?;
        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn list_jobs(&self) -> RecruitmentResult<Vec<JobListing>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} {JOB_FROM} ORDER BY j.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(JobRow::into_listing).collect()
    }
}

// ============================================================================
// Applications
// ============================================================================

impl ApplicationRepository for PgRecruitmentRepository {
    async fn create_application(&self, application: &JobApplication) -> RecruitmentResult<()> {
        let done = sqlx::query(
            r#"
            INSERT INTO job_applications (application_id, candidate_id, job_id, selected, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (candidate_id, job_id) DO NOTHING
            "#,
        )
        .bind(application.application_id.as_uuid())
        .bind(application.candidate_id.as_uuid())
        .bind(application.job_id.as_uuid())
        .bind(application.selected)
        .bind(application.created_at)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::AlreadyApplied);
        }
        Ok(())
    }

    async fn list_applicants(
        &self,
        job_id: &JobId,
        status: SelectionStatus,
    ) -> RecruitmentResult<Vec<Applicant>> {
        let selected = match status {
            SelectionStatus::All => None,
            SelectionStatus::Selected => Some(true),
            SelectionStatus::Pending => Some(false),
        };

        let rows = sqlx::query_as::<_, ApplicantRow>(&format!(
            r#"
            SELECT
                ja.application_id,
                ja.job_id,
                ja.selected,
                ja.created_at AS applied_at,
                {CANDIDATE_COLUMNS}
            FROM job_applications ja
            JOIN candidates c ON c.candidate_id = ja.candidate_id
            JOIN accounts a ON a.account_id = c.candidate_id
            WHERE ja.job_id = $1 AND ($2::BOOLEAN IS NULL OR ja.selected = $2)
            ORDER BY ja.created_at
            "#
        ))
        .bind(job_id.as_uuid())
        .bind(selected)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ApplicantRow::into_applicant).collect()
    }

    async fn select_applications(
        &self,
        job_id: &JobId,
        application_ids: &[JobApplicationId],
    ) -> RecruitmentResult<u64> {
        let ids: Vec<Uuid> = application_ids.iter().map(|id| id.into_uuid()).collect();
        let done = sqlx::query(
            r#"
            UPDATE job_applications SET selected = TRUE
            WHERE job_id = $1 AND application_id = ANY($2) AND NOT selected
            "#,
        )
        .bind(job_id.as_uuid())
        .bind(ids)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected())
    }

    async fn list_candidate_applications(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<CandidateApplication>> {
        let rows = sqlx::query_as::<_, CandidateApplicationRow>(&format!(
            r#"
            SELECT
                ja.application_id,
                ja.candidate_id,
                ja.selected,
                ja.created_at AS applied_at,
                {JOB_COLUMNS}
            FROM job_applications ja
            JOIN jobs j ON j.job_id = ja.job_id
            JOIN companies co ON co.company_id = j.company_id
            WHERE ja.candidate_id = $1
            ORDER BY ja.created_at DESC
            "#
        ))
        .bind(candidate_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(CandidateApplicationRow::into_application)
            .collect()
    }

    async fn has_selected_application(
        &self,
        candidate_id: &CandidateId,
        company_id: &CompanyId,
    ) -> RecruitmentResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM job_applications ja
                JOIN jobs j ON j.job_id = ja.job_id
                WHERE ja.candidate_id = $1 AND j.company_id = $2 AND ja.selected
            )
            "#,
        )
        .bind(candidate_id.as_uuid())
        .bind(company_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Courses and experience
// ============================================================================

impl HistoryRepository for PgRecruitmentRepository {
    async fn create_course(&self, course: &Course) -> RecruitmentResult<()> {
        sqlx::query(&format!(
            "INSERT INTO courses ({COURSE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(course.course_id.as_uuid())
        .bind(course.candidate_id.as_uuid())
        .bind(&course.details.name)
        .bind(&course.details.institution)
        .bind(course.details.period.started_on)
        .bind(course.details.period.finished_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_course(&self, course_id: &CourseId) -> RecruitmentResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = $1"
        ))
        .bind(course_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn update_course(&self, course: &Course) -> RecruitmentResult<()> {
        let done = sqlx::query(
            r#"
            UPDATE courses SET name = $2, institution = $3, started_on = $4, finished_on = $5
            WHERE course_id = $1
            "#,
        )
        .bind(course.course_id.as_uuid())
        .bind(&course.details.name)
        .bind(&course.details.institution)
        .bind(course.details.period.started_on)
        .bind(course.details.period.finished_on)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::CourseNotFound);
        }
        Ok(())
    }

    async fn delete_course(&self, course_id: &CourseId) -> RecruitmentResult<()> {
        let done = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::CourseNotFound);
        }
        Ok(())
    }

    async fn list_courses(&self, candidate_id: &CandidateId) -> RecruitmentResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE candidate_id = $1 \
             ORDER BY started_on DESC"
        ))
        .bind(candidate_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn create_experience(&self, experience: &Experience) -> RecruitmentResult<()> {
        sqlx::query(&format!(
            "INSERT INTO experiences ({EXPERIENCE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(experience.experience_id.as_uuid())
        .bind(experience.candidate_id.as_uuid())
        .bind(&experience.details.company_name)
        .bind(&experience.details.position)
        .bind(experience.details.description.as_deref())
        .bind(experience.details.period.started_on)
        .bind(experience.details.period.finished_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_experience(
        &self,
        experience_id: &ExperienceId,
    ) -> RecruitmentResult<Option<Experience>> {
        let row = sqlx::query_as::<_, ExperienceRow>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE experience_id = $1"
        ))
        .bind(experience_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ExperienceRow::into_experience))
    }

    async fn update_experience(&self, experience: &Experience) -> RecruitmentResult<()> {
        let done = sqlx::query(
            r#"
            UPDATE experiences SET
                company_name = $2,
                position = $3,
                description = $4,
                started_on = $5,
                finished_on = $6
            WHERE experience_id = $1
            "#,
        )
        .bind(experience.experience_id.as_uuid())
        .bind(&experience.details.company_name)
        .bind(&experience.details.position)
        .bind(experience.details.description.as_deref())
        .bind(experience.details.period.started_on)
        .bind(experience.details.period.finished_on)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::ExperienceNotFound);
        }
        Ok(())
    }

    async fn delete_experience(&self, experience_id: &ExperienceId) -> RecruitmentResult<()> {
        let done = sqlx::query("DELETE FROM experiences WHERE experience_id = $1")
            .bind(experience_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::ExperienceNotFound);
        }
        Ok(())
    }

    async fn list_experiences(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<Experience>> {
        let rows = sqlx::query_as::<_, ExperienceRow>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE candidate_id = $1 \
             ORDER BY started_on DESC"
        ))
        .bind(candidate_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ExperienceRow::into_experience).collect())
    }
}

// ============================================================================
// Evaluations
// ============================================================================

impl EvaluationRepository for PgRecruitmentRepository {
    async fn create_evaluation(&self, evaluation: &Evaluation) -> RecruitmentResult<()> {
        let done = sqlx::query(
            r#"
            INSERT INTO evaluations (evaluation_id, candidate_id, company_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (candidate_id, company_id) DO NOTHING
            "#,
        )
        .bind(evaluation.evaluation_id.as_uuid())
        .bind(evaluation.candidate_id.as_uuid())
        .bind(evaluation.company_id.as_uuid())
        .bind(i16::from(evaluation.rating.value()))
        .bind(evaluation.comment.as_deref())
        .bind(evaluation.created_at)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(RecruitmentError::AlreadyEvaluated);
        }
        Ok(())
    }

    async fn list_company_evaluations(
        &self,
        company_id: &CompanyId,
    ) -> RecruitmentResult<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, EvaluationRow>(
            r#"
            SELECT evaluation_id, candidate_id, company_id, rating, comment, created_at
            FROM evaluations
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EvaluationRow::into_evaluation).collect()
    }
}

impl AdminRepository for PgRecruitmentRepository {
    async fn entity_counts(&self) -> RecruitmentResult<EntityCounts> {
        let (companies, candidates, jobs, applications): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM companies),
                (SELECT COUNT(*) FROM candidates),
                (SELECT COUNT(*) FROM jobs),
                (SELECT COUNT(*) FROM job_applications)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let count = |n: i64| n.max(0) as u64;
        Ok(EntityCounts {
            companies: count(companies),
            candidates: count(candidates),
            jobs: count(jobs),
            applications: count(applications),
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

fn catalog<T>(code: &str, parse: fn(&str) -> Option<T>, column: &str) -> RecruitmentResult<T> {
    parse(code).ok_or_else(|| RecruitmentError::Internal(format!("Invalid {column}: {code}")))
}

fn optional_catalog<T>(
    code: Option<String>,
    parse: fn(&str) -> Option<T>,
    column: &str,
) -> RecruitmentResult<Option<T>> {
    code.map(|c| catalog(&c, parse, column)).transpose()
}

#[derive(sqlx::FromRow)]
struct CompanyRow {
    company_id: Uuid,
    email: String,
    cnpj: String,
    legal_name: String,
    trade_name: String,
    state_registration: Option<String>,
    postal_code: String,
    street: String,
    number: String,
    district: String,
    city: String,
    state: String,
    complement: Option<String>,
    phone: String,
    whatsapp: String,
    contact_person: String,
    bio: Option<String>,
    website: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
    logo_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CompanyRow {
    fn into_company(self) -> Company {
        Company {
            company_id: CompanyId::from_uuid(self.company_id),
            details: CompanyDetails {
                cnpj: Cnpj::from_db(self.cnpj),
                legal_name: self.legal_name,
                trade_name: self.trade_name,
                state_registration: self.state_registration,
                address: Address {
                    postal_code: self.postal_code,
                    street: self.street,
                    number: self.number,
                    district: self.district,
                    city: self.city,
                    state: self.state,
                    complement: self.complement,
                },
                phone: self.phone,
                whatsapp: self.whatsapp,
                contact_person: self.contact_person,
                email: Email::from_db(self.email),
            },
            profile: CompanyProfile {
                bio: self.bio,
                website: self.website,
                linkedin: self.linkedin,
                instagram: self.instagram,
            },
            logo_path: self.logo_path,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CandidateRow {
    candidate_id: Uuid,
    email: String,
    full_name: String,
    cpf: String,
    phone: String,
    postal_code: String,
    street: String,
    number: String,
    district: String,
    city: String,
    state: String,
    complement: Option<String>,
    resume_path: Option<String>,
    desired_contract: Option<String>,
    occupation: Option<String>,
    salary_band: Option<String>,
    availability: Option<String>,
    languages: Vec<String>,
    education: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CandidateRow {
    fn into_candidate(self) -> RecruitmentResult<Candidate> {
        let goals = CandidateGoals {
            desired_contract: optional_catalog(
                self.desired_contract,
                ContractType::from_code,
                "desired_contract",
            )?,
            occupation: self.occupation,
            salary_band: optional_catalog(self.salary_band, SalaryBand::from_code, "salary_band")?,
            availability: optional_catalog(
                self.availability,
                Availability::from_code,
                "availability",
            )?,
        };

        Ok(Candidate {
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            details: CandidateDetails {
                full_name: self.full_name,
                cpf: Cpf::from_db(self.cpf),
                phone: self.phone,
                email: Email::from_db(self.email),
                address: Address {
                    postal_code: self.postal_code,
                    street: self.street,
                    number: self.number,
                    district: self.district,
                    city: self.city,
                    state: self.state,
                    complement: self.complement,
                },
            },
            resume_path: self.resume_path,
            goals,
            languages: self.languages,
            education: self.education,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    job_id: Uuid,
    company_id: Uuid,
    title: String,
    description: String,
    role: String,
    tags: Vec<String>,
    salary_band: String,
    contract_type: String,
    work_mode: String,
    schedule: Option<String>,
    availability: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    company_name: String,
}

impl JobRow {
    fn into_listing(self) -> RecruitmentResult<JobListing> {
        let details = JobDetails {
            title: self.title,
            description: self.description,
            role: self.role,
            tags: self.tags,
            salary_band: catalog(&self.salary_band, SalaryBand::from_code, "salary_band")?,
            contract_type: catalog(&self.contract_type, ContractType::from_code, "contract_type")?,
            work_mode: catalog(&self.work_mode, WorkMode::from_code, "work_mode")?,
            schedule: self.schedule,
            availability: catalog(&self.availability, Availability::from_code, "availability")?,
        };

        Ok(JobListing {
            job: Job {
                job_id: JobId::from_uuid(self.job_id),
                company_id: CompanyId::from_uuid(self.company_id),
                details,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            company_name: self.company_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ApplicantRow {
    application_id: Uuid,
    job_id: Uuid,
    selected: bool,
    applied_at: DateTime<Utc>,
    #[sqlx(flatten)]
    candidate: CandidateRow,
}

impl ApplicantRow {
    fn into_applicant(self) -> RecruitmentResult<Applicant> {
        let candidate = self.candidate.into_candidate()?;
        Ok(Applicant {
            application: JobApplication {
                application_id: JobApplicationId::from_uuid(self.application_id),
                candidate_id: candidate.candidate_id,
                job_id: JobId::from_uuid(self.job_id),
                selected: self.selected,
                created_at: self.applied_at,
            },
            candidate,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CandidateApplicationRow {
    application_id: Uuid,
    candidate_id: Uuid,
    selected: bool,
    applied_at: DateTime<Utc>,
    #[sqlx(flatten)]
    job: JobRow,
}

impl CandidateApplicationRow {
    fn into_application(self) -> RecruitmentResult<CandidateApplication> {
        let listing = self.job.into_listing()?;
        Ok(CandidateApplication {
            application: JobApplication {
                application_id: JobApplicationId::from_uuid(self.application_id),
                candidate_id: CandidateId::from_uuid(self.candidate_id),
                job_id: listing.job.job_id,
                selected: self.selected,
                created_at: self.applied_at,
            },
            listing,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: Uuid,
    candidate_id: Uuid,
    name: String,
    institution: String,
    started_on: NaiveDate,
    finished_on: Option<NaiveDate>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            course_id: CourseId::from_uuid(self.course_id),
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            details: CourseDetails {
                name: self.name,
                institution: self.institution,
                period: Period {
                    started_on: self.started_on,
                    finished_on: self.finished_on,
                },
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    experience_id: Uuid,
    candidate_id: Uuid,
    company_name: String,
    position: String,
    description: Option<String>,
    started_on: NaiveDate,
    finished_on: Option<NaiveDate>,
}

impl ExperienceRow {
    fn into_experience(self) -> Experience {
        Experience {
            experience_id: ExperienceId::from_uuid(self.experience_id),
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            details: ExperienceDetails {
                company_name: self.company_name,
                position: self.position,
                description: self.description,
                period: Period {
                    started_on: self.started_on,
                    finished_on: self.finished_on,
                },
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct EvaluationRow {
    evaluation_id: Uuid,
    candidate_id: Uuid,
    company_id: Uuid,
    rating: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl EvaluationRow {
    fn into_evaluation(self) -> RecruitmentResult<Evaluation> {
        let rating = Rating::new(i64::from(self.rating)).map_err(RecruitmentError::Internal)?;
        Ok(Evaluation {
            evaluation_id: EvaluationId::from_uuid(self.evaluation_id),
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            company_id: CompanyId::from_uuid(self.company_id),
            rating,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_predicates_render_in_order() {
        let filter = JobFilter::new()
            .text("dev")
            .contract_type(Some(ContractType::Clt))
            .not_applied_by(CandidateId::new());
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        query.push(JOB_FROM);
        push_job_predicates(&mut query, &filter);
        let sql = query.sql();

        assert!(sql.contains("j.title ILIKE $1 ESCAPE '\\'"));
        assert!(sql.contains("j.role ILIKE $3"));
        assert!(sql.contains("AND j.contract_type = $4"));
        assert!(sql.contains("ja.candidate_id = $5)"));
    }
}
