//! Courses and professional experience of a candidate
//!
//! Every mutation loads the entry first and checks it belongs to the
//! caller.

use std::sync::Arc;

use kernel::id::{CandidateId, CourseId, ExperienceId};

use crate::domain::entity::history::{Course, CourseDetails, Experience, ExperienceDetails};
use crate::domain::repository::HistoryRepository;
use crate::domain::value_object::{fields::FieldErrors, period::Period};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_DESCRIPTION_CHARS: usize = 2000;

#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub name: String,
    pub institution: String,
    pub started_on: String,
    pub finished_on: String,
}

impl CourseInput {
    fn validate(&self) -> RecruitmentResult<CourseDetails> {
        let mut errors = FieldErrors::new();
        let name = errors.required(&self.name, "Nome do curso é obrigatório.");
        let institution = errors.required(&self.institution, "Instituição é obrigatória.");
        let period = Period::parse(&self.started_on, &self.finished_on, &mut errors);

        match period {
            Some(period) if errors.is_empty() => Ok(CourseDetails {
                name,
                institution,
                period,
            }),
            _ => Err(RecruitmentError::Validation(errors.into_vec())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceInput {
    pub company_name: String,
    pub position: String,
    pub description: String,
    pub started_on: String,
    pub finished_on: String,
}

impl ExperienceInput {
    fn validate(&self) -> RecruitmentResult<ExperienceDetails> {
        let mut errors = FieldErrors::new();
        let company_name = errors.required(&self.company_name, "Empresa é obrigatória.");
        let position = errors.required(&self.position, "Cargo é obrigatório.");
        errors.max_len(
            &self.description,
            MAX_DESCRIPTION_CHARS,
            "A descrição deve ter no máximo 2000 caracteres.",
        );
        let period = Period::parse(&self.started_on, &self.finished_on, &mut errors);

        match period {
            Some(period) if errors.is_empty() => Ok(ExperienceDetails {
                company_name,
                position,
                description: FieldErrors::optional(&self.description),
                period,
            }),
            _ => Err(RecruitmentError::Validation(errors.into_vec())),
        }
    }
}

pub struct HistoryUseCase<S>
where
    S: HistoryRepository,
{
    store: Arc<S>,
}

impl<S> HistoryUseCase<S>
where
    S: HistoryRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn courses(&self, candidate_id: &CandidateId) -> RecruitmentResult<Vec<Course>> {
        self.store.list_courses(candidate_id).await
    }

    pub async fn add_course(
        &self,
        candidate_id: &CandidateId,
        input: &CourseInput,
    ) -> RecruitmentResult<Course> {
        let course = Course::new(*candidate_id, input.validate()?);
        self.store.create_course(&course).await?;
        tracing::info!(course_id = %course.course_id, candidate_id = %candidate_id, "Course added");
        Ok(course)
    }

    async fn owned_course(
        &self,
        candidate_id: &CandidateId,
        course_id: &CourseId,
    ) -> RecruitmentResult<Course> {
        let course = self
            .store
            .find_course(course_id)
            .await?
            .ok_or(RecruitmentError::CourseNotFound)?;
        if !course.is_owned_by(candidate_id) {
            return Err(RecruitmentError::AccessDenied);
        }
        Ok(course)
    }

    pub async fn edit_course(
        &self,
        candidate_id: &CandidateId,
        course_id: &CourseId,
        input: &CourseInput,
    ) -> RecruitmentResult<Course> {
        let mut course = self.owned_course(candidate_id, course_id).await?;
        course.details = input.validate()?;
        self.store.update_course(&course).await?;
        Ok(course)
    }

    pub async fn delete_course(
        &self,
        candidate_id: &CandidateId,
        course_id: &CourseId,
    ) -> RecruitmentResult<()> {
        self.owned_course(candidate_id, course_id).await?;
        self.store.delete_course(course_id).await?;
        tracing::info!(course_id = %course_id, "Course deleted");
        Ok(())
    }

    pub async fn experiences(
        &self,
        candidate_id: &CandidateId,
    ) -> RecruitmentResult<Vec<Experience>> {
        self.store.list_experiences(candidate_id).await
    }

    pub async fn add_experience(
        &self,
        candidate_id: &CandidateId,
        input: &ExperienceInput,
    ) -> RecruitmentResult<Experience> {
        let experience = Experience::new(*candidate_id, input.validate()?);
        self.store.create_experience(&experience).await?;
        tracing::info!(
            experience_id = %experience.experience_id,
            candidate_id = %candidate_id,
            "Experience added"
        );
        Ok(experience)
    }

    async fn owned_experience(
        &self,
        candidate_id: &CandidateId,
        experience_id: &ExperienceId,
    ) -> RecruitmentResult<Experience> {
        let experience = self
            .store
            .find_experience(experience_id)
            .await?
            .ok_or(RecruitmentError::ExperienceNotFound)?;
        if !experience.is_owned_by(candidate_id) {
            return Err(RecruitmentError::AccessDenied);
        }
        Ok(experience)
    }

    pub async fn edit_experience(
        &self,
        candidate_id: &CandidateId,
        experience_id: &ExperienceId,
        input: &ExperienceInput,
    ) -> RecruitmentResult<Experience> {
        let mut experience = self.owned_experience(candidate_id, experience_id).await?;
        experience.details = input.validate()?;
        self.store.update_experience(&experience).await?;
        Ok(experience)
    }

    pub async fn delete_experience(
        &self,
        candidate_id: &CandidateId,
        experience_id: &ExperienceId,
    ) -> RecruitmentResult<()> {
        self.owned_experience(candidate_id, experience_id).await?;
        self.store.delete_experience(experience_id).await?;
        tracing::info!(experience_id = %experience_id, "Experience deleted");
        Ok(())
    }
}
