//! Candidate history: courses and professional experiences

use kernel::id::{CandidateId, CourseId, ExperienceId};

use crate::domain::value_object::period::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub name: String,
    pub institution: String,
    pub period: Period,
}

#[derive(Debug, Clone)]
pub struct Course {
    pub course_id: CourseId,
    pub candidate_id: CandidateId,
    pub details: CourseDetails,
}

impl Course {
    pub fn new(candidate_id: CandidateId, details: CourseDetails) -> Self {
        Self {
            course_id: CourseId::new(),
            candidate_id,
            details,
        }
    }

    pub fn is_owned_by(&self, candidate_id: &CandidateId) -> bool {
        &self.candidate_id == candidate_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceDetails {
    pub company_name: String,
    pub position: String,
    pub description: Option<String>,
    pub period: Period,
}

#[derive(Debug, Clone)]
pub struct Experience {
    pub experience_id: ExperienceId,
    pub candidate_id: CandidateId,
    pub details: ExperienceDetails,
}

impl Experience {
    pub fn new(candidate_id: CandidateId, details: ExperienceDetails) -> Self {
        Self {
            experience_id: ExperienceId::new(),
            candidate_id,
            details,
        }
    }

    pub fn is_owned_by(&self, candidate_id: &CandidateId) -> bool {
        &self.candidate_id == candidate_id
    }
}
