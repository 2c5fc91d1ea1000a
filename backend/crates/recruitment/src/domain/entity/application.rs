//! Job applications

use chrono::{DateTime, Utc};
use kernel::id::{CandidateId, JobApplicationId, JobId};

use crate::domain::entity::candidate::Candidate;
use crate::domain::entity::job::JobListing;

/// One per (candidate, job)
#[derive(Debug, Clone)]
pub struct JobApplication {
    pub application_id: JobApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
}

impl JobApplication {
    pub fn new(candidate_id: CandidateId, job_id: JobId) -> Self {
        Self {
            application_id: JobApplicationId::new(),
            candidate_id,
            job_id,
            selected: false,
            created_at: Utc::now(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.selected {
            "Selecionado"
        } else {
            "Em análise"
        }
    }
}

/// Which applicants a company wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStatus {
    #[default]
    All,
    Selected,
    Pending,
}

impl SelectionStatus {
    pub const ALL: [SelectionStatus; 3] = [Self::All, Self::Selected, Self::Pending];

    pub const fn code(&self) -> &'static str {
        match self {
            Self::All => "todos",
            Self::Selected => "selecionados",
            Self::Pending => "pendentes",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Selected => "Selecionados",
            Self::Pending => "Pendentes",
        }
    }

    /// Unknown or missing codes show everyone
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .unwrap_or_default()
    }

    pub fn admits(&self, selected: bool) -> bool {
        match self {
            Self::All => true,
            Self::Selected => selected,
            Self::Pending => !selected,
        }
    }
}

/// Application with the candidate's data, as the hiring company sees it
#[derive(Debug, Clone)]
pub struct Applicant {
    pub application: JobApplication,
    pub candidate: Candidate,
}

/// Application with its job, as the candidate sees it
#[derive(Debug, Clone)]
pub struct CandidateApplication {
    pub application: JobApplication,
    pub listing: JobListing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_status() {
        assert_eq!(SelectionStatus::from_code("selecionados"), SelectionStatus::Selected);
        assert_eq!(SelectionStatus::from_code("???"), SelectionStatus::All);
        assert!(SelectionStatus::Pending.admits(false));
        assert!(!SelectionStatus::Pending.admits(true));
        assert!(SelectionStatus::All.admits(true));
    }

    #[test]
    fn test_new_application_is_pending() {
        let application = JobApplication::new(CandidateId::new(), JobId::new());
        assert!(!application.selected);
        assert_eq!(application.status_label(), "Em análise");
    }
}
