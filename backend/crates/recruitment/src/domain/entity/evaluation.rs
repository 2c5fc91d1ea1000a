//! Company evaluations by candidates

use chrono::{DateTime, Utc};
use kernel::id::{CandidateId, CompanyId, EvaluationId};

use crate::domain::value_object::rating::Rating;

/// One per (candidate, company)
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub evaluation_id: EvaluationId,
    pub candidate_id: CandidateId,
    pub company_id: CompanyId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(
        candidate_id: CandidateId,
        company_id: CompanyId,
        rating: Rating,
        comment: Option<String>,
    ) -> Self {
        Self {
            evaluation_id: EvaluationId::new(),
            candidate_id,
            company_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}
