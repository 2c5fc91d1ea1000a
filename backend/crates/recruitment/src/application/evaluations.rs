//! Company evaluations and the public company page

use std::sync::Arc;

use kernel::id::{CandidateId, CompanyId};

use crate::domain::entity::{company::Company, evaluation::Evaluation};
use crate::domain::repository::{ApplicationRepository, CompanyRepository, EvaluationRepository};
use crate::domain::value_object::{
    fields::FieldErrors,
    rating::{Rating, RatingSummary},
};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct EvaluationInput {
    pub company_id: String,
    pub rating: String,
    pub comment: String,
}

/// A company with its evaluations and their mean
#[derive(Debug, Clone)]
pub struct CompanyPage {
    pub company: Company,
    pub evaluations: Vec<Evaluation>,
    pub summary: RatingSummary,
}

pub struct EvaluationUseCase<S>
where
    S: CompanyRepository + ApplicationRepository + EvaluationRepository,
{
    store: Arc<S>,
}

impl<S> EvaluationUseCase<S>
where
    S: CompanyRepository + ApplicationRepository + EvaluationRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Rate a company that selected the candidate for one of its jobs
    pub async fn evaluate(
        &self,
        candidate_id: &CandidateId,
        input: &EvaluationInput,
    ) -> RecruitmentResult<Evaluation> {
        let mut errors = FieldErrors::new();
        let company_id = errors.check(
            input
                .company_id
                .trim()
                .parse::<CompanyId>()
                .map_err(|_| "Empresa inválida.".to_string()),
        );
        let rating = errors.check(Rating::parse(&input.rating));
        errors.max_len(
            input.comment.trim(),
            MAX_COMMENT_CHARS,
            "O comentário deve ter no máximo 1000 caracteres.",
        );
        let (Some(company_id), Some(rating)) = (company_id, rating) else {
            return Err(RecruitmentError::Validation(errors.into_vec()));
        };
        errors.finish()?;

        if self.store.find_company(&company_id).await?.is_none() {
            return Err(RecruitmentError::CompanyNotFound);
        }
        if !self
            .store
            .has_selected_application(candidate_id, &company_id)
            .await?
        {
            return Err(RecruitmentError::NotSelected);
        }

        let evaluation = Evaluation::new(
            *candidate_id,
            company_id,
            rating,
            FieldErrors::optional(&input.comment),
        );
        self.store.create_evaluation(&evaluation).await?;

        tracing::info!(
            candidate_id = %candidate_id,
            company_id = %company_id,
            rating = rating.value(),
            "Company evaluated"
        );
        Ok(evaluation)
    }

    pub async fn company_page(&self, company_id: &CompanyId) -> RecruitmentResult<CompanyPage> {
        let company = self
            .store
            .find_company(company_id)
            .await?
            .ok_or(RecruitmentError::CompanyNotFound)?;
        let evaluations = self.store.list_company_evaluations(company_id).await?;
        let summary = RatingSummary::from_ratings(evaluations.iter().map(|e| &e.rating));

        Ok(CompanyPage {
            company,
            evaluations,
            summary,
        })
    }
}
