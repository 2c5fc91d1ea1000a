//! Candidate profile: personal data, goals and résumé

use std::sync::Arc;

use auth::domain::Email;
use kernel::id::CandidateId;
use platform::media::{UploadStore, UploadedFile};

use crate::domain::entity::candidate::{Candidate, CandidateDetails, CandidateGoals};
use crate::domain::repository::CandidateRepository;
use crate::domain::value_object::{
    address::{Address, AddressInput},
    catalog::{Availability, ContractType, SalaryBand},
    document::Cpf,
    fields::{FieldErrors, split_list},
};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_OCCUPATION_CHARS: usize = 120;

/// Raw personal fields shared by registration and profile edit
#[derive(Debug, Clone, Default)]
pub struct CandidateDetailsInput {
    pub full_name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: AddressInput,
}

impl CandidateDetailsInput {
    pub fn validate(&self, errors: &mut FieldErrors) -> Option<CandidateDetails> {
        let before = errors.len();

        let full_name = errors.required(&self.full_name, "Nome completo é obrigatório.");
        let cpf = errors.check(Cpf::new(&self.cpf));
        let phone = errors.required(&self.phone, "Telefone é obrigatório.");
        let email = errors.check(Email::new(self.email.as_str()).map_err(|e| e.message().to_string()));
        let address = Address::parse(&self.address, errors);

        if errors.len() > before {
            return None;
        }
        Some(CandidateDetails {
            full_name,
            cpf: cpf?,
            phone,
            email: email?,
            address: address?,
        })
    }

    pub fn from_details(details: &CandidateDetails) -> Self {
        Self {
            full_name: details.full_name.clone(),
            cpf: details.cpf.to_string(),
            phone: details.phone.clone(),
            email: details.email.to_string(),
            address: details.address.to_input(),
        }
    }
}

/// Goals form; catalog fields carry their codes, lists are comma-separated
#[derive(Debug, Clone, Default)]
pub struct GoalsInput {
    pub desired_contract: String,
    pub occupation: String,
    pub salary_band: String,
    pub availability: String,
    pub languages: String,
    pub education: String,
}

impl GoalsInput {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let goals = &candidate.goals;
        Self {
            desired_contract: goals.desired_contract.map(|c| c.code().to_string()).unwrap_or_default(),
            occupation: goals.occupation.clone().unwrap_or_default(),
            salary_band: goals.salary_band.map(|s| s.code().to_string()).unwrap_or_default(),
            availability: goals.availability.map(|a| a.code().to_string()).unwrap_or_default(),
            languages: candidate.languages.join(", "),
            education: candidate.education.join(", "),
        }
    }

    fn validate(&self) -> RecruitmentResult<(CandidateGoals, Vec<String>, Vec<String>)> {
        let mut errors = FieldErrors::new();
        let desired_contract = errors.check(ContractType::parse_optional(&self.desired_contract));
        let salary_band = errors.check(SalaryBand::parse_optional(&self.salary_band));
        let availability = errors.check(Availability::parse_optional(&self.availability));
        errors.max_len(
            &self.occupation,
            MAX_OCCUPATION_CHARS,
            "A ocupação deve ter no máximo 120 caracteres.",
        );
        errors.finish()?;

        let goals = CandidateGoals {
            desired_contract: desired_contract.flatten(),
            occupation: FieldErrors::optional(&self.occupation),
            salary_band: salary_band.flatten(),
            availability: availability.flatten(),
        };
        Ok((goals, split_list(&self.languages), split_list(&self.education)))
    }
}

pub struct CandidateProfileUseCase<S>
where
    S: CandidateRepository,
{
    store: Arc<S>,
}

impl<S> CandidateProfileUseCase<S>
where
    S: CandidateRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn get(&self, candidate_id: &CandidateId) -> RecruitmentResult<Candidate> {
        self.store
            .find_candidate(candidate_id)
            .await?
            .ok_or(RecruitmentError::CandidateNotFound)
    }

    pub async fn edit(
        &self,
        candidate_id: &CandidateId,
        input: &CandidateDetailsInput,
    ) -> RecruitmentResult<Candidate> {
        let mut errors = FieldErrors::new();
        let details = input.validate(&mut errors);
        errors.finish()?;
        let details =
            details.ok_or_else(|| RecruitmentError::Internal("validated details missing".into()))?;

        let mut candidate = self.get(candidate_id).await?;
        candidate.edit(details);
        self.store.update_candidate(&candidate).await?;

        tracing::info!(candidate_id = %candidate_id, "Candidate profile updated");
        Ok(candidate)
    }

    pub async fn set_goals(
        &self,
        candidate_id: &CandidateId,
        input: &GoalsInput,
    ) -> RecruitmentResult<Candidate> {
        let (goals, languages, education) = input.validate()?;
        let mut candidate = self.get(candidate_id).await?;
        candidate.set_goals(goals, languages, education);
        self.store.update_candidate(&candidate).await?;

        tracing::info!(candidate_id = %candidate_id, "Candidate goals updated");
        Ok(candidate)
    }

    /// Store the résumé, then point the profile at it; the previous file is
    /// removed afterwards
    pub async fn replace_resume(
        &self,
        uploads: &UploadStore,
        candidate_id: &CandidateId,
        file: &UploadedFile,
    ) -> RecruitmentResult<String> {
        let path = uploads.store_document(file).await?;

        match self.store.replace_candidate_resume(candidate_id, &path).await {
            Ok(previous) => {
                uploads.discard(previous.as_deref()).await;
                tracing::info!(candidate_id = %candidate_id, resume = %path, "Résumé replaced");
                Ok(path)
            }
            Err(e) => {
                uploads.discard(Some(&path)).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goals_reject_unknown_codes() {
        let input = GoalsInput {
            desired_contract: "vitalicio".into(),
            salary_band: "ate_2000".into(),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.form_errors().map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_goals_split_lists() {
        let input = GoalsInput {
            availability: "15_dias".into(),
            languages: "Inglês, Espanhol".into(),
            education: " ".into(),
            ..Default::default()
        };
        let (goals, languages, education) = input.validate().unwrap();
        assert_eq!(goals.availability, Some(Availability::FifteenDays));
        assert!(goals.desired_contract.is_none());
        assert_eq!(languages, vec!["Inglês", "Espanhol"]);
        assert!(education.is_empty());
    }

    #[test]
    fn test_details_collect_every_problem() {
        let mut errors = FieldErrors::new();
        let details = CandidateDetailsInput {
            cpf: "123".into(),
            email: "nada".into(),
            ..Default::default()
        }
        .validate(&mut errors);
        assert!(details.is_none());
        let messages = errors.into_vec();
        assert!(messages.contains(&"Nome completo é obrigatório.".to_string()));
        assert!(messages.contains(&"CPF inválido.".to_string()));
        assert!(messages.contains(&"E-mail inválido.".to_string()));
        assert!(messages.contains(&"CEP é obrigatório.".to_string()));
    }
}
