//! Form DTOs (Data Transfer Objects)
//!
//! Field names are the ones the HTML forms post. Every field defaults to
//! blank so a missing input surfaces as a validation message instead of a
//! rejected request.

use serde::Deserialize;
use uuid::Uuid;

use crate::application::{
    CandidateDetailsInput, CandidateRegistrationInput, CompanyDetailsInput, CompanyEditInput,
    CompanyRegistrationInput, CourseInput, EvaluationInput, ExperienceInput, GoalsInput, JobInput,
    JobSearchInput,
};
use crate::domain::value_object::address::AddressInput;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub cep: String,
    #[serde(rename = "endereco")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "complemento")]
    pub complement: String,
}

impl From<AddressForm> for AddressInput {
    fn from(form: AddressForm) -> Self {
        AddressInput {
            postal_code: form.cep,
            street: form.street,
            number: form.number,
            district: form.district,
            city: form.city,
            state: form.state,
            complement: form.complement,
        }
    }
}

/// Company registration and profile fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyForm {
    #[serde(rename = "razaoSocial")]
    pub legal_name: String,
    #[serde(rename = "nomeFantasia")]
    pub trade_name: String,
    pub cnpj: String,
    #[serde(rename = "ie")]
    pub state_registration: String,
    #[serde(flatten)]
    pub address: AddressForm,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub whatsapp: String,
    #[serde(rename = "responsavel")]
    pub contact_person: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    pub bio: String,
    #[serde(rename = "site")]
    pub website: String,
    pub linkedin: String,
    pub instagram: String,
}

impl CompanyForm {
    fn details(&self) -> CompanyDetailsInput {
        CompanyDetailsInput {
            legal_name: self.legal_name.clone(),
            trade_name: self.trade_name.clone(),
            cnpj: self.cnpj.clone(),
            state_registration: self.state_registration.clone(),
            address: self.address.clone().into(),
            phone: self.phone.clone(),
            whatsapp: self.whatsapp.clone(),
            contact_person: self.contact_person.clone(),
            email: self.email.clone(),
        }
    }

    pub fn registration(&self) -> CompanyRegistrationInput {
        CompanyRegistrationInput {
            details: self.details(),
            password: self.password.clone(),
        }
    }

    pub fn edit(&self) -> CompanyEditInput {
        CompanyEditInput {
            details: self.details(),
            bio: self.bio.clone(),
            website: self.website.clone(),
            linkedin: self.linkedin.clone(),
            instagram: self.instagram.clone(),
        }
    }
}

/// Candidate registration and personal data fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateForm {
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(flatten)]
    pub address: AddressForm,
}

impl CandidateForm {
    pub fn details(&self) -> CandidateDetailsInput {
        CandidateDetailsInput {
            full_name: self.full_name.clone(),
            cpf: self.cpf.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone().into(),
        }
    }

    pub fn registration(&self) -> CandidateRegistrationInput {
        CandidateRegistrationInput {
            details: self.details(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalsForm {
    #[serde(rename = "contratoDesejado")]
    pub desired_contract: String,
    #[serde(rename = "ocupacao")]
    pub occupation: String,
    #[serde(rename = "faixaSalarial")]
    pub salary_band: String,
    #[serde(rename = "disponibilidade")]
    pub availability: String,
    #[serde(rename = "idiomas")]
    pub languages: String,
    #[serde(rename = "formacao")]
    pub education: String,
}

impl From<GoalsForm> for GoalsInput {
    fn from(form: GoalsForm) -> Self {
        GoalsInput {
            desired_contract: form.desired_contract,
            occupation: form.occupation,
            salary_band: form.salary_band,
            availability: form.availability,
            languages: form.languages,
            education: form.education,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobForm {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "cargo")]
    pub role: String,
    pub tags: String,
    #[serde(rename = "salario")]
    pub salary_band: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "modalidade")]
    pub work_mode: String,
    #[serde(rename = "horario")]
    pub schedule: String,
    #[serde(rename = "disponibilidade")]
    pub availability: String,
}

impl From<JobForm> for JobInput {
    fn from(form: JobForm) -> Self {
        JobInput {
            title: form.title,
            description: form.description,
            role: form.role,
            tags: form.tags,
            salary_band: form.salary_band,
            contract_type: form.contract_type,
            work_mode: form.work_mode,
            schedule: form.schedule,
            availability: form.availability,
        }
    }
}

/// `GET /candidato/vagas` query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobSearchQuery {
    pub q: String,
    #[serde(rename = "salario")]
    pub salary_band: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "disponibilidade")]
    pub availability: String,
    #[serde(rename = "pagina")]
    pub page: Option<u32>,
}

impl From<JobSearchQuery> for JobSearchInput {
    fn from(query: JobSearchQuery) -> Self {
        JobSearchInput {
            text: query.q,
            salary_band: query.salary_band,
            contract_type: query.contract_type,
            availability: query.availability,
            page: query.page,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    #[serde(rename = "pagina")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantsQuery {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplyForm {
    #[serde(rename = "vagaId")]
    pub job_id: String,
}

impl ApplyForm {
    pub fn job_id(&self) -> Option<Uuid> {
        Uuid::parse_str(self.job_id.trim()).ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvaluationForm {
    #[serde(rename = "empresaId")]
    pub company_id: String,
    #[serde(rename = "nota")]
    pub rating: String,
    #[serde(rename = "comentario")]
    pub comment: String,
}

impl From<EvaluationForm> for EvaluationInput {
    fn from(form: EvaluationForm) -> Self {
        EvaluationInput {
            company_id: form.company_id,
            rating: form.rating,
            comment: form.comment,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseForm {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "inicio")]
    pub started_on: String,
    #[serde(rename = "termino")]
    pub finished_on: String,
}

impl From<CourseForm> for CourseInput {
    fn from(form: CourseForm) -> Self {
        CourseInput {
            name: form.name,
            institution: form.institution,
            started_on: form.started_on,
            finished_on: form.finished_on,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceForm {
    #[serde(rename = "empresa")]
    pub company_name: String,
    #[serde(rename = "cargo")]
    pub position: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "inicio")]
    pub started_on: String,
    #[serde(rename = "termino")]
    pub finished_on: String,
}

impl From<ExperienceForm> for ExperienceInput {
    fn from(form: ExperienceForm) -> Self {
        ExperienceInput {
            company_name: form.company_name,
            position: form.position,
            description: form.description,
            started_on: form.started_on,
            finished_on: form.finished_on,
        }
    }
}

/// Ids posted as repeated `candidatura` fields; unparsable ones are skipped
pub fn selected_applications(pairs: &[(String, String)]) -> Vec<Uuid> {
    pairs
        .iter()
        .filter(|(name, _)| name == "candidatura")
        .filter_map(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .collect()
}
