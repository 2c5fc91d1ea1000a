//! Company profile: validation, edit and logo upload

use std::sync::Arc;

use auth::domain::Email;
use kernel::id::CompanyId;
use platform::media::{UploadStore, UploadedFile};

use crate::domain::entity::company::{Company, CompanyDetails, CompanyProfile};
use crate::domain::repository::CompanyRepository;
use crate::domain::value_object::{
    address::{Address, AddressInput},
    document::Cnpj,
    fields::FieldErrors,
};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_BIO_CHARS: usize = 2000;
const MAX_LINK_CHARS: usize = 300;

/// Raw company fields shared by registration and profile edit
#[derive(Debug, Clone, Default)]
pub struct CompanyDetailsInput {
    pub legal_name: String,
    pub trade_name: String,
    pub cnpj: String,
    pub state_registration: String,
    pub address: AddressInput,
    pub phone: String,
    pub whatsapp: String,
    pub contact_person: String,
    pub email: String,
}

impl CompanyDetailsInput {
    pub fn validate(&self, errors: &mut FieldErrors) -> Option<CompanyDetails> {
        let before = errors.len();

        let legal_name = errors.required(&self.legal_name, "Razão Social é obrigatória.");
        let trade_name = errors.required(&self.trade_name, "Nome Fantasia é obrigatório.");
        let cnpj = errors.check(Cnpj::new(&self.cnpj));
        let address = Address::parse(&self.address, errors);
        let phone = errors.required(&self.phone, "Telefone é obrigatório.");
        let whatsapp = errors.required(&self.whatsapp, "WhatsApp é obrigatório.");
        let contact_person =
            errors.required(&self.contact_person, "Nome do responsável é obrigatório.");
        let email = errors.check(Email::new(self.email.as_str()).map_err(|e| e.message().to_string()));

        if errors.len() > before {
            return None;
        }
        Some(CompanyDetails {
            cnpj: cnpj?,
            legal_name,
            trade_name,
            state_registration: FieldErrors::optional(&self.state_registration),
            address: address?,
            phone,
            whatsapp,
            contact_person,
            email: email?,
        })
    }

    pub fn from_details(details: &CompanyDetails) -> Self {
        Self {
            legal_name: details.legal_name.clone(),
            trade_name: details.trade_name.clone(),
            cnpj: details.cnpj.to_string(),
            state_registration: details.state_registration.clone().unwrap_or_default(),
            address: details.address.to_input(),
            phone: details.phone.clone(),
            whatsapp: details.whatsapp.clone(),
            contact_person: details.contact_person.clone(),
            email: details.email.to_string(),
        }
    }
}

/// Profile edit form: registration fields minus password, plus public text
#[derive(Debug, Clone, Default)]
pub struct CompanyEditInput {
    pub details: CompanyDetailsInput,
    pub bio: String,
    pub website: String,
    pub linkedin: String,
    pub instagram: String,
}

impl CompanyEditInput {
    pub fn from_company(company: &Company) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            details: CompanyDetailsInput::from_details(&company.details),
            bio: text(&company.profile.bio),
            website: text(&company.profile.website),
            linkedin: text(&company.profile.linkedin),
            instagram: text(&company.profile.instagram),
        }
    }

    fn validate(&self) -> RecruitmentResult<(CompanyDetails, CompanyProfile)> {
        let mut errors = FieldErrors::new();
        let details = self.details.validate(&mut errors);

        errors.max_len(&self.bio, MAX_BIO_CHARS, "A descrição deve ter no máximo 2000 caracteres.");
        for link in [&self.website, &self.linkedin, &self.instagram] {
            errors.max_len(link, MAX_LINK_CHARS, "Links devem ter no máximo 300 caracteres.");
        }
        errors.finish()?;

        let details = details.ok_or_else(|| RecruitmentError::Internal("validated details missing".into()))?;
        Ok((
            details,
            CompanyProfile {
                bio: FieldErrors::optional(&self.bio),
                website: FieldErrors::optional(&self.website),
                linkedin: FieldErrors::optional(&self.linkedin),
                instagram: FieldErrors::optional(&self.instagram),
            },
        ))
    }
}

pub struct CompanyProfileUseCase<S>
where
    S: CompanyRepository,
{
    store: Arc<S>,
}

impl<S> CompanyProfileUseCase<S>
where
    S: CompanyRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn get(&self, company_id: &CompanyId) -> RecruitmentResult<Company> {
        self.store
            .find_company(company_id)
            .await?
            .ok_or(RecruitmentError::CompanyNotFound)
    }

    /// Save an edited profile. A new e-mail also becomes the login e-mail.
    pub async fn edit(&self, company_id: &CompanyId, input: &CompanyEditInput) -> RecruitmentResult<Company> {
        let (details, profile) = input.validate()?;
        let mut company = self.get(company_id).await?;
        company.edit(details, profile);
        self.store.update_company(&company).await?;

        tracing::info!(company_id = %company_id, "Company profile updated");
        Ok(company)
    }

    /// Store a resized logo, then point the profile at it.
    ///
    /// The old file is removed only after the record has moved on; a failed
    /// update discards the new file instead.
    pub async fn replace_logo(
        &self,
        uploads: &UploadStore,
        company_id: &CompanyId,
        file: &UploadedFile,
    ) -> RecruitmentResult<String> {
        let path = uploads.store_image(file).await?;

        match self.store.replace_company_logo(company_id, &path).await {
            Ok(previous) => {
                uploads.discard(previous.as_deref()).await;
                tracing::info!(company_id = %company_id, logo = %path, "Company logo replaced");
                Ok(path)
            }
            Err(e) => {
                uploads.discard(Some(&path)).await;
                Err(e)
            }
        }
    }
}
