//! Company entity

use auth::domain::Email;
use chrono::{DateTime, Utc};
use kernel::id::CompanyId;

use crate::domain::value_object::{address::Address, document::Cnpj};

/// Validated company data, as registered or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDetails {
    pub cnpj: Cnpj,
    pub legal_name: String,
    pub trade_name: String,
    /// Inscrição estadual
    pub state_registration: Option<String>,
    pub address: Address,
    pub phone: String,
    pub whatsapp: String,
    pub contact_person: String,
    pub email: Email,
}

/// Optional public profile text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyProfile {
    pub bio: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Company {
    /// Same UUID as the owning account
    pub company_id: CompanyId,
    pub details: CompanyDetails,
    pub profile: CompanyProfile,
    /// Public path of the resized logo
    pub logo_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(company_id: CompanyId, details: CompanyDetails) -> Self {
        let now = Utc::now();
        Self {
            company_id,
            details,
            profile: CompanyProfile::default(),
            logo_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown on listings
    pub fn display_name(&self) -> &str {
        &self.details.trade_name
    }

    pub fn edit(&mut self, details: CompanyDetails, profile: CompanyProfile) {
        self.details = details;
        self.profile = profile;
        self.updated_at = Utc::now();
    }
}
