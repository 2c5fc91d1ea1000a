//! Repository Traits
//!
//! Persistence interface for accounts. PostgreSQL lives in `infra`.

use kernel::id::AccountId;

use crate::domain::entity::account::Account;
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::AuthResult;

#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; a taken `(role, email)` yields `AuthError::EmailTaken`
    async fn create_account(&self, account: &Account) -> AuthResult<()>;

    async fn find_account_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    async fn find_account_by_email(&self, role: Role, email: &Email)
    -> AuthResult<Option<Account>>;

    /// Persist verification state and credentials
    async fn update_account(&self, account: &Account) -> AuthResult<()>;
}
