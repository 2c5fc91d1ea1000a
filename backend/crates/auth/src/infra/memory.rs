//! In-memory account store for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::AccountId;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
}

impl MemoryAccountRepository {
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AccountId, Account>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create_account(&self, account: &Account) -> AuthResult<()> {
        let mut accounts = self.lock();
        if accounts
            .values()
            .any(|a| a.role == account.role && a.email == account.email)
        {
            return Err(AuthError::EmailTaken);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn find_account_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self.lock().get(account_id).cloned())
    }

    async fn find_account_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> AuthResult<Option<Account>> {
        Ok(self
            .lock()
            .values()
            .find(|a| a.role == role && &a.email == email)
            .cloned())
    }

    async fn update_account(&self, account: &Account) -> AuthResult<()> {
        let mut accounts = self.lock();
        let slot = accounts
            .get_mut(&account.account_id)
            .ok_or(AuthError::AccountNotFound)?;
        *slot = account.clone();
        Ok(())
    }
}
