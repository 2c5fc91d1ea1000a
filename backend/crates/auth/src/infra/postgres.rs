//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::AccountId;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::AccountPassword, email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    role,
    email,
    password_hash,
    email_verified,
    verification_token,
    created_at,
    updated_at
"#;

/// Insert an account on an open connection or transaction.
///
/// Shared with profile registration so account and profile commit together.
pub async fn insert_account(conn: &mut PgConnection, account: &Account) -> AuthResult<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO accounts (
            account_id,
            role,
            email,
            password_hash,
            email_verified,
            verification_token,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(account.account_id.as_uuid())
    .bind(account.role.code())
    .bind(account.email.as_str())
    .bind(account.password.as_phc())
    .bind(account.email_verified)
    .bind(account.verification_token.as_deref())
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(conn)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AuthError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

/// Change the login e-mail of an account on an open transaction.
pub async fn update_account_email(
    conn: &mut PgConnection,
    account_id: &AccountId,
    email: &Email,
) -> AuthResult<()> {
    let result = sqlx::query("UPDATE accounts SET email = $2, updated_at = NOW() WHERE account_id = $1")
        .bind(account_id.as_uuid())
        .bind(email.as_str())
        .execute(conn)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AuthError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

impl AccountRepository for PgAuthRepository {
    async fn create_account(&self, account: &Account) -> AuthResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_account(&mut conn, account).await
    }

    async fn find_account_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_id = $1"
        ))
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_account_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE role = $1 AND email = $2"
        ))
        .bind(role.code())
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn update_account(&self, account: &Account) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                password_hash = $3,
                email_verified = $4,
                verification_token = $5,
                updated_at = $6
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password.as_phc())
        .bind(account.email_verified)
        .bind(account.verification_token.as_deref())
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AuthError::AccountNotFound),
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    role: String,
    email: String,
    password_hash: String,
    email_verified: bool,
    verification_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let role = Role::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            role,
            email: Email::from_db(self.email),
            password: AccountPassword::from_db(self.password_hash)?,
            email_verified: self.email_verified,
            verification_token: self.verification_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
