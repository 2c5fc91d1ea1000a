//! Account Password Value Objects
//!
//! Domain wrappers around `platform::password`: [`RawPassword`] for what the
//! user typed, [`AccountPassword`] for the stored Argon2id hash.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

/// Password as typed by the user; zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the sign-up policy.
    ///
    /// The error is the user-facing message.
    pub fn new(raw: String) -> Result<Self, String> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| e.to_string())
    }

    /// Login attempts are never policy-checked
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored password hash
#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn as_phc(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Login against an account that does not exist; always `false`, after
    /// the same hashing work as [`AccountPassword::verify`]
    pub fn verify_missing(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        platform::password::verify_without_hash(raw.inner(), pepper)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_message_is_portuguese() {
        let err = RawPassword::new("123".to_string()).unwrap_err();
        assert_eq!(err, "A senha deve ter pelo menos 6 caracteres.");
    }

    #[test]
    fn test_hash_verify_with_login_password() {
        let raw = RawPassword::new("segredo1".to_string()).unwrap();
        let stored = AccountPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(stored.verify(&RawPassword::for_login("segredo1".into()), Some(b"pepper")));
        assert!(!stored.verify(&RawPassword::for_login("segredo2".into()), Some(b"pepper")));

        let restored = AccountPassword::from_db(stored.as_phc()).unwrap();
        assert_eq!(restored, stored);
    }

    #[test]
    fn test_missing_account_never_verifies() {
        let raw = RawPassword::for_login("conta-inexistente".into());
        assert!(!AccountPassword::verify_missing(&raw, None));
        assert!(!AccountPassword::verify_missing(&raw, Some(b"pepper")));
    }
}
