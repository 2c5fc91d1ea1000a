use serde::{Deserialize, Serialize};
use std::fmt;

/// Who an account belongs to. Each role has its own login page and area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "empresa")]
    Company,
    #[serde(rename = "candidato")]
    Candidate,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Company, Role::Candidate, Role::Admin];

    /// Stored and transported code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Company => "empresa",
            Role::Candidate => "candidato",
            Role::Admin => "admin",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Role::Company => "Empresa",
            Role::Candidate => "Candidato",
            Role::Admin => "Administrador",
        }
    }

    /// Where unauthenticated requests for this role are sent
    #[inline]
    pub const fn login_path(&self) -> &'static str {
        match self {
            Role::Company => "/auth/login_empresa",
            Role::Candidate => "/auth/login_candidato",
            Role::Admin => "/auth/login_admin",
        }
    }

    /// Landing page after a successful login
    #[inline]
    pub const fn home_path(&self) -> &'static str {
        match self {
            Role::Company => "/empresa/dashboard",
            Role::Candidate => "/candidato/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    /// Self-service registration page, if the role has one
    #[inline]
    pub const fn register_path(&self) -> Option<&'static str> {
        match self {
            Role::Company => Some("/auth/register_empresa"),
            Role::Candidate => Some("/auth/register_candidato"),
            Role::Admin => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_code_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
        assert_eq!(Role::from_code("super_admin"), None);
    }

    #[test]
    fn test_role_paths() {
        assert_eq!(Role::Company.login_path(), "/auth/login_empresa");
        assert_eq!(Role::Candidate.home_path(), "/candidato/dashboard");
        assert_eq!(Role::Admin.register_path(), None);
    }

    #[test]
    fn test_role_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Role::Candidate).unwrap(), "\"candidato\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
