//! Form DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "senha")]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(default)]
    pub token: String,
}

/// Request for a new verification link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResendVerificationForm {
    /// Role code (`empresa` or `candidato`)
    #[serde(default, rename = "tipo")]
    pub role: String,
    #[serde(default)]
    pub email: String,
}
