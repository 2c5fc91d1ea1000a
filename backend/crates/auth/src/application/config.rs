//! Application Configuration
//!
//! Configuration for the Auth application layer. Built by the binary from
//! the environment; this crate never reads the environment itself.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::{SECRET_LEN, random_secret};

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// HMAC key for session and verification tokens
    pub session_secret: [u8; SECRET_LEN],
    /// Absolute session lifetime (no refresh)
    pub session_ttl: Duration,
    /// Lifetime of e-mail verification links
    pub verification_ttl: Duration,
    /// Whether to mark the cookie `Secure`
    pub cookie_secure: bool,
    /// Application-wide secret appended before hashing
    pub password_pepper: Option<Vec<u8>>,
    /// Refuse logins until the e-mail is confirmed
    pub require_email_verification: bool,
    /// Base for links placed in e-mails
    pub public_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_string(),
            session_secret: [0u8; SECRET_LEN],
            session_ttl: Duration::from_secs(3600),
            verification_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            password_pepper: None,
            require_email_verification: true,
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Config with a random signing secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Development: random secret, insecure cookie
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the session cookie (HttpOnly, SameSite=Strict)
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::session(
            self.cookie_name.clone(),
            self.cookie_secure,
            self.session_ttl.as_secs() as i64,
        )
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/auth/verificar?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }
}
