//! Server configuration
//!
//! Everything the binary reads from the environment, turned into the typed
//! config structs of the library crates.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto::{SECRET_LEN, from_base64, random_secret};
use platform::mail::MailConfig;
use platform::media::UploadConfig;

/// Administrator created at startup when both variables are set
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub uploads: UploadConfig,
    pub admin: Option<AdminBootstrap>,
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag(name: &str, default: bool) -> anyhow::Result<bool> {
    match var(name).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => bail!("{name} must be true or false, got {other:?}"),
    }
}

fn session_secret(production: bool) -> anyhow::Result<[u8; SECRET_LEN]> {
    let Some(encoded) = var("SESSION_SECRET") else {
        if production {
            bail!("SESSION_SECRET must be set in production");
        }
        tracing::warn!("SESSION_SECRET not set, using a random secret; sessions end on restart");
        return Ok(random_secret());
    };

    let bytes = from_base64(&encoded).context("SESSION_SECRET is not valid Base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must decode to {SECRET_LEN} bytes, got {}", b.len()))
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let production = var("APP_ENV").is_some_and(|v| v == "production");

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let auth = AuthConfig {
            session_secret: session_secret(production)?,
            session_ttl: Duration::from_secs(3600),
            cookie_secure: production,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            require_email_verification: flag("REQUIRE_EMAIL_VERIFICATION", true)?,
            public_base_url,
            ..AuthConfig::default()
        };

        let mail = MailConfig {
            from: var("MAIL_FROM").unwrap_or_else(|| MailConfig::default().from),
            webhook_url: var("MAIL_WEBHOOK_URL"),
        };

        let uploads = UploadConfig {
            root: var("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("uploads")),
            ..UploadConfig::default()
        };

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (None, None) => None,
            _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database_url,
            bind_addr,
            auth,
            mail,
            uploads,
            admin,
        })
    }
}
