//! Transactional mail
//!
//! A [`Mailer`] delivers plain-text messages through one of three
//! transports: the tracing log (development), an HTTP webhook that accepts
//! `{from, to, subject, text}` JSON, or an in-memory outbox used by tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail webhook answered {0}")]
    Rejected(reqwest::StatusCode),
}

/// Mail settings
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sender address
    pub from: String,
    /// Delivery endpoint; `None` logs messages instead of sending them
    pub webhook_url: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: "nao-responda@localhost".to_string(),
            webhook_url: None,
        }
    }
}

/// A plain-text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Messages captured by an in-memory mailer
pub type Outbox = Arc<Mutex<Vec<Mail>>>;

#[derive(Clone)]
enum Transport {
    Log,
    Webhook {
        client: reqwest::Client,
        url: String,
    },
    Memory(Outbox),
}

#[derive(Clone)]
pub struct Mailer {
    from: String,
    transport: Transport,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let transport = match config.webhook_url {
            Some(url) => Transport::Webhook {
                client: reqwest::Client::builder()
                    .timeout(Duration::from_secs(10))
                    .build()?,
                url,
            },
            None => Transport::Log,
        };
        Ok(Self {
            from: config.from,
            transport,
        })
    }

    /// Mailer that only writes to the log
    pub fn log_only() -> Self {
        Self {
            from: MailConfig::default().from,
            transport: Transport::Log,
        }
    }

    /// Mailer that keeps every message in the returned outbox
    pub fn memory() -> (Self, Outbox) {
        let outbox = Outbox::default();
        let mailer = Self {
            from: MailConfig::default().from,
            transport: Transport::Memory(outbox.clone()),
        };
        (mailer, outbox)
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), MailError> {
        let mail = Mail {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
        };

        match &self.transport {
            Transport::Log => {
                tracing::info!(to = %mail.to, subject = %mail.subject, body = %mail.text, "mail (log transport)");
            }
            Transport::Webhook { client, url } => {
                let response = client.post(url).json(&mail).send().await?;
                if !response.status().is_success() {
                    return Err(MailError::Rejected(response.status()));
                }
                tracing::debug!(to = %mail.to, subject = %mail.subject, "mail delivered");
            }
            Transport::Memory(outbox) => {
                if let Ok(mut sent) = outbox.lock() {
                    sent.push(mail);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transport = match &self.transport {
            Transport::Log => "log",
            Transport::Webhook { .. } => "webhook",
            Transport::Memory(_) => "memory",
        };
        f.debug_struct("Mailer")
            .field("from", &self.from)
            .field("transport", &transport)
            .finish()
    }
}
