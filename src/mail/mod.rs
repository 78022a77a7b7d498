pub mod envelope;
pub mod mailtrap;

use serde_json::Value;

use crate::config::Config;

pub use envelope::{Address, Envelope, Sender};

/// Errors raised while handing an envelope to the delivery provider.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Mailer abstraction (currently backed by Mailtrap)
#[derive(Clone)]
pub struct Mailer {
    inner: mailtrap::MailtrapClient,
}

impl Mailer {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            inner: mailtrap::MailtrapClient::new(
                client,
                config.mailtrap_token.clone(),
                &config.mailtrap_api_url,
            ),
        }
    }

    /// Deliver an envelope, returning the provider response as-is.
    pub async fn send(&self, envelope: &Envelope) -> Result<Value, MailError> {
        let recipients = envelope.recipient_count();
        let response = self.inner.send(envelope).await?;
        tracing::info!(recipients, subject = %envelope.subject, "Email relayed");
        Ok(response)
    }
}
