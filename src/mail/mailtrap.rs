use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{Envelope, MailError};

/// Client for the Mailtrap Email Sending API.
#[derive(Clone)]
pub struct MailtrapClient {
    client: Client,
    api_token: String,
    endpoint: String,
}

/// Error body returned by Mailtrap on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

impl MailtrapClient {
    pub fn new(client: Client, api_token: String, base_url: &str) -> Self {
        Self {
            client,
            api_token,
            endpoint: format!("{}/api/send", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one envelope and return the provider's response body.
    pub async fn send(&self, envelope: &Envelope) -> Result<Value, MailError> {
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(envelope)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(MailError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| MailError::InvalidResponse(e.to_string()))
    }
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join(", "),
        Ok(ApiErrorBody {
            error: Some(error), ..
        }) => error,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Mailtrap API responded with status {}", status),
    }
}
