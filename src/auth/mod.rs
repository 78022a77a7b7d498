pub mod middleware;

use axum::http::HeaderMap;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, Result};

pub use middleware::require_captcha;

/// siteverify response; only `success` drives the decision.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// CAPTCHA token verifier (reCAPTCHA siteverify)
#[derive(Clone)]
pub struct CaptchaVerifier {
    client: Client,
    secret: String,
    verify_url: String,
}

impl CaptchaVerifier {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            secret: config.captcha_secret.clone(),
            verify_url: config.captcha_verify_url.clone(),
        }
    }

    /// Ask the verification service whether `token` was solved by a human.
    /// Transport and decoding failures count as a rejection.
    pub async fn verify(&self, token: &str) -> bool {
        match self.siteverify(token).await {
            Ok(result) => {
                if !result.success {
                    tracing::debug!(error_codes = ?result.error_codes, "CAPTCHA rejected");
                }
                result.success
            }
            Err(e) => {
                tracing::warn!(error = %e, "CAPTCHA verification request failed");
                false
            }
        }
    }

    async fn siteverify(&self, token: &str) -> reqwest::Result<SiteVerifyResponse> {
        self.client
            .post(&self.verify_url)
            .query(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?
            .json::<SiteVerifyResponse>()
            .await
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or_else(|| {
            AppError::Unauthorized("Missing or invalid Authorization header".to_string())
        })
}
