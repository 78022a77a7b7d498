use std::sync::Arc;

use crate::auth::CaptchaVerifier;
use crate::config::Config;
use crate::mail::{Mailer, Sender};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<CaptchaVerifier>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    pub fn new(config: Config, verifier: CaptchaVerifier, mailer: Mailer) -> Self {
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            mailer: Arc::new(mailer),
        }
    }

    /// Build every collaborator from config, sharing one HTTP connection pool.
    pub fn from_config(config: Config) -> Self {
        let client = reqwest::Client::new();
        let verifier = CaptchaVerifier::new(&config, client.clone());
        let mailer = Mailer::new(&config, client);
        Self::new(config, verifier, mailer)
    }

    /// Sender identity for the generic relay endpoint.
    pub fn relay_sender(&self) -> Sender {
        Sender {
            name: self.config.sender_name.clone(),
            email: self.config.sender_email.clone(),
        }
    }
}
