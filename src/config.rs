use std::env;

pub const DEFAULT_CAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
pub const DEFAULT_MAILTRAP_API_URL: &str = "https://send.api.mailtrap.io";
pub const DEFAULT_SENDER_NAME: &str = "Sanjeev Kumar Singh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mailtrap_token: String,
    pub mailtrap_api_url: String,
    pub captcha_secret: String,
    pub captcha_verify_url: String,
    pub sender_name: String,
    pub sender_email: String,
    pub receiver_email: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            mailtrap_token: required("MAILTRAP_TOKEN")?,
            mailtrap_api_url: env::var("MAILTRAP_API_URL")
                .unwrap_or_else(|_| DEFAULT_MAILTRAP_API_URL.to_string()),
            captcha_secret: required("CAPTCHA_SECRET")?,
            captcha_verify_url: env::var("CAPTCHA_VERIFY_URL")
                .unwrap_or_else(|_| DEFAULT_CAPTCHA_VERIFY_URL.to_string()),
            sender_name: env::var("SENDER_NAME")
                .unwrap_or_else(|_| DEFAULT_SENDER_NAME.to_string()),
            sender_email: required("SENDER_EMAIL")?,
            // Deployed configs use the historical spelling.
            receiver_email: optional("RECIVER_EMAIL").or_else(|| optional("RECEIVER_EMAIL")),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}
