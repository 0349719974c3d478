use serde::Serialize;

use crate::config::{non_empty, parse_or, EnvSettings};
use crate::security::Secret;

pub const DEFAULT_EMAIL_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_EMAIL_PORT: u16 = 587;

/// Outbound SMTP. Credentials only ever come from the environment.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_password: Option<Secret>,
}

impl EmailSettings {
    pub fn resolve(env: &EnvSettings) -> Self {
        Self {
            host: non_empty(&env.email_host)
                .unwrap_or(DEFAULT_EMAIL_HOST)
                .to_string(),
            port: parse_or(&env.email_port, DEFAULT_EMAIL_PORT),
            use_tls: true,
            host_user: non_empty(&env.email_host_user).map(str::to_string),
            host_password: Secret::non_empty(&env.email_host_password),
        }
    }
}
