//! Settings that exist only in production.
//!
//! They carry secrets and remote endpoints, so the record holds them as an
//! `Option` that is `None` outside production rather than a disabled value.

use serde::Serialize;

use crate::advisory::Advisory;
use crate::config::{non_empty, EnvSettings};
use crate::security::Secret;
use crate::storage::S3Settings;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReportingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsn: Option<Secret>,
    pub release: String,
}

impl ErrorReportingSettings {
    fn resolve(env: &EnvSettings) -> Self {
        Self {
            dsn: Secret::non_empty(&env.sentry_dsn),
            release: non_empty(&env.source_version)
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionSettings {
    pub secure_ssl_redirect: bool,
    pub error_reporting: ErrorReportingSettings,
}

impl ProductionSettings {
    /// Production extras plus the remote upload bucket.
    pub(crate) fn resolve(env: &EnvSettings) -> (Self, S3Settings, Option<Advisory>) {
        let error_reporting = ErrorReportingSettings::resolve(env);
        let advisory = error_reporting
            .dsn
            .is_none()
            .then_some(Advisory::ErrorReportingDsnMissing);
        (
            Self {
                secure_ssl_redirect: true,
                error_reporting,
            },
            S3Settings::resolve(env),
            advisory,
        )
    }
}
