use serde::Serialize;
use thiserror::Error;

/// Something about the resolved record an operator should know.
///
/// Collected silently while resolving; the process reports them once
/// logging is installed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Advisory {
    #[error("no SECRET_KEY configured, sessions will not survive a restart")]
    EphemeralSecretKey,
    #[error("DATABASE_URL not set on the hosting platform, using default database target")]
    PlatformDatabaseUrlMissing,
    #[error("DATABASE_URL could not be parsed ({0}), using default database target")]
    PlatformDatabaseUrlInvalid(String),
    #[error("SENTRY_DSN not set, error reporting is disabled")]
    ErrorReportingDsnMissing,
}
