//! Log routing.
//!
//! A single console sink (stderr) always exists. Named loggers may be routed
//! to the console or to the null sink and may carry their own level; in
//! debug mode every logger is forced onto the console so nothing is dropped
//! during local development. [`LoggingSettings::init_tracing`] turns the
//! routing into an [`EnvFilter`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumString};
use tracing_subscriber::EnvFilter;

use crate::config::{non_empty, EnvSettings};
use crate::error::{Result, SettingsError};

/// Key of the root logger.
pub const ROOT_LOGGER: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[strum(to_string = "WARNING", serialize = "WARN")]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Handler {
    Console,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerSettings {
    pub handlers: Vec<Handler>,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggingSettings {
    pub handlers: Vec<Handler>,
    pub loggers: BTreeMap<String, LoggerSettings>,
    pub disable_existing_loggers: bool,
}

impl LoggingSettings {
    pub fn resolve(env: &EnvSettings, debug: bool) -> Self {
        let root_level = env
            .log_level()
            .and_then(|v| LogLevel::from_str(v).ok())
            .unwrap_or(LogLevel::Debug);

        let mut loggers = BTreeMap::new();
        if let Some(routes) = non_empty(&env.loggers) {
            loggers.extend(routes.split(',').filter_map(parse_logger));
        }
        loggers.insert(
            ROOT_LOGGER.to_string(),
            LoggerSettings {
                handlers: vec![Handler::Console],
                level: root_level,
            },
        );

        if debug {
            for logger in loggers.values_mut() {
                logger.handlers = vec![Handler::Console];
            }
        }

        Self {
            handlers: vec![Handler::Console, Handler::Null],
            loggers,
            disable_existing_loggers: false,
        }
    }

    pub fn root_level(&self) -> LogLevel {
        self.loggers
            .get(ROOT_LOGGER)
            .map(|l| l.level)
            .unwrap_or(LogLevel::Debug)
    }

    /// `EnvFilter` directives: the root level first, then one per named
    /// logger. Loggers without a console handler are switched off.
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![self.root_level().directive().to_string()];
        for (target, logger) in self.loggers.iter().filter(|(t, _)| !t.is_empty()) {
            let level = if logger.handlers.contains(&Handler::Console) {
                logger.level.directive()
            } else {
                "off"
            };
            directives.push(format!("{target}={level}"));
        }
        directives.join(",")
    }

    /// Install the process-wide subscriber. Call once, after resolution.
    pub fn init_tracing(&self) -> Result<()> {
        let filter = EnvFilter::try_new(self.filter_directives())
            .map_err(|e| SettingsError::Logging(e.to_string()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| SettingsError::Logging(e.to_string()))
    }
}

/// Console subscriber used while the record itself is being resolved, so
/// the cache fallback error reaches stderr before logging is configured.
pub fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .finish()
}

/// `target=LEVEL[:handler]`; anything malformed is dropped.
fn parse_logger(entry: &str) -> Option<(String, LoggerSettings)> {
    let (target, rest) = entry.trim().split_once('=')?;
    let target = target.trim();
    if target.is_empty() || !target.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':') {
        return None;
    }
    let (level, handler) = match rest.split_once(':') {
        Some((level, handler)) => (level, Handler::from_str(handler.trim()).ok()?),
        None => (rest, Handler::Console),
    };
    let level = LogLevel::from_str(level.trim()).ok()?;
    Some((
        target.to_string(),
        LoggerSettings {
            handlers: vec![handler],
            level,
        },
    ))
}
