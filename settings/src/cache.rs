//! Cache backend selection.
//!
//! Test runs always get the in-process cache, whatever mode was detected
//! (a test run on the hosted platform included). Everything else asks a
//! [`CacheConnector`] to build a Redis client for the configured location;
//! if that fails the error is logged once and the in-process cache is used
//! instead, so a bad cache setting never stops the process from starting.

use serde::Serialize;
use tracing::error;

use crate::config::{non_empty, parse_or, EnvSettings};
use crate::error::CacheError;
use crate::site::SITE_SLUG;

pub const DEFAULT_REDIS_HOST: &str = "redis://redis";
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Builds a client for the distributed cache without talking to it.
pub trait CacheConnector {
    fn connect(&self, location: &str) -> Result<(), CacheError>;
}

/// Validates the location by constructing a [`redis::Client`]. No
/// connection is opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct RedisConnector;

impl CacheConnector for RedisConnector {
    fn connect(&self, location: &str) -> Result<(), CacheError> {
        redis::Client::open(location)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum CacheSettings {
    Redis {
        location: String,
        key_prefix: String,
    },
    /// In-process cache. `location` names the instance when several share a
    /// process; the fallback leaves it unset.
    LocalMemory {
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
}

impl CacheSettings {
    pub fn resolve(location: &str, test_runner: bool, connector: &dyn CacheConnector) -> Self {
        if test_runner {
            return Self::LocalMemory {
                location: Some(SITE_SLUG.to_string()),
            };
        }
        match connector.connect(location) {
            Ok(()) => Self::Redis {
                location: location.to_string(),
                key_prefix: SITE_SLUG.to_string(),
            },
            Err(e) => {
                error!(%e, location, "error loading cache, falling back to memory cache");
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self::LocalMemory { location: None }
    }

    pub fn is_distributed(&self) -> bool {
        matches!(self, Self::Redis { .. })
    }
}

/// `REDIS_URL` if set, otherwise `REDIS_HOST:REDIS_PORT` with defaults.
/// Shared by the cache and the task broker.
pub fn redis_url(env: &EnvSettings) -> String {
    if let Some(url) = non_empty(&env.redis_url) {
        return url.to_string();
    }
    let host = non_empty(&env.redis_host).unwrap_or(DEFAULT_REDIS_HOST);
    let port = parse_or(&env.redis_port, DEFAULT_REDIS_PORT);
    format!("{host}:{port}")
}
