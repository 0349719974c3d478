use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Environment error: {0}")]
    Environment(#[from] config::ConfigError),
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Failure to build a client for the distributed cache.
///
/// Never escapes the resolver: it is logged and replaced by the in-process
/// cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Cache backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
