//! Startup settings for the CMS web application.
//!
//! [`Settings::from_env`] reads the environment once, picks the deployment
//! mode (develop, test, production or hosted platform) and returns an
//! immutable record with the database, cache, storage, asset, task-queue,
//! email, logging and error-reporting parameters for that mode. Callers keep
//! the record and pass it by reference.

pub mod advisory;
pub mod assets;
pub mod cache;
pub mod config;
pub mod database;
pub mod email;
pub mod error;
pub mod logging;
pub mod mode;
pub mod paths;
pub mod prerender;
pub mod production;
pub mod resolver;
pub mod security;
pub mod site;
pub mod storage;
pub mod task_queue;

pub use advisory::Advisory;
pub use cache::{CacheConnector, CacheSettings, RedisConnector};
pub use crate::config::EnvSettings;
pub use error::{CacheError, Result, SettingsError};
pub use mode::{DeploymentMode, InvocationContext};
pub use resolver::Settings;
