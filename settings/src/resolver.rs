//! The configuration record and the resolver that builds it.

use serde::Serialize;

use crate::advisory::Advisory;
use crate::assets::BundleLoaderSettings;
use crate::cache::{redis_url, CacheConnector, CacheSettings, RedisConnector};
use crate::config::EnvSettings;
use crate::database::DatabaseSettings;
use crate::email::EmailSettings;
use crate::error::Result;
use crate::logging::LoggingSettings;
use crate::mode::{DeploymentMode, InvocationContext};
use crate::paths::ProjectPaths;
use crate::prerender::PrerenderSettings;
use crate::production::ProductionSettings;
use crate::security::{HostSettings, SecretKey};
use crate::site::SiteSettings;
use crate::storage::{FileStorage, StaticFilesSettings};
use crate::task_queue::TaskQueueSettings;

/// Everything the application reads at startup. Built once by
/// [`Settings::resolve`] and never changed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub mode: DeploymentMode,
    pub debug: bool,
    pub testing: bool,
    pub secret_key: SecretKey,
    pub site: SiteSettings,
    pub paths: ProjectPaths,
    pub hosts: HostSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    /// Page-cache timeout in seconds; `None` never expires.
    pub cache_middleware_seconds: Option<u64>,
    pub static_files: StaticFilesSettings,
    pub file_storage: FileStorage,
    pub bundle_loader: BundleLoaderSettings,
    pub task_queue: TaskQueueSettings,
    pub email: EmailSettings,
    pub logging: LoggingSettings,
    pub prerender: PrerenderSettings,
    #[serde(flatten)]
    pub production: Option<ProductionSettings>,
    pub advisories: Vec<Advisory>,
}

impl Settings {
    /// Resolve from the process environment. The test-runner flag comes
    /// from `TESTING`.
    pub fn from_env() -> Result<Self> {
        let env = EnvSettings::new()?;
        let ctx = InvocationContext::from_env(&env);
        Ok(Self::resolve(&env, ctx))
    }

    pub fn resolve(env: &EnvSettings, ctx: InvocationContext) -> Self {
        Self::resolve_with(env, ctx, &RedisConnector)
    }

    /// Total over every environment: missing or malformed variables map to
    /// defaults, and a cache client that cannot be built degrades to the
    /// in-process cache. That degradation is the only thing logged.
    pub fn resolve_with(
        env: &EnvSettings,
        ctx: InvocationContext,
        connector: &dyn CacheConnector,
    ) -> Self {
        let mode = DeploymentMode::detect(env, ctx);
        let debug = mode.is_debug();
        let mut advisories = Vec::new();

        let secret_key = SecretKey::resolve(env);
        if secret_key.ephemeral {
            advisories.push(Advisory::EphemeralSecretKey);
        }

        let paths = ProjectPaths::resolve(env);

        let (database, db_advisory) = DatabaseSettings::resolve(env, mode);
        advisories.extend(db_advisory);

        let broker_url = redis_url(env);
        // The hosted platform outranks the test runner for the mode, but a
        // test run still never touches the shared cache.
        let test_runner = ctx.test_runner || mode.is_testing();
        let cache = CacheSettings::resolve(&broker_url, test_runner, connector);

        let (production, file_storage) = if mode.is_production() {
            let (production, s3, advisory) = ProductionSettings::resolve(env);
            advisories.extend(advisory);
            (Some(production), FileStorage::S3(s3))
        } else {
            (None, FileStorage::local(&paths))
        };

        Self {
            mode,
            debug,
            testing: test_runner,
            secret_key,
            site: SiteSettings::default(),
            hosts: HostSettings::resolve(env, debug),
            database,
            cache,
            cache_middleware_seconds: None,
            static_files: StaticFilesSettings::resolve(&paths),
            file_storage,
            bundle_loader: BundleLoaderSettings::resolve(&paths, debug),
            task_queue: TaskQueueSettings::new(broker_url),
            email: EmailSettings::resolve(env),
            logging: LoggingSettings::resolve(env, debug),
            prerender: PrerenderSettings::resolve(env),
            production,
            advisories,
            paths,
        }
    }

    pub fn is_production(&self) -> bool {
        self.production.is_some()
    }
}
