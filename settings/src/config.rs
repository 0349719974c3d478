use serde::Deserialize;

use crate::security::Secret;

/// Raw snapshot of the environment variables the resolver reads.
///
/// Every field is optional; defaults are applied by the resolver so that a
/// missing or malformed variable never aborts startup. Keys are matched
/// case-insensitively (`ON_HEROKU` lands in `on_heroku`).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EnvSettings {
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub on_heroku: Option<String>,
    #[serde(default)]
    pub testing: Option<String>,

    #[serde(default)]
    pub database_url: Option<Secret>,
    #[serde(default)]
    pub postgres_host: Option<String>,
    #[serde(default)]
    pub postgres_port: Option<String>,
    #[serde(default)]
    pub postgres_user: Option<String>,
    #[serde(default)]
    pub postgres_pass: Option<Secret>,
    #[serde(default)]
    pub postgres_host_prod: Option<String>,
    #[serde(default)]
    pub postgres_user_prod: Option<String>,
    #[serde(default)]
    pub postgres_pass_prod: Option<Secret>,

    #[serde(default)]
    pub redis_host: Option<String>,
    #[serde(default)]
    pub redis_port: Option<String>,
    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default)]
    pub access_key: Option<Secret>,
    #[serde(default)]
    pub secret: Option<Secret>,
    #[serde(default)]
    pub sentry_dsn: Option<Secret>,
    #[serde(default)]
    pub source_version: Option<String>,

    #[serde(default)]
    pub django_log_level: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub loggers: Option<String>,

    #[serde(default)]
    pub load_balancer_ip: Option<String>,
    #[serde(default)]
    pub django_secret_key: Option<Secret>,
    #[serde(default)]
    pub secret_key: Option<Secret>,
    #[serde(default)]
    pub project_dir: Option<String>,

    #[serde(default)]
    pub ssr_url: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub skip_prerender: Option<String>,

    #[serde(default)]
    pub email_host: Option<String>,
    #[serde(default)]
    pub email_port: Option<String>,
    #[serde(default)]
    pub email_host_user: Option<String>,
    #[serde(default)]
    pub email_host_password: Option<Secret>,
}

impl EnvSettings {
    /// `DJANGO_SECRET_KEY`, or `SECRET_KEY` when that is unset.
    pub fn secret_key(&self) -> Option<Secret> {
        Secret::non_empty(&self.django_secret_key).or_else(|| Secret::non_empty(&self.secret_key))
    }

    /// `DJANGO_LOG_LEVEL`, or `LOG_LEVEL` when that is unset.
    pub fn log_level(&self) -> Option<&str> {
        non_empty(&self.django_log_level).or_else(|| non_empty(&self.log_level))
    }

    /// Snapshot the process environment. Variables whose name or value is
    /// not valid UTF-8 are skipped; none of them are ones the resolver reads.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_map(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Snapshot an explicit variable map instead of the process environment.
    pub fn from_map<I, K, V>(vars: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::build(config::Environment::default().source(Some(map)))
    }

    fn build(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

/// Returns the value when the variable is set to something non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Whether a flag variable is set. Any non-empty value counts.
pub(crate) fn flag(value: &Option<String>) -> bool {
    non_empty(value).is_some()
}

/// Parse a variable, falling back to `default` when unset or malformed.
pub(crate) fn parse_or<T: std::str::FromStr>(value: &Option<String>, default: T) -> T {
    non_empty(value)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Boolean variable accepting the usual spellings; anything else is `default`.
pub(crate) fn bool_or(value: &Option<String>, default: bool) -> bool {
    match non_empty(value).map(str::to_ascii_lowercase).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_upper_case_keys_from_map() -> anyhow::Result<()> {
        let env = EnvSettings::from_map([("ON_HEROKU", "1"), ("REDIS_PORT", "6380")])?;
        assert_eq!(env.on_heroku.as_deref(), Some("1"));
        assert_eq!(env.redis_port.as_deref(), Some("6380"));
        assert!(env.env.is_none());
        Ok(())
    }

    #[test]
    fn unknown_variables_are_ignored() -> anyhow::Result<()> {
        let env = EnvSettings::from_map([("PATH", "/usr/bin"), ("HOME", "/root")])?;
        assert!(env.project_dir.is_none());
        Ok(())
    }

    #[test]
    fn framework_prefixed_names_win() -> anyhow::Result<()> {
        let env = EnvSettings::from_map([
            ("DJANGO_SECRET_KEY", "persisted"),
            ("SECRET_KEY", "other"),
            ("DJANGO_LOG_LEVEL", "ERROR"),
            ("LOG_LEVEL", "INFO"),
        ])?;
        assert_eq!(env.secret_key().as_ref().map(Secret::expose), Some("persisted"));
        assert_eq!(env.log_level(), Some("ERROR"));

        let plain = EnvSettings::from_map([("SECRET_KEY", "other"), ("LOG_LEVEL", "INFO")])?;
        assert_eq!(plain.secret_key().as_ref().map(Secret::expose), Some("other"));
        assert_eq!(plain.log_level(), Some("INFO"));
        Ok(())
    }

    #[test]
    fn empty_values_count_as_unset() {
        assert!(!flag(&Some(String::new())));
        assert!(!flag(&Some("   ".into())));
        assert!(flag(&Some("false".into())));
        assert_eq!(parse_or(&Some(String::new()), 7u16), 7);
    }

    #[test]
    fn malformed_numbers_fall_back() {
        assert_eq!(parse_or(&Some("not-a-port".into()), 6379u16), 6379);
        assert_eq!(parse_or(&Some("6380".into()), 6379u16), 6380);
        assert_eq!(parse_or(&Some("70000".into()), 6379u16), 6379);
    }

    #[test]
    fn bool_spellings() {
        assert!(bool_or(&Some("TRUE".into()), false));
        assert!(!bool_or(&Some("off".into()), true));
        assert!(bool_or(&Some("maybe".into()), true));
        assert!(!bool_or(&None, false));
    }
}
