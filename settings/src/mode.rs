//! Deployment mode selection.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::config::{flag, non_empty, EnvSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeploymentMode {
    Develop,
    Test,
    #[strum(to_string = "prod", serialize = "production")]
    #[serde(rename = "prod")]
    Production,
    #[strum(to_string = "hosted")]
    #[serde(rename = "hosted")]
    HostedPlatform,
}

impl DeploymentMode {
    /// Pick the active mode. Precedence: hosted platform, test runner,
    /// `ENV=prod`, then develop for everything else.
    pub fn detect(env: &EnvSettings, ctx: InvocationContext) -> Self {
        if flag(&env.on_heroku) {
            Self::HostedPlatform
        } else if ctx.test_runner {
            Self::Test
        } else if non_empty(&env.env).is_some_and(|v| v.eq_ignore_ascii_case("prod")) {
            Self::Production
        } else {
            Self::Develop
        }
    }

    pub fn is_debug(self) -> bool {
        matches!(self, Self::Develop)
    }

    pub fn is_testing(self) -> bool {
        matches!(self, Self::Test)
    }

    /// Production-only settings are built for these modes and no others.
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production | Self::HostedPlatform)
    }
}

/// How the process was launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// A test harness is driving this process.
    pub test_runner: bool,
}

impl InvocationContext {
    pub fn test_runner() -> Self {
        Self { test_runner: true }
    }

    /// Launcher did not say; fall back to the `TESTING` variable.
    pub fn from_env(env: &EnvSettings) -> Self {
        Self {
            test_runner: flag(&env.testing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn env(on_heroku: Option<&str>, mode: Option<&str>) -> EnvSettings {
        EnvSettings {
            on_heroku: on_heroku.map(Into::into),
            env: mode.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn hosted_overrides_everything() {
        let mode = DeploymentMode::detect(&env(Some("1"), Some("prod")), InvocationContext::test_runner());
        assert_eq!(mode, DeploymentMode::HostedPlatform);
    }

    #[test]
    fn test_runner_beats_prod() {
        let mode = DeploymentMode::detect(&env(None, Some("prod")), InvocationContext::test_runner());
        assert_eq!(mode, DeploymentMode::Test);
    }

    #[test]
    fn prod_flag() {
        let mode = DeploymentMode::detect(&env(None, Some("prod")), InvocationContext::default());
        assert_eq!(mode, DeploymentMode::Production);
        assert!(mode.is_production());
        assert!(!mode.is_debug());
    }

    #[test]
    fn anything_else_is_develop() {
        for value in [None, Some("develop"), Some("staging"), Some("")] {
            let mode = DeploymentMode::detect(&env(None, value), InvocationContext::default());
            assert_eq!(mode, DeploymentMode::Develop);
        }
        let blank_heroku = DeploymentMode::detect(&env(Some(""), None), InvocationContext::default());
        assert_eq!(blank_heroku, DeploymentMode::Develop);
    }

    #[test]
    fn testing_variable_marks_test_runner() {
        let vars = EnvSettings {
            testing: Some("1".into()),
            ..Default::default()
        };
        assert!(InvocationContext::from_env(&vars).test_runner);
        assert!(!InvocationContext::from_env(&EnvSettings::default()).test_runner);
    }

    #[test]
    fn names_round_trip_through_strum() -> anyhow::Result<()> {
        assert_eq!(DeploymentMode::Production.to_string(), "prod");
        assert_eq!(DeploymentMode::HostedPlatform.to_string(), "hosted");
        assert_eq!(DeploymentMode::from_str("Develop")?, DeploymentMode::Develop);
        assert_eq!(DeploymentMode::from_str("production")?, DeploymentMode::Production);
        Ok(())
    }
}
