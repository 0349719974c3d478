//! Secrets, host allow-lists and the application secret key.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::{non_empty, EnvSettings};

const REDACTED: &str = "********";
const SECRET_KEY_LEN: usize = 50;

/// A sensitive value. Never printed or serialized in clear text.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Trimmed like every other variable; blank counts as unset.
    pub(crate) fn non_empty(value: &Option<Secret>) -> Option<Secret> {
        value
            .as_ref()
            .map(|s| s.0.trim())
            .filter(|v| !v.is_empty())
            .map(Secret::new)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SecretKey {
    pub value: Secret,
    /// Generated for this process only; sessions signed with it do not
    /// survive a restart.
    pub ephemeral: bool,
}

impl SecretKey {
    pub fn resolve(env: &EnvSettings) -> Self {
        match env.secret_key() {
            Some(value) => Self {
                value,
                ephemeral: false,
            },
            None => Self {
                value: Secret::new(generate_key()),
                ephemeral: true,
            },
        }
    }
}

fn generate_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_KEY_LEN)
        .map(char::from)
        .collect()
}

/// Hostnames the application answers to, in the order they are checked.
pub const PUBLIC_HOSTS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "noelwilson2018.herokuapp.com",
    "noel-wilson-2018.herokuapp.com",
    "www.noel-wilson.co.uk",
    "www.jwnwilson.com",
    "noel-wilson.co.uk",
    "jwnwilson.com",
];

pub const INTERNAL_IPS: &[&str] = &["127.0.0.1", "localhost"];

#[derive(Debug, Clone, Serialize)]
pub struct HostSettings {
    pub allowed_hosts: Vec<String>,
    pub internal_ips: Vec<String>,
    pub show_debug_toolbar: bool,
}

impl HostSettings {
    pub fn resolve(env: &EnvSettings, debug: bool) -> Self {
        let mut allowed_hosts: Vec<String> = PUBLIC_HOSTS.iter().map(|h| h.to_string()).collect();
        allowed_hosts.push(non_empty(&env.load_balancer_ip).unwrap_or("*").to_string());
        Self {
            allowed_hosts,
            internal_ips: INTERNAL_IPS.iter().map(|h| h.to_string()).collect(),
            show_debug_toolbar: debug,
        }
    }
}
