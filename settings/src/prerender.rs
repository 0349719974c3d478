use serde::Serialize;
use url::Url;

use crate::config::{bool_or, non_empty, EnvSettings};

pub const DEFAULT_SSR_URL: &str = "http://192.168.0.10:5000";
pub const DEFAULT_SERVER_URL: &str = "http://192.168.0.10:8000";

/// Server-side rendering service used by the prerender middleware.
#[derive(Debug, Clone, Serialize)]
pub struct PrerenderSettings {
    pub ssr_url: String,
    pub server_url: String,
    pub skip: bool,
}

impl PrerenderSettings {
    pub fn resolve(env: &EnvSettings) -> Self {
        Self {
            ssr_url: url_or(&env.ssr_url, DEFAULT_SSR_URL),
            server_url: url_or(&env.server_url, DEFAULT_SERVER_URL),
            skip: bool_or(&env.skip_prerender, false),
        }
    }
}

fn url_or(value: &Option<String>, default: &str) -> String {
    non_empty(value)
        .filter(|v| Url::parse(v).is_ok_and(|u| matches!(u.scheme(), "http" | "https")))
        .unwrap_or(default)
        .to_string()
}
