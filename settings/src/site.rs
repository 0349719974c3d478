use serde::Serialize;

pub const SITE_NAME: &str = "Noel Wilson";
/// Database name and cache key prefix.
pub const SITE_SLUG: &str = "noelwilson2018";
/// Wall-clock zone for scheduled tasks. Request handling runs in UTC.
pub const LOCAL_TIMEZONE: &str = "Europe/London";

#[derive(Debug, Clone, Serialize)]
pub struct SiteSettings {
    pub name: String,
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_l10n: bool,
    pub use_tz: bool,
    pub append_slash: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: SITE_NAME.to_string(),
            language_code: "en-us".to_string(),
            time_zone: "UTC".to_string(),
            use_i18n: true,
            use_l10n: true,
            use_tz: true,
            append_slash: true,
        }
    }
}
