use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use tracing::warn;

use crate::utils::locale::SupportedLocale;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: ServerConfig,
    pub security: SecurityConfig,
    pub locale: LocaleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
    #[serde(default)]
    pub metrics_admin_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocaleConfig {
    #[serde(default = "default_locale_tag")]
    pub default: String,
}

impl LocaleConfig {
    /// Resolves the configured default display locale. An unrecognized tag
    /// degrades to en-US instead of failing startup.
    pub fn default_locale(&self) -> SupportedLocale {
        SupportedLocale::from_tag(&self.default).unwrap_or_else(|| {
            warn!(
                configured = %self.default,
                "unsupported default locale in configuration, using en-US"
            );
            SupportedLocale::default()
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::prefixed("SECURITY_").split("__"))
            .merge(Env::prefixed("LOCALE_").split("__"))
            .merge(Env::prefixed("LOGGING_").split("__"))
            .extract()
            .map_err(Box::new)
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_metrics_allow_private_only() -> bool {
    true
}

fn default_locale_tag() -> String {
    "en-US".to_string()
}
