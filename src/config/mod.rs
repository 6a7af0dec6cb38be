mod app_config;

pub use app_config::{AppConfig, LocaleConfig, LoggingConfig, SecurityConfig, ServerConfig};
