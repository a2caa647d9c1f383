//! Application configuration.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default OneSignal notifications endpoint.
pub const ONESIGNAL_API_URL: &str = "https://onesignal.com/api/v1/notifications";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Redis configuration.
    pub redis: RedisConfig,
    /// Push dispatch settings.
    #[serde(default)]
    pub push: PushSettings,
    /// OneSignal client configuration.
    #[serde(default)]
    pub onesignal: OnesignalConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,
}

/// Site settings that drive the dispatch gate.
///
/// These mirror the forum's site settings and are read-only at runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushSettings {
    /// Whether OneSignal delivery is enabled at all.
    #[serde(default)]
    pub onesignal_push_enabled: bool,
    /// OneSignal application id.
    #[serde(default)]
    pub onesignal_app_id: String,
    /// OneSignal REST API key, sent as basic auth.
    #[serde(default)]
    pub onesignal_rest_api_key: String,
    /// Pipe-delimited list of scopes user API keys may request.
    #[serde(default)]
    pub allow_user_api_key_scopes: String,
    /// Push URLs user API clients are allowed to register.
    ///
    /// A client's push URL is accepted when it occurs anywhere in this string.
    #[serde(default)]
    pub allowed_user_api_push_urls: String,
    /// Notification type codes that are never pushed.
    #[serde(default)]
    pub suppressed_notification_types: Vec<i32>,
}

impl PushSettings {
    /// Whether the `push` scope is enabled for user API keys.
    #[must_use]
    pub fn user_api_push_enabled(&self) -> bool {
        self.allow_user_api_key_scopes
            .split('|')
            .any(|scope| scope == "push")
            && !self.allowed_user_api_push_urls.trim().is_empty()
    }

    /// Whether the OneSignal app id is configured.
    #[must_use]
    pub fn has_app_id(&self) -> bool {
        !self.onesignal_app_id.trim().is_empty()
    }

    /// Whether the OneSignal REST API key is configured.
    #[must_use]
    pub fn has_rest_api_key(&self) -> bool {
        !self.onesignal_rest_api_key.trim().is_empty()
    }
}

/// OneSignal HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OnesignalConfig {
    /// Notifications endpoint.
    #[serde(default = "default_onesignal_api_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Localized heading overrides keyed by notification type name.
    #[serde(default)]
    pub titles: HashMap<String, String>,
}

impl OnesignalConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OnesignalConfig {
    fn default() -> Self {
        Self {
            api_url: default_onesignal_api_url(),
            timeout_secs: default_timeout_secs(),
            titles: HashMap::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_onesignal_api_url() -> String {
    ONESIGNAL_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `FORUMPUSH_ENV`)
    /// 4. Environment variables with `FORUMPUSH__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let env = std::env::var("FORUMPUSH_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FORUMPUSH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FORUMPUSH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
