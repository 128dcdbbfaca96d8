use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Searches fail until a key is provided
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_web_search")]
    pub web_search: bool,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            timeout_secs: None,
            web_search: default_web_search(),
        }
    }
}

fn default_endpoint() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_model() -> String { "gemini-3-flash-preview".to_string() }
fn default_web_search() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_passengers")]
    pub max_passengers_per_kind: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_passengers_per_kind: default_max_passengers(),
        }
    }
}

fn default_max_passengers() -> u8 { crate::core::form::DEFAULT_MAX_PER_KIND }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FLYAGENTE__)
    /// 4. Bare API key variables (GEMINI_API_KEY, API_KEY)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., FLYAGENTE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FLYAGENTE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FLYAGENTE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn gemini_timeout_secs(&self) -> u64 {
        self.gemini.timeout_secs.unwrap_or(60)
    }
}

/// Variables checked for the Gemini key, highest precedence first
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// First non-blank key among [`API_KEY_VARS`]
fn api_key_override<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|key| !key.trim().is_empty())
}

/// Apply the credential from the conventional environment variables
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let api_key = api_key_override(|name| std::env::var(name).ok());

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("gemini.api_key", api_key)?;
    }

    builder.build()
}
