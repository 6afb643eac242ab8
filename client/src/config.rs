use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Endpoint of the public Oracle of Bacon XML API.
pub const DEFAULT_BASE_URL: &str = "http://oracleofbacon.org/cgi-bin/xml";

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with OOB_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Service endpoint; query parameters are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the `p` parameter. Checked by query validation,
    /// not here, so a missing key is reported alongside other query problems.
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. `info`, `oracle_of_bacon=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("oracle-of-bacon/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with OOB_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("OOB_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.oracle.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "oracle.base_url must start with http:// or https://, got: '{base_url}'"
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs cannot be 0".into(),
            ));
        }

        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            )));
        }

        Ok(())
    }
}
