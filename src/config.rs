use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the recipe engine
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ForkifyConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where and how to reach the remote recipe index
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL; `search` and `get` are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as the `key` query parameter, if the deployment needs one
    pub key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: None,
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// SQLite database holding persisted likes
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_database_url() -> String {
    "sqlite://forkify.db".to_string()
}

impl ForkifyConfig {
    /// Load configuration from `forkify.toml` (optional) and the environment
    ///
    /// Environment variables win over the file and use the `FORKIFY__`
    /// prefix with `__` between levels, e.g. `FORKIFY__API__KEY`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("forkify")
    }

    /// Same as [`ForkifyConfig::load`] with a custom file stem
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(file_stem, environment())
    }

    fn load_with_env(file_stem: &str, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(file_stem).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FORKIFY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
