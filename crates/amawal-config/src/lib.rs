use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::gateway::GatewayConfig;
use self::search::SearchConfig;

pub mod gateway;
pub mod search;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub search: SearchConfig,

    /// `tracing` filter directive, `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Emit JSON log lines instead of human readable ones
    pub log_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let log_filter = env::var("AMAWAL_LOG").unwrap_or_else(|_| default_log_filter());

        let log_json = env::var("AMAWAL_LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            gateway: GatewayConfig::new(),
            search: SearchConfig::default(),

            log_filter,
            log_json,
        }
    }

    /// Load a JSON profile. Missing fields take their defaults, the token
    /// from the environment is used when the file carries none.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;

        if config.gateway.token.is_none() {
            config.gateway.token = GatewayConfig::new().token;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_results",
                reason: "must be positive".to_string(),
            });
        }

        let root = self.gateway.api_root();
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "gateway.base_url",
                reason: format!("expected an http(s) URL, got '{}'", self.gateway.base_url),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            search: SearchConfig::default(),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}
