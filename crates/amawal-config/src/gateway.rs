use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Connection settings for the unified dictionary backend
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Bearer token issued by the auth service, if the user is logged in
    #[serde(default)]
    pub token: Option<String>,
}

impl GatewayConfig {
    pub fn new() -> Self {
        let base_url = env::var("AMAWAL_API_URL").unwrap_or_else(|_| default_base_url());

        let timeout_seconds = env::var("AMAWAL_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        let token = env::var("AMAWAL_TOKEN").ok().filter(|t| !t.is_empty());

        Self {
            base_url,
            timeout_seconds,
            token,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Base URL without a trailing slash
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            token: None,
        }
    }
}
