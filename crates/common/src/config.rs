//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default backend used when running against the mock provider
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout for backend calls
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default currency code for report amounts
pub const DEFAULT_REPORT_CURRENCY: &str = "LKR";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend provider (http, mock)
    pub api_provider: String,

    /// Backend REST API base URL
    pub api_base_url: String,
    pub api_timeout_secs: u64,

    /// Bearer token seeded into the session, if any
    pub auth_token: Option<String>,

    /// Report rendering
    pub report_currency: String,
    pub report_output_dir: String,

    /// Runtime configuration
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_provider", &self.api_provider)
            .field("api_base_url", &self.api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("report_currency", &self.report_currency)
            .field("report_output_dir", &self.report_output_dir)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key-value source (e.g. CLI flags over env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_provider = lookup("ARTMART_API_PROVIDER").unwrap_or_else(|| "http".to_string());

        let api_base_url = match lookup("ARTMART_API_BASE_URL") {
            Some(url) => url,
            None if api_provider == "mock" => DEFAULT_API_BASE_URL.to_string(),
            None => {
                return Err(anyhow::anyhow!(
                    "ARTMART_API_BASE_URL is required for the {} provider",
                    api_provider
                ))
            }
        };

        let api_timeout_secs = match lookup("ARTMART_API_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_API_TIMEOUT_SECS,
                    "Invalid ARTMART_API_TIMEOUT_SECS, using default"
                );
                DEFAULT_API_TIMEOUT_SECS
            }),
            None => DEFAULT_API_TIMEOUT_SECS,
        };

        let auth_token =
            lookup("ARTMART_AUTH_TOKEN").filter(|token| !token.trim().is_empty());

        Ok(Self {
            api_provider,
            api_base_url,
            api_timeout_secs,
            auth_token,
            report_currency: lookup("REPORT_CURRENCY")
                .unwrap_or_else(|| DEFAULT_REPORT_CURRENCY.to_string()),
            report_output_dir: lookup("REPORT_OUTPUT_DIR").unwrap_or_else(|| ".".to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
