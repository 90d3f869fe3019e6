//! Configuration for the lagcheck server.
//!
//! All configuration is read from environment variables.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use anyhow::{bail, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Base URL of the Burrow service (e.g. http://burrow:8080)
    pub burrow_url: String,

    /// Cluster segment of Burrow's consumer endpoints
    pub burrow_cluster: String,

    /// Kafka topics exempt from lag checks
    pub whitelisted_topics: HashSet<String>,

    /// Messages that can pile up before a group is reported unhealthy
    pub lag_tolerance: u64,

    /// Timeout for each outbound Burrow request
    pub request_timeout: Duration,

    /// Log level
    pub log_level: String,

    /// Enable JSON logging
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when `BURROW_URL` is missing or empty; everything else
    /// has a default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let burrow_url = env::var("BURROW_URL").unwrap_or_default();
        if burrow_url.is_empty() {
            bail!("BURROW_URL must be set to the base URL of the Burrow service");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            burrow_url: burrow_url.trim_end_matches('/').to_string(),
            burrow_cluster: env::var("BURROW_CLUSTER").unwrap_or_else(|_| "local".to_string()),
            whitelisted_topics: env::var("WHITELISTED_TOPICS")
                .map(|v| parse_topic_list(&v))
                .unwrap_or_default(),
            lag_tolerance: env::var("LAG_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Get the full server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated topic list, dropping empty entries.
fn parse_topic_list(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
