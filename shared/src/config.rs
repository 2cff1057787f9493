//! Engine configuration.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::enums::IpLogging;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("log_cleanup_batch_size cannot be 0")]
    ZeroCleanupBatch,

    #[error("aggressive_cleanup_batch_size cannot be 0")]
    ZeroAggressiveBatch,

    #[error("ip_header_priority cannot contain empty header names")]
    EmptyIpHeader,
}

/// Behavioral knobs for the embedding host. All fields have defaults, so a
/// host can deserialize a partial document or start from `Default`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RerouteConfig {
    /// Days to keep redirect log rows; 0 disables expiration.
    pub redirect_log_retention_days: u32,
    /// Days to keep not-found log rows; 0 disables expiration.
    pub not_found_log_retention_days: u32,
    pub track_hits: bool,
    /// When set, request headers are JSON-serialized into log rows.
    pub log_request_headers: bool,
    pub ip_logging: IpLogging,
    /// Headers the host should consult, in order, when extracting the
    /// client IP. The engine itself receives the IP pre-extracted.
    pub ip_header_priority: Vec<String>,
    /// CIDR ranges the host treats as trusted proxies during extraction.
    pub trusted_proxy_ranges: Vec<String>,
    pub log_cleanup_batch_size: u64,
    /// Expired-row count above which the aggressive batch size kicks in.
    pub aggressive_cleanup_threshold: u64,
    pub aggressive_cleanup_batch_size: u64,
    /// Content types the content-change monitor creates redirects for.
    pub monitor_content_types: HashSet<String>,
}

impl Default for RerouteConfig {
    fn default() -> Self {
        RerouteConfig {
            redirect_log_retention_days: 0,
            not_found_log_retention_days: 0,
            track_hits: true,
            log_request_headers: false,
            ip_logging: IpLogging::Full,
            ip_header_priority: vec!["X-Forwarded-For".to_string()],
            trusted_proxy_ranges: Vec::new(),
            log_cleanup_batch_size: 20_000,
            aggressive_cleanup_threshold: 100_000,
            aggressive_cleanup_batch_size: 50_000,
            monitor_content_types: HashSet::new(),
        }
    }
}

impl RerouteConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_cleanup_batch_size == 0 {
            return Err(ConfigError::ZeroCleanupBatch);
        }
        if self.aggressive_cleanup_batch_size == 0 {
            return Err(ConfigError::ZeroAggressiveBatch);
        }
        if self.ip_header_priority.iter().any(|h| h.is_empty()) {
            return Err(ConfigError::EmptyIpHeader);
        }
        Ok(())
    }
}
