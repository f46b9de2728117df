//! ONS client configuration parsed from environment variables.

use crate::config::{env_parse, env_string};

pub const DEFAULT_ONS_BASE_URL: &str = "https://dados.ons.org.br/api/3/action/datastore_search_sql";
pub const DEFAULT_ONS_SUBMARKET: &str = "SE";
pub const DEFAULT_ONS_LOOKBACK_HOURS: u64 = 24;
pub const DEFAULT_ONS_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ONS_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Hourly generation by source.
pub const GENERATION_RESOURCE: &str = "b3c32060-c651-412e-9f69-a1b4d008784b";
/// Hourly load.
pub const LOAD_RESOURCE: &str = "72a8da6c-67b1-4d37-8588-a734a7a1343a";
/// Settlement price by submarket.
pub const PRICE_RESOURCE: &str = "d7935817-92d5-4999-88c1-0164a34b223d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnsTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnsConfig {
    pub base_url: String,
    pub submarket: String,
    pub lookback_hours: u64,
    pub timeouts: OnsTimeouts,
}

impl Default for OnsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ONS_BASE_URL.to_string(),
            submarket: DEFAULT_ONS_SUBMARKET.to_string(),
            lookback_hours: DEFAULT_ONS_LOOKBACK_HOURS,
            timeouts: OnsTimeouts {
                request_secs: DEFAULT_ONS_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_ONS_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl OnsConfig {
    /// Build typed ONS config from environment variables.
    ///
    /// Optional:
    /// - `ONS_BASE_URL`: CKAN `datastore_search_sql` endpoint
    /// - `ONS_SUBMARKET`: price submarket, default `SE`
    /// - `ONS_LOOKBACK_HOURS`: default 24
    /// - `ONS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ONS_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let submarket = env_string("ONS_SUBMARKET", DEFAULT_ONS_SUBMARKET);
        Self {
            base_url: env_string("ONS_BASE_URL", DEFAULT_ONS_BASE_URL).trim_end_matches('/').to_string(),
            // Interpolated into SQL; anything but a plain code falls back.
            submarket: if submarket.chars().all(|c| c.is_ascii_alphanumeric()) && !submarket.is_empty() {
                submarket
            } else {
                tracing::warn!(%submarket, "ignoring invalid ONS_SUBMARKET");
                DEFAULT_ONS_SUBMARKET.to_string()
            },
            lookback_hours: env_parse("ONS_LOOKBACK_HOURS", DEFAULT_ONS_LOOKBACK_HOURS),
            timeouts: OnsTimeouts {
                request_secs: env_parse("ONS_REQUEST_TIMEOUT_SECS", DEFAULT_ONS_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("ONS_CONNECT_TIMEOUT_SECS", DEFAULT_ONS_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
