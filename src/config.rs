//! Feed configuration parsed from environment variables.

pub const DEFAULT_INSTALLATION_COUNT: usize = crate::services::installations::DEFAULT_TARGET_COUNT;
const DEFAULT_REFRESH_INTERVAL_MS: u64 = 3000;

/// Tuning knobs for the dashboard feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Target installation sample size; sector rounding adds one or two.
    pub installation_count: usize,
    /// Period of the DAO random-walk tick, in milliseconds.
    pub refresh_interval_ms: u64,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            installation_count: DEFAULT_INSTALLATION_COUNT,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            seed: None,
        }
    }
}

impl FeedConfig {
    /// - `MEX_INSTALLATION_COUNT`: default 400
    /// - `MEX_REFRESH_INTERVAL_MS`: default 3000, floored at 1
    /// - `MEX_SEED`: unset for entropy
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            installation_count: env_parse("MEX_INSTALLATION_COUNT", DEFAULT_INSTALLATION_COUNT),
            refresh_interval_ms: env_parse("MEX_REFRESH_INTERVAL_MS", DEFAULT_REFRESH_INTERVAL_MS).max(1),
            seed: std::env::var("MEX_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Non-empty string value, or `default`.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
