//! Timer configuration.
//!
//! Loaded from a TOML file with sensible defaults; the bot token may also
//! come from the `WAITMARK_BOT_TOKEN` environment variable.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_RENAME_TIMEOUT_SECS: u64 = 5;

/// Raw timer configuration as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Bot token for the channel API.
    pub bot_token: Option<String>,
    /// Base URL of the channel API.
    pub api_base: Option<String>,
    /// Seconds between poll sweeps.
    pub poll_interval_secs: u64,
    /// Per-request timeout for channel edits, in seconds.
    pub rename_timeout_secs: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            rename_timeout_secs: DEFAULT_RENAME_TIMEOUT_SECS,
        }
    }
}

impl TimerConfig {
    /// Loads the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Validated runtime settings derived from [`TimerConfig`].
#[derive(Debug, Clone)]
pub struct TimerSettings {
    pub bot_token: String,
    pub api_base: String,
    pub poll_interval: Duration,
    pub rename_timeout: Duration,
}

impl TimerSettings {
    pub fn from_config(config: &TimerConfig) -> Result<Self> {
        let token = config
            .bot_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var("WAITMARK_BOT_TOKEN")
                    .ok()
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty())
            })
            .unwrap_or_default();
        if token.is_empty() {
            bail!("bot_token or WAITMARK_BOT_TOKEN is required");
        }

        if config.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than zero");
        }

        let api_base = config
            .api_base
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            bot_token: token,
            api_base,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            rename_timeout: Duration::from_secs(config.rename_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = TimerConfig::default();
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.rename_timeout_secs, 5);
        assert!(config.bot_token.is_none());
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("waitmark.toml");
        fs::write(&path, "bot_token = \"abc123\"\npoll_interval_secs = 30\n").unwrap();

        let config = TimerConfig::load(&path).unwrap();
        assert_eq!(config.bot_token.as_deref(), Some("abc123"));
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.rename_timeout_secs, 5);
    }

    #[test]
    fn settings_require_a_token() {
        let config = TimerConfig {
            bot_token: Some("  ".to_string()),
            ..TimerConfig::default()
        };
        // Blank tokens fall through to the env var; absent both, validation fails.
        if std::env::var("WAITMARK_BOT_TOKEN").is_err() {
            let err = TimerSettings::from_config(&config).unwrap_err();
            assert!(err.to_string().contains("bot_token"));
        }
    }

    #[test]
    fn settings_reject_zero_interval() {
        let config = TimerConfig {
            bot_token: Some("abc123".to_string()),
            poll_interval_secs: 0,
            ..TimerConfig::default()
        };
        let err = TimerSettings::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn settings_normalize_api_base() {
        let config = TimerConfig {
            bot_token: Some("abc123".to_string()),
            api_base: Some("https://example.test/api/".to_string()),
            ..TimerConfig::default()
        };
        let settings = TimerSettings::from_config(&config).unwrap();
        assert_eq!(settings.api_base, "https://example.test/api");
        assert_eq!(settings.poll_interval, Duration::from_secs(60));
    }
}
