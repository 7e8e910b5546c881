use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
///
/// Every field has a default suitable for local use.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    /// Recipient of the outbound booking message, digits only.
    pub whatsapp_number: String,
    /// Offset for timestamps shown to the studio (default: UTC+7).
    pub utc_offset_hours: i32,
    pub admin_username: String,
    /// Argon2id PHC string. Admin login is disabled while unset.
    pub admin_password_hash: Option<String>,
    pub stats_refresh_secs: u64,
    pub chat_refresh_secs: u64,
    pub admin_reply_delay_ms: u64,
    pub auto_reply_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            whatsapp_number: "62895704403389".into(),
            utc_offset_hours: 7,
            admin_username: "admin".into(),
            admin_password_hash: None,
            stats_refresh_secs: 5,
            chat_refresh_secs: 3,
            admin_reply_delay_ms: 1000,
            auto_reply_delay_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default          |
    /// |---------------------------|------------------|
    /// | `STUDIO_DATA_DIR`         | `./data`         |
    /// | `STUDIO_WHATSAPP_NUMBER`  | `62895704403389` |
    /// | `STUDIO_UTC_OFFSET_HOURS` | `7`              |
    /// | `ADMIN_USERNAME`          | `admin`          |
    /// | `ADMIN_PASSWORD_HASH`     | unset            |
    /// | `STATS_REFRESH_SECS`      | `5`              |
    /// | `CHAT_REFRESH_SECS`       | `3`              |
    /// | `ADMIN_REPLY_DELAY_MS`    | `1000`           |
    /// | `AUTO_REPLY_DELAY_MS`     | `1500`           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let whatsapp_number = get("STUDIO_WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number);
        if !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid {
                var: "STUDIO_WHATSAPP_NUMBER",
                expected: "digits only",
                value: whatsapp_number,
            });
        }

        let utc_offset_hours = parse_or(&get, "STUDIO_UTC_OFFSET_HOURS", defaults.utc_offset_hours)?;
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(ConfigError::Invalid {
                var: "STUDIO_UTC_OFFSET_HOURS",
                expected: "an hour offset between -12 and 14",
                value: utc_offset_hours.to_string(),
            });
        }

        Ok(Self {
            data_dir: get("STUDIO_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            whatsapp_number,
            utc_offset_hours,
            admin_username: get("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password_hash: get("ADMIN_PASSWORD_HASH"),
            stats_refresh_secs: parse_positive(&get, "STATS_REFRESH_SECS", defaults.stats_refresh_secs)?,
            chat_refresh_secs: parse_positive(&get, "CHAT_REFRESH_SECS", defaults.chat_refresh_secs)?,
            admin_reply_delay_ms: parse_or(&get, "ADMIN_REPLY_DELAY_MS", defaults.admin_reply_delay_ms)?,
            auto_reply_delay_ms: parse_or(&get, "AUTO_REPLY_DELAY_MS", defaults.auto_reply_delay_ms)?,
        })
    }

    pub fn utc_offset(&self) -> FixedOffset {
        // Range checked at load; UTC is the fallback for hand-built configs.
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn stats_refresh(&self) -> Duration {
        Duration::from_secs(self.stats_refresh_secs)
    }

    pub fn chat_refresh(&self) -> Duration {
        Duration::from_secs(self.chat_refresh_secs)
    }

    pub fn admin_reply_delay(&self) -> Duration {
        Duration::from_millis(self.admin_reply_delay_ms)
    }

    pub fn auto_reply_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reply_delay_ms)
    }
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var,
            expected: "a number",
            value,
        }),
    }
}

fn parse_positive<G>(get: &G, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value = parse_or(get, var, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            var,
            expected: "greater than zero",
            value: value.to_string(),
        });
    }
    Ok(value)
}
