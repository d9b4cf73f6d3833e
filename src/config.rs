//! Dashboard configuration.
//!
//! Loaded from `<config_dir>/project-dashboard/config.json`, falling back to
//! defaults when the file is missing or unreadable, then overridden by
//! environment variables:
//!
//! - `PDASH_PAGE_SIZE` - rows per dashboard page
//! - `PDASH_LOGIN_DELAY_MS` - simulated login latency
//! - `PDASH_FETCH_DELAY_MS` - simulated project provider latency
//! - `PDASH_STORAGE_PATH` - local storage file
//! - `PDASH_VALIDATE_ON_RESTORE` - check token expiry when restoring a session

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::auth::MockAuthenticator;
use crate::mock_data::MockProjectProvider;
use crate::models::DEFAULT_PAGE_SIZE;

const APP_NAME: &str = "project-dashboard";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub login_delay_ms: u64,
    pub fetch_delay_ms: u64,
    pub token_ttl_hours: i64,
    /// Reject expired tokens when restoring a stored session.
    pub validate_on_restore: bool,
    /// Local storage file. Defaults to the platform data directory.
    pub storage_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            login_delay_ms: 500,
            fetch_delay_ms: 300,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            validate_on_restore: true,
            storage_path: None,
        }
    }
}

impl DashboardConfig {
    /// File config plus environment overrides.
    pub fn load() -> Self {
        let mut config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply overrides from `lookup`. Unparsable values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(size) = lookup("PDASH_PAGE_SIZE").and_then(|s| s.parse::<usize>().ok()) {
            self.page_size = size.max(1);
        }
        if let Some(ms) = lookup("PDASH_LOGIN_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.login_delay_ms = ms;
        }
        if let Some(ms) = lookup("PDASH_FETCH_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.fetch_delay_ms = ms;
        }
        if let Some(path) = lookup("PDASH_STORAGE_PATH").filter(|s| !s.is_empty()) {
            self.storage_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("PDASH_VALIDATE_ON_RESTORE").and_then(|s| parse_flag(&s)) {
            self.validate_on_restore = flag;
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Token lifetimes chrono cannot represent fall back to the default.
    pub fn authenticator(&self) -> MockAuthenticator {
        let token_ttl = chrono::Duration::try_hours(self.token_ttl_hours).unwrap_or_else(|| {
            tracing::warn!(
                "token_ttl_hours {} is out of range, using {}",
                self.token_ttl_hours,
                DEFAULT_TOKEN_TTL_HOURS
            );
            chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
        });
        MockAuthenticator::new(Duration::from_millis(self.login_delay_ms), token_ttl)
    }

    pub fn provider(&self) -> MockProjectProvider {
        MockProjectProvider::seeded().with_delay(Duration::from_millis(self.fetch_delay_ms))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 25}"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.login_delay_ms, 500);
        assert!(config.validate_on_restore);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = DashboardConfig {
            page_size: 5,
            validate_on_restore: false,
            ..DashboardConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path).unwrap(), config);
    }

    #[tokio::test]
    async fn out_of_range_token_ttl_still_logs_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"token_ttl_hours": 10000000000000, "login_delay_ms": 0}"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        let response = config
            .authenticator()
            .login("admin@example.com", "admin123")
            .await
            .unwrap();
        assert!(crate::auth::is_token_valid(&response.token));
    }

    #[tokio::test]
    async fn huge_token_ttl_does_not_overflow() {
        let config = DashboardConfig {
            token_ttl_hours: 10_000_000_000,
            login_delay_ms: 0,
            ..DashboardConfig::default()
        };
        let response = config
            .authenticator()
            .login("admin@example.com", "admin123")
            .await
            .unwrap();
        assert!(crate::auth::is_token_valid(&response.token));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("PDASH_PAGE_SIZE", "0"),
            ("PDASH_LOGIN_DELAY_MS", "0"),
            ("PDASH_VALIDATE_ON_RESTORE", "off"),
            ("PDASH_STORAGE_PATH", "/tmp/pdash.db"),
            ("PDASH_FETCH_DELAY_MS", "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.page_size, 1);
        assert_eq!(config.login_delay_ms, 0);
        assert!(!config.validate_on_restore);
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/pdash.db")));
        assert_eq!(config.fetch_delay_ms, 300);
    }
}
