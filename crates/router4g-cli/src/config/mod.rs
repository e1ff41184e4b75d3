//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use router4g::{EndpointOverrides, ResetTimings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Router address (host, host:port or URL).
    pub address: Option<String>,

    /// Admin username.
    pub username: Option<String>,

    /// Admin password. Prefer the ROUTER4G_PASSWORD environment variable.
    pub password: Option<String>,

    /// Endpoint profile name.
    pub profile: Option<String>,

    /// Where to read the WAN IP from: `router`, `ipify` or an echo URL.
    pub ip_source: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Directory for daily log files.
    pub log_dir: Option<PathBuf>,

    /// Poll timing overrides.
    #[serde(default)]
    pub timings: TimingsConfig,

    /// Endpoint path overrides.
    #[serde(default, skip_serializing_if = "EndpointOverrides::is_empty")]
    pub endpoints: EndpointOverrides,
}

/// Poll timing overrides, applied to both reset methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsConfig {
    /// Seconds to wait after the reset action before polling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_secs: Option<u64>,

    /// Seconds between polls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Maximum number of polls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Seconds between disconnect and reconnect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_pause_secs: Option<u64>,
}

impl TimingsConfig {
    /// Layer `other` on top of these overrides.
    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        Self {
            settle_secs: other.settle_secs.or(self.settle_secs),
            interval_secs: other.interval_secs.or(self.interval_secs),
            max_attempts: other.max_attempts.or(self.max_attempts),
            cycle_pause_secs: other.cycle_pause_secs.or(self.cycle_pause_secs),
        }
    }

    /// Apply the overrides to a set of timings.
    #[must_use]
    pub fn apply(&self, mut timings: ResetTimings) -> ResetTimings {
        for poll in [&mut timings.restart, &mut timings.connection] {
            if let Some(secs) = self.settle_secs {
                poll.settle = Duration::from_secs(secs);
            }
            if let Some(secs) = self.interval_secs {
                poll.interval = Duration::from_secs(secs);
            }
            if let Some(max) = self.max_attempts {
                poll.max_attempts = max;
            }
        }
        if let Some(secs) = self.cycle_pause_secs {
            timings.cycle_pause = Duration::from_secs(secs);
        }
        timings
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "router4g", "router4g")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Config file path, honoring an explicit override.
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let text = || (!value.is_empty()).then(|| value.to_string());

        match key {
            "address" => self.address = text(),
            "username" => self.username = text(),
            "password" => self.password = text(),
            "profile" => {
                if !value.is_empty() {
                    router4g::RouterProfile::by_name(value)?;
                }
                self.profile = text();
            }
            "ip_source" => {
                if !value.is_empty() {
                    value.parse::<router4g::IpSource>()?;
                }
                self.ip_source = text();
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "log_dir" => self.log_dir = text().map(PathBuf::from),
            "timings.settle_secs" => self.timings.settle_secs = Some(value.parse()?),
            "timings.interval_secs" => self.timings.interval_secs = Some(value.parse()?),
            "timings.max_attempts" => self.timings.max_attempts = Some(value.parse()?),
            "timings.cycle_pause_secs" => self.timings.cycle_pause_secs = Some(value.parse()?),
            "endpoints.login" => self.endpoints.login = Some(value.to_string()),
            "endpoints.status" => self.endpoints.status = Some(value.to_string()),
            "endpoints.restart" => self.endpoints.restart = Some(value.to_string()),
            "endpoints.disconnect" => self.endpoints.disconnect = Some(value.to_string()),
            "endpoints.connect" => self.endpoints.connect = Some(value.to_string()),
            _ => {
                anyhow::bail!(
                    "Unknown config key: {}\n\n\
                     Available keys:\n  \
                     address                  - Router address (e.g. 192.168.1.1)\n  \
                     username                 - Admin username\n  \
                     password                 - Admin password (prefer ROUTER4G_PASSWORD)\n  \
                     profile                  - Endpoint profile (generic)\n  \
                     ip_source                - router, ipify or an echo service URL\n  \
                     output_format            - Default output format (pretty/json/yaml)\n  \
                     log_dir                  - Directory for daily log files\n  \
                     timings.settle_secs      - Wait before the first poll\n  \
                     timings.interval_secs    - Wait between polls\n  \
                     timings.max_attempts     - Maximum number of polls\n  \
                     timings.cycle_pause_secs - Wait between disconnect and connect\n  \
                     endpoints.<name>         - Path for login/status/restart/disconnect/connect",
                    key
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("address", "192.168.8.1").unwrap();
        config.set("timings.max_attempts", "12").unwrap();
        config.set("endpoints.status", "/api/status").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.address.as_deref(), Some("192.168.8.1"));
        assert_eq!(loaded.timings.max_attempts, Some(12));
        assert_eq!(loaded.endpoints.status.as_deref(), Some("/api/status"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("timings.max_attempts", "many").is_err());
        assert!(config.set("profile", "mystery-box").is_err());
        assert!(config.set("ip_source", "not a url").is_err());
    }

    #[test]
    fn empty_value_clears_key() {
        let mut config = Config::default();
        config.set("username", "root").unwrap();
        config.set("username", "").unwrap();
        assert_eq!(config.username, None);
    }

    #[test]
    fn timings_apply_to_both_methods() {
        let overrides = TimingsConfig {
            settle_secs: Some(1),
            max_attempts: Some(3),
            cycle_pause_secs: Some(2),
            ..TimingsConfig::default()
        };
        let timings = overrides.apply(ResetTimings::default());

        assert_eq!(timings.restart.settle, Duration::from_secs(1));
        assert_eq!(timings.connection.settle, Duration::from_secs(1));
        assert_eq!(timings.restart.max_attempts, 3);
        assert_eq!(timings.restart.interval, Duration::from_secs(5));
        assert_eq!(timings.cycle_pause, Duration::from_secs(2));
    }

    #[test]
    fn later_timings_win() {
        let file = TimingsConfig {
            interval_secs: Some(10),
            max_attempts: Some(5),
            ..TimingsConfig::default()
        };
        let flags = TimingsConfig {
            max_attempts: Some(2),
            ..TimingsConfig::default()
        };
        let merged = file.merged(flags);
        assert_eq!(merged.interval_secs, Some(10));
        assert_eq!(merged.max_attempts, Some(2));
    }
}
