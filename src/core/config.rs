//! Dashboard configuration.
//!
//! The configuration document is parsed and validated once at startup into
//! [`Config`]; every default is resolved here so the refresh loop never has to
//! check for missing keys.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::system_monitor::ThresholdConfig;
use crate::error::{Result, SysdashError};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_ALERT_LOG: &str = "alerts.log";
const DEFAULT_CSV_LOG: &str = "metrics_log.csv";
const DEFAULT_REFRESH_SECS: f64 = 1.0;
const DEFAULT_LOG_INTERVAL_SECS: f64 = 5.0;

#[cfg(windows)]
const DEFAULT_DISK_PATH: &str = "C:\\";
#[cfg(not(windows))]
const DEFAULT_DISK_PATH: &str = "/";

/// Geometry used by the dashboard renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Split when the terminal is wide enough, stacked otherwise
    #[default]
    Auto,
    Split,
    Stacked,
}

impl FromStr for LayoutMode {
    type Err = SysdashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(LayoutMode::Auto),
            "split" => Ok(LayoutMode::Split),
            "stacked" => Ok(LayoutMode::Stacked),
            other => Err(SysdashError::config(format!(
                "unknown layout '{}' (expected auto, split or stacked)",
                other
            ))),
        }
    }
}

/// How alert lines should blink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlinkMode {
    /// Probe the terminal once at startup
    #[default]
    Auto,
    Hardware,
    Software,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuiConfig {
    pub refresh_interval: Duration,
    pub layout: LayoutMode,
    pub blink: BlinkMode,
}

/// Validated configuration with all defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub thresholds: ThresholdConfig,
    pub tui: TuiConfig,
    pub alert_log_path: PathBuf,
    pub csv_log_path: PathBuf,
    pub log_interval: Duration,
    /// Filesystem whose usage is shown in the disk panel
    pub disk_path: PathBuf,
    /// Where diagnostics go while the dashboard owns the terminal
    pub diagnostic_log_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: ThresholdConfig,
    #[serde(default)]
    tui: RawTui,
    alert_log_path: Option<PathBuf>,
    csv_log_path: Option<PathBuf>,
    log_interval_seconds: Option<f64>,
    disk_path: Option<PathBuf>,
    diagnostic_log_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTui {
    refresh_interval: Option<f64>,
    #[serde(default)]
    layout: LayoutMode,
    #[serde(default)]
    blink: BlinkMode,
}

impl Config {
    /// Read and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SysdashError::config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&text).map_err(|e| match e {
            SysdashError::Json(inner) => SysdashError::config(format!(
                "invalid config file {}: {}",
                path.display(),
                inner
            )),
            other => other,
        })
    }

    /// Parse and validate a configuration document
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)?;
        raw.thresholds.validate()?;

        let refresh_interval = seconds(
            "tui.refresh_interval",
            raw.tui.refresh_interval.unwrap_or(DEFAULT_REFRESH_SECS),
        )?;
        let log_interval = seconds(
            "log_interval_seconds",
            raw.log_interval_seconds
                .unwrap_or(DEFAULT_LOG_INTERVAL_SECS),
        )?;

        Ok(Config {
            thresholds: raw.thresholds,
            tui: TuiConfig {
                refresh_interval,
                layout: raw.tui.layout,
                blink: raw.tui.blink,
            },
            alert_log_path: raw
                .alert_log_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ALERT_LOG)),
            csv_log_path: raw
                .csv_log_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_LOG)),
            log_interval,
            disk_path: raw
                .disk_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DISK_PATH)),
            diagnostic_log_path: raw.diagnostic_log_path,
        })
    }

    /// Pick the config file to load.
    ///
    /// An explicit path always wins. Otherwise `./config.json` is used when it
    /// exists, then the per-user config directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join("sysdash").join(DEFAULT_CONFIG_FILE))
            .filter(|p| p.exists())
            .unwrap_or(local)
    }
}

fn seconds(key: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        SysdashError::config(format!(
            "{} must be a non-negative number of seconds, got {}",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "thresholds": { "cpu_percent": 80, "memory_percent": 90, "disk_percent": 95 }
    }"#;

    #[test]
    fn test_defaults_are_resolved() {
        let config = Config::from_json(MINIMAL).unwrap();

        assert_eq!(config.tui.refresh_interval, Duration::from_secs(1));
        assert_eq!(config.tui.layout, LayoutMode::Auto);
        assert_eq!(config.tui.blink, BlinkMode::Auto);
        assert_eq!(config.alert_log_path, PathBuf::from("alerts.log"));
        assert_eq!(config.csv_log_path, PathBuf::from("metrics_log.csv"));
        assert_eq!(config.log_interval, Duration::from_secs(5));
        assert!(config.thresholds.net_bytes_per_sec.is_none());
        assert!(config.diagnostic_log_path.is_none());
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_json(
            r#"{
                "thresholds": {
                    "cpu_percent": 75.5,
                    "memory_percent": 85,
                    "disk_percent": 90,
                    "net_bytes_per_sec": 1048576
                },
                "tui": { "refresh_interval": 0.5, "layout": "stacked", "blink": "software" },
                "alert_log_path": "/tmp/a.log",
                "log_interval_seconds": 10
            }"#,
        )
        .unwrap();

        assert_eq!(config.thresholds.cpu_percent, 75.5);
        assert_eq!(config.thresholds.net_bytes_per_sec, Some(1048576.0));
        assert_eq!(config.tui.refresh_interval, Duration::from_millis(500));
        assert_eq!(config.tui.layout, LayoutMode::Stacked);
        assert_eq!(config.tui.blink, BlinkMode::Software);
        assert_eq!(config.alert_log_path, PathBuf::from("/tmp/a.log"));
        assert_eq!(config.log_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_refresh_interval_is_allowed() {
        let config = Config::from_json(
            r#"{
                "thresholds": { "cpu_percent": 80, "memory_percent": 90, "disk_percent": 95 },
                "tui": { "refresh_interval": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.tui.refresh_interval, Duration::ZERO);
    }

    #[test]
    fn test_negative_refresh_interval_rejected() {
        let err = Config::from_json(
            r#"{
                "thresholds": { "cpu_percent": 80, "memory_percent": 90, "disk_percent": 95 },
                "tui": { "refresh_interval": -1 }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SysdashError::Config(_)));
    }

    #[test]
    fn test_missing_threshold_rejected() {
        let err = Config::from_json(r#"{ "thresholds": { "cpu_percent": 80 } }"#).unwrap_err();
        assert!(matches!(err, SysdashError::Json(_)));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("Split".parse::<LayoutMode>().unwrap(), LayoutMode::Split);
        assert_eq!("stacked".parse::<LayoutMode>().unwrap(), LayoutMode::Stacked);
        assert!("grid".parse::<LayoutMode>().is_err());
    }
}
