use std::io;
use thiserror::Error;

/// Custom error type for sysdash
#[derive(Error, Debug)]
pub enum SysdashError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Alert log unavailable: {0}")]
    AlertLog(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

/// Result type alias for sysdash
pub type Result<T> = std::result::Result<T, SysdashError>;

impl SysdashError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SysdashError::Config(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        SysdashError::MetricCollection(msg.into())
    }

    pub fn alert_log<S: Into<String>>(msg: S) -> Self {
        SysdashError::AlertLog(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        SysdashError::Tui(msg.into())
    }
}
