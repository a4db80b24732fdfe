//! Dashboard command handler.
//!
//! Provides real-time system monitoring in a TUI dashboard.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use log::LevelFilter;

use crate::core::{Config, LayoutMode};
use crate::ui::monitor_tui::run_monitor_app;

/// Arguments accepted by `monitor`, also accepted at the top level
pub fn args() -> Vec<Arg> {
    vec![
        super::interval_arg("Refresh interval in seconds (overrides tui.refresh_interval)"),
        Arg::new("layout")
            .short('l')
            .long("layout")
            .value_name("MODE")
            .help("Panel layout")
            .value_parser(["auto", "split", "stacked"]),
    ]
}

/// Execute the monitor command
pub fn execute(matches: &ArgMatches, mut config: Config) -> Result<()> {
    if let Some(interval) = super::interval_override(matches)? {
        config.tui.refresh_interval = interval;
    }
    if let Some(layout) = matches.get_one::<String>("layout") {
        config.tui.layout = layout.parse::<LayoutMode>()?;
    }

    // Anything written to stderr would tear the dashboard
    let default_level = if config.diagnostic_log_path.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Off
    };
    crate::init_logging(config.diagnostic_log_path.as_deref(), default_level)
        .context("Failed to open diagnostic log")?;

    run_monitor_app(&config).context("Failed to run system monitor")
}
