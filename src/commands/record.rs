//! Headless metrics recorder.
//!
//! Appends one CSV row per interval and edge-logs alerts, printing each new
//! alert to the console.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Arg, ArgMatches};
use colored::*;
use log::LevelFilter;

use crate::core::system_monitor::{
    AlertLog, CsvLog, MetricsCollector, MetricsProvider, Recorder,
};
use crate::core::Config;

/// Granularity of the interruptible sleep
const SLEEP_STEP: Duration = Duration::from_millis(100);

pub fn args() -> Vec<Arg> {
    vec![
        super::interval_arg("Seconds between samples (overrides log_interval_seconds)"),
        Arg::new("output")
            .short('o')
            .long("output")
            .value_name("PATH")
            .help("CSV file to append to (overrides csv_log_path)")
            .value_parser(clap::value_parser!(PathBuf)),
    ]
}

/// Execute the record command
pub fn execute(matches: &ArgMatches, mut config: Config) -> Result<()> {
    if let Some(interval) = super::interval_override(matches)? {
        config.log_interval = interval;
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.csv_log_path = output.clone();
    }

    crate::init_logging(None, LevelFilter::Warn).context("Failed to initialize logging")?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let csv = CsvLog::open(&config.csv_log_path).with_context(|| {
        format!("Failed to open CSV log {}", config.csv_log_path.display())
    })?;

    let mut collector = MetricsCollector::new(&config.disk_path);
    // Wait for CPU measurement interval
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    let baseline = collector.sample().context("Failed to take baseline sample")?;

    let mut recorder = Recorder::new(
        baseline,
        csv,
        AlertLog::new(&config.alert_log_path),
        config.thresholds.clone(),
    );

    println!(
        "Starting metrics recorder (interval={}s) writing to {}",
        config.log_interval.as_secs_f64(),
        config.csv_log_path.display()
    );

    loop {
        if !sleep_until(Instant::now() + config.log_interval, &interrupted) {
            break;
        }

        let sample = match collector.sample() {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("Skipping sample: {}", e);
                continue;
            }
        };

        for alert in recorder
            .record(&sample, Utc::now())
            .context("Failed to append metrics row")?
        {
            println!("{} {}", "ALERT:".red().bold(), alert.message);
        }
    }

    let failures = recorder.alert_log().failures();
    if failures > 0 {
        println!(
            "{}",
            format!("{} alert log writes failed", failures).yellow()
        );
    }
    println!("Stopping metrics recorder.");
    Ok(())
}

/// Sleep until `deadline`. Returns false if interrupted first.
fn sleep_until(deadline: Instant, interrupted: &AtomicBool) -> bool {
    loop {
        if interrupted.load(Ordering::Relaxed) {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        std::thread::sleep(remaining.min(SLEEP_STEP));
    }
}
