use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

use sysdash::commands;
use sysdash::core::Config;

fn build_cli() -> Command {
    Command::new("sysdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live host telemetry dashboard with threshold alerts")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: ./config.json, then the user config directory)")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        // Running without a subcommand starts the dashboard
        .args(commands::monitor::args())
        .subcommand(
            Command::new("monitor")
                .about("Show the live dashboard (default)")
                .args(commands::monitor::args()),
        )
        .subcommand(
            Command::new("record")
                .about("Append metrics to a CSV file and log alerts, without a dashboard")
                .args(commands::record::args()),
        )
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let path = Config::resolve_path(matches.get_one::<PathBuf>("config").map(PathBuf::as_path));
    Config::load(&path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("monitor", sub_matches)) => {
            let config = load_config(sub_matches)?;
            commands::monitor::execute(sub_matches, config)
        }
        Some(("record", sub_matches)) => {
            let config = load_config(sub_matches)?;
            commands::record::execute(sub_matches, config)
        }
        _ => {
            let config = load_config(&matches)?;
            commands::monitor::execute(&matches, config)
        }
    }
}
