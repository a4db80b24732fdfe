// Command handlers module
pub mod monitor;
pub mod record;

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches};
use std::time::Duration;

/// `--interval SECS` shared by `monitor` and `record`
pub fn interval_arg(help: &'static str) -> Arg {
    Arg::new("interval")
        .short('i')
        .long("interval")
        .value_name("SECS")
        .help(help)
        .value_parser(clap::value_parser!(f64))
}

/// Read `--interval`, if given, as a duration
pub(crate) fn interval_override(matches: &ArgMatches) -> Result<Option<Duration>> {
    match matches.get_one::<f64>("interval").copied() {
        None => Ok(None),
        Some(secs) => match Duration::try_from_secs_f64(secs) {
            Ok(d) => Ok(Some(d)),
            Err(_) => bail!("--interval must be a non-negative number of seconds, got {}", secs),
        },
    }
}
