// sysdash library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, SysdashError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize logging.
///
/// `default_level` applies unless `RUST_LOG` says otherwise. With a
/// `log_file`, records are appended there instead of stderr.
pub fn init_logging(log_file: Option<&Path>, default_level: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level).parse_default_env();

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests)
    let _ = builder.try_init();
    Ok(())
}
