//! Alert blinking.
//!
//! The strategy is picked once at startup. Terminals that honour the blink
//! attribute do the flashing themselves; otherwise the renderer alternates
//! between the alert text and a blank of equal width, timed by the wall clock.

use chrono::{DateTime, Utc};
use std::env;
use std::time::Duration;

use crate::core::BlinkMode;

/// Half of the software blink period
pub const SOFTWARE_BLINK_PHASE: Duration = Duration::from_millis(500);

/// Redraw cadence needed to show the software toggle
pub const SOFTWARE_BLINK_REDRAW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub blink: bool,
}

impl TerminalCapabilities {
    /// Probe the current terminal
    pub fn detect() -> Self {
        let term = env::var("TERM").ok();
        let windows_terminal = env::var_os("WT_SESSION").is_some();
        Self::from_env(term.as_deref(), cfg!(windows), windows_terminal)
    }

    /// Legacy Windows consoles and dumb terminals ignore the blink attribute
    pub fn from_env(term: Option<&str>, windows: bool, windows_terminal: bool) -> Self {
        let blink = if windows {
            windows_terminal
        } else {
            matches!(term, Some(t) if !t.is_empty() && t != "dumb")
        };
        Self { blink }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStrategy {
    /// Draw once with the blink attribute
    Hardware,
    /// Toggle text and blank on the wall clock
    Software,
}

impl BlinkStrategy {
    pub fn select(mode: BlinkMode, caps: TerminalCapabilities) -> Self {
        match mode {
            BlinkMode::Hardware => BlinkStrategy::Hardware,
            BlinkMode::Software => BlinkStrategy::Software,
            BlinkMode::Auto if caps.blink => BlinkStrategy::Hardware,
            BlinkMode::Auto => BlinkStrategy::Software,
        }
    }

    /// Whether the view must be redrawn between refresh cycles
    pub fn needs_redraw(self) -> bool {
        self == BlinkStrategy::Software
    }
}

/// Software blink phase at `now`: visible for the first half of each second
pub fn software_blink_visible(now: DateTime<Utc>) -> bool {
    let phase = now
        .timestamp_millis()
        .div_euclid(SOFTWARE_BLINK_PHASE.as_millis() as i64);
    phase.rem_euclid(2) == 0
}
