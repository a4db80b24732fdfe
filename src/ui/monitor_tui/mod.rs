//! Terminal User Interface for system monitoring.
//!
//! Provides a live dashboard using ratatui. Rendering is split from painting:
//! [`Renderer`] turns a frame into positioned draw ops and [`paint`] clips
//! them onto whatever surface the terminal currently offers.

mod app;
mod blink;
mod event_handler;
mod render;
mod surface;
mod widgets;

pub use app::{run_monitor_app, Dashboard, LoopState, TerminalGuard};
pub use blink::{software_blink_visible, BlinkStrategy, TerminalCapabilities};
pub use event_handler::MonitorEvent;
pub use render::{RenderFrame, Renderer};
pub use surface::{paint, DrawOp, Surface};
pub use widgets::Tone;
