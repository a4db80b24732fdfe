use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::system_monitor::{
    evaluate_alerts, AlertLog, MetricsCollector, MetricsProvider, RateState, ThresholdConfig,
};
use crate::core::Config;
use crate::error::SysdashError;

use super::blink::{BlinkStrategy, TerminalCapabilities, SOFTWARE_BLINK_REDRAW};
use super::event_handler::MonitorEvent;
use super::render::{RenderFrame, Renderer};
use super::surface::paint;

/// Lifecycle of the refresh loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Stopping,
    Stopped,
}

/// Cross-cycle state of the dashboard.
///
/// Owns the previous sample and the alert log baseline; nothing else mutates
/// them.
pub struct Dashboard<P> {
    provider: P,
    rates: Option<RateState>,
    alert_log: AlertLog,
    thresholds: ThresholdConfig,
    frame: RenderFrame,
    state: LoopState,
}

impl<P: MetricsProvider> Dashboard<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        Self {
            provider,
            rates: None,
            alert_log: AlertLog::new(&config.alert_log_path),
            thresholds: config.thresholds.clone(),
            frame: RenderFrame::default(),
            state: LoopState::Initializing,
        }
    }

    /// Take the baseline sample and enter `Running`
    pub fn start(&mut self) -> crate::error::Result<()> {
        let baseline = self.provider.sample()?;
        self.frame = RenderFrame {
            sample: baseline.clone(),
            ..Default::default()
        };
        self.rates = Some(RateState::new(baseline));
        self.state = LoopState::Running;
        Ok(())
    }

    /// Run one cycle: sample, derive rates, evaluate, log rising edges.
    ///
    /// A failed poll keeps the previous frame and marks it stale.
    pub fn tick(&mut self, now: DateTime<Utc>) -> &RenderFrame {
        let Some(rates) = self.rates.as_mut() else {
            return &self.frame;
        };
        if self.state != LoopState::Running {
            return &self.frame;
        }

        match self.provider.sample() {
            Ok(sample) => {
                let derived = rates.advance(&sample);
                let alerts = evaluate_alerts(&sample, &derived, &self.thresholds);
                let _ = self.alert_log.record(&alerts, now);

                self.frame = RenderFrame {
                    sample,
                    rates: derived,
                    alerts,
                    stale: false,
                    alert_log_failures: self.alert_log.failures(),
                };
            }
            Err(e) => {
                log::warn!("Skipping refresh cycle: {}", e);
                self.frame.stale = true;
            }
        }

        &self.frame
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.alert_log
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Quit key or interrupt received
    pub fn stop(&mut self) {
        if matches!(self.state, LoopState::Initializing | LoopState::Running) {
            self.state = LoopState::Stopping;
        }
    }

    /// Terminal released
    pub fn finish(&mut self) {
        self.state = LoopState::Stopped;
    }
}

/// Raw-mode alternate screen, restored when dropped
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn acquire() -> crate::error::Result<Self> {
        enable_raw_mode().map_err(|e| SysdashError::tui(format!("failed to enable raw mode: {}", e)))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(SysdashError::tui(format!(
                "failed to enter alternate screen: {}",
                e
            )));
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
                Err(SysdashError::tui(format!("failed to create terminal: {}", e)))
            }
        }
    }

    pub fn draw(&mut self, renderer: &Renderer, frame: &RenderFrame) -> crate::error::Result<()> {
        self.terminal
            .draw(|f| {
                let area = f.area();
                let ops = renderer.render(frame, area.width, area.height, Utc::now());
                paint(f.buffer_mut(), &ops);
            })
            .map_err(|e| SysdashError::tui(format!("failed to draw dashboard: {}", e)))?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
    }
}

/// Wait until `deadline`, watching for quit keys and interrupts.
///
/// Input is polled in short steps so an interrupt is noticed quickly; in
/// software blink mode each step also redraws the frame so the toggle follows
/// the wall clock rather than the refresh interval.
fn wait_for_next_cycle(
    guard: &mut TerminalGuard,
    renderer: &Renderer,
    frame: &RenderFrame,
    deadline: Instant,
    interrupted: &AtomicBool,
) -> Result<MonitorEvent> {
    let redraw_blink = renderer.blink().needs_redraw() && !frame.alerts.is_empty();

    loop {
        if interrupted.load(Ordering::Relaxed) {
            return Ok(MonitorEvent::Quit);
        }

        let step = deadline
            .saturating_duration_since(Instant::now())
            .min(SOFTWARE_BLINK_REDRAW);

        if event::poll(step).context("Event poll failed")? {
            let ev = event::read().context("Event read failed")?;
            match MonitorEvent::from_event(&ev) {
                MonitorEvent::Quit => return Ok(MonitorEvent::Quit),
                MonitorEvent::Redraw => guard.draw(renderer, frame)?,
                MonitorEvent::None => {}
            }
        } else if redraw_blink {
            guard.draw(renderer, frame)?;
        }

        if Instant::now() >= deadline {
            return Ok(MonitorEvent::None);
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(config: &Config) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut dashboard = Dashboard::new(MetricsCollector::new(&config.disk_path), config);

    // Wait for CPU measurement interval
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    dashboard
        .start()
        .context("Failed to take baseline sample")?;

    let caps = TerminalCapabilities::detect();
    let blink = BlinkStrategy::select(config.tui.blink, caps);
    log::info!(
        "Dashboard starting: refresh {:?}, layout {:?}, blink {:?}",
        config.tui.refresh_interval,
        config.tui.layout,
        blink
    );
    let renderer = Renderer::new(config.thresholds.clone(), config.tui.layout, blink);
    let refresh = config.tui.refresh_interval;

    let mut guard = TerminalGuard::acquire().context("Failed to acquire terminal")?;
    guard.draw(&renderer, dashboard.frame())?;
    let mut next_cycle = Instant::now() + refresh;

    while dashboard.state() == LoopState::Running {
        let event = wait_for_next_cycle(
            &mut guard,
            &renderer,
            dashboard.frame(),
            next_cycle,
            &interrupted,
        )?;
        if event == MonitorEvent::Quit {
            dashboard.stop();
            break;
        }

        let cycle_start = Instant::now();
        dashboard.tick(Utc::now());
        guard.draw(&renderer, dashboard.frame())?;
        next_cycle = cycle_start + refresh;
    }

    drop(guard);
    dashboard.finish();
    log::info!(
        "Dashboard stopped ({} alert log failures)",
        dashboard.alert_log().failures()
    );
    Ok(())
}
