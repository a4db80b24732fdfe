use std::collections::VecDeque;
use std::fs;

use chrono::{DateTime, TimeDelta, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use sysdash::core::system_monitor::{MetricsProvider, Sample};
use sysdash::core::{Config, LayoutMode};
use sysdash::ui::monitor_tui::{paint, BlinkStrategy, Dashboard, LoopState, Renderer};
use sysdash::{Result, SysdashError};
use tempfile::TempDir;

struct FakeProvider {
    script: VecDeque<Result<Sample>>,
}

impl FakeProvider {
    fn new(script: Vec<Result<Sample>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl MetricsProvider for FakeProvider {
    fn sample(&mut self) -> Result<Sample> {
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(SysdashError::metric_collection("no more samples")))
    }
}

fn config(temp_dir: &TempDir) -> Config {
    let mut config = Config::from_json(
        r#"{ "thresholds": { "cpu_percent": 80, "memory_percent": 90, "disk_percent": 95 } }"#,
    )
    .unwrap();
    config.alert_log_path = temp_dir.path().join("alerts.log");
    config
}

fn at(secs: i64, cpu: f32) -> Result<Sample> {
    Ok(Sample {
        timestamp: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(secs),
        cpu_total_percent: cpu,
        cpu_per_core: vec![cpu, 10.0],
        mem_used: 4 * 1024 * 1024 * 1024,
        mem_total: 8 * 1024 * 1024 * 1024,
        mem_percent: 50.0,
        disk_percent: 40.0,
        net_recv_bytes: secs as u64 * 2048,
        ..Default::default()
    })
}

fn screen(buf: &Buffer) -> String {
    let mut text = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_dashboard_cycle_to_screen() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = config(&temp_dir);
    let mut dashboard = Dashboard::new(
        FakeProvider::new(vec![at(0, 20.0), at(1, 85.0)]),
        &cfg,
    );
    dashboard.start().unwrap();
    assert_eq!(dashboard.state(), LoopState::Running);

    let frame = dashboard.tick(Utc::now()).clone();
    assert_eq!(frame.rates.net_down_bps, 2048.0);

    let renderer = Renderer::new(cfg.thresholds.clone(), LayoutMode::Auto, BlinkStrategy::Hardware);
    let mut buf = Buffer::empty(Rect::new(0, 0, 100, 30));
    let ops = renderer.render(&frame, 100, 30, Utc::now());
    paint(&mut buf, &ops);
    let text = screen(&buf);

    assert!(text.contains("System Monitor"));
    assert!(text.contains("High CPU: 85.0%"));
    assert!(!text.contains("No alerts"));

    let log = fs::read_to_string(&cfg.alert_log_path).unwrap();
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn test_scenario_repeat_clear_and_return() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = config(&temp_dir);
    let mut dashboard = Dashboard::new(
        FakeProvider::new(vec![at(0, 10.0), at(1, 85.0), at(2, 85.0), at(3, 60.0), at(4, 85.0)]),
        &cfg,
    );
    dashboard.start().unwrap();

    let mut log_lines = Vec::new();
    for _ in 0..4 {
        dashboard.tick(Utc::now());
        let count = fs::read_to_string(&cfg.alert_log_path)
            .map(|s| s.lines().filter(|l| l.contains("High CPU:")).count())
            .unwrap_or(0);
        log_lines.push(count);
    }

    assert_eq!(log_lines, vec![1, 1, 1, 2]);
}

#[test]
fn test_stale_frame_still_renders() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = config(&temp_dir);
    let mut dashboard = Dashboard::new(
        FakeProvider::new(vec![
            at(0, 10.0),
            Err(SysdashError::metric_collection("sensor offline")),
        ]),
        &cfg,
    );
    dashboard.start().unwrap();

    let frame = dashboard.tick(Utc::now()).clone();
    assert!(frame.stale);

    let renderer = Renderer::new(cfg.thresholds.clone(), LayoutMode::Stacked, BlinkStrategy::Hardware);
    let mut buf = Buffer::empty(Rect::new(0, 0, 60, 40));
    paint(&mut buf, &renderer.render(&frame, 60, 40, Utc::now()));

    assert!(screen(&buf).contains("[stale]"));
}

#[test]
fn test_tiny_and_shrinking_terminals() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = config(&temp_dir);
    let mut dashboard = Dashboard::new(FakeProvider::new(vec![at(0, 10.0), at(1, 95.0)]), &cfg);
    dashboard.start().unwrap();
    let frame = dashboard.tick(Utc::now()).clone();
    let renderer = Renderer::new(cfg.thresholds.clone(), LayoutMode::Auto, BlinkStrategy::Software);

    for (w, h) in [(120, 40), (80, 24), (40, 10), (10, 3), (1, 1)] {
        // Ops laid out for a larger terminal painted onto a smaller one
        let ops = renderer.render(&frame, 120, 40, Utc::now());
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        paint(&mut buf, &ops);

        let ops = renderer.render(&frame, w, h, Utc::now());
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        paint(&mut buf, &ops);
    }
}
