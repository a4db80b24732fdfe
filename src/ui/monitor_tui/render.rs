//! Dashboard layout.
//!
//! One layout engine serves both geometries: in split mode the CPU panel takes
//! the left half and the memory, disk and network panels stack on the right;
//! in stacked mode every panel shares a single column. The alert footer is
//! always anchored to the bottom rows and panel content never overwrites it.

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::core::system_monitor::{AlertSet, Rates, Sample, ThresholdConfig};
use crate::core::LayoutMode;
use crate::ui::formatters::{format_bytes, format_rate, utc_timestamp};

use super::blink::{software_blink_visible, BlinkStrategy};
use super::surface::DrawOp;
use super::widgets::{bar, panel_header, percent_tone, rate_tone, Tone};

/// Rows reserved at the bottom for the alerts footer
pub const FOOTER_ROWS: u16 = 4;
/// Narrowest terminal that still gets the split layout in auto mode
pub const SPLIT_MIN_WIDTH: u16 = 80;
const MAX_FOOTER_ALERTS: usize = 2;
const CORE_LABEL_WIDTH: u16 = 14;
const CONTENT_TOP: u16 = 2;

/// Everything one cycle shows
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub sample: Sample,
    pub rates: Rates,
    pub alerts: AlertSet,
    /// The latest poll failed and these values are from an earlier cycle
    pub stale: bool,
    pub alert_log_failures: u64,
}

enum Line {
    Text { indent: u16, text: String, tone: Tone },
    Bar { indent: u16, percent: f64, tone: Tone },
    /// Fixed-width label followed by a bar filling the rest of the column
    Labeled {
        indent: u16,
        label: String,
        percent: f64,
        tone: Tone,
    },
    Blank,
}

struct Panel {
    title: &'static str,
    lines: Vec<Line>,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    col: u16,
    width: u16,
}

/// Layout engine configured once at startup
#[derive(Debug, Clone)]
pub struct Renderer {
    thresholds: ThresholdConfig,
    layout: LayoutMode,
    blink: BlinkStrategy,
}

impl Renderer {
    pub fn new(thresholds: ThresholdConfig, layout: LayoutMode, blink: BlinkStrategy) -> Self {
        Self {
            thresholds,
            layout,
            blink,
        }
    }

    pub fn blink(&self) -> BlinkStrategy {
        self.blink
    }

    /// Concrete geometry for a terminal `width` columns wide
    pub fn resolve_layout(&self, width: u16) -> LayoutMode {
        match self.layout {
            LayoutMode::Auto if width >= SPLIT_MIN_WIDTH => LayoutMode::Split,
            LayoutMode::Auto => LayoutMode::Stacked,
            fixed => fixed,
        }
    }

    /// Lay out `frame` for a `width` x `height` terminal
    pub fn render(
        &self,
        frame: &RenderFrame,
        width: u16,
        height: u16,
        now: DateTime<Utc>,
    ) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        render_header(&mut ops, frame.stale, now);

        let footer_top = height.saturating_sub(FOOTER_ROWS);
        let mut body = Vec::new();
        let cpu = self.cpu_panel(&frame.sample);
        let side = [
            self.memory_panel(&frame.sample),
            self.disk_panel(&frame.sample, &frame.rates),
            network_panel(&frame.rates),
        ];

        match self.resolve_layout(width) {
            LayoutMode::Split => {
                let mid = width / 2;
                let left = Column {
                    col: 2,
                    width: mid.saturating_sub(4),
                };
                let right_col = mid.saturating_add(2);
                let right = Column {
                    col: right_col,
                    width: width.saturating_sub(right_col),
                };

                place(&mut body, &cpu, left, CONTENT_TOP);
                let mut row = CONTENT_TOP;
                for panel in &side {
                    row = place(&mut body, panel, right, row);
                }
            }
            _ => {
                let column = Column {
                    col: 2,
                    width: width.saturating_sub(4),
                };
                let mut row = place(&mut body, &cpu, column, CONTENT_TOP);
                for panel in &side {
                    row = place(&mut body, panel, column, row);
                }
            }
        }

        body.retain(|op| op.row < footer_top);
        ops.extend(body);

        self.render_footer(&mut ops, frame, width, footer_top, now);
        ops
    }

    fn cpu_panel(&self, sample: &Sample) -> Panel {
        let threshold = self.thresholds.cpu_percent;
        let total = sample.cpu_total_percent as f64;
        let tone = percent_tone(total, threshold);

        let mut lines = vec![
            Line::Text {
                indent: 2,
                text: format!("Total: {:.1}%", total),
                tone,
            },
            Line::Bar {
                indent: 2,
                percent: total,
                tone,
            },
            Line::Blank,
            Line::Text {
                indent: 2,
                text: "Per-Core:".to_string(),
                tone: Tone::Plain,
            },
        ];

        for (i, &pct) in sample.cpu_per_core.iter().enumerate() {
            let pct = pct as f64;
            lines.push(Line::Labeled {
                indent: 4,
                label: format!("Core {}: {:4.1}%", i, pct),
                percent: pct,
                tone: percent_tone(pct, threshold),
            });
        }

        Panel { title: "CPU", lines }
    }

    fn memory_panel(&self, sample: &Sample) -> Panel {
        let pct = sample.mem_percent as f64;
        let tone = percent_tone(pct, self.thresholds.memory_percent);

        Panel {
            title: "Memory",
            lines: usage_lines(pct, tone, sample.mem_used, sample.mem_total),
        }
    }

    fn disk_panel(&self, sample: &Sample, rates: &Rates) -> Panel {
        let pct = sample.disk_percent as f64;
        let tone = percent_tone(pct, self.thresholds.disk_percent);

        let mut lines = usage_lines(pct, tone, sample.disk_used, sample.disk_total);
        lines.push(Line::Text {
            indent: 2,
            text: format!("Read:  {}", format_rate(rates.disk_read_bps)),
            tone: rate_tone(rates.disk_read_bps),
        });
        lines.push(Line::Text {
            indent: 2,
            text: format!("Write: {}", format_rate(rates.disk_write_bps)),
            tone: rate_tone(rates.disk_write_bps),
        });

        Panel {
            title: "Disk",
            lines,
        }
    }

    fn render_footer(
        &self,
        ops: &mut Vec<DrawOp>,
        frame: &RenderFrame,
        width: u16,
        top: u16,
        now: DateTime<Utc>,
    ) {
        ops.push(DrawOp::new(
            top,
            2,
            "-".repeat(width.saturating_sub(4) as usize),
            Tone::Plain,
        ));
        ops.push(DrawOp::new(top.saturating_add(1), 2, "Alerts:", Tone::Plain));

        if frame.alert_log_failures > 0 {
            ops.push(DrawOp::new(
                top.saturating_add(1),
                10,
                format!(
                    "(alert log unavailable: {} failed writes)",
                    frame.alert_log_failures
                ),
                Tone::Warning,
            ));
        }

        if frame.alerts.is_empty() {
            ops.push(DrawOp::new(top.saturating_add(2), 4, "No alerts", Tone::Nominal));
            return;
        }

        let visible = software_blink_visible(now);
        for (i, alert) in frame.alerts.iter().take(MAX_FOOTER_ALERTS).enumerate() {
            let row = top.saturating_add(2 + i as u16);
            let op = match self.blink {
                BlinkStrategy::Hardware => {
                    DrawOp::new(row, 4, alert.message.as_str(), Tone::Critical).blinking()
                }
                BlinkStrategy::Software if visible => {
                    DrawOp::new(row, 4, alert.message.as_str(), Tone::Critical)
                }
                // Same width as the message so nothing shifts
                BlinkStrategy::Software => {
                    DrawOp::new(row, 4, " ".repeat(alert.message.width()), Tone::Plain)
                }
            };
            ops.push(op);
        }
    }
}

fn render_header(ops: &mut Vec<DrawOp>, stale: bool, now: DateTime<Utc>) {
    let title = format!("System Monitor - {}    (q to quit)", utc_timestamp(now));
    let stale_col = 2 + title.width() as u16 + 2;
    ops.push(DrawOp::new(0, 2, title, Tone::Plain));
    if stale {
        ops.push(DrawOp::new(0, stale_col, "[stale]", Tone::Warning));
    }
}

fn usage_lines(pct: f64, tone: Tone, used: u64, total: u64) -> Vec<Line> {
    vec![
        Line::Text {
            indent: 2,
            text: format!("Usage: {:.1}%", pct),
            tone,
        },
        Line::Bar {
            indent: 2,
            percent: pct,
            tone,
        },
        Line::Text {
            indent: 2,
            text: format!(
                "{} / {}",
                format_bytes(used as f64),
                format_bytes(total as f64)
            ),
            tone: Tone::Plain,
        },
    ]
}

fn network_panel(rates: &Rates) -> Panel {
    Panel {
        title: "Network",
        lines: vec![
            Line::Text {
                indent: 2,
                text: format!("Upload:   {}", format_rate(rates.net_up_bps)),
                tone: rate_tone(rates.net_up_bps),
            },
            Line::Text {
                indent: 2,
                text: format!("Download: {}", format_rate(rates.net_down_bps)),
                tone: rate_tone(rates.net_down_bps),
            },
        ],
    }
}

/// Emit `panel` into `column` starting at `row`; returns the next free row
fn place(body: &mut Vec<DrawOp>, panel: &Panel, column: Column, mut row: u16) -> u16 {
    body.push(DrawOp::new(
        row,
        column.col,
        panel_header(panel.title, column.width as usize),
        Tone::Plain,
    ));
    row = row.saturating_add(1);

    for line in &panel.lines {
        match line {
            Line::Text { indent, text, tone } => {
                body.push(DrawOp::new(
                    row,
                    column.col.saturating_add(*indent),
                    text.as_str(),
                    *tone,
                ));
            }
            Line::Bar {
                indent,
                percent,
                tone,
            } => {
                let width = column.width.saturating_sub(indent + 2);
                push_bar(body, row, column.col.saturating_add(*indent), width, *percent, *tone);
            }
            Line::Labeled {
                indent,
                label,
                percent,
                tone,
            } => {
                body.push(DrawOp::new(
                    row,
                    column.col.saturating_add(*indent),
                    label.as_str(),
                    *tone,
                ));
                let offset = indent + CORE_LABEL_WIDTH;
                let width = column.width.saturating_sub(offset + 2);
                push_bar(body, row, column.col.saturating_add(offset), width, *percent, *tone);
            }
            Line::Blank => {}
        }
        row = row.saturating_add(1);
    }

    row.saturating_add(1)
}

fn push_bar(body: &mut Vec<DrawOp>, row: u16, col: u16, width: u16, percent: f64, tone: Tone) {
    let text = bar(width as usize, percent);
    if !text.is_empty() {
        body.push(DrawOp::new(row, col, text, tone));
    }
}
