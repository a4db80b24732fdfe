use ratatui::prelude::*;

/// Colour tier of a dashboard element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Nominal,
    Warning,
    Critical,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Plain => Color::White,
            Tone::Nominal => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Critical => Color::Red,
        }
    }
}

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;

/// Tone of a percentage relative to its alert threshold
pub fn percent_tone(value: f64, threshold: f64) -> Tone {
    if value < 0.75 * threshold {
        Tone::Nominal
    } else if value < threshold {
        Tone::Warning
    } else {
        Tone::Critical
    }
}

/// Tone of a byte rate. Fixed bands, independent of alert thresholds.
pub fn rate_tone(bytes_per_sec: f64) -> Tone {
    if bytes_per_sec < 100.0 * KB {
        Tone::Nominal
    } else if bytes_per_sec < MB {
        Tone::Warning
    } else {
        Tone::Critical
    }
}

/// `[####    ]` bar, `width` cells including the brackets
pub fn bar(width: usize, percent: f64) -> String {
    if width < 2 {
        return String::new();
    }
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let inner = width - 2;
    let filled = ((inner as f64 * percent / 100.0).floor() as usize).min(inner);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(inner - filled))
}

/// `+------ Title ------+` spanning `width` cells
pub fn panel_header(title: &str, width: usize) -> String {
    let label = format!(" {} ", title);
    let dashes = width.saturating_sub(label.len() + 2);
    let left = dashes / 2;
    let right = dashes - left;
    format!("+{}{}{}+", "-".repeat(left), label, "-".repeat(right))
}
