//! Thin drawing surface.
//!
//! The renderer produces positioned [`DrawOp`]s; painting them onto a surface
//! clips anything outside the current bounds, so a terminal that shrank
//! between cycles never turns into an error.

use ratatui::buffer::Buffer;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthChar;

use super::widgets::Tone;

/// Text placed at a row and column
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub tone: Tone,
    pub blink: bool,
}

impl DrawOp {
    pub fn new<S: Into<String>>(row: u16, col: u16, text: S, tone: Tone) -> Self {
        Self {
            row,
            col,
            text: text.into(),
            tone,
            blink: false,
        }
    }

    /// Same op with the terminal blink attribute
    pub fn blinking(mut self) -> Self {
        self.blink = true;
        self
    }

    pub fn style(&self) -> Style {
        let style = Style::default().fg(self.tone.color());
        if self.blink {
            style.add_modifier(Modifier::SLOW_BLINK | Modifier::BOLD)
        } else {
            style
        }
    }
}

/// Something text can be written to at (row, col)
pub trait Surface {
    /// (width, height) in cells
    fn size(&self) -> (u16, u16);

    /// Write `text` starting at (row, col). Callers guarantee the start is in
    /// bounds and the text fits.
    fn put(&mut self, row: u16, col: u16, text: &str, style: Style);
}

impl Surface for Buffer {
    fn size(&self) -> (u16, u16) {
        (self.area.width, self.area.height)
    }

    fn put(&mut self, row: u16, col: u16, text: &str, style: Style) {
        let x = self.area.x.saturating_add(col);
        let y = self.area.y.saturating_add(row);
        self.set_string(x, y, text, style);
    }
}

/// Longest prefix of `text` that fits in `max_width` display cells
pub fn clip(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Paint ops onto `surface`, skipping or truncating what falls outside.
///
/// Returns the number of ops that were (at least partly) drawn.
pub fn paint<S: Surface + ?Sized>(surface: &mut S, ops: &[DrawOp]) -> usize {
    let (width, height) = surface.size();
    let mut drawn = 0;

    for op in ops {
        if op.row >= height || op.col >= width {
            continue;
        }
        let text = clip(&op.text, (width - op.col) as usize);
        if text.is_empty() {
            continue;
        }
        surface.put(op.row, op.col, text, op.style());
        drawn += 1;
    }

    drawn
}
