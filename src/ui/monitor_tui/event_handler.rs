use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Terminal size changed; draw again without sampling
    Redraw,
    /// No action
    None,
}

impl MonitorEvent {
    /// Map a terminal event to a monitor event
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(_, _) => MonitorEvent::Redraw,
            _ => MonitorEvent::None,
        }
    }

    pub fn from_key(key: &KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return MonitorEvent::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MonitorEvent::Quit,
            // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                MonitorEvent::Quit
            }
            _ => MonitorEvent::None,
        }
    }
}
