//! # TitleBar Component
//!
//! Top bar showing the current screen's title from the router's display
//! options, a back marker when there is somewhere to go back to, and the
//! session status (e.g. "Listening for tags", "Paused").
//!
//! Purely presentational: all three props come from core state and the bar
//! just renders what it is given.
//!
//! The text changes based on state:
//!
//! 1. **Back + status**: `"‹ NFC | Listening for tags"`
//! 2. **Status only**: `"Home | Ready"`
//! 3. **Default**: `"Home"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Title of the screen on top of the stack
    pub title: String,
    /// Session status (may be empty)
    pub status_message: String,
    pub can_go_back: bool,
}

impl TitleBar {
    pub fn new(title: String, status_message: String, can_go_back: bool) -> Self {
        Self {
            title,
            status_message,
            can_go_back,
        }
    }

    fn text(&self) -> String {
        let back = if self.can_go_back { "‹ " } else { "" };
        if self.status_message.is_empty() {
            format!("{}{}", back, self.title)
        } else {
            format!("{}{} | {}", back, self.title, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}
