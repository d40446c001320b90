//! # NFC Screen Component
//!
//! Shows the tag session's display message centered on screen. While the
//! message is still empty a dimmed placeholder describes what the session
//! is doing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::tag_session::TagSessionPhase;
use crate::tui::component::Component;

pub struct NfcScreen {
    pub message: String,
    pub phase: TagSessionPhase,
}

impl NfcScreen {
    pub fn new(message: String, phase: TagSessionPhase) -> Self {
        Self { message, phase }
    }

    fn placeholder(&self) -> &'static str {
        match self.phase {
            TagSessionPhase::Unstarted => "Checking NFC support...",
            TagSessionPhase::Listening => "Hold a tag near the reader",
            TagSessionPhase::Idle | TagSessionPhase::Stopped => "",
        }
    }
}

impl Component for NfcScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = if self.message.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder(),
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.message
                .lines()
                .map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                })
                .collect()
        };

        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut screen: NfcScreen) -> String {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_tag_message_lines() {
        let text = rendered(NfcScreen::new(
            "ID: 04a2\nBase64: BKI=".to_string(),
            TagSessionPhase::Listening,
        ));
        assert!(text.contains("ID: 04a2"));
        assert!(text.contains("Base64: BKI="));
    }

    #[test]
    fn test_placeholder_while_waiting() {
        let text = rendered(NfcScreen::new(String::new(), TagSessionPhase::Listening));
        assert!(text.contains("Hold a tag near the reader"));

        let text = rendered(NfcScreen::new(String::new(), TagSessionPhase::Unstarted));
        assert!(text.contains("Checking NFC support"));
    }
}
