//! # QR Screen Component
//!
//! A bordered viewfinder standing in for the camera preview. While the scan
//! session is paused the detected code is shown in a modal alert on top,
//! with its single acknowledge action.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};

use crate::core::scan_session::{CodeAlert, ScanState};
use crate::tui::component::Component;

pub struct QrScreen<'a> {
    pub state: ScanState,
    pub alert: Option<&'a CodeAlert>,
}

impl<'a> QrScreen<'a> {
    pub fn new(state: ScanState, alert: Option<&'a CodeAlert>) -> Self {
        Self { state, alert }
    }

    fn render_alert(frame: &mut Frame, area: Rect, alert: &CodeAlert) {
        let overlay = centered_rect(60, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", alert.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let lines = vec![
            Line::from(alert.payload.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                format!("[ {} ]", alert.action_label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Right),
        ];

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);
    }
}

impl Component for QrScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let finder = centered_rect(70, 80, area);
        let (caption, color) = match self.state {
            ScanState::Active => ("Point the camera at a QR code", Color::Green),
            ScanState::Paused => ("Paused", Color::DarkGray),
        };

        let block = Block::bordered()
            .title(" Viewfinder ")
            .border_style(Style::default().fg(color));
        let inner = block.inner(finder);
        frame.render_widget(block, finder);

        let [caption_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(caption, Style::default().fg(color))).alignment(Alignment::Center),
            caption_area,
        );

        if let Some(alert) = self.alert {
            Self::render_alert(frame, area, alert);
        }
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut screen: QrScreen) -> String {
        let backend = TestBackend::new(60, 20);
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
    fn test_active_viewfinder() {
        let text = rendered(QrScreen::new(ScanState::Active, None));
        assert!(text.contains("Viewfinder"));
        assert!(text.contains("Point the camera"));
    }

    #[test]
    fn test_alert_shows_payload_and_action() {
        let alert = CodeAlert {
            title: "QR code".to_string(),
            payload: "PAYLOAD".to_string(),
            action_label: "OK".to_string(),
        };
        let text = rendered(QrScreen::new(ScanState::Paused, Some(&alert)));
        assert!(text.contains("QR code"));
        assert!(text.contains("PAYLOAD"));
        assert!(text.contains("[ OK ]"));
    }
}
