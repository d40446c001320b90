//! # Home Screen Component
//!
//! One navigation button per capability screen, spread evenly down the
//! screen. Up/Down moves the selection, Enter opens it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HomeMenuState` lives in `TuiState`
//! - `HomeScreen` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::router::ScreenName;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const BUTTON_HEIGHT: u16 = 3;

/// Events emitted by the home menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    Open(ScreenName),
}

pub struct HomeMenuState {
    pub destinations: Vec<ScreenName>,
    pub selected: usize,
}

impl HomeMenuState {
    pub fn new(destinations: Vec<ScreenName>) -> Self {
        Self {
            destinations,
            selected: 0,
        }
    }
}

impl Default for HomeMenuState {
    fn default() -> Self {
        Self::new(vec![ScreenName::Nfc, ScreenName::Qr])
    }
}

impl EventHandler for HomeMenuState {
    type Event = HomeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HomeEvent> {
        if self.destinations.is_empty() {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.destinations.len() - 1);
                None
            }
            TuiEvent::Submit => self.destinations.get(self.selected).copied().map(HomeEvent::Open),
            _ => None,
        }
    }
}

/// Button caption, e.g. `"Go to NFC!"`.
pub fn button_label(destination: ScreenName) -> String {
    format!("Go to {}!", destination.as_str().to_uppercase())
}

pub struct HomeScreen<'a> {
    state: &'a HomeMenuState,
}

impl<'a> HomeScreen<'a> {
    pub fn new(state: &'a HomeMenuState) -> Self {
        Self { state }
    }
}

impl Component for HomeScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let constraints = self
            .state
            .destinations
            .iter()
            .map(|_| Constraint::Length(BUTTON_HEIGHT));
        let rows = Layout::vertical(constraints)
            .flex(Flex::SpaceEvenly)
            .split(area);

        for (i, (destination, row)) in self.state.destinations.iter().zip(rows.iter()).enumerate() {
            let [button_area] = Layout::horizontal([Constraint::Percentage(60)])
                .flex(Flex::Center)
                .areas(*row);

            let style = if i == self.state.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let button = Paragraph::new(button_label(*destination))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered());
            frame.render_widget(button, button_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_button_labels() {
        assert_eq!(button_label(ScreenName::Nfc), "Go to NFC!");
        assert_eq!(button_label(ScreenName::Qr), "Go to QR!");
    }

    #[test]
    fn test_selection_clamps() {
        let mut state = HomeMenuState::default();
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(state.selected, 0);

        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(HomeEvent::Open(ScreenName::Qr))
        );
    }

    #[test]
    fn test_home_renders_both_buttons() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = HomeMenuState::default();

        terminal
            .draw(|f| HomeScreen::new(&state).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Go to NFC!"));
        assert!(text.contains("Go to QR!"));
    }
}
