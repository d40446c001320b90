use crate::core::router::ScreenName;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HomeScreen, NfcScreen, QrScreen, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, hint_area] = layout.areas(frame.area());

    let screen = app.router.current();
    TitleBar::new(
        app.router.title().to_string(),
        app.status_message.clone(),
        app.router.can_go_back(),
    )
    .render(frame, title_area);

    let mut alert_open = false;
    match screen {
        ScreenName::Home => HomeScreen::new(&tui.home).render(frame, main_area),
        ScreenName::Nfc => {
            if let Some(session) = &app.tag_session {
                NfcScreen::new(session.message().to_string(), session.phase()).render(frame, main_area);
            }
        }
        ScreenName::Qr => {
            if let Some(session) = &app.scan_session {
                alert_open = session.alert().is_some();
                QrScreen::new(session.state(), session.alert()).render(frame, main_area);
            }
        }
    }

    let hint = match &tui.simulator_note {
        Some(note) => format!("{} | {}", key_hints(screen, alert_open), note),
        None => key_hints(screen, alert_open).to_string(),
    };
    frame.render_widget(Span::styled(hint, Style::default().fg(Color::DarkGray)), hint_area);
}

/// Footer text for the keys that do something on the given screen.
pub fn key_hints(screen: ScreenName, alert_open: bool) -> &'static str {
    match (screen, alert_open) {
        (ScreenName::Home, _) => "↑/↓ select  Enter open  Esc quit",
        (ScreenName::Nfc, _) => "t tap tag  b background tap  Esc back",
        (ScreenName::Qr, true) => "Enter OK",
        (ScreenName::Qr, false) => "s show code  Esc back",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_hardware;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_home() {
        let (nfc, scanner, app) = test_hardware();
        let mut tui = TuiState::new(nfc, scanner, vec![], vec![]);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Home"));
        assert!(text.contains("Go to NFC!"));
        assert!(text.contains("Esc quit"));
    }

    #[test]
    fn test_draw_qr_with_alert() {
        let (nfc, scanner, mut app) = test_hardware();
        let mut tui = TuiState::new(nfc, scanner, vec![], vec![]);
        update(&mut app, Action::Navigate(ScreenName::Qr));
        update(&mut app, Action::CodeRead("hello".to_string()));

        let text = draw(&app, &mut tui);
        assert!(text.contains("QR"));
        assert!(text.contains("hello"));
        assert!(text.contains("Enter OK"));
    }

    #[test]
    fn test_key_hints_per_screen() {
        assert!(key_hints(ScreenName::Nfc, false).contains("tap tag"));
        assert_eq!(key_hints(ScreenName::Qr, true), "Enter OK");
    }
}
