//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values and runs the
//! effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration:
//!
//! 1. Dispatches hardware events queued on the session channels (`App::pump_hardware`).
//! 2. Redraws if anything changed.
//! 3. Polls the terminal (100ms) and drains every pending key before the next draw.
//! 4. Applies actions sent back by background tasks (support probes).
//!
//! The demo hardware is simulated: keys on the NFC and QR screens push tags
//! and codes through the same bindings a real device would use.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::router::ScreenName;
use crate::core::state::App;
use crate::core::tag_session::{MountToken, probe_and_start};
use crate::hardware::{NfcEventKind, NfcProvider, SimulatedNfc, SimulatedScanner, TagEvent};
use crate::tui::component::EventHandler;
use crate::tui::components::{HomeEvent, HomeMenuState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Keyboard-driven stand-in for tags and codes in front of the device.
pub struct SimulatorControls {
    nfc: Arc<SimulatedNfc>,
    scanner: Arc<SimulatedScanner>,
    tags: Vec<String>,
    codes: Vec<String>,
    next_tag: usize,
    next_code: usize,
}

impl SimulatorControls {
    pub fn new(
        nfc: Arc<SimulatedNfc>,
        scanner: Arc<SimulatedScanner>,
        tags: Vec<String>,
        codes: Vec<String>,
    ) -> Self {
        Self {
            nfc,
            scanner,
            tags,
            codes,
            next_tag: 0,
            next_code: 0,
        }
    }

    /// Taps the next sample tag on the given channel. Returns a note for the footer.
    pub fn tap_next(&mut self, kind: NfcEventKind) -> String {
        let event = match self.tags.get(self.next_tag % self.tags.len().max(1)) {
            Some(id) => TagEvent::new(id.clone()),
            None => TagEvent::without_id(),
        };
        self.next_tag += 1;
        let label = event.id.clone().unwrap_or_else(|| "<no id>".to_string());
        if self.nfc.tap(kind, event) {
            format!("tapped {} ({})", label, kind.label())
        } else {
            format!("tag {} ignored: reader not listening", label)
        }
    }

    /// Holds the next sample code in front of the camera.
    pub fn present_next(&mut self) -> String {
        let Some(code) = self.codes.get(self.next_code % self.codes.len().max(1)).cloned() else {
            return "no sample codes configured".to_string();
        };
        self.next_code += 1;
        if self.scanner.present(code.clone()) {
            format!("showed {}", code)
        } else {
            "camera paused".to_string()
        }
    }
}

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub home: HomeMenuState,
    pub simulator: SimulatorControls,
    /// Outcome of the last simulated tap or scan, shown in the footer.
    pub simulator_note: Option<String>,
}

impl TuiState {
    pub fn new(
        nfc: Arc<SimulatedNfc>,
        scanner: Arc<SimulatedScanner>,
        tags: Vec<String>,
        codes: Vec<String>,
    ) -> Self {
        Self {
            home: HomeMenuState::default(),
            simulator: SimulatorControls::new(nfc, scanner, tags, codes),
            simulator_note: None,
        }
    }
}

struct CursorGuard;

impl CursorGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Build the simulated bindings described by the resolved config.
pub fn build_hardware(config: &ResolvedConfig) -> (Arc<SimulatedNfc>, Arc<SimulatedScanner>) {
    let mut nfc = SimulatedNfc::new(config.nfc_support.clone())
        .with_failure_reason(config.failure_reason.clone())
        .with_probe_delay(Duration::from_millis(config.probe_delay_ms));
    if let Some(reason) = &config.fail_start {
        nfc = nfc.with_start_failure(reason.clone());
    }
    (Arc::new(nfc), Arc::new(SimulatedScanner::new()))
}

/// Map a terminal event on the current screen to a core action. Simulator
/// keys act on the hardware directly and produce no action; their events
/// come back through the session channels.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let screen = app.router.current();

    // The code alert is modal: only its action (or leaving) gets through
    let alert_open = app
        .scan_session
        .as_ref()
        .is_some_and(|s| s.alert().is_some());
    if screen == ScreenName::Qr && alert_open {
        return match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::Acknowledge),
            TuiEvent::Escape => Some(Action::Back),
            _ => None,
        };
    }

    if matches!(event, TuiEvent::Escape) {
        return Some(Action::Back);
    }

    match screen {
        ScreenName::Home => tui.home.handle_event(event).map(|e| match e {
            HomeEvent::Open(target) => Action::Navigate(target),
        }),
        ScreenName::Nfc => {
            let kind = match event {
                TuiEvent::InputChar('t') => NfcEventKind::DiscoverTag,
                TuiEvent::InputChar('b') => NfcEventKind::DiscoverBackgroundTag,
                _ => return None,
            };
            tui.simulator_note = Some(tui.simulator.tap_next(kind));
            None
        }
        ScreenName::Qr => {
            if matches!(event, TuiEvent::InputChar('s')) {
                tui.simulator_note = Some(tui.simulator.present_next());
            }
            None
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (nfc, scanner) = build_hardware(&config);
    let mut app = App::new(nfc.clone(), scanner.clone(), config.routes.clone());
    let mut tui = TuiState::new(nfc, scanner, config.sample_tags.clone(), config.sample_codes.clone());

    let mut terminal = ratatui::init();
    let _cursor_guard = CursorGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // In-flight support probe, aborted when the NFC screen goes away
    let mut probe_handle: Option<tokio::task::AbortHandle> = None;

    let mut needs_redraw = true; // Force first frame

    loop {
        for action in app.pump_hardware() {
            needs_redraw = true;
            dispatch(&mut app, action, &tx, &mut probe_handle);
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(100));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                break;
            }
            if let Some(action) = handle_event(&app, &mut tui, &event)
                && dispatch(&mut app, action, &tx, &mut probe_handle)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (probe results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, action, &tx, &mut probe_handle);
        }
    }

    if let Some(handle) = probe_handle.take() {
        handle.abort();
    }
    app.shutdown();

    ratatui::restore();
    info!("Tagscan shut down");
    Ok(())
}

/// Apply an action and run its effect. Returns `true` when the app should quit.
fn dispatch(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<Action>,
    probe_handle: &mut Option<tokio::task::AbortHandle>,
) -> bool {
    let effect = update(app, action);

    if app.tag_session.is_none()
        && let Some(handle) = probe_handle.take()
    {
        debug!("Aborting support probe for unmounted screen");
        handle.abort();
    }

    match effect {
        Effect::Quit => true,
        Effect::ProbeSupport(token) => {
            if let Some(old) = probe_handle.replace(spawn_probe(app.nfc.clone(), token, tx.clone())) {
                old.abort();
            }
            false
        }
        Effect::None => false,
    }
}

fn spawn_probe(
    nfc: Arc<dyn NfcProvider>,
    token: MountToken,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning support probe on {}", nfc.name());
    let handle = tokio::spawn(async move {
        let status = probe_and_start(nfc.as_ref()).await;
        if tx.send(Action::SupportProbed { token, status }).is_err() {
            warn!("Failed to send probe result: receiver dropped");
        }
    });
    handle.abort_handle()
}
