//! # Application State
//!
//! Core state for Tagscan. No TUI types here; presentation state lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── nfc: Arc<dyn NfcProvider>              // shared NFC binding
//! ├── scanner: Arc<dyn CodeScanner>          // shared camera binding
//! ├── router: Router                         // screen table + stack
//! ├── tag_session: Option<TagSessionController>   // Some while NFC is mounted
//! ├── scan_session: Option<ScanSessionController> // Some while QR is mounted
//! └── status_message: String                 // title bar text
//! ```
//!
//! Screen-local sessions are created when their screen mounts and dropped
//! when it unmounts, so re-entering a screen always starts clean.

use std::sync::Arc;

use log::info;

use crate::core::action::Action;
use crate::core::router::{Route, Router, ScreenName};
use crate::core::scan_session::ScanSessionController;
use crate::core::tag_session::{MountToken, TagSessionController};
use crate::hardware::{CodeScanner, NfcProvider};

pub struct App {
    pub nfc: Arc<dyn NfcProvider>,
    pub scanner: Arc<dyn CodeScanner>,
    pub router: Router,
    pub tag_session: Option<TagSessionController>,
    pub scan_session: Option<ScanSessionController>,
    pub status_message: String,
}

impl App {
    pub fn new(nfc: Arc<dyn NfcProvider>, scanner: Arc<dyn CodeScanner>, routes: Vec<Route>) -> Self {
        Self {
            nfc,
            scanner,
            router: Router::new(routes),
            tag_session: None,
            scan_session: None,
            status_message: String::new(),
        }
    }

    /// Creates the session for a newly mounted screen. Returns the mount
    /// token when a support probe has to run.
    pub fn mount(&mut self, screen: ScreenName) -> Option<MountToken> {
        info!("Mounting {} screen", screen.as_str());
        match screen {
            ScreenName::Home => None,
            ScreenName::Nfc => {
                let mut session = TagSessionController::new(self.nfc.clone());
                let token = session.begin_mount();
                // Replacing an old session drops it, which tears it down
                self.tag_session = Some(session);
                self.status_message = "Checking NFC support...".to_string();
                Some(token)
            }
            ScreenName::Qr => {
                self.scan_session = Some(ScanSessionController::new(self.scanner.clone()));
                self.status_message = "Scanning".to_string();
                None
            }
        }
    }

    pub fn unmount(&mut self, screen: ScreenName) {
        info!("Unmounting {} screen", screen.as_str());
        match screen {
            ScreenName::Home => {}
            ScreenName::Nfc => {
                if let Some(mut session) = self.tag_session.take() {
                    session.on_unmount();
                }
            }
            ScreenName::Qr => {
                // Abandoned, not torn down
                self.scan_session = None;
            }
        }
        self.status_message.clear();
    }

    /// Collects hardware events queued since the last call as actions, in
    /// arrival order per session. The caller folds them through `update()`.
    pub fn pump_hardware(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(session) = self.tag_session.as_mut() {
            actions.extend(session.take_events().into_iter().map(Action::TagDiscovered));
        }
        if let Some(session) = self.scan_session.as_mut() {
            actions.extend(session.take_reads().into_iter().map(Action::CodeRead));
        }
        actions
    }

    /// Unmounts every screen on the stack, top first.
    pub fn shutdown(&mut self) {
        for screen in self.router.unmount_all() {
            self.unmount(screen);
        }
    }
}
