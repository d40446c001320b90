//! # Scan Session
//!
//! One detection at a time: a read pauses the session and raises an alert;
//! acknowledging it resumes the camera. The binding does not resume on its
//! own, so the same code sitting in frame is reported once, not continuously.
//!
//! ```text
//! Active ──(code read)──► Paused ──(acknowledge)──► Active
//! ```
//!
//! There is no teardown step. Leaving the screen drops the controller, which
//! drops the read receiver; the binding notices the closed channel on its next
//! read.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::hardware::CodeScanner;

pub const CODE_ALERT_TITLE: &str = "QR code";
pub const CODE_ALERT_ACTION: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Active,
    Paused,
}

/// Modal shown while the session is paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAlert {
    pub title: String,
    pub payload: String,
    pub action_label: String,
}

impl CodeAlert {
    fn for_payload(payload: String) -> Self {
        Self {
            title: CODE_ALERT_TITLE.to_string(),
            payload,
            action_label: CODE_ALERT_ACTION.to_string(),
        }
    }
}

pub struct ScanSessionController {
    scanner: Arc<dyn CodeScanner>,
    state: ScanState,
    alert: Option<CodeAlert>,
    reads: UnboundedReceiver<String>,
}

impl ScanSessionController {
    /// Mounts the session: attaches a read listener and starts `Active`.
    pub fn new(scanner: Arc<dyn CodeScanner>) -> Self {
        let (tx, reads) = unbounded_channel();
        scanner.set_read_listener(Some(tx));
        info!("Scan session mounted on {}", scanner.name());
        Self {
            scanner,
            state: ScanState::Active,
            alert: None,
            reads,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn alert(&self) -> Option<&CodeAlert> {
        self.alert.as_ref()
    }

    /// Pauses on a decoded payload. Reads arriving while paused are dropped.
    pub fn on_code_read(&mut self, payload: String) -> bool {
        if self.state == ScanState::Paused {
            debug!("Code read while paused ignored");
            return false;
        }
        debug!("Code read ({} bytes)", payload.len());
        self.state = ScanState::Paused;
        self.alert = Some(CodeAlert::for_payload(payload));
        true
    }

    /// Dismisses the alert and resumes the camera.
    pub fn on_acknowledge(&mut self) -> bool {
        if self.state == ScanState::Active {
            return false;
        }
        self.alert = None;
        self.state = ScanState::Active;
        self.scanner.reactivate();
        debug!("Scan session reactivated");
        true
    }

    /// Takes every queued read without folding it.
    pub fn take_reads(&mut self) -> Vec<String> {
        let mut pending = Vec::new();
        while let Ok(payload) = self.reads.try_recv() {
            pending.push(payload);
        }
        pending
    }

    /// Folds every queued read. Returns how many were applied.
    pub fn drain_reads(&mut self) -> usize {
        let mut applied = 0;
        for payload in self.take_reads() {
            if self.on_code_read(payload) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next read and folds it.
    pub async fn recv_read(&mut self) -> bool {
        match self.reads.recv().await {
            Some(payload) => self.on_code_read(payload),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::SimulatedScanner;

    fn session() -> (Arc<SimulatedScanner>, ScanSessionController) {
        let scanner = Arc::new(SimulatedScanner::new());
        let session = ScanSessionController::new(scanner.clone());
        (scanner, session)
    }

    #[test]
    fn test_starts_active_with_listener() {
        let (scanner, session) = session();
        assert_eq!(session.state(), ScanState::Active);
        assert!(session.alert().is_none());
        assert!(scanner.is_active());
    }

    #[test]
    fn test_read_pauses_with_verbatim_payload() {
        let (_scanner, mut session) = session();
        assert!(session.on_code_read("PAYLOAD".to_string()));
        assert_eq!(session.state(), ScanState::Paused);

        let alert = session.alert().unwrap();
        assert_eq!(alert.payload, "PAYLOAD");
        assert_eq!(alert.title, CODE_ALERT_TITLE);
        assert_eq!(alert.action_label, "OK");
    }

    #[test]
    fn test_acknowledge_reactivates_exactly_once() {
        let (scanner, mut session) = session();
        session.on_code_read("PAYLOAD".to_string());

        assert!(session.on_acknowledge());
        assert_eq!(session.state(), ScanState::Active);
        assert!(session.alert().is_none());
        assert_eq!(scanner.reactivate_calls(), 1);

        // Second acknowledge is a no-op
        assert!(!session.on_acknowledge());
        assert_eq!(scanner.reactivate_calls(), 1);
    }

    #[test]
    fn test_read_while_paused_keeps_first_payload() {
        let (_scanner, mut session) = session();
        session.on_code_read("first".to_string());
        assert!(!session.on_code_read("second".to_string()));
        assert_eq!(session.alert().unwrap().payload, "first");
    }

    #[test]
    fn test_drain_reads_from_binding() {
        let (scanner, mut session) = session();
        assert!(scanner.present("https://example.com"));
        assert_eq!(session.drain_reads(), 1);
        assert_eq!(session.alert().unwrap().payload, "https://example.com");

        // Binding stays paused until acknowledged
        assert!(!scanner.present("again"));
        session.on_acknowledge();
        assert!(scanner.present("again"));
        assert_eq!(session.drain_reads(), 1);
        assert_eq!(session.alert().unwrap().payload, "again");
    }

    #[tokio::test]
    async fn test_recv_read() {
        let (scanner, mut session) = session();
        scanner.present("async");
        assert!(session.recv_read().await);
        assert_eq!(session.state(), ScanState::Paused);
    }

    #[test]
    fn test_abandoned_session_closes_channel() {
        let (scanner, session) = session();
        drop(session);
        assert!(!scanner.present("nobody"));
        assert!(!scanner.has_listener());
    }
}
