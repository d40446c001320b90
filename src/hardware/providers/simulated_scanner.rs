//! In-process camera/QR binding. One read per activation: after delivering a
//! payload the viewfinder stays paused until `reactivate()`.

use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::hardware::CodeScanner;

#[derive(Default)]
struct ScannerState {
    listener: Option<UnboundedSender<String>>,
    active: bool,
    reactivate_calls: usize,
    delivered: usize,
}

#[derive(Default)]
pub struct SimulatedScanner {
    state: Mutex<ScannerState>,
}

impl SimulatedScanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScannerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_active(&self) -> bool {
        self.state().active
    }

    pub fn has_listener(&self) -> bool {
        self.state().listener.is_some()
    }

    pub fn reactivate_calls(&self) -> usize {
        self.state().reactivate_calls
    }

    pub fn delivered(&self) -> usize {
        self.state().delivered
    }

    /// Simulates a QR code held in frame. Returns `true` if it was decoded
    /// and delivered.
    pub fn present(&self, payload: impl Into<String>) -> bool {
        let mut state = self.state();
        if !state.active {
            debug!("Code ignored: scanner paused");
            return false;
        }
        let Some(listener) = state.listener.as_ref() else {
            debug!("Code ignored: no read listener");
            return false;
        };
        if listener.send(payload.into()).is_err() {
            warn!("Dropping closed read listener");
            state.listener = None;
            state.active = false;
            return false;
        }
        state.delivered += 1;
        state.active = false;
        true
    }
}

impl CodeScanner for SimulatedScanner {
    fn name(&self) -> &str {
        "simulated-camera"
    }

    fn set_read_listener(&self, listener: Option<UnboundedSender<String>>) {
        let mut state = self.state();
        // A fresh viewfinder starts live
        state.active = listener.is_some();
        state.listener = listener;
    }

    fn reactivate(&self) {
        let mut state = self.state();
        state.reactivate_calls += 1;
        state.active = state.listener.is_some();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_pauses_after_one_read() {
        let scanner = SimulatedScanner::new();
        let (tx, mut rx) = unbounded_channel();
        scanner.set_read_listener(Some(tx));

        assert!(scanner.present("first"));
        assert!(!scanner.present("second"));
        assert_eq!(rx.try_recv().unwrap(), "first");
        assert!(rx.try_recv().is_err());

        scanner.reactivate();
        assert!(scanner.present("third"));
        assert_eq!(rx.try_recv().unwrap(), "third");
        assert_eq!(scanner.reactivate_calls(), 1);
        assert_eq!(scanner.delivered(), 2);
    }

    #[test]
    fn test_no_listener_means_inactive() {
        let scanner = SimulatedScanner::new();
        assert!(!scanner.is_active());
        assert!(!scanner.present("nobody home"));
    }

    #[test]
    fn test_closed_listener_is_dropped() {
        let scanner = SimulatedScanner::new();
        let (tx, rx) = unbounded_channel();
        scanner.set_read_listener(Some(tx));
        drop(rx);

        assert!(!scanner.present("lost"));
        assert!(!scanner.has_listener());
    }
}
