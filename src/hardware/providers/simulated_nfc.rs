//! In-process NFC binding.
//!
//! Behaves like a real radio as far as the session controller can tell:
//! the support probe is asynchronous (optionally delayed), `start()` must
//! precede registration, and tags are only delivered while registered and
//! while a listener is installed for the channel they arrive on. Every call is
//! counted so tests can assert on subscribe/unsubscribe traffic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::NfcSupport;
use crate::hardware::{HardwareError, NfcEventKind, NfcProvider, TagEvent};

/// Call counters kept by [`SimulatedNfc`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatedNfcStats {
    pub probe_calls: usize,
    pub start_calls: usize,
    pub register_calls: usize,
    pub unregister_calls: usize,
    /// Tags that reached a listener.
    pub delivered: usize,
}

#[derive(Default)]
struct NfcState {
    started: bool,
    registered: bool,
    listeners: HashMap<NfcEventKind, UnboundedSender<TagEvent>>,
    stats: SimulatedNfcStats,
}

pub struct SimulatedNfc {
    support: NfcSupport,
    failure_reason: String,
    start_failure: Option<String>,
    probe_delay: Duration,
    state: Mutex<NfcState>,
}

impl SimulatedNfc {
    pub fn new(support: NfcSupport) -> Self {
        Self {
            support,
            failure_reason: "NFC service did not respond".to_string(),
            start_failure: None,
            probe_delay: Duration::ZERO,
            state: Mutex::new(NfcState::default()),
        }
    }

    /// Reason reported when the probe is configured to fail.
    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = reason.into();
        self
    }

    /// Makes `start()` reject with the given reason.
    pub fn with_start_failure(mut self, reason: impl Into<String>) -> Self {
        self.start_failure = Some(reason.into());
        self
    }

    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    fn state(&self) -> MutexGuard<'_, NfcState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn stats(&self) -> SimulatedNfcStats {
        self.state().stats.clone()
    }

    pub fn is_registered(&self) -> bool {
        self.state().registered
    }

    pub fn has_listener(&self, kind: NfcEventKind) -> bool {
        self.state().listeners.contains_key(&kind)
    }

    /// Simulates a tag entering the field on the given channel.
    ///
    /// Returns `true` if the event reached a listener.
    pub fn tap(&self, kind: NfcEventKind, event: TagEvent) -> bool {
        let mut state = self.state();
        if !state.started || !state.registered {
            debug!("Tag ignored on {} channel: not registered", kind.label());
            return false;
        }
        let Some(listener) = state.listeners.get(&kind) else {
            debug!("Tag ignored on {} channel: no listener", kind.label());
            return false;
        };
        if listener.send(event).is_err() {
            warn!("Dropping closed {} tag listener", kind.label());
            state.listeners.remove(&kind);
            return false;
        }
        state.stats.delivered += 1;
        true
    }
}

#[async_trait]
impl NfcProvider for SimulatedNfc {
    fn name(&self) -> &str {
        "simulated-nfc"
    }

    async fn is_supported(&self) -> Result<bool, HardwareError> {
        self.state().stats.probe_calls += 1;
        if !self.probe_delay.is_zero() {
            tokio::time::sleep(self.probe_delay).await;
        }
        match self.support {
            NfcSupport::Supported => Ok(true),
            NfcSupport::Unsupported => Ok(false),
            NfcSupport::Failing => Err(HardwareError::Unavailable(self.failure_reason.clone())),
        }
    }

    async fn start(&self) -> Result<(), HardwareError> {
        let mut state = self.state();
        state.stats.start_calls += 1;
        if let Some(reason) = &self.start_failure {
            return Err(HardwareError::Rejected(reason.clone()));
        }
        state.started = true;
        info!("Simulated NFC started");
        Ok(())
    }

    fn register_tag_event(&self) -> Result<(), HardwareError> {
        let mut state = self.state();
        if !state.started {
            return Err(HardwareError::NotStarted);
        }
        state.stats.register_calls += 1;
        state.registered = true;
        Ok(())
    }

    fn unregister_tag_event(&self) -> Result<(), HardwareError> {
        let mut state = self.state();
        state.stats.unregister_calls += 1;
        state.registered = false;
        Ok(())
    }

    fn set_event_listener(&self, kind: NfcEventKind, listener: Option<UnboundedSender<TagEvent>>) {
        let mut state = self.state();
        match listener {
            Some(sender) => {
                state.listeners.insert(kind, sender);
            }
            None => {
                state.listeners.remove(&kind);
            }
        }
    }
}
