//! # Tag Session
//!
//! Lifecycle of the NFC screen's listening session.
//!
//! ```text
//! Unstarted ──(Supported)──────────► Listening ──(unmount)──► Stopped
//!     │
//!     └──(Unsupported / CheckFailed)──► Idle(message) ──(unmount)──► Idle
//! ```
//!
//! Mounting is split in three so the UI loop never blocks on the probe:
//! [`TagSessionController::begin_mount`] hands out a [`MountToken`], the
//! caller runs [`probe_and_start`] wherever it likes, and the result comes
//! back through [`TagSessionController::on_support_probed`]. A result whose
//! token no longer matches (screen left or remounted meanwhile) is dropped
//! without subscribing.
//!
//! Both discovery channels feed one receiver, so foreground and background
//! tags fold through the same code in arrival order.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use uuid::Uuid;

use crate::core::encoding::hex_to_base64;
use crate::hardware::{NfcEventKind, NfcProvider, TagEvent};

pub const NOT_SUPPORTED_MESSAGE: &str = "NFC is not supported";

/// Result of the NFC availability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportStatus {
    Supported,
    Unsupported,
    CheckFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSessionPhase {
    Unstarted,
    Listening,
    /// Support check came back negative or failed; nothing is subscribed.
    Idle,
    Stopped,
}

/// Identifies one mount of a tag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountToken(Uuid);

impl MountToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Probes support and, when supported, brings the NFC interface up.
///
/// A failing `start()` is reported as `CheckFailed` so the screen shows why.
pub async fn probe_and_start(provider: &dyn NfcProvider) -> SupportStatus {
    match provider.is_supported().await {
        Ok(true) => match provider.start().await {
            Ok(()) => SupportStatus::Supported,
            Err(e) => {
                warn!("{} failed to start: {}", provider.name(), e);
                SupportStatus::CheckFailed(e.to_string())
            }
        },
        Ok(false) => SupportStatus::Unsupported,
        Err(e) => {
            warn!("{} support probe failed: {}", provider.name(), e);
            SupportStatus::CheckFailed(e.to_string())
        }
    }
}

/// `"ID: <id>\nBase64: <base64>"`, with an absent id rendered as empty.
pub fn format_tag_message(event: &TagEvent) -> String {
    let id = event.id_or_empty();
    format!("ID: {}\nBase64: {}", id, hex_to_base64(id))
}

pub fn check_failed_message(reason: &str) -> String {
    format!("NFC support check failed: {reason}")
}

pub struct TagSessionController {
    provider: Arc<dyn NfcProvider>,
    phase: TagSessionPhase,
    message: String,
    support: Option<SupportStatus>,
    token: MountToken,
    mounted: bool,
    events: Option<UnboundedReceiver<TagEvent>>,
}

impl TagSessionController {
    pub fn new(provider: Arc<dyn NfcProvider>) -> Self {
        Self {
            provider,
            phase: TagSessionPhase::Unstarted,
            message: String::new(),
            support: None,
            token: MountToken::new(),
            mounted: false,
            events: None,
        }
    }

    pub fn phase(&self) -> TagSessionPhase {
        self.phase
    }

    /// The text the NFC screen shows.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Probe result for the current mount, once it has arrived.
    pub fn support(&self) -> Option<&SupportStatus> {
        self.support.as_ref()
    }

    pub fn token(&self) -> MountToken {
        self.token
    }

    /// Mounts and runs the probe inline. Convenience for async callers.
    pub async fn on_mount(&mut self) -> SupportStatus {
        let token = self.begin_mount();
        let status = probe_and_start(self.provider.as_ref()).await;
        self.on_support_probed(token, status.clone());
        status
    }

    /// Resets to a clean `Unstarted` session and returns the token the probe
    /// result must carry.
    pub fn begin_mount(&mut self) -> MountToken {
        if self.mounted {
            self.on_unmount();
        }
        self.token = MountToken::new();
        self.phase = TagSessionPhase::Unstarted;
        self.message.clear();
        self.support = None;
        self.mounted = true;
        info!("Tag session mounted on {}", self.provider.name());
        self.token
    }

    /// Applies a probe result. Returns `false` if it was stale and ignored.
    pub fn on_support_probed(&mut self, token: MountToken, status: SupportStatus) -> bool {
        if !self.mounted || token != self.token || self.phase != TagSessionPhase::Unstarted {
            debug!("Ignoring stale support probe result: {:?}", status);
            return false;
        }

        match &status {
            SupportStatus::Supported => self.subscribe(),
            SupportStatus::Unsupported => {
                info!("NFC not supported, staying idle");
                self.message = NOT_SUPPORTED_MESSAGE.to_string();
                self.phase = TagSessionPhase::Idle;
            }
            SupportStatus::CheckFailed(reason) => {
                self.message = check_failed_message(reason);
                self.phase = TagSessionPhase::Idle;
            }
        }
        self.support = Some(status);
        true
    }

    fn subscribe(&mut self) {
        if let Err(e) = self.provider.register_tag_event() {
            warn!("Tag event registration failed: {}", e);
            self.message = check_failed_message(&e.to_string());
            self.phase = TagSessionPhase::Idle;
            return;
        }

        let (tx, rx) = unbounded_channel();
        for kind in NfcEventKind::ALL {
            self.provider.set_event_listener(kind, Some(tx.clone()));
        }
        self.events = Some(rx);
        self.phase = TagSessionPhase::Listening;
        info!("Listening for tags on foreground and background channels");
    }

    /// Folds one discovery into the display message (last write wins).
    /// Returns `false` when the session is not listening.
    pub fn on_tag_discovered(&mut self, event: TagEvent) -> bool {
        if self.phase != TagSessionPhase::Listening {
            debug!("Tag event outside a listening session ignored");
            return false;
        }
        debug!("Tag discovered: {:?}", event.id);
        self.message = format_tag_message(&event);
        true
    }

    /// Takes every queued tag event without folding it.
    pub fn take_events(&mut self) -> Vec<TagEvent> {
        let mut pending = Vec::new();
        if let Some(events) = self.events.as_mut() {
            while let Ok(event) = events.try_recv() {
                pending.push(event);
            }
        }
        pending
    }

    /// Folds every queued tag event. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        for event in self.take_events() {
            if self.on_tag_discovered(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next tag event and folds it. Returns `false` once the
    /// session is not subscribed.
    pub async fn recv_event(&mut self) -> bool {
        let event = match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => None,
        };
        match event {
            Some(event) => self.on_tag_discovered(event),
            None => false,
        }
    }

    /// Tears the session down. Unregisters unconditionally and clears both
    /// listeners; queued events are discarded with the receiver.
    pub fn on_unmount(&mut self) {
        if let Err(e) = self.provider.unregister_tag_event() {
            warn!("Failed to unregister tag events: {}", e);
        }
        for kind in NfcEventKind::ALL {
            self.provider.set_event_listener(kind, None);
        }
        self.events = None;
        self.mounted = false;
        // Invalidate any probe still in flight
        self.token = MountToken::new();
        if self.phase != TagSessionPhase::Idle {
            self.phase = TagSessionPhase::Stopped;
        }
        info!("Tag session unmounted");
    }
}

impl Drop for TagSessionController {
    fn drop(&mut self) {
        if self.mounted {
            self.on_unmount();
        }
    }
}
