use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::types::{NfcEventKind, TagEvent};

/// Errors a hardware binding can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareError {
    /// The capability is missing or switched off.
    Unavailable(String),
    /// The binding refused the request (permission denied, busy radio).
    Rejected(String),
    /// A session call was made before `start()` succeeded.
    NotStarted,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Unavailable(msg) => write!(f, "hardware unavailable: {msg}"),
            HardwareError::Rejected(msg) => write!(f, "request rejected: {msg}"),
            HardwareError::NotStarted => write!(f, "hardware not started"),
        }
    }
}

impl std::error::Error for HardwareError {}

/// Process-wide NFC binding.
///
/// Tag events are pushed, never polled: the binding sends every discovery to
/// the sender installed for the matching [`NfcEventKind`].
#[async_trait]
pub trait NfcProvider: Send + Sync {
    /// Returns the name of the binding.
    fn name(&self) -> &str;

    /// Support probe. `Err` means the probe itself failed.
    async fn is_supported(&self) -> Result<bool, HardwareError>;

    /// Brings up the NFC interface. Must succeed before registration.
    async fn start(&self) -> Result<(), HardwareError>;

    /// Asks the binding to begin delivering tag events.
    fn register_tag_event(&self) -> Result<(), HardwareError>;

    /// Stops tag delivery. Safe to call when nothing is registered.
    fn unregister_tag_event(&self) -> Result<(), HardwareError>;

    /// Installs (or with `None`, removes) the listener for one discovery channel.
    fn set_event_listener(&self, kind: NfcEventKind, listener: Option<UnboundedSender<TagEvent>>);
}

/// Camera viewfinder with QR decoding.
///
/// After each read the binding pauses itself until [`CodeScanner::reactivate`]
/// is called.
pub trait CodeScanner: Send + Sync {
    fn name(&self) -> &str;

    /// Installs (or with `None`, removes) the decoded-payload listener.
    fn set_read_listener(&self, listener: Option<UnboundedSender<String>>);

    /// Resumes scanning after a detection.
    fn reactivate(&self);
}
