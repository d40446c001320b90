//! # Hardware Bindings
//!
//! Narrow interfaces over the two capability providers the screens consume:
//! an NFC subsystem that pushes tag-discovery events and a camera that pushes
//! decoded QR payloads. Controllers only ever see `Arc<dyn NfcProvider>` and
//! `Arc<dyn CodeScanner>`, so tests and the demo binary can plug in the
//! simulated bindings from [`providers`].

pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CodeScanner, HardwareError, NfcProvider};
pub use providers::{SimulatedNfc, SimulatedNfcStats, SimulatedScanner};
pub use types::{NfcEventKind, TagEvent};
