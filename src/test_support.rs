//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::NfcSupport;
use crate::core::router::default_routes;
use crate::core::state::App;
use crate::hardware::{SimulatedNfc, SimulatedScanner};

/// Creates a test App backed by simulated hardware with NFC supported.
pub fn test_app() -> App {
    test_hardware().2
}

/// Like [`test_app`], but also hands back the concrete bindings so tests can
/// inject tags and codes and inspect call counts.
pub fn test_hardware() -> (Arc<SimulatedNfc>, Arc<SimulatedScanner>, App) {
    let nfc = Arc::new(SimulatedNfc::new(NfcSupport::Supported));
    let scanner = Arc::new(SimulatedScanner::new());
    let app = App::new(nfc.clone(), scanner.clone(), default_routes());
    (nfc, scanner, app)
}
