pub mod simulated_nfc;
pub mod simulated_scanner;

pub use simulated_nfc::{SimulatedNfc, SimulatedNfcStats};
pub use simulated_scanner::SimulatedScanner;
