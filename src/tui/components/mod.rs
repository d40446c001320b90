//! # TUI Components
//!
//! One component per screen plus the title bar.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: screen title, back marker and session status
//! - `NfcScreen`: the tag session's display message
//! - `QrScreen`: viewfinder and the detected-code alert
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `HomeScreen`: navigation buttons over a persistent `HomeMenuState`
//!
//! Components receive data as props rather than reaching into `App`, so each
//! one can be rendered against a `TestBackend` in isolation.

pub mod home;
pub mod nfc_screen;
pub mod qr_screen;
mod title_bar;

pub use home::{HomeEvent, HomeMenuState, HomeScreen};
pub use nfc_screen::NfcScreen;
pub use qr_screen::QrScreen;
pub use title_bar::TitleBar;
