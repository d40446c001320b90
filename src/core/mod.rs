//! # Core Application Logic
//!
//! Screen sessions, routing and state. Knows nothing about any specific UI
//! technology and only talks to hardware through the traits in
//! [`crate::hardware`].
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Tag / Scan sessions  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Hardware  │
//!     │  Adapter   │                          │  bindings  │
//!     │ (ratatui)  │                          │ (NFC, QR)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`tag_session`]: NFC listening session lifecycle
//! - [`scan_session`]: QR scan pause/resume cycle
//! - [`router`]: Screen table and navigation stack
//! - [`encoding`]: Hex → base64 for tag identifiers
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod encoding;
pub mod router;
pub mod scan_session;
pub mod state;
pub mod tag_session;
