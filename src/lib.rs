//! Tagscan library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod hardware;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the simulated NFC binding answers the support probe.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NfcSupport {
    #[default]
    Supported,
    Unsupported,
    /// The probe itself rejects.
    Failing,
}

impl NfcSupport {
    pub fn as_str(&self) -> &'static str {
        match self {
            NfcSupport::Supported => "supported",
            NfcSupport::Unsupported => "unsupported",
            NfcSupport::Failing => "failing",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "supported" => Some(NfcSupport::Supported),
            "unsupported" => Some(NfcSupport::Unsupported),
            "failing" => Some(NfcSupport::Failing),
            _ => None,
        }
    }
}
