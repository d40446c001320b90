use serde::{Deserialize, Serialize};

/// One NFC tag discovery as reported by the binding.
///
/// `id` is the hex-encoded tag identifier. Some tags report none at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TagEvent {
    pub id: Option<String>,
}

impl TagEvent {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    pub fn without_id() -> Self {
        Self { id: None }
    }

    /// The identifier, or `""` when the hardware reported none.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// Discovery channels a tag listener can be attached to.
///
/// Tags can arrive while the app is in the foreground or backgrounded; both
/// feed the same session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NfcEventKind {
    #[serde(rename = "discover_tag")]
    DiscoverTag,
    #[serde(rename = "discover_background_tag")]
    DiscoverBackgroundTag,
}

impl NfcEventKind {
    pub const ALL: [NfcEventKind; 2] = [NfcEventKind::DiscoverTag, NfcEventKind::DiscoverBackgroundTag];

    pub fn label(&self) -> &'static str {
        match self {
            NfcEventKind::DiscoverTag => "foreground",
            NfcEventKind::DiscoverBackgroundTag => "background",
        }
    }
}
