//! # Actions
//!
//! Everything that can happen in Tagscan becomes an `Action`.
//! User picks "Go to NFC!"? That's `Action::Navigate(ScreenName::Nfc)`.
//! Support probe finishes? That's `Action::SupportProbed { .. }`.
//!
//! `update()` applies an action to the state and returns an [`Effect`]
//! describing any I/O the shell has to perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::router::{ScreenName, Transition};
use crate::core::state::App;
use crate::core::tag_session::{MountToken, SupportStatus, TagSessionPhase};
use crate::hardware::TagEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(ScreenName),
    Back,
    SupportProbed { token: MountToken, status: SupportStatus },
    TagDiscovered(TagEvent),
    CodeRead(String),
    Acknowledge,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Run the support probe for this mount and report back with
    /// `Action::SupportProbed`.
    ProbeSupport(MountToken),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(screen) => {
            let transition = app.router.navigate(screen);
            apply_transition(app, transition)
        }
        Action::Back => match app.router.back() {
            Some(transition) => apply_transition(app, transition),
            None => Effect::Quit,
        },
        Action::SupportProbed { token, status } => {
            if let Some(session) = app.tag_session.as_mut()
                && session.on_support_probed(token, status)
            {
                app.status_message = match session.phase() {
                    TagSessionPhase::Listening => "Listening for tags".to_string(),
                    _ => String::new(),
                };
            }
            Effect::None
        }
        Action::TagDiscovered(event) => {
            if let Some(session) = app.tag_session.as_mut() {
                session.on_tag_discovered(event);
            }
            Effect::None
        }
        Action::CodeRead(payload) => {
            if let Some(session) = app.scan_session.as_mut()
                && session.on_code_read(payload)
            {
                app.status_message = "Paused".to_string();
            }
            Effect::None
        }
        Action::Acknowledge => {
            if let Some(session) = app.scan_session.as_mut()
                && session.on_acknowledge()
            {
                app.status_message = "Scanning".to_string();
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn apply_transition(app: &mut App, transition: Transition) -> Effect {
    for screen in transition.unmounted {
        app.unmount(screen);
    }
    match transition.mounted.and_then(|screen| app.mount(screen)) {
        Some(token) => Effect::ProbeSupport(token),
        None => Effect::None,
    }
}
