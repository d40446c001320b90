//! # Screen Router
//!
//! A static table of screens with their display options, plus a stack of
//! what is currently mounted. Navigation intents are forwarded without
//! checks; the router only reports which screens were mounted or unmounted
//! so the caller can start and stop sessions.
//!
//! Stack semantics: navigating to a screen already on the stack pops back to
//! it, anything else is pushed. Screens underneath the top stay mounted.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    Home,
    Nfc,
    Qr,
}

impl ScreenName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenName::Home => "Home",
            ScreenName::Nfc => "Nfc",
            ScreenName::Qr => "Qr",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOptions {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: ScreenName,
    pub options: ScreenOptions,
}

impl Route {
    pub fn new(name: ScreenName, title: impl Into<String>) -> Self {
        Self {
            name,
            options: ScreenOptions { title: title.into() },
        }
    }
}

/// Mount changes caused by one navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Screens removed from the stack, top first.
    pub unmounted: Vec<ScreenName>,
    pub mounted: Option<ScreenName>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.unmounted.is_empty() && self.mounted.is_none()
    }
}

pub struct Router {
    routes: Vec<Route>,
    stack: Vec<ScreenName>,
}

/// `Home`, `NFC` and `QR`, with `Home` first.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new(ScreenName::Home, "Home"),
        Route::new(ScreenName::Nfc, "NFC"),
        Route::new(ScreenName::Qr, "QR"),
    ]
}

impl Router {
    /// The first route is the initial screen. An empty table falls back to
    /// [`default_routes`].
    pub fn new(routes: Vec<Route>) -> Self {
        let routes = if routes.is_empty() { default_routes() } else { routes };
        let stack = vec![routes[0].name];
        Self { routes, stack }
    }

    pub fn current(&self) -> ScreenName {
        // The stack never empties: back() refuses to pop the root
        self.stack.last().copied().unwrap_or(self.routes[0].name)
    }

    pub fn stack(&self) -> &[ScreenName] {
        &self.stack
    }

    pub fn options(&self, name: ScreenName) -> Option<&ScreenOptions> {
        self.routes.iter().find(|r| r.name == name).map(|r| &r.options)
    }

    /// Title of the screen on top, falling back to its name.
    pub fn title(&self) -> &str {
        let current = self.current();
        self.options(current)
            .map(|o| o.title.as_str())
            .unwrap_or(current.as_str())
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn navigate(&mut self, name: ScreenName) -> Transition {
        if self.current() == name {
            return Transition::default();
        }

        let mut transition = Transition::default();
        if let Some(pos) = self.stack.iter().position(|s| *s == name) {
            while self.stack.len() > pos + 1 {
                if let Some(popped) = self.stack.pop() {
                    transition.unmounted.push(popped);
                }
            }
        } else {
            self.stack.push(name);
            transition.mounted = Some(name);
        }
        debug!("Navigated to {}: {:?}", name.as_str(), transition);
        transition
    }

    /// Pops the top screen. `None` at the root.
    pub fn back(&mut self) -> Option<Transition> {
        if !self.can_go_back() {
            return None;
        }
        let popped = self.stack.pop()?;
        Some(Transition {
            unmounted: vec![popped],
            mounted: None,
        })
    }

    /// Empties the stack top-down for shutdown, leaving only the root.
    pub fn unmount_all(&mut self) -> Vec<ScreenName> {
        let unmounted = self.stack.drain(..).rev().collect();
        self.stack.push(self.routes[0].name);
        unmounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles() {
        let router = Router::new(default_routes());
        assert_eq!(router.current(), ScreenName::Home);
        assert_eq!(router.title(), "Home");
        assert_eq!(router.options(ScreenName::Nfc).unwrap().title, "NFC");
        assert_eq!(router.options(ScreenName::Qr).unwrap().title, "QR");
    }

    #[test]
    fn test_navigate_pushes_and_mounts() {
        let mut router = Router::new(default_routes());
        let transition = router.navigate(ScreenName::Nfc);
        assert_eq!(transition.mounted, Some(ScreenName::Nfc));
        assert!(transition.unmounted.is_empty());
        assert_eq!(router.title(), "NFC");
        assert!(router.can_go_back());
    }

    #[test]
    fn test_navigate_to_current_is_noop() {
        let mut router = Router::new(default_routes());
        assert!(router.navigate(ScreenName::Home).is_empty());
    }

    #[test]
    fn test_navigate_to_screen_below_pops() {
        let mut router = Router::new(default_routes());
        router.navigate(ScreenName::Nfc);
        router.navigate(ScreenName::Qr);
        assert_eq!(router.stack(), &[ScreenName::Home, ScreenName::Nfc, ScreenName::Qr]);

        let transition = router.navigate(ScreenName::Home);
        assert_eq!(transition.unmounted, vec![ScreenName::Qr, ScreenName::Nfc]);
        assert_eq!(transition.mounted, None);
        assert_eq!(router.current(), ScreenName::Home);
    }

    #[test]
    fn test_back_at_root_is_none() {
        let mut router = Router::new(default_routes());
        assert!(router.back().is_none());

        router.navigate(ScreenName::Qr);
        let transition = router.back().unwrap();
        assert_eq!(transition.unmounted, vec![ScreenName::Qr]);
        assert_eq!(router.current(), ScreenName::Home);
    }

    #[test]
    fn test_custom_titles() {
        let router = Router::new(vec![
            Route::new(ScreenName::Home, "Start"),
            Route::new(ScreenName::Nfc, "Tags"),
        ]);
        assert_eq!(router.title(), "Start");
        assert!(router.options(ScreenName::Qr).is_none());
    }

    #[test]
    fn test_unmount_all_reports_top_first() {
        let mut router = Router::new(default_routes());
        router.navigate(ScreenName::Nfc);
        router.navigate(ScreenName::Qr);
        assert_eq!(
            router.unmount_all(),
            vec![ScreenName::Qr, ScreenName::Nfc, ScreenName::Home]
        );
        assert_eq!(router.current(), ScreenName::Home);
    }
}
