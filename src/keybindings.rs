//! Customizable keybindings for gallery navigation.
//!
//! Each action can be bound to several keys; the defaults follow the
//! thumbnail strip's roving-focus convention (Right/Down forward, Left/Up back).

use serde::{Deserialize, Serialize};
use thumbnav_ui::Key;

/// Something a key press can ask the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Prev,
    First,
    Last,
    /// Show the focused thumbnail
    Activate,
    /// Close the zoom overlay
    CloseZoom,
}

impl NavAction {
    /// Human readable name, used in conflict messages.
    pub fn name(&self) -> &'static str {
        match self {
            NavAction::Next => "Next image",
            NavAction::Prev => "Previous image",
            NavAction::First => "First image",
            NavAction::Last => "Last image",
            NavAction::Activate => "Show focused thumbnail",
            NavAction::CloseZoom => "Close zoom",
        }
    }

    /// All actions, in lookup priority order.
    pub fn all() -> &'static [NavAction] {
        &[
            NavAction::CloseZoom,
            NavAction::Activate,
            NavAction::Next,
            NavAction::Prev,
            NavAction::First,
            NavAction::Last,
        ]
    }
}

/// Keybinding configuration for the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavKeyBindings {
    #[serde(default = "default_next")]
    pub next: Vec<Key>,
    #[serde(default = "default_prev")]
    pub prev: Vec<Key>,
    #[serde(default = "default_first")]
    pub first: Vec<Key>,
    #[serde(default = "default_last")]
    pub last: Vec<Key>,
    #[serde(default = "default_activate")]
    pub activate: Vec<Key>,
    #[serde(default = "default_close_zoom")]
    pub close_zoom: Vec<Key>,
}

fn default_next() -> Vec<Key> {
    vec![Key::Right, Key::Down]
}

fn default_prev() -> Vec<Key> {
    vec![Key::Left, Key::Up]
}

fn default_first() -> Vec<Key> {
    vec![Key::Home]
}

fn default_last() -> Vec<Key> {
    vec![Key::End]
}

fn default_activate() -> Vec<Key> {
    vec![Key::Enter, Key::Space]
}

fn default_close_zoom() -> Vec<Key> {
    vec![Key::Escape]
}

impl Default for NavKeyBindings {
    fn default() -> Self {
        Self {
            next: default_next(),
            prev: default_prev(),
            first: default_first(),
            last: default_last(),
            activate: default_activate(),
            close_zoom: default_close_zoom(),
        }
    }
}

impl NavKeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys bound to an action.
    pub fn keys_for(&self, action: NavAction) -> &[Key] {
        match action {
            NavAction::Next => &self.next,
            NavAction::Prev => &self.prev,
            NavAction::First => &self.first,
            NavAction::Last => &self.last,
            NavAction::Activate => &self.activate,
            NavAction::CloseZoom => &self.close_zoom,
        }
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<NavAction> {
        NavAction::all()
            .iter()
            .copied()
            .find(|action| self.keys_for(*action).contains(&key))
    }

    /// Keys bound to more than one action, with the actions sharing them.
    ///
    /// Only the first action in lookup order ever fires for such a key.
    pub fn conflicts(&self) -> Vec<(Key, NavAction, String)> {
        let mut found: Vec<(Key, NavAction, String)> = Vec::new();
        for &action in NavAction::all() {
            for &key in self.keys_for(action) {
                if found.iter().any(|(k, _, _)| *k == key) {
                    continue;
                }
                if let Some(other) = self.key_conflict(key, Some(action)) {
                    found.push((key, action, other));
                }
            }
        }
        found
    }

    /// Check if a key is already used by any binding other than `exclude`.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key, exclude: Option<NavAction>) -> Option<String> {
        NavAction::all()
            .iter()
            .copied()
            .filter(|action| Some(*action) != exclude)
            .find(|action| self.keys_for(*action).contains(&key))
            .map(|action| action.name().to_string())
    }
}
