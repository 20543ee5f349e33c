use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Events the gallery input adapter can respond to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
    },
    /// Mouse button released.
    MouseReleased {
        button: MouseButton,
        position: Point,
    },
    /// Touch contact started.
    TouchStarted { position: Point },
    /// Touch contact lifted.
    TouchEnded { position: Point },
    /// Touch sequence aborted by the host (e.g. scroll took over).
    TouchCancelled,
    /// Keyboard key pressed.
    KeyPressed { key: Key, modifiers: Modifiers },
}

impl Event {
    /// Convenience constructor for an unmodified key press.
    pub fn key(key: Key) -> Self {
        Event::KeyPressed {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            other => MouseButton::Other(other.max(0) as u16),
        }
    }
}

/// Keyboard keys (the subset a gallery cares about plus printable characters).
///
/// Serialized as DOM `KeyboardEvent.key` names, so configuration files read
/// `"ArrowRight"` or `"j"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Space,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Look up a key by its DOM `KeyboardEvent.key` name.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            " " | "Space" | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// The DOM `KeyboardEvent.key` name for this key.
    pub fn dom_name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Space => "Space".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Up => "ArrowUp".to_string(),
            Key::Down => "ArrowDown".to_string(),
            Key::Left => "ArrowLeft".to_string(),
            Key::Right => "ArrowRight".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::PageUp => "PageUp".to_string(),
            Key::PageDown => "PageDown".to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dom_name())
    }
}

/// Error returned when a key name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key name: {0:?}")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_dom_name(s).ok_or_else(|| KeyParseError(s.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.dom_name()
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_names() {
        assert_eq!(Key::from_dom_name("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom_name(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_name("j"), Some(Key::Char('j')));
        assert_eq!(Key::from_dom_name("Shift"), None);
        assert_eq!(Key::Home.dom_name(), "Home");
    }

    #[test]
    fn test_key_serde_uses_dom_names() {
        let json = serde_json::to_string(&Key::Left).unwrap();
        assert_eq!(json, "\"ArrowLeft\"");

        let key: Key = serde_json::from_str("\"End\"").unwrap();
        assert_eq!(key, Key::End);

        assert!(serde_json::from_str::<Key>("\"NotAKey\"").is_err());
    }

    #[test]
    fn test_mouse_button_from_dom() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Right);
        assert_eq!(MouseButton::from_dom(4), MouseButton::Other(4));
    }
}
