//! Keyboard input classification.

use serde::{Deserialize, Serialize};

/// Keys that never open the editor when pressed over a selected cell
const NON_INPUT_KEYS: &[&str] = &[
    "Unidentified",
    "Alt",
    "AltGraph",
    "CapsLock",
    "Control",
    "Fn",
    "FnLock",
    "Meta",
    "NumLock",
    "ScrollLock",
    "Shift",
    "Tab",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "End",
    "Home",
    "PageDown",
    "PageUp",
    "Insert",
    "ContextMenu",
    "Escape",
    "Pause",
    "Play",
    "PrintScreen",
    "F1",
    // F2 is left out so it can open the editor
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
];

/// Keys routed to navigation
const NAVIGATION_KEYS: &[&str] = &[
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "Tab",
    "Home",
    "End",
    "PageUp",
    "PageDown",
];

/// A key press as reported by the host, using DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyInput {
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    /// Ctrl or Cmd is held and the key itself is not Control.
    pub fn is_ctrl_held(&self) -> bool {
        (self.ctrl_key || self.meta_key) && self.key != "Control"
    }

    /// Printable or editing keys that should open the editor.
    pub fn is_default_input(&self) -> bool {
        !NON_INPUT_KEYS.contains(&self.key.as_str())
    }

    pub fn is_navigation(&self) -> bool {
        NAVIGATION_KEYS.contains(&self.key.as_str())
    }

    /// Ctrl/Cmd + `letter`, case-insensitive.
    pub fn is_shortcut(&self, letter: char) -> bool {
        self.is_ctrl_held()
            && self
                .key
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
            && self.key.chars().count() == 1
    }
}
