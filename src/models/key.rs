//! Keystrokes delivered by the host surface.

/// A raw key event: the logical key name plus modifier flags.
///
/// `key` follows the DOM `KeyboardEvent.key` naming (`"a"`, `"Enter"`,
/// `"ArrowUp"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// What a key means to the line editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Submit,
    Erase,
    HistoryPrevious,
    HistoryNext,
    Interrupt,
    Ignored,
}

impl KeyEvent {
    /// A plain key press without modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// A key pressed together with Ctrl.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
            ..Default::default()
        }
    }

    /// Classify the event.
    ///
    /// Printable means a single character with no Ctrl/Alt/Meta held; Shift
    /// is already folded into `key`.
    pub fn action(&self) -> KeyAction {
        match self.key.as_str() {
            "Enter" => KeyAction::Submit,
            "Backspace" => KeyAction::Erase,
            "ArrowUp" => KeyAction::HistoryPrevious,
            "ArrowDown" => KeyAction::HistoryNext,
            "c" | "C" if self.ctrl => KeyAction::Interrupt,
            key if !self.ctrl && !self.alt && !self.meta => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyAction::Insert(ch),
                    _ => KeyAction::Ignored,
                }
            }
            _ => KeyAction::Ignored,
        }
    }
}

impl From<&web_sys::KeyboardEvent> for KeyEvent {
    fn from(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            alt: ev.alt_key(),
            meta: ev.meta_key(),
        }
    }
}
