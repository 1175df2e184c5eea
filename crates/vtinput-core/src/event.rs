//! Key events consumed by the encoder.

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::key::Key;
use crate::mods::Mods;

/// Longest text payload a key event may carry, in bytes.
pub const MAX_TEXT_BYTES: usize = 32;

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum KeyAction {
    /// Key released
    Release = 0,
    /// Key pressed
    #[default]
    Press = 1,
    /// Key held down and auto-repeating
    Repeat = 2,
}

impl TryFrom<u8> for KeyAction {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyAction::Release),
            1 => Ok(KeyAction::Press),
            2 => Ok(KeyAction::Repeat),
            _ => Err(EncodeError::UnknownAction(value)),
        }
    }
}

/// One key press, repeat or release.
///
/// `text` is what the input method produced for this keystroke. `None` means
/// the caller supplied nothing and the encoder may derive a character from
/// the key; `Some("")` means the input method produced no text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Press, release or repeat
    #[serde(default)]
    pub action: KeyAction,
    /// Key identity
    pub key: Key,
    /// Modifiers held during the event
    #[serde(default)]
    pub mods: Mods,
    /// Text produced by the input method
    #[serde(default)]
    text: Option<String>,
}

impl KeyEvent {
    /// Press of `key` with no modifiers and no text.
    pub fn press(key: Key) -> Self {
        Self {
            action: KeyAction::Press,
            key,
            mods: Mods::empty(),
            text: None,
        }
    }

    /// Release of `key` with no modifiers and no text.
    pub fn release(key: Key) -> Self {
        Self {
            action: KeyAction::Release,
            ..Self::press(key)
        }
    }

    /// Set the action.
    pub fn with_action(mut self, action: KeyAction) -> Self {
        self.action = action;
        self
    }

    /// Set the modifiers.
    pub fn with_mods(mut self, mods: Mods) -> Self {
        self.mods = mods;
        self
    }

    /// Attach input-method text.
    pub fn with_text(mut self, text: impl Into<String>) -> Result<Self, EncodeError> {
        let text = text.into();
        check_text_len(text.len())?;
        self.text = Some(text);
        Ok(self)
    }

    /// Build an event from the integer encoding used across language
    /// boundaries.
    pub fn from_raw(
        action: u8,
        key: u16,
        mods: u16,
        text: Option<&[u8]>,
    ) -> Result<Self, EncodeError> {
        let action = KeyAction::try_from(action)?;
        let key = Key::try_from(key)?;
        let mods = Mods::from_raw(mods)?;
        let text = match text {
            Some(bytes) => {
                check_text_len(bytes.len())?;
                let text = std::str::from_utf8(bytes).map_err(|e| EncodeError::InvalidUtf8 {
                    valid_up_to: e.valid_up_to(),
                })?;
                Some(text.to_owned())
            }
            None => None,
        };
        Ok(Self {
            action,
            key,
            mods,
            text,
        })
    }

    /// Parse a chord such as `"Ctrl+Shift+Up"`, `"Alt+x"` or `"F5"`.
    ///
    /// Modifier prefixes are case sensitive and may appear in any order.
    /// The resulting event is a press with no text.
    pub fn parse(s: &str) -> Result<Self, EncodeError> {
        let mut rest = s.trim();
        let mut mods = Mods::empty();

        loop {
            let (flag, tail) = if let Some(tail) = rest.strip_prefix("Ctrl+") {
                (Mods::CTRL, tail)
            } else if let Some(tail) = rest.strip_prefix("Alt+") {
                (Mods::ALT, tail)
            } else if let Some(tail) = rest.strip_prefix("Shift+") {
                (Mods::SHIFT, tail)
            } else if let Some(tail) = rest.strip_prefix("Super+") {
                (Mods::SUPER, tail)
            } else {
                break;
            };
            if tail.is_empty() {
                return Err(EncodeError::UnknownKeyName(s.to_string()));
            }
            mods |= flag;
            rest = tail;
        }

        Ok(Self::press(Key::parse(rest)?).with_mods(mods))
    }

    /// Input-method text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

fn check_text_len(len: usize) -> Result<(), EncodeError> {
    if len > MAX_TEXT_BYTES {
        return Err(EncodeError::TextTooLong {
            len,
            max: MAX_TEXT_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_try_from() {
        assert_eq!(KeyAction::try_from(0u8).unwrap(), KeyAction::Release);
        assert_eq!(KeyAction::try_from(1u8).unwrap(), KeyAction::Press);
        assert_eq!(KeyAction::try_from(2u8).unwrap(), KeyAction::Repeat);
        assert_eq!(KeyAction::try_from(3u8), Err(EncodeError::UnknownAction(3)));
    }

    #[test]
    fn test_from_raw() {
        let event = KeyEvent::from_raw(1, Key::KeyC.id(), 0b10, Some(b"c".as_slice())).unwrap();
        assert_eq!(event.action, KeyAction::Press);
        assert_eq!(event.key, Key::KeyC);
        assert_eq!(event.mods, Mods::CTRL);
        assert_eq!(event.text(), Some("c"));
    }

    #[test]
    fn test_from_raw_rejects_bad_fields() {
        assert_eq!(
            KeyEvent::from_raw(9, Key::KeyA.id(), 0, None),
            Err(EncodeError::UnknownAction(9))
        );
        assert_eq!(
            KeyEvent::from_raw(1, 5000, 0, None),
            Err(EncodeError::UnknownKey(5000))
        );
        assert_eq!(
            KeyEvent::from_raw(1, Key::KeyA.id(), 0x100, None),
            Err(EncodeError::UnknownModifiers(0x100))
        );
        assert_eq!(
            KeyEvent::from_raw(1, Key::KeyA.id(), 0, Some(b"a\xff".as_slice())),
            Err(EncodeError::InvalidUtf8 { valid_up_to: 1 })
        );
    }

    #[test]
    fn test_empty_text_is_not_absent() {
        let absent = KeyEvent::from_raw(1, Key::KeyA.id(), 0, None).unwrap();
        let empty = KeyEvent::from_raw(1, Key::KeyA.id(), 0, Some(b"".as_slice())).unwrap();
        assert_eq!(absent.text(), None);
        assert_eq!(empty.text(), Some(""));
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_text_too_long() {
        let long = "x".repeat(MAX_TEXT_BYTES + 1);
        assert_eq!(
            KeyEvent::press(Key::KeyX).with_text(long.clone()),
            Err(EncodeError::TextTooLong {
                len: MAX_TEXT_BYTES + 1,
                max: MAX_TEXT_BYTES
            })
        );
        assert!(KeyEvent::from_raw(1, Key::KeyX.id(), 0, Some(long.as_bytes())).is_err());
        assert!(KeyEvent::press(Key::KeyX)
            .with_text("x".repeat(MAX_TEXT_BYTES))
            .is_ok());
    }

    #[test]
    fn test_parse_chord() {
        let event = KeyEvent::parse("Ctrl+c").unwrap();
        assert_eq!(event.key, Key::KeyC);
        assert_eq!(event.mods, Mods::CTRL);

        let event = KeyEvent::parse("Ctrl+Shift+Up").unwrap();
        assert_eq!(event.key, Key::ArrowUp);
        assert_eq!(event.mods, Mods::CTRL | Mods::SHIFT);

        let event = KeyEvent::parse("Alt+Super+F5").unwrap();
        assert_eq!(event.key, Key::F5);
        assert_eq!(event.mods, Mods::ALT | Mods::SUPER);

        assert_eq!(KeyEvent::parse("Enter").unwrap(), KeyEvent::press(Key::Enter));
    }

    #[test]
    fn test_parse_chord_invalid() {
        assert!(KeyEvent::parse("Ctrl+").is_err());
        assert!(KeyEvent::parse("Alt+").is_err());
        assert!(KeyEvent::parse("Ctrl+Nope").is_err());
    }

    #[test]
    fn test_event_serialization() {
        let event = KeyEvent::press(Key::KeyA)
            .with_mods(Mods::SHIFT)
            .with_text("A")
            .unwrap();
        let json = serde_json::to_string(&event).unwrap();
        let back: KeyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
