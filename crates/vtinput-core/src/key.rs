//! Keyboard key vocabulary.
//!
//! Key identities are physical-position codes in the W3C `KeyboardEvent.code`
//! style. Every key carries a stable numeric id: callers on the other side of
//! a language boundary hard-code these values, so new keys are only ever
//! appended and existing ids never change.

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::mods::Mods;

macro_rules! keys {
    ($($(#[$doc:meta])* $name:ident = $id:literal => $label:literal,)+) => {
        /// Keyboard key identity.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u16)]
        pub enum Key {
            $($(#[$doc])* $name = $id,)+
        }

        impl Key {
            /// Every key in the vocabulary, in id order.
            pub const ALL: &'static [Key] = &[$(Key::$name,)+];

            /// Canonical display name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$name => $label,)+
                }
            }
        }

        impl TryFrom<u16> for Key {
            type Error = EncodeError;

            fn try_from(id: u16) -> Result<Self, Self::Error> {
                match id {
                    $($id => Ok(Key::$name),)+
                    _ => Err(EncodeError::UnknownKey(id)),
                }
            }
        }
    };
}

keys! {
    /// Key the platform could not identify
    Unidentified = 0 => "Unidentified",

    // Writing system keys
    /// `` ` `` / `~`
    Backquote = 1 => "Backquote",
    /// `\` / `|`
    Backslash = 2 => "Backslash",
    /// `[` / `{`
    BracketLeft = 3 => "BracketLeft",
    /// `]` / `}`
    BracketRight = 4 => "BracketRight",
    /// `,` / `<`
    Comma = 5 => "Comma",
    /// `0` / `)`
    Digit0 = 6 => "0",
    /// `1` / `!`
    Digit1 = 7 => "1",
    /// `2` / `@`
    Digit2 = 8 => "2",
    /// `3` / `#`
    Digit3 = 9 => "3",
    /// `4` / `$`
    Digit4 = 10 => "4",
    /// `5` / `%`
    Digit5 = 11 => "5",
    /// `6` / `^`
    Digit6 = 12 => "6",
    /// `7` / `&`
    Digit7 = 13 => "7",
    /// `8` / `*`
    Digit8 = 14 => "8",
    /// `9` / `(`
    Digit9 = 15 => "9",
    /// `=` / `+`
    Equal = 16 => "Equal",
    /// A
    KeyA = 17 => "A",
    /// B
    KeyB = 18 => "B",
    /// C
    KeyC = 19 => "C",
    /// D
    KeyD = 20 => "D",
    /// E
    KeyE = 21 => "E",
    /// F
    KeyF = 22 => "F",
    /// G
    KeyG = 23 => "G",
    /// H
    KeyH = 24 => "H",
    /// I
    KeyI = 25 => "I",
    /// J
    KeyJ = 26 => "J",
    /// K
    KeyK = 27 => "K",
    /// L
    KeyL = 28 => "L",
    /// M
    KeyM = 29 => "M",
    /// N
    KeyN = 30 => "N",
    /// O
    KeyO = 31 => "O",
    /// P
    KeyP = 32 => "P",
    /// Q
    KeyQ = 33 => "Q",
    /// R
    KeyR = 34 => "R",
    /// S
    KeyS = 35 => "S",
    /// T
    KeyT = 36 => "T",
    /// U
    KeyU = 37 => "U",
    /// V
    KeyV = 38 => "V",
    /// W
    KeyW = 39 => "W",
    /// X
    KeyX = 40 => "X",
    /// Y
    KeyY = 41 => "Y",
    /// Z
    KeyZ = 42 => "Z",
    /// `-` / `_`
    Minus = 43 => "Minus",
    /// `.` / `>`
    Period = 44 => "Period",
    /// `'` / `"`
    Quote = 45 => "Quote",
    /// `;` / `:`
    Semicolon = 46 => "Semicolon",
    /// `/` / `?`
    Slash = 47 => "Slash",

    // Functional keys
    /// Left Alt
    AltLeft = 48 => "AltLeft",
    /// Right Alt
    AltRight = 49 => "AltRight",
    /// Backspace
    Backspace = 50 => "Backspace",
    /// Caps Lock
    CapsLock = 51 => "CapsLock",
    /// Context menu
    ContextMenu = 52 => "ContextMenu",
    /// Left Control
    ControlLeft = 53 => "ControlLeft",
    /// Right Control
    ControlRight = 54 => "ControlRight",
    /// Enter / Return
    Enter = 55 => "Enter",
    /// Left Super / Command / Windows
    MetaLeft = 56 => "MetaLeft",
    /// Right Super / Command / Windows
    MetaRight = 57 => "MetaRight",
    /// Left Shift
    ShiftLeft = 58 => "ShiftLeft",
    /// Right Shift
    ShiftRight = 59 => "ShiftRight",
    /// Space bar
    Space = 60 => "Space",
    /// Tab
    Tab = 61 => "Tab",

    // Control pad
    /// Delete (forward)
    Delete = 62 => "Delete",
    /// End
    End = 63 => "End",
    /// Home
    Home = 64 => "Home",
    /// Insert
    Insert = 65 => "Insert",
    /// Page Down
    PageDown = 66 => "PageDown",
    /// Page Up
    PageUp = 67 => "PageUp",

    // Arrow pad
    /// Down arrow
    ArrowDown = 68 => "Down",
    /// Left arrow
    ArrowLeft = 69 => "Left",
    /// Right arrow
    ArrowRight = 70 => "Right",
    /// Up arrow
    ArrowUp = 71 => "Up",

    // Numpad
    /// Num Lock
    NumLock = 72 => "NumLock",
    /// Keypad 0
    Numpad0 = 73 => "Numpad0",
    /// Keypad 1
    Numpad1 = 74 => "Numpad1",
    /// Keypad 2
    Numpad2 = 75 => "Numpad2",
    /// Keypad 3
    Numpad3 = 76 => "Numpad3",
    /// Keypad 4
    Numpad4 = 77 => "Numpad4",
    /// Keypad 5
    Numpad5 = 78 => "Numpad5",
    /// Keypad 6
    Numpad6 = 79 => "Numpad6",
    /// Keypad 7
    Numpad7 = 80 => "Numpad7",
    /// Keypad 8
    Numpad8 = 81 => "Numpad8",
    /// Keypad 9
    Numpad9 = 82 => "Numpad9",
    /// Keypad `+`
    NumpadAdd = 83 => "NumpadAdd",
    /// Keypad `.`
    NumpadDecimal = 84 => "NumpadDecimal",
    /// Keypad `/`
    NumpadDivide = 85 => "NumpadDivide",
    /// Keypad Enter
    NumpadEnter = 86 => "NumpadEnter",
    /// Keypad `=`
    NumpadEqual = 87 => "NumpadEqual",
    /// Keypad `*`
    NumpadMultiply = 88 => "NumpadMultiply",
    /// Keypad `-`
    NumpadSubtract = 89 => "NumpadSubtract",

    // Function section
    /// Escape
    Escape = 90 => "Escape",
    /// F1
    F1 = 91 => "F1",
    /// F2
    F2 = 92 => "F2",
    /// F3
    F3 = 93 => "F3",
    /// F4
    F4 = 94 => "F4",
    /// F5
    F5 = 95 => "F5",
    /// F6
    F6 = 96 => "F6",
    /// F7
    F7 = 97 => "F7",
    /// F8
    F8 = 98 => "F8",
    /// F9
    F9 = 99 => "F9",
    /// F10
    F10 = 100 => "F10",
    /// F11
    F11 = 101 => "F11",
    /// F12
    F12 = 102 => "F12",
    /// F13
    F13 = 103 => "F13",
    /// F14
    F14 = 104 => "F14",
    /// F15
    F15 = 105 => "F15",
    /// F16
    F16 = 106 => "F16",
    /// F17
    F17 = 107 => "F17",
    /// F18
    F18 = 108 => "F18",
    /// F19
    F19 = 109 => "F19",
    /// F20
    F20 = 110 => "F20",
    /// F21
    F21 = 111 => "F21",
    /// F22
    F22 = 112 => "F22",
    /// F23
    F23 = 113 => "F23",
    /// F24
    F24 = 114 => "F24",
    /// F25
    F25 = 115 => "F25",
    /// Print Screen
    PrintScreen = 116 => "PrintScreen",
    /// Scroll Lock
    ScrollLock = 117 => "ScrollLock",
    /// Pause / Break
    Pause = 118 => "Pause",
}

const LETTERS: [Key; 26] = [
    Key::KeyA,
    Key::KeyB,
    Key::KeyC,
    Key::KeyD,
    Key::KeyE,
    Key::KeyF,
    Key::KeyG,
    Key::KeyH,
    Key::KeyI,
    Key::KeyJ,
    Key::KeyK,
    Key::KeyL,
    Key::KeyM,
    Key::KeyN,
    Key::KeyO,
    Key::KeyP,
    Key::KeyQ,
    Key::KeyR,
    Key::KeyS,
    Key::KeyT,
    Key::KeyU,
    Key::KeyV,
    Key::KeyW,
    Key::KeyX,
    Key::KeyY,
    Key::KeyZ,
];

const DIGITS: [Key; 10] = [
    Key::Digit0,
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
    Key::Digit8,
    Key::Digit9,
];

impl Key {
    /// Stable numeric id.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Parse a key from its name.
    ///
    /// Examples:
    /// - "a" / "A" -> Key::KeyA
    /// - "5" -> Key::Digit5
    /// - "[" -> Key::BracketLeft
    /// - "Enter" / "Return" -> Key::Enter
    /// - "Up" / "ArrowUp" -> Key::ArrowUp
    pub fn parse(s: &str) -> Result<Self, EncodeError> {
        let s = s.trim();

        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Key::from_char(ch).ok_or_else(|| EncodeError::UnknownKeyName(s.to_string()));
        }

        let key = match s {
            "Enter" | "Return" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            "Space" => Key::Space,
            "Insert" | "Ins" => Key::Insert,
            "Up" | "ArrowUp" => Key::ArrowUp,
            "Down" | "ArrowDown" => Key::ArrowDown,
            "Left" | "ArrowLeft" => Key::ArrowLeft,
            "Right" | "ArrowRight" => Key::ArrowRight,
            "PageUp" | "PgUp" => Key::PageUp,
            "PageDown" | "PgDn" => Key::PageDown,
            "Menu" => Key::ContextMenu,
            "Shift" => Key::ShiftLeft,
            "Ctrl" | "Control" => Key::ControlLeft,
            "Alt" => Key::AltLeft,
            "Super" | "Meta" => Key::MetaLeft,
            _ => {
                return Key::ALL
                    .iter()
                    .copied()
                    .find(|key| key.name() == s || format!("{key:?}") == s)
                    .ok_or_else(|| EncodeError::UnknownKeyName(s.to_string()));
            }
        };
        Ok(key)
    }

    /// Key that types `ch` on a US layout, shifted or not.
    pub fn from_char(ch: char) -> Option<Self> {
        let key = match ch {
            'a'..='z' => LETTERS[(ch as u8 - b'a') as usize],
            'A'..='Z' => LETTERS[(ch as u8 - b'A') as usize],
            '0'..='9' => DIGITS[(ch as u8 - b'0') as usize],
            ' ' => Key::Space,
            _ => Key::ALL
                .iter()
                .copied()
                .find(|key| key.shifted_char() == Some(ch) || key.base_char() == Some(ch))?,
        };
        Some(key)
    }

    /// Lowercase ASCII letter for `KeyA`..`KeyZ`.
    pub fn letter(self) -> Option<char> {
        let id = self.id();
        if (Key::KeyA.id()..=Key::KeyZ.id()).contains(&id) {
            Some((b'a' + (id - Key::KeyA.id()) as u8) as char)
        } else {
            None
        }
    }

    /// Unshifted character on a US layout.
    pub fn base_char(self) -> Option<char> {
        if let Some(letter) = self.letter() {
            return Some(letter);
        }
        let id = self.id();
        if (Key::Digit0.id()..=Key::Digit9.id()).contains(&id) {
            return Some((b'0' + (id - Key::Digit0.id()) as u8) as char);
        }
        let ch = match self {
            Key::Backquote => '`',
            Key::Backslash => '\\',
            Key::BracketLeft => '[',
            Key::BracketRight => ']',
            Key::Comma => ',',
            Key::Equal => '=',
            Key::Minus => '-',
            Key::Period => '.',
            Key::Quote => '\'',
            Key::Semicolon => ';',
            Key::Slash => '/',
            Key::Space => ' ',
            _ => return None,
        };
        Some(ch)
    }

    /// Shifted character on a US layout.
    pub fn shifted_char(self) -> Option<char> {
        if let Some(letter) = self.letter() {
            return Some(letter.to_ascii_uppercase());
        }
        let ch = match self {
            Key::Backquote => '~',
            Key::Backslash => '|',
            Key::BracketLeft => '{',
            Key::BracketRight => '}',
            Key::Comma => '<',
            Key::Digit0 => ')',
            Key::Digit1 => '!',
            Key::Digit2 => '@',
            Key::Digit3 => '#',
            Key::Digit4 => '$',
            Key::Digit5 => '%',
            Key::Digit6 => '^',
            Key::Digit7 => '&',
            Key::Digit8 => '*',
            Key::Digit9 => '(',
            Key::Equal => '+',
            Key::Minus => '_',
            Key::Period => '>',
            Key::Quote => '"',
            Key::Semicolon => ':',
            Key::Slash => '?',
            Key::Space => ' ',
            _ => return None,
        };
        Some(ch)
    }

    /// Character typed for this key under `mods` when the caller supplied no
    /// text. Shift selects the shifted symbol; Caps Lock toggles letter case.
    pub fn typed_char(self, mods: Mods) -> Option<char> {
        if let Some(letter) = self.letter() {
            let upper = mods.contains(Mods::SHIFT) != mods.contains(Mods::CAPS_LOCK);
            return Some(if upper {
                letter.to_ascii_uppercase()
            } else {
                letter
            });
        }
        if mods.contains(Mods::SHIFT) {
            self.shifted_char()
        } else {
            self.base_char()
        }
    }

    /// True for the modifier keys themselves (Shift, Control, Alt, Super).
    pub fn is_modifier(self) -> bool {
        self.modifier_flag().is_some()
    }

    /// Modifier bit a modifier key toggles.
    pub fn modifier_flag(self) -> Option<Mods> {
        let flag = match self {
            Key::ShiftLeft | Key::ShiftRight => Mods::SHIFT,
            Key::ControlLeft | Key::ControlRight => Mods::CTRL,
            Key::AltLeft | Key::AltRight => Mods::ALT,
            Key::MetaLeft | Key::MetaRight => Mods::SUPER,
            _ => return None,
        };
        Some(flag)
    }

    /// True for Caps Lock, Num Lock and Scroll Lock.
    pub fn is_lock(self) -> bool {
        matches!(self, Key::CapsLock | Key::NumLock | Key::ScrollLock)
    }

    /// True for keypad keys (Num Lock excluded).
    pub fn is_numpad(self) -> bool {
        (Key::Numpad0.id()..=Key::NumpadSubtract.id()).contains(&self.id())
    }

    /// True for F1..F25.
    pub fn function_number(self) -> Option<u8> {
        let id = self.id();
        if (Key::F1.id()..=Key::F25.id()).contains(&id) {
            Some((id - Key::F1.id() + 1) as u8)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Key {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(Key::Unidentified.id(), 0);
        assert_eq!(Key::KeyA.id(), 17);
        assert_eq!(Key::KeyZ.id(), 42);
        assert_eq!(Key::Enter.id(), 55);
        assert_eq!(Key::ArrowUp.id(), 71);
        assert_eq!(Key::Escape.id(), 90);
        assert_eq!(Key::F1.id(), 91);
        assert_eq!(Key::Pause.id(), 118);
    }

    #[test]
    fn test_all_is_dense_and_ordered() {
        for (index, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.id() as usize, index, "{key:?}");
        }
    }

    #[test]
    fn test_try_from_round_trip() {
        for key in Key::ALL {
            assert_eq!(Key::try_from(key.id()).unwrap(), *key);
        }
        assert_eq!(Key::try_from(119u16), Err(EncodeError::UnknownKey(119)));
        assert_eq!(Key::try_from(u16::MAX), Err(EncodeError::UnknownKey(u16::MAX)));
    }

    #[test]
    fn test_key_parse_char() {
        assert_eq!(Key::parse("a").unwrap(), Key::KeyA);
        assert_eq!(Key::parse("Z").unwrap(), Key::KeyZ);
        assert_eq!(Key::parse("5").unwrap(), Key::Digit5);
        assert_eq!(Key::parse("[").unwrap(), Key::BracketLeft);
        assert_eq!(Key::parse("?").unwrap(), Key::Slash);
    }

    #[test]
    fn test_key_parse_named() {
        assert_eq!(Key::parse("Enter").unwrap(), Key::Enter);
        assert_eq!(Key::parse("Return").unwrap(), Key::Enter);
        assert_eq!(Key::parse("Tab").unwrap(), Key::Tab);
        assert_eq!(Key::parse("Esc").unwrap(), Key::Escape);
        assert_eq!(Key::parse("Up").unwrap(), Key::ArrowUp);
        assert_eq!(Key::parse("ArrowDown").unwrap(), Key::ArrowDown);
        assert_eq!(Key::parse("F1").unwrap(), Key::F1);
        assert_eq!(Key::parse("F25").unwrap(), Key::F25);
        assert_eq!(Key::parse("Numpad7").unwrap(), Key::Numpad7);
        assert_eq!(Key::parse("CapsLock").unwrap(), Key::CapsLock);
    }

    #[test]
    fn test_key_parse_invalid() {
        assert!(Key::parse("InvalidKey").is_err());
        assert!(Key::parse("").is_err());
        assert!(Key::parse("é").is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for key in Key::ALL {
            assert_eq!(Key::parse(&key.to_string()).unwrap(), *key, "{key:?}");
        }
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(Key::KeyA.typed_char(Mods::empty()), Some('a'));
        assert_eq!(Key::KeyA.typed_char(Mods::SHIFT), Some('A'));
        assert_eq!(Key::KeyA.typed_char(Mods::CAPS_LOCK), Some('A'));
        assert_eq!(Key::KeyA.typed_char(Mods::SHIFT | Mods::CAPS_LOCK), Some('a'));
        assert_eq!(Key::Digit1.typed_char(Mods::SHIFT), Some('!'));
        assert_eq!(Key::Digit1.typed_char(Mods::CAPS_LOCK), Some('1'));
        assert_eq!(Key::ArrowUp.typed_char(Mods::empty()), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Key::KeyC.letter(), Some('c'));
        assert_eq!(Key::Digit3.letter(), None);
        assert!(Key::ShiftRight.is_modifier());
        assert_eq!(Key::MetaLeft.modifier_flag(), Some(Mods::SUPER));
        assert!(Key::NumLock.is_lock());
        assert!(Key::NumpadEnter.is_numpad());
        assert!(!Key::NumLock.is_numpad());
        assert_eq!(Key::F12.function_number(), Some(12));
        assert_eq!(Key::Escape.function_number(), None);
    }

    #[test]
    fn test_key_serialization() {
        let json = serde_json::to_string(&Key::ArrowUp).unwrap();
        assert_eq!(json, "\"arrow_up\"");
        let key: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(key, Key::ArrowUp);
    }
}
