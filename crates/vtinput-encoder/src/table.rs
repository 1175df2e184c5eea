//! Sequence tables shared by the legacy and kitty encoders.

use vtinput_core::Key;

/// xterm spelling of a functional key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Functional {
    /// `CSI final`, `SS3 final` in cursor key application mode
    Cursor(u8),
    /// `SS3 final` when unmodified, `CSI 1 ; m final` otherwise
    Ss3(u8),
    /// `CSI number ~`
    Tilde(u32),
}

/// Legacy spelling of keys with a fixed escape sequence.
pub(crate) fn functional(key: Key) -> Option<Functional> {
    use Functional::*;

    let seq = match key {
        Key::ArrowUp => Cursor(b'A'),
        Key::ArrowDown => Cursor(b'B'),
        Key::ArrowRight => Cursor(b'C'),
        Key::ArrowLeft => Cursor(b'D'),
        Key::Home => Cursor(b'H'),
        Key::End => Cursor(b'F'),
        Key::Insert => Tilde(2),
        Key::Delete => Tilde(3),
        Key::PageUp => Tilde(5),
        Key::PageDown => Tilde(6),
        Key::F1 => Ss3(b'P'),
        Key::F2 => Ss3(b'Q'),
        Key::F3 => Ss3(b'R'),
        Key::F4 => Ss3(b'S'),
        Key::F5 => Tilde(15),
        Key::F6 => Tilde(17),
        Key::F7 => Tilde(18),
        Key::F8 => Tilde(19),
        Key::F9 => Tilde(20),
        Key::F10 => Tilde(21),
        Key::F11 => Tilde(23),
        Key::F12 => Tilde(24),
        Key::F13 => Tilde(25),
        Key::F14 => Tilde(26),
        Key::F15 => Tilde(28),
        Key::F16 => Tilde(29),
        Key::F17 => Tilde(31),
        Key::F18 => Tilde(32),
        Key::F19 => Tilde(33),
        Key::F20 => Tilde(34),
        Key::F21 => Tilde(42),
        Key::F22 => Tilde(43),
        Key::F23 => Tilde(44),
        Key::F24 => Tilde(45),
        Key::F25 => Tilde(46),
        _ => return None,
    };
    Some(seq)
}

/// Final byte of the keypad application sequence (`SS3 final`).
pub(crate) fn keypad_final(key: Key) -> Option<u8> {
    let id = key.id();
    if (Key::Numpad0.id()..=Key::Numpad9.id()).contains(&id) {
        return Some(b'p' + (id - Key::Numpad0.id()) as u8);
    }
    let byte = match key {
        Key::NumpadDecimal => b'n',
        Key::NumpadDivide => b'o',
        Key::NumpadMultiply => b'j',
        Key::NumpadSubtract => b'm',
        Key::NumpadAdd => b'k',
        Key::NumpadEnter => b'M',
        Key::NumpadEqual => b'X',
        _ => return None,
    };
    Some(byte)
}

/// Character a keypad key types in numeric mode.
pub(crate) fn keypad_char(key: Key) -> Option<char> {
    let id = key.id();
    if (Key::Numpad0.id()..=Key::Numpad9.id()).contains(&id) {
        return Some((b'0' + (id - Key::Numpad0.id()) as u8) as char);
    }
    let ch = match key {
        Key::NumpadDecimal => '.',
        Key::NumpadDivide => '/',
        Key::NumpadMultiply => '*',
        Key::NumpadSubtract => '-',
        Key::NumpadAdd => '+',
        Key::NumpadEnter => '\r',
        Key::NumpadEqual => '=',
        _ => return None,
    };
    Some(ch)
}

/// Kitty key number for keys reported as `CSI number u` that have no
/// Unicode code point of their own.
pub(crate) fn kitty_functional_code(key: Key) -> Option<u32> {
    if let Some(n) = key.function_number() {
        // F1..F12 have legacy forms, F13 onwards live in the private use area.
        return (n >= 13).then(|| 57376 + u32::from(n - 13));
    }
    let id = key.id();
    if (Key::Numpad0.id()..=Key::Numpad9.id()).contains(&id) {
        return Some(57399 + u32::from(id - Key::Numpad0.id()));
    }
    let code = match key {
        Key::Escape => 27,
        Key::Enter => 13,
        Key::Tab => 9,
        Key::Backspace => 127,
        Key::CapsLock => 57358,
        Key::ScrollLock => 57359,
        Key::NumLock => 57360,
        Key::PrintScreen => 57361,
        Key::Pause => 57362,
        Key::ContextMenu => 57363,
        Key::NumpadDecimal => 57409,
        Key::NumpadDivide => 57410,
        Key::NumpadMultiply => 57411,
        Key::NumpadSubtract => 57412,
        Key::NumpadAdd => 57413,
        Key::NumpadEnter => 57414,
        Key::NumpadEqual => 57415,
        Key::ShiftLeft => 57441,
        Key::ControlLeft => 57442,
        Key::AltLeft => 57443,
        Key::MetaLeft => 57444,
        Key::ShiftRight => 57447,
        Key::ControlRight => 57448,
        Key::AltRight => 57449,
        Key::MetaRight => 57450,
        _ => return None,
    };
    Some(code)
}

/// C0 control code xterm sends for Ctrl plus the key that types `ch`.
pub(crate) fn ctrl_code(ch: char) -> Option<u8> {
    let code = match ch {
        'a'..='z' => ch as u8 - b'a' + 1,
        'A'..='Z' => ch as u8 - b'A' + 1,
        ' ' | '@' | '2' | '`' => 0x00,
        '[' | '{' | '3' => 0x1b,
        '\\' | '|' | '4' => 0x1c,
        ']' | '}' | '5' => 0x1d,
        '^' | '~' | '6' => 0x1e,
        '_' | '-' | '/' | '7' => 0x1f,
        '?' | '8' => 0x7f,
        _ => return None,
    };
    Some(code)
}
