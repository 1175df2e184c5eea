//! Kitty keyboard protocol encoding.
//!
//! Reference: <https://sw.kovidgoyal.net/kitty/keyboard-protocol/>

use vtinput_core::{EncoderConfig, Key, KeyAction, KeyEvent, KittyFlags, Mods};

use crate::legacy;
use crate::sequence::SequenceWriter;
use crate::table::{self, Functional};

/// Encode `event` for a terminal that pushed `flags`.
pub(crate) fn encode(
    event: &KeyEvent,
    config: &EncoderConfig,
    flags: KittyFlags,
    out: &mut SequenceWriter,
) {
    let report_all = flags.contains(KittyFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES);
    let report_events = flags.contains(KittyFlags::REPORT_EVENT_TYPES);

    if event.action == KeyAction::Release && !report_events {
        return;
    }

    let key = event.key;
    let mut mods = if report_all {
        event.mods
    } else {
        event.mods.without_locks()
    };
    // A modifier key reports its own bit as set while held.
    if let Some(flag) = key.modifier_flag() {
        mods.set(flag, event.action != KeyAction::Release);
    }

    let event_type = match event.action {
        KeyAction::Press => None,
        KeyAction::Repeat if report_events => Some(2),
        KeyAction::Repeat => None,
        KeyAction::Release => Some(3),
    };

    if key.is_modifier() || matches!(key, Key::CapsLock | Key::NumLock) {
        if report_all {
            if let Some(code) = table::kitty_functional_code(key) {
                write_csi_u(out, code, None, mods.kitty_param(), event_type, None);
            }
        }
        return;
    }

    // F13 and above have kitty codes of their own.
    let legacy_form = key.function_number().map_or(true, |n| n <= 12);
    if let Some(seq) = table::functional(key).filter(|_| legacy_form) {
        let param = mods.kitty_param();
        if param == 1 && event_type.is_none() && !report_all {
            legacy::write_functional(out, seq, 1, config.cursor_key_application);
        } else {
            write_functional(out, seq, param, event_type);
        }
        return;
    }

    if matches!(key, Key::Enter | Key::Tab | Key::Backspace) && !report_all && mods.is_empty() {
        // Release and repeat of these keys are never reported here.
        if event.action != KeyAction::Release {
            out.byte(match key {
                Key::Enter => b'\r',
                Key::Tab => b'\t',
                _ => 0x7f,
            });
        }
        return;
    }

    if let Some(code) = table::kitty_functional_code(key) {
        write_csi_u(out, code, None, mods.kitty_param(), event_type, None);
        return;
    }

    let Some(code) = base_code(event) else {
        // Text with no key code (IME commits, grapheme clusters) goes out as
        // plain UTF-8 whatever the flags.
        if event.action != KeyAction::Release {
            if let Some(text) = event.text() {
                out.text(text);
            }
        }
        return;
    };

    let plain = (mods.without_locks() - Mods::SHIFT).is_empty();
    if plain && !report_all {
        if event.action == KeyAction::Release {
            return;
        }
        match event.text() {
            Some(text) => {
                out.text(text);
            }
            None => {
                if let Some(ch) = key.typed_char(event.mods) {
                    out.char(ch);
                }
            }
        }
        return;
    }

    let alternate = if flags.contains(KittyFlags::REPORT_ALTERNATE_KEYS)
        && event.mods.contains(Mods::SHIFT)
    {
        shifted_code(event).filter(|&shifted| shifted != code)
    } else {
        None
    };

    let text = if flags.contains(KittyFlags::REPORT_ASSOCIATED_TEXT)
        && event.action != KeyAction::Release
        && plain
    {
        associated_text(event)
    } else {
        None
    };

    write_csi_u(
        out,
        code,
        alternate,
        mods.kitty_param(),
        event_type,
        text.as_deref(),
    );
}

/// `CSI code[:alternate] ; mods[:event] [; text] u`
fn write_csi_u(
    out: &mut SequenceWriter,
    code: u32,
    alternate: Option<u32>,
    param: u32,
    event_type: Option<u32>,
    text: Option<&str>,
) {
    out.csi().number(code);
    if let Some(alternate) = alternate {
        out.byte(b':').number(alternate);
    }
    if param > 1 || event_type.is_some() || text.is_some() {
        out.byte(b';').number(param);
        if let Some(event_type) = event_type {
            out.byte(b':').number(event_type);
        }
    }
    if let Some(text) = text {
        out.byte(b';');
        for (index, ch) in text.chars().enumerate() {
            if index > 0 {
                out.byte(b':');
            }
            out.number(ch as u32);
        }
    }
    out.byte(b'u');
}

/// Legacy-form functional key with kitty parameters. F3 moves to `CSI 13 ~`
/// because `CSI R` collides with the cursor position report.
fn write_functional(
    out: &mut SequenceWriter,
    seq: Functional,
    param: u32,
    event_type: Option<u32>,
) {
    let with_params = param > 1 || event_type.is_some();
    let write_params = |out: &mut SequenceWriter| {
        out.number(param);
        if let Some(event_type) = event_type {
            out.byte(b':').number(event_type);
        }
    };

    match seq {
        Functional::Ss3(b'R') => {
            out.csi().bytes(b"13");
            if with_params {
                out.byte(b';');
                write_params(out);
            }
            out.byte(b'~');
        }
        Functional::Cursor(fin) | Functional::Ss3(fin) => {
            out.csi();
            if with_params {
                out.bytes(b"1;");
                write_params(out);
            }
            out.byte(fin);
        }
        Functional::Tilde(number) => {
            out.csi().number(number);
            if with_params {
                out.byte(b';');
                write_params(out);
            }
            out.byte(b'~');
        }
    }
}

/// Unshifted Unicode code point identifying the key.
fn base_code(event: &KeyEvent) -> Option<u32> {
    if let Some(ch) = event.key.base_char() {
        return Some(ch as u32);
    }
    if event.key != Key::Unidentified {
        return None;
    }
    let text = event.text()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_control() => ch.to_lowercase().next().map(|ch| ch as u32),
        _ => None,
    }
}

fn shifted_code(event: &KeyEvent) -> Option<u32> {
    if let Some(text) = event.text() {
        let mut chars = text.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(ch as u32);
        }
    }
    event.key.shifted_char().map(|ch| ch as u32)
}

fn associated_text(event: &KeyEvent) -> Option<String> {
    let text = match event.text() {
        Some(text) => text.to_owned(),
        None => event.key.typed_char(event.mods)?.to_string(),
    };
    if text.is_empty() || text.chars().any(char::is_control) {
        return None;
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with(flags: KittyFlags, event: KeyEvent) -> Vec<u8> {
        let config = EncoderConfig::kitty(flags);
        let mut out = SequenceWriter::new();
        encode(&event, &config, flags, &mut out);
        out.finish().into_vec()
    }

    fn disambiguate(event: KeyEvent) -> Vec<u8> {
        encode_with(KittyFlags::DISAMBIGUATE_ESCAPE_CODES, event)
    }

    fn chord(s: &str) -> KeyEvent {
        KeyEvent::parse(s).unwrap()
    }

    const EVENTS: KittyFlags =
        KittyFlags::DISAMBIGUATE_ESCAPE_CODES.union(KittyFlags::REPORT_EVENT_TYPES);
    const ALL: KittyFlags = KittyFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES;

    #[test]
    fn test_modified_arrows() {
        assert_eq!(disambiguate(chord("Shift+Up")), b"\x1b[1;2A");
        assert_eq!(disambiguate(chord("Ctrl+Left")), b"\x1b[1;5D");
        assert_eq!(disambiguate(chord("Up")), b"\x1b[A");
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(disambiguate(chord("F1")), b"\x1bOP");
        assert_eq!(disambiguate(chord("Ctrl+F1")), b"\x1b[1;5P");
        assert_eq!(disambiguate(chord("Shift+F3")), b"\x1b[13;2~");
        assert_eq!(disambiguate(chord("Alt+F5")), b"\x1b[15;3~");
        assert_eq!(disambiguate(chord("F13")), b"\x1b[57376u");
        assert_eq!(encode_with(ALL, chord("F1")), b"\x1b[P");
        assert_eq!(encode_with(ALL, chord("F3")), b"\x1b[13~");
    }

    #[test]
    fn test_escape_is_disambiguated() {
        assert_eq!(disambiguate(chord("Escape")), b"\x1b[27u");
        assert_eq!(disambiguate(chord("Shift+Escape")), b"\x1b[27;2u");
    }

    #[test]
    fn test_enter_tab_backspace() {
        assert_eq!(disambiguate(chord("Enter")), b"\r");
        assert_eq!(disambiguate(chord("Tab")), b"\t");
        assert_eq!(disambiguate(chord("Backspace")), b"\x7f");
        assert_eq!(disambiguate(chord("Shift+Tab")), b"\x1b[9;2u");
        assert_eq!(disambiguate(chord("Ctrl+Enter")), b"\x1b[13;5u");
        assert_eq!(encode_with(ALL, chord("Enter")), b"\x1b[13u");
        assert!(encode_with(EVENTS, KeyEvent::release(Key::Enter)).is_empty());
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(disambiguate(chord("a")), b"a");
        assert_eq!(disambiguate(chord("Shift+a")), b"A");
        assert_eq!(disambiguate(chord("Ctrl+c")), b"\x1b[99;5u");
        assert_eq!(disambiguate(chord("Alt+a")), b"\x1b[97;3u");
        assert_eq!(disambiguate(chord("Ctrl+Shift+a")), b"\x1b[97;6u");
        assert_eq!(disambiguate(chord("Ctrl+Space")), b"\x1b[32;5u");
    }

    #[test]
    fn test_lock_modifiers() {
        let event = chord("a").with_mods(Mods::CAPS_LOCK);
        assert_eq!(disambiguate(event.clone()), b"A");
        assert_eq!(encode_with(ALL, event), b"\x1b[97;65u");

        let event = chord("Ctrl+a").with_mods(Mods::CTRL | Mods::NUM_LOCK);
        assert_eq!(disambiguate(event), b"\x1b[97;5u");
    }

    #[test]
    fn test_report_all_keys() {
        assert_eq!(encode_with(ALL, chord("a")), b"\x1b[97u");
        assert_eq!(encode_with(ALL, chord("Shift+a")), b"\x1b[97;2u");
        assert_eq!(encode_with(ALL, chord("Up")), b"\x1b[A");
    }

    #[test]
    fn test_event_types() {
        let release = KeyEvent::release(Key::KeyA).with_mods(Mods::CTRL);
        assert_eq!(encode_with(EVENTS, release), b"\x1b[97;5:3u");

        let repeat = chord("Ctrl+a").with_action(KeyAction::Repeat);
        assert_eq!(encode_with(EVENTS, repeat), b"\x1b[97;5:2u");

        assert_eq!(
            encode_with(EVENTS, KeyEvent::release(Key::ArrowUp)),
            b"\x1b[1;1:3A"
        );
        assert_eq!(
            encode_with(EVENTS, KeyEvent::release(Key::Delete)),
            b"\x1b[3;1:3~"
        );

        // Plain text keys do not report release without REPORT_ALL
        assert!(encode_with(EVENTS, KeyEvent::release(Key::KeyA)).is_empty());
        let flags = ALL | KittyFlags::REPORT_EVENT_TYPES;
        assert_eq!(encode_with(flags, KeyEvent::release(Key::KeyA)), b"\x1b[97;1:3u");
    }

    #[test]
    fn test_release_without_event_types() {
        assert!(disambiguate(KeyEvent::release(Key::ArrowUp)).is_empty());
        assert!(disambiguate(KeyEvent::release(Key::KeyA)).is_empty());
    }

    #[test]
    fn test_modifier_keys() {
        assert!(disambiguate(chord("ShiftLeft")).is_empty());
        assert_eq!(encode_with(ALL, chord("ShiftLeft")), b"\x1b[57441;2u");

        let flags = ALL | KittyFlags::REPORT_EVENT_TYPES;
        let release = KeyEvent::release(Key::ControlRight).with_mods(Mods::CTRL);
        assert_eq!(encode_with(flags, release), b"\x1b[57448;1:3u");
        assert_eq!(encode_with(ALL, chord("CapsLock")), b"\x1b[57358u");
        assert!(disambiguate(chord("CapsLock")).is_empty());
    }

    #[test]
    fn test_keypad() {
        assert_eq!(disambiguate(chord("Numpad0")), b"\x1b[57399u");
        assert_eq!(disambiguate(chord("NumpadEnter")), b"\x1b[57414u");
        assert_eq!(disambiguate(chord("Ctrl+Numpad9")), b"\x1b[57408;5u");
    }

    #[test]
    fn test_alternate_keys() {
        let flags = KittyFlags::DISAMBIGUATE_ESCAPE_CODES | KittyFlags::REPORT_ALTERNATE_KEYS;
        assert_eq!(encode_with(flags, chord("Ctrl+Shift+a")), b"\x1b[97:65;6u");
        assert_eq!(encode_with(flags, chord("Ctrl+a")), b"\x1b[97;5u");
        assert_eq!(encode_with(flags, chord("Ctrl+Shift+2")), b"\x1b[50:64;6u");
    }

    #[test]
    fn test_associated_text() {
        let flags = ALL | KittyFlags::REPORT_ASSOCIATED_TEXT;
        assert_eq!(encode_with(flags, chord("a")), b"\x1b[97;1;97u");
        assert_eq!(encode_with(flags, chord("Shift+a")), b"\x1b[97;2;65u");
        // No text for control combinations
        assert_eq!(encode_with(flags, chord("Ctrl+a")), b"\x1b[97;5u");

        let event = KeyEvent::press(Key::Unidentified).with_text("é").unwrap();
        assert_eq!(encode_with(flags, event), b"\x1b[233;1;233u");
    }

    #[test]
    fn test_unidentified_key() {
        let event = KeyEvent::press(Key::Unidentified).with_text("ß").unwrap();
        assert_eq!(disambiguate(event.clone()), "ß".as_bytes());
        assert_eq!(
            disambiguate(event.with_mods(Mods::CTRL)),
            b"\x1b[223;5u"
        );
        assert!(disambiguate(KeyEvent::press(Key::Unidentified).with_mods(Mods::CTRL)).is_empty());
    }

    #[test]
    fn test_committed_text_without_key_code() {
        let commit = KeyEvent::press(Key::Unidentified).with_text("日本").unwrap();
        assert_eq!(disambiguate(commit.clone()), "日本".as_bytes());
        assert_eq!(encode_with(ALL, commit.clone()), "日本".as_bytes());
        assert_eq!(
            encode_with(EVENTS, commit.clone().with_mods(Mods::SHIFT)),
            "日本".as_bytes()
        );
        assert!(encode_with(EVENTS, commit.with_action(KeyAction::Release)).is_empty());

        let emoji = KeyEvent::press(Key::Unidentified).with_text("👍🏽").unwrap();
        assert_eq!(disambiguate(emoji), "👍🏽".as_bytes());

        let shifted = KeyEvent::press(Key::Unidentified)
            .with_mods(Mods::SHIFT)
            .with_text("ÀB")
            .unwrap();
        assert_eq!(disambiguate(shifted), "ÀB".as_bytes());
    }

    #[test]
    fn test_dead_key() {
        let event = KeyEvent::press(Key::KeyE).with_text("").unwrap();
        assert!(disambiguate(event).is_empty());
    }
}
