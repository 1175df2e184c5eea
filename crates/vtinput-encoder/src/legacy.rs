//! xterm-compatible legacy encoding.
//!
//! Reference: <https://invisible-island.net/xterm/ctlseqs/ctlseqs.html>

use vtinput_core::{EncoderConfig, Key, KeyAction, KeyEvent, ModifyOtherKeys, Mods};

use crate::sequence::SequenceWriter;
use crate::table::{self, Functional};

/// Encode `event` with the legacy rules. Releases produce nothing.
pub(crate) fn encode(event: &KeyEvent, config: &EncoderConfig, out: &mut SequenceWriter) {
    if event.action == KeyAction::Release {
        return;
    }

    let key = event.key;
    let mods = event.mods.without_locks();
    let alt = mods.contains(Mods::ALT) && config.alt_esc_prefix;

    if let Some(seq) = table::functional(key) {
        write_functional(out, seq, mods.csi_param(), config.cursor_key_application);
        return;
    }

    if key.is_numpad() {
        encode_keypad(event, config, alt, out);
        return;
    }

    if let Some(code) = control_key_code(key) {
        encode_control_key(key, code, mods, alt, config.modify_other_keys, out);
        return;
    }

    if key.is_modifier()
        || key.is_lock()
        || matches!(key, Key::PrintScreen | Key::Pause | Key::ContextMenu)
    {
        return;
    }

    let ctrl = if mods.contains(Mods::CTRL) {
        key.letter()
            .or_else(|| text_char(event))
            .and_then(table::ctrl_code)
    } else {
        None
    };

    // A dead key produced no text, so there is no code to report.
    let dead = event.text() == Some("");
    if let Some(ch) = text_char(event).filter(|_| !dead) {
        if wants_modify_other_keys(config.modify_other_keys, mods, ctrl.is_some()) {
            write_modify_other_keys(out, mods, ch as u32);
            return;
        }
    }

    if let Some(code) = ctrl {
        if alt {
            out.esc();
        }
        out.byte(code);
        return;
    }

    match event.text() {
        Some(text) => write_text(out, text, alt),
        None => {
            if let Some(ch) = key.typed_char(event.mods) {
                if alt {
                    out.esc();
                }
                out.char(ch);
            }
        }
    }
}

/// Write a functional key, parameterised with `param` when it is above 1.
pub(crate) fn write_functional(
    out: &mut SequenceWriter,
    seq: Functional,
    param: u32,
    cursor_key_application: bool,
) {
    match seq {
        Functional::Cursor(fin) | Functional::Ss3(fin) if param > 1 => {
            out.csi().bytes(b"1;").number(param).byte(fin);
        }
        Functional::Cursor(fin) => {
            if cursor_key_application {
                out.ss3();
            } else {
                out.csi();
            }
            out.byte(fin);
        }
        Functional::Ss3(fin) => {
            out.ss3().byte(fin);
        }
        Functional::Tilde(number) => {
            out.csi().number(number);
            if param > 1 {
                out.byte(b';').number(param);
            }
            out.byte(b'~');
        }
    }
}

fn encode_keypad(event: &KeyEvent, config: &EncoderConfig, alt: bool, out: &mut SequenceWriter) {
    let key = event.key;
    let numeric = key == Key::NumpadDecimal
        || (Key::Numpad0.id()..=Key::Numpad9.id()).contains(&key.id());
    let application =
        config.keypad_application && !(numeric && event.mods.contains(Mods::NUM_LOCK));

    if application {
        if let Some(fin) = table::keypad_final(key) {
            out.ss3().byte(fin);
            return;
        }
    }

    if key == Key::NumpadEnter {
        if alt {
            out.esc();
        }
        out.byte(b'\r');
        return;
    }

    match event.text() {
        Some(text) => write_text(out, text, alt),
        None => {
            if let Some(ch) = table::keypad_char(key) {
                if alt {
                    out.esc();
                }
                out.char(ch);
            }
        }
    }
}

/// Keys that send a single C0 byte, with that byte.
fn control_key_code(key: Key) -> Option<u8> {
    match key {
        Key::Enter => Some(b'\r'),
        Key::Tab => Some(b'\t'),
        Key::Backspace => Some(0x7f),
        Key::Escape => Some(0x1b),
        _ => None,
    }
}

fn encode_control_key(
    key: Key,
    code: u8,
    mods: Mods,
    alt: bool,
    level: ModifyOtherKeys,
    out: &mut SequenceWriter,
) {
    let shift_tab = key == Key::Tab && mods.contains(Mods::SHIFT);
    let report = match level {
        ModifyOtherKeys::Off => false,
        ModifyOtherKeys::ExceptWellDefined => mods.contains(Mods::CTRL),
        ModifyOtherKeys::All => !mods.is_empty() && !(shift_tab && mods == Mods::SHIFT),
    };
    if report {
        write_modify_other_keys(out, mods, u32::from(code));
        return;
    }

    if alt {
        out.esc();
    }
    if shift_tab {
        out.csi().byte(b'Z');
    } else if key == Key::Backspace && mods.contains(Mods::CTRL) {
        out.byte(0x08);
    } else {
        out.byte(code);
    }
}

fn wants_modify_other_keys(level: ModifyOtherKeys, mods: Mods, has_control_code: bool) -> bool {
    match level {
        ModifyOtherKeys::Off => false,
        ModifyOtherKeys::ExceptWellDefined => {
            mods.contains(Mods::CTRL) && (!has_control_code || mods.contains(Mods::SHIFT))
        }
        ModifyOtherKeys::All => !(mods - Mods::SHIFT).is_empty(),
    }
}

/// `CSI 27 ; m ; code ~`
fn write_modify_other_keys(out: &mut SequenceWriter, mods: Mods, code: u32) {
    out.csi()
        .bytes(b"27;")
        .number(mods.csi_param())
        .byte(b';')
        .number(code)
        .byte(b'~');
}

fn write_text(out: &mut SequenceWriter, text: &str, alt: bool) {
    if text.is_empty() {
        return;
    }
    if alt {
        out.esc();
    }
    out.text(text);
}

/// The single character the event types: its text if that is exactly one
/// character, otherwise the key's own character.
fn text_char(event: &KeyEvent) -> Option<char> {
    if let Some(text) = event.text() {
        let mut chars = text.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(ch);
        }
    }
    event.key.typed_char(event.mods)
}
