//! Byte scanner driving the `vte` state machine over pasted content.

use vte::{Params, Perform};

use crate::hazard::{HazardKind, PasteHazard};
use crate::rules::PasteRules;

const ESC: u8 = 0x1b;

/// OSC strings still open after this many bytes are flagged without waiting
/// for the terminator.
const MAX_OSC_LEN: usize = 1024;

/// Scan `bytes` and return the first hazard, if any.
pub(crate) fn scan(bytes: &[u8], rules: &PasteRules) -> Option<PasteHazard> {
    let mut parser = vte::Parser::new();
    let mut scanner = Scanner::new(rules);

    let mut rest = bytes;
    let mut base = 0;
    while !rest.is_empty() {
        // vte maps malformed UTF-8 to U+FFFD and may swallow the byte that
        // follows it, so only well-formed runs reach the parser.
        let (valid, invalid) = match std::str::from_utf8(rest) {
            Ok(_) => (rest.len(), 0),
            Err(e) => {
                let valid = e.valid_up_to();
                (valid, e.error_len().unwrap_or(rest.len() - valid))
            }
        };

        for (i, &byte) in rest[..valid].iter().enumerate() {
            scanner.feed(&mut parser, base + i, byte);
            if scanner.hazard.is_some() {
                return scanner.hazard;
            }
        }
        for (i, &byte) in rest[valid..valid + invalid].iter().enumerate() {
            if (0x80..=0x9f).contains(&byte) {
                return Some(PasteHazard {
                    kind: HazardKind::C1Control(byte),
                    offset: base + valid + i,
                });
            }
        }

        base += valid + invalid;
        rest = &rest[valid + invalid..];
    }

    scanner.finish()
}

/// `vte` performer that records the first hazard.
struct Scanner<'a> {
    rules: &'a PasteRules,
    /// Offset of the byte being fed
    offset: usize,
    /// Offset of the most recent ESC
    seq_start: usize,
    /// An escape sequence has started and not yet dispatched
    open: bool,
    /// Start of the OSC string being collected
    osc_start: Option<usize>,
    prev: Option<u8>,
    hazard: Option<PasteHazard>,
}

impl<'a> Scanner<'a> {
    fn new(rules: &'a PasteRules) -> Self {
        Self {
            rules,
            offset: 0,
            seq_start: 0,
            open: false,
            osc_start: None,
            prev: None,
            hazard: None,
        }
    }

    fn feed(&mut self, parser: &mut vte::Parser, offset: usize, byte: u8) {
        self.offset = offset;

        if byte == ESC && self.rules.reject_escape {
            self.flag(HazardKind::Escape, offset);
            return;
        }

        if self.prev == Some(ESC) {
            match byte {
                // vte consumes SOS/PM/APC strings without reporting them.
                b'X' | b'^' | b'_' => {
                    self.flag(HazardKind::ApplicationString, self.seq_start);
                    return;
                }
                // A malformed DCS header sends vte to DcsIgnore without a hook.
                b'P' => {
                    self.flag(HazardKind::DeviceControlString, self.seq_start);
                    return;
                }
                b']' => self.osc_start = Some(self.seq_start),
                _ => {}
            }
        }

        parser.advance(self, byte);

        if byte == ESC {
            self.open = true;
            self.seq_start = offset;
        }

        if let Some(start) = self.osc_start {
            if offset - start >= MAX_OSC_LEN {
                self.flag(HazardKind::OperatingSystemCommand { code: None }, start);
            }
        }

        self.prev = Some(byte);
    }

    fn flag(&mut self, kind: HazardKind, offset: usize) {
        if self.hazard.is_none() {
            self.hazard = Some(PasteHazard { kind, offset });
        }
    }

    fn finish(self) -> Option<PasteHazard> {
        if self.hazard.is_some() {
            return self.hazard;
        }
        self.open.then_some(PasteHazard {
            kind: HazardKind::UnterminatedSequence,
            offset: self.seq_start,
        })
    }
}

impl Perform for Scanner<'_> {
    fn print(&mut self, c: char) {
        // NEL is the one C1 control that is plain text in practice.
        if ('\u{80}'..='\u{9f}').contains(&c) && c != '\u{85}' {
            let start = self.offset + 1 - c.len_utf8();
            self.flag(HazardKind::C1Control(c as u32 as u8), start);
        }
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            // CAN and SUB abort a sequence in progress.
            0x18 | 0x1a => self.open = false,
            b'\n' | b'\r' if self.rules.reject_newlines => {
                self.flag(HazardKind::Newline, self.offset);
            }
            _ => {}
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {
        self.flag(HazardKind::DeviceControlString, self.seq_start);
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        let code = params
            .first()
            .and_then(|p| std::str::from_utf8(p).ok())
            .and_then(|s| s.parse::<u16>().ok());
        let start = self.osc_start.take().unwrap_or(self.seq_start);
        self.open = false;
        self.flag(HazardKind::OperatingSystemCommand { code }, start);
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, c: char) {
        self.open = false;

        let first = params.iter().next().and_then(|p| p.first().copied());
        match (intermediates, c) {
            ([], '~') if matches!(first, Some(200) | Some(201)) => {
                self.flag(HazardKind::BracketedPasteMarker, self.seq_start);
            }
            ([b'?'], 'h' | 'l') if params.iter().any(|p| p.first() == Some(&2004)) => {
                self.flag(HazardKind::BracketedPasteModeToggle, self.seq_start);
            }
            _ => {}
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {
        self.open = false;
    }
}
