//! Paste verdicts and the hazards that cause them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Class of dangerous content found in a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// `CSI 200 ~` or `CSI 201 ~`: could end bracketed paste early and run
    /// the rest as typed input
    BracketedPasteMarker,
    /// `CSI ? 2004 h` / `CSI ? 2004 l`
    BracketedPasteModeToggle,
    /// Any complete OSC. `code` is its numeric selector when it has one.
    OperatingSystemCommand {
        /// Leading numeric parameter (0 title, 52 clipboard, 8 hyperlink, ...)
        code: Option<u16>,
    },
    /// DCS string
    DeviceControlString,
    /// SOS, PM or APC string
    ApplicationString,
    /// C1 control character (0x80-0x9F), encoded or raw
    C1Control(u8),
    /// Input ends inside an escape sequence
    UnterminatedSequence,
    /// LF or CR, when newlines are rejected
    Newline,
    /// ESC, when escapes are rejected
    Escape,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::BracketedPasteMarker => f.write_str("bracketed paste marker"),
            HazardKind::BracketedPasteModeToggle => f.write_str("bracketed paste mode toggle"),
            HazardKind::OperatingSystemCommand { code: Some(code) } => write!(f, "OSC {code}"),
            HazardKind::OperatingSystemCommand { code: None } => f.write_str("OSC"),
            HazardKind::DeviceControlString => f.write_str("DCS string"),
            HazardKind::ApplicationString => f.write_str("SOS/PM/APC string"),
            HazardKind::C1Control(byte) => write!(f, "C1 control {byte:#04x}"),
            HazardKind::UnterminatedSequence => f.write_str("unterminated escape sequence"),
            HazardKind::Newline => f.write_str("newline"),
            HazardKind::Escape => f.write_str("escape"),
        }
    }
}

/// Where and what the first hazard in a paste is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PasteHazard {
    /// Hazard class
    pub kind: HazardKind,
    /// Byte offset of the start of the offending sequence
    pub offset: usize,
}

/// Outcome of classifying a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteVerdict {
    /// Nothing dangerous found
    Safe,
    /// The paste contains at least this hazard
    Unsafe(PasteHazard),
}

impl PasteVerdict {
    /// True for [`PasteVerdict::Safe`].
    pub fn is_safe(&self) -> bool {
        matches!(self, PasteVerdict::Safe)
    }

    /// First hazard found, if any.
    pub fn hazard(&self) -> Option<&PasteHazard> {
        match self {
            PasteVerdict::Safe => None,
            PasteVerdict::Unsafe(hazard) => Some(hazard),
        }
    }
}
