//! # vtinput-paste
//!
//! Paste-safety classifier.
//!
//! Decides whether text about to be pasted into a terminal could inject
//! control sequences: a fake end-of-paste marker, mode toggles, OSC/DCS/APC
//! strings, C1 controls, or a dangling escape sequence. Parsing uses the
//! `vte` state machine, so sequences are recognised the way a terminal would
//! recognise them rather than by substring search.
//!
//! ## Example
//!
//! ```
//! use vtinput_paste::{classify, is_paste_safe, HazardKind};
//!
//! assert!(is_paste_safe(b"git status"));
//! assert!(!is_paste_safe(b"echo \x1b[201~; rm -rf ~"));
//!
//! let verdict = classify(b"\x1b]52;c;aGk=\x07");
//! assert_eq!(
//!     verdict.hazard().map(|h| h.kind),
//!     Some(HazardKind::OperatingSystemCommand { code: Some(52) })
//! );
//! ```
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture. It has no internal dependencies and
//! never fails: every input gets a verdict.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hazard;
pub mod rules;
mod scanner;

use tracing::debug;

pub use hazard::{HazardKind, PasteHazard, PasteVerdict};
pub use rules::PasteRules;

/// True when `bytes` can be pasted without risk of escape injection.
pub fn is_paste_safe(bytes: &[u8]) -> bool {
    classify(bytes).is_safe()
}

/// Classify `bytes` with the default rules.
pub fn classify(bytes: &[u8]) -> PasteVerdict {
    classify_with(bytes, &PasteRules::default())
}

/// Classify `bytes`, stopping at the first hazard.
pub fn classify_with(bytes: &[u8], rules: &PasteRules) -> PasteVerdict {
    match scanner::scan(bytes, rules) {
        None => PasteVerdict::Safe,
        Some(hazard) => {
            debug!(
                kind = %hazard.kind,
                offset = hazard.offset,
                len = bytes.len(),
                "Paste classified unsafe"
            );
            PasteVerdict::Unsafe(hazard)
        }
    }
}
