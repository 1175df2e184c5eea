//! Optional stricter paste rules.

use serde::{Deserialize, Serialize};

/// Extra restrictions on top of the escape sequence checks.
///
/// Both rules default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteRules {
    /// Reject LF and CR: a multi-line paste runs commands in a shell
    pub reject_newlines: bool,
    /// Reject any ESC byte, even in harmless sequences such as SGR
    pub reject_escape: bool,
}

impl PasteRules {
    /// Both rules on.
    pub fn strict() -> Self {
        Self {
            reject_newlines: true,
            reject_escape: true,
        }
    }
}
