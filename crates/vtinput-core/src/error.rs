//! Error types for vtinput.

use thiserror::Error;

/// Errors raised while building or validating an [`EncoderConfig`](crate::EncoderConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Kitty flags were requested while the legacy protocol is selected
    #[error("kitty flags {0:#04x} require the kitty protocol")]
    KittyFlagsWithoutKitty(u8),

    /// The kitty protocol was selected without any progressive enhancement flag
    #[error("kitty protocol selected with no flags")]
    EmptyKittyFlags,

    /// modifyOtherKeys and the kitty protocol cannot be active together
    #[error("modifyOtherKeys cannot be combined with the kitty protocol")]
    ModifyOtherKeysWithKitty,

    /// Associated text reporting only exists on top of report-all-keys
    #[error("report_associated_text requires report_all_keys_as_escape_codes")]
    AssociatedTextWithoutAllKeys,

    /// Raw flag bits outside the kitty protocol's defined set
    #[error("unknown kitty flag bits: {0:#04x}")]
    UnknownKittyFlags(u8),

    /// Configuration text could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Errors raised for a single key event. The encoder stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Key identity outside the closed key vocabulary
    #[error("unknown key id: {0}")]
    UnknownKey(u16),

    /// Key name that does not parse to any key
    #[error("unknown key name: {0}")]
    UnknownKeyName(String),

    /// Action value outside press/release/repeat
    #[error("unknown key action: {0}")]
    UnknownAction(u8),

    /// Modifier bits outside the defined set
    #[error("unknown modifier bits: {0:#06x}")]
    UnknownModifiers(u16),

    /// Text payload is not valid UTF-8
    #[error("text payload is not valid UTF-8 (at byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid prefix
        valid_up_to: usize,
    },

    /// Text payload longer than [`MAX_TEXT_BYTES`](crate::MAX_TEXT_BYTES)
    #[error("text payload too long: {len} bytes (max: {max})")]
    TextTooLong {
        /// Payload length
        len: usize,
        /// Maximum accepted length
        max: usize,
    },
}

/// Main error type for vtinput operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid or contradictory encoder configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed key event
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Caller-supplied output buffer cannot hold the sequence
    #[error("Output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall {
        /// Bytes the sequence needs
        needed: usize,
        /// Bytes the caller supplied
        capacity: usize,
    },

    /// Handle refers to a destroyed (or never created) encoder
    #[error("Stale encoder handle: {0:#018x}")]
    StaleHandle(u64),

    /// Encoder registry is full
    #[error("Encoder limit reached (max: {0})")]
    EncoderLimitReached(usize),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
