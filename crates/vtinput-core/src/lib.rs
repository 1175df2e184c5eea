//! # vtinput-core
//!
//! Core types for vtinput.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other vtinput crates. It provides:
//!
//! - The closed key vocabulary with stable numeric ids
//! - Modifier bitmask and key actions
//! - Key events as consumed by the encoder
//! - Encoder configuration (protocol mode, kitty flags, terminal modes)
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - the encoder, paste classifier and
//! facade crates depend on this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod key;
pub mod mods;

// Re-export commonly used types
pub use config::{EncoderConfig, KittyFlags, ModifyOtherKeys, Protocol};
pub use error::{ConfigError, EncodeError, Error, Result};
pub use event::{KeyAction, KeyEvent, MAX_TEXT_BYTES};
pub use key::Key;
pub use mods::Mods;
