//! # vtinput-encoder
//!
//! Converts key events into terminal input byte sequences.
//!
//! This crate provides:
//!
//! - [`KeyEncoder`]: an owned encoder bound to one [`EncoderConfig`]
//! - xterm-compatible legacy encoding (CSI/SS3 sequences, C0 control codes,
//!   Alt as ESC prefix, `modifyOtherKeys`)
//! - Kitty keyboard protocol encoding (`CSI ... u`) for every progressive
//!   enhancement flag
//!
//! ## Example
//!
//! ```
//! use vtinput_core::{KeyEvent, Key, Mods};
//! use vtinput_encoder::KeyEncoder;
//!
//! let encoder = KeyEncoder::new();
//! let seq = encoder.encode(&KeyEvent::press(Key::ArrowUp)).unwrap();
//! assert_eq!(seq.as_bytes(), b"\x1b[A");
//!
//! let seq = encoder
//!     .encode(&KeyEvent::press(Key::KeyC).with_mods(Mods::CTRL))
//!     .unwrap();
//! assert_eq!(seq.as_bytes(), b"\x03");
//! ```
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - depends on `vtinput-core`.
//!
//! [`EncoderConfig`]: vtinput_core::EncoderConfig

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoder;
mod kitty;
mod legacy;
pub mod sequence;
mod table;

pub use encoder::KeyEncoder;
pub use sequence::{EncodedSequence, MAX_SEQUENCE_LEN};
