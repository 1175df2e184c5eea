//! # vtinput
//!
//! Terminal key-input encoder and paste-safety classifier.
//!
//! This is the facade crate. It re-exports the core types, the encoder and
//! the classifier, and adds:
//!
//! - [`EncoderRegistry`]: generation-checked integer handles for callers on
//!   the far side of a language boundary
//! - [`bridge`]: the flat create / destroy / encode / paste-check call shapes
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Example
//!
//! ```
//! use vtinput::{bridge, EncoderRegistry, Key, Mods};
//!
//! let mut registry = EncoderRegistry::new();
//! let handle = bridge::create_encoder(&mut registry, None).unwrap();
//!
//! let seq = bridge::encode_raw(
//!     &registry,
//!     handle.to_raw(),
//!     1,
//!     Key::KeyD.id(),
//!     Mods::CTRL.bits(),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(seq.as_bytes(), b"\x04");
//!
//! assert!(bridge::is_paste_safe(b"ls"));
//! bridge::destroy_encoder(&mut registry, handle).unwrap();
//! ```
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - depends on `vtinput-core`,
//! `vtinput-encoder` and `vtinput-paste`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod logging;
pub mod registry;

pub use registry::{EncoderHandle, EncoderRegistry, RegistryConfig};

pub use vtinput_core::{
    ConfigError, EncodeError, EncoderConfig, Error, Key, KeyAction, KeyEvent, KittyFlags,
    ModifyOtherKeys, Mods, Protocol, Result, MAX_TEXT_BYTES,
};
pub use vtinput_encoder::{EncodedSequence, KeyEncoder, MAX_SEQUENCE_LEN};
pub use vtinput_paste::{
    classify, classify_with, is_paste_safe, HazardKind, PasteHazard, PasteRules, PasteVerdict,
};
