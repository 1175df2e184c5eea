//! Key encoder instance.

use std::cell::Cell;
use std::marker::PhantomData;

use tracing::{debug, trace};
use vtinput_core::{EncodeError, EncoderConfig, Error, KeyEvent, Protocol, Result, MAX_TEXT_BYTES};

use crate::sequence::{EncodedSequence, SequenceWriter, MAX_SEQUENCE_LEN};
use crate::{kitty, legacy};

/// Converts key events into the bytes a terminal application expects.
///
/// Output depends only on the event and the current configuration. The
/// encoder can move between threads but is not shared between them.
#[derive(Debug)]
pub struct KeyEncoder {
    config: EncoderConfig,
    _not_sync: PhantomData<Cell<()>>,
}

impl KeyEncoder {
    /// Encoder with the default configuration (legacy xterm encoding).
    pub fn new() -> Self {
        Self::from_validated(EncoderConfig::default())
    }

    /// Encoder with a validated configuration.
    pub fn with_config(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EncoderConfig) -> Self {
        debug!(
            protocol = ?config.protocol,
            kitty_flags = config.kitty_flags.bits(),
            "Creating key encoder"
        );
        Self {
            config,
            _not_sync: PhantomData,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Replace the configuration, e.g. after the application toggles a
    /// terminal mode. The old configuration stays in place on error.
    pub fn set_config(&mut self, config: EncoderConfig) -> Result<()> {
        config.validate()?;
        debug!(protocol = ?config.protocol, "Updating key encoder configuration");
        self.config = config;
        Ok(())
    }

    /// Encode one key event.
    ///
    /// An empty sequence means the event produces no input for the
    /// application (for example a key release without release reporting).
    pub fn encode(&self, event: &KeyEvent) -> Result<EncodedSequence> {
        if let Some(text) = event.text() {
            if text.len() > MAX_TEXT_BYTES {
                return Err(EncodeError::TextTooLong {
                    len: text.len(),
                    max: MAX_TEXT_BYTES,
                }
                .into());
            }
        }

        let mut out = SequenceWriter::new();
        match self.config.protocol {
            Protocol::Legacy => legacy::encode(event, &self.config, &mut out),
            Protocol::Kitty => kitty::encode(
                event,
                &self.config,
                self.config.active_kitty_flags(),
                &mut out,
            ),
        }
        let seq = out.finish();
        debug_assert!(seq.len() <= MAX_SEQUENCE_LEN);

        trace!(
            key = %event.key,
            mods = event.mods.bits(),
            action = ?event.action,
            len = seq.len(),
            "Encoded key event"
        );
        Ok(seq)
    }

    /// Encode into a caller-provided buffer, returning the number of bytes
    /// written. Nothing is written when the buffer is too small.
    pub fn encode_into(&self, event: &KeyEvent, buf: &mut [u8]) -> Result<usize> {
        let seq = self.encode(event)?;
        if seq.len() > buf.len() {
            return Err(Error::BufferTooSmall {
                needed: seq.len(),
                capacity: buf.len(),
            });
        }
        buf[..seq.len()].copy_from_slice(&seq);
        Ok(seq.len())
    }
}

impl Default for KeyEncoder {
    fn default() -> Self {
        Self::new()
    }
}
