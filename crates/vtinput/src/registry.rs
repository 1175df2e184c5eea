//! Handle registry for callers that can only hold integers.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vtinput_core::{EncoderConfig, Error, Result};
use vtinput_encoder::KeyEncoder;

/// Configuration for the encoder registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of live encoders
    pub max_encoders: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_encoders: 64 }
    }
}

/// Opaque reference to an encoder in an [`EncoderRegistry`].
///
/// The raw form packs the slot index in the low 32 bits and the slot
/// generation in the high 32 bits. Generations start at 1, so `0` is never a
/// valid handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderHandle(u64);

impl EncoderHandle {
    fn new(index: u32, generation: u32) -> Self {
        Self((u64::from(generation) << 32) | u64::from(index))
    }

    /// Integer form for passing across a language boundary.
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Rebuild a handle from its integer form. `0` is rejected; any other
    /// value is checked against the registry on use.
    pub fn from_raw(raw: u64) -> Option<Self> {
        (raw >> 32 != 0).then_some(Self(raw))
    }

    fn index(self) -> usize {
        (self.0 & 0xFFFF_FFFF) as usize
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Display for EncoderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index(), self.generation())
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    encoder: Option<KeyEncoder>,
}

/// Owns key encoders and hands out generation-checked handles.
///
/// A handle stops working as soon as its encoder is destroyed, even if the
/// slot is reused: use-after-destroy is [`Error::StaleHandle`], never another
/// caller's encoder.
#[derive(Debug)]
pub struct EncoderRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    config: RegistryConfig,
}

impl EncoderRegistry {
    /// Create a registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            config,
        }
    }

    /// Create an encoder, with the default configuration when `config` is
    /// `None`.
    pub fn create(&mut self, config: Option<EncoderConfig>) -> Result<EncoderHandle> {
        if self.live >= self.config.max_encoders {
            return Err(Error::EncoderLimitReached(self.config.max_encoders));
        }

        let encoder = match config {
            Some(config) => KeyEncoder::with_config(config)?,
            None => KeyEncoder::new(),
        };

        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.encoder = Some(encoder);
                EncoderHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 1,
                    encoder: Some(encoder),
                });
                EncoderHandle::new(index, 1)
            }
        };
        self.live += 1;

        debug!(handle = %handle, live = self.live, "Created encoder");
        Ok(handle)
    }

    /// Destroy an encoder. Its handle, and every copy of it, becomes stale.
    pub fn destroy(&mut self, handle: EncoderHandle) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        slot.encoder = None;
        slot.generation = match slot.generation.wrapping_add(1) {
            0 => 1,
            next => next,
        };
        self.free.push(handle.index() as u32);
        self.live -= 1;

        debug!(handle = %handle, live = self.live, "Destroyed encoder");
        Ok(())
    }

    /// Borrow the encoder behind `handle`.
    pub fn get(&self, handle: EncoderHandle) -> Result<&KeyEncoder> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.encoder.as_ref())
            .ok_or(Error::StaleHandle(handle.to_raw()))
    }

    /// Mutably borrow the encoder behind `handle`.
    pub fn get_mut(&mut self, handle: EncoderHandle) -> Result<&mut KeyEncoder> {
        self.slot_mut(handle)?
            .encoder
            .as_mut()
            .ok_or(Error::StaleHandle(handle.to_raw()))
    }

    /// Number of live encoders.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when no encoder is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn slot_mut(&mut self, handle: EncoderHandle) -> Result<&mut Slot> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation() && slot.encoder.is_some())
            .ok_or(Error::StaleHandle(handle.to_raw()))
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
