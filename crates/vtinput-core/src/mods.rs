//! Modifier state carried by a key event.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

bitflags! {
    /// Modifier bitmask.
    ///
    /// Bit values are part of the stable external interface.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Mods: u16 {
        /// Shift
        const SHIFT     = 0b0000_0001;
        /// Control
        const CTRL      = 0b0000_0010;
        /// Alt / Option
        const ALT       = 0b0000_0100;
        /// Super / Command / Windows
        const SUPER     = 0b0000_1000;
        /// Caps Lock is on
        const CAPS_LOCK = 0b0001_0000;
        /// Num Lock is on
        const NUM_LOCK  = 0b0010_0000;
    }
}

impl Mods {
    /// Lock modifiers.
    pub const LOCKS: Mods = Mods::CAPS_LOCK.union(Mods::NUM_LOCK);

    /// Validate raw modifier bits coming from outside the crate.
    pub fn from_raw(bits: u16) -> Result<Self, EncodeError> {
        Mods::from_bits(bits).ok_or(EncodeError::UnknownModifiers(bits))
    }

    /// Modifiers without the lock state.
    pub fn without_locks(self) -> Self {
        self - Mods::LOCKS
    }

    /// xterm modifier parameter: 1 + (shift=1, alt=2, ctrl=4, super=8).
    ///
    /// Lock state is not part of the xterm encoding.
    pub fn csi_param(self) -> u32 {
        let mut bits = 0;
        if self.contains(Mods::SHIFT) {
            bits |= 1;
        }
        if self.contains(Mods::ALT) {
            bits |= 2;
        }
        if self.contains(Mods::CTRL) {
            bits |= 4;
        }
        if self.contains(Mods::SUPER) {
            bits |= 8;
        }
        1 + bits
    }

    /// Kitty modifier parameter: the xterm bits plus caps_lock=64 and
    /// num_lock=128, plus 1.
    pub fn kitty_param(self) -> u32 {
        let mut value = self.csi_param();
        if self.contains(Mods::CAPS_LOCK) {
            value += 64;
        }
        if self.contains(Mods::NUM_LOCK) {
            value += 128;
        }
        value
    }
}
