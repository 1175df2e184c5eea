//! Flat call shapes for a foreign-function bridge.
//!
//! Every function here takes plain integers and byte slices, so a JNI or C
//! shim only has to marshal arguments and map errors.

use vtinput_core::{EncoderConfig, Error, KeyEvent, Result};
use vtinput_encoder::EncodedSequence;

use crate::registry::{EncoderHandle, EncoderRegistry};

/// Create an encoder and return its handle.
pub fn create_encoder(
    registry: &mut EncoderRegistry,
    config: Option<EncoderConfig>,
) -> Result<EncoderHandle> {
    registry.create(config)
}

/// Destroy an encoder. Destroying twice is [`Error::StaleHandle`].
pub fn destroy_encoder(registry: &mut EncoderRegistry, handle: EncoderHandle) -> Result<()> {
    registry.destroy(handle)
}

/// Replace an encoder's configuration after a terminal mode change.
pub fn set_encoder_config(
    registry: &mut EncoderRegistry,
    handle: EncoderHandle,
    config: EncoderConfig,
) -> Result<()> {
    registry.get_mut(handle)?.set_config(config)
}

/// Encode one key event.
pub fn encode(
    registry: &EncoderRegistry,
    handle: EncoderHandle,
    event: &KeyEvent,
) -> Result<EncodedSequence> {
    registry.get(handle)?.encode(event)
}

/// Encode one key event given as raw integers.
///
/// `action` is 0 release, 1 press, 2 repeat; `key` is a [`Key`] id; `mods`
/// are [`Mods`] bits; `text` is optional UTF-8.
///
/// [`Key`]: vtinput_core::Key
/// [`Mods`]: vtinput_core::Mods
pub fn encode_raw(
    registry: &EncoderRegistry,
    raw_handle: u64,
    action: u8,
    key: u16,
    mods: u16,
    text: Option<&[u8]>,
) -> Result<EncodedSequence> {
    let handle = EncoderHandle::from_raw(raw_handle).ok_or(Error::StaleHandle(raw_handle))?;
    let event = KeyEvent::from_raw(action, key, mods, text)?;
    encode(registry, handle, &event)
}

/// [`encode_raw`] into a caller-owned buffer, returning the byte count.
/// Nothing is written when the buffer is too small.
pub fn encode_raw_into(
    registry: &EncoderRegistry,
    raw_handle: u64,
    action: u8,
    key: u16,
    mods: u16,
    text: Option<&[u8]>,
    out: &mut [u8],
) -> Result<usize> {
    let handle = EncoderHandle::from_raw(raw_handle).ok_or(Error::StaleHandle(raw_handle))?;
    let event = KeyEvent::from_raw(action, key, mods, text)?;
    registry.get(handle)?.encode_into(&event, out)
}

/// True when `bytes` can be pasted without risk of escape injection.
pub fn is_paste_safe(bytes: &[u8]) -> bool {
    vtinput_paste::is_paste_safe(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtinput_core::{EncodeError, Key, KittyFlags, Mods};

    #[test]
    fn test_call_sequence() {
        let mut registry = EncoderRegistry::new();
        let handle = create_encoder(&mut registry, None).unwrap();

        let seq = encode(&registry, handle, &KeyEvent::press(Key::ArrowUp)).unwrap();
        assert_eq!(seq.as_bytes(), b"\x1b[A");

        destroy_encoder(&mut registry, handle).unwrap();
        assert_eq!(
            encode(&registry, handle, &KeyEvent::press(Key::ArrowUp)),
            Err(Error::StaleHandle(handle.to_raw()))
        );
    }

    #[test]
    fn test_encode_raw() {
        let mut registry = EncoderRegistry::new();
        let raw = create_encoder(&mut registry, None).unwrap().to_raw();

        let seq = encode_raw(&registry, raw, 1, Key::KeyC.id(), Mods::CTRL.bits(), None).unwrap();
        assert_eq!(seq.as_bytes(), b"\x03");

        let seq = encode_raw(&registry, raw, 1, Key::KeyE.id(), 0, Some("é".as_bytes())).unwrap();
        assert_eq!(seq.as_bytes(), "é".as_bytes());

        let seq = encode_raw(&registry, raw, 0, Key::KeyC.id(), 0, None).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_encode_raw_rejects_bad_input() {
        let mut registry = EncoderRegistry::new();
        let raw = create_encoder(&mut registry, None).unwrap().to_raw();

        assert_eq!(
            encode_raw(&registry, 0, 1, Key::KeyA.id(), 0, None),
            Err(Error::StaleHandle(0))
        );
        assert_eq!(
            encode_raw(&registry, raw, 1, 9999, 0, None),
            Err(Error::Encode(EncodeError::UnknownKey(9999)))
        );
        assert_eq!(
            encode_raw(&registry, raw, 7, Key::KeyA.id(), 0, None),
            Err(Error::Encode(EncodeError::UnknownAction(7)))
        );
        assert_eq!(
            encode_raw(&registry, raw, 1, Key::KeyA.id(), 0xFF00, None),
            Err(Error::Encode(EncodeError::UnknownModifiers(0xFF00)))
        );
        // The encoder is still usable
        assert!(encode_raw(&registry, raw, 1, Key::KeyA.id(), 0, None).is_ok());
    }

    #[test]
    fn test_encode_raw_into() {
        let mut registry = EncoderRegistry::new();
        let raw = create_encoder(&mut registry, None).unwrap().to_raw();

        let mut buf = [0u8; 16];
        let n = encode_raw_into(&registry, raw, 1, Key::F5.id(), 0, None, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"\x1b[15~");

        let mut small = [0u8; 2];
        assert_eq!(
            encode_raw_into(&registry, raw, 1, Key::F5.id(), 0, None, &mut small),
            Err(Error::BufferTooSmall {
                needed: 5,
                capacity: 2
            })
        );
        assert_eq!(small, [0u8; 2]);
    }

    #[test]
    fn test_set_encoder_config() {
        let mut registry = EncoderRegistry::new();
        let handle = create_encoder(&mut registry, None).unwrap();
        set_encoder_config(
            &mut registry,
            handle,
            EncoderConfig::kitty(KittyFlags::DISAMBIGUATE_ESCAPE_CODES),
        )
        .unwrap();

        let event = KeyEvent::press(Key::Escape);
        assert_eq!(
            encode(&registry, handle, &event).unwrap().as_bytes(),
            b"\x1b[27u"
        );
    }

    #[test]
    fn test_is_paste_safe() {
        assert!(is_paste_safe(b""));
        assert!(is_paste_safe(b"make test"));
        assert!(!is_paste_safe(b"\x1b[201~"));
    }
}
