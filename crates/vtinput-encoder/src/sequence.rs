//! Output buffer for encoded key sequences.

use std::ops::Deref;

/// Upper bound on the length of any sequence the encoder produces.
///
/// The longest legal output is a kitty `CSI ... u` report carrying a
/// seven-digit key code, a seven-digit alternate code, modifiers, event type
/// and up to [`MAX_TEXT_BYTES`](vtinput_core::MAX_TEXT_BYTES) of associated
/// text as decimal code points, which stays well below this.
pub const MAX_SEQUENCE_LEN: usize = 256;

/// Bytes to send to the terminal application for one key event.
///
/// An empty sequence is a valid result: the event needs no transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedSequence(Vec<u8>);

impl EncodedSequence {
    /// Empty sequence.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Borrow the bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for EncodedSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for EncodedSequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<EncodedSequence> for Vec<u8> {
    fn from(seq: EncodedSequence) -> Self {
        seq.0
    }
}

/// Incremental writer for escape sequences.
#[derive(Debug, Default)]
pub(crate) struct SequenceWriter {
    buf: Vec<u8>,
}

impl SequenceWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::with_capacity(16),
        }
    }

    pub(crate) fn byte(&mut self, byte: u8) -> &mut Self {
        self.buf.push(byte);
        self
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub(crate) fn esc(&mut self) -> &mut Self {
        self.byte(0x1b)
    }

    /// `ESC [`
    pub(crate) fn csi(&mut self) -> &mut Self {
        self.bytes(b"\x1b[")
    }

    /// `ESC O`
    pub(crate) fn ss3(&mut self) -> &mut Self {
        self.bytes(b"\x1bO")
    }

    pub(crate) fn text(&mut self, text: &str) -> &mut Self {
        self.bytes(text.as_bytes())
    }

    pub(crate) fn char(&mut self, ch: char) -> &mut Self {
        let mut utf8 = [0u8; 4];
        self.bytes(ch.encode_utf8(&mut utf8).as_bytes())
    }

    /// Decimal digits of `value`.
    pub(crate) fn number(&mut self, value: u32) -> &mut Self {
        let mut digits = [0u8; 10];
        let mut len = 0;
        let mut rest = value;
        loop {
            digits[len] = b'0' + (rest % 10) as u8;
            len += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        for &digit in digits[..len].iter().rev() {
            self.buf.push(digit);
        }
        self
    }

    pub(crate) fn finish(self) -> EncodedSequence {
        EncodedSequence(self.buf)
    }
}
