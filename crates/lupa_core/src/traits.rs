//! The byte-cursor abstraction the marker parser reads through.
//!
//! Implementations live next to their storage medium (see `lupa_io`); the
//! parser itself only ever consumes bytes forward, one pass, no rewinds.

use crate::Result;

/// A forward-only cursor over raw image bytes.
///
/// # Skip semantics
///
/// `skip` must not eagerly validate bounds: a seekable source may accept a
/// skip past its end, in which case the failure surfaces on the *next*
/// read. Callers rely on this to skip declared segment payloads without
/// knowing whether the source is truncated.
pub trait ByteSource {
    /// Reads one byte, failing when the source is exhausted.
    fn read_u8(&mut self) -> Result<u8>;

    /// Advances the cursor by `n` bytes without inspecting their content.
    fn skip(&mut self, n: u16) -> Result<()>;

    /// Reads two bytes and combines them big-endian.
    ///
    /// Fails with an I/O error if either byte is unavailable.
    fn read_u16_be(&mut self) -> Result<u16> {
        let hi = self.read_u8()?;
        let lo = self.read_u8()?;
        Ok(u16::from_be_bytes([hi, lo]))
    }
}

impl ByteSource for &[u8] {
    fn read_u8(&mut self) -> Result<u8> {
        match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Ok(byte)
            }
            None => Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()),
        }
    }

    fn skip(&mut self, n: u16) -> Result<()> {
        // A slice cannot hold a position past its end; clamping keeps the
        // lazy-failure contract since the next read still fails.
        let n = (n as usize).min(self.len());
        *self = &self[n..];
        Ok(())
    }
}
