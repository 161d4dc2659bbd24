//! Forward-only XDR cursor.

use super::error::XdrError;
use crate::config::MAX_XDR_DEPTH;

/// Reads XDR primitives from a byte slice, maintaining a cursor position.
///
/// There is no backtracking: every `read_*` either consumes exactly the
/// bytes of one value or fails. A failed read leaves the reader in an
/// unspecified position, and callers are expected to abandon the decode.
pub struct XdrReader<'a> {
    input: &'a [u8],
    pos: usize,
    depth: u32,
}

impl<'a> XdrReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unconsumed portion of the input buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Fails with `TrailingBytes` unless the whole input was consumed.
    pub fn finish(&self) -> Result<(), XdrError> {
        let remaining = self.input.len() - self.pos;
        if remaining != 0 {
            return Err(XdrError::TrailingBytes {
                offset: self.pos,
                remaining,
            });
        }
        Ok(())
    }

    /// Consume exactly `n` bytes.
    fn take(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        let available = self.input.len() - self.pos;
        if n > available {
            return Err(XdrError::UnexpectedEndOfData {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume the 0-3 zero bytes that follow `n` bytes of opaque data.
    fn skip_padding(&mut self, n: usize) -> Result<(), XdrError> {
        let padding = (4 - n % 4) % 4;
        let offset = self.pos;
        let bytes = self.take(padding)?;
        if bytes.iter().any(|b| *b != 0) {
            return Err(XdrError::InvalidPadding { offset });
        }
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Booleans are an i32 that must be exactly 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        let offset = self.pos;
        match self.read_i32()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(XdrError::InvalidBoolValue { offset, value }),
        }
    }

    /// Reads a union discriminant. Pair with [`unknown`](Self::unknown)
    /// in the fallback arm of the caller's `match`.
    pub fn read_discriminant(&mut self) -> Result<i32, XdrError> {
        self.read_i32()
    }

    /// Builds the error for a discriminant that was just read and matched
    /// no arm of `type_name`.
    pub fn unknown(&self, type_name: &'static str, value: i32) -> XdrError {
        XdrError::UnknownDiscriminant {
            type_name,
            value,
            offset: self.pos.saturating_sub(4),
        }
    }

    /// Fixed-length opaque: `N` bytes then zero padding to a 4-byte boundary.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let out = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(out)
    }

    /// Variable-length opaque with a declared maximum.
    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>, XdrError> {
        let offset = self.pos;
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max, offset });
        }
        let data = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(data)
    }

    /// `string<max>`; must be valid UTF-8.
    pub fn read_string(&mut self, max: usize) -> Result<String, XdrError> {
        let offset = self.pos;
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8 { offset })
    }

    /// Array element count with a declared maximum.
    ///
    /// Every XDR item occupies at least four bytes, so a count that could
    /// not possibly fit in the remaining input is rejected before anything
    /// gets allocated for it.
    pub fn read_len(&mut self, max: usize) -> Result<usize, XdrError> {
        let offset = self.pos;
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max, offset });
        }
        let available = self.input.len() - self.pos;
        if len.saturating_mul(4) > available {
            return Err(XdrError::UnexpectedEndOfData {
                offset: self.pos,
                needed: len.saturating_mul(4),
                available,
            });
        }
        Ok(len)
    }

    /// Runs `f` one nesting level deeper, failing once the depth ceiling
    /// is reached. Recursive types wrap their child reads in this.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, XdrError>,
    ) -> Result<T, XdrError> {
        if self.depth >= MAX_XDR_DEPTH {
            return Err(XdrError::DepthLimitExceeded { max: MAX_XDR_DEPTH });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let bytes = [
            0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xFF, 0xFF, 0xFE, 0, 0, 0, 0, 0, 0, 0, 7,
        ];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_u64().unwrap(), 7);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn bool_must_be_zero_or_one() {
        let mut r = XdrReader::new(&[0, 0, 0, 1, 0, 0, 0, 2]);
        assert!(r.read_bool().unwrap());
        assert_eq!(
            r.read_bool(),
            Err(XdrError::InvalidBoolValue {
                offset: 4,
                value: 2
            })
        );
    }

    #[test]
    fn truncated_input_rejected() {
        let mut r = XdrReader::new(&[0, 0, 1]);
        assert_eq!(
            r.read_u32(),
            Err(XdrError::UnexpectedEndOfData {
                offset: 0,
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn var_opaque_padding() {
        let mut r = XdrReader::new(&[0, 0, 0, 3, b'a', b'b', b'c', 0]);
        assert_eq!(r.read_var_opaque(8).unwrap(), b"abc");
        assert!(r.finish().is_ok());

        let mut r = XdrReader::new(&[0, 0, 0, 3, b'a', b'b', b'c', 9]);
        assert_eq!(r.read_var_opaque(8), Err(XdrError::InvalidPadding { offset: 7 }));
    }

    #[test]
    fn var_opaque_length_checks() {
        let mut r = XdrReader::new(&[0, 0, 0, 9, 1, 2, 3, 4]);
        assert_eq!(
            r.read_var_opaque(8),
            Err(XdrError::LengthExceedsMax {
                len: 9,
                max: 8,
                offset: 0
            })
        );

        // Declared length runs past the end of the buffer.
        let mut r = XdrReader::new(&[0, 0, 0, 8, 1, 2, 3, 4]);
        assert!(matches!(
            r.read_var_opaque(64),
            Err(XdrError::UnexpectedEndOfData { .. })
        ));
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut r = XdrReader::new(&[0, 0, 0, 2, 0xC3, 0x28, 0, 0]);
        assert_eq!(r.read_string(28), Err(XdrError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn fixed_opaque_with_padding() {
        let mut r = XdrReader::new(&[1, 2, 3, 4, 5, 0, 0, 0]);
        assert_eq!(r.read_fixed::<5>().unwrap(), [1, 2, 3, 4, 5]);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn array_count_bounded_by_input() {
        let mut r = XdrReader::new(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(
            r.read_len(usize::MAX),
            Err(XdrError::UnexpectedEndOfData { .. })
        ));
    }

    #[test]
    fn trailing_bytes_detected() {
        let r = XdrReader::new(&[0, 0, 0, 0]);
        assert_eq!(
            r.finish(),
            Err(XdrError::TrailingBytes {
                offset: 0,
                remaining: 4
            })
        );
    }

    #[test]
    fn nesting_past_ceiling_rejected() {
        fn recurse(r: &mut XdrReader<'_>) -> Result<(), XdrError> {
            r.nested(recurse)
        }
        let mut r = XdrReader::new(&[]);
        assert_eq!(
            recurse(&mut r),
            Err(XdrError::DepthLimitExceeded { max: MAX_XDR_DEPTH })
        );
    }
}
