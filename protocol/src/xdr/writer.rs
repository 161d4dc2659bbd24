//! Append-only XDR output buffer.

use super::error::XdrError;

/// Accumulates XDR-encoded bytes.
///
/// Writing never fails on its own; the only encode-time error is a value
/// whose length exceeds the maximum its XDR declaration allows, which would
/// otherwise produce bytes no decoder accepts.
#[derive(Debug, Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn pad(&mut self, n: usize) {
        let padding = (4 - n % 4) % 4;
        self.buf.extend(std::iter::repeat(0u8).take(padding));
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_i32(v as i32);
    }

    pub fn write_discriminant(&mut self, v: i32) {
        self.write_i32(v);
    }

    /// Fixed-length opaque, zero-padded to a 4-byte boundary.
    pub fn write_fixed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.pad(bytes.len());
    }

    /// Variable-length opaque: u32 length, bytes, zero padding.
    pub fn write_var_opaque(&mut self, bytes: &[u8], max: usize) -> Result<(), XdrError> {
        self.write_len(bytes.len(), max)?;
        self.write_fixed(bytes);
        Ok(())
    }

    pub fn write_string(&mut self, s: &str, max: usize) -> Result<(), XdrError> {
        self.write_var_opaque(s.as_bytes(), max)
    }

    /// Array element count, checked against the declared maximum.
    pub fn write_len(&mut self, len: usize, max: usize) -> Result<(), XdrError> {
        if len > max {
            return Err(XdrError::LengthExceedsMax {
                len,
                max,
                offset: self.buf.len(),
            });
        }
        self.write_u32(len as u32);
        Ok(())
    }
}
