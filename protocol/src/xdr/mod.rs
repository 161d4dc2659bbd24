//! # XDR Codec
//!
//! The network's canonical binary encoding (RFC 4506 with the network's
//! conventions). Everything is big-endian and 4-byte aligned:
//!
//! - `int`/`unsigned int` are 4 bytes, `hyper` are 8 bytes.
//! - `bool` is an `int` that must be 0 or 1.
//! - `opaque[N]` is N bytes zero-padded to a multiple of 4.
//! - `opaque<M>` and `string<M>` are a u32 length, the bytes, then padding.
//! - `T*` (optional) is a bool followed by the value when it is true.
//! - `T<M>` (array) is a u32 count followed by the items.
//! - A union is an `int` discriminant followed by the selected arm.
//!
//! Every protocol type implements [`WriteXdr`] and [`ReadXdr`] by hand, one
//! function per type, dispatching on the union tag with an exhaustive
//! `match`. There is no reflection and no serde data model in between:
//! the byte layout is exactly what the code says, which is the point.

pub mod error;
pub mod reader;
pub mod writer;

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub use error::XdrError;
pub use reader::XdrReader;
pub use writer::XdrWriter;

/// Types that can be encoded to XDR.
pub trait WriteXdr {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError>;

    /// Encode to a fresh byte vector.
    fn to_xdr(&self) -> Result<Vec<u8>, XdrError> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Encode and wrap in standard (padded) base64, the form envelopes
    /// travel in over HTTP.
    fn to_xdr_base64(&self) -> Result<String, XdrError> {
        Ok(STANDARD.encode(self.to_xdr()?))
    }
}

/// Types that can be decoded from XDR.
pub trait ReadXdr: Sized {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Decode a complete value. Bytes left over after the value are an
    /// error, not something to silently ignore.
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        let mut r = XdrReader::new(bytes);
        let value = Self::read_xdr(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Decode from standard base64. Surrounding whitespace is ignored.
    fn from_xdr_base64(s: &str) -> Result<Self, XdrError> {
        let bytes = STANDARD
            .decode(s.trim())
            .map_err(|e| XdrError::InvalidBase64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

macro_rules! impl_xdr_primitive {
    ($ty:ty, $write:ident, $read:ident) => {
        impl WriteXdr for $ty {
            fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                w.$write(*self);
                Ok(())
            }
        }

        impl ReadXdr for $ty {
            fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                r.$read()
            }
        }
    };
}

impl_xdr_primitive!(u32, write_u32, read_u32);
impl_xdr_primitive!(i32, write_i32, read_i32);
impl_xdr_primitive!(u64, write_u64, read_u64);
impl_xdr_primitive!(i64, write_i64, read_i64);
impl_xdr_primitive!(bool, write_bool, read_bool);

/// `opaque[N]`: hashes, public keys, hints, padded asset codes.
impl<const N: usize> WriteXdr for [u8; N] {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed(self);
        Ok(())
    }
}

impl<const N: usize> ReadXdr for [u8; N] {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed::<N>()
    }
}

/// `T*`: a presence flag, then the value.
impl<T: WriteXdr> WriteXdr for Option<T> {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Some(v) => {
                w.write_bool(true);
                v.write_xdr(w)
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }
}

impl<T: ReadXdr> ReadXdr for Option<T> {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        if r.read_bool()? {
            Ok(Some(T::read_xdr(r)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: WriteXdr> WriteXdr for Box<T> {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        (**self).write_xdr(w)
    }
}

/// Boxed values only appear in recursive positions, so every boxed read
/// costs one level of nesting depth.
impl<T: ReadXdr> ReadXdr for Box<T> {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.nested(|r| T::read_xdr(r).map(Box::new))
    }
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

/// Encode `T<max>`.
pub fn write_array<T: WriteXdr>(w: &mut XdrWriter, items: &[T], max: usize) -> Result<(), XdrError> {
    w.write_len(items.len(), max)?;
    for item in items {
        item.write_xdr(w)?;
    }
    Ok(())
}

/// Decode `T<max>`.
pub fn read_array<T: ReadXdr>(r: &mut XdrReader<'_>, max: usize) -> Result<Vec<T>, XdrError> {
    let len = r.read_len(max)?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(T::read_xdr(r)?);
    }
    Ok(items)
}

/// Implements [`WriteXdr`]/[`ReadXdr`] for a struct by encoding its fields
/// in the listed order. Only usable when no field carries a length bound.
macro_rules! impl_xdr_struct {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $crate::xdr::WriteXdr for $name {
            fn write_xdr(
                &self,
                w: &mut $crate::xdr::XdrWriter,
            ) -> Result<(), $crate::xdr::XdrError> {
                $( $crate::xdr::WriteXdr::write_xdr(&self.$field, w)?; )*
                Ok(())
            }
        }

        impl $crate::xdr::ReadXdr for $name {
            fn read_xdr(
                r: &mut $crate::xdr::XdrReader<'_>,
            ) -> Result<Self, $crate::xdr::XdrError> {
                Ok(Self {
                    $( $field: $crate::xdr::ReadXdr::read_xdr(r)?, )*
                })
            }
        }
    };
}

pub(crate) use impl_xdr_struct;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        a: u32,
        b: Option<i64>,
    }

    impl_xdr_struct!(Pair { a, b });

    #[test]
    fn struct_macro_field_order() {
        let p = Pair { a: 7, b: Some(-1) };
        let bytes = p.to_xdr().unwrap();
        assert_eq!(
            bytes,
            vec![0, 0, 0, 7, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(Pair::from_xdr(&bytes).unwrap(), p);
    }

    #[test]
    fn absent_option_is_a_zero_flag() {
        let bytes = None::<u32>.to_xdr().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(Option::<u32>::from_xdr(&bytes).unwrap(), None);
    }

    #[test]
    fn array_round_trips_within_max() {
        let mut w = XdrWriter::new();
        write_array(&mut w, &[1u32, 2, 3], 5).unwrap();
        let bytes = w.into_bytes();
        let mut r = XdrReader::new(&bytes);
        assert_eq!(read_array::<u32>(&mut r, 5).unwrap(), vec![1, 2, 3]);

        let mut r = XdrReader::new(&bytes);
        assert!(matches!(
            read_array::<u32>(&mut r, 2),
            Err(XdrError::LengthExceedsMax { len: 3, max: 2, .. })
        ));

        let mut w = XdrWriter::new();
        assert!(write_array(&mut w, &[0u32; 3], 2).is_err());
    }

    #[test]
    fn from_xdr_rejects_trailing_bytes() {
        assert_eq!(
            u32::from_xdr(&[0, 0, 0, 1, 0, 0, 0, 0]),
            Err(XdrError::TrailingBytes {
                offset: 4,
                remaining: 4
            })
        );
    }

    #[test]
    fn base64_helpers_round_trip() {
        let encoded = 0xDEADBEEFu32.to_xdr_base64().unwrap();
        assert_eq!(encoded, "3q2+7w==");
        assert_eq!(u32::from_xdr_base64(" 3q2+7w==\n").unwrap(), 0xDEADBEEF);
        assert!(matches!(
            u32::from_xdr_base64("not base64!"),
            Err(XdrError::InvalidBase64(_))
        ));
    }

    #[test]
    fn fixed_arrays_encode_without_length() {
        let hint = [0xAAu8, 0xBB, 0xCC, 0xDD];
        assert_eq!(hint.to_xdr().unwrap(), hint.to_vec());
        assert_eq!(<[u8; 4]>::from_xdr(&hint).unwrap(), hint);
    }
}
