//! Transaction preconditions.

use super::SignerKey;
use crate::config::MAX_EXTRA_SIGNERS;
use crate::xdr::{
    impl_xdr_struct, read_array, write_array, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter,
};

const PRECOND_NONE: i32 = 0;
const PRECOND_TIME: i32 = 1;
const PRECOND_V2: i32 = 2;

/// Closed interval of UNIX timestamps. `max_time == 0` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl_xdr_struct!(TimeBounds { min_time, max_time });

/// Ledger sequence window. `max_ledger == 0` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

impl_xdr_struct!(LedgerBounds {
    min_ledger,
    max_ledger
});

/// The full precondition set introduced with protocol 19.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    /// Valid only when the source sequence number is at least this value.
    pub min_seq_num: Option<i64>,
    /// Seconds since the source sequence number last changed.
    pub min_seq_age: u64,
    /// Ledgers since the source sequence number last changed.
    pub min_seq_ledger_gap: u32,
    pub extra_signers: Vec<SignerKey>,
}

impl PreconditionsV2 {
    /// True when nothing beyond time bounds is set, i.e. when a `TIME` or
    /// `NONE` precondition says the same thing.
    pub fn is_time_only(&self) -> bool {
        self.ledger_bounds.is_none()
            && self.min_seq_num.is_none()
            && self.min_seq_age == 0
            && self.min_seq_ledger_gap == 0
            && self.extra_signers.is_empty()
    }
}

impl WriteXdr for PreconditionsV2 {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.time_bounds.write_xdr(w)?;
        self.ledger_bounds.write_xdr(w)?;
        self.min_seq_num.write_xdr(w)?;
        w.write_u64(self.min_seq_age);
        w.write_u32(self.min_seq_ledger_gap);
        write_array(w, &self.extra_signers, MAX_EXTRA_SIGNERS)
    }
}

impl ReadXdr for PreconditionsV2 {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            time_bounds: ReadXdr::read_xdr(r)?,
            ledger_bounds: ReadXdr::read_xdr(r)?,
            min_seq_num: ReadXdr::read_xdr(r)?,
            min_seq_age: r.read_u64()?,
            min_seq_ledger_gap: r.read_u32()?,
            extra_signers: read_array(r, MAX_EXTRA_SIGNERS)?,
        })
    }
}

/// When a transaction is valid.
///
/// Decoded values are kept exactly as received: a `V2` block with nothing
/// set stays `V2`, so re-encoding reproduces the original bytes.
/// [`Preconditions::minimal`] is what builders use to pick the smallest
/// arm for a fresh transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Preconditions {
    #[default]
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

impl Preconditions {
    /// The smallest arm that expresses `v2`.
    pub fn minimal(v2: PreconditionsV2) -> Self {
        if !v2.is_time_only() {
            return Self::V2(v2);
        }
        match v2.time_bounds {
            Some(bounds) => Self::Time(bounds),
            None => Self::None,
        }
    }

    pub fn time_bounds(&self) -> Option<TimeBounds> {
        match self {
            Self::None => None,
            Self::Time(bounds) => Some(*bounds),
            Self::V2(v2) => v2.time_bounds,
        }
    }
}

impl WriteXdr for Preconditions {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::None => {
                w.write_discriminant(PRECOND_NONE);
                Ok(())
            }
            Self::Time(bounds) => {
                w.write_discriminant(PRECOND_TIME);
                bounds.write_xdr(w)
            }
            Self::V2(v2) => {
                w.write_discriminant(PRECOND_V2);
                v2.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for Preconditions {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            PRECOND_NONE => Ok(Self::None),
            PRECOND_TIME => Ok(Self::Time(TimeBounds::read_xdr(r)?)),
            PRECOND_V2 => Ok(Self::V2(PreconditionsV2::read_xdr(r)?)),
            other => Err(r.unknown("PreconditionType", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_picks_smallest_arm() {
        assert_eq!(Preconditions::minimal(PreconditionsV2::default()), Preconditions::None);

        let bounds = TimeBounds {
            min_time: 0,
            max_time: 1_700_000_000,
        };
        assert_eq!(
            Preconditions::minimal(PreconditionsV2 {
                time_bounds: Some(bounds),
                ..Default::default()
            }),
            Preconditions::Time(bounds)
        );

        let v2 = PreconditionsV2 {
            min_seq_age: 60,
            ..Default::default()
        };
        assert_eq!(Preconditions::minimal(v2.clone()), Preconditions::V2(v2));
    }

    #[test]
    fn empty_v2_preserved_on_wire() {
        let cond = Preconditions::V2(PreconditionsV2::default());
        let bytes = cond.to_xdr().unwrap();
        // discriminant, three absent optionals, age (8), gap (4), empty signer list
        assert_eq!(bytes.len(), 4 + 12 + 8 + 4 + 4);
        assert_eq!(Preconditions::from_xdr(&bytes).unwrap(), cond);
    }

    #[test]
    fn full_v2_survives_xdr() {
        let cond = Preconditions::V2(PreconditionsV2 {
            time_bounds: Some(TimeBounds {
                min_time: 1,
                max_time: 2,
            }),
            ledger_bounds: Some(LedgerBounds {
                min_ledger: 10,
                max_ledger: 0,
            }),
            min_seq_num: Some(-5),
            min_seq_age: 3600,
            min_seq_ledger_gap: 7,
            extra_signers: vec![SignerKey::HashX([9u8; 32]), SignerKey::Ed25519([1u8; 32])],
        });
        let bytes = cond.to_xdr().unwrap();
        assert_eq!(Preconditions::from_xdr(&bytes).unwrap(), cond);
    }

    #[test]
    fn more_than_two_extra_signers_rejected() {
        let cond = Preconditions::V2(PreconditionsV2 {
            extra_signers: vec![SignerKey::HashX([0u8; 32]); 3],
            ..Default::default()
        });
        assert!(matches!(
            cond.to_xdr(),
            Err(XdrError::LengthExceedsMax { len: 3, max: 2, .. })
        ));
    }
}
