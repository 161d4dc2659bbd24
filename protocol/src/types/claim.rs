//! Claimable balances: predicates, claimants and balance ids.

use super::{AccountId, ValidationError};
use crate::xdr::{read_array, write_array, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

const CLAIM_PREDICATE_UNCONDITIONAL: i32 = 0;
const CLAIM_PREDICATE_AND: i32 = 1;
const CLAIM_PREDICATE_OR: i32 = 2;
const CLAIM_PREDICATE_NOT: i32 = 3;
const CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME: i32 = 4;
const CLAIM_PREDICATE_BEFORE_RELATIVE_TIME: i32 = 5;

const CLAIMANT_TYPE_V0: i32 = 0;
const CLAIMABLE_BALANCE_ID_TYPE_V0: i32 = 0;

/// `ClaimPredicate andPredicates<2>` / `orPredicates<2>`.
const MAX_PREDICATE_CHILDREN: usize = 2;

/// A boolean condition on when a claimant may claim a balance.
///
/// The tree is owned top to bottom. `And`/`Or` children live in a `Vec`
/// because the wire type is an array (of at most two), and `Not` holds an
/// optional child because the wire type is a pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimPredicate {
    Unconditional,
    And(Vec<ClaimPredicate>),
    Or(Vec<ClaimPredicate>),
    Not(Option<Box<ClaimPredicate>>),
    /// Claimable until this UNIX timestamp.
    BeforeAbsoluteTime(i64),
    /// Claimable for this many seconds after the balance is created.
    BeforeRelativeTime(i64),
}

impl ClaimPredicate {
    pub fn and(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        Self::And(vec![left, right])
    }

    pub fn or(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        Self::Or(vec![left, right])
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: ClaimPredicate) -> Self {
        Self::Not(Some(Box::new(inner)))
    }

    /// Checks the whole tree for the shapes the network accepts: two
    /// children under every `And`/`Or`, one under every `Not`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::And(children) | Self::Or(children) => {
                if children.len() != MAX_PREDICATE_CHILDREN {
                    let kind = if matches!(self, Self::And(_)) { "AND" } else { "OR" };
                    return Err(ValidationError::PredicateArity {
                        kind,
                        count: children.len(),
                    });
                }
                children.iter().try_for_each(ClaimPredicate::validate)
            }
            Self::Not(Some(inner)) => inner.validate(),
            Self::Not(None) => Err(ValidationError::EmptyNotPredicate),
            Self::Unconditional | Self::BeforeAbsoluteTime(_) | Self::BeforeRelativeTime(_) => {
                Ok(())
            }
        }
    }

    /// Nesting depth, counting a leaf as 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(ClaimPredicate::depth).max().unwrap_or(0)
            }
            Self::Not(Some(inner)) => 1 + inner.depth(),
            _ => 1,
        }
    }
}

impl WriteXdr for ClaimPredicate {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Unconditional => {
                w.write_discriminant(CLAIM_PREDICATE_UNCONDITIONAL);
                Ok(())
            }
            Self::And(children) => {
                w.write_discriminant(CLAIM_PREDICATE_AND);
                write_array(w, children, MAX_PREDICATE_CHILDREN)
            }
            Self::Or(children) => {
                w.write_discriminant(CLAIM_PREDICATE_OR);
                write_array(w, children, MAX_PREDICATE_CHILDREN)
            }
            Self::Not(inner) => {
                w.write_discriminant(CLAIM_PREDICATE_NOT);
                inner.write_xdr(w)
            }
            Self::BeforeAbsoluteTime(t) => {
                w.write_discriminant(CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME);
                w.write_i64(*t);
                Ok(())
            }
            Self::BeforeRelativeTime(t) => {
                w.write_discriminant(CLAIM_PREDICATE_BEFORE_RELATIVE_TIME);
                w.write_i64(*t);
                Ok(())
            }
        }
    }
}

impl ReadXdr for ClaimPredicate {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            CLAIM_PREDICATE_UNCONDITIONAL => Ok(Self::Unconditional),
            CLAIM_PREDICATE_AND => {
                r.nested(|r| read_array(r, MAX_PREDICATE_CHILDREN)).map(Self::And)
            }
            CLAIM_PREDICATE_OR => {
                r.nested(|r| read_array(r, MAX_PREDICATE_CHILDREN)).map(Self::Or)
            }
            CLAIM_PREDICATE_NOT => Ok(Self::Not(ReadXdr::read_xdr(r)?)),
            CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME => Ok(Self::BeforeAbsoluteTime(r.read_i64()?)),
            CLAIM_PREDICATE_BEFORE_RELATIVE_TIME => Ok(Self::BeforeRelativeTime(r.read_i64()?)),
            other => Err(r.unknown("ClaimPredicateType", other)),
        }
    }
}

/// Someone allowed to claim a balance, and under what condition.
///
/// The wire type is a union with a single `CLAIMANT_TYPE_V0` arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Claimant {
    pub destination: AccountId,
    pub predicate: ClaimPredicate,
}

impl Claimant {
    pub fn new(destination: AccountId, predicate: ClaimPredicate) -> Result<Self, ValidationError> {
        predicate.validate()?;
        Ok(Self {
            destination,
            predicate,
        })
    }
}

impl WriteXdr for Claimant {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_discriminant(CLAIMANT_TYPE_V0);
        self.destination.write_xdr(w)?;
        self.predicate.write_xdr(w)
    }
}

impl ReadXdr for Claimant {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            CLAIMANT_TYPE_V0 => Ok(Self {
                destination: AccountId::read_xdr(r)?,
                predicate: ClaimPredicate::read_xdr(r)?,
            }),
            other => Err(r.unknown("ClaimantType", other)),
        }
    }
}

/// Identifies a claimable balance. Single-arm union over a SHA-256 hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimableBalanceId(pub [u8; 32]);

impl WriteXdr for ClaimableBalanceId {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_discriminant(CLAIMABLE_BALANCE_ID_TYPE_V0);
        w.write_fixed(&self.0);
        Ok(())
    }
}

impl ReadXdr for ClaimableBalanceId {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            CLAIMABLE_BALANCE_ID_TYPE_V0 => Ok(Self(r.read_fixed()?)),
            other => Err(r.unknown("ClaimableBalanceIDType", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_XDR_DEPTH;

    fn nested_tree() -> ClaimPredicate {
        ClaimPredicate::and(
            ClaimPredicate::or(
                ClaimPredicate::not(ClaimPredicate::BeforeRelativeTime(3600)),
                ClaimPredicate::BeforeAbsoluteTime(1_700_000_000),
            ),
            ClaimPredicate::not(ClaimPredicate::and(
                ClaimPredicate::Unconditional,
                ClaimPredicate::BeforeRelativeTime(60),
            )),
        )
    }

    #[test]
    fn predicate_tree_survives_xdr() {
        let tree = nested_tree();
        assert_eq!(tree.depth(), 4);
        let bytes = tree.to_xdr().unwrap();
        assert_eq!(ClaimPredicate::from_xdr(&bytes).unwrap(), tree);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn not_predicate_wire_layout() {
        let not = ClaimPredicate::not(ClaimPredicate::Unconditional);
        assert_eq!(not.to_xdr().unwrap(), vec![0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0]);
        let empty = ClaimPredicate::Not(None);
        assert_eq!(empty.to_xdr().unwrap(), vec![0, 0, 0, 3, 0, 0, 0, 0]);
        assert_eq!(ClaimPredicate::from_xdr(&empty.to_xdr().unwrap()).unwrap(), empty);
    }

    #[test]
    fn and_or_need_two_children() {
        assert_eq!(
            ClaimPredicate::And(vec![ClaimPredicate::Unconditional]).validate(),
            Err(ValidationError::PredicateArity {
                kind: "AND",
                count: 1
            })
        );
        assert_eq!(
            ClaimPredicate::not(ClaimPredicate::Or(vec![])).validate(),
            Err(ValidationError::PredicateArity { kind: "OR", count: 0 })
        );
        assert_eq!(
            Claimant::new(AccountId([0u8; 32]), ClaimPredicate::Not(None)),
            Err(ValidationError::EmptyNotPredicate)
        );
    }

    #[test]
    fn three_children_rejected_on_wire() {
        // AND with a declared count of 3.
        let bytes = [0, 0, 0, 1, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            ClaimPredicate::from_xdr(&bytes),
            Err(XdrError::LengthExceedsMax { len: 3, max: 2, offset: 4 })
        ));
    }

    #[test]
    fn hostile_nesting_hits_depth_limit() {
        // NOT(NOT(NOT(...))) far past the ceiling.
        let mut bytes = Vec::new();
        for _ in 0..(MAX_XDR_DEPTH as usize + 10) {
            bytes.extend_from_slice(&[0, 0, 0, 3, 0, 0, 0, 1]);
        }
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(
            ClaimPredicate::from_xdr(&bytes),
            Err(XdrError::DepthLimitExceeded { max: MAX_XDR_DEPTH })
        );
    }

    #[test]
    fn claimant_and_balance_id_wire_forms() {
        let claimant = Claimant::new(AccountId([5u8; 32]), nested_tree()).unwrap();
        let bytes = claimant.to_xdr().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(Claimant::from_xdr(&bytes).unwrap(), claimant);

        let id = ClaimableBalanceId([0xEE; 32]);
        assert_eq!(ClaimableBalanceId::from_xdr(&id.to_xdr().unwrap()).unwrap(), id);
    }
}
