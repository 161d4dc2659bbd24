//! Assets, trust line assets and prices.

use std::fmt;
use std::str::FromStr;

use super::{AccountId, ValidationError};
use crate::crypto::hash::sha256_array;
use crate::xdr::{impl_xdr_struct, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;
const ASSET_TYPE_POOL_SHARE: i32 = 3;

const LIQUIDITY_POOL_CONSTANT_PRODUCT: i32 = 0;

/// The only fee the network accepts for constant-product pools, in basis
/// points.
pub const LIQUIDITY_POOL_FEE_V18: i32 = 30;

// ---------------------------------------------------------------------------
// Asset codes
// ---------------------------------------------------------------------------

/// Right-pads a validated code with zero bytes to `N`.
fn padded_code<const N: usize>(code: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out[..code.len()].copy_from_slice(code.as_bytes());
    out
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.len() > 12 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidAssetCode(code.to_string()));
    }
    Ok(())
}

/// Text form of a wire asset code. Trailing zero padding is dropped, but
/// never below `min_len` bytes, so the length still picks the arm. Bytes
/// other than ASCII letters and digits are written as `\0` or `\xNN`.
fn code_to_string(code: &[u8], min_len: usize) -> String {
    let mut end = code.len();
    while end > min_len && code[end - 1] == 0 {
        end -= 1;
    }
    let mut out = String::with_capacity(end);
    for &b in &code[..end] {
        match b {
            b if b.is_ascii_alphanumeric() => out.push(char::from(b)),
            0 => out.push_str("\\0"),
            other => out.push_str(&format!("\\x{:02x}", other)),
        }
    }
    out
}

/// Parses the text form written by `code_to_string`. Codes without escapes
/// go through `AssetCode::new`.
fn parse_code(s: &str) -> Result<AssetCode, ValidationError> {
    if !s.contains('\\') {
        return AssetCode::new(s);
    }
    let invalid = || ValidationError::InvalidAssetCode(s.to_string());
    let mut bytes = Vec::with_capacity(12);
    let mut rest = s.as_bytes();
    while let Some((&b, tail)) = rest.split_first() {
        rest = tail;
        match b {
            b'\\' => match rest {
                [b'0', tail @ ..] => {
                    bytes.push(0);
                    rest = tail;
                }
                [b'x', hi, lo, tail @ ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    bytes.push((hex_value(*hi) << 4) | hex_value(*lo));
                    rest = tail;
                }
                _ => return Err(invalid()),
            },
            b if b.is_ascii_alphanumeric() => bytes.push(b),
            _ => return Err(invalid()),
        }
    }
    match bytes.len() {
        1..=4 => {
            let mut code = [0u8; 4];
            code[..bytes.len()].copy_from_slice(&bytes);
            Ok(AssetCode::CreditAlphanum4(code))
        }
        5..=12 => {
            let mut code = [0u8; 12];
            code[..bytes.len()].copy_from_slice(&bytes);
            Ok(AssetCode::CreditAlphanum12(code))
        }
        _ => Err(invalid()),
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// A bare asset code, as used by `ALLOW_TRUST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCode {
    CreditAlphanum4([u8; 4]),
    CreditAlphanum12([u8; 12]),
}

impl AssetCode {
    /// 1-4 characters become alphanum4, 5-12 become alphanum12.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        validate_code(code)?;
        if code.len() <= 4 {
            Ok(Self::CreditAlphanum4(padded_code(code)))
        } else {
            Ok(Self::CreditAlphanum12(padded_code(code)))
        }
    }

    /// The issued asset with this code.
    pub fn with_issuer(self, issuer: AccountId) -> Asset {
        match self {
            Self::CreditAlphanum4(asset_code) => {
                Asset::CreditAlphanum4(AlphaNum4 { asset_code, issuer })
            }
            Self::CreditAlphanum12(asset_code) => {
                Asset::CreditAlphanum12(AlphaNum12 { asset_code, issuer })
            }
        }
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditAlphanum4(code) => f.write_str(&code_to_string(code, 1)),
            Self::CreditAlphanum12(code) => f.write_str(&code_to_string(code, 5)),
        }
    }
}

impl FromStr for AssetCode {
    type Err = ValidationError;

    /// Accepts the escaped form that `Display` writes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

impl WriteXdr for AssetCode {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::CreditAlphanum4(code) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM4);
                w.write_fixed(code);
            }
            Self::CreditAlphanum12(code) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM12);
                w.write_fixed(code);
            }
        }
        Ok(())
    }
}

impl ReadXdr for AssetCode {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4(r.read_fixed()?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12(r.read_fixed()?)),
            other => Err(r.unknown("AssetCode", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlphaNum4 {
    pub asset_code: [u8; 4],
    pub issuer: AccountId,
}

impl_xdr_struct!(AlphaNum4 { asset_code, issuer });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlphaNum12 {
    pub asset_code: [u8; 12],
    pub issuer: AccountId,
}

impl_xdr_struct!(AlphaNum12 { asset_code, issuer });

/// Lumens or an issued credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
}

impl Asset {
    pub fn native() -> Self {
        Self::Native
    }

    /// An issued asset. The code length picks the wire arm.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self, ValidationError> {
        Ok(AssetCode::new(code)?.with_issuer(issuer))
    }

    /// The asset code in its `Display` form, `None` for lumens.
    pub fn code(&self) -> Option<String> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(code_to_string(&a.asset_code, 1)),
            Self::CreditAlphanum12(a) => Some(code_to_string(&a.asset_code, 5)),
        }
    }

    pub fn issuer(&self) -> Option<AccountId> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(a.issuer),
            Self::CreditAlphanum12(a) => Some(a.issuer),
        }
    }
}

/// `XLM` or `CODE:ISSUER`.
impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.issuer()) {
            (Some(code), Some(issuer)) => write!(f, "{}:{}", code, issuer),
            _ => f.write_str("XLM"),
        }
    }
}

impl FromStr for Asset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "XLM" || s == "native" {
            return Ok(Self::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::InvalidAsset(s.to_string()))?;
        Ok(parse_code(code)?.with_issuer(issuer.parse()?))
    }
}

impl WriteXdr for Asset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Native => {
                w.write_discriminant(ASSET_TYPE_NATIVE);
                Ok(())
            }
            Self::CreditAlphanum4(a) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM4);
                a.write_xdr(w)
            }
            Self::CreditAlphanum12(a) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM12);
                a.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for Asset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4(AlphaNum4::read_xdr(r)?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12(AlphaNum12::read_xdr(r)?)),
            other => Err(r.unknown("Asset", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Liquidity pools
// ---------------------------------------------------------------------------

/// Parameters that identify a liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidityPoolParameters {
    ConstantProduct {
        asset_a: Asset,
        asset_b: Asset,
        fee: i32,
    },
}

impl LiquidityPoolParameters {
    pub fn constant_product(asset_a: Asset, asset_b: Asset) -> Self {
        Self::ConstantProduct {
            asset_a,
            asset_b,
            fee: LIQUIDITY_POOL_FEE_V18,
        }
    }

    /// The pool id: SHA-256 of the parameters' XDR.
    pub fn pool_id(&self) -> Result<[u8; 32], XdrError> {
        Ok(sha256_array(&self.to_xdr()?))
    }
}

impl WriteXdr for LiquidityPoolParameters {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::ConstantProduct {
                asset_a,
                asset_b,
                fee,
            } => {
                w.write_discriminant(LIQUIDITY_POOL_CONSTANT_PRODUCT);
                asset_a.write_xdr(w)?;
                asset_b.write_xdr(w)?;
                w.write_i32(*fee);
                Ok(())
            }
        }
    }
}

impl ReadXdr for LiquidityPoolParameters {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            LIQUIDITY_POOL_CONSTANT_PRODUCT => Ok(Self::ConstantProduct {
                asset_a: Asset::read_xdr(r)?,
                asset_b: Asset::read_xdr(r)?,
                fee: r.read_i32()?,
            }),
            other => Err(r.unknown("LiquidityPoolType", other)),
        }
    }
}

/// The asset a `CHANGE_TRUST` operation establishes trust in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare(LiquidityPoolParameters),
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl WriteXdr for ChangeTrustAsset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Native => Asset::Native.write_xdr(w),
            Self::CreditAlphanum4(a) => Asset::CreditAlphanum4(*a).write_xdr(w),
            Self::CreditAlphanum12(a) => Asset::CreditAlphanum12(*a).write_xdr(w),
            Self::PoolShare(params) => {
                w.write_discriminant(ASSET_TYPE_POOL_SHARE);
                params.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for ChangeTrustAsset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4(AlphaNum4::read_xdr(r)?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12(AlphaNum12::read_xdr(r)?)),
            ASSET_TYPE_POOL_SHARE => Ok(Self::PoolShare(LiquidityPoolParameters::read_xdr(r)?)),
            other => Err(r.unknown("ChangeTrustAsset", other)),
        }
    }
}

/// The asset of an existing trust line; pool shares are referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustLineAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare([u8; 32]),
}

impl From<Asset> for TrustLineAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl WriteXdr for TrustLineAsset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Native => Asset::Native.write_xdr(w),
            Self::CreditAlphanum4(a) => Asset::CreditAlphanum4(*a).write_xdr(w),
            Self::CreditAlphanum12(a) => Asset::CreditAlphanum12(*a).write_xdr(w),
            Self::PoolShare(pool_id) => {
                w.write_discriminant(ASSET_TYPE_POOL_SHARE);
                w.write_fixed(pool_id);
                Ok(())
            }
        }
    }
}

impl ReadXdr for TrustLineAsset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4(AlphaNum4::read_xdr(r)?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12(AlphaNum12::read_xdr(r)?)),
            ASSET_TYPE_POOL_SHARE => Ok(Self::PoolShare(r.read_fixed()?)),
            other => Err(r.unknown("TrustLineAsset", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A rational price `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl_xdr_struct!(Price { n, d });

impl Price {
    pub fn new(n: i32, d: i32) -> Result<Self, ValidationError> {
        if d == 0 {
            return Err(ValidationError::ZeroPriceDenominator);
        }
        if n < 0 || d < 0 {
            return Err(ValidationError::NegativePrice { n, d });
        }
        Ok(Self { n, d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GAZFEVBSEGJJ63WPVVIWXLZLWN2JYZECECGT6GUNP4FJDVZVNXWQWMYI";

    fn issuer() -> AccountId {
        ISSUER.parse().unwrap()
    }

    #[test]
    fn code_length_picks_arm() {
        assert!(matches!(
            Asset::credit("USD", issuer()).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::credit("USDC", issuer()).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::credit("LONGCODE", issuer()).unwrap(),
            Asset::CreditAlphanum12(_)
        ));
    }

    #[test]
    fn invalid_codes_rejected() {
        for code in ["", "THIRTEENCHARS", "US D", "US$"] {
            assert_eq!(
                Asset::credit(code, issuer()),
                Err(ValidationError::InvalidAssetCode(code.to_string()))
            );
        }
    }

    #[test]
    fn asset_string_form_round_trips() {
        let usd = Asset::credit("USD", issuer()).unwrap();
        assert_eq!(usd.to_string(), format!("USD:{}", ISSUER));
        assert_eq!(usd.to_string().parse::<Asset>().unwrap(), usd);
        assert_eq!("XLM".parse::<Asset>().unwrap(), Asset::Native);
        assert!(matches!(
            "USD".parse::<Asset>(),
            Err(ValidationError::InvalidAsset(_))
        ));
    }

    #[test]
    fn alphanum4_code_is_zero_padded_on_wire() {
        let usd = Asset::credit("USD", issuer()).unwrap();
        let bytes = usd.to_xdr().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, b'U', b'S', b'D', 0]);
        assert_eq!(bytes.len(), 4 + 4 + 36);
        assert_eq!(Asset::from_xdr(&bytes).unwrap(), usd);
        assert_eq!(usd.code().as_deref(), Some("USD"));
    }

    #[test]
    fn unknown_asset_type_rejected() {
        assert!(matches!(
            Asset::from_xdr(&[0, 0, 0, 3]),
            Err(XdrError::UnknownDiscriminant {
                type_name: "Asset",
                value: 3,
                ..
            })
        ));
    }

    #[test]
    fn pool_share_trust_lines_survive_xdr() {
        let params = LiquidityPoolParameters::constant_product(
            Asset::Native,
            Asset::credit("USD", issuer()).unwrap(),
        );
        let asset = ChangeTrustAsset::PoolShare(params);
        let bytes = asset.to_xdr().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 3, 0, 0, 0, 0]);
        assert_eq!(ChangeTrustAsset::from_xdr(&bytes).unwrap(), asset);

        let line = TrustLineAsset::PoolShare(params.pool_id().unwrap());
        let bytes = line.to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(TrustLineAsset::from_xdr(&bytes).unwrap(), line);
    }

    #[test]
    fn price_rejects_zero_and_negative_terms() {
        assert_eq!(Price::new(1, 0), Err(ValidationError::ZeroPriceDenominator));
        assert_eq!(
            Price::new(-1, 2),
            Err(ValidationError::NegativePrice { n: -1, d: 2 })
        );
        let price = Price::new(3, 4).unwrap();
        assert_eq!(price.to_xdr().unwrap(), vec![0, 0, 0, 3, 0, 0, 0, 4]);
    }

    #[test]
    fn allow_trust_code_picks_arm() {
        let code = AssetCode::new("EURT").unwrap();
        assert_eq!(code.to_string(), "EURT");
        assert_eq!(code.to_xdr().unwrap(), vec![0, 0, 0, 1, b'E', b'U', b'R', b'T']);
        let long = AssetCode::new("EURTOKEN").unwrap();
        assert!(matches!(long, AssetCode::CreditAlphanum12(_)));
        assert_eq!(AssetCode::from_xdr(&long.to_xdr().unwrap()).unwrap(), long);
    }

    #[test]
    fn short_alphanum12_code_keeps_its_arm_in_text() {
        let mut asset_code = [0u8; 12];
        asset_code[..3].copy_from_slice(b"USD");
        let asset = Asset::CreditAlphanum12(AlphaNum12 {
            asset_code,
            issuer: issuer(),
        });
        assert_eq!(asset.to_string(), format!("USD\\0\\0:{}", ISSUER));
        assert_eq!(asset.to_string().parse::<Asset>().unwrap(), asset);
        assert_ne!(asset, Asset::credit("USD", issuer()).unwrap());
    }

    #[test]
    fn non_alphanumeric_code_bytes_are_escaped() {
        let asset = Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: *b"US$\xff",
            issuer: issuer(),
        });
        assert_eq!(asset.code().as_deref(), Some("US\\x24\\xff"));
        assert_eq!(asset.to_string().parse::<Asset>().unwrap(), asset);

        let zeros = AssetCode::CreditAlphanum4([0; 4]);
        assert_eq!(zeros.to_string(), "\\0");
        assert_eq!(zeros.to_string().parse::<AssetCode>().unwrap(), zeros);
        let zeros = AssetCode::CreditAlphanum12([0; 12]);
        assert_eq!(zeros.to_string(), "\\0\\0\\0\\0\\0");
        assert_eq!(zeros.to_string().parse::<AssetCode>().unwrap(), zeros);
    }

    #[test]
    fn malformed_code_text_is_rejected() {
        for code in ["US$", "US\\x2", "US\\xZZ", "US\\q", "\\0\\0\\0\\0\\0\\0\\0\\0\\0\\0\\0\\0\\0"] {
            assert_eq!(
                code.parse::<AssetCode>(),
                Err(ValidationError::InvalidAssetCode(code.to_string()))
            );
        }
        assert_eq!(
            Asset::credit("US\\x24", issuer()),
            Err(ValidationError::InvalidAssetCode("US\\x24".to_string()))
        );
    }
}
