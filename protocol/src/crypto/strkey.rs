//! # Strkey — Versioned, Checksummed Identifiers
//!
//! Every key-like value a human ever sees on the network is a strkey:
//!
//! ```text
//! version byte (1) || payload (n) || CRC16-XMODEM(version || payload) (2, LE)
//!     -> RFC 4648 base-32, upper case, no padding
//! ```
//!
//! The version byte is chosen so that the first base-32 character spells out
//! what the value is: `G` for accounts, `S` for seeds, `M` for muxed
//! accounts, `T` for pre-authorized transaction hashes, `X` for hash(x)
//! signers, `P` for signed-payload signers and `C` for contracts.
//!
//! The base-32 codec and the CRC are implemented here directly. Both are a
//! dozen lines, and the decoder has to be stricter than a general-purpose
//! base-32 crate (no padding, no lower case, no non-canonical trailing bits).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::MAX_SIGNED_PAYLOAD_LENGTH;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while decoding a strkey string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    /// The decoded byte length does not fit the version's payload layout.
    #[error("invalid strkey length: {0} bytes")]
    InvalidLength(usize),

    /// A character outside the RFC 4648 base-32 alphabet.
    #[error("invalid strkey character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// Trailing bits are non-zero, or the string length is not a valid
    /// base-32 length. Two different strings must never decode to the
    /// same key.
    #[error("non-canonical base32 encoding")]
    InvalidEncoding,

    /// The CRC16 trailer does not match the version byte and payload.
    #[error("strkey checksum mismatch")]
    InvalidChecksum,

    /// The version byte is unknown or not the one the caller asked for.
    #[error("invalid strkey version byte {0:#04x}")]
    InvalidVersionByte(u8),
}

// ---------------------------------------------------------------------------
// Version bytes
// ---------------------------------------------------------------------------

/// The strkey version byte. Each value is `index << 3`, so the top five bits
/// select the leading base-32 character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Version {
    AccountId = 6 << 3,
    MuxedAccount = 12 << 3,
    SecretSeed = 18 << 3,
    PreAuthTx = 19 << 3,
    HashX = 23 << 3,
    SignedPayload = 15 << 3,
    Contract = 2 << 3,
}

impl Version {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b if b == Self::AccountId as u8 => Some(Self::AccountId),
            b if b == Self::MuxedAccount as u8 => Some(Self::MuxedAccount),
            b if b == Self::SecretSeed as u8 => Some(Self::SecretSeed),
            b if b == Self::PreAuthTx as u8 => Some(Self::PreAuthTx),
            b if b == Self::HashX as u8 => Some(Self::HashX),
            b if b == Self::SignedPayload as u8 => Some(Self::SignedPayload),
            b if b == Self::Contract as u8 => Some(Self::Contract),
            _ => None,
        }
    }

    /// The leading character every strkey of this version starts with.
    pub fn prefix(self) -> char {
        ALPHABET[(self as u8 >> 3) as usize] as char
    }
}

// ---------------------------------------------------------------------------
// StrKey
// ---------------------------------------------------------------------------

/// A decoded strkey.
///
/// # Examples
///
/// ```
/// use lumen_protocol::crypto::strkey::StrKey;
///
/// let key: StrKey = "GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O"
///     .parse()
///     .unwrap();
/// assert!(matches!(key, StrKey::AccountId(_)));
/// assert_eq!(key.to_string(), "GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum StrKey {
    /// `G...`: an ed25519 account public key.
    AccountId([u8; 32]),
    /// `M...`: an account public key multiplexed with a 64-bit id.
    MuxedAccount { ed25519: [u8; 32], id: u64 },
    /// `S...`: an ed25519 secret seed.
    SecretSeed([u8; 32]),
    /// `T...`: a pre-authorized transaction hash signer.
    PreAuthTx([u8; 32]),
    /// `X...`: the SHA-256 hash of a hash(x) signer's preimage.
    HashX([u8; 32]),
    /// `P...`: an ed25519 key bound to a payload of at most 64 bytes.
    SignedPayload { ed25519: [u8; 32], payload: Vec<u8> },
    /// `C...`: a contract id.
    Contract([u8; 32]),
}

impl StrKey {
    /// The version byte this key encodes with.
    pub fn version(&self) -> Version {
        match self {
            Self::AccountId(_) => Version::AccountId,
            Self::MuxedAccount { .. } => Version::MuxedAccount,
            Self::SecretSeed(_) => Version::SecretSeed,
            Self::PreAuthTx(_) => Version::PreAuthTx,
            Self::HashX(_) => Version::HashX,
            Self::SignedPayload { .. } => Version::SignedPayload,
            Self::Contract(_) => Version::Contract,
        }
    }

    /// Encodes the key to its strkey string.
    pub fn encode(&self) -> String {
        let payload = match self {
            Self::AccountId(key)
            | Self::SecretSeed(key)
            | Self::PreAuthTx(key)
            | Self::HashX(key)
            | Self::Contract(key) => key.to_vec(),
            Self::MuxedAccount { ed25519, id } => {
                let mut buf = Vec::with_capacity(40);
                buf.extend_from_slice(ed25519);
                buf.extend_from_slice(&id.to_be_bytes());
                buf
            }
            Self::SignedPayload { ed25519, payload } => {
                // Same layout as the XDR struct: key, u32 length, padded bytes.
                let padding = (4 - payload.len() % 4) % 4;
                let mut buf = Vec::with_capacity(36 + payload.len() + padding);
                buf.extend_from_slice(ed25519);
                buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                buf.extend_from_slice(payload);
                buf.extend(std::iter::repeat(0u8).take(padding));
                buf
            }
        };
        encode_check(self.version() as u8, &payload)
    }

    /// Decodes any supported strkey.
    pub fn decode(s: &str) -> Result<Self, StrKeyError> {
        let (version_byte, payload) = decode_check(s)?;
        let version =
            Version::from_byte(version_byte).ok_or(StrKeyError::InvalidVersionByte(version_byte))?;

        match version {
            Version::AccountId => Ok(Self::AccountId(to_key(&payload)?)),
            Version::SecretSeed => Ok(Self::SecretSeed(to_key(&payload)?)),
            Version::PreAuthTx => Ok(Self::PreAuthTx(to_key(&payload)?)),
            Version::HashX => Ok(Self::HashX(to_key(&payload)?)),
            Version::Contract => Ok(Self::Contract(to_key(&payload)?)),
            Version::MuxedAccount => {
                if payload.len() != 40 {
                    return Err(StrKeyError::InvalidLength(payload.len()));
                }
                let ed25519 = to_key(&payload[..32])?;
                let mut id = [0u8; 8];
                id.copy_from_slice(&payload[32..]);
                Ok(Self::MuxedAccount {
                    ed25519,
                    id: u64::from_be_bytes(id),
                })
            }
            Version::SignedPayload => decode_signed_payload(&payload),
        }
    }
}

fn decode_signed_payload(payload: &[u8]) -> Result<StrKey, StrKeyError> {
    if payload.len() < 36 {
        return Err(StrKeyError::InvalidLength(payload.len()));
    }
    let ed25519 = to_key(&payload[..32])?;
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&payload[32..36]);
    let inner_len = u32::from_be_bytes(len_bytes) as usize;
    if inner_len > MAX_SIGNED_PAYLOAD_LENGTH {
        return Err(StrKeyError::InvalidLength(payload.len()));
    }
    let padding = (4 - inner_len % 4) % 4;
    if payload.len() != 36 + inner_len + padding {
        return Err(StrKeyError::InvalidLength(payload.len()));
    }
    if payload[36 + inner_len..].iter().any(|b| *b != 0) {
        return Err(StrKeyError::InvalidEncoding);
    }
    Ok(StrKey::SignedPayload {
        ed25519,
        payload: payload[36..36 + inner_len].to_vec(),
    })
}

fn to_key(bytes: &[u8]) -> Result<[u8; 32], StrKeyError> {
    bytes
        .try_into()
        .map_err(|_| StrKeyError::InvalidLength(bytes.len()))
}

impl fmt::Display for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Seeds never leave this process through a log line.
            Self::SecretSeed(_) => write!(f, "StrKey(S...)"),
            other => write!(f, "StrKey({})", other.encode()),
        }
    }
}

impl FromStr for StrKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

// ---------------------------------------------------------------------------
// Typed shortcuts
// ---------------------------------------------------------------------------

/// Encodes a 32-byte ed25519 public key as a `G...` account id.
pub fn encode_account_id(key: &[u8; 32]) -> String {
    StrKey::AccountId(*key).encode()
}

/// Decodes a `G...` account id into its 32-byte public key.
pub fn decode_account_id(s: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(s, Version::AccountId)
}

/// Encodes a 32-byte ed25519 seed as an `S...` secret seed.
pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    StrKey::SecretSeed(*seed).encode()
}

/// Decodes an `S...` secret seed.
pub fn decode_secret_seed(s: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(s, Version::SecretSeed)
}

/// Encodes a muxed account as an `M...` address.
pub fn encode_muxed_account(ed25519: &[u8; 32], id: u64) -> String {
    StrKey::MuxedAccount {
        ed25519: *ed25519,
        id,
    }
    .encode()
}

/// Decodes an `M...` address into its base key and id.
pub fn decode_muxed_account(s: &str) -> Result<([u8; 32], u64), StrKeyError> {
    match StrKey::decode(s)? {
        StrKey::MuxedAccount { ed25519, id } => Ok((ed25519, id)),
        other => Err(StrKeyError::InvalidVersionByte(other.version() as u8)),
    }
}

/// Encodes a 32-byte contract id as a `C...` address.
pub fn encode_contract(id: &[u8; 32]) -> String {
    StrKey::Contract(*id).encode()
}

/// Decodes a `C...` contract address.
pub fn decode_contract(s: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(s, Version::Contract)
}

fn decode_fixed(s: &str, expected: Version) -> Result<[u8; 32], StrKeyError> {
    let (version_byte, payload) = decode_check(s)?;
    if version_byte != expected as u8 {
        return Err(StrKeyError::InvalidVersionByte(version_byte));
    }
    to_key(&payload)
}

// ---------------------------------------------------------------------------
// Checked encoding
// ---------------------------------------------------------------------------

fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = crc16_xmodem(&data);
    data.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&data)
}

/// Base-32 decodes `s`, verifies the checksum and splits off the version
/// byte. The checksum is checked before the version byte and before the
/// trailing bits, so a corrupted character that changes any decoded byte
/// surfaces as `InvalidChecksum`. Only a string whose bytes are intact but
/// whose unused trailing bits are set is `InvalidEncoding`.
fn decode_check(s: &str) -> Result<(u8, Vec<u8>), StrKeyError> {
    let Base32 { bytes: data, canonical } = base32_decode(s)?;
    if data.len() < 3 {
        return Err(StrKeyError::InvalidLength(data.len()));
    }
    let (body, checksum) = data.split_at(data.len() - 2);
    let expected = crc16_xmodem(body).to_le_bytes();
    if checksum != expected {
        return Err(StrKeyError::InvalidChecksum);
    }
    if !canonical {
        return Err(StrKeyError::InvalidEncoding);
    }
    Ok((body[0], body[1..].to_vec()))
}

/// CRC-16/XMODEM: polynomial 0x1021, initial value 0, no reflection.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Decoded bytes, plus whether the leftover bits were a valid zero tail.
struct Base32 {
    bytes: Vec<u8>,
    canonical: bool,
}

fn base32_decode(s: &str) -> Result<Base32, StrKeyError> {
    let mut out = Vec::with_capacity(s.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for (position, ch) in s.chars().enumerate() {
        let value = match ch {
            'A'..='Z' => ch as u32 - 'A' as u32,
            '2'..='7' => ch as u32 - '2' as u32 + 26,
            _ => return Err(StrKeyError::InvalidCharacter { ch, position }),
        };
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    // A full leftover character, or set bits in the partial one, means the
    // string is not the canonical encoding of `out`.
    Ok(Base32 {
        bytes: out,
        canonical: bits < 5 && buffer == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O";
    const ACCOUNT_HEX: &str = "405f36edd8cf22efbf8072b985b6a4c01551c34dd38c137ac8d40d402cd1f7b4";

    fn seq_bytes() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        bytes
    }

    #[test]
    fn crc16_xmodem_check_value() {
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
    }

    #[test]
    fn account_id_known_vector() {
        let key = decode_account_id(ACCOUNT).unwrap();
        assert_eq!(hex::encode(key), ACCOUNT_HEX);
        assert_eq!(encode_account_id(&key), ACCOUNT);
    }

    #[test]
    fn all_zero_account_encodes() {
        assert_eq!(
            encode_account_id(&[0u8; 32]),
            "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF"
        );
    }

    #[test]
    fn secret_seed_vector() {
        let s = "SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI";
        assert_eq!(encode_secret_seed(&seq_bytes()), s);
        assert_eq!(decode_secret_seed(s).unwrap(), seq_bytes());
    }

    #[test]
    fn signer_and_contract_vectors() {
        let key = seq_bytes();
        assert_eq!(
            StrKey::PreAuthTx(key).encode(),
            "TAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6ULG"
        );
        assert_eq!(
            StrKey::HashX(key).encode(),
            "XAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7QO7"
        );
        assert_eq!(
            encode_contract(&key),
            "CAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6N4O"
        );
    }

    #[test]
    fn muxed_account_vector() {
        let m = "MA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVAAAAAAAAAAAAAJLK";
        let (ed25519, id) = decode_muxed_account(m).unwrap();
        assert_eq!(id, 9_223_372_036_854_775_808);
        assert_eq!(
            encode_account_id(&ed25519),
            "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ"
        );
        assert_eq!(encode_muxed_account(&ed25519, id), m);
    }

    #[test]
    fn signed_payload_vectors() {
        let full = "PA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJUAAAAAQACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6IBZGM";
        match StrKey::decode(full).unwrap() {
            StrKey::SignedPayload { payload, .. } => {
                assert_eq!(payload, (1u8..=32).collect::<Vec<_>>());
            }
            other => panic!("unexpected {:?}", other),
        }

        let padded = "PA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJUAAAAAOQCAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUAAAAFGBU";
        let key = StrKey::decode(padded).unwrap();
        match &key {
            StrKey::SignedPayload { payload, .. } => {
                assert_eq!(payload, &(1u8..=29).collect::<Vec<_>>());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(key.encode(), padded);
    }

    #[test]
    fn every_version_round_trips() {
        let key = seq_bytes();
        let keys = vec![
            StrKey::AccountId(key),
            StrKey::MuxedAccount {
                ed25519: key,
                id: 42,
            },
            StrKey::SecretSeed(key),
            StrKey::PreAuthTx(key),
            StrKey::HashX(key),
            StrKey::SignedPayload {
                ed25519: key,
                payload: vec![0xAB; 7],
            },
            StrKey::SignedPayload {
                ed25519: key,
                payload: vec![],
            },
            StrKey::Contract(key),
        ];
        for k in keys {
            let encoded = k.encode();
            assert!(encoded.starts_with(k.version().prefix()));
            assert_eq!(StrKey::decode(&encoded).unwrap(), k);
        }
    }

    #[test]
    fn single_character_corruption_is_caught() {
        let alternatives = ['A', 'B', 'Q', '2', '7'];
        for position in 0..ACCOUNT.len() {
            let original = ACCOUNT.as_bytes()[position] as char;
            let replacement = alternatives
                .iter()
                .copied()
                .find(|c| *c != original)
                .unwrap();
            let mut corrupted: Vec<char> = ACCOUNT.chars().collect();
            corrupted[position] = replacement;
            let corrupted: String = corrupted.into_iter().collect();
            assert_eq!(
                decode_account_id(&corrupted),
                Err(StrKeyError::InvalidChecksum),
                "corruption at {} went unnoticed",
                position
            );
        }
    }

    #[test]
    fn keys_with_trailing_bits_report_checksum_on_corruption() {
        let keys = [
            encode_muxed_account(&[7; 32], 42),
            StrKey::SignedPayload {
                ed25519: [7; 32],
                payload: vec![1, 2, 3, 4, 5],
            }
            .encode(),
        ];
        for key in &keys {
            let intact = base32_decode(key).unwrap().bytes;
            for position in 0..key.len() {
                for &replacement in ALPHABET.iter() {
                    let mut corrupted = key.as_bytes().to_vec();
                    if corrupted[position] == replacement {
                        continue;
                    }
                    corrupted[position] = replacement;
                    let corrupted = String::from_utf8(corrupted).unwrap();
                    // Only the unused tail bits changed: the bytes still match.
                    let expected = if base32_decode(&corrupted).unwrap().bytes == intact {
                        StrKeyError::InvalidEncoding
                    } else {
                        StrKeyError::InvalidChecksum
                    };
                    assert_eq!(
                        StrKey::decode(&corrupted),
                        Err(expected),
                        "{} with {} at {}",
                        key,
                        replacement as char,
                        position
                    );
                }
            }
        }
    }

    #[test]
    fn set_tail_bits_are_non_canonical() {
        // 69 characters carry 43 bytes plus one unused bit.
        let muxed = encode_muxed_account(&[7; 32], 42);
        let last = muxed.as_bytes()[muxed.len() - 1];
        let index = ALPHABET.iter().position(|c| *c == last).unwrap();
        let mut tweaked = muxed[..muxed.len() - 1].to_string();
        tweaked.push(ALPHABET[index ^ 1] as char);
        assert_eq!(StrKey::decode(&tweaked), Err(StrKeyError::InvalidEncoding));
    }

    #[test]
    fn wrong_version_rejected() {
        let seed = encode_secret_seed(&seq_bytes());
        assert_eq!(
            decode_account_id(&seed),
            Err(StrKeyError::InvalidVersionByte(Version::SecretSeed as u8))
        );
    }

    #[test]
    fn invalid_characters_and_lengths_rejected() {
        assert!(matches!(
            decode_account_id("gbaf6nxn3dhsf357qbzltbnwutabkuodjxjyye32zdka2qbm2h33ik6o"),
            Err(StrKeyError::InvalidCharacter { position: 0, .. })
        ));
        assert!(matches!(
            StrKey::decode(&format!("{}=", ACCOUNT)),
            Err(StrKeyError::InvalidCharacter { .. })
        ));
        assert_eq!(StrKey::decode(""), Err(StrKeyError::InvalidLength(0)));
        // Truncation breaks either the canonical length or the checksum.
        assert!(StrKey::decode(&ACCOUNT[..ACCOUNT.len() - 1]).is_err());
    }

    #[test]
    fn signed_payload_length_enforced() {
        // A valid checksum over a 31-byte account payload.
        let short = encode_check(Version::AccountId as u8, &[7u8; 31]);
        assert_eq!(decode_account_id(&short), Err(StrKeyError::InvalidLength(31)));
        assert_eq!(StrKey::decode(&short), Err(StrKeyError::InvalidLength(31)));
    }

    #[test]
    fn debug_hides_seed() {
        let debug = format!("{:?}", StrKey::SecretSeed(seq_bytes()));
        assert_eq!(debug, "StrKey(S...)");
    }
}
