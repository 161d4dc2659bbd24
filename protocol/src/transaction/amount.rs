//! Conversions between stroops and decimal lumen amounts.
//!
//! Amounts on the wire are `int64` stroops, 10^7 to the unit. No floating
//! point anywhere near money: both directions work on integers and text.

use thiserror::Error;

use crate::config::{AMOUNT_DECIMALS, STROOPS_PER_LUMEN};

/// Errors from [`parse_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount {0:?} is not a decimal number")]
    Invalid(String),

    #[error("amount {0:?} has more than 7 decimal places")]
    TooManyDecimals(String),

    #[error("amount {0:?} does not fit in 64 bits of stroops")]
    Overflow(String),
}

/// Formats stroops as a decimal amount with trailing zeros trimmed.
///
/// `400004000` becomes `"40.0004"`, `1000000000` becomes `"100"`.
pub fn format_amount(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let abs = stroops.unsigned_abs();
    let per = STROOPS_PER_LUMEN as u64;
    let whole = abs / per;
    let frac = abs % per;
    if frac == 0 {
        return format!("{sign}{whole}");
    }
    let digits = format!("{:0>width$}", frac, width = AMOUNT_DECIMALS);
    format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses a decimal amount such as `"40.0004"` into stroops.
pub fn parse_amount(text: &str) -> Result<i64, AmountError> {
    let invalid = || AmountError::Invalid(text.to_string());
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, frac) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > AMOUNT_DECIMALS {
        return Err(AmountError::TooManyDecimals(text.to_string()));
    }

    let overflow = || AmountError::Overflow(text.to_string());
    let whole: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let frac: i128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = AMOUNT_DECIMALS);
        padded.parse().map_err(|_| invalid())?
    };

    let magnitude = whole
        .checked_mul(i128::from(STROOPS_PER_LUMEN))
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(overflow)?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| overflow())
}
