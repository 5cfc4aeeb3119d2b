// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point conversion between decimal token amounts and scaled integers
//!
//! Token contracts store balances as integers scaled by `10^decimals`. This
//! module converts human-entered decimal strings (`"0.01"`) into those scaled
//! integers and back.
//!
//! The conversions reproduce the behaviour the swap flow has always relied on,
//! quirks included:
//!
//! - An amount without a fractional part is treated as having the single
//!   fractional digit `"0"`. `"5"` at precision 2 therefore scales to `500`
//!   through the digit string `"50"` and one extra power of ten.
//! - Supplying more fractional digits than the precision keeps all of them:
//!   `"0.123"` at precision 2 scales to `123`, not `12`.
//! - [`to_decimal_string`] reports whole tokens only; the fractional part is
//!   dropped by floor division. [`format_fixed_point`] is the separate,
//!   non-truncating display form.
//!
//! # Examples
//!
//! ```
//! use eip7702_swap::{to_decimal_string, to_scaled_integer};
//! use num_bigint::BigUint;
//!
//! let amount_in = to_scaled_integer("0.01", 18).unwrap();
//! assert_eq!(amount_in, BigUint::from(10_000_000_000_000_000u64));
//!
//! let balance = BigUint::from(2_999_999_999_999_999_999u64);
//! assert_eq!(to_decimal_string(Some(&balance), 18), "2");
//! ```

use alloy_primitives::U256;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::AmountError;

/// Fractional part assumed when the input has no separator.
const DEFAULT_FRACTION: &str = "0";

const SEPARATOR: char = '.';

/// Scale a decimal amount string up to an integer with `precision` implied
/// fractional digits.
///
/// Leading and trailing whitespace is ignored. The input is split on the first
/// `.`; the integer and fractional digit strings are concatenated and the
/// result is multiplied by `10^(precision - fractional_len)` when that exponent
/// is positive. See the module documentation for the two behaviours that
/// differ from textbook fixed-point scaling.
///
/// # Errors
///
/// Returns a parse error ([`AmountError::InvalidCharacter`] or
/// [`AmountError::NoDigits`]) when the input contains anything other than
/// ASCII digits and a single separator, and [`AmountError::PrecisionOutOfRange`]
/// when the scaling exponent does not fit in a `u32` and the value is not zero.
///
/// # Examples
///
/// ```
/// use eip7702_swap::to_scaled_integer;
/// use num_bigint::BigUint;
///
/// assert_eq!(to_scaled_integer("1", 2).unwrap(), BigUint::from(100u32));
/// assert_eq!(to_scaled_integer("0.123", 2).unwrap(), BigUint::from(123u32));
/// assert!(to_scaled_integer("-1", 2).is_err());
/// ```
pub fn to_scaled_integer(value: &str, precision: i64) -> Result<BigUint, AmountError> {
    let value = value.trim();
    validate_digits(value)?;

    let (integer_part, fractional_part) = value
        .split_once(SEPARATOR)
        .unwrap_or((value, DEFAULT_FRACTION));

    let fractional_len = i64::try_from(fractional_part.len()).unwrap_or(i64::MAX);
    let exponent = precision.saturating_sub(fractional_len).max(0);

    let digits = format!("{integer_part}{fractional_part}");
    let base = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| AmountError::NoDigits {
        input: value.to_string(),
    })?;

    if exponent == 0 || base.is_zero() {
        return Ok(base);
    }

    let exponent = u32::try_from(exponent)
        .map_err(|_| AmountError::PrecisionOutOfRange { precision })?;
    Ok(base * pow10(exponent))
}

/// Render a scaled integer as a whole number of tokens.
///
/// Divides by `10^max(0, precision)` with floor division and returns the
/// quotient's decimal string. The fractional component is discarded: this is
/// not a decimal rendering. `None` yields `"0"`.
///
/// # Examples
///
/// ```
/// use eip7702_swap::to_decimal_string;
/// use num_bigint::BigUint;
///
/// let wei = BigUint::from(1_500_000_000_000_000_000u64);
/// assert_eq!(to_decimal_string(Some(&wei), 18), "1");
/// assert_eq!(to_decimal_string(None, 18), "0");
/// assert_eq!(to_decimal_string(Some(&wei), -1), "1500000000000000000");
/// ```
pub fn to_decimal_string(scaled: Option<&BigUint>, precision: i64) -> String {
    let Some(scaled) = scaled else {
        return "0".to_string();
    };

    let exponent = precision.max(0).unsigned_abs();
    if exponent == 0 {
        return scaled.to_string();
    }

    // 10^e > 2^e, so any exponent above the bit length divides to zero
    if exponent > scaled.bits() {
        return "0".to_string();
    }

    // bits() of anything representable in memory fits in u32 here
    let divisor = pow10(u32::try_from(exponent).unwrap_or(u32::MAX));
    (scaled / divisor).to_string()
}

/// Render a scaled integer as a decimal number with `decimals` fractional
/// digits, trailing zeros trimmed.
///
/// Unlike [`to_decimal_string`] this keeps the fractional part, so it is meant
/// for display next to the truncated form rather than as a replacement.
///
/// # Examples
///
/// ```
/// use eip7702_swap::format_fixed_point;
/// use num_bigint::BigUint;
///
/// let wei = BigUint::from(1_500_000_000_000_000_000u64);
/// assert_eq!(format_fixed_point(&wei, 18), "1.5");
/// assert_eq!(format_fixed_point(&BigUint::from(100_000_000u64), 6), "100");
/// ```
pub fn format_fixed_point(scaled: &BigUint, decimals: u8) -> String {
    if decimals == 0 {
        return scaled.to_string();
    }

    let divisor = pow10(u32::from(decimals));
    let whole = scaled / &divisor;
    let fractional = (scaled % &divisor).to_string();

    let width = usize::from(decimals);
    let padded = format!("{}{fractional}", "0".repeat(width.saturating_sub(fractional.len())));
    let trimmed = padded.trim_end_matches('0');

    if trimmed.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Narrow an arbitrary-precision amount to an ABI `uint256`.
///
/// # Errors
///
/// Returns [`AmountError::Overflow`] if the value needs more than 256 bits.
pub fn to_u256(value: &BigUint) -> Result<U256, AmountError> {
    if value.is_zero() {
        return Ok(U256::ZERO);
    }
    U256::try_from_be_slice(&value.to_bytes_be()).ok_or_else(|| AmountError::Overflow {
        value: value.to_string(),
    })
}

/// Widen an ABI `uint256` to an arbitrary-precision integer.
pub fn from_u256(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// Accept ASCII digits with at most one separator and at least one digit.
fn validate_digits(value: &str) -> Result<(), AmountError> {
    let separator = value.find(SEPARATOR);

    for (position, found) in value.char_indices() {
        if found.is_ascii_digit() || Some(position) == separator {
            continue;
        }
        return Err(AmountError::InvalidCharacter {
            input: value.to_string(),
            found,
            position,
        });
    }

    // No separator means the default fractional digit stands in
    if separator.is_some() && !value.bytes().any(|b| b.is_ascii_digit()) {
        return Err(AmountError::NoDigits {
            input: value.to_string(),
        });
    }

    Ok(())
}
