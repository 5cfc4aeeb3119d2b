// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::decimals::TokenDecimals;
use crate::amount::{format_fixed_point, from_u256, to_decimal_string, to_scaled_integer, to_u256};
use crate::errors::AmountError;

/// Raw token amount as stored on-chain, in the token's smallest unit
///
/// This is the value passed to and returned from contract calls. Convert from
/// human input with [`from_decimal_str`](Self::from_decimal_str) and back for
/// logging with [`whole_tokens`](Self::whole_tokens) or
/// [`display`](Self::display).
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use eip7702_swap::{TokenAmount, TokenDecimals};
///
/// let amount = TokenAmount::from_decimal_str("0.01", TokenDecimals::STANDARD).unwrap();
/// assert_eq!(amount.as_u256(), U256::from(10_000_000_000_000_000u64));
/// assert_eq!(amount.whole_tokens(TokenDecimals::STANDARD), "0");
/// assert_eq!(amount.display(TokenDecimals::STANDARD), "0.01");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Scale a decimal string with [`to_scaled_integer`] and narrow it to
    /// `uint256`.
    pub fn from_decimal_str(value: &str, decimals: TokenDecimals) -> Result<Self, AmountError> {
        Self::from_decimal_str_with_precision(value, decimals.precision())
    }

    /// Like [`from_decimal_str`](Self::from_decimal_str) with an explicit
    /// precision that need not match any token's decimals.
    pub fn from_decimal_str_with_precision(value: &str, precision: i64) -> Result<Self, AmountError> {
        let scaled = to_scaled_integer(value, precision)?;
        Ok(Self(to_u256(&scaled)?))
    }

    /// Widen to an arbitrary-precision integer.
    pub fn to_big_uint(&self) -> BigUint {
        from_u256(self.0)
    }

    /// Whole tokens, fraction dropped (see [`to_decimal_string`]).
    pub fn whole_tokens(&self, decimals: TokenDecimals) -> String {
        to_decimal_string(Some(&self.to_big_uint()), decimals.precision())
    }

    /// Full decimal rendering with trailing zeros trimmed.
    pub fn display(&self, decimals: TokenDecimals) -> String {
        format_fixed_point(&self.to_big_uint(), decimals.as_u8())
    }

    /// Difference `self - earlier`, or `None` if the amount went down.
    pub fn checked_gain_over(&self, earlier: Self) -> Option<Self> {
        self.0.checked_sub(earlier.0).map(Self)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
