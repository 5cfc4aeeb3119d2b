// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token decimal precision type

use serde::{Deserialize, Serialize};

/// BEP-20 / ERC-20 token decimal precision
///
/// The number of fractional decimal digits encoded by a token's integer
/// balances. Read from the token's `decimals()` view and passed to the
/// fixed-point conversions as their precision.
///
/// # Examples
///
/// ```
/// use eip7702_swap::TokenDecimals;
///
/// let wbnb = TokenDecimals::STANDARD;
/// assert_eq!(wbnb.as_u8(), 18);
/// assert_eq!(wbnb.precision(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Maximum reasonable decimals (following ERC-20 convention)
    pub const MAX_REASONABLE: u8 = 18;

    /// Standard decimals for native-like tokens such as WBNB and WETH (18)
    pub const STANDARD: Self = Self(18);

    /// Six-decimal stablecoins (USDT on most chains, USDC)
    pub const SIX: Self = Self(6);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Precision argument for [`crate::to_scaled_integer`] and
    /// [`crate::to_decimal_string`].
    pub const fn precision(&self) -> i64 {
        self.0 as i64
    }

    /// Check if decimals are in reasonable range (0-18)
    ///
    /// Values over 18 are legal on-chain but unusual enough that the flow
    /// logs a warning when it meets one.
    pub const fn is_reasonable(&self) -> bool {
        self.0 <= Self::MAX_REASONABLE
    }
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}
