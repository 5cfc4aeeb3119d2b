// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for fixed-point amount conversion.

/// Errors that can occur while converting decimal token amounts.
///
/// [`InvalidCharacter`](Self::InvalidCharacter) and [`NoDigits`](Self::NoDigits)
/// are parse errors: the input could not be read as an unsigned decimal
/// number. They are never coerced to zero.
///
/// # Examples
///
/// ```rust
/// use eip7702_swap::{to_scaled_integer, AmountError};
///
/// let err = to_scaled_integer("12a.3", 18).unwrap_err();
/// assert!(err.is_parse_error());
/// assert!(matches!(err, AmountError::InvalidCharacter { found: 'a', .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount contains a character outside the digit/separator alphabet.
    #[error("Invalid decimal amount {input:?}: unexpected character {found:?} at byte {position}")]
    InvalidCharacter {
        /// The trimmed input as given by the caller
        input: String,
        /// The offending character
        found: char,
        /// Byte offset of the offending character within `input`
        position: usize,
    },

    /// The amount has no digits at all (e.g. `"."` or an empty string
    /// after a separator).
    #[error("Invalid decimal amount {input:?}: no digits")]
    NoDigits {
        /// The trimmed input as given by the caller
        input: String,
    },

    /// The scaling exponent is too large to compute.
    #[error("Precision {precision} is out of range")]
    PrecisionOutOfRange {
        /// The precision requested by the caller
        precision: i64,
    },

    /// The scaled value does not fit in an ABI `uint256`.
    #[error("Amount {value} does not fit in 256 bits")]
    Overflow {
        /// Decimal rendering of the value that overflowed
        value: String,
    },
}

impl AmountError {
    /// Returns `true` if the input could not be parsed as a decimal amount.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AmountError::InvalidCharacter { .. } | AmountError::NoDigits { .. }
        )
    }
}
