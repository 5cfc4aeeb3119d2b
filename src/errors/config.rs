// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading and querying the flow configuration.

/// Errors raised while building a [`crate::SwapFlowConfig`] or resolving
/// values from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required environment variable {name}")]
    MissingVar {
        /// Variable name
        name: String,
    },

    /// A value could not be parsed as an address.
    #[error("Invalid address for {field}: {value:?}")]
    InvalidAddress {
        /// Which setting held the address
        field: String,
        /// The raw value
        value: String,
    },

    /// A value could not be parsed as an integer.
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Which setting held the number
        field: String,
        /// The raw value
        value: String,
    },

    /// A `SYMBOL=0xADDRESS` token list entry is malformed.
    #[error("Invalid token entry {entry:?}, expected SYMBOL=0xADDRESS")]
    InvalidTokenEntry {
        /// The malformed entry
        entry: String,
    },

    /// A token symbol is not present in the token address map.
    #[error("Unknown token symbol {symbol}")]
    UnknownToken {
        /// The requested symbol
        symbol: String,
    },
}
