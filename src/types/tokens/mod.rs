// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for token-related values
//!
//! # Type Relationships
//!
//! ```text
//! "0.01" (decimal string, human input)
//!     |
//!     | TokenAmount::from_decimal_str(TokenDecimals)
//!     ↓
//! TokenAmount (U256, raw)
//!     |
//!     | whole_tokens(TokenDecimals) / display(TokenDecimals)
//!     ↓
//! String (log output)
//! ```

mod amount;
mod decimals;

pub use amount::TokenAmount;
pub use decimals::TokenDecimals;
