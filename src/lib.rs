// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! EIP-7702 delegated swaps
//!
//! An authority account signs a set-code authorization pointing at a swap
//! router, a sponsor submits it, and the authority then calls the router's
//! `swapExactTokensForTokens` on its own address.
//!
//! The pieces are usable on their own:
//!
//! - [`to_scaled_integer`] / [`to_decimal_string`] convert between decimal
//!   strings and scaled integers
//! - [`Account`] signs authorizations
//! - [`delegation`] builds set-code transactions and checks designators
//! - [`wait_for_receipt`] polls for receipts with a deadline
//! - [`DelegatedSwapFlow`] ties them together
//!
//! ```rust
//! use eip7702_swap::{to_decimal_string, to_scaled_integer};
//!
//! let scaled = to_scaled_integer("0.01", 18).unwrap();
//! assert_eq!(scaled.to_string(), "10000000000000000");
//! assert_eq!(to_decimal_string(Some(&scaled), 16), "1");
//! ```

pub mod amount;
mod authorization;
pub mod bootstrap;
pub mod config;
pub mod contracts;
pub mod delegation;
pub mod errors;
mod flow;
pub mod provider;
mod receipt;
mod spans;
pub mod transport;
pub mod types;

pub use amount::{format_fixed_point, from_u256, to_decimal_string, to_scaled_integer, to_u256};
pub use authorization::Account;
pub use config::{SwapFlowConfig, SwapFlowConfigBuilder, SwapSettings};
pub use errors::{
    AmountError, AuthorizationError, ConfigError, ReceiptError, RpcError, SwapFlowError,
};
pub use flow::{scale_swap_amounts, DelegatedSwapFlow, FlowReport, SwapBalances, TokenInfo};
pub use provider::{create_wallet_provider, ProviderConfig, WalletProvider};
pub use receipt::{
    wait_for_receipt, Backoff, ProviderReceipts, ReceiptOutcome, ReceiptPolicy, ReceiptSource,
    ReceiptSummary,
};
pub use types::tokens::{TokenAmount, TokenDecimals};
