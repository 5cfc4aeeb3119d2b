// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the eip7702-swap library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`AmountError`],
//!   [`AuthorizationError`], [`ReceiptError`], ...)
//! - **Unified error type** ([`SwapFlowError`]) for the end-to-end flow, where
//!   callers usually only need to report what went wrong
//!
//! [`RpcError`] provides shared variants for blockchain RPC operations and is
//! wrapped by the other error types.
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust
//! use eip7702_swap::{to_scaled_integer, AmountError};
//!
//! match to_scaled_integer("1.5", 18) {
//!     Ok(scaled) => println!("scaled: {scaled}"),
//!     Err(AmountError::InvalidCharacter { found, .. }) => eprintln!("bad char {found}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use eip7702_swap::{DelegatedSwapFlow, SwapFlowError};
//!
//! async fn example(flow: DelegatedSwapFlow<P>) -> Result<(), SwapFlowError> {
//!     let report = flow.run().await?;
//!     println!("swap tx: {}", report.swap_tx);
//!     Ok(())
//! }
//! ```

mod amount;
mod authorization;
mod config;
mod receipt;
mod rpc;

pub use amount::AmountError;
pub use authorization::AuthorizationError;
pub use config::ConfigError;
pub use receipt::ReceiptError;
pub use rpc::RpcError;

/// Unified error type for the delegated swap flow.
///
/// All module-specific error types convert into `SwapFlowError` via `From`,
/// so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum SwapFlowError {
    /// Error converting a token amount.
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    /// Error in the flow configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error signing or assembling the authorization.
    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// A transaction did not confirm.
    #[error("Receipt error: {0}")]
    Receipt(#[from] ReceiptError),

    /// Error talking to the chain.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The authority's code does not delegate to the expected contract.
    #[error("Account {authority} is not delegated to {expected} (code: {code})")]
    DelegationMismatch {
        /// Account that signed the authorization
        authority: String,
        /// Contract the account should delegate to
        expected: String,
        /// Hex code found at the account
        code: String,
    },
}
