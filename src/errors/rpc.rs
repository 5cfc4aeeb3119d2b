// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for blockchain provider operations.
//!
//! This module provides error types for common RPC failures that can occur
//! across the flow when talking to the chain: reads (code, balances, chain id),
//! contract calls and transaction submission.

/// Errors that can occur during blockchain RPC operations.
///
/// Each variant carries a short description of what was being attempted so
/// that a failure deep inside the flow is still readable in the logs.
///
/// # Examples
///
/// ```rust
/// use eip7702_swap::RpcError;
///
/// let error = RpcError::ProviderUrlInvalid("relative URL without a base".to_string());
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The configured RPC endpoint is not a valid URL.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Failed to connect to the blockchain or execute a read-only RPC call.
    ///
    /// This is a catch-all for read failures such as network errors, timeouts,
    /// or provider downtime.
    #[error("Chain connection failed during {operation}")]
    ChainConnectionFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A contract `eth_call` failed or returned undecodable data.
    #[error("Contract call failed: {operation}")]
    CallFailed {
        /// Description of the call (e.g. "WBNB.balanceOf")
        operation: String,
        /// The underlying contract error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Submitting a transaction was rejected by the node or the signer.
    #[error("Failed to send transaction: {operation}")]
    SendFailed {
        /// Description of the transaction being sent
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch a transaction receipt.
    ///
    /// A receipt that simply does not exist yet is not an error; this variant
    /// means the RPC call itself failed.
    #[error("Failed to fetch receipt for transaction {tx_hash}")]
    GetReceiptFailed {
        /// The transaction hash whose receipt was requested
        tx_hash: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the current block number.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RpcError {
    /// Helper to create a `ChainConnectionFailed` error from any error type.
    pub fn chain_connection_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ChainConnectionFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `SendFailed` error from any error type.
    pub fn send_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::SendFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetReceiptFailed` error from any error type.
    pub fn get_receipt_failed(
        tx_hash: impl std::fmt::Display,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetReceiptFailed {
            tx_hash: tx_hash.to_string(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }
}
