// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for accounts and EIP-7702 authorizations.

use super::RpcError;

/// Errors that can occur while loading an account or producing a signed
/// set-code authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    /// The private key is not a valid secp256k1 secret.
    #[error("Invalid private key")]
    InvalidPrivateKey {
        /// The underlying signer error
        #[source]
        source: alloy_signer_local::LocalSignerError,
    },

    /// Signing the authorization hash failed.
    #[error("Failed to sign authorization for delegate {delegate}")]
    SigningFailed {
        /// Address the authority tried to delegate to
        delegate: String,
        /// The underlying signer error
        #[source]
        source: alloy_signer::Error,
    },

    /// A set-code transaction must carry at least one authorization.
    #[error("Set-code transaction requires a non-empty authorization list")]
    EmptyList,

    /// Resolving chain id or nonce from the node failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}
