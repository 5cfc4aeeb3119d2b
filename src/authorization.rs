// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Accounts and EIP-7702 set-code authorizations
//!
//! An [`Account`] wraps a local private key. The authority uses it to sign an
//! [`Authorization`] naming the contract whose code it adopts; the sponsor's
//! account only needs an address here, since its signer lives in the provider's
//! wallet.
//!
//! # Example
//!
//! ```rust
//! use eip7702_swap::Account;
//! use eip7702_swap::config::constants::bsc_testnet;
//!
//! let authority = Account::from_private_key(
//!     "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
//! )
//! .unwrap();
//! let signed = authority.sign_authorization(bsc_testnet::ROUTER, 97, 0).unwrap();
//! assert_eq!(signed.address, bsc_testnet::ROUTER);
//! ```

use alloy_eips::eip7702::{Authorization, SignedAuthorization};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use tracing::{debug, info, Instrument};

use crate::errors::{AuthorizationError, RpcError};
use crate::spans;

/// A locally held key pair.
#[derive(Debug, Clone)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    /// Load an account from a hex private key, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::InvalidPrivateKey`] if the string is not a
    /// 32-byte hex secret on the secp256k1 curve.
    pub fn from_private_key(key: &str) -> Result<Self, AuthorizationError> {
        let signer = key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|source| AuthorizationError::InvalidPrivateKey { source })?;
        Ok(Self { signer })
    }

    /// The account's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The underlying signer, for registering in a wallet.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign an authorization delegating this account's code to `target`.
    ///
    /// `nonce` must equal the account's nonce at the time the set-code
    /// transaction executes, or the authorization is skipped by the chain.
    pub fn sign_authorization(
        &self,
        target: Address,
        chain_id: u64,
        nonce: u64,
    ) -> Result<SignedAuthorization, AuthorizationError> {
        let authorization = Authorization {
            chain_id: U256::from(chain_id),
            address: target,
            nonce,
        };

        let signature = self
            .signer
            .sign_hash_sync(&authorization.signature_hash())
            .map_err(|source| AuthorizationError::SigningFailed {
                delegate: target.to_string(),
                source,
            })?;

        Ok(authorization.into_signed(signature))
    }

    /// Sign an authorization for `target`, filling chain id and nonce from the node
    ///
    /// A missing `chain_id` is read with `eth_chainId`. A missing `nonce` is the
    /// account's transaction count; when the account also sends the set-code
    /// transaction (`sponsor == self.address()`), that transaction consumes the
    /// current nonce first, so the authorization uses the next one.
    pub async fn authorize<P>(
        &self,
        provider: &P,
        target: Address,
        chain_id: Option<u64>,
        nonce: Option<u64>,
        sponsor: Address,
    ) -> Result<SignedAuthorization, AuthorizationError>
    where
        P: Provider,
    {
        let span = spans::sign_authorization(self.address(), target);

        async move {
            let chain_id = match chain_id {
                Some(id) => id,
                None => provider
                    .get_chain_id()
                    .await
                    .map_err(|e| RpcError::chain_connection_failed("get_chain_id", e))?,
            };

            let nonce = match nonce {
                Some(nonce) => nonce,
                None => {
                    let count = provider
                        .get_transaction_count(self.address())
                        .await
                        .map_err(|e| RpcError::call_failed("get_transaction_count", e))?;
                    authorization_nonce(count, self.address() == sponsor)
                }
            };

            tracing::Span::current().record("chain_id", chain_id);
            tracing::Span::current().record("nonce", nonce);
            debug!("Signing set-code authorization");

            let signed = self.sign_authorization(target, chain_id, nonce)?;
            info!(delegate = %target, chain_id, nonce, "Authorization signed");
            Ok(signed)
        }
        .instrument(span)
        .await
    }
}

/// Nonce an authorization must carry given the authority's transaction count.
pub(crate) fn authorization_nonce(transaction_count: u64, self_sponsored: bool) -> u64 {
    if self_sponsored {
        transaction_count + 1
    } else {
        transaction_count
    }
}
