// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::EthereumWallet;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_client::{ClientBuilder, RpcClient};

use crate::errors::RpcError;
use crate::transport::{LoggingLayer, RetryLayer};

use super::config::ProviderConfig;
use super::WalletProvider;

/// Create a signing HTTP provider with the given configuration
///
/// The provider uses alloy's recommended fillers (nonce, gas, chain id) plus a
/// wallet filler, so transaction requests only need `from`, `to`, call data
/// and, for set-code transactions, the authorization list. `from` selects the
/// signer among those registered in `wallet`.
///
/// # Examples
///
/// ```rust,ignore
/// use alloy_network::EthereumWallet;
/// use eip7702_swap::provider::{create_wallet_provider, ProviderConfig};
///
/// let mut wallet = EthereumWallet::from(authority.signer().clone());
/// wallet.register_signer(sponsor.signer().clone());
///
/// let provider = create_wallet_provider(
///     &ProviderConfig::public_endpoint("https://bsc-testnet.bnbchain.org"),
///     wallet,
/// )?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_wallet_provider(
    config: &ProviderConfig,
    wallet: EthereumWallet,
) -> Result<WalletProvider, RpcError> {
    let client = build_client(config)?;

    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(client)
        .erased())
}

/// Build the layered RPC client described by `config`.
fn build_client(config: &ProviderConfig) -> Result<RpcClient, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e: url::ParseError| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let logging = if config.log_payloads {
        LoggingLayer::new().with_payloads()
    } else {
        LoggingLayer::new()
    };

    // Each layer combination is a distinct client type until `http` erases it
    let client = match (&config.retry, config.logging_enabled) {
        (Some(retry), true) => ClientBuilder::default()
            .layer(logging)
            .layer(RetryLayer::from_config(retry.clone()))
            .http(url),
        (Some(retry), false) => ClientBuilder::default()
            .layer(RetryLayer::from_config(retry.clone()))
            .http(url),
        (None, true) => ClientBuilder::default().layer(logging).http(url),
        (None, false) => ClientBuilder::default().http(url),
    };

    Ok(client)
}
