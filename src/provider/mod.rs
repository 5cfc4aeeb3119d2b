// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Signing provider construction
//!
//! The flow talks to a single chain through one type-erased provider that holds
//! every account's signer. The wallet filler picks the signer matching each
//! request's `from` address, so the sponsor and the authority share one
//! connection.
//!
//! - [`ProviderConfig`] - endpoint URL plus retry and logging switches
//! - [`create_wallet_provider`] - builds the layered client and the provider
//!
//! # Example
//!
//! ```rust,ignore
//! use eip7702_swap::provider::{create_wallet_provider, ProviderConfig};
//!
//! let provider = create_wallet_provider(&ProviderConfig::new(rpc_url), wallet)?;
//! let chain_id = provider.get_chain_id().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_wallet_provider;

use alloy_network::Ethereum;

/// Type-erased Ethereum provider with a wallet filler
pub type WalletProvider = alloy_provider::DynProvider<Ethereum>;
