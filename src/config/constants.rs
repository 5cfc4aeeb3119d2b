// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses and defaults
//!
//! Defaults target BNB Smart Chain testnet, where the router below is deployed
//! and accepts EIP-7702 delegation.

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};

/// Public BSC testnet RPC endpoint
pub const BSC_TESTNET_RPC: &str = "https://bsc-testnet.bnbchain.org";

/// Chain the defaults belong to
pub const DEFAULT_CHAIN: NamedChain = NamedChain::BinanceSmartChainTestnet;

/// Well-known contract addresses on BSC testnet
pub mod bsc_testnet {
    use super::*;

    /// Simple V2-style router used as the delegated code
    ///
    /// Contract: 0x66c488c48fF2CB17450391D24b923A92e5f6da5C
    pub const ROUTER: Address = address!("66c488c48ff2cb17450391d24b923a92e5f6da5c");

    /// Testnet USDT
    ///
    /// Contract: 0x11952129E0583F4d1DF5E93384Be07C405C11D6b
    pub const USDT: Address = address!("11952129e0583f4d1df5e93384be07c405c11d6b");

    /// Wrapped BNB
    ///
    /// Contract: 0xae13d989daC2f0dEbFf460aC112a837C89BAa7cd
    pub const WBNB: Address = address!("ae13d989dac2f0debff460ac112a837c89baa7cd");
}

/// Gas limit for both the set-code and the swap transaction
pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;

/// How long to wait for the set-code transaction
pub const DELEGATION_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// How long to wait for the swap transaction
pub const SWAP_RECEIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between receipt polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Swap deadline, relative to submission time
pub const SWAP_DEADLINE: Duration = Duration::from_secs(300);

/// Default swap: 0.01 WBNB for at least "1" USDT scaled at precision 2
pub mod swap_defaults {
    /// Token sold
    pub const TOKEN_IN: &str = "WBNB";
    /// Token bought
    pub const TOKEN_OUT: &str = "USDT";
    /// Amount sold, in token_in units
    pub const AMOUNT_IN: &str = "0.01";
    /// Minimum amount bought
    pub const AMOUNT_OUT_MIN: &str = "1";
    /// Precision `AMOUNT_OUT_MIN` is scaled with
    pub const AMOUNT_OUT_MIN_PRECISION: i64 = 2;
}

/// Environment variable names read by [`crate::SwapFlowConfig::from_env`]
pub mod env {
    /// RPC endpoint URL
    pub const RPC_URL: &str = "RPC_URL";
    /// Router (delegate) contract address
    pub const ROUTER_ADDRESS: &str = "ROUTER_ADDRESS";
    /// `SYMBOL=0xADDRESS` pairs, comma separated
    pub const TOKEN_ADDRESSES: &str = "TOKEN_ADDRESSES";
    /// Chain id override
    pub const CHAIN_ID: &str = "CHAIN_ID";
    /// Gas limit override
    pub const GAS_LIMIT: &str = "GAS_LIMIT";
    /// Symbol of the token sold
    pub const TOKEN_IN: &str = "TOKEN_IN";
    /// Symbol of the token bought
    pub const TOKEN_OUT: &str = "TOKEN_OUT";
    /// Decimal amount sold
    pub const AMOUNT_IN: &str = "AMOUNT_IN";
    /// Decimal minimum amount bought
    pub const AMOUNT_OUT_MIN: &str = "AMOUNT_OUT_MIN";
    /// Private key of the account that delegates its code
    pub const AUTHORITY_PRIVATE_KEY: &str = "AUTHORITY_PRIVATE_KEY";
    /// Private key of the account that pays for the set-code transaction
    pub const SPONSOR_PRIVATE_KEY: &str = "SPONSOR_PRIVATE_KEY";
}
