// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the delegated swap flow
//!
//! Everything the flow needs besides the two accounts lives in
//! [`SwapFlowConfig`], which is passed explicitly into
//! [`crate::DelegatedSwapFlow`]. Defaults target BSC testnet.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use eip7702_swap::SwapFlowConfig;
//!
//! let config = SwapFlowConfig::default();
//! assert_eq!(config.swap.amount_in, "0.01");
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use eip7702_swap::SwapFlowConfigBuilder;
//! use std::time::Duration;
//!
//! let config = SwapFlowConfigBuilder::with_defaults()
//!     .rpc_endpoint("http://localhost:8545")
//!     .chain_id(97)
//!     .amount_in("0.5")
//!     .swap_receipt_timeout(Duration::from_secs(60))
//!     .build();
//! assert_eq!(config.rpc_endpoint(), "http://localhost:8545");
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use eip7702_swap::SwapFlowConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = SwapFlowConfig::from_env()?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::Address;

use crate::errors::ConfigError;
use crate::provider::ProviderConfig;
use crate::receipt::ReceiptPolicy;

pub mod constants;

use constants::{bsc_testnet, env, swap_defaults};

/// What to swap, and how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapSettings {
    /// Symbol of the token sold
    pub token_in: String,
    /// Symbol of the token bought
    pub token_out: String,
    /// Decimal amount sold, scaled by `token_in`'s decimals
    pub amount_in: String,
    /// Decimal minimum amount bought
    pub amount_out_min: String,
    /// Precision `amount_out_min` is scaled with
    ///
    /// `None` scales it by `token_out`'s decimals.
    pub amount_out_min_precision: Option<i64>,
    /// Swap deadline, relative to submission time
    pub deadline: Duration,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            token_in: swap_defaults::TOKEN_IN.to_string(),
            token_out: swap_defaults::TOKEN_OUT.to_string(),
            amount_in: swap_defaults::AMOUNT_IN.to_string(),
            amount_out_min: swap_defaults::AMOUNT_OUT_MIN.to_string(),
            amount_out_min_precision: Some(swap_defaults::AMOUNT_OUT_MIN_PRECISION),
            deadline: constants::SWAP_DEADLINE,
        }
    }
}

/// Configuration for one delegated swap run
///
/// Use [`SwapFlowConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapFlowConfig {
    /// Endpoint plus retry and logging switches
    pub provider: ProviderConfig,

    /// Contract the authority delegates its code to
    /// Default: the BSC testnet router
    pub router_address: Address,

    /// Token symbol (upper case) to address
    pub token_addresses: HashMap<String, Address>,

    /// Chain id to sign the authorization for
    /// Default: None (ask the node)
    pub chain_id: Option<u64>,

    /// Gas limit for both transactions
    pub gas_limit: u64,

    /// The swap itself
    pub swap: SwapSettings,

    /// Wait for the set-code transaction
    /// Default: 120 seconds
    pub delegation_receipt: ReceiptPolicy,

    /// Wait for the swap transaction
    /// Default: 30 seconds
    pub swap_receipt: ReceiptPolicy,
}

impl Default for SwapFlowConfig {
    fn default() -> Self {
        Self::bsc_testnet()
    }
}

impl SwapFlowConfig {
    /// BSC testnet endpoint, router, USDT and WBNB.
    pub fn bsc_testnet() -> Self {
        let token_addresses = HashMap::from([
            ("USDT".to_string(), bsc_testnet::USDT),
            ("WBNB".to_string(), bsc_testnet::WBNB),
        ]);

        Self {
            provider: ProviderConfig::public_endpoint(constants::BSC_TESTNET_RPC),
            router_address: bsc_testnet::ROUTER,
            token_addresses,
            chain_id: None,
            gas_limit: constants::DEFAULT_GAS_LIMIT,
            swap: SwapSettings::default(),
            delegation_receipt: ReceiptPolicy::new(constants::DELEGATION_RECEIPT_TIMEOUT),
            swap_receipt: ReceiptPolicy::new(constants::SWAP_RECEIPT_TIMEOUT),
        }
    }

    /// Load configuration from the process environment
    ///
    /// Reads the variables named in [`constants::env`] through `dotenvy`, so a
    /// `.env` file loaded beforehand is honoured. Unset variables keep their
    /// defaults. Private keys are not read here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Like [`SwapFlowConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eip7702_swap::SwapFlowConfig;
    ///
    /// let config = SwapFlowConfig::from_lookup(|name| match name {
    ///     "CHAIN_ID" => Some("56".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.chain_id, Some(56));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut builder = SwapFlowConfigBuilder::with_defaults();

        if let Some(url) = var(env::RPC_URL) {
            builder = builder.rpc_endpoint(url);
        }
        if let Some(router) = var(env::ROUTER_ADDRESS) {
            builder = builder.router_address(parse_address(env::ROUTER_ADDRESS, &router)?);
        }
        if let Some(tokens) = var(env::TOKEN_ADDRESSES) {
            for (symbol, address) in parse_token_addresses(&tokens)? {
                builder = builder.token(symbol, address);
            }
        }
        if let Some(chain_id) = var(env::CHAIN_ID) {
            builder = builder.chain_id(parse_number(env::CHAIN_ID, &chain_id)?);
        }
        if let Some(gas_limit) = var(env::GAS_LIMIT) {
            builder = builder.gas_limit(parse_number(env::GAS_LIMIT, &gas_limit)?);
        }
        if let Some(token_in) = var(env::TOKEN_IN) {
            builder = builder.token_in(token_in);
        }
        if let Some(token_out) = var(env::TOKEN_OUT) {
            builder = builder.token_out(token_out);
        }
        if let Some(amount_in) = var(env::AMOUNT_IN) {
            builder = builder.amount_in(amount_in);
        }
        if let Some(amount_out_min) = var(env::AMOUNT_OUT_MIN) {
            builder = builder.amount_out_min(amount_out_min);
        }

        Ok(builder.build())
    }

    /// RPC endpoint URL
    pub fn rpc_endpoint(&self) -> &str {
        &self.provider.url
    }

    /// Resolve a token symbol, ignoring case
    ///
    /// # Example
    ///
    /// ```rust
    /// use eip7702_swap::SwapFlowConfig;
    /// use eip7702_swap::config::constants::bsc_testnet;
    ///
    /// let config = SwapFlowConfig::default();
    /// assert_eq!(config.token("usdt").unwrap(), bsc_testnet::USDT);
    /// assert!(config.token("DAI").is_err());
    /// ```
    pub fn token(&self, symbol: &str) -> Result<Address, ConfigError> {
        self.token_addresses
            .get(&symbol.trim().to_ascii_uppercase())
            .copied()
            .ok_or_else(|| ConfigError::UnknownToken {
                symbol: symbol.to_string(),
            })
    }
}

/// Builder for [`SwapFlowConfig`]
///
/// # Example
///
/// ```rust
/// use eip7702_swap::SwapFlowConfigBuilder;
/// use alloy_primitives::address;
///
/// let config = SwapFlowConfigBuilder::new()
///     .rpc_endpoint("http://localhost:8545")
///     .token("busd", address!("ed24fc36d5ee211ea25a80239fb8c4cfd80f12ee"))
///     .token_out("BUSD")
///     .build();
/// assert!(config.token("BUSD").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SwapFlowConfigBuilder {
    config: SwapFlowConfig,
}

impl Default for SwapFlowConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapFlowConfigBuilder {
    /// Start from the BSC testnet defaults with an empty token map
    pub fn new() -> Self {
        let mut config = SwapFlowConfig::bsc_testnet();
        config.token_addresses.clear();
        Self { config }
    }

    /// Start from [`SwapFlowConfig::bsc_testnet`], tokens included
    pub fn with_defaults() -> Self {
        Self {
            config: SwapFlowConfig::bsc_testnet(),
        }
    }

    /// Set the RPC endpoint URL
    pub fn rpc_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.provider.url = url.into();
        self
    }

    /// Replace the provider configuration (endpoint included)
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Set the delegate contract
    pub fn router_address(mut self, router: Address) -> Self {
        self.config.router_address = router;
        self
    }

    /// Add or replace a token; the symbol is stored upper case
    pub fn token(mut self, symbol: impl AsRef<str>, address: Address) -> Self {
        self.config
            .token_addresses
            .insert(symbol.as_ref().trim().to_ascii_uppercase(), address);
        self
    }

    /// Pin the chain id instead of asking the node
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = Some(chain_id);
        self
    }

    /// Set the gas limit for both transactions
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.config.gas_limit = gas_limit;
        self
    }

    /// Set the token sold
    pub fn token_in(mut self, symbol: impl Into<String>) -> Self {
        self.config.swap.token_in = symbol.into();
        self
    }

    /// Set the token bought
    pub fn token_out(mut self, symbol: impl Into<String>) -> Self {
        self.config.swap.token_out = symbol.into();
        self
    }

    /// Set the decimal amount sold
    pub fn amount_in(mut self, amount: impl Into<String>) -> Self {
        self.config.swap.amount_in = amount.into();
        self
    }

    /// Set the decimal minimum amount bought
    pub fn amount_out_min(mut self, amount: impl Into<String>) -> Self {
        self.config.swap.amount_out_min = amount.into();
        self
    }

    /// Set the precision `amount_out_min` is scaled with
    ///
    /// `None` scales it by the output token's decimals.
    pub fn amount_out_min_precision(mut self, precision: Option<i64>) -> Self {
        self.config.swap.amount_out_min_precision = precision;
        self
    }

    /// Set the swap deadline, relative to submission time
    pub fn swap_deadline(mut self, deadline: Duration) -> Self {
        self.config.swap.deadline = deadline;
        self
    }

    /// Replace the set-code receipt policy
    pub fn delegation_receipt(mut self, policy: ReceiptPolicy) -> Self {
        self.config.delegation_receipt = policy;
        self
    }

    /// Replace the swap receipt policy
    pub fn swap_receipt(mut self, policy: ReceiptPolicy) -> Self {
        self.config.swap_receipt = policy;
        self
    }

    /// Change only the swap receipt timeout
    pub fn swap_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.config.swap_receipt.timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SwapFlowConfig {
        self.config
    }
}

/// Parse `SYMBOL=0xADDRESS` pairs separated by commas
///
/// Symbols are upper-cased. Empty entries (a trailing comma) are skipped.
///
/// # Example
///
/// ```rust
/// use eip7702_swap::config::parse_token_addresses;
///
/// let tokens = parse_token_addresses(
///     "usdt=0x11952129E0583F4d1DF5E93384Be07C405C11D6b, WBNB=0xae13d989daC2f0dEbFf460aC112a837C89BAa7cd",
/// )
/// .unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert!(tokens.contains_key("USDT"));
/// ```
///
/// # Errors
///
/// [`ConfigError::InvalidTokenEntry`] for an entry without `=` or with an
/// empty symbol, [`ConfigError::InvalidAddress`] for an unparsable address.
pub fn parse_token_addresses(list: &str) -> Result<HashMap<String, Address>, ConfigError> {
    let mut tokens = HashMap::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (symbol, address) =
            entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidTokenEntry {
                    entry: entry.to_string(),
                })?;

        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(ConfigError::InvalidTokenEntry {
                entry: entry.to_string(),
            });
        }

        let address = parse_address(&symbol, address.trim())?;
        tokens.insert(symbol, address);
    }

    Ok(tokens)
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_number(field: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SwapFlowConfig::default();

        assert_eq!(config.rpc_endpoint(), constants::BSC_TESTNET_RPC);
        assert_eq!(config.router_address, bsc_testnet::ROUTER);
        assert_eq!(config.chain_id, None);
        assert_eq!(config.gas_limit, 3_000_000);
        assert_eq!(config.token("USDT").unwrap(), bsc_testnet::USDT);
        assert_eq!(config.token("WBNB").unwrap(), bsc_testnet::WBNB);

        assert_eq!(config.swap.token_in, "WBNB");
        assert_eq!(config.swap.token_out, "USDT");
        assert_eq!(config.swap.amount_in, "0.01");
        assert_eq!(config.swap.amount_out_min, "1");
        assert_eq!(config.swap.amount_out_min_precision, Some(2));
        assert_eq!(config.swap.deadline, Duration::from_secs(300));

        assert_eq!(config.delegation_receipt.timeout, Duration::from_secs(120));
        assert_eq!(config.swap_receipt.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_new_has_no_tokens() {
        let config = SwapFlowConfigBuilder::new().build();
        assert!(config.token_addresses.is_empty());
        assert_eq!(config.router_address, bsc_testnet::ROUTER);
    }

    #[test]
    fn test_builder_pattern() {
        let token = address!("0000000000000000000000000000000000000abc");
        let config = SwapFlowConfigBuilder::with_defaults()
            .rpc_endpoint("http://127.0.0.1:8545")
            .chain_id(31337)
            .gas_limit(500_000)
            .token("dai", token)
            .token_out("DAI")
            .amount_out_min_precision(None)
            .swap_deadline(Duration::from_secs(60))
            .build();

        assert_eq!(config.rpc_endpoint(), "http://127.0.0.1:8545");
        assert_eq!(config.chain_id, Some(31337));
        assert_eq!(config.gas_limit, 500_000);
        assert_eq!(config.token("DAI").unwrap(), token);
        assert_eq!(config.swap.token_out, "DAI");
        assert_eq!(config.swap.amount_out_min_precision, None);
        assert_eq!(config.swap.deadline, Duration::from_secs(60));
        // defaults survive
        assert_eq!(config.token("WBNB").unwrap(), bsc_testnet::WBNB);
    }

    #[test]
    fn test_token_lookup_is_case_insensitive() {
        let config = SwapFlowConfig::default();
        assert_eq!(config.token(" wbnb ").unwrap(), bsc_testnet::WBNB);
        assert_eq!(
            config.token("BUSD").unwrap_err(),
            ConfigError::UnknownToken {
                symbol: "BUSD".to_string()
            }
        );
    }

    #[test]
    fn test_parse_token_addresses() {
        let tokens = parse_token_addresses(
            "usdt=0x11952129E0583F4d1DF5E93384Be07C405C11D6b,,wbnb = 0xae13d989daC2f0dEbFf460aC112a837C89BAa7cd,",
        )
        .unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens["USDT"], bsc_testnet::USDT);
        assert_eq!(tokens["WBNB"], bsc_testnet::WBNB);
    }

    #[test]
    fn test_parse_token_addresses_rejects_malformed_entries() {
        assert_eq!(
            parse_token_addresses("USDT").unwrap_err(),
            ConfigError::InvalidTokenEntry {
                entry: "USDT".to_string()
            }
        );
        assert!(matches!(
            parse_token_addresses("=0x11952129E0583F4d1DF5E93384Be07C405C11D6b"),
            Err(ConfigError::InvalidTokenEntry { .. })
        ));
        assert_eq!(
            parse_token_addresses("USDT=0x1234").unwrap_err(),
            ConfigError::InvalidAddress {
                field: "USDT".to_string(),
                value: "0x1234".to_string()
            }
        );
    }

    #[test]
    fn test_from_lookup_without_variables_is_default() {
        let config = SwapFlowConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SwapFlowConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SwapFlowConfig::from_lookup(lookup_from(&[
            ("RPC_URL", "http://localhost:8545"),
            ("ROUTER_ADDRESS", "0x0000000000000000000000000000000000000001"),
            ("TOKEN_ADDRESSES", "CAKE=0x0000000000000000000000000000000000000002"),
            ("CHAIN_ID", "56"),
            ("GAS_LIMIT", "250000"),
            ("TOKEN_IN", "USDT"),
            ("TOKEN_OUT", "CAKE"),
            ("AMOUNT_IN", "12.5"),
            ("AMOUNT_OUT_MIN", " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.rpc_endpoint(), "http://localhost:8545");
        assert_eq!(config.router_address, Address::with_last_byte(1));
        assert_eq!(config.token("cake").unwrap(), Address::with_last_byte(2));
        assert_eq!(config.token("USDT").unwrap(), bsc_testnet::USDT);
        assert_eq!(config.chain_id, Some(56));
        assert_eq!(config.gas_limit, 250_000);
        assert_eq!(config.swap.token_in, "USDT");
        assert_eq!(config.swap.token_out, "CAKE");
        assert_eq!(config.swap.amount_in, "12.5");
        assert_eq!(config.swap.amount_out_min, "3");
    }

    #[test]
    fn test_from_lookup_empty_values_keep_defaults() {
        let config =
            SwapFlowConfig::from_lookup(lookup_from(&[("RPC_URL", ""), ("CHAIN_ID", "  ")]))
                .unwrap();
        assert_eq!(config.rpc_endpoint(), constants::BSC_TESTNET_RPC);
        assert_eq!(config.chain_id, None);
    }

    #[test]
    fn test_from_lookup_rejects_malformed_values() {
        assert_eq!(
            SwapFlowConfig::from_lookup(lookup_from(&[("CHAIN_ID", "bsc")])).unwrap_err(),
            ConfigError::InvalidNumber {
                field: "CHAIN_ID".to_string(),
                value: "bsc".to_string()
            }
        );
        assert!(matches!(
            SwapFlowConfig::from_lookup(lookup_from(&[("ROUTER_ADDRESS", "router")])),
            Err(ConfigError::InvalidAddress { .. })
        ));
        assert!(matches!(
            SwapFlowConfig::from_lookup(lookup_from(&[("GAS_LIMIT", "-1")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
