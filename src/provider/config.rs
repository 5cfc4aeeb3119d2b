// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use crate::transport::RetryConfig;

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use eip7702_swap::provider::ProviderConfig;
///
/// let config = ProviderConfig::public_endpoint("https://bsc-testnet.bnbchain.org");
/// assert!(config.retry.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Retry policy for transient request failures (None disables retries)
    pub retry: Option<RetryConfig>,
    /// Wrap the client in [`crate::transport::LoggingLayer`]
    pub logging_enabled: bool,
    /// Record full request/response payloads when logging
    pub log_payloads: bool,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    ///
    /// Retries with the default policy and request logging are enabled.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retry: Some(RetryConfig::default()),
            logging_enabled: true,
            log_payloads: false,
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Disable request retries
    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.retry = None;
        self
    }

    /// Enable or disable request logging
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Log full payloads (implies logging)
    #[must_use]
    pub fn with_payload_logging(mut self) -> Self {
        self.logging_enabled = true;
        self.log_payloads = true;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}

/// Preset configurations
impl ProviderConfig {
    /// Public endpoints: more patient retries, they throttle aggressively
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url).with_retry(RetryConfig {
            max_retries: 5,
            ..RetryConfig::default()
        })
    }

    /// Local nodes (anvil, a dev node): no retries
    #[must_use]
    pub fn local_node(url: impl Into<String>) -> Self {
        Self::new(url).without_retry()
    }
}
