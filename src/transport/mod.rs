// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for Alloy providers.
//!
//! Tower middleware applied to the RPC client underneath the provider:
//!
//! - [`RetryLayer`] retries transient request failures with exponential backoff
//! - [`LoggingLayer`] records each request in a `tracing` span
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eip7702_swap::transport::{LoggingLayer, RetryLayer};
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(RetryLayer::new())
//!     .http(rpc_url);
//! ```
//!
//! [`crate::provider::create_wallet_provider`] assembles this stack from a
//! [`crate::provider::ProviderConfig`].

mod logging;
mod retry;

pub use logging::{LoggingLayer, LoggingService};
pub use retry::{RetryConfig, RetryLayer, RetryLayerBuilder, RetryService};

pub(crate) use retry::exponential_delay;
