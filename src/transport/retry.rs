// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based retry layer with exponential backoff for Alloy RPC clients.
//!
//! Individual requests are retried, never whole flow steps. A rejected
//! `eth_sendRawTransaction` error response is not retryable and surfaces
//! immediately.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket, RpcError};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, warn};

/// Default maximum number of retry attempts.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (200ms).
const DEFAULT_BASE_DELAY_MS: u64 = 200;
/// Default maximum delay between retries (10 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// A Tower layer that retries RPC requests with exponential backoff.
///
/// ```text
/// delay = min(base_delay * 2^attempt, max_delay)
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use eip7702_swap::transport::RetryLayer;
/// use alloy_rpc_client::ClientBuilder;
/// use std::time::Duration;
///
/// let layer = RetryLayer::builder()
///     .max_retries(5)
///     .base_delay(Duration::from_millis(250))
///     .build();
///
/// let client = ClientBuilder::default().layer(layer).http(rpc_url);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetryLayer {
    config: Arc<RetryConfig>,
}

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryLayer {
    /// Creates a new retry layer with default settings (3 retries, 200ms base,
    /// 10s cap).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a retry layer from an explicit configuration.
    pub fn from_config(config: RetryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a builder for customizing retry configuration.
    pub fn builder() -> RetryLayerBuilder {
        RetryLayerBuilder::default()
    }

    /// The configuration this layer applies.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            config: self.config.clone(),
        }
    }
}

/// Builder for configuring a [`RetryLayer`].
#[derive(Clone, Debug, Default)]
pub struct RetryLayerBuilder {
    config: RetryConfig,
}

impl RetryLayerBuilder {
    /// Sets the maximum number of retry attempts.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the base delay for exponential backoff.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.max_delay = delay;
        self
    }

    /// Builds the configured [`RetryLayer`].
    pub fn build(self) -> RetryLayer {
        RetryLayer::from_config(self.config)
    }
}

/// A Tower service that retries failed requests of its inner service.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    config: Arc<RetryConfig>,
}

impl<S> tower::Service<RequestPacket> for RetryService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            loop {
                let mut service = service.clone();

                let error = match service.call(request.clone()).await {
                    Ok(response) => {
                        if attempt > 0 {
                            debug!(attempt, "RPC request succeeded after retry");
                        }
                        return Ok(response);
                    }
                    Err(error) => error,
                };

                if !is_retryable_error(&error) {
                    debug!(error = %error, "Non-retryable RPC error");
                    return Err(error);
                }

                if attempt >= config.max_retries {
                    warn!(error = %error, attempts = attempt + 1, "RPC retries exhausted");
                    return Err(error);
                }

                let delay = exponential_delay(config.base_delay, config.max_delay, attempt);
                warn!(
                    error = %error,
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Retryable RPC error, backing off"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        })
    }
}

/// `min(base * 2^attempt, max)`, saturating instead of overflowing.
///
/// Shared with receipt polling so both back off the same way.
pub(crate) fn exponential_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    let multiplier = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(multiplier).min(max)
}

/// Transient failures worth retrying.
///
/// Transport errors and error responses defer to alloy's own classification
/// (`is_retry_err`). Serialization errors mean the request itself is malformed
/// and will never succeed.
fn is_retryable_error(error: &TransportError) -> bool {
    match error {
        RpcError::Transport(kind) => kind.is_retry_err(),
        RpcError::ErrorResp(payload) => payload.is_retry_err(),
        RpcError::DeserError { .. } | RpcError::NullResp => true,
        RpcError::SerError(_) => false,
        _ => false,
    }
}
