// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for Alloy RPC clients.
//!
//! Every request is wrapped in an `rpc_call` span carrying the method name and
//! its duration, so a slow `eth_getTransactionReceipt` poll or a rejected
//! `eth_sendRawTransaction` shows up next to the flow step that issued it.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// A Tower layer that records RPC requests with `tracing`.
///
/// By default only method, timing and errors are logged; payload logging is
/// opt-in because signed transactions and call data are large.
///
/// # Example
///
/// ```rust,ignore
/// use eip7702_swap::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new().with_payloads())
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingLayer {
    log_payloads: bool,
}

impl LoggingLayer {
    /// Creates a logging layer that records method names, timing and errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also record full request and response payloads at TRACE level.
    pub fn with_payloads(mut self) -> Self {
        self.log_payloads = true;
        self
    }

    /// Whether payloads are recorded.
    pub fn logs_payloads(&self) -> bool {
        self.log_payloads
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_payloads: self.log_payloads,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
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
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();
        let method = method_name(&request);

        let span = tracing::debug_span!(
            "rpc_call",
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                if log_payloads {
                    trace!(request = ?request, "RPC request");
                }

                let result = service.call(request).await;
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);

                match &result {
                    Ok(response) if log_payloads => {
                        trace!(response = ?response, duration_ms, "RPC response");
                    }
                    Ok(_) => debug!(duration_ms, "RPC response: {method}"),
                    Err(e) => warn!(error = %e, duration_ms, "RPC error: {method}"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// RPC method name, or a summary for batches.
fn method_name(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
