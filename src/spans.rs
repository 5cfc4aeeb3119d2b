// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for the delegated swap flow.
//!
//! Telemetry is kept out of the business logic: each instrumented operation has
//! a span helper here and attaches it with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move { /* business logic */ }.instrument(span).await
//! }
//! ```

use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use tracing::Span;

/// Root span for one end-to-end run.
///
/// Children: every other span in this module
#[inline]
pub(crate) fn run_flow(authority: Address, sponsor: Address, router: Address) -> Span {
    tracing::info_span!(
        "eip7702_swap.run_flow",
        authority = %authority,
        sponsor = %sponsor,
        router = %router,
        chain_id = tracing::field::Empty,
    )
}

/// Span for signing a set-code authorization.
///
/// Parent: run_flow span
#[inline]
pub(crate) fn sign_authorization(authority: Address, delegate: Address) -> Span {
    tracing::debug_span!(
        "eip7702_swap.sign_authorization",
        authority = %authority,
        delegate = %delegate,
        chain_id = tracing::field::Empty,
        nonce = tracing::field::Empty,
    )
}

/// Span for submitting the set-code transaction.
///
/// Parent: run_flow span
#[inline]
pub(crate) fn send_set_code_transaction(sponsor: Address, authorizations: usize) -> Span {
    tracing::info_span!(
        "eip7702_swap.send_set_code_transaction",
        sponsor = %sponsor,
        authorizations = authorizations,
    )
}

/// Span for polling a receipt.
///
/// Parent: run_flow span (or none when called directly)
#[inline]
pub(crate) fn wait_for_receipt(tx_hash: TxHash, timeout: Duration) -> Span {
    tracing::debug_span!(
        "eip7702_swap.wait_for_receipt",
        tx_hash = %tx_hash,
        timeout_ms = timeout.as_millis() as u64,
    )
}

/// Span for checking an account's delegation designator.
///
/// Parent: run_flow span
#[inline]
pub(crate) fn verify_delegation(authority: Address, expected: Address) -> Span {
    tracing::debug_span!(
        "eip7702_swap.verify_delegation",
        authority = %authority,
        expected = %expected,
    )
}

/// Span for reading token metadata and a holder's balances.
///
/// Parent: run_flow span
#[inline]
pub(crate) fn fetch_balances(holder: Address, tokens: usize) -> Span {
    tracing::debug_span!(
        "eip7702_swap.fetch_balances",
        holder = %holder,
        tokens = tokens,
    )
}

/// Span for sending the swap through the delegated account.
///
/// Parent: run_flow span
#[inline]
pub(crate) fn execute_swap(token_in: &str, token_out: &str, amount_in: &str) -> Span {
    tracing::info_span!(
        "eip7702_swap.execute_swap",
        token_in = %token_in,
        token_out = %token_out,
        amount_in = %amount_in,
    )
}
