// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transactions that did not confirm.

use std::time::Duration;

/// A transaction the flow depends on did not reach a confirmed, successful
/// receipt.
///
/// Produced by [`crate::ReceiptOutcome::into_confirmed`]; the `stage` names the
/// step of the flow that submitted the transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptError {
    /// No confirmed receipt before the deadline.
    #[error("{stage} transaction {tx_hash} timed out after {elapsed:?} ({polls} polls)")]
    TimedOut {
        /// Flow step that sent the transaction
        stage: String,
        /// Transaction hash
        tx_hash: String,
        /// Time spent waiting
        elapsed: Duration,
        /// Number of receipt queries made
        polls: u32,
    },

    /// The transaction was mined but execution failed.
    #[error("{stage} transaction {tx_hash} reverted in block {block_number:?}")]
    Reverted {
        /// Flow step that sent the transaction
        stage: String,
        /// Transaction hash
        tx_hash: String,
        /// Block the failed transaction was included in
        block_number: Option<u64>,
    },
}
