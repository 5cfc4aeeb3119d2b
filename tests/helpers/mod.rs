// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for eip7702-swap integration tests
//!
//! Provides mock implementations of traits to enable testing without
//! real blockchain connections.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use alloy_primitives::TxHash;
use async_trait::async_trait;
use eip7702_swap::{ReceiptSource, ReceiptSummary, RpcError};

/// One scripted answer to a receipt query
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Poll {
    /// Not mined yet
    Pending,
    /// The node returned an error
    Fail,
    /// Mined with this receipt
    Mined(ReceiptSummary),
}

/// Mock ReceiptSource for testing receipt polling
///
/// Answers receipt queries from a script, repeating the last entry once the
/// script runs out. The latest block starts at a fixed height and can advance
/// by a fixed step on every query.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockReceiptSource::new(vec![Poll::Pending, Poll::Mined(receipt)])
///     .with_latest_block(100)
///     .with_block_step(1);
/// ```
pub struct MockReceiptSource {
    script: Mutex<Vec<Poll>>,
    receipt_calls: AtomicU32,
    latest_block: AtomicU64,
    block_step: u64,
}

#[allow(dead_code)]
impl MockReceiptSource {
    /// Create a mock that plays `script`
    pub fn new(script: Vec<Poll>) -> Self {
        Self {
            script: Mutex::new(script),
            receipt_calls: AtomicU32::new(0),
            latest_block: AtomicU64::new(0),
            block_step: 0,
        }
    }

    /// Set the initial latest block
    pub fn with_latest_block(self, block: u64) -> Self {
        self.latest_block.store(block, Ordering::SeqCst);
        self
    }

    /// Advance the latest block by `step` after each `latest_block` query
    pub fn with_block_step(mut self, step: u64) -> Self {
        self.block_step = step;
        self
    }

    /// Number of receipt queries served so far
    pub fn receipt_calls(&self) -> u32 {
        self.receipt_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptSource for MockReceiptSource {
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, RpcError> {
        let call = self.receipt_calls.fetch_add(1, Ordering::SeqCst) as usize;
        let script = self.script.lock().unwrap();
        let step = script
            .get(call)
            .or_else(|| script.last())
            .copied()
            .unwrap_or(Poll::Pending);

        match step {
            Poll::Pending => Ok(None),
            Poll::Fail => Err(RpcError::get_receipt_failed(
                tx_hash,
                std::io::Error::other("connection reset by peer"),
            )),
            Poll::Mined(receipt) => Ok(Some(receipt)),
        }
    }

    async fn latest_block(&self) -> Result<u64, RpcError> {
        Ok(self
            .latest_block
            .fetch_add(self.block_step, Ordering::SeqCst))
    }
}

/// Helper to create a mined receipt for testing
#[allow(dead_code)]
pub fn create_test_receipt(tx_hash: TxHash, success: bool, block_number: u64) -> ReceiptSummary {
    ReceiptSummary {
        tx_hash,
        success,
        block_number: Some(block_number),
        gas_used: 52_000,
    }
}
