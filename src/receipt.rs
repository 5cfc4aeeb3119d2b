// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Waiting for transaction receipts
//!
//! [`wait_for_receipt`] polls a [`ReceiptSource`] until the transaction is
//! confirmed, is seen to revert, or the policy's deadline passes, and reports
//! which of the three happened as a [`ReceiptOutcome`].
//!
//! RPC failures while polling are logged and polled through; only the deadline
//! ends the wait without a receipt. The last sleep is shortened so the final
//! poll lands on the deadline rather than after it.
//!
//! # Example
//!
//! ```rust,ignore
//! use eip7702_swap::{wait_for_receipt, ProviderReceipts, ReceiptPolicy};
//! use std::time::Duration;
//!
//! let policy = ReceiptPolicy::new(Duration::from_secs(120));
//! let outcome = wait_for_receipt(&ProviderReceipts::new(&provider), tx_hash, &policy).await;
//! let receipt = outcome.into_confirmed("set-code")?;
//! ```

use std::time::Duration;

use alloy_network::ReceiptResponse;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument};

use crate::config::constants::DEFAULT_POLL_INTERVAL;
use crate::errors::{ReceiptError, RpcError};
use crate::spans;
use crate::transport::exponential_delay;

/// How the interval between polls evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Poll every `poll_interval`.
    #[default]
    Fixed,
    /// Double the interval after each poll, up to `max_interval`.
    Exponential {
        /// Upper bound for the interval
        max_interval: Duration,
    },
}

/// Deadline and cadence for [`wait_for_receipt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolicy {
    /// Total time to wait before giving up
    pub timeout: Duration,
    /// Interval before the second poll
    pub poll_interval: Duration,
    /// Interval growth
    pub backoff: Backoff,
    /// Blocks (including the inclusion block) required before a successful
    /// receipt counts as confirmed
    pub confirmations: u64,
}

impl ReceiptPolicy {
    /// Poll every second until `timeout`, one confirmation.
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
            backoff: Backoff::Fixed,
            confirmations: 1,
        }
    }

    /// Set the initial poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the interval growth.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Require `confirmations` blocks; zero is treated as one.
    #[must_use]
    pub const fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Sleep before poll number `attempt + 1` (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.poll_interval,
            Backoff::Exponential { max_interval } => {
                exponential_delay(self.poll_interval, max_interval, attempt)
            }
        }
    }
}

/// The fields of a receipt the flow cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Execution status (`status == 1`)
    pub success: bool,
    /// Inclusion block, `None` while pending
    pub block_number: Option<u64>,
    /// Gas used by the transaction
    pub gas_used: u64,
}

/// How a wait for a receipt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptOutcome {
    /// Mined, succeeded, and has the required confirmations.
    Confirmed(ReceiptSummary),
    /// Mined with a failed status.
    Reverted(ReceiptSummary),
    /// No confirmed receipt before the deadline.
    TimedOut {
        /// Transaction hash
        tx_hash: TxHash,
        /// Time spent waiting
        elapsed: Duration,
        /// Number of receipt queries made
        polls: u32,
    },
}

impl ReceiptOutcome {
    /// Transaction hash the outcome is about.
    pub fn tx_hash(&self) -> TxHash {
        match self {
            ReceiptOutcome::Confirmed(receipt) | ReceiptOutcome::Reverted(receipt) => {
                receipt.tx_hash
            }
            ReceiptOutcome::TimedOut { tx_hash, .. } => *tx_hash,
        }
    }

    /// Whether the transaction confirmed successfully.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ReceiptOutcome::Confirmed(_))
    }

    /// The confirmed receipt, or an error naming the flow `stage`.
    pub fn into_confirmed(self, stage: &str) -> Result<ReceiptSummary, ReceiptError> {
        match self {
            ReceiptOutcome::Confirmed(receipt) => Ok(receipt),
            ReceiptOutcome::Reverted(receipt) => Err(ReceiptError::Reverted {
                stage: stage.to_string(),
                tx_hash: receipt.tx_hash.to_string(),
                block_number: receipt.block_number,
            }),
            ReceiptOutcome::TimedOut {
                tx_hash,
                elapsed,
                polls,
            } => Err(ReceiptError::TimedOut {
                stage: stage.to_string(),
                tx_hash: tx_hash.to_string(),
                elapsed,
                polls,
            }),
        }
    }
}

/// Where receipts come from.
///
/// Implemented for alloy providers by [`ProviderReceipts`]; tests supply
/// scripted sources.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    /// The receipt for `tx_hash`, or `None` if it is not mined yet.
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, RpcError>;

    /// The latest block number, used to count confirmations.
    async fn latest_block(&self) -> Result<u64, RpcError>;
}

/// [`ReceiptSource`] backed by an alloy provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderReceipts<'a, P> {
    provider: &'a P,
}

impl<'a, P> ProviderReceipts<'a, P> {
    /// Borrow `provider` as a receipt source.
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<'a, P> ReceiptSource for ProviderReceipts<'a, P>
where
    P: Provider,
{
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, RpcError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| RpcError::get_receipt_failed(tx_hash, e))?;

        Ok(receipt.map(|receipt| ReceiptSummary {
            tx_hash,
            success: receipt.status(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
        }))
    }

    async fn latest_block(&self) -> Result<u64, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)
    }
}

/// Poll `source` for the receipt of `tx_hash` according to `policy`.
pub async fn wait_for_receipt<S>(
    source: &S,
    tx_hash: TxHash,
    policy: &ReceiptPolicy,
) -> ReceiptOutcome
where
    S: ReceiptSource + ?Sized,
{
    let span = spans::wait_for_receipt(tx_hash, policy.timeout);
    poll_until_deadline(source, tx_hash, policy)
        .instrument(span)
        .await
}

async fn poll_until_deadline<S>(source: &S, tx_hash: TxHash, policy: &ReceiptPolicy) -> ReceiptOutcome
where
    S: ReceiptSource + ?Sized,
{
    let start = Instant::now();
    let deadline = start + policy.timeout;
    let mut polls = 0u32;

    loop {
        polls += 1;

        match source.receipt(tx_hash).await {
            Ok(Some(receipt)) if !receipt.success => {
                warn!(
                    block_number = ?receipt.block_number,
                    gas_used = receipt.gas_used,
                    "Transaction reverted"
                );
                return ReceiptOutcome::Reverted(receipt);
            }
            Ok(Some(receipt)) => {
                if is_confirmed(source, &receipt, policy.confirmations).await {
                    info!(
                        block_number = ?receipt.block_number,
                        gas_used = receipt.gas_used,
                        polls,
                        "Transaction confirmed"
                    );
                    return ReceiptOutcome::Confirmed(receipt);
                }
            }
            Ok(None) => debug!(polls, "Receipt not available yet"),
            Err(e) => warn!(error = %e, polls, "Receipt poll failed"),
        }

        let now = Instant::now();
        if now >= deadline {
            let elapsed = now - start;
            warn!(elapsed_ms = elapsed.as_millis() as u64, polls, "Timed out waiting for receipt");
            return ReceiptOutcome::TimedOut {
                tx_hash,
                elapsed,
                polls,
            };
        }

        let delay = policy.delay(polls - 1).min(deadline - now);
        tokio::time::sleep(delay).await;
    }
}

/// Whether a successful receipt has enough blocks on top of it.
async fn is_confirmed<S>(source: &S, receipt: &ReceiptSummary, required: u64) -> bool
where
    S: ReceiptSource + ?Sized,
{
    let Some(block_number) = receipt.block_number else {
        return false;
    };

    if required <= 1 {
        return true;
    }

    match source.latest_block().await {
        Ok(latest) => {
            let confirmations = latest.saturating_sub(block_number) + 1;
            debug!(confirmations, required, "Counting confirmations");
            latest >= block_number && confirmations >= required
        }
        Err(e) => {
            warn!(error = %e, "Failed to read latest block for confirmations");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed list of receipt responses, then repeats the last one.
    struct Scripted {
        receipts: Mutex<VecDeque<Option<ReceiptSummary>>>,
        latest: u64,
    }

    impl Scripted {
        fn new(receipts: Vec<Option<ReceiptSummary>>, latest: u64) -> Self {
            Self {
                receipts: Mutex::new(receipts.into()),
                latest,
            }
        }
    }

    #[async_trait]
    impl ReceiptSource for Scripted {
        async fn receipt(&self, _tx_hash: TxHash) -> Result<Option<ReceiptSummary>, RpcError> {
            let mut receipts = self.receipts.lock().unwrap();
            if receipts.len() > 1 {
                Ok(receipts.pop_front().flatten())
            } else {
                Ok(receipts.front().copied().flatten())
            }
        }

        async fn latest_block(&self) -> Result<u64, RpcError> {
            Ok(self.latest)
        }
    }

    fn mined(success: bool, block: u64) -> ReceiptSummary {
        ReceiptSummary {
            tx_hash: TxHash::repeat_byte(0x11),
            success,
            block_number: Some(block),
            gas_used: 21_000,
        }
    }

    #[test]
    fn test_fixed_delay() {
        let policy = ReceiptPolicy::new(Duration::from_secs(30));
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(7), Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let policy = ReceiptPolicy::new(Duration::from_secs(30))
            .with_poll_interval(Duration::from_millis(500))
            .with_backoff(Backoff::Exponential {
                max_interval: Duration::from_secs(4),
            });
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
        assert_eq!(policy.delay(6), Duration::from_secs(4));
    }

    #[test]
    fn test_into_confirmed_errors_carry_stage() {
        let reverted = ReceiptOutcome::Reverted(mined(false, 9));
        let err = reverted.into_confirmed("swap").unwrap_err();
        assert!(matches!(
            err,
            ReceiptError::Reverted { ref stage, block_number: Some(9), .. } if stage == "swap"
        ));

        let timed_out = ReceiptOutcome::TimedOut {
            tx_hash: TxHash::ZERO,
            elapsed: Duration::from_secs(30),
            polls: 31,
        };
        assert!(matches!(
            timed_out.into_confirmed("set-code"),
            Err(ReceiptError::TimedOut { polls: 31, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_after_pending_polls() {
        let source = Scripted::new(vec![None, None, Some(mined(true, 100))], 100);
        let policy = ReceiptPolicy::new(Duration::from_secs(120));

        let outcome = wait_for_receipt(&source, TxHash::repeat_byte(0x11), &policy).await;
        assert_eq!(outcome, ReceiptOutcome::Confirmed(mined(true, 100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revert_is_reported_immediately() {
        let source = Scripted::new(vec![Some(mined(false, 42))], 42);
        let policy = ReceiptPolicy::new(Duration::from_secs(30)).with_confirmations(12);

        let outcome = wait_for_receipt(&source, TxHash::repeat_byte(0x11), &policy).await;
        assert!(matches!(outcome, ReceiptOutcome::Reverted(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_with_final_poll_at_deadline() {
        let source = Scripted::new(vec![None], 0);
        let policy = ReceiptPolicy::new(Duration::from_secs(5));

        let outcome = wait_for_receipt(&source, TxHash::repeat_byte(0x22), &policy).await;
        assert_eq!(
            outcome,
            ReceiptOutcome::TimedOut {
                tx_hash: TxHash::repeat_byte(0x22),
                elapsed: Duration::from_secs(5),
                polls: 6,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_confirmations() {
        // mined at 100, chain stuck at 101: two confirmations, three required
        let source = Scripted::new(vec![Some(mined(true, 100))], 101);
        let policy = ReceiptPolicy::new(Duration::from_secs(3)).with_confirmations(3);

        let outcome = wait_for_receipt(&source, TxHash::repeat_byte(0x11), &policy).await;
        assert!(matches!(outcome, ReceiptOutcome::TimedOut { polls: 4, .. }));

        let source = Scripted::new(vec![Some(mined(true, 100))], 102);
        let outcome = wait_for_receipt(&source, TxHash::repeat_byte(0x11), &policy).await;
        assert!(outcome.is_confirmed());
    }
}
