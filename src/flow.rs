// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The end-to-end delegated swap
//!
//! [`DelegatedSwapFlow::run`] performs, in order:
//!
//! 1. resolve the chain id
//! 2. sign an authorization delegating the authority's code to the router
//! 3. submit the set-code transaction from the sponsor
//! 4. wait for it to confirm
//! 5. check the authority's code is a designator for the router
//! 6. read token decimals and the authority's balances
//! 7. scale the configured amounts
//! 8. call `swapExactTokensForTokens` on the authority's own address
//! 9. wait for the swap to confirm
//! 10. read the final balances
//!
//! Any failure stops the run with a [`SwapFlowError`] naming the step.

use std::time::Duration;

use alloy_eips::eip7702::SignedAuthorization;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::Provider;
use chrono::Utc;
use futures::future::try_join;
use tracing::{info, warn, Instrument};

use crate::authorization::Account;
use crate::config::constants::{bsc_testnet, DEFAULT_CHAIN};
use crate::config::{SwapFlowConfig, SwapSettings};
use crate::contracts::{IBEP20, ISimpleRouter};
use crate::delegation::{build_set_code_request, send_set_code_transaction, verify_delegation};
use crate::errors::{AmountError, RpcError, SwapFlowError};
use crate::receipt::{wait_for_receipt, ProviderReceipts, ReceiptSummary};
use crate::spans;
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// A token taking part in the swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Configured symbol, upper case
    pub symbol: String,
    /// Contract address
    pub address: Address,
    /// On-chain `decimals()`
    pub decimals: TokenDecimals,
}

/// The authority's holdings of both swap tokens at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBalances {
    /// Balance of the token sold
    pub token_in: TokenAmount,
    /// Balance of the token bought
    pub token_out: TokenAmount,
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct FlowReport {
    /// Chain the authorization was signed for
    pub chain_id: u64,
    /// The authorization carried by the set-code transaction
    pub authorization: SignedAuthorization,
    /// Set-code transaction hash
    pub set_code_tx: TxHash,
    /// Set-code receipt
    pub set_code_receipt: ReceiptSummary,
    /// Code at the authority after delegation
    pub delegated_code: Bytes,
    /// Token sold
    pub token_in: TokenInfo,
    /// Token bought
    pub token_out: TokenInfo,
    /// Scaled amount sold
    pub amount_in: TokenAmount,
    /// Scaled minimum amount bought
    pub amount_out_min: TokenAmount,
    /// Swap transaction hash
    pub swap_tx: TxHash,
    /// Swap receipt
    pub swap_receipt: ReceiptSummary,
    /// Balances before the swap
    pub initial_balances: SwapBalances,
    /// Balances after the swap
    pub final_balances: SwapBalances,
}

impl FlowReport {
    /// Amount of `token_out` gained by the swap, if the balance grew
    pub fn amount_out(&self) -> Option<TokenAmount> {
        self.final_balances
            .token_out
            .checked_gain_over(self.initial_balances.token_out)
    }
}

/// Delegates an account's code to a router, then swaps through it
///
/// The provider must hold signers for both the authority and the sponsor
/// (see [`crate::provider::create_wallet_provider`]).
///
/// # Example
///
/// ```rust,ignore
/// use eip7702_swap::{DelegatedSwapFlow, SwapFlowConfig};
///
/// let flow = DelegatedSwapFlow::new(provider, SwapFlowConfig::from_env()?, authority, sponsor.address());
/// let report = flow.run().await?;
/// println!("swap tx: {}", report.swap_tx);
/// ```
pub struct DelegatedSwapFlow<P> {
    provider: P,
    config: SwapFlowConfig,
    authority: Account,
    sponsor: Address,
}

impl<P> DelegatedSwapFlow<P>
where
    P: Provider + Clone,
{
    /// Create a flow. `sponsor` may equal the authority's address.
    pub fn new(provider: P, config: SwapFlowConfig, authority: Account, sponsor: Address) -> Self {
        Self {
            provider,
            config,
            authority,
            sponsor,
        }
    }

    /// The configuration this flow runs with
    pub fn config(&self) -> &SwapFlowConfig {
        &self.config
    }

    /// Run every step; see the module documentation.
    pub async fn run(&self) -> Result<FlowReport, SwapFlowError> {
        let span = spans::run_flow(
            self.authority.address(),
            self.sponsor,
            self.config.router_address,
        );
        self.run_steps().instrument(span).await
    }

    async fn run_steps(&self) -> Result<FlowReport, SwapFlowError> {
        let authority = self.authority.address();
        let router = self.config.router_address;

        let chain_id = self.resolve_chain_id().await?;
        tracing::Span::current().record("chain_id", chain_id);
        if router == bsc_testnet::ROUTER && chain_id != DEFAULT_CHAIN as u64 {
            warn!(
                chain_id,
                "Default router is deployed on BSC testnet; delegation will likely fail on this chain"
            );
        }

        let authorization = self
            .authority
            .authorize(&self.provider, router, Some(chain_id), None, self.sponsor)
            .await?;

        let request = build_set_code_request(
            self.sponsor,
            authority,
            vec![authorization.clone()],
            self.config.gas_limit,
        )?;
        let set_code_tx = send_set_code_transaction(&self.provider, request).await?;
        info!(tx_hash = %set_code_tx, "EIP-7702 transaction sent");

        let receipts = ProviderReceipts::new(&self.provider);
        let set_code_receipt =
            wait_for_receipt(&receipts, set_code_tx, &self.config.delegation_receipt)
                .await
                .into_confirmed("set-code")?;

        let delegated_code = verify_delegation(&self.provider, authority, router).await?;

        let swap = &self.config.swap;
        let (token_in, token_out) = try_join(
            self.token_info(&swap.token_in),
            self.token_info(&swap.token_out),
        )
        .await?;

        let initial_balances = self.balances(authority, &token_in, &token_out).await?;
        log_balances("Initial", &token_in, &token_out, &initial_balances);

        let (amount_in, amount_out_min) =
            scale_swap_amounts(swap, token_in.decimals, token_out.decimals)?;
        info!(
            amount_in = %amount_in.display(token_in.decimals),
            amount_out_min = %amount_out_min,
            "Swap amounts scaled"
        );

        let swap_tx = self
            .execute_swap(&token_in, &token_out, amount_in, amount_out_min)
            .await?;

        let swap_receipt = wait_for_receipt(&receipts, swap_tx, &self.config.swap_receipt)
            .await
            .into_confirmed("swap")?;

        let final_balances = self.balances(authority, &token_in, &token_out).await?;
        log_balances("Final", &token_in, &token_out, &final_balances);

        Ok(FlowReport {
            chain_id,
            authorization,
            set_code_tx,
            set_code_receipt,
            delegated_code,
            token_in,
            token_out,
            amount_in,
            amount_out_min,
            swap_tx,
            swap_receipt,
            initial_balances,
            final_balances,
        })
    }

    async fn resolve_chain_id(&self) -> Result<u64, RpcError> {
        match self.config.chain_id {
            Some(chain_id) => Ok(chain_id),
            None => self
                .provider
                .get_chain_id()
                .await
                .map_err(|e| RpcError::chain_connection_failed("get_chain_id", e)),
        }
    }

    async fn token_info(&self, symbol: &str) -> Result<TokenInfo, SwapFlowError> {
        let address = self.config.token(symbol)?;
        let token: IBEP20::IBEP20Instance<P> = IBEP20::new(address, self.provider.clone());

        let decimals = token
            .decimals()
            .call()
            .await
            .map_err(|e| RpcError::call_failed("decimals", e))?;
        let decimals = TokenDecimals::new(decimals);

        if !decimals.is_reasonable() {
            warn!(token = %address, %decimals, "Token reports unusual decimals");
        }

        Ok(TokenInfo {
            symbol: symbol.trim().to_ascii_uppercase(),
            address,
            decimals,
        })
    }

    async fn balances(
        &self,
        holder: Address,
        token_in: &TokenInfo,
        token_out: &TokenInfo,
    ) -> Result<SwapBalances, RpcError> {
        let span = spans::fetch_balances(holder, 2);

        async move {
            let token_in_contract: IBEP20::IBEP20Instance<P> =
                IBEP20::new(token_in.address, self.provider.clone());
            let token_out_contract: IBEP20::IBEP20Instance<P> =
                IBEP20::new(token_out.address, self.provider.clone());

            let in_call = token_in_contract.balanceOf(holder);
            let out_call = token_out_contract.balanceOf(holder);
            let (balance_in, balance_out) =
                try_join(async { in_call.call().await }, async { out_call.call().await })
                    .await
                    .map_err(|e| RpcError::call_failed("balanceOf", e))?;

            Ok(SwapBalances {
                token_in: TokenAmount::new(balance_in),
                token_out: TokenAmount::new(balance_out),
            })
        }
        .instrument(span)
        .await
    }

    async fn execute_swap(
        &self,
        token_in: &TokenInfo,
        token_out: &TokenInfo,
        amount_in: TokenAmount,
        amount_out_min: TokenAmount,
    ) -> Result<TxHash, RpcError> {
        let authority = self.authority.address();
        let span = spans::execute_swap(
            &token_in.symbol,
            &token_out.symbol,
            &self.config.swap.amount_in,
        );

        async move {
            // The router's code now runs at the authority's address
            let router: ISimpleRouter::ISimpleRouterInstance<P> =
                ISimpleRouter::new(authority, self.provider.clone());
            let deadline = swap_deadline(Utc::now().timestamp(), self.config.swap.deadline);

            let pending = router
                .swapExactTokensForTokens(
                    amount_in.as_u256(),
                    amount_out_min.as_u256(),
                    vec![token_in.address, token_out.address],
                    authority,
                    deadline,
                )
                .from(authority)
                .gas(self.config.gas_limit)
                .send()
                .await
                .map_err(|e| RpcError::send_failed("swapExactTokensForTokens", e))?;

            let tx_hash = *pending.tx_hash();
            info!(tx_hash = %tx_hash, %deadline, "Swap transaction sent");
            Ok(tx_hash)
        }
        .instrument(span)
        .await
    }
}

/// Scale the configured decimal amounts for the swap call
///
/// `amount_in` uses the input token's decimals. `amount_out_min` uses the
/// configured precision when set, else the output token's decimals.
pub fn scale_swap_amounts(
    swap: &SwapSettings,
    token_in_decimals: TokenDecimals,
    token_out_decimals: TokenDecimals,
) -> Result<(TokenAmount, TokenAmount), AmountError> {
    let amount_in = TokenAmount::from_decimal_str(&swap.amount_in, token_in_decimals)?;

    let out_precision = swap
        .amount_out_min_precision
        .unwrap_or(token_out_decimals.precision());
    let amount_out_min =
        TokenAmount::from_decimal_str_with_precision(&swap.amount_out_min, out_precision)?;

    Ok((amount_in, amount_out_min))
}

/// Unix deadline `valid_for` after `now_unix`.
pub(crate) fn swap_deadline(now_unix: i64, valid_for: Duration) -> U256 {
    let now = u64::try_from(now_unix).unwrap_or_default();
    U256::from(now.saturating_add(valid_for.as_secs()))
}

fn log_balances(
    stage: &str,
    token_in: &TokenInfo,
    token_out: &TokenInfo,
    balances: &SwapBalances,
) {
    for (token, amount) in [(token_in, balances.token_in), (token_out, balances.token_out)] {
        info!(
            token = %token.symbol,
            balance = %amount.whole_tokens(token.decimals),
            exact = %amount.display(token.decimals),
            "{stage} balance"
        );
    }
}
