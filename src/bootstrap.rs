// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_network::EthereumWallet;
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use crate::config::constants::env;
use crate::{create_wallet_provider, Account, ConfigError, DelegatedSwapFlow, SwapFlowConfig};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = SwapFlowConfig::from_env().context("Failed to load configuration")?;

    let authority = load_account(env::AUTHORITY_PRIVATE_KEY)?;
    let sponsor = load_account(env::SPONSOR_PRIVATE_KEY)?;
    info!(
        authority = %authority.address(),
        sponsor = %sponsor.address(),
        rpc = config.rpc_endpoint(),
        "Accounts loaded"
    );

    // One wallet holds both keys; each request's `from` picks the signer
    let mut wallet = EthereumWallet::from(authority.signer().clone());
    wallet.register_signer(sponsor.signer().clone());

    let provider = create_wallet_provider(&config.provider, wallet)?;

    let flow = DelegatedSwapFlow::new(provider, config, authority, sponsor.address());
    let report = flow.run().await?;

    info!(
        set_code_tx = %report.set_code_tx,
        swap_tx = %report.swap_tx,
        swap_gas_used = report.swap_receipt.gas_used,
        amount_out = %report
            .amount_out()
            .map(|amount| amount.display(report.token_out.decimals))
            .unwrap_or_else(|| "0".to_string()),
        "Delegated swap complete"
    );

    Ok(())
}

fn load_account(var: &str) -> anyhow::Result<Account> {
    let key = dotenvy::var(var).map_err(|_| ConfigError::MissingVar {
        name: var.to_string(),
    })?;
    Account::from_private_key(&key).with_context(|| format!("{var} is not a valid private key"))
}
