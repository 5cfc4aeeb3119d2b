// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Set-code (EIP-7702) transactions and delegation checks
//!
//! The sponsor submits a transaction carrying the authority's signed
//! authorization. Once it is mined, the authority's code is the 23-byte
//! delegation designator `0xef0100 || delegate`.

use alloy_eips::eip7702::SignedAuthorization;
use alloy_network::TransactionBuilder;
use alloy_primitives::{hex, Address, Bytes, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use tracing::{info, Instrument};

use crate::errors::{AuthorizationError, RpcError, SwapFlowError};
use crate::spans;

/// Prefix of the code installed by a set-code authorization
pub const DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Length of a delegation designator: prefix plus a 20-byte address
pub const DELEGATION_CODE_LEN: usize = DELEGATION_PREFIX.len() + 20;

/// Build the sponsor's set-code transaction
///
/// The transaction is addressed to the authority with empty call data and no
/// value; its only effect is installing the authorizations.
///
/// # Errors
///
/// Returns [`AuthorizationError::EmptyList`] when `authorizations` is empty,
/// since nodes reject set-code transactions without authorizations.
pub fn build_set_code_request(
    sponsor: Address,
    authority: Address,
    authorizations: Vec<SignedAuthorization>,
    gas_limit: u64,
) -> Result<TransactionRequest, AuthorizationError> {
    if authorizations.is_empty() {
        return Err(AuthorizationError::EmptyList);
    }

    let mut request = TransactionRequest::default()
        .with_from(sponsor)
        .with_to(authority)
        .with_input(Bytes::new())
        .with_value(U256::ZERO)
        .with_gas_limit(gas_limit);
    request.authorization_list = Some(authorizations);

    Ok(request)
}

/// Sign (through the provider's wallet) and submit a set-code transaction.
pub async fn send_set_code_transaction<P>(
    provider: &P,
    request: TransactionRequest,
) -> Result<TxHash, RpcError>
where
    P: Provider,
{
    let sponsor = request.from.unwrap_or_default();
    let authorizations = request.authorization_list.as_ref().map_or(0, Vec::len);
    let span = spans::send_set_code_transaction(sponsor, authorizations);

    async move {
        let pending = provider
            .send_transaction(request)
            .await
            .map_err(|e| RpcError::send_failed("send_set_code_transaction", e))?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, "Set-code transaction sent");
        Ok(tx_hash)
    }
    .instrument(span)
    .await
}

/// Address an account's code delegates to, if the code is a delegation designator.
///
/// # Example
///
/// ```rust
/// use eip7702_swap::delegation::delegation_target;
/// use alloy_primitives::{hex, Address};
///
/// let code = hex!("ef010066c488c48ff2cb17450391d24b923a92e5f6da5c");
/// assert_eq!(
///     delegation_target(&code),
///     Some("0x66c488c48fF2CB17450391D24b923A92e5f6da5C".parse::<Address>().unwrap())
/// );
/// assert_eq!(delegation_target(&[]), None);
/// ```
pub fn delegation_target(code: &[u8]) -> Option<Address> {
    if code.len() != DELEGATION_CODE_LEN || !code.starts_with(&DELEGATION_PREFIX) {
        return None;
    }
    Some(Address::from_slice(&code[DELEGATION_PREFIX.len()..]))
}

/// Read `authority`'s code and check it delegates to `expected`
///
/// Returns the code on success so callers can report it.
///
/// # Errors
///
/// [`SwapFlowError::DelegationMismatch`] if the code is empty, ordinary
/// contract code, or a designator for another address.
pub async fn verify_delegation<P>(
    provider: &P,
    authority: Address,
    expected: Address,
) -> Result<Bytes, SwapFlowError>
where
    P: Provider,
{
    let span = spans::verify_delegation(authority, expected);

    async move {
        let code = provider
            .get_code_at(authority)
            .await
            .map_err(|e| RpcError::call_failed("get_code_at", e))?;

        info!(code = %hex::encode(&code), "Authority code");

        check_delegation(authority, expected, &code)?;
        Ok(code)
    }
    .instrument(span)
    .await
}

fn check_delegation(
    authority: Address,
    expected: Address,
    code: &[u8],
) -> Result<(), SwapFlowError> {
    match delegation_target(code) {
        Some(target) if target == expected => Ok(()),
        _ => Err(SwapFlowError::DelegationMismatch {
            authority: authority.to_string(),
            expected: expected.to_string(),
            code: hex::encode_prefixed(code),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::TxKind;

    use crate::Account;

    const KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn designator(target: Address) -> Vec<u8> {
        let mut code = DELEGATION_PREFIX.to_vec();
        code.extend_from_slice(target.as_slice());
        code
    }

    #[test]
    fn test_set_code_request_shape() {
        let authority = Account::from_private_key(KEY).unwrap();
        let sponsor = Address::with_last_byte(0x5);
        let router = Address::with_last_byte(0x7);
        let signed = authority.sign_authorization(router, 97, 0).unwrap();

        let request =
            build_set_code_request(sponsor, authority.address(), vec![signed.clone()], 3_000_000)
                .unwrap();

        assert_eq!(request.from, Some(sponsor));
        assert_eq!(request.to, Some(TxKind::Call(authority.address())));
        assert_eq!(request.value, Some(U256::ZERO));
        assert_eq!(request.gas, Some(3_000_000));
        assert!(request.input.input().is_none_or(|data| data.is_empty()));
        assert_eq!(request.authorization_list, Some(vec![signed]));
    }

    #[test]
    fn test_set_code_request_requires_authorizations() {
        let err = build_set_code_request(Address::ZERO, Address::ZERO, Vec::new(), 21_000)
            .unwrap_err();
        assert!(matches!(err, AuthorizationError::EmptyList));
    }

    #[test]
    fn test_delegation_target() {
        let router = Address::with_last_byte(0x42);
        assert_eq!(delegation_target(&designator(router)), Some(router));
    }

    #[test]
    fn test_delegation_target_rejects_other_code() {
        let router = Address::with_last_byte(0x42);

        // empty account
        assert_eq!(delegation_target(&[]), None);
        // wrong prefix
        let mut code = designator(router);
        code[0] = 0x60;
        assert_eq!(delegation_target(&code), None);
        // truncated and padded designators
        let code = designator(router);
        assert_eq!(delegation_target(&code[..22]), None);
        let mut padded = designator(router);
        padded.push(0);
        assert_eq!(delegation_target(&padded), None);
    }

    #[test]
    fn test_check_delegation() {
        let authority = Address::with_last_byte(1);
        let router = Address::with_last_byte(2);

        assert!(check_delegation(authority, router, &designator(router)).is_ok());

        let err = check_delegation(authority, router, &designator(Address::with_last_byte(3)))
            .unwrap_err();
        match err {
            SwapFlowError::DelegationMismatch { code, .. } => {
                assert!(code.starts_with("0xef0100"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            check_delegation(authority, router, &[]),
            Err(SwapFlowError::DelegationMismatch { ref code, .. }) if code == "0x"
        ));
    }
}
