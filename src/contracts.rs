// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract bindings used by the flow
//!
//! [`IBEP20`] reads token metadata and balances. [`ISimpleRouter`] is the code
//! the authority delegates to; once the set-code transaction lands, the router
//! binding is instantiated at the authority's own address.

alloy_sol_types::sol! {
    /// BEP-20 token interface (ERC-20 compatible)
    #[sol(rpc)]
    interface IBEP20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }

    /// Uniswap V2 style router
    #[sol(rpc)]
    interface ISimpleRouter {
        function swapExactTokensForTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);
    }
}
