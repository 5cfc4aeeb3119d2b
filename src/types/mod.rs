// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across the swap flow.
//!
//! This module provides newtype wrappers for token concepts so that raw
//! on-chain amounts and decimal precisions are not mixed with plain integers.

pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here
