// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for decimal amount conversion
//!
//! These tests use proptest to validate invariants of `to_scaled_integer` and
//! `to_decimal_string` across a wide range of inputs and precisions.

use eip7702_swap::{
    format_fixed_point, to_decimal_string, to_scaled_integer, to_u256, AmountError, TokenAmount,
    TokenDecimals,
};
use num_bigint::BigUint;
use proptest::prelude::*;

// Characters that must never be accepted inside an amount
fn arb_foreign_char() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('+'),
        Just('-'),
        Just('_'),
        Just(','),
        Just(' '),
        Just('e'),
        Just('x'),
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
    ]
}

proptest! {
    /// Property: truncating then rescaling never exceeds the original and loses
    /// less than one whole unit
    #[test]
    fn prop_round_trip_lower_bound(n in any::<u128>(), precision in 1u32..=30) {
        let original = BigUint::from(n);
        let truncated = to_decimal_string(Some(&original), i64::from(precision));
        let rescaled = to_scaled_integer(&truncated, i64::from(precision)).unwrap();

        prop_assert!(rescaled <= original);
        prop_assert!(&original - &rescaled < BigUint::from(10u32).pow(precision));
    }

    /// Property: whole numbers survive scaling up and truncating back down
    #[test]
    fn prop_whole_number_round_trip(n in any::<u128>(), precision in 1i64..=30) {
        let scaled = to_scaled_integer(&n.to_string(), precision).unwrap();
        prop_assert_eq!(to_decimal_string(Some(&scaled), precision), n.to_string());
    }

    /// Property: a whole number is scaled by exactly 10^precision
    #[test]
    fn prop_whole_number_scaling(n in any::<u64>(), precision in 1u32..=40) {
        let scaled = to_scaled_integer(&n.to_string(), i64::from(precision)).unwrap();
        prop_assert_eq!(scaled, BigUint::from(n) * BigUint::from(10u32).pow(precision));
    }

    /// Property: truncation keeps the whole part when the fraction fits the precision
    #[test]
    fn prop_fraction_truncates_to_whole_part(
        whole in any::<u64>(),
        fraction in "[0-9]{1,18}",
        extra in 0i64..=12,
    ) {
        let precision = fraction.len() as i64 + extra;
        let scaled = to_scaled_integer(&format!("{whole}.{fraction}"), precision).unwrap();
        prop_assert_eq!(to_decimal_string(Some(&scaled), precision), whole.to_string());
    }

    /// Property: excess fractional digits are kept, not rounded away
    #[test]
    fn prop_excess_fraction_digits_are_kept(
        whole in 0u64..1_000_000,
        fraction in "[0-9]{2,20}",
        precision_seed in any::<usize>(),
    ) {
        let precision = (precision_seed % fraction.len()) as i64;
        let scaled = to_scaled_integer(&format!("{whole}.{fraction}"), precision).unwrap();
        let expected = BigUint::parse_bytes(format!("{whole}{fraction}").as_bytes(), 10).unwrap();
        prop_assert_eq!(scaled, expected);
    }

    /// Property: a non-positive precision leaves the value untouched
    #[test]
    fn prop_non_positive_precision_is_identity(n in any::<u128>(), precision in -50i64..=0) {
        let value = BigUint::from(n);
        prop_assert_eq!(to_decimal_string(Some(&value), precision), n.to_string());
    }

    /// Property: parsing never panics, whatever the input
    #[test]
    fn prop_parse_is_total(input in "\\PC{0,40}", precision in -100i64..=100) {
        let _ = to_scaled_integer(&input, precision);
    }

    /// Property: a foreign character inside the digits is always rejected
    #[test]
    fn prop_foreign_characters_rejected(
        head in "[0-9]{1,6}",
        bad in arb_foreign_char(),
        tail in "[0-9]{1,6}",
        precision in 0i64..=18,
    ) {
        let input = format!("{head}{bad}{tail}");
        match to_scaled_integer(&input, precision) {
            Err(AmountError::InvalidCharacter { found, position, .. }) => {
                prop_assert_eq!(found, bad);
                prop_assert_eq!(position, head.len());
            }
            other => prop_assert!(false, "expected InvalidCharacter for {:?}, got {:?}", input, other),
        }
    }

    /// Property: the fixed-point rendering reparses to the same scaled value
    #[test]
    fn prop_fixed_point_reparses(raw in any::<u128>(), decimals in 1u8..=24) {
        let value = BigUint::from(raw);
        let rendered = format_fixed_point(&value, decimals);
        let reparsed = to_scaled_integer(&rendered, i64::from(decimals)).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    /// Property: amounts within 256 bits narrow to the same token amount
    #[test]
    fn prop_token_amount_matches_codec(n in any::<u64>(), fraction in "[0-9]{0,6}") {
        let input = if fraction.is_empty() { n.to_string() } else { format!("{n}.{fraction}") };
        let amount = TokenAmount::from_decimal_str(&input, TokenDecimals::STANDARD).unwrap();
        let scaled = to_scaled_integer(&input, 18).unwrap();
        prop_assert_eq!(amount.as_u256(), to_u256(&scaled).unwrap());
    }
}
