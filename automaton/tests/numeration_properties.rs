//! Property-based tests for the Tribonacci numeration.
//!
//! Uses proptest to check that greedy representations are exact, canonical
//! and survive alignment.

use autoseq_automaton::{align, Basis};
use proptest::prelude::*;

// =============================================================================
// Encoding Properties
// =============================================================================

proptest! {
    /// decode(encode(n)) = n
    #[test]
    fn prop_round_trip(n in 0u64..1_000_000_000_000) {
        let basis = Basis::tribonacci();
        let digits = basis.encode(n).unwrap();
        prop_assert_eq!(basis.decode(&digits).unwrap(), u128::from(n));
    }

    /// Every prefix of the representation stays within budget.
    #[test]
    fn prop_prefix_sums_bounded(n in 0u64..10_000_000) {
        let basis = Basis::tribonacci();
        let digits = basis.encode(n).unwrap();
        let weights: Vec<u128> = basis.weights()[..digits.len()].iter().rev().copied().collect();
        let mut partial = 0u128;
        for (d, w) in digits.iter().zip(&weights) {
            partial += u128::from(*d) * w;
            prop_assert!(partial <= u128::from(n));
        }
        prop_assert_eq!(partial, u128::from(n));
    }

    /// The leading digit is 1 for every positive value.
    #[test]
    fn prop_leading_digit(n in 1u64..10_000_000) {
        let digits = Basis::tribonacci().encode(n).unwrap();
        prop_assert_eq!(digits[0], 1);
    }

    /// Greedy Tribonacci representations never contain `111`.
    #[test]
    fn prop_no_three_ones(n in 0u64..10_000_000) {
        let digits = Basis::tribonacci().encode(n).unwrap();
        prop_assert!(!digits.windows(3).any(|w| w == [1, 1, 1]));
    }
}

// =============================================================================
// Alignment Properties
// =============================================================================

proptest! {
    /// Padding preserves each coordinate's value.
    #[test]
    fn prop_alignment_preserves_values(k in 0u64..1_000_000, n in 0u64..1_000_000) {
        let basis = Basis::tribonacci();
        let pairs = basis.encode_pair(k, n).unwrap();
        let left: Vec<u8> = pairs.iter().map(|p| p[0] as u8).collect();
        let right: Vec<u8> = pairs.iter().map(|p| p[1] as u8).collect();
        prop_assert_eq!(basis.decode(&left).unwrap(), u128::from(k));
        prop_assert_eq!(basis.decode(&right).unwrap(), u128::from(n));
    }

    /// Aligned length is the longer of the two representations.
    #[test]
    fn prop_alignment_length(k in 0u64..1_000_000, n in 0u64..1_000_000) {
        let basis = Basis::tribonacci();
        let rk = basis.encode(k).unwrap();
        let rn = basis.encode(n).unwrap();
        prop_assert_eq!(align(&rk, &rn).len(), rk.len().max(rn.len()));
    }
}

// =============================================================================
// Boundary
// =============================================================================

#[test]
fn table_limit_is_explicit() {
    let basis = Basis::tribonacci();
    let limit = basis.limit();
    assert!(basis.encode(limit).is_ok());
    assert!(basis.encode(limit + 1).is_err());
    // Every u64 coordinate fits in the default table.
    assert!(basis.encode(u64::MAX).is_ok());
}
