//! Greedy numeration over linear-recurrence weights.
//!
//! A [`Basis`] is an increasing weight table `w(0) < w(1) < …` built from a
//! seed list of length `d` and the recurrence `w(i+d) = w(i) + … + w(i+d-1)`.
//! With seeds `1, 2, 4` this is the Tribonacci numeration
//! (`1, 2, 4, 7, 13, 24, 44, …`) used by the `msd_tri` system in Walnut.
//!
//! Representations are 0/1 digit strings, most significant first. The length
//! of a representation is fixed by the first weight strictly above the value,
//! so `0` encodes as `[0]` and not as the empty string.

use std::sync::OnceLock;

use tracing::debug;

use crate::error::NumerationError;

/// Number of weights generated when no lookahead is given.
pub const DEFAULT_LOOKAHEAD: usize = 100;

/// Seeds of the Tribonacci weight table.
pub const TRIBONACCI_SEEDS: [u128; 3] = [1, 2, 4];

/// An increasing table of positional weights.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Basis {
    weights: Vec<u128>,
}

impl Basis {
    /// Builds `lookahead` weights from `seeds`.
    ///
    /// Generation stops early when the next weight would overflow `u128`.
    ///
    /// # Errors
    ///
    /// Returns [`NumerationError::InvalidSeeds`] unless the seeds have at
    /// least two terms, start at 1 and strictly increase, and
    /// [`NumerationError::InvalidLookahead`] when `lookahead < 2`.
    pub fn new(seeds: &[u128], lookahead: usize) -> Result<Self, NumerationError> {
        let increasing = seeds.windows(2).all(|w| w[0] < w[1]);
        if seeds.len() < 2 || seeds[0] != 1 || !increasing {
            return Err(NumerationError::InvalidSeeds {
                seeds: seeds.to_vec(),
            });
        }
        if lookahead < 2 {
            return Err(NumerationError::InvalidLookahead(lookahead));
        }
        Ok(Self::generate(seeds, lookahead))
    }

    /// The Tribonacci basis with [`DEFAULT_LOOKAHEAD`] weights.
    #[must_use]
    pub fn tribonacci() -> &'static Basis {
        static TRIBONACCI: OnceLock<Basis> = OnceLock::new();
        TRIBONACCI.get_or_init(|| Self::generate(&TRIBONACCI_SEEDS, DEFAULT_LOOKAHEAD))
    }

    fn generate(seeds: &[u128], lookahead: usize) -> Self {
        let order = seeds.len();
        let mut weights: Vec<u128> = seeds.iter().copied().take(lookahead).collect();
        while weights.len() < lookahead {
            let tail = &weights[weights.len() - order..];
            match tail.iter().try_fold(0u128, |acc, &w| acc.checked_add(w)) {
                Some(next) => weights.push(next),
                None => {
                    debug!(len = weights.len(), "weight table truncated at u128 overflow");
                    break;
                }
            }
        }
        Self { weights }
    }

    /// The weights, least significant first.
    #[must_use]
    pub fn weights(&self) -> &[u128] {
        &self.weights
    }

    /// Largest value [`encode`](Self::encode) accepts.
    ///
    /// Encoding `n` needs a weight strictly above `n`, so the last weight of
    /// the table bounds the range.
    #[must_use]
    pub fn limit(&self) -> u128 {
        self.weights.last().map_or(0, |w| w - 1)
    }

    /// Greedy representation of `n`, most significant digit first.
    ///
    /// # Errors
    ///
    /// Returns [`NumerationError::OutOfRange`] when `n > self.limit()`, and
    /// [`NumerationError::Unrepresentable`] if the greedy pass leaves a
    /// remainder (only possible for bases whose gaps exceed the lower weights).
    pub fn encode(&self, n: impl Into<u128>) -> Result<Vec<u8>, NumerationError> {
        let n = n.into();
        let top = self.weights[1..]
            .iter()
            .position(|&w| w > n)
            .ok_or(NumerationError::OutOfRange {
                value: n,
                limit: self.limit(),
            })?;

        let mut rest = n;
        let digits = self.weights[..=top]
            .iter()
            .rev()
            .map(|&w| {
                if rest >= w {
                    rest -= w;
                    1
                } else {
                    0
                }
            })
            .collect();
        if rest != 0 {
            return Err(NumerationError::Unrepresentable(n));
        }
        Ok(digits)
    }

    /// Weighted sum of a digit string, most significant digit first.
    ///
    /// # Errors
    ///
    /// Returns an error for digits other than 0/1, for strings longer than
    /// the table, or when the sum overflows.
    pub fn decode(&self, digits: &[u8]) -> Result<u128, NumerationError> {
        if digits.len() > self.weights.len() {
            return Err(NumerationError::TooManyDigits {
                len: digits.len(),
                weights: self.weights.len(),
            });
        }
        let mut total = 0u128;
        let weights = self.weights[..digits.len()].iter().rev();
        for (position, (&digit, &weight)) in digits.iter().zip(weights).enumerate() {
            match digit {
                0 => {}
                1 => total = total.checked_add(weight).ok_or(NumerationError::Overflow)?,
                _ => return Err(NumerationError::InvalidDigit { digit, position }),
            }
        }
        Ok(total)
    }

    /// Aligned 2-track input for the coordinate pair `(k, n)`.
    ///
    /// # Errors
    ///
    /// Propagates [`encode`](Self::encode) failures for either coordinate.
    pub fn encode_pair(
        &self,
        k: impl Into<u128>,
        n: impl Into<u128>,
    ) -> Result<Vec<[i32; 2]>, NumerationError> {
        let rk = self.encode(k)?;
        let rn = self.encode(n)?;
        Ok(align(&rk, &rn))
    }
}

/// Zips two digit strings into 2-track symbols, left-padding the shorter
/// one with zeros.
#[must_use]
pub fn align(a: &[u8], b: &[u8]) -> Vec<[i32; 2]> {
    let len = a.len().max(b.len());
    let pad_a = len - a.len();
    let pad_b = len - b.len();
    (0..len)
        .map(|i| {
            let da = if i < pad_a { 0 } else { a[i - pad_a] };
            let db = if i < pad_b { 0 } else { b[i - pad_b] };
            [i32::from(da), i32::from(db)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tribonacci_prefix() {
        let basis = Basis::tribonacci();
        assert_eq!(
            &basis.weights()[..10],
            &[1, 2, 4, 7, 13, 24, 44, 81, 149, 274]
        );
        assert_eq!(basis.weights().len(), DEFAULT_LOOKAHEAD);
    }

    #[test]
    fn small_values() {
        let basis = Basis::tribonacci();
        assert_eq!(basis.encode(0u64).unwrap(), vec![0]);
        assert_eq!(basis.encode(1u64).unwrap(), vec![1]);
        assert_eq!(basis.encode(2u64).unwrap(), vec![1, 0]);
        assert_eq!(basis.encode(3u64).unwrap(), vec![1, 1]);
        assert_eq!(basis.encode(6u64).unwrap(), vec![1, 1, 0]);
    }

    #[test]
    fn seven_uses_four_weights() {
        // weights[3] = 7 is not above 7, so the table goes up to 7 itself.
        let basis = Basis::tribonacci();
        assert_eq!(basis.encode(7u64).unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(basis.decode(&[1, 0, 0, 0]).unwrap(), 7);
    }

    #[test]
    fn limit_is_enforced() {
        let basis = Basis::new(&TRIBONACCI_SEEDS, 6).unwrap();
        assert_eq!(basis.limit(), 23);
        assert_eq!(basis.encode(23u64).unwrap(), vec![1, 1, 0, 1, 1]);
        assert_eq!(
            basis.encode(24u64),
            Err(NumerationError::OutOfRange {
                value: 24,
                limit: 23
            })
        );
    }

    #[test]
    fn rejects_bad_seeds() {
        assert!(matches!(
            Basis::new(&[2, 3, 5], 10),
            Err(NumerationError::InvalidSeeds { .. })
        ));
        assert!(matches!(
            Basis::new(&[1, 1, 2], 10),
            Err(NumerationError::InvalidSeeds { .. })
        ));
        assert!(matches!(
            Basis::new(&[1], 10),
            Err(NumerationError::InvalidSeeds { .. })
        ));
        assert_eq!(
            Basis::new(&TRIBONACCI_SEEDS, 1),
            Err(NumerationError::InvalidLookahead(1))
        );
    }

    #[test]
    fn fibonacci_seeds_work_too() {
        let basis = Basis::new(&[1, 2], 20).unwrap();
        assert_eq!(&basis.weights()[..6], &[1, 2, 3, 5, 8, 13]);
        assert_eq!(basis.encode(12u64).unwrap(), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn gaps_are_reported() {
        let basis = Basis::new(&[1, 3], 10).unwrap();
        assert_eq!(basis.encode(2u64), Err(NumerationError::Unrepresentable(2)));
    }

    #[test]
    fn overflow_truncates_table() {
        let basis = Basis::new(&TRIBONACCI_SEEDS, 1000).unwrap();
        assert!(basis.weights().len() < 1000);
        assert!(basis.weights().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn decode_rejects_bad_digits() {
        let basis = Basis::tribonacci();
        assert_eq!(
            basis.decode(&[1, 2]),
            Err(NumerationError::InvalidDigit {
                digit: 2,
                position: 1
            })
        );
        let short = Basis::new(&TRIBONACCI_SEEDS, 3).unwrap();
        assert!(matches!(
            short.decode(&[1, 0, 0, 0]),
            Err(NumerationError::TooManyDigits { len: 4, weights: 3 })
        ));
    }

    #[test]
    fn align_pads_shorter_side() {
        assert_eq!(align(&[1, 0, 1], &[1]), vec![[1, 0], [0, 0], [1, 1]]);
        assert_eq!(align(&[0], &[1, 1]), vec![[0, 1], [0, 1]]);
    }

    #[test]
    fn pair_of_origin() {
        assert_eq!(
            Basis::tribonacci().encode_pair(0u64, 0u64).unwrap(),
            vec![[0, 0]]
        );
    }
}
