//! Counting a DFAO into a linear representation over ℚ, and the operations
//! that combine and minimise such representations.
//!
//! Projecting a DFAO onto some of its input tracks and counting the
//! transitions that collapse onto the same projected symbol gives a weighted
//! automaton `(lambda, mu, rho)`. Its value on a word `a1…an` is
//! `lambda · mu[a1] ⋯ mu[an] · rho`, the number of ways to fill in the
//! projected-away tracks so that the DFAO ends in a state with positive
//! output (weighted by that output).
//!
//! The initial vector absorbs leading zero symbols: it is the fixpoint of
//! `v ← v · mu[0…0]` starting from state 0, so representations padded with
//! zeros on the hidden tracks are counted once.
//!
//! Weights are exact rationals. [`LinearRepresentation::reduce`] computes a
//! representation of minimal dimension for the same series, and
//! [`equivalence_matrix`] chains counting, relabelling, negation, sum and
//! reduction into the matrix of the abelian-equivalence pipeline.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as FmtWrite;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::debug;

use crate::dfao::{Dfao, StateId, INITIAL_STATE};
use crate::error::{EvalError, LinrepError};

/// Default bound on the zero-closure iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Tracks counted by [`equivalence_matrix`].
pub const EQUIVALENCE_TRACKS: [usize; 5] = [0, 1, 2, 3, 4];

/// Matrix and vector entries.
pub type Weight = BigRational;

/// Weights for one projected symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterMatrix {
    /// The projected symbol.
    pub label: Vec<i32>,
    /// `matrix[p][q]` weighs the move `p -> q` on `label`.
    #[cfg_attr(feature = "serde", serde(with = "weights::matrix"))]
    pub matrix: Vec<Vec<Weight>>,
}

/// A linear representation with rational weights.
///
/// For a freshly counted DFAO, index `i` is the `i`-th declared state in
/// ascending id order. After [`reduce`](Self::reduce) indices no longer name
/// states.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRepresentation {
    /// Initial row vector.
    #[cfg_attr(feature = "serde", serde(with = "weights::vector"))]
    pub lambda: Vec<Weight>,
    /// One matrix per projected symbol, in ascending symbol order.
    pub mu: Vec<LetterMatrix>,
    /// Final column vector.
    #[cfg_attr(feature = "serde", serde(with = "weights::vector"))]
    pub rho: Vec<Weight>,
}

fn int(n: i64) -> Weight {
    Weight::from_integer(BigInt::from(n))
}

fn zeros(dim: usize) -> Vec<Vec<Weight>> {
    vec![vec![Weight::zero(); dim]; dim]
}

/// Counts `dfao` projected onto the tracks listed in `vars`.
///
/// # Errors
///
/// Returns [`LinrepError::TrackOutOfRange`] when a symbol is shorter than a
/// requested track, [`LinrepError::NoFixpoint`] when the initial vector does
/// not stabilise within `max_iterations`, and [`LinrepError::Eval`] for
/// transitions into undeclared states.
pub fn count(
    dfao: &Dfao,
    vars: &[usize],
    max_iterations: usize,
) -> Result<LinearRepresentation, LinrepError> {
    let states: Vec<StateId> = dfao.states().map(|(id, _)| id).collect();
    let index: HashMap<StateId, usize> = states.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let dim = states.len();

    let mut letters: BTreeMap<Vec<i32>, Vec<Vec<Weight>>> = BTreeMap::new();
    let mut rho = vec![Weight::zero(); dim];
    for (p, (_, state)) in dfao.states().enumerate() {
        if state.output > 0 {
            rho[p] = int(state.output);
        }
        for (symbol, target) in &state.transitions {
            let label = project(symbol, vars)?;
            let q = *index.get(target).ok_or(EvalError::UnknownState(*target))?;
            let matrix = letters.entry(label).or_insert_with(|| zeros(dim));
            matrix[p][q] += Weight::one();
        }
    }

    let start = *index
        .get(&INITIAL_STATE)
        .ok_or(EvalError::UnknownState(INITIAL_STATE))?;
    let zero = vec![0; vars.len()];
    let lambda = zero_closure(start, dim, letters.get(&zero), max_iterations)?;

    debug!(
        states = dim,
        letters = letters.len(),
        "counted linear representation"
    );

    Ok(LinearRepresentation {
        lambda,
        mu: letters
            .into_iter()
            .map(|(label, matrix)| LetterMatrix { label, matrix })
            .collect(),
        rho,
    })
}

/// The abelian-equivalence matrix of a 5-track occurrence DFAO.
///
/// Counts `dfao` on [`EQUIVALENCE_TRACKS`] and reduces it to `s`, then
/// reduces `s + (-s')` where `s'` is `s` with tracks 1 and 2 swapped. The
/// result is zero-dimensional exactly when the counted series is symmetric
/// in those two tracks.
///
/// # Errors
///
/// Same as [`count`].
pub fn equivalence_matrix(
    dfao: &Dfao,
    max_iterations: usize,
) -> Result<LinearRepresentation, LinrepError> {
    let counted = count(dfao, &EQUIVALENCE_TRACKS, max_iterations)?;
    let reduced = counted.reduce();
    debug!(
        counted = counted.dim(),
        reduced = reduced.dim(),
        "reduced occurrence count"
    );
    let swapped = reduced
        .remap(|label| {
            let mut label = label.to_vec();
            label.swap(1, 2);
            label
        })
        .negate();
    let difference = reduced.sum(&swapped).reduce();
    debug!(dim = difference.dim(), "reduced swapped difference");
    Ok(difference)
}

fn project(symbol: &[i32], vars: &[usize]) -> Result<Vec<i32>, LinrepError> {
    vars.iter()
        .map(|&track| {
            symbol
                .get(track)
                .copied()
                .ok_or_else(|| LinrepError::TrackOutOfRange {
                    track,
                    symbol: symbol.to_vec(),
                })
        })
        .collect()
}

fn zero_closure(
    start: usize,
    dim: usize,
    zero: Option<&Vec<Vec<Weight>>>,
    max_iterations: usize,
) -> Result<Vec<Weight>, LinrepError> {
    let mut current = vec![Weight::zero(); dim];
    current[start] = Weight::one();
    for _ in 0..max_iterations {
        let next = match zero {
            Some(m) => row_times(&current, m),
            None => vec![Weight::zero(); dim],
        };
        if next == current {
            return Ok(current);
        }
        current = next;
    }
    Err(LinrepError::NoFixpoint(max_iterations))
}

fn row_times(row: &[Weight], matrix: &[Vec<Weight>]) -> Vec<Weight> {
    let width = matrix.first().map_or(row.len(), Vec::len);
    let mut out = vec![Weight::zero(); width];
    for (w, line) in row.iter().zip(matrix) {
        if w.is_zero() {
            continue;
        }
        for (o, m) in out.iter_mut().zip(line) {
            *o += w * m;
        }
    }
    out
}

fn dot(a: &[Weight], b: &[Weight]) -> Weight {
    a.iter().zip(b).fold(Weight::zero(), |acc, (x, y)| acc + x * y)
}

fn transpose(matrix: &[Vec<Weight>]) -> Vec<Vec<Weight>> {
    let dim = matrix.len();
    (0..dim)
        .map(|q| matrix.iter().map(|row| row[q].clone()).collect())
        .collect()
}

/// Row echelon form of a growing set of independent vectors, keeping track of
/// how each echelon row is written in terms of the inserted vectors.
#[derive(Default)]
struct Span {
    basis: Vec<Vec<Weight>>,
    echelon: Vec<EchelonRow>,
}

struct EchelonRow {
    pivot: usize,
    row: Vec<Weight>,
    /// `row = Σ coeffs[j] · basis[j]`.
    coeffs: Vec<Weight>,
}

impl Span {
    /// Coordinates of `x` over the basis and the part of `x` outside the span.
    fn decompose(&self, x: &[Weight]) -> (Vec<Weight>, Vec<Weight>) {
        let mut rest = x.to_vec();
        let mut coords = vec![Weight::zero(); self.basis.len()];
        for e in &self.echelon {
            let c = rest[e.pivot].clone();
            if c.is_zero() {
                continue;
            }
            for (r, v) in rest.iter_mut().zip(&e.row) {
                *r -= &c * v;
            }
            for (k, w) in coords.iter_mut().zip(&e.coeffs) {
                *k += &c * w;
            }
        }
        (coords, rest)
    }

    /// Adds `x` to the basis unless it already lies in the span.
    fn insert(&mut self, x: &[Weight]) -> bool {
        let (coords, rest) = self.decompose(x);
        let Some(pivot) = rest.iter().position(|v| !v.is_zero()) else {
            return false;
        };
        let p = rest[pivot].clone();
        let mut coeffs: Vec<Weight> = coords.iter().map(|c| -c / &p).collect();
        coeffs.push(p.recip());
        let row = rest.iter().map(|v| v / &p).collect();
        self.echelon.push(EchelonRow { pivot, row, coeffs });
        self.basis.push(x.to_vec());
        true
    }
}

impl LinearRepresentation {
    /// The zero-dimensional representation (the zero series).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lambda: Vec::new(),
            mu: Vec::new(),
            rho: Vec::new(),
        }
    }

    /// Dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.lambda.len()
    }

    /// Matrix of a projected symbol, if any transition carries it.
    #[must_use]
    pub fn letter(&self, label: &[i32]) -> Option<&[Vec<Weight>]> {
        self.mu
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.matrix.as_slice())
    }

    /// `lambda · mu[a1] ⋯ mu[an] · rho`; symbols without a matrix count as
    /// the zero matrix.
    pub fn value<I, S>(&self, word: I) -> Weight
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[i32]>,
    {
        let mut row = self.lambda.clone();
        for symbol in word {
            row = match self.letter(symbol.as_ref()) {
                Some(m) => row_times(&row, m),
                None => vec![Weight::zero(); self.dim()],
            };
        }
        dot(&row, &self.rho)
    }

    /// The same matrices with every label replaced by `relabel(label)`.
    ///
    /// Letters that land on the same label are added together.
    #[must_use]
    pub fn remap<F>(&self, mut relabel: F) -> Self
    where
        F: FnMut(&[i32]) -> Vec<i32>,
    {
        let dim = self.dim();
        let mut letters: BTreeMap<Vec<i32>, Vec<Vec<Weight>>> = BTreeMap::new();
        for letter in &self.mu {
            let merged = letters
                .entry(relabel(&letter.label))
                .or_insert_with(|| zeros(dim));
            for (row, src) in merged.iter_mut().zip(&letter.matrix) {
                for (x, y) in row.iter_mut().zip(src) {
                    *x += y;
                }
            }
        }
        Self {
            lambda: self.lambda.clone(),
            mu: letters
                .into_iter()
                .map(|(label, matrix)| LetterMatrix { label, matrix })
                .collect(),
            rho: self.rho.clone(),
        }
    }

    /// The opposite series.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            lambda: self.lambda.iter().map(|w| -w).collect(),
            ..self.clone()
        }
    }

    /// A representation of the pointwise sum of both series: the
    /// block-diagonal union of the two.
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        let (m, n) = (self.dim(), other.dim());
        let mut letters: BTreeMap<Vec<i32>, Vec<Vec<Weight>>> = BTreeMap::new();
        for (offset, rep) in [(0, self), (m, other)] {
            for letter in &rep.mu {
                let block = letters
                    .entry(letter.label.clone())
                    .or_insert_with(|| zeros(m + n));
                for (p, row) in letter.matrix.iter().enumerate() {
                    for (q, w) in row.iter().enumerate() {
                        block[offset + p][offset + q] = w.clone();
                    }
                }
            }
        }
        Self {
            lambda: self.lambda.iter().chain(&other.lambda).cloned().collect(),
            mu: letters
                .into_iter()
                .map(|(label, matrix)| LetterMatrix { label, matrix })
                .collect(),
            rho: self.rho.iter().chain(&other.rho).cloned().collect(),
        }
    }

    /// A representation of the same series with minimal dimension.
    ///
    /// Restricts to the span of the reachable row vectors `lambda · mu(w)`,
    /// then to the span of the column vectors `mu(w) · rho`. Letters whose
    /// reduced matrix is zero are dropped.
    #[must_use]
    pub fn reduce(&self) -> Self {
        let mut reduced = self.forward().transposed().forward().transposed();
        reduced
            .mu
            .retain(|l| l.matrix.iter().flatten().any(|w| !w.is_zero()));
        reduced
    }

    /// Restriction to the span of `{ lambda · mu(w) }`.
    fn forward(&self) -> Self {
        let mut span = Span::default();
        if !span.insert(&self.lambda) {
            return Self::empty();
        }
        let mut images: Vec<Vec<Vec<Weight>>> = Vec::new();
        while images.len() < span.basis.len() {
            let base = &span.basis[images.len()];
            let row: Vec<Vec<Weight>> = self
                .mu
                .iter()
                .map(|l| row_times(base, &l.matrix))
                .collect();
            for v in &row {
                span.insert(v);
            }
            images.push(row);
        }

        let dim = span.basis.len();
        let mut lambda = vec![Weight::zero(); dim];
        lambda[0] = Weight::one();
        let mu = self
            .mu
            .iter()
            .enumerate()
            .map(|(a, l)| LetterMatrix {
                label: l.label.clone(),
                matrix: images.iter().map(|row| span.decompose(&row[a]).0).collect(),
            })
            .collect();
        let rho = span.basis.iter().map(|b| dot(b, &self.rho)).collect();
        Self { lambda, mu, rho }
    }

    fn transposed(&self) -> Self {
        Self {
            lambda: self.rho.clone(),
            mu: self
                .mu
                .iter()
                .map(|l| LetterMatrix {
                    label: l.label.clone(),
                    matrix: transpose(&l.matrix),
                })
                .collect(),
            rho: self.lambda.clone(),
        }
    }

    fn entries(&self) -> impl Iterator<Item = &Weight> + '_ {
        self.lambda
            .iter()
            .chain(self.mu.iter().flat_map(|l| l.matrix.iter().flatten()))
            .chain(self.rho.iter())
    }

    /// Smallest entry, 0 included.
    #[must_use]
    pub fn min(&self) -> Weight {
        self.entries().fold(Weight::zero(), |acc, w| acc.min(w.clone()))
    }

    /// Largest entry, 0 included.
    #[must_use]
    pub fn max(&self) -> Weight {
        self.entries().fold(Weight::zero(), |acc, w| acc.max(w.clone()))
    }

    /// Text form: `lambda = [...]`, one `mu[a, b] = [` block per symbol, then
    /// `rho = [...]`. Non-integer weights print as `p/q`. Empty for a
    /// zero-dimensional representation.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.dim() == 0 {
            return out;
        }
        let _ = writeln!(out, "lambda = [{}]", join(&self.lambda));
        out.push('\n');
        for letter in &self.mu {
            let _ = writeln!(out, "mu[{}] = [", join(&letter.label));
            let last = letter.matrix.len().saturating_sub(1);
            for (i, row) in letter.matrix.iter().enumerate() {
                let sep = if i < last { "," } else { "" };
                let _ = writeln!(out, "[{}]{sep}", join(row));
            }
            out.push_str("]\n\n");
        }
        let _ = writeln!(out, "rho = [{}]", join(&self.rho));
        out
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON form of weights: each entry is a string, `"3"` or `"-3/2"`.
#[cfg(feature = "serde")]
mod weights {
    use std::str::FromStr;

    use super::Weight;

    fn parse<E: serde::de::Error>(text: &str) -> Result<Weight, E> {
        Weight::from_str(text).map_err(|e| E::custom(format!("invalid weight {text:?}: {e}")))
    }

    pub mod vector {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::{parse, Weight};

        pub fn serialize<S: Serializer>(values: &[Weight], s: S) -> Result<S::Ok, S::Error> {
            s.collect_seq(values.iter().map(ToString::to_string))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Weight>, D::Error> {
            Vec::<String>::deserialize(d)?
                .iter()
                .map(|text| parse::<D::Error>(text))
                .collect()
        }
    }

    pub mod matrix {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::{parse, Weight};

        pub fn serialize<S: Serializer>(rows: &[Vec<Weight>], s: S) -> Result<S::Ok, S::Error> {
            s.collect_seq(
                rows.iter()
                    .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>()),
            )
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Vec<Vec<Weight>>, D::Error> {
            Vec::<Vec<String>>::deserialize(d)?
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|text| parse::<D::Error>(text))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect()
        }
    }
}
