//! Scalar fields over pixel coordinates.

use autoseq_automaton::{Basis, Dfao};

use crate::error::RenderError;

/// A value for every coordinate pair `(k, n)`.
pub trait Field {
    /// Value at row `k`, column `n`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the value cannot be computed; the
    /// whole raster is then abandoned.
    fn value(&self, k: u64, n: u64) -> Result<i64, RenderError>;
}

/// Runs `dfao` on the aligned representations of `(k, n)`.
fn evaluate(basis: &Basis, dfao: &Dfao, k: u64, n: u64) -> Result<i64, RenderError> {
    let input = basis
        .encode_pair(k, n)
        .map_err(|source| RenderError::Numeration { k, n, source })?;
    dfao.evaluate(&input)
        .map_err(|source| RenderError::Eval { k, n, source })
}

/// One DFAO read directly on the coordinate pair.
#[derive(Debug, Clone, Copy)]
pub struct DfaoField<'a> {
    basis: &'a Basis,
    dfao: &'a Dfao,
}

impl<'a> DfaoField<'a> {
    /// A field reading `dfao` over `basis`.
    #[must_use]
    pub fn new(basis: &'a Basis, dfao: &'a Dfao) -> Self {
        Self { basis, dfao }
    }
}

impl Field for DfaoField<'_> {
    fn value(&self, k: u64, n: u64) -> Result<i64, RenderError> {
        evaluate(self.basis, self.dfao, k, n)
    }
}

/// Sum of unit steps along a vector `(dx, dy)`.
///
/// The value at `(k, n)` adds `dx` evaluations of the horizontal-step DFAO
/// at `(k, n), (k, n+1), …, (k, n+dx-1)` and `dy` evaluations of the
/// vertical-step DFAO at `(k, n+dx), (k+1, n+dx), …, (k+dy-1, n+dx)`: the
/// walk first moves right, then up.
#[derive(Debug, Clone, Copy)]
pub struct VectorField<'a> {
    basis: &'a Basis,
    dx_dfao: &'a Dfao,
    dy_dfao: &'a Dfao,
    dx: u64,
    dy: u64,
}

impl<'a> VectorField<'a> {
    /// A field summing `dx` steps of `dx_dfao` then `dy` steps of `dy_dfao`.
    #[must_use]
    pub fn new(basis: &'a Basis, dx_dfao: &'a Dfao, dy_dfao: &'a Dfao, dx: u64, dy: u64) -> Self {
        Self {
            basis,
            dx_dfao,
            dy_dfao,
            dx,
            dy,
        }
    }
}

impl Field for VectorField<'_> {
    fn value(&self, k: u64, n: u64) -> Result<i64, RenderError> {
        let overflow = || RenderError::Overflow { k, n };
        let mut acc = 0i64;
        for z in 0..self.dx {
            let col = n.checked_add(z).ok_or_else(overflow)?;
            let v = evaluate(self.basis, self.dx_dfao, k, col)?;
            acc = acc.checked_add(v).ok_or_else(overflow)?;
        }
        let col = n.checked_add(self.dx).ok_or_else(overflow)?;
        for z in 0..self.dy {
            let row = k.checked_add(z).ok_or_else(overflow)?;
            let v = evaluate(self.basis, self.dy_dfao, row, col)?;
            acc = acc.checked_add(v).ok_or_else(overflow)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Output 1 on every input whose last pair has a 1 in the column track.
    fn column_parity() -> Dfao {
        Dfao::parse(
            "msd_tri msd_tri\n\
             0 0\n0 0 -> 0\n0 1 -> 1\n1 0 -> 0\n1 1 -> 1\n\
             1 1\n0 0 -> 0\n0 1 -> 1\n1 0 -> 0\n1 1 -> 1\n",
        )
        .unwrap()
    }

    /// Constant output `c` on every binary pair.
    fn constant(c: i64) -> Dfao {
        Dfao::parse(&format!(
            "msd_tri msd_tri\n0 {c}\n0 0 -> 0\n0 1 -> 0\n1 0 -> 0\n1 1 -> 0\n"
        ))
        .unwrap()
    }

    #[test]
    fn dfao_field_reads_last_digit() {
        let dfao = column_parity();
        let field = DfaoField::new(Basis::tribonacci(), &dfao);
        // 0 -> [0], 1 -> [1], 2 -> [1, 0], 3 -> [1, 1]
        assert_eq!(field.value(0, 0).unwrap(), 0);
        assert_eq!(field.value(0, 1).unwrap(), 1);
        assert_eq!(field.value(5, 2).unwrap(), 0);
        assert_eq!(field.value(5, 3).unwrap(), 1);
    }

    #[test]
    fn unit_vector_matches_single_field() {
        let dfao = column_parity();
        let other = constant(100);
        let basis = Basis::tribonacci();
        let single = DfaoField::new(basis, &dfao);
        let vector = VectorField::new(basis, &dfao, &other, 1, 0);
        for k in 0..20 {
            for n in 0..20 {
                assert_eq!(vector.value(k, n).unwrap(), single.value(k, n).unwrap());
            }
        }
    }

    #[test]
    fn vector_sums_both_legs() {
        let one = constant(1);
        let ten = constant(10);
        let field = VectorField::new(Basis::tribonacci(), &one, &ten, 3, 2);
        assert_eq!(field.value(4, 4).unwrap(), 3 + 20);
        let zero = VectorField::new(Basis::tribonacci(), &one, &ten, 0, 0);
        assert_eq!(zero.value(4, 4).unwrap(), 0);
    }

    #[test]
    fn evaluation_failure_names_the_pixel() {
        let dfao = Dfao::parse("msd_tri msd_tri\n0 0\n0 0 -> 0\n").unwrap();
        let field = DfaoField::new(Basis::tribonacci(), &dfao);
        let err = field.value(1, 0).unwrap_err();
        assert!(matches!(err, RenderError::Eval { k: 1, n: 0, .. }));
    }

    #[test]
    fn out_of_table_coordinates_are_rejected() {
        let basis = Basis::new(&[1, 2, 4], 5).unwrap();
        let dfao = constant(0);
        let field = DfaoField::new(&basis, &dfao);
        assert!(field.value(12, 0).is_ok());
        assert!(matches!(
            field.value(13, 0),
            Err(RenderError::Numeration { k: 13, .. })
        ));
    }
}
