use eucl::{EucRing, EucRingOps};
use crate::sparse::SpMat;
use super::{Eliminator, ElimState, RowHermite, ColHermite};

/// Alternates row and column Hermite reductions until the matrix is diagonal.
#[derive(Clone, Debug, Default)]
pub struct Diagonal;

impl Diagonal {
    // non-empty lines are exactly 0..k, and line i holds a single normalized entry at i.
    // the condition is symmetric, so it is checked in whatever alignment `a` has.
    pub(crate) fn is_done<R>(a: &SpMat<R>) -> bool
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let k = a.count_lines();
        (0..k).all(|i| match a.line(i) {
            [(j, x)] => *j == i && x.is_normalized(),
            _ => false
        })
    }
}

impl<R> Eliminator<R> for Diagonal
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        if Self::is_done(st.target()) {
            return true
        }

        RowHermite::default().run(st);

        if Self::is_done(st.target()) {
            return true
        }

        ColHermite.run(st);

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::elim::tests::assert_decomp;
    use crate::elim::{eliminate, MatrixForm};
    use crate::sparse::Align;
    use super::*;

    #[test]
    fn is_done() {
        assert!(Diagonal::is_done(&SpMat::<i32>::zero((2, 3))));
        assert!(Diagonal::is_done(&SpMat::from_dense_data((2, 3), [1, 0, 0, 0, 4, 0])));
        assert!(!Diagonal::is_done(&SpMat::from_dense_data((2, 3), [1, 0, 0, 0, -4, 0])));
        assert!(!Diagonal::is_done(&SpMat::from_dense_data((2, 3), [0, 0, 0, 0, 4, 0])));
        assert!(!Diagonal::is_done(&SpMat::from_dense_data((2, 3), [1, 2, 0, 0, 4, 0])));

        let mut a = SpMat::from_dense_data((3, 2), [2, 0, 0, 3, 0, 0]);
        a.switch_alignment(Align::Cols);
        assert!(Diagonal::is_done(&a));
    }

    #[test]
    fn diagonal() {
        let a = SpMat::from_dense_data((3, 3), [
            2, 4, 4,
            -6, 6, 12,
            10, -4, -16
        ]);
        let e = eliminate(a.clone(), MatrixForm::Diagonal);

        assert!(Diagonal::is_done(e.result()));
        assert!(e.result().is_diag());
        assert_decomp(&a, &e);

        let d = e.diagonal();
        let det: i32 = d.iter().product();
        assert_eq!(det.abs(), 144);
    }

    #[test]
    fn diagonal_rank_deficient() {
        let a = SpMat::from_dense_data((3, 4), [
            1, 2, 3, 4,
            2, 4, 6, 8,
            0, 1, 1, 0
        ]);
        let e = eliminate(a.clone(), MatrixForm::Diagonal);

        assert!(Diagonal::is_done(e.result()));
        assert_eq!(e.rank(), 2);
        assert_decomp(&a, &e);
    }

    #[test]
    fn diagonal_already_done() {
        let a = SpMat::from_dense_data((2, 2), [3, 0, 0, 2]);
        let e = eliminate(a.clone(), MatrixForm::Diagonal);
        assert_eq!(e.result(), &a);
        assert!(e.row_ops().is_empty());
        assert!(e.col_ops().is_empty());
    }
}
