//! Exact elimination of sparse matrices over Euclidean rings.
//!
//! A strategy reduces the target by elementary operations, each of which is
//! recorded, so that the result `P * A * Q` together with `P`, `Q` and
//! their inverses can be recovered afterwards.

use log::debug;
use derive_more::Display;
use eucl::{EucRing, EucRingOps};
use crate::sparse::SpMat;
use crate::MatTrait;

mod step;
mod state;
mod echelon;
mod hermite;
mod diagonal;
mod smith;
mod result;

pub use step::ElimStep;
pub use state::ElimState;
pub use echelon::{RowEchelon, ColEchelon};
pub use hermite::{RowHermite, ColHermite};
pub use diagonal::Diagonal;
pub use smith::Smith;
pub use result::ElimResult;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixForm {
    RowEchelon,
    ColEchelon,
    RowHermite,
    ColHermite,
    Diagonal,
    Smith
}

impl MatrixForm {
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Self::Diagonal | Self::Smith)
    }

    pub fn is_row_form(&self) -> bool {
        matches!(self, Self::RowEchelon | Self::RowHermite)
    }

    pub fn is_col_form(&self) -> bool {
        matches!(self, Self::ColEchelon | Self::ColHermite)
    }
}

/// A single elimination strategy.
///
/// `run` calls `prepare` once, `iterate` until it reports completion,
/// and `finish` once. Strategies compose by running one another on the
/// same state.
pub trait Eliminator<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn prepare(&mut self, _st: &mut ElimState<R>) {}
    fn iterate(&mut self, st: &mut ElimState<R>) -> bool;
    fn finish(&mut self, _st: &mut ElimState<R>) {}

    fn run(mut self, st: &mut ElimState<R>)
    where Self: Sized {
        self.prepare(st);
        while !self.iterate(st) {}
        self.finish(st);
    }
}

/// Reduces `target` into `form`, consuming it.
pub fn eliminate<R>(target: SpMat<R>, form: MatrixForm) -> ElimResult<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    debug!("start elim: {:?}, form: {form}, nnz: {}.", target.shape(), target.nnz());

    let mut st = ElimState::new(target);

    match form {
        MatrixForm::RowEchelon => RowEchelon::default().run(&mut st),
        MatrixForm::ColEchelon => ColEchelon.run(&mut st),
        MatrixForm::RowHermite => RowHermite::default().run(&mut st),
        MatrixForm::ColHermite => ColHermite.run(&mut st),
        MatrixForm::Diagonal   => Diagonal.run(&mut st),
        MatrixForm::Smith      => Smith::default().run(&mut st),
    }

    debug!("elim done: {} row-ops, {} col-ops.", st.row_ops().len(), st.col_ops().len());

    let (res, row_ops, col_ops) = st.into_parts();
    ElimResult::new(form, res, row_ops, col_ops)
}

impl<R> SpMat<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn elim(&self, form: MatrixForm) -> ElimResult<R> {
        eliminate(self.clone(), form)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use num_traits::{Zero, One};
    use eucl::{Ring, FF, Ratio, Poly};
    use crate::sparse::Align;
    use super::*;

    pub(crate) fn assert_decomp<R>(a: &SpMat<R>, e: &ElimResult<R>)
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let (p, q) = (e.left(), e.right());
        let (pinv, qinv) = (e.left_inv(), e.right_inv());
        let (m, n) = a.shape();

        assert_eq!(p * a * q, e.result().clone());
        assert_eq!(pinv * e.result() * qinv, a.clone());
        assert_eq!(p * pinv, SpMat::id(m));
        assert_eq!(q * qinv, SpMat::id(n));
    }

    fn a1() -> SpMat<i64> {
        SpMat::from_dense_data((5, 5), [2, -1, -2, -2, -3, 1, 2, -1, 1, -1, 2, -2, -4, -3, -6, 1, 7, 1, 5, 3, 1, -12, -6, -10, -11])
    }

    fn a2() -> SpMat<i64> {
        SpMat::from_dense_data((5, 5), [3, -5, -22, 20, 8, 6, -11, -50, 45, 18, -1, 2, 10, -9, -3, 3, -6, -30, 27, 10, -1, 2, 7, -6, -3])
    }

    fn a3() -> SpMat<i64> {
        SpMat::from_dense_data((5, 5), [-20, -7, -27, 2, 29, 17, 8, 14, -4, -10, 13, 8, 10, -4, -6, -9, -2, -14, 0, 16, 5, 0, 5, -1, -4])
    }

    fn a4() -> SpMat<i64> {
        SpMat::from_dense_data((5, 5), [4, 6, -18, -15, -46, -1, 0, 6, 4, 13, -13, -12, 36, 30, 97, -7, -6, 18, 15, 49, -6, -6, 18, 15, 48])
    }

    fn a5() -> SpMat<i64> {
        SpMat::from_dense_data((4, 6), [8, -6, 14, -10, -14, 6, 12, -8, 18, -18, -20, 8, -16, 7, -23, 22, 23, -7, 32, -17, 44, -49, -49, 17])
    }

    fn diag(shape: (usize, usize), d: &[i64]) -> SpMat<i64> {
        SpMat::from_entries(shape, d.iter().enumerate().map(|(i, &a)| (i, i, a)))
    }

    #[test]
    fn smith_regular() {
        let a = a1();
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &SpMat::id(5));
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_rank4() {
        let a = a2();
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &diag((5, 5), &[1, 1, 1, 1]));
        assert_eq!(e.rank(), 4);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_full_rank_with_factors() {
        let a = a3();
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &diag((5, 5), &[1, 1, 1, 2, 60]));
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_rank3_with_factors() {
        let a = a4();
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &diag((5, 5), &[1, 1, 6]));
        assert_eq!(e.rank(), 3);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_non_square() {
        let a = a5();
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &diag((4, 6), &[1, 1, 2, 12]));
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_zero() {
        let a = SpMat::<i64>::zero((4, 6));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &a);
        assert_eq!(e.rank(), 0);
        assert!(e.row_ops().is_empty());
        assert!(e.col_ops().is_empty());
    }

    #[test]
    fn smith_empty() {
        let a = SpMat::<i64>::zero((0, 3));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.rank(), 0);
        assert_eq!(e.kernel(), &SpMat::id(3));
    }

    #[test]
    fn smith_id() {
        let a = SpMat::<i64>::id(4);
        let e = a.elim(MatrixForm::Smith);
        assert_eq!(e.result(), &a);
        assert!(e.row_ops().is_empty());
        assert!(e.col_ops().is_empty());
    }

    #[test]
    fn smith_divisibility() {
        let a = diag((4, 4), &[4, 6, -10, 9]);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![1, 2, 6, 180]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_bigint() {
        use num_bigint::BigInt;
        let a = a3().map(|a| BigInt::from(*a));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), [1, 1, 1, 2, 60].map(BigInt::from).to_vec());
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_ratio() {
        type R = Ratio<i64>;
        let a = SpMat::from_dense_data((5, 5), [
            (-3, 1), (0, 1), (0, 1), (-9, 2), (0, 1),
            (10, 3), (2, 1), (0, 1), (-15, 2), (6, 1),
            (-10, 3), (-2, 1), (0, 1), (15, 2), (-10, 1),
            (0, 1), (0, 1), (3, 4), (-5, 1), (0, 1),
            (0, 1), (0, 1), (1, 1), (0, 1), (0, 1)
        ].map(|(a, b)| R::new(a, b)));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.result(), &SpMat::id(5));
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_ratio_rank3() {
        type R = Ratio<i64>;
        let a = SpMat::from_dense_data((5, 5), [
            (1, 1), (1, 1), (0, 1), (8, 3), (10, 3),
            (-3, 1), (0, 1), (0, 1), (-3, 1), (-5, 1),
            (2, 1), (0, 1), (10, 3), (2, 1), (16, 3),
            (79, 8), (0, 1), (395, 24), (79, 8), (79, 3),
            (7, 2), (0, 1), (35, 6), (7, 2), (28, 3)
        ].map(|(a, b)| R::new(a, b)));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.rank(), 3);
        assert_eq!(e.diagonal(), vec![R::from(1), R::from(1), R::from(1), R::zero(), R::zero()]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_ff() {
        type R = FF<5>;
        let a = SpMat::from_dense_data((3, 4), [1, 2, 3, 4, 2, 4, 1, 3, 0, 1, 0, 1].map(R::from));
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.rank(), 2);
        assert_eq!(e.diagonal(), vec![R::from(1), R::from(1), R::zero()]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_poly() {
        type R = Poly<'x', Ratio<i64>>;
        let x = R::variable();
        let one = R::one();

        // [[x, 1], [0, x]] ~ diag(1, x^2)
        let a = SpMat::from_dense_data((2, 2), [x.clone(), one.clone(), R::zero(), x.clone()]);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![one, &x * &x]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn all_forms_decompose() {
        use MatrixForm::*;
        for form in [RowEchelon, ColEchelon, RowHermite, ColHermite, Diagonal, Smith] {
            for a in [a1(), a2(), a3(), a4(), a5()] {
                let e = eliminate(a.clone(), form);
                assert_eq!(e.form(), form);
                assert_decomp(&a, &e);
            }
        }
    }

    #[test]
    fn rank_invariant() {
        use MatrixForm::*;
        for a in [a1(), a2(), a3(), a4(), a5()] {
            let r = eliminate(a.clone(), Smith).rank();
            for form in [RowEchelon, ColEchelon, RowHermite, ColHermite, Diagonal] {
                assert_eq!(eliminate(a.clone(), form).rank(), r, "{form}");
            }
        }
    }

    #[test]
    fn rank_under_equivalence() {
        use rand::{Rng, SeedableRng};
        use rand::rngs::StdRng;

        let (m, n) = (5, 7);
        for seed in 0..20 {
            let a = SpMat::<i64>::rand((m, n), 0.4, 4, seed);
            let e = eliminate(a.clone(), MatrixForm::Smith);

            let mut rng = StdRng::seed_from_u64(seed);
            let mut b = a.clone();
            for _ in 0..12 {
                let (i, j) = (rng.gen_range(0..m), rng.gen_range(0..m));
                if i != j {
                    b.add_row(i, j, &rng.gen_range(-2..=2));
                }
                b.swap_rows(rng.gen_range(0..m), rng.gen_range(0..m));

                let (k, l) = (rng.gen_range(0..n), rng.gen_range(0..n));
                if k != l {
                    b.add_col(k, l, &rng.gen_range(-2..=2));
                }
            }

            let f = eliminate(b.clone(), MatrixForm::Smith);
            assert_eq!(f.rank(), e.rank(), "seed = {seed}");
            assert_eq!(f.diagonal(), e.diagonal(), "seed = {seed}");
            assert_eq!(eliminate(b, MatrixForm::RowHermite).rank(), e.rank(), "seed = {seed}");
        }
    }

    #[test]
    fn random() {
        use MatrixForm::*;
        for seed in 0..10 {
            let a = SpMat::<i64>::rand((6, 8), 0.4, 5, seed);
            for form in [RowHermite, ColHermite, Diagonal, Smith] {
                let e = eliminate(a.clone(), form);
                assert_decomp(&a, &e);
            }

            let e = eliminate(a.clone(), Smith);
            let d = e.diagonal();
            let r = e.rank();

            assert!((0..r).all(|i| d[i].is_normalized()));
            assert!((1..r).all(|i| d[i - 1].divides(&d[i])));
            assert!((&a * e.kernel()).is_zero());
            assert_eq!(e.kernel_trans() * e.kernel(), SpMat::id(8 - r));
        }
    }

    #[test]
    fn alignment_independent() {
        let mut a = a3();
        a.switch_alignment(Align::Cols);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![1, 1, 1, 2, 60]);
        assert_decomp(&a, &e);
    }
}
