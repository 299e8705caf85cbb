use std::ops::Range;
use std::sync::OnceLock;
use log::trace;
use eucl::{EucRing, EucRingOps};
use crate::sparse::{SpMat, Align};
use crate::MatTrait;
use super::{ElimStep, MatrixForm};

/// The outcome of an elimination run: `P * A * Q = result`.
///
/// Everything derived from the recorded steps is computed on first
/// access and kept.
#[derive(Clone, Debug)]
pub struct ElimResult<R> {
    form: MatrixForm,
    result: SpMat<R>,
    row_ops: Vec<ElimStep<R>>,
    col_ops: Vec<ElimStep<R>>,

    rank: OnceLock<usize>,
    left: OnceLock<SpMat<R>>,
    left_inv: OnceLock<SpMat<R>>,
    right: OnceLock<SpMat<R>>,
    right_inv: OnceLock<SpMat<R>>,
    kernel: OnceLock<SpMat<R>>,
    kernel_trans: OnceLock<SpMat<R>>,
    image: OnceLock<SpMat<R>>,
    image_trans: OnceLock<SpMat<R>>,
    determinant: OnceLock<R>,
    inverse: OnceLock<Option<SpMat<R>>>,
}

impl<R> ElimResult<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn new(form: MatrixForm, result: SpMat<R>, row_ops: Vec<ElimStep<R>>, col_ops: Vec<ElimStep<R>>) -> Self {
        debug_assert!(row_ops.iter().all(|s| s.is_row_op()));
        debug_assert!(col_ops.iter().all(|s| s.is_col_op()));

        Self {
            form, result, row_ops, col_ops,
            rank: OnceLock::new(),
            left: OnceLock::new(),
            left_inv: OnceLock::new(),
            right: OnceLock::new(),
            right_inv: OnceLock::new(),
            kernel: OnceLock::new(),
            kernel_trans: OnceLock::new(),
            image: OnceLock::new(),
            image_trans: OnceLock::new(),
            determinant: OnceLock::new(),
            inverse: OnceLock::new(),
        }
    }

    pub fn form(&self) -> MatrixForm {
        self.form
    }

    pub fn result(&self) -> &SpMat<R> {
        &self.result
    }

    pub fn into_result(self) -> SpMat<R> {
        self.result
    }

    pub fn row_ops(&self) -> &[ElimStep<R>] {
        &self.row_ops
    }

    pub fn col_ops(&self) -> &[ElimStep<R>] {
        &self.col_ops
    }

    fn replay<'a, I>(mut a: SpMat<R>, steps: I) -> SpMat<R>
    where I: IntoIterator<Item = &'a ElimStep<R>>, R: 'a {
        for s in steps {
            s.apply(&mut a);
        }
        a
    }

    fn replay_inv<'a, I>(mut a: SpMat<R>, steps: I) -> SpMat<R>
    where I: DoubleEndedIterator<Item = &'a ElimStep<R>>, R: 'a {
        for s in steps.rev() {
            s.inverse().apply(&mut a);
        }
        a
    }

    /// `P`, the product of the row operations.
    pub fn left(&self) -> &SpMat<R> {
        self.left.get_or_init(|| {
            trace!("compute left: {} steps.", self.row_ops.len());
            let m = self.result.nrows();
            Self::replay(SpMat::id(m), &self.row_ops)
        })
    }

    pub fn left_inv(&self) -> &SpMat<R> {
        self.left_inv.get_or_init(|| {
            trace!("compute left-inv: {} steps.", self.row_ops.len());
            let m = self.result.nrows();
            Self::replay_inv(SpMat::id(m), self.row_ops.iter())
        })
    }

    /// `P⁻¹[:, range]`, without computing the whole of `P⁻¹`.
    pub fn left_inv_cols(&self, range: Range<usize>) -> SpMat<R> {
        let m = self.result.nrows();
        let e = SpMat::id(m).submat_cols(range);
        Self::replay_inv(e, self.row_ops.iter())
    }

    /// `Q`, the product of the column operations.
    pub fn right(&self) -> &SpMat<R> {
        self.right.get_or_init(|| {
            trace!("compute right: {} steps.", self.col_ops.len());
            let n = self.result.ncols();
            Self::replay(SpMat::id(n), &self.col_ops)
        })
    }

    pub fn right_inv(&self) -> &SpMat<R> {
        self.right_inv.get_or_init(|| {
            trace!("compute right-inv: {} steps.", self.col_ops.len());
            let n = self.result.ncols();
            Self::replay_inv(SpMat::id(n), self.col_ops.iter())
        })
    }

    /// `Q⁻¹[range, :]`, without computing the whole of `Q⁻¹`.
    pub fn right_inv_rows(&self, range: Range<usize>) -> SpMat<R> {
        let n = self.result.ncols();
        let e = SpMat::id(n).submat_rows(range);
        Self::replay_inv(e, self.col_ops.iter())
    }

    pub fn rank(&self) -> usize {
        *self.rank.get_or_init(|| {
            use MatrixForm::*;
            let count = |align| self.result.lines(align).iter().filter(|l| !l.is_empty()).count();
            match self.form {
                RowEchelon | RowHermite => count(Align::Rows),
                ColEchelon | ColHermite => count(Align::Cols),
                Diagonal | Smith => self.result.diag().iter().filter(|a| !a.is_zero()).count()
            }
        })
    }

    pub fn nullity(&self) -> usize {
        self.result.ncols() - self.rank()
    }

    pub fn is_injective(&self) -> bool {
        self.rank() == self.result.ncols()
    }

    pub fn is_surjective(&self) -> bool {
        self.rank() == self.result.nrows()
    }

    pub fn is_bijective(&self) -> bool {
        self.is_injective() && self.is_surjective()
    }

    fn assert_diagonal(&self) {
        assert!(self.form.is_diagonal(), "form {} is not diagonal.", self.form);
    }

    /// `(M[0, 0], M[1, 1], ...)` of the resulting matrix.
    pub fn diagonal(&self) -> Vec<R> {
        self.assert_diagonal();
        self.result.diag()
    }

    /// `Z = Q[:, r..n]`. The columns span the kernel, and `A * Z = O`.
    pub fn kernel(&self) -> &SpMat<R> {
        self.assert_diagonal();
        self.kernel.get_or_init(|| {
            let (n, r) = (self.result.ncols(), self.rank());
            self.right().submat_cols(r..n)
        })
    }

    /// `T = Q⁻¹[r..n, :]`, satisfying `T * Z = I`.
    pub fn kernel_trans(&self) -> &SpMat<R> {
        self.assert_diagonal();
        self.kernel_trans.get_or_init(|| {
            let (n, r) = (self.result.ncols(), self.rank());
            self.right_inv_rows(r..n)
        })
    }

    /// `B = P⁻¹[:, 0..r] * diag(d_0, ..., d_{r-1})`. The columns span the image.
    pub fn image(&self) -> &SpMat<R> {
        self.assert_diagonal();
        self.image.get_or_init(|| {
            let r = self.rank();
            let d = self.result.submat(0..r, 0..r);
            self.left_inv_cols(0..r) * d
        })
    }

    /// `T = P[0..r, :]`, satisfying `T * B = diag(d)`.
    pub fn image_trans(&self) -> &SpMat<R> {
        self.assert_diagonal();
        self.image_trans.get_or_init(|| {
            let r = self.rank();
            self.left().submat_rows(0..r)
        })
    }

    // (det of the steps as a unit), with the sign from the number of swaps.
    fn steps_det(steps: &[ElimStep<R>]) -> R {
        let swaps = steps.iter().filter(|s| s.is_swap()).count();
        let sign = R::from_parity(swaps);
        steps.iter().filter(|s| !s.is_swap()).fold(sign, |res, s| res * s.det())
    }

    pub fn determinant(&self) -> &R {
        assert!(self.result.is_square(), "not square: {:?}", self.result.shape());

        self.determinant.get_or_init(|| {
            if self.rank() < self.result.ncols() {
                return R::zero()
            }

            let p = Self::steps_det(&self.row_ops);
            let q = Self::steps_det(&self.col_ops);
            let (Some(p_inv), Some(q_inv)) = (p.inv(), q.inv()) else {
                panic!("step determinants must be units: {p}, {q}.")
            };
            let d = self.result.diag().into_iter().fold(R::one(), |res, a| res * a);

            p_inv * q_inv * d
        })
    }

    /// `Q * D⁻¹ * P` if every diagonal entry is a unit.
    pub fn inverse(&self) -> Option<&SpMat<R>> {
        assert!(self.result.is_square(), "not square: {:?}", self.result.shape());
        self.assert_diagonal();

        self.inverse.get_or_init(|| {
            let n = self.result.nrows();
            let d_inv = self.result.diag().iter().map(|a| a.inv()).collect::<Option<Vec<_>>>()?;
            let d_inv = SpMat::from_entries((n, n), d_inv.into_iter().enumerate().map(|(i, a)| (i, i, a)));
            Some(self.right() * d_inv * self.left())
        }).as_ref()
    }
}
