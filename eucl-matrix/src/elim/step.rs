use std::fmt::Display;
use eucl::{Ring, RingOps};
use crate::sparse::SpMat;

/// An elementary row or column operation.
///
/// `AddRow { src, dst, r }` adds `r` times row `src` to row `dst`,
/// `AddCol` does the same on columns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElimStep<R> {
    AddRow { src: usize, dst: usize, r: R },
    MulRow { i: usize, r: R },
    SwapRows(usize, usize),
    AddCol { src: usize, dst: usize, r: R },
    MulCol { j: usize, r: R },
    SwapCols(usize, usize),
}

use ElimStep::*;

impl<R> ElimStep<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn is_row_op(&self) -> bool {
        matches!(self, AddRow { .. } | MulRow { .. } | SwapRows(..))
    }

    pub fn is_col_op(&self) -> bool {
        !self.is_row_op()
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, SwapRows(..) | SwapCols(..))
    }

    pub fn apply(&self, a: &mut SpMat<R>) {
        match self {
            AddRow { src, dst, r } => a.add_row(*src, *dst, r),
            MulRow { i, r }        => a.mul_row(*i, r),
            SwapRows(i, j)         => a.swap_rows(*i, *j),
            AddCol { src, dst, r } => a.add_col(*src, *dst, r),
            MulCol { j, r }        => a.mul_col(*j, r),
            SwapCols(i, j)         => a.swap_cols(*i, *j),
        }
    }

    /// Panics if a `Mul*` step has a non-invertible factor.
    pub fn inverse(&self) -> Self {
        let inv = |r: &R| {
            let Some(r_inv) = r.inv() else {
                panic!("{r} is not invertible.")
            };
            r_inv
        };

        match self {
            AddRow { src, dst, r } => AddRow { src: *src, dst: *dst, r: -r },
            MulRow { i, r }        => MulRow { i: *i, r: inv(r) },
            SwapRows(i, j)         => SwapRows(*i, *j),
            AddCol { src, dst, r } => AddCol { src: *src, dst: *dst, r: -r },
            MulCol { j, r }        => MulCol { j: *j, r: inv(r) },
            SwapCols(i, j)         => SwapCols(*i, *j),
        }
    }

    pub fn det(&self) -> R {
        match self {
            AddRow { .. } | AddCol { .. }     => R::one(),
            MulRow { r, .. } | MulCol { r, .. } => r.clone(),
            SwapRows(..) | SwapCols(..)       => -R::one(),
        }
    }

    /// The same operation acting on the transposed matrix.
    pub fn transpose(self) -> Self {
        match self {
            AddRow { src, dst, r } => AddCol { src, dst, r },
            MulRow { i, r }        => MulCol { j: i, r },
            SwapRows(i, j)         => SwapCols(i, j),
            AddCol { src, dst, r } => AddRow { src, dst, r },
            MulCol { j, r }        => MulRow { i: j, r },
            SwapCols(i, j)         => SwapRows(i, j),
        }
    }
}

impl<R> Display for ElimStep<R>
where R: Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddRow { src, dst, r } => write!(f, "add-row: {src} -> {dst} by {r}"),
            MulRow { i, r }        => write!(f, "mul-row: {i} by {r}"),
            SwapRows(i, j)         => write!(f, "swap-rows: ({i}, {j})"),
            AddCol { src, dst, r } => write!(f, "add-col: {src} -> {dst} by {r}"),
            MulCol { j, r }        => write!(f, "mul-col: {j} by {r}"),
            SwapCols(i, j)         => write!(f, "swap-cols: ({i}, {j})"),
        }
    }
}
