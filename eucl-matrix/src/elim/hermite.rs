use eucl::{EucRing, EucRingOps};
use crate::MatTrait;
use super::{Eliminator, ElimState, ElimStep, RowEchelon};

/// Row echelon form whose entries above each pivot are reduced modulo the pivot.
#[derive(Clone, Debug, Default)]
pub struct RowHermite {
    target_row: usize,
    target_col: usize,
    rank: usize,
}

impl<R> Eliminator<R> for RowHermite
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn prepare(&mut self, st: &mut ElimState<R>) {
        RowEchelon::default().run(st);
        self.rank = st.target().count_lines();
    }

    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        if self.target_row >= self.rank || self.target_col >= st.target().ncols() {
            return true
        }

        let a0 = st.target().get(self.target_row, self.target_col);
        if a0.is_zero() {
            self.target_col += 1;
            return false
        }

        for i in 0..self.target_row {
            let a = st.target().get(i, self.target_col);
            if a.is_zero() {
                continue
            }

            let (q, _) = a.div_rem(&a0);
            if !q.is_zero() {
                st.apply(ElimStep::AddRow { src: self.target_row, dst: i, r: -q });
            }
        }

        self.target_row += 1;
        self.target_col += 1;

        false
    }
}

/// Row Hermite form of the transpose.
#[derive(Clone, Debug, Default)]
pub struct ColHermite;

impl<R> Eliminator<R> for ColHermite
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        st.run_transposed(RowHermite::default());
        true
    }
}
