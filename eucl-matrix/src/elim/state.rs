use log::trace;
use eucl::{EucRing, EucRingOps};
use crate::sparse::{SpMat, Align};
use crate::MatTrait;
use super::{ElimStep, Eliminator};

/// The matrix under elimination together with the steps applied so far.
#[derive(Clone, Debug)]
pub struct ElimState<R> {
    target: SpMat<R>,
    row_ops: Vec<ElimStep<R>>,
    col_ops: Vec<ElimStep<R>>,
}

impl<R> ElimState<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    /// Steps are traced only when both dimensions are at most this.
    pub const TRACE_THRESHOLD: usize = 20;

    pub fn new(target: SpMat<R>) -> Self {
        Self { target, row_ops: vec![], col_ops: vec![] }
    }

    pub fn target(&self) -> &SpMat<R> {
        &self.target
    }

    pub fn row_ops(&self) -> &[ElimStep<R>] {
        &self.row_ops
    }

    pub fn col_ops(&self) -> &[ElimStep<R>] {
        &self.col_ops
    }

    pub fn count_steps(&self) -> usize {
        self.row_ops.len() + self.col_ops.len()
    }

    pub fn into_parts(self) -> (SpMat<R>, Vec<ElimStep<R>>, Vec<ElimStep<R>>) {
        (self.target, self.row_ops, self.col_ops)
    }

    pub(crate) fn switch_alignment(&mut self, align: Align) {
        self.target.switch_alignment(align)
    }

    fn is_traced(&self) -> bool {
        let (m, n) = self.target.shape();
        m.max(n) <= Self::TRACE_THRESHOLD
    }

    pub fn apply(&mut self, step: ElimStep<R>) {
        step.apply(&mut self.target);

        if self.is_traced() {
            trace!("{step}\n{}", self.target);
        }

        if step.is_row_op() {
            self.row_ops.push(step)
        } else {
            self.col_ops.push(step)
        }
    }

    /// Runs `e` on the transposed target, so that row operations of `e`
    /// are recorded as column operations, and vice versa.
    pub fn run_transposed<E>(&mut self, e: E)
    where E: Eliminator<R> {
        let mut t = std::mem::take(&mut self.target);
        t.transpose_in_place();

        let mut sub = ElimState::new(t);
        e.run(&mut sub);

        let (mut t, row_ops, col_ops) = sub.into_parts();
        t.transpose_in_place();

        self.target = t;
        self.col_ops.extend(row_ops.into_iter().map(ElimStep::transpose));
        self.row_ops.extend(col_ops.into_iter().map(ElimStep::transpose));
    }
}
