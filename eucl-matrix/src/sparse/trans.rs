use std::ops::Range;
use eucl::{RingOps, Ring};
use crate::sparse::{SpMat, MatTrait, SpVec};

/// A pair of matrices `(f: m × n, b: n × m)` carrying coordinates
/// between a root basis of dimension `n` and a target basis of dimension `m`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    f_mat: SpMat<R>,
    b_mat: SpMat<R>,
}

impl<R> Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn id(n: usize) -> Self {
        Self::new(SpMat::id(n), SpMat::id(n))
    }

    pub fn zero() -> Self {
        Self::id(0)
    }

    pub fn new(f: SpMat<R>, b: SpMat<R>) -> Self {
        assert_eq!(f.ncols(), b.nrows(), "shape mismatch: {:?}, {:?}", f.shape(), b.shape());
        assert_eq!(f.nrows(), b.ncols(), "shape mismatch: {:?}, {:?}", f.shape(), b.shape());
        Self { f_mat: f, b_mat: b }
    }

    pub fn src_dim(&self) -> usize {
        self.f_mat.ncols()
    }

    pub fn tgt_dim(&self) -> usize {
        self.f_mat.nrows()
    }

    pub fn is_id(&self) -> bool {
        self.f_mat.is_id() && self.b_mat.is_id()
    }

    pub fn forward(&self, v: &SpVec<R>) -> SpVec<R> {
        assert_eq!(v.dim(), self.src_dim());
        &self.f_mat * v
    }

    pub fn backward(&self, v: &SpVec<R>) -> SpVec<R> {
        assert_eq!(v.dim(), self.tgt_dim());
        &self.b_mat * v
    }

    pub fn forward_mat(&self) -> &SpMat<R> {
        &self.f_mat
    }

    pub fn backward_mat(&self) -> &SpMat<R> {
        &self.b_mat
    }

    pub fn into_mats(self) -> (SpMat<R>, SpMat<R>) {
        (self.f_mat, self.b_mat)
    }

    /// Composes with `other`, which must start where `self` ends.
    pub fn merged(&self, other: &Trans<R>) -> Self {
        assert_eq!(self.tgt_dim(), other.src_dim());
        Self::new(
            &other.f_mat * &self.f_mat,
            &self.b_mat * &other.b_mat
        )
    }

    pub fn merge(&mut self, other: Trans<R>) {
        *self = self.merged(&other);
    }

    /// Restricts the target basis to `range`.
    pub fn sub(&self, range: Range<usize>) -> Self {
        Self::new(
            self.f_mat.submat_rows(range.clone()),
            self.b_mat.submat_cols(range)
        )
    }

    /// Restricts the target basis to the indices in `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        let m = self.tgt_dim();
        let n = self.src_dim();
        let p = SpMat::from_entries((indices.len(), m), indices.iter().enumerate().map(|(k, &i)|
            (k, i, R::one())
        ));
        let f = &p * &self.f_mat;
        let b = &self.b_mat * p.transpose();
        debug_assert_eq!(f.shape(), (indices.len(), n));
        Self::new(f, b)
    }

    /// Stacks the targets of two transitions sharing the same root.
    pub fn stack(&self, other: &Trans<R>) -> Self {
        assert_eq!(self.src_dim(), other.src_dim());
        Self::new(
            self.f_mat.stack(&other.f_mat),
            self.b_mat.concat(&other.b_mat)
        )
    }

    /// Transition on the direct sum of the roots.
    pub fn block_diag(&self, other: &Trans<R>) -> Self {
        Self::new(
            self.f_mat.block_diag(&other.f_mat),
            self.b_mat.block_diag(&other.b_mat)
        )
    }
}

impl<R> Default for Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id() {
        let t = Trans::<i32>::id(5);

        let v = SpVec::from(vec![0, 1, 2, 3, 4]);
        let w = t.forward(&v);
        let x = t.backward(&v);

        assert!(t.is_id());
        assert_eq!(w, SpVec::from(vec![0, 1, 2, 3, 4]));
        assert_eq!(x, SpVec::from(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn trans() {
        let t = Trans::<i32>::new(
            SpMat::id(5).submat_rows(0..3),
            SpMat::id(5).submat_cols(0..3),
        );

        let v = SpVec::from(vec![0, 1, 2, 3, 4]);
        let w = t.forward(&v);
        let x = t.backward(&w);

        assert_eq!(t.src_dim(), 5);
        assert_eq!(t.tgt_dim(), 3);
        assert_eq!(w, SpVec::from(vec![0, 1, 2]));
        assert_eq!(x, SpVec::from(vec![0, 1, 2, 0, 0]));
    }

    #[test]
    #[should_panic]
    fn shape_mismatch() {
        let _ = Trans::<i32>::new(SpMat::id(3), SpMat::id(2));
    }

    #[test]
    fn merge() {
        let mut t = Trans::<i32>::new(
            SpMat::id(5).submat_rows(0..3),
            SpMat::id(5).submat_cols(0..3),
        );
        let p = SpMat::from_dense_data((3, 3), [0, 1, 0, 0, 0, 1, 1, 0, 0]);
        t.merge(Trans::new(p.clone(), p.transpose()));

        let v = SpVec::from(vec![0, 1, 2, 3, 4]);
        let w = t.forward(&v);
        let x = t.backward(&w);

        assert_eq!(w.to_dense(), vec![1, 2, 0]);
        assert_eq!(x.to_dense(), vec![0, 1, 2, 0, 0]);
        assert_eq!(t.forward_mat() * t.backward_mat(), SpMat::id(3));
    }

    #[test]
    fn sub_and_select() {
        let f = SpMat::from_dense_data((3, 3), [1, 1, 0, 0, 1, 0, 0, 0, 1]);
        let b = SpMat::from_dense_data((3, 3), [1, -1, 0, 0, 1, 0, 0, 0, 1]);
        let t = Trans::new(f, b);

        let s = t.sub(1..3);
        assert_eq!(s.tgt_dim(), 2);
        assert_eq!(s.forward(&SpVec::from(vec![1, 2, 3])).to_dense(), vec![2, 3]);

        let s = t.select(&[2, 0]);
        assert_eq!(s.forward(&SpVec::from(vec![1, 2, 3])).to_dense(), vec![3, 3]);
        assert_eq!(s.backward(&SpVec::from(vec![1, 0])).to_dense(), vec![0, 0, 1]);
    }

    #[test]
    fn stack_and_block_diag() {
        let t1 = Trans::<i32>::id(2).sub(0..1);
        let t2 = Trans::<i32>::id(2).sub(1..2);
        let t = t1.stack(&t2);
        assert!(t.is_id());

        let t = Trans::<i32>::id(2).block_diag(&Trans::id(1));
        assert!(t.is_id());
        assert_eq!(t.src_dim(), 3);
    }
}
