use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, Range};
use std::fmt::Display;
use itertools::{Itertools, EitherOrBoth};
use auto_impl_ops::auto_ops;
use eucl::{Ring, RingOps};
use super::sp_mat::{SpMat, Align};
use crate::MatTrait;

/// A sparse vector: sorted `(index, value)` pairs with non-zero values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpVec<R> {
    dim: usize,
    entries: Vec<(usize, R)>
}

impl<R> SpVec<R> {
    pub fn zero(dim: usize) -> Self {
        Self { dim, entries: vec![] }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &R)> {
        self.entries.iter().map(|(i, a)| (*i, a))
    }

    pub fn entry(&self, i: usize) -> Option<&R> {
        assert!(i < self.dim);
        self.entries.binary_search_by_key(&i, |e| e.0).ok().map(|p| &self.entries[p].1)
    }

    pub(crate) fn entries(&self) -> &[(usize, R)] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<(usize, R)> {
        self.entries
    }
}

impl<R> SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn unit(dim: usize, i: usize) -> Self {
        assert!(i < dim);
        Self { dim, entries: vec![(i, R::one())] }
    }

    pub fn from_entries<T>(dim: usize, entries: T) -> Self
    where T: IntoIterator<Item = (usize, R)> {
        let mat = SpMat::from_entries((1, dim), entries.into_iter().map(|(i, a)| (0, i, a)));
        Self::from_sorted_entries(dim, mat.line(0).to_vec())
    }

    pub(crate) fn from_sorted_entries(dim: usize, entries: Vec<(usize, R)>) -> Self {
        debug_assert!(entries.iter().all(|(i, a)| *i < dim && !a.is_zero()));
        debug_assert!(entries.iter().tuple_windows().all(|(e1, e2)| e1.0 < e2.0));
        Self { dim, entries }
    }

    pub fn get(&self, i: usize) -> R {
        self.entry(i).cloned().unwrap_or_else(R::zero)
    }

    pub fn to_dense(&self) -> Vec<R> {
        let mut v = vec![R::zero(); self.dim];
        for (i, a) in self.iter() {
            v[i] = a.clone();
        }
        v
    }

    pub fn subvec(&self, range: Range<usize>) -> SpVec<R> {
        assert!(range.end <= self.dim);
        let entries = self.entries.iter().filter(|(i, _)| range.contains(i)).map(|(i, a)|
            (i - range.start, a.clone())
        ).collect();
        Self::from_sorted_entries(range.len(), entries)
    }

    pub fn stack(&self, other: &SpVec<R>) -> SpVec<R> {
        let n = self.dim;
        let entries = self.entries.iter().cloned().chain(
            other.entries.iter().map(|(i, a)| (i + n, a.clone()))
        ).collect();
        Self::from_sorted_entries(n + other.dim, entries)
    }

    pub fn scale(&self, r: &R) -> SpVec<R> {
        let entries = self.entries.iter().map(|(i, a)| (*i, a * r)).filter(|e| !e.1.is_zero()).collect();
        Self::from_sorted_entries(self.dim, entries)
    }

    pub fn into_mat(self) -> SpMat<R> {
        SpMat::from_col_vecs(self.dim, [self])
    }

    fn merge<F>(&self, rhs: &SpVec<R>, f: F) -> SpVec<R>
    where F: Fn(EitherOrBoth<&R, &R>) -> R {
        assert_eq!(self.dim, rhs.dim, "dimension mismatch");
        let entries = self.entries.iter().merge_join_by(rhs.entries.iter(), |e1, e2| e1.0.cmp(&e2.0)).map(|e|
            match e {
                EitherOrBoth::Left((i, a)) => (*i, f(EitherOrBoth::Left(a))),
                EitherOrBoth::Right((i, b)) => (*i, f(EitherOrBoth::Right(b))),
                EitherOrBoth::Both((i, a), (_, b)) => (*i, f(EitherOrBoth::Both(a, b)))
            }
        ).filter(|e| !e.1.is_zero()).collect();
        Self::from_sorted_entries(self.dim, entries)
    }
}

impl<R> From<Vec<R>> for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(vec: Vec<R>) -> Self {
        let dim = vec.len();
        let entries = vec.into_iter().enumerate().filter(|(_, a)| !a.is_zero()).collect();
        Self::from_sorted_entries(dim, entries)
    }
}

impl<R> From<SpVec<R>> for Vec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(vec: SpVec<R>) -> Self {
        vec.to_dense()
    }
}

impl<R> Default for SpVec<R> {
    fn default() -> Self {
        Self::zero(0)
    }
}

impl<R> Neg for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for e in self.entries.iter_mut() {
            e.1 = -&e.1;
        }
        self
    }
}

impl<R> Neg for &SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

#[auto_ops]
impl<'a, 'b, R> Add<&'b SpVec<R>> for &'a SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn add(self, rhs: &'b SpVec<R>) -> Self::Output {
        self.merge(rhs, |e| match e {
            EitherOrBoth::Left(a) => a.clone(),
            EitherOrBoth::Right(b) => b.clone(),
            EitherOrBoth::Both(a, b) => a + b
        })
    }
}

#[auto_ops]
impl<'a, 'b, R> Sub<&'b SpVec<R>> for &'a SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn sub(self, rhs: &'b SpVec<R>) -> Self::Output {
        self.merge(rhs, |e| match e {
            EitherOrBoth::Left(a) => a.clone(),
            EitherOrBoth::Right(b) => -b,
            EitherOrBoth::Both(a, b) => a - b
        })
    }
}

// SpMat * SpVec
#[auto_ops(val_val, val_ref, ref_val)]
impl<'a, 'b, R> Mul<&'b SpVec<R>> for &'a SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn mul(self, rhs: &'b SpVec<R>) -> Self::Output {
        assert_eq!(self.ncols(), rhs.dim(), "shape mismatch: {:?} * {}", self.shape(), rhs.dim());

        let rows = self.lines(Align::Rows);
        let entries = rows.iter().enumerate().filter_map(|(i, l)| {
            let c = l.iter().merge_join_by(rhs.entries().iter(), |e1, e2| e1.0.cmp(&e2.0)).fold(R::zero(), |mut c, e| {
                if let EitherOrBoth::Both((_, a), (_, b)) = e {
                    c += a * b;
                }
                c
            });
            (!c.is_zero()).then_some((i, c))
        }).collect();

        SpVec::from_sorted_entries(self.nrows(), entries)
    }
}

impl<R> Display for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.to_dense().iter().map(|a| a.to_string()).join(", ");
        write!(f, "[{s}]")
    }
}

#[cfg(feature = "serde")]
impl<R> serde::Serialize for SpVec<R>
where R: Ring + serde::Serialize, for<'x> &'x R: RingOps<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        serde::Serialize::serialize(&(self.dim, &self.entries), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R> serde::Deserialize<'de> for SpVec<R>
where R: Ring + serde::Deserialize<'de>, for<'x> &'x R: RingOps<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: serde::Deserializer<'de> {
        let (dim, entries) = <(usize, Vec<(usize, R)>) as serde::Deserialize>::deserialize(deserializer)?;
        if let Some((i, _)) = entries.iter().find(|(i, _)| *i >= dim) {
            return Err(serde::de::Error::custom(format!("index {i} out of range {dim}")))
        }
        Ok(Self::from_entries(dim, entries))
    }
}
