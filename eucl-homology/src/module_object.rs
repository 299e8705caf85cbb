use std::fmt::Display;
use std::ops::Add;
use delegate::delegate;
use itertools::Itertools;
use log::debug;
use num_traits::Zero;
use eucl::{EucRing, EucRingOps, Ring};
#[cfg(feature = "serde")]
use eucl::RingOps;
use eucl_matrix::{SpMat, SpVec, Trans, MatTrait, MatrixForm, eliminate};

use crate::{RModStr, Summand};

/// A finitely generated module `R^r ⊕ R/(d_0) ⊕ ... ⊕ R/(d_{t-1})`
/// realized inside a free root module `R^n`.
///
/// Torsion summands come first, free summands last. The transition
/// `trans` maps root coordinates to summand coordinates (`forward`) and
/// back (`backward`, whose columns are the generators).
#[derive(Clone, Debug)]
pub struct ModuleObject<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    summands: Vec<Summand<R>>,
    rank: usize,
    tors: Vec<R>,
    trans: Trans<R>,
}

impl<R> ModuleObject<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    //         A           T
    //  R^k ------> R^n ------> R^k,  T * A = I
    //   ^
    //   | B
    //  R^l
    //
    //  P * B * Q = D  =>  M ≅ ⊕_i R/(d_i),
    //  generated by the columns of A * P⁻¹, with coordinates P * T.
    //  Only the slots with non-unit d_i survive.

    /// The module generated by the columns of `a` (`n × k`) subject to the
    /// relations `b` (`k × l`), where `t` (`k × n`) satisfies `t * a = I`.
    pub fn new(a: SpMat<R>, t: SpMat<R>, b: SpMat<R>) -> Self {
        let (n, k) = a.shape();

        assert_eq!(t.shape(), (k, n), "shape mismatch: a = {:?}, t = {:?}", a.shape(), t.shape());
        assert_eq!(b.nrows(), k, "shape mismatch: a = {:?}, b = {:?}", a.shape(), b.shape());

        debug!("decompose: root = {n}, gens = {k}, rels = {}.", b.ncols());

        let e = eliminate(b, MatrixForm::Smith);

        let mut d = e.diagonal();
        d.resize(k, R::zero());

        let s = d.iter().filter(|x| !x.is_unit()).count();
        let r0 = k - s;

        let a2 = &a * e.left_inv_cols(r0..k);
        let t2 = e.left().submat_rows(r0..k) * &t;
        let divisors = d.split_off(r0);

        let res = Self::from_parts(divisors, Trans::new(t2, a2));

        debug!("decomposed: {}.", res.math_symbol());

        res
    }

    /// The cokernel of `b`, with the standard basis as root.
    pub fn presented(b: SpMat<R>) -> Self {
        let k = b.nrows();
        Self::new(SpMat::id(k), SpMat::id(k), b)
    }

    /// The module generated by `gens` inside `R^n`, subject to the relations `b`.
    /// Panics unless the generators extend to a basis of `R^n`.
    pub fn from_generators(n: usize, gens: Vec<SpVec<R>>, b: SpMat<R>) -> Self {
        let k = gens.len();
        assert!(k <= n, "too many generators: {k} > {n}");

        let a = SpMat::from_col_vecs(n, gens);
        let e = eliminate(a.clone(), MatrixForm::RowHermite);

        assert!(e.result().submat_rows(0..k).is_id(), "generators do not extend to a basis.");

        let t = e.left().submat_rows(0..k);
        Self::new(a, t, b)
    }

    pub fn free(n: usize) -> Self {
        Self::presented(SpMat::zero((n, 0)))
    }

    pub fn zero(n: usize) -> Self {
        let trans = Trans::new(SpMat::zero((0, n)), SpMat::zero((n, 0)));
        Self::from_parts(vec![], trans)
    }

    /// `R/(d_0) ⊕ ... ⊕ R/(d_{t-1}) ⊕ R^rank` on its own standard basis.
    pub fn new_abstract(rank: usize, tors: Vec<R>) -> Self {
        assert!(tors.iter().all(|d| !d.is_zero()), "zero torsion divisor.");
        let n = tors.len() + rank;
        let divisors = tors.into_iter().chain(
            std::iter::repeat_with(R::zero).take(rank)
        ).collect();
        Self::from_parts(divisors, Trans::id(n))
    }

    fn from_parts(divisors: Vec<R>, trans: Trans<R>) -> Self {
        assert_eq!(divisors.len(), trans.tgt_dim());
        debug_assert!(
            divisors.iter().skip_while(|d| !d.is_zero()).all(|d| d.is_zero()),
            "torsion summands must come first."
        );

        let b = trans.backward_mat();
        let summands = divisors.iter().enumerate().map(|(i, d)|
            Summand::new(d.clone(), b.col_vec(i))
        ).collect();

        let rank = divisors.iter().filter(|d| d.is_zero()).count();
        let tors = divisors.into_iter().filter(|d| !d.is_zero()).collect();

        Self { summands, rank, tors, trans }
    }

    // moves torsion summands to the front, keeping the relative order.
    fn reordered(divisors: Vec<R>, trans: Trans<R>) -> Self {
        let order = (0..divisors.len()).sorted_by_key(|&i| divisors[i].is_zero()).collect_vec();
        let divisors = order.iter().map(|&i| divisors[i].clone()).collect();
        let trans = trans.select(&order);
        Self::from_parts(divisors, trans)
    }

    fn divisors(&self) -> Vec<R> {
        self.summands.iter().map(|s| s.divisor().clone()).collect()
    }

    delegate! { to self.trans {
        #[call(src_dim)]
        pub fn root_dim(&self) -> usize;
    }}

    pub fn summands(&self) -> &[Summand<R>] {
        &self.summands
    }

    pub fn summand(&self, i: usize) -> &Summand<R> {
        &self.summands[i]
    }

    pub fn trans(&self) -> &Trans<R> {
        &self.trans
    }

    /// The `i`-th generator in root coordinates.
    pub fn gen_vec(&self, i: usize) -> &SpVec<R> {
        assert!(i < self.dim());
        self.summands[i].gen()
    }

    /// Coordinates of `z` with respect to the summands.
    /// Torsion coordinates are reduced modulo their divisors.
    pub fn factorize(&self, z: &SpVec<R>) -> SpVec<R> {
        assert_eq!(z.dim(), self.root_dim());

        let v = self.trans.forward(z);
        let t = self.tors.len();

        let entries = v.iter().map(|(i, a)|
            if i < t {
                (i, a.div_rem(&self.tors[i]).1)
            } else {
                (i, a.clone())
            }
        ).collect_vec();

        SpVec::from_entries(v.dim(), entries)
    }

    pub fn is_zero_elem(&self, z: &SpVec<R>) -> bool {
        self.factorize(z).is_zero()
    }

    pub fn elems_eq(&self, z: &SpVec<R>, w: &SpVec<R>) -> bool {
        self.is_zero_elem(&(z - w))
    }

    pub fn sub_summands(&self, indices: &[usize]) -> Self {
        assert!(indices.iter().all(|&i| i < self.dim()));
        let divisors = indices.iter().map(|&i| self.summands[i].divisor().clone()).collect();
        let trans = self.trans.select(indices);
        Self::reordered(divisors, trans)
    }

    pub fn free_part(&self) -> Self {
        let t = self.tors.len();
        self.sub_summands(&(t..self.dim()).collect_vec())
    }

    pub fn torsion_part(&self) -> Self {
        let t = self.tors.len();
        self.sub_summands(&(0..t).collect_vec())
    }

    /// Joins the summands of two modules over the same root.
    pub fn merge(&self, other: &Self) -> Self {
        assert_eq!(self.root_dim(), other.root_dim());
        let divisors = [self.divisors(), other.divisors()].concat();
        let trans = self.trans.stack(&other.trans);
        Self::reordered(divisors, trans)
    }

    /// The direct sum, over the direct sum of the roots.
    pub fn direct_sum(&self, other: &Self) -> Self {
        let divisors = [self.divisors(), other.divisors()].concat();
        let trans = self.trans.block_diag(&other.trans);
        Self::reordered(divisors, trans)
    }
}

impl<R> RModStr for ModuleObject<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    type R = R;

    fn rank(&self) -> usize {
        self.rank
    }

    fn tors(&self) -> &[R] {
        &self.tors
    }
}

impl<R> Display for ModuleObject<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.math_symbol())
    }
}

impl<'a, 'b, R> Add<&'b ModuleObject<R>> for &'a ModuleObject<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    type Output = ModuleObject<R>;

    fn add(self, other: &'b ModuleObject<R>) -> Self::Output {
        self.direct_sum(other)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "R: Ring + serde::Serialize, for<'x> &'x R: RingOps<R>",
    deserialize = "R: Ring + serde::Deserialize<'de>, for<'x> &'x R: RingOps<R>"
))]
struct ModuleObjectData<R> {
    divisors: Vec<R>,
    forward: SpMat<R>,
    backward: SpMat<R>,
}

#[cfg(feature = "serde")]
impl<R> serde::Serialize for ModuleObject<R>
where R: EucRing + serde::Serialize, for<'x> &'x R: EucRingOps<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        let data = ModuleObjectData {
            divisors: self.divisors(),
            forward: self.trans.forward_mat().clone(),
            backward: self.trans.backward_mat().clone(),
        };
        serde::Serialize::serialize(&data, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R> serde::Deserialize<'de> for ModuleObject<R>
where R: EucRing + serde::Deserialize<'de>, for<'x> &'x R: EucRingOps<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: serde::Deserializer<'de> {
        use serde::de::Error;

        let data = <ModuleObjectData<R> as serde::Deserialize>::deserialize(deserializer)?;
        let (f, b) = (data.forward, data.backward);
        let k = data.divisors.len();

        if f.nrows() != k || b.shape() != (f.ncols(), k) {
            return Err(D::Error::custom(format!(
                "shape mismatch: divisors = {k}, forward = {:?}, backward = {:?}", f.shape(), b.shape()
            )))
        }
        if data.divisors.iter().any(|d| d.is_unit()) {
            return Err(D::Error::custom("unit divisor"))
        }
        if !data.divisors.iter().skip_while(|d| !d.is_zero()).all(|d| d.is_zero()) {
            return Err(D::Error::custom("torsion summands must come first"))
        }

        Ok(Self::from_parts(data.divisors, Trans::new(f, b)))
    }
}
