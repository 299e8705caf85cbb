use std::borrow::Cow;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign, Range};
use std::fmt::{Display, Debug};
use ahash::AHashMap;
use itertools::{Itertools, EitherOrBoth};
use auto_impl_ops::auto_ops;
use eucl::{Ring, RingOps};
use super::sp_vec::SpVec;
use crate::MatTrait;

// Which index is primary in the table:
// `Rows` stores one line per row (entries keyed by column), `Cols` the transpose.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Rows,
    Cols
}

impl Align {
    pub fn flip(self) -> Self {
        match self {
            Align::Rows => Align::Cols,
            Align::Cols => Align::Rows
        }
    }
}

pub(crate) type Line<R> = Vec<(usize, R)>;

/// A sparse matrix over `R`, stored as a table of lines.
///
/// Each line lists `(secondary index, value)` with strictly increasing
/// indices and non-zero values. Absent entries are zero.
#[derive(Clone)]
pub struct SpMat<R> {
    shape: (usize, usize),
    align: Align,
    table: Vec<Line<R>>
}

impl<R> MatTrait for SpMat<R> {
    fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

impl<R> SpMat<R> {
    pub fn zero(shape: (usize, usize)) -> Self {
        let table = (0..shape.0).map(|_| vec![]).collect();
        Self { shape, align: Align::Rows, table }
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn nnz(&self) -> usize {
        self.table.iter().map(|l| l.len()).sum()
    }

    pub fn density(&self) -> f64 {
        let (m, n) = self.shape;
        if m * n > 0 {
            self.nnz() as f64 / (m * n) as f64
        } else {
            0.0
        }
    }

    pub fn is_zero(&self) -> bool {
        self.table.iter().all(|l| l.is_empty())
    }

    pub fn is_diag(&self) -> bool {
        self.table.iter().enumerate().all(|(k, l)|
            l.iter().all(|(s, _)| *s == k)
        )
    }

    // (primary count, secondary count) in the current alignment.
    fn dims(&self) -> (usize, usize) {
        match self.align {
            Align::Rows => self.shape,
            Align::Cols => (self.shape.1, self.shape.0)
        }
    }

    fn pos(&self, k: usize, s: usize) -> (usize, usize) {
        match self.align {
            Align::Rows => (k, s),
            Align::Cols => (s, k)
        }
    }

    pub(crate) fn line(&self, k: usize) -> &[(usize, R)] {
        &self.table[k]
    }

    // number of non-empty lines in the current alignment.
    pub(crate) fn count_lines(&self) -> usize {
        self.table.iter().filter(|l| !l.is_empty()).count()
    }

    /// Iterates non-zero entries as `(i, j, a)`, ordered by the current alignment.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        self.table.iter().enumerate().flat_map(move |(k, l)|
            l.iter().map(move |(s, a)| {
                let (i, j) = self.pos(k, *s);
                (i, j, a)
            })
        )
    }

    pub fn entry(&self, i: usize, j: usize) -> Option<&R> {
        assert!(i < self.shape.0 && j < self.shape.1, "index ({i}, {j}) out of range {:?}", self.shape);
        let (k, s) = self.pos(i, j);
        let l = &self.table[k];
        l.binary_search_by_key(&s, |e| e.0).ok().map(|p| &l[p].1)
    }

    /// O(1): the table is reinterpreted under the flipped alignment.
    pub fn transpose_in_place(&mut self) {
        self.align = self.align.flip();
        self.shape = (self.shape.1, self.shape.0);
    }

    /// O(nnz): rebuilds the table with the other index primary.
    pub fn switch_alignment(&mut self, align: Align) {
        if self.align == align {
            return
        }

        let (_, n) = self.dims();
        let table = std::mem::take(&mut self.table);

        self.table = reindex(table.into_iter().map(|l| l.into_iter()), n);
        self.align = align;
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        assert!(i < self.shape.0 && j < self.shape.0);
        self.switch_alignment(Align::Rows);
        self.table.swap(i, j);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.transpose_in_place();
        self.swap_rows(i, j);
        self.transpose_in_place();
    }

    #[cfg(debug_assertions)]
    fn check_invariant(&self) -> bool
    where R: num_traits::Zero {
        let (m, n) = self.dims();
        self.table.len() == m && self.table.iter().all(|l|
            l.iter().all(|(s, a)| *s < n && !a.is_zero()) &&
            l.iter().tuple_windows().all(|(e1, e2)| e1.0 < e2.0)
        )
    }
}

fn reindex<R, I, L>(table: I, len: usize) -> Vec<Line<R>>
where I: Iterator<Item = L>, L: Iterator<Item = (usize, R)> {
    let mut res: Vec<Line<R>> = (0..len).map(|_| vec![]).collect();
    for (k, l) in table.enumerate() {
        for (s, a) in l {
            res[s].push((k, a));
        }
    }
    res
}

// dst + r * src, merged by index. Entries that cancel are dropped.
fn merge_lines<R>(dst: Line<R>, src: &[(usize, R)], r: &R) -> Line<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    dst.into_iter().merge_join_by(src.iter(), |e1, e2| e1.0.cmp(&e2.0)).filter_map(|e|
        match e {
            EitherOrBoth::Left(e) => Some(e),
            EitherOrBoth::Right((s, b)) => {
                let c = r * b;
                (!c.is_zero()).then_some((*s, c))
            },
            EitherOrBoth::Both((s, a), (_, b)) => {
                let c = a + r * b;
                (!c.is_zero()).then_some((s, c))
            }
        }
    ).collect()
}

impl<R> SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub(crate) fn new_raw(shape: (usize, usize), align: Align, table: Vec<Line<R>>) -> Self {
        let a = Self { shape, align, table };
        #[cfg(debug_assertions)]
        debug_assert!(a.check_invariant(), "broken invariant: {a:?}");
        a
    }

    pub fn id(n: usize) -> Self {
        let table = (0..n).map(|i| vec![(i, R::one())]).collect();
        Self::new_raw((n, n), Align::Rows, table)
    }

    pub fn is_id(&self) -> bool {
        self.is_square() &&
        self.table.iter().enumerate().all(|(k, l)|
            l.len() == 1 && l[0].0 == k && l[0].1.is_one()
        )
    }

    /// Builds a matrix from `(i, j, a)`. Duplicates are summed and zeros dropped.
    pub fn from_entries<T>(shape: (usize, usize), entries: T) -> Self
    where T: IntoIterator<Item = (usize, usize, R)> {
        let (m, n) = shape;
        let mut table: Vec<Line<R>> = (0..m).map(|_| vec![]).collect();

        for (i, j, a) in entries {
            assert!(i < m && j < n, "index ({i}, {j}) out of range {shape:?}");
            if !a.is_zero() {
                table[i].push((j, a));
            }
        }

        for l in table.iter_mut() {
            l.sort_by_key(|e| e.0);
            *l = std::mem::take(l).into_iter().coalesce(|(j1, a1), (j2, a2)|
                if j1 == j2 {
                    Ok((j1, a1 + a2))
                } else {
                    Err(((j1, a1), (j2, a2)))
                }
            ).filter(|e| !e.1.is_zero()).collect();
        }

        Self::new_raw(shape, Align::Rows, table)
    }

    /// Row-major dense data.
    pub fn from_dense_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> {
        let n = shape.1;
        let entries = data.into_iter().enumerate().map(|(k, a)| (k / n.max(1), k % n.max(1), a));
        Self::from_entries(shape, entries)
    }

    pub fn from_col_vecs<I>(nrows: usize, vecs: I) -> Self
    where I: IntoIterator<Item = SpVec<R>> {
        let table = vecs.into_iter().map(|v| {
            assert_eq!(v.dim(), nrows);
            v.into_entries()
        }).collect_vec();
        let shape = (nrows, table.len());
        Self::new_raw(shape, Align::Cols, table)
    }

    pub fn get(&self, i: usize, j: usize) -> R {
        self.entry(i, j).cloned().unwrap_or_else(R::zero)
    }

    /// Writes `a` at `(i, j)`; a zero removes the entry.
    pub fn set(&mut self, i: usize, j: usize, a: R) {
        assert!(i < self.shape.0 && j < self.shape.1, "index ({i}, {j}) out of range {:?}", self.shape);
        let (k, s) = self.pos(i, j);
        let l = &mut self.table[k];

        match (l.binary_search_by_key(&s, |e| e.0), a.is_zero()) {
            (Ok(p), true)  => { l.remove(p); },
            (Ok(p), false) => { l[p].1 = a },
            (Err(p), false) => { l.insert(p, (s, a)) },
            (Err(_), true)  => {}
        }
    }

    pub fn transpose(&self) -> Self {
        let mut t = self.clone();
        t.transpose_in_place();
        t
    }

    // lines in the requested alignment, borrowed when no reindex is needed.
    pub(crate) fn lines(&self, align: Align) -> Cow<'_, [Line<R>]> {
        if self.align == align {
            Cow::Borrowed(&self.table)
        } else {
            let (_, n) = self.dims();
            let table = reindex(self.table.iter().map(|l| l.iter().cloned()), n);
            Cow::Owned(table)
        }
    }

    pub fn row_vec(&self, i: usize) -> SpVec<R> {
        assert!(i < self.shape.0);
        let entries = match self.align {
            Align::Rows => self.table[i].clone(),
            Align::Cols => self.table.iter().enumerate().filter_map(|(j, l)|
                l.binary_search_by_key(&i, |e| e.0).ok().map(|p| (j, l[p].1.clone()))
            ).collect()
        };
        SpVec::from_sorted_entries(self.shape.1, entries)
    }

    pub fn col_vec(&self, j: usize) -> SpVec<R> {
        assert!(j < self.shape.1);
        let entries = match self.align {
            Align::Cols => self.table[j].clone(),
            Align::Rows => self.table.iter().enumerate().filter_map(|(i, l)|
                l.binary_search_by_key(&j, |e| e.0).ok().map(|p| (i, l[p].1.clone()))
            ).collect()
        };
        SpVec::from_sorted_entries(self.shape.0, entries)
    }

    /// `(M[0, 0], M[1, 1], ...)` up to `min(rows, cols)`.
    pub fn diag(&self) -> Vec<R> {
        let (m, n) = self.shape;
        (0..m.min(n)).map(|i| self.get(i, i)).collect()
    }

    pub fn mul_row(&mut self, i: usize, r: &R) {
        assert!(i < self.shape.0);
        self.switch_alignment(Align::Rows);

        let l = &mut self.table[i];
        for e in l.iter_mut() {
            e.1 = &e.1 * r;
        }
        l.retain(|e| !e.1.is_zero());
    }

    /// Row `dst` += `r` * row `src`.
    pub fn add_row(&mut self, src: usize, dst: usize, r: &R) {
        assert!(src < self.shape.0 && dst < self.shape.0);
        assert_ne!(src, dst);
        self.switch_alignment(Align::Rows);

        let l = std::mem::take(&mut self.table[dst]);
        self.table[dst] = merge_lines(l, &self.table[src], r);
    }

    pub fn mul_col(&mut self, j: usize, r: &R) {
        self.transpose_in_place();
        self.mul_row(j, r);
        self.transpose_in_place();
    }

    /// Col `dst` += `r` * col `src`.
    pub fn add_col(&mut self, src: usize, dst: usize, r: &R) {
        self.transpose_in_place();
        self.add_row(src, dst, r);
        self.transpose_in_place();
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let (m, n) = self.shape;
        assert!(rows.end <= m && cols.end <= n, "range {rows:?} x {cols:?} out of {:?}", self.shape);
        self.submat_by(|i| rows.contains(&i), |j| cols.contains(&j))
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> Self {
        self.submat(rows, 0..self.ncols())
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> Self {
        self.submat(0..self.nrows(), cols)
    }

    /// Keeps the rows and columns satisfying the predicates, compacted in order.
    pub fn submat_by<P, Q>(&self, row_pred: P, col_pred: Q) -> Self
    where P: Fn(usize) -> bool, Q: Fn(usize) -> bool {
        fn index_map<F>(n: usize, f: F) -> (Vec<Option<usize>>, usize)
        where F: Fn(usize) -> bool {
            let mut c = 0;
            let map = (0..n).map(|i|
                if f(i) { c += 1; Some(c - 1) } else { None }
            ).collect();
            (map, c)
        }

        let (m, n) = self.shape;
        let (rmap, m1) = index_map(m, row_pred);
        let (cmap, n1) = index_map(n, col_pred);

        let (pmap, smap, len) = match self.align {
            Align::Rows => (&rmap, &cmap, m1),
            Align::Cols => (&cmap, &rmap, n1)
        };

        let mut table: Vec<Line<R>> = (0..len).map(|_| vec![]).collect();

        for (k, l) in self.table.iter().enumerate() {
            let Some(k1) = pmap[k] else { continue };
            table[k1] = l.iter().filter_map(|(s, a)|
                smap[*s].map(|s1| (s1, a.clone()))
            ).collect();
        }

        Self::new_raw((m1, n1), self.align, table)
    }

    pub fn combine_blocks(blocks: [&SpMat<R>; 4]) -> SpMat<R> {
        let [a, b, c, d] = blocks;

        assert_eq!(a.nrows(), b.nrows());
        assert_eq!(c.nrows(), d.nrows());
        assert_eq!(a.ncols(), c.ncols());
        assert_eq!(b.ncols(), d.ncols());

        let (m, n) = (a.nrows(), a.ncols());
        let shape = (m + c.nrows(), n + b.ncols());

        let entries = a.iter().map(|(i, j, x)| (i, j, x.clone())).chain(
            b.iter().map(|(i, j, x)| (i, j + n, x.clone()))
        ).chain(
            c.iter().map(|(i, j, x)| (i + m, j, x.clone()))
        ).chain(
            d.iter().map(|(i, j, x)| (i + m, j + n, x.clone()))
        );

        Self::from_entries(shape, entries)
    }

    pub fn concat(&self, b: &Self) -> Self {
        let (m, l, n) = (self.nrows(), self.ncols(), b.ncols());
        let c = Self::zero((0, l));
        let d = Self::zero((0, n));
        assert_eq!(m, b.nrows());
        Self::combine_blocks([self, b, &c, &d])
    }

    pub fn stack(&self, b: &Self) -> Self {
        let (m, l, n) = (self.nrows(), b.nrows(), self.ncols());
        let c = Self::zero((m, 0));
        let d = Self::zero((l, 0));
        assert_eq!(n, b.ncols());
        Self::combine_blocks([self, &c, b, &d])
    }

    pub fn block_diag(&self, b: &Self) -> Self {
        let c = Self::zero((self.nrows(), b.ncols()));
        let d = Self::zero((b.nrows(), self.ncols()));
        Self::combine_blocks([self, &c, &d, b])
    }

    pub fn scale(&self, r: &R) -> Self {
        let table = self.table.iter().map(|l|
            l.iter().map(|(s, a)| (*s, a * r)).filter(|e| !e.1.is_zero()).collect()
        ).collect();
        Self::new_raw(self.shape, self.align, table)
    }

    pub fn map<R2, F>(&self, f: F) -> SpMat<R2>
    where R2: Ring, for<'x> &'x R2: RingOps<R2>, F: Fn(&R) -> R2 {
        let table = self.table.iter().map(|l|
            l.iter().map(|(s, a)| (*s, f(a))).filter(|e| !e.1.is_zero()).collect()
        ).collect();
        SpMat::new_raw(self.shape, self.align, table)
    }

    // self + r * b
    fn add_scaled(&self, b: &Self, r: &R) -> Self {
        assert_eq!(self.shape, b.shape, "shape mismatch");

        let lines = b.lines(self.align);
        let table = self.table.iter().zip(lines.iter()).map(|(l1, l2)|
            merge_lines(l1.clone(), l2, r)
        ).collect();

        Self::new_raw(self.shape, self.align, table)
    }
}

impl<R> Default for SpMat<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> PartialEq for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape &&
        self.table[..] == other.lines(self.align)[..]
    }
}

impl<R> Eq for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<R> Neg for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for l in self.table.iter_mut() {
            for e in l.iter_mut() {
                e.1 = -&e.1;
            }
        }
        self
    }
}

impl<R> Neg for &SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

#[auto_ops]
impl<'a, 'b, R> Add<&'b SpMat<R>> for &'a SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn add(self, rhs: &'b SpMat<R>) -> Self::Output {
        self.add_scaled(rhs, &R::one())
    }
}

#[auto_ops]
impl<'a, 'b, R> Sub<&'b SpMat<R>> for &'a SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn sub(self, rhs: &'b SpMat<R>) -> Self::Output {
        self.add_scaled(rhs, &-R::one())
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b SpMat<R>> for &'a SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn mul(self, rhs: &'b SpMat<R>) -> Self::Output {
        assert_eq!(self.ncols(), rhs.nrows(), "shape mismatch: {:?} * {:?}", self.shape, rhs.shape);

        let (m, n) = (self.nrows(), rhs.ncols());
        let lhs = self.lines(Align::Rows);
        let rhs = rhs.lines(Align::Rows);

        let table = lhs.iter().map(|l| {
            let mut acc: AHashMap<usize, R> = AHashMap::new();
            for (k, a) in l.iter() {
                for (j, b) in rhs[*k].iter() {
                    let c = a * b;
                    acc.entry(*j).and_modify(|x| *x += &c).or_insert(c);
                }
            }
            acc.into_iter()
                .filter(|e| !e.1.is_zero())
                .sorted_by_key(|e| e.0)
                .collect()
        }).collect();

        SpMat::new_raw((m, n), Align::Rows, table)
    }
}

impl<R> Display for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use eucl::util::format::table;
        let (m, n) = self.shape;
        if self.is_empty() {
            return write!(f, "[{m} × {n}]")
        }
        let s = table("", 0..m, 0..n, |&i, &j| self.get(i, j));
        f.write_str(&s)
    }
}

impl<R> Debug for SpMat<R>
where R: Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.table.iter().enumerate().flat_map(|(k, l)|
            l.iter().map(move |(s, a)| {
                let (i, j) = match self.align {
                    Align::Rows => (k, *s),
                    Align::Cols => (*s, k)
                };
                (i, j, a)
            })
        ).collect_vec();

        f.debug_struct("SpMat")
            .field("shape", &self.shape)
            .field("align", &self.align)
            .field("entries", &entries)
            .finish()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SpMatData<R> {
    shape: (usize, usize),
    entries: Vec<(usize, usize, R)>
}

#[cfg(feature = "serde")]
impl<R> serde::Serialize for SpMat<R>
where R: Ring + serde::Serialize, for<'x> &'x R: RingOps<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        let mut entries = self.iter().map(|(i, j, a)| (i, j, a.clone())).collect_vec();
        entries.sort_by_key(|e| (e.0, e.1));
        let data = SpMatData { shape: self.shape, entries };
        serde::Serialize::serialize(&data, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R> serde::Deserialize<'de> for SpMat<R>
where R: Ring + serde::Deserialize<'de>, for<'x> &'x R: RingOps<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: serde::Deserializer<'de> {
        let data = <SpMatData<R> as serde::Deserialize>::deserialize(deserializer)?;
        let (m, n) = data.shape;
        if let Some((i, j, _)) = data.entries.iter().find(|(i, j, _)| *i >= m || *j >= n) {
            return Err(serde::de::Error::custom(format!("index ({i}, {j}) out of range {:?}", data.shape)))
        }
        Ok(Self::from_entries(data.shape, data.entries))
    }
}

#[cfg(test)]
impl<R> SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    // entries drawn from -range..=range with probability `density`.
    pub(crate) fn rand(shape: (usize, usize), density: f64, range: i32, seed: u64) -> Self {
        use cartesian::cartesian;
        use rand::{Rng, SeedableRng};
        use rand::rngs::StdRng;

        let (m, n) = shape;
        let mut rng = StdRng::seed_from_u64(seed);

        let entries = cartesian!(0..m, 0..n).filter_map(|(i, j)|
            if rng.gen::<f64>() < density {
                let a = rng.gen_range(-range..=range);
                Some((i, j, R::from(a)))
            } else {
                None
            }
        ).collect_vec();

        Self::from_entries(shape, entries)
    }
}
