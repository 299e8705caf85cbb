use std::cmp::Ordering;
use eucl::{EucRing, EucRingOps};
use crate::sparse::Align;
use crate::MatTrait;
use super::{Eliminator, ElimState, ElimStep};

/// Row echelon form: the leading entries of the non-empty rows move
/// strictly right going down, are normalized, and clear everything below.
#[derive(Clone, Debug, Default)]
pub struct RowEchelon {
    target_row: usize,
    target_col: usize,
}

impl RowEchelon {
    // (i, a) where row `i >= target_row` starts at `target_col`.
    fn pivot_candidates<R>(&self, st: &ElimState<R>) -> Vec<(usize, R)>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let a = st.target();
        (self.target_row..a.nrows()).filter_map(|i|
            match a.line(i).first() {
                Some((j, a)) if *j == self.target_col => Some((i, a.clone())),
                _ => None
            }
        ).collect()
    }

    fn row_weight<R>(st: &ElimState<R>, i: usize) -> f64
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        st.target().line(i).iter().map(|(_, a)| a.c_weight()).sum()
    }

    // minimal by (euc_deg, row weight, row index). a unit wins immediately.
    fn select_pivot<R>(st: &ElimState<R>, candidates: &[(usize, R)]) -> Option<usize>
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        if let Some(k) = candidates.iter().position(|(_, a)| a.is_unit()) {
            return Some(k)
        }

        let keys = candidates.iter().map(|(i, a)|
            (a.euc_deg(), Self::row_weight(st, *i), *i)
        ).collect::<Vec<_>>();

        (0..keys.len()).min_by(|&k1, &k2| {
            let (d1, w1, i1) = &keys[k1];
            let (d2, w2, i2) = &keys[k2];
            d1.cmp(d2)
                .then(w1.partial_cmp(w2).unwrap_or(Ordering::Equal))
                .then(i1.cmp(i2))
        })
    }
}

impl<R> Eliminator<R> for RowEchelon
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn prepare(&mut self, st: &mut ElimState<R>) {
        st.switch_alignment(Align::Rows);
    }

    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        let a = st.target();
        let remaining = (self.target_row..a.nrows()).any(|i| !a.line(i).is_empty());

        if !remaining || self.target_col >= a.ncols() {
            return true
        }

        let candidates = self.pivot_candidates(st);

        let Some(k0) = Self::select_pivot(st, &candidates) else {
            self.target_col += 1;
            return false
        };

        let (i0, a0) = &candidates[k0];
        let mut again = false;

        for (i, a) in candidates.iter() {
            if i == i0 {
                continue
            }

            let (q, r) = a.div_rem(a0);
            st.apply(ElimStep::AddRow { src: *i0, dst: *i, r: -q });

            if !r.is_zero() {
                again = true;
            }
        }

        if again {
            return false
        }

        let u = a0.normalizing_unit();
        if !u.is_one() {
            st.apply(ElimStep::MulRow { i: *i0, r: u });
        }

        if *i0 != self.target_row {
            st.apply(ElimStep::SwapRows(*i0, self.target_row));
        }

        self.target_row += 1;
        self.target_col += 1;

        false
    }
}

/// Row echelon form of the transpose.
#[derive(Clone, Debug, Default)]
pub struct ColEchelon;

impl<R> Eliminator<R> for ColEchelon
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        st.run_transposed(RowEchelon::default());
        true
    }
}

#[cfg(test)]
mod tests {
    use eucl::FF;
    use crate::sparse::SpMat;
    use crate::elim::tests::assert_decomp;
    use crate::elim::{eliminate, MatrixForm};
    use super::*;

    fn is_row_echelon<R>(a: &SpMat<R>) -> bool
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let mut heads = vec![];
        for i in 0..a.nrows() {
            let v = a.row_vec(i);
            let head = v.iter().next().map(|(j, x)| (j, x.is_normalized()));
            if let Some((j, normalized)) = head {
                if heads.len() < i || !normalized {
                    return false
                }
                heads.push(j)
            }
        }
        heads.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn row_echelon() {
        let a = SpMat::from_dense_data((3, 4), [
            2, 4, 0, 6,
            1, 2, 1, 3,
            3, 6, 1, 10
        ]);
        let e = eliminate(a.clone(), MatrixForm::RowEchelon);

        assert!(is_row_echelon(e.result()));
        assert!(e.col_ops().is_empty());
        assert_eq!(e.rank(), 3);
        assert_decomp(&a, &e);
    }

    #[test]
    fn row_echelon_skips_col() {
        let a = SpMat::from_dense_data((3, 3), [
            0, 2, 1,
            0, 4, 0,
            0, 0, 0
        ]);
        let e = eliminate(a.clone(), MatrixForm::RowEchelon);

        assert!(is_row_echelon(e.result()));
        assert_eq!(e.result().get(0, 1), 2);
        assert_eq!(e.result().get(1, 2), 2);
        assert_eq!(e.rank(), 2);
        assert_decomp(&a, &e);
    }

    #[test]
    fn row_echelon_remainder() {
        // 6 and 4 leave a remainder, forcing another round.
        let a = SpMat::from_dense_data((2, 2), [6, 1, 4, 1]);
        let e = eliminate(a.clone(), MatrixForm::RowEchelon);

        assert!(is_row_echelon(e.result()));
        assert_eq!(e.result().get(0, 0), 2);
        assert_eq!(e.result().get(1, 0), 0);
        assert_decomp(&a, &e);
    }

    #[test]
    fn row_echelon_normalizes() {
        let a = SpMat::from_dense_data((2, 2), [-3, 1, 0, -2]);
        let e = eliminate(a.clone(), MatrixForm::RowEchelon);

        assert_eq!(e.result(), &SpMat::from_dense_data((2, 2), [3, -1, 0, 2]));
        assert_decomp(&a, &e);
    }

    #[test]
    fn row_echelon_ff() {
        type R = FF<3>;
        let a = SpMat::from_dense_data((3, 3), [1, 2, 0, 2, 1, 0, 0, 1, 1].map(R::from));
        let e = eliminate(a.clone(), MatrixForm::RowEchelon);

        assert!(is_row_echelon(e.result()));
        assert_eq!(e.rank(), 2);
        assert_decomp(&a, &e);
    }

    #[test]
    fn col_echelon() {
        let a = SpMat::from_dense_data((4, 3), [
            2, 1, 3,
            4, 2, 6,
            0, 1, 1,
            6, 3, 10
        ]);
        let e = eliminate(a.clone(), MatrixForm::ColEchelon);

        assert!(is_row_echelon(&e.result().transpose()));
        assert!(e.row_ops().is_empty());
        assert_eq!(e.rank(), 3);
        assert_decomp(&a, &e);
    }

    #[test]
    fn select_pivot() {
        let a = SpMat::from_dense_data((3, 2), [4, 1, 3, 0, 3, 5]);
        let st = ElimState::new(a);
        let e = RowEchelon::default();
        let c = e.pivot_candidates(&st);

        assert_eq!(c, vec![(0, 4), (1, 3), (2, 3)]);
        assert_eq!(RowEchelon::select_pivot(&st, &c), Some(1));

        let a = SpMat::from_dense_data((2, 1), [4, -1]);
        let st = ElimState::new(a);
        let c = e.pivot_candidates(&st);
        assert_eq!(RowEchelon::select_pivot(&st, &c), Some(1));
    }
}
