use eucl::{EucRing, EucRingOps};
use super::{Eliminator, ElimState, ElimStep, Diagonal};

/// Smith normal form: a normalized diagonal `d_0 | d_1 | ... | d_{r-1}`.
#[derive(Clone, Debug, Default)]
pub struct Smith {
    target: usize,
    rank: usize,
}

impl Smith {
    // replaces the diagonal pair (a, b) at (i, j) with (gcd, -ab/gcd).
    fn diagonal_gcd<R>(st: &mut ElimState<R>, (i, a): (usize, &R), (j, b): (usize, &R))
    where R: EucRing, for<'x> &'x R: EucRingOps<R> {
        let (r, x, y) = R::gcdx(a, b);

        // r = xa + yb
        // m = -ab/r
        st.apply(ElimStep::AddRow { src: i, dst: j, r: x });       // [a, 0; xa, b]
        st.apply(ElimStep::AddCol { src: j, dst: i, r: y });       // [a, 0;  r, b]
        st.apply(ElimStep::AddRow { src: j, dst: i, r: -(a / &r) }); // [0, m;  r, b]
        st.apply(ElimStep::AddCol { src: i, dst: j, r: -(b / &r) }); // [0, m;  r, 0]
        st.apply(ElimStep::SwapRows(i, j));                        // [r, 0;  0, m]
    }
}

impl<R> Eliminator<R> for Smith
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    fn prepare(&mut self, st: &mut ElimState<R>) {
        Diagonal.run(st);
        self.rank = st.target().count_lines();
    }

    fn iterate(&mut self, st: &mut ElimState<R>) -> bool {
        if self.target >= self.rank {
            return true
        }

        let diag = (self.target..self.rank).map(|i|
            (i, st.target().get(i, i))
        ).collect::<Vec<_>>();

        let Some((i0, a0)) = diag.iter().min_by(|(i1, a1), (i2, a2)|
            a1.euc_deg().cmp(&a2.euc_deg()).then(i1.cmp(i2))
        ) else {
            return true
        };

        if !a0.is_unit() {
            let found = diag.iter().find(|(i, a)| i != i0 && !a0.divides(a));
            if let Some((i, a)) = found {
                Self::diagonal_gcd(st, (*i0, a0), (*i, a));
                return false
            }
        }

        // `a0` divides every remaining entry.
        let u = a0.normalizing_unit();
        if !u.is_one() {
            st.apply(ElimStep::MulRow { i: *i0, r: u });
        }

        if *i0 != self.target {
            st.apply(ElimStep::SwapRows(*i0, self.target));
            st.apply(ElimStep::SwapCols(*i0, self.target));
        }

        self.target += 1;

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::sparse::SpMat;
    use crate::elim::tests::assert_decomp;
    use crate::elim::{eliminate, MatrixForm};
    use super::*;

    #[test]
    fn diagonal_gcd() {
        let a = SpMat::<i32>::from_dense_data((2, 2), [4, 0, 0, 6]);
        let mut st = ElimState::new(a);
        Smith::diagonal_gcd(&mut st, (0, &4), (1, &6));

        let res = st.target();
        assert_eq!(res.get(0, 0), 2);
        assert_eq!(res.get(1, 1).abs(), 12);
        assert_eq!(res.get(0, 1), 0);
        assert_eq!(res.get(1, 0), 0);
    }

    #[test]
    fn smith() {
        let a = SpMat::from_dense_data((3, 3), [
            2, 4, 4,
            -6, 6, 12,
            10, -4, -16
        ]);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![2, 6, 12]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_sorts_diagonal() {
        let a = SpMat::from_dense_data((3, 3), [9, 0, 0, 0, 3, 0, 0, 0, 1]);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![1, 3, 9]);
        assert_decomp(&a, &e);
    }

    #[test]
    fn smith_coprime() {
        let a = SpMat::from_dense_data((2, 2), [2, 0, 0, 3]);
        let e = eliminate(a.clone(), MatrixForm::Smith);
        assert_eq!(e.diagonal(), vec![1, 6]);
        assert_decomp(&a, &e);
    }
}
