use std::marker::PhantomData;
use log::*;

use eucl::{EucRing, EucRingOps};
use eucl_matrix::{SpMat, MatTrait, MatrixForm, eliminate};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::{ModuleObject, RModStr};

pub struct HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    _r: PhantomData<R>
}

impl<R> HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    //           d_in          d_out
    //     C ----------> V -----------> W
    //                   ^
    //                   | Z = Ker(d_out),  T * Z = I
    //                   |
    //                  R^z
    //
    //  H = Ker(d_out) / Im(d_in)
    //    ≅ R^z / T * Im(d_in)

    pub fn calculate(d_in: SpMat<R>, d_out: SpMat<R>) -> ModuleObject<R> {
        assert_eq!(d_in.nrows(), d_out.ncols(), "non-composable: {:?}, {:?}", d_in.shape(), d_out.shape());
        debug_assert!((&d_out * &d_in).is_zero(), "d_out * d_in != 0");

        let n = d_in.nrows();
        if n == 0 {
            return ModuleObject::zero(0)
        }

        info!("calculate homology: {} -> {} -> {}", d_in.ncols(), n, d_out.nrows());

        let e_out = eliminate(d_out, MatrixForm::Diagonal);
        let z = e_out.kernel().clone();
        let t = e_out.kernel_trans().clone();

        let e_in = eliminate(d_in, MatrixForm::Diagonal);
        let b = &t * e_in.image();

        trace!("ker: {}, im: {}", z.ncols(), b.ncols());

        let h = ModuleObject::new(z, t, b);

        info!("homology: {}", h.math_symbol());

        h
    }

    /// Homology at every object of `C_0 -> C_1 -> ... -> C_l`, given the
    /// composable maps `ds = [d_0, ..., d_{l-1}]`.
    pub fn calculate_seq(ds: Vec<SpMat<R>>) -> Vec<ModuleObject<R>> {
        if ds.is_empty() {
            return vec![]
        }

        for (d0, d1) in ds.iter().zip(ds.iter().skip(1)) {
            assert_eq!(d0.nrows(), d1.ncols(), "non-composable: {:?}, {:?}", d0.shape(), d1.shape());
        }

        let dims = ds.iter().map(|d| d.ncols()).chain(
            ds.last().map(|d| d.nrows())
        ).collect::<Vec<_>>();

        let l = dims.len();
        let pairs = (0..l).map(|i| {
            let d_in = if i > 0 {
                ds[i - 1].clone()
            } else {
                SpMat::zero((dims[0], 0))
            };
            let d_out = if i < l - 1 {
                ds[i].clone()
            } else {
                SpMat::zero((0, dims[l - 1]))
            };
            (d_in, d_out)
        }).collect::<Vec<_>>();

        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                if crate::config::is_multithread_enabled() {
                    pairs.into_par_iter().map(|(d_in, d_out)|
                        Self::calculate(d_in, d_out)
                    ).collect()
                } else {
                    pairs.into_iter().map(|(d_in, d_out)|
                        Self::calculate(d_in, d_out)
                    ).collect()
                }
            } else {
                pairs.into_iter().map(|(d_in, d_out)|
                    Self::calculate(d_in, d_out)
                ).collect()
            }
        }
    }
}
