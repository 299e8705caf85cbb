use std::fmt::Display;
use num_traits::Zero;
use eucl::{Ring, RingOps};
use eucl_matrix::SpVec;

/// A cyclic summand `R/(d)` with its generator in root coordinates.
/// `d = 0` gives a free summand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "R: Ring + serde::Serialize, for<'x> &'x R: RingOps<R>",
    deserialize = "R: Ring + serde::Deserialize<'de>, for<'x> &'x R: RingOps<R>"
)))]
pub struct Summand<R> {
    divisor: R,
    gen: SpVec<R>,
}

impl<R> Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn free(gen: SpVec<R>) -> Self {
        Self { divisor: R::zero(), gen }
    }

    pub fn torsion(divisor: R, gen: SpVec<R>) -> Self {
        assert!(!divisor.is_zero() && !divisor.is_unit(), "invalid divisor: {divisor}");
        Self { divisor, gen }
    }

    pub(crate) fn new(divisor: R, gen: SpVec<R>) -> Self {
        if divisor.is_zero() {
            Self::free(gen)
        } else {
            Self::torsion(divisor, gen)
        }
    }

    pub fn is_free(&self) -> bool {
        self.divisor.is_zero()
    }

    pub fn is_torsion(&self) -> bool {
        !self.is_free()
    }

    pub fn divisor(&self) -> &R {
        &self.divisor
    }

    pub fn gen(&self) -> &SpVec<R> {
        &self.gen
    }
}

impl<R> Display for Summand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = R::math_symbol();
        if self.is_free() {
            write!(f, "{symbol}")
        } else {
            write!(f, "{symbol}/{}", self.divisor)
        }
    }
}
