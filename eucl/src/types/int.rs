use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};
use crate::{Elem, Ring, RingOps, EucRing, EucRingOps};

// Z, in every width that elimination is run over.
macro_rules! impl_int_ring {
    ($($t:ty),*) => { $(
        impl RingOps for $t {}
        impl<'a> RingOps<$t> for &'a $t {}
        impl EucRingOps for $t {}
        impl<'a> EucRingOps<$t> for &'a $t {}

        impl Elem for $t {
            fn math_symbol() -> String {
                String::from("Z")
            }
        }

        impl Ring for $t {
            fn inv(&self) -> Option<Self> {
                self.is_unit().then(|| self.clone())
            }

            fn is_unit(&self) -> bool {
                self.abs().is_one()
            }

            fn normalizing_unit(&self) -> Self {
                if self.is_negative() { -Self::one() } else { Self::one() }
            }

            fn c_weight(&self) -> f64 {
                self.abs().to_f64().unwrap_or(f64::MAX)
            }
        }

        impl EucRing for $t {
            type EucDeg = Self;

            fn euc_deg(&self) -> Self {
                self.abs()
            }

            // floored: a non-zero remainder has the sign of `y`.
            fn div_rem(&self, y: &Self) -> (Self, Self) {
                num_integer::Integer::div_mod_floor(self, y)
            }
        }
    )* };
}

impl_int_ring!(i32, i64, i128, BigInt);
