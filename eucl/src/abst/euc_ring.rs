use std::ops::{Div, DivAssign, Rem, RemAssign};
use crate::{Ring, RingOps};

pub trait EucRingOps<T = Self>:
    RingOps<T> +
    Div<T, Output = T> +
    for<'a> Div<&'a T, Output = T> +
    Rem<T, Output = T> +
    for<'a> Rem<&'a T, Output = T>
{}

/// A ring with division with remainder.
///
/// `x.div_rem(y) = (q, r)` satisfies `x = q y + r`, where `r` is zero or
/// `r.euc_deg() < y.euc_deg()`. Everything else here is derived from it.
pub trait EucRing:
    Ring +
    EucRingOps +
    DivAssign +
    for<'a> DivAssign<&'a Self> +
    RemAssign +
    for<'a> RemAssign<&'a Self>
where
    for<'a> &'a Self: EucRingOps<Self>
{
    type EucDeg: Ord;

    fn euc_deg(&self) -> Self::EucDeg;

    fn div_rem(&self, y: &Self) -> (Self, Self) {
        (self / y, self % y)
    }

    fn divides(&self, y: &Self) -> bool {
        !self.is_zero() && (y % self).is_zero()
    }

    // normalized.
    fn gcd(x: &Self, y: &Self) -> Self {
        Self::gcdx(x, y).0
    }

    // (d, s, t) with d = sx + ty, d normalized.
    fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) {
        // invariants: a = s0 x + t0 y, b = s1 x + t1 y.
        let mut a = (x.clone(), Self::one(), Self::zero());
        let mut b = (y.clone(), Self::zero(), Self::one());

        while !b.0.is_zero() {
            let (q, r) = a.0.div_rem(&b.0);
            let s = &a.1 - &q * &b.1;
            let t = &a.2 - &q * &b.2;
            a = std::mem::replace(&mut b, (r, s, t));
        }

        let (d, s, t) = a;
        let u = d.normalizing_unit();

        if u.is_one() {
            (d, s, t)
        } else {
            (d * &u, s * &u, t * &u)
        }
    }

    fn lcm(x: &Self, y: &Self) -> Self {
        if x.is_zero() || y.is_zero() {
            return Self::zero()
        }
        let l = x * (y / Self::gcd(x, y));
        let u = l.normalizing_unit();
        l * u
    }
}

/// A ring in which every non-zero element is a unit.
/// The Euclidean structure is the trivial one: every remainder is zero.
pub trait Field: EucRing
where for<'a> &'a Self: EucRingOps<Self> {}
