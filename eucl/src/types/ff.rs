use std::ops::{Add, Sub, Mul, Div, Rem, Neg, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use std::num::ParseIntError;
use std::str::FromStr;
use derive_more::{Display, Debug};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, Ring, RingOps, EucRing, EucRingOps, Field};

/// The prime field `Z/P`. `P` must be prime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Display, Debug)]
#[display("{_0}")]
#[debug("{_0}")]
pub struct FF<const P: u32>(u32);

impl<const P: u32> FF<P> {
    pub fn new(a: i32) -> Self {
        assert!(P > 1);
        Self((a as i64).rem_euclid(P as i64) as u32)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    fn reduce(a: u64) -> Self {
        Self((a % P as u64) as u32)
    }

    fn pow(&self, mut e: u32) -> Self {
        let mut base = *self;
        let mut res = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                res *= base;
            }
            base *= base;
            e >>= 1;
        }
        res
    }
}

impl<const P: u32> From<i32> for FF<P> {
    fn from(a: i32) -> Self {
        Self::new(a)
    }
}

impl<const P: u32> FromStr for FF<P> {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Self::new)
    }
}

impl<const P: u32> Zero for FF<P> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const P: u32> One for FF<P> {
    fn one() -> Self {
        Self(1)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl<const P: u32> Neg for FF<P> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::reduce((P - self.0) as u64)
    }
}

impl<const P: u32> Neg for &FF<P> {
    type Output = FF<P>;
    fn neg(self) -> FF<P> {
        -*self
    }
}

#[auto_ops]
impl<'a, 'b, const P: u32> Add<&'b FF<P>> for &'a FF<P> {
    type Output = FF<P>;
    fn add(self, rhs: &'b FF<P>) -> FF<P> {
        FF::reduce(self.0 as u64 + rhs.0 as u64)
    }
}

#[auto_ops]
impl<'a, 'b, const P: u32> Sub<&'b FF<P>> for &'a FF<P> {
    type Output = FF<P>;
    fn sub(self, rhs: &'b FF<P>) -> FF<P> {
        FF::reduce(self.0 as u64 + (P - rhs.0) as u64)
    }
}

#[auto_ops]
impl<'a, 'b, const P: u32> Mul<&'b FF<P>> for &'a FF<P> {
    type Output = FF<P>;
    fn mul(self, rhs: &'b FF<P>) -> FF<P> {
        FF::reduce(self.0 as u64 * rhs.0 as u64)
    }
}

#[auto_ops]
impl<'a, 'b, const P: u32> Div<&'b FF<P>> for &'a FF<P> {
    type Output = FF<P>;
    fn div(self, rhs: &'b FF<P>) -> FF<P> {
        let Some(inv) = rhs.inv() else {
            panic!("division by zero in {}", FF::<P>::math_symbol())
        };
        self * inv
    }
}

#[auto_ops]
impl<'a, 'b, const P: u32> Rem<&'b FF<P>> for &'a FF<P> {
    type Output = FF<P>;
    fn rem(self, rhs: &'b FF<P>) -> FF<P> {
        assert!(!rhs.is_zero(), "division by zero in {}", FF::<P>::math_symbol());
        FF::zero()
    }
}

impl<const P: u32> RingOps for FF<P> {}
impl<'a, const P: u32> RingOps<FF<P>> for &'a FF<P> {}
impl<const P: u32> EucRingOps for FF<P> {}
impl<'a, const P: u32> EucRingOps<FF<P>> for &'a FF<P> {}

impl<const P: u32> Elem for FF<P> {
    fn math_symbol() -> String {
        use crate::util::format::subscript;
        format!("F{}", subscript(P))
    }
}

impl<const P: u32> Ring for FF<P> {
    // Fermat: a^(P-1) = 1.
    fn inv(&self) -> Option<Self> {
        (!self.is_zero()).then(|| self.pow(P - 2))
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or(Self::one())
    }

    fn c_weight(&self) -> f64 {
        if self.is_zero() { 0.0 } else { 1.0 }
    }
}

impl<const P: u32> EucRing for FF<P> {
    type EucDeg = ();
    fn euc_deg(&self) -> Self::EucDeg {}
}

impl<const P: u32> Field for FF<P> {}

#[cfg(test)]
mod tests {
    use super::*;

    type F5 = FF<5>;
    type F7 = FF<7>;

    #[test]
    fn new() {
        assert_eq!(F5::new(-7).value(), 3);
        assert_eq!(F7::new(15).value(), 1);
        assert_eq!(F7::from(-1), F7::new(6));
    }

    #[test]
    fn fmt() {
        assert_eq!(F5::math_symbol(), "F₅");
        assert_eq!(F5::new(8).to_string(), "3");
        assert_eq!(format!("{:?}", F5::new(8)), "3");
    }

    #[test]
    fn parse() {
        assert_eq!("-2".parse::<F7>(), Ok(F7::new(5)));
        assert!("two".parse::<F7>().is_err());
    }

    #[test]
    fn arith() {
        let (a, b) = (F7::new(5), F7::new(4));
        assert_eq!(a + b, F7::new(2));
        assert_eq!(b - a, F7::new(6));
        assert_eq!(a * b, F7::new(6));
        assert_eq!(-a, F7::new(2));
        assert_eq!(-F7::zero(), F7::zero());
        assert_eq!(a / b, F7::new(3));
        assert_eq!(a % b, F7::zero());

        let mut c = a;
        c *= b;
        c -= F7::new(6);
        assert!(c.is_zero());
    }

    #[test]
    fn inv() {
        for i in 1..7 {
            let a = F7::new(i);
            assert_eq!(a * a.inv().unwrap(), F7::one());
        }
        assert_eq!(F7::zero().inv(), None);
        assert_eq!(F7::new(3).normalizing_unit(), F7::new(5));
    }

    #[test]
    #[should_panic]
    fn div_zero() {
        let _ = F5::one() / F5::zero();
    }
}
