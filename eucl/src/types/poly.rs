use std::fmt::{Display, Debug};
use std::ops::{Add, Sub, Mul, Neg, Div, Rem, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use itertools::Itertools;
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, Ring, RingOps, EucRing, EucRingOps, Field};
use crate::util::format::{lc, superscript};

// Univariate polynomials in `X` over `R`.
// Coefficients are stored lowest degree first, with no trailing zeros.

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Poly<const X: char, R> { 
    coeffs: Vec<R>
}

impl<const X: char, R> Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(coeffs: Vec<R>) -> Self { 
        let mut p = Self { coeffs };
        p.trim();
        p
    }

    pub fn from_const(r: R) -> Self { 
        Self::new(vec![r])
    }

    pub fn mono(r: R, deg: usize) -> Self { 
        let mut coeffs = vec![R::zero(); deg + 1];
        coeffs[deg] = r;
        Self::new(coeffs)
    }

    pub fn variable() -> Self { 
        Self::mono(R::one(), 1)
    }

    pub fn var_symbol() -> char { 
        X
    }

    pub fn coeffs(&self) -> &[R] { 
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> R { 
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    // degree of the zero polynomial is taken to be 0.
    pub fn deg(&self) -> usize { 
        self.coeffs.len().saturating_sub(1)
    }

    pub fn is_const(&self) -> bool { 
        self.coeffs.len() <= 1
    }

    pub fn lead_coeff(&self) -> R { 
        self.coeffs.last().cloned().unwrap_or_else(R::zero)
    }

    pub fn eval(&self, x: &R) -> R { 
        self.coeffs.iter().rev().fold(R::zero(), |res, a| res * x + a)
    }

    pub fn map_coeffs<F>(&self, f: F) -> Self
    where F: Fn(&R) -> R { 
        Self::new(self.coeffs.iter().map(f).collect())
    }

    fn trim(&mut self) { 
        while self.coeffs.last().is_some_and(|a| a.is_zero()) { 
            self.coeffs.pop();
        }
    }
}

impl<const X: char, R> From<i32> for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(i: i32) -> Self {
        Self::from_const(R::from(i))
    }
}

impl<const X: char, R> Display for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() { 
            return f.write_str("0")
        }

        let terms = self.coeffs.iter().enumerate().rev().filter(|(_, a)| !a.is_zero()).map(|(i, a)| { 
            let x = match i { 
                0 => "1".to_string(),
                1 => X.to_string(),
                _ => format!("{X}{}", superscript(i))
            };
            (x, a)
        }).collect_vec();

        f.write_str(&lc(terms.into_iter()))
    }
}

impl<const X: char, R> Debug for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<const X: char, R> Zero for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl<const X: char, R> One for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn one() -> Self {
        Self::from_const(R::one())
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }
}

impl<const X: char, R> Neg for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self { coeffs: self.coeffs.into_iter().map(|a| -a).collect() }
    }
}

impl<const X: char, R> Neg for &Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Poly<X, R>;
    fn neg(self) -> Self::Output {
        Poly { coeffs: self.coeffs.iter().map(|a| -a).collect() }
    }
}

macro_rules! impl_add_op {
    ($trait:ident, $method:ident) => {
        #[auto_ops]
        impl<const X: char, R> $trait<&Poly<X, R>> for Poly<X, R>
        where R: Ring, for<'x> &'x R: RingOps<R> {
            fn $method(&mut self, rhs: &Poly<X, R>) {
                if self.coeffs.len() < rhs.coeffs.len() { 
                    self.coeffs.resize(rhs.coeffs.len(), R::zero());
                }
                for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) { 
                    a.$method(b);
                }
                self.trim();
            }
        }
    };
}

impl_add_op!(AddAssign, add_assign);
impl_add_op!(SubAssign, sub_assign);

#[auto_ops]
impl<'a, 'b, const X: char, R> Mul<&'b Poly<X, R>> for &'a Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Poly<X, R>;
    fn mul(self, rhs: &'b Poly<X, R>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() { 
            return Poly::zero()
        }

        let mut coeffs = vec![R::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() { 
            if a.is_zero() { continue }
            for (j, b) in rhs.coeffs.iter().enumerate() { 
                coeffs[i + j] += a * b;
            }
        }
        Poly::new(coeffs)
    }
}

macro_rules! impl_alg_op {
    ($trait:ident) => {
        impl<const X: char, R> $trait<Self> for Poly<X, R>
        where R: Ring, for<'x> &'x R: RingOps<R> {}

        impl<const X: char, R> $trait<Poly<X, R>> for &Poly<X, R>
        where R: Ring, for<'x> &'x R: RingOps<R> {}
    };
}

impl_alg_op!(RingOps);

impl<const X: char, R> Elem for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn math_symbol() -> String {
        format!("{}[{X}]", R::math_symbol())
    }
}

impl<const X: char, R> Ring for Poly<X, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn inv(&self) -> Option<Self> {
        if self.is_const() { 
            let a = self.coeffs.first()?;
            a.inv().map(Self::from_const)
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.is_const() && self.coeffs.first().is_some_and(|a| a.is_unit())
    }

    fn normalizing_unit(&self) -> Self {
        match self.coeffs.last() { 
            Some(a) => Self::from_const(a.normalizing_unit()),
            None => Self::one()
        }
    }

    fn c_weight(&self) -> f64 {
        self.coeffs.len() as f64
    }
}

// Euclidean over a field.

impl<const X: char, R> Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {
    fn long_div(&self, rhs: &Self) -> (Self, Self) { 
        assert!(!rhs.is_zero(), "division by zero polynomial");

        let mut q = Self::zero();
        let mut r = self.clone();

        let j = rhs.deg();
        let b = rhs.lead_coeff();

        while !r.is_zero() && r.deg() >= j { 
            let k = r.deg() - j;
            let c = r.lead_coeff() / &b;
            let t = Self::mono(c, k);   // (a/b) x^{i-j}
            r -= &t * rhs;
            q += t;
        }

        (q, r)
    }
}

#[auto_ops]
impl<'a, 'b, const X: char, R> Div<&'b Poly<X, R>> for &'a Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {
    type Output = Poly<X, R>;
    fn div(self, rhs: &'b Poly<X, R>) -> Self::Output {
        self.long_div(rhs).0
    }
}

#[auto_ops]
impl<'a, 'b, const X: char, R> Rem<&'b Poly<X, R>> for &'a Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {
    type Output = Poly<X, R>;
    fn rem(self, rhs: &'b Poly<X, R>) -> Self::Output {
        self.long_div(rhs).1
    }
}

impl<const X: char, R> EucRingOps<Poly<X, R>> for Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {}

impl<const X: char, R> EucRingOps<Poly<X, R>> for &Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {}

impl<const X: char, R> EucRing for Poly<X, R>
where R: Field, for<'x> &'x R: EucRingOps<R> {
    type EucDeg = usize;

    fn euc_deg(&self) -> usize {
        self.deg()
    }

    fn div_rem(&self, y: &Self) -> (Self, Self) { 
        self.long_div(y)
    }
}

#[cfg(test)]
mod tests { 
    use super::*;
    use crate::{Ratio, FF};

    type Q = Ratio<i64>;
    type P = Poly<'x', Q>;

    fn q(a: i64) -> Q { 
        Q::from_numer(a)
    }

    fn p(coeffs: &[i64]) -> P { 
        P::new(coeffs.iter().map(|&a| q(a)).collect())
    }

    #[test]
    fn init() { 
        let f = p(&[1, 2, 0, 0]);
        assert_eq!(f.deg(), 1);
        assert_eq!(f.coeffs().len(), 2);
        assert_eq!(f.coeff(5), q(0));
        assert!(p(&[0, 0]).is_zero());
    }

    #[test]
    fn math_symbol() { 
        assert_eq!(P::math_symbol(), "Q[x]");
    }

    #[test]
    fn display() { 
        assert_eq!(p(&[1, 2, 1]).to_string(), "x² + 2x + 1");
        assert_eq!(p(&[0, -1, 0, 3]).to_string(), "3x³ - x");
        assert_eq!(P::zero().to_string(), "0");
    }

    #[test]
    fn add_sub() { 
        let f = p(&[1, 2, 1]);
        let g = p(&[-1, 0, -1]);
        assert_eq!(&f + &g, p(&[0, 2]));
        assert_eq!(&f - &f, P::zero());
        assert_eq!(-&f, p(&[-1, -2, -1]));
    }

    #[test]
    fn mul() { 
        let f = p(&[1, 1]);
        let g = p(&[-1, 1]);
        assert_eq!(&f * &g, p(&[-1, 0, 1]));
        assert_eq!(&f * P::zero(), P::zero());
    }

    #[test]
    fn eval() { 
        let f = p(&[1, 2, 1]);
        assert_eq!(f.eval(&q(2)), q(9));
    }

    #[test]
    fn div_rem() { 
        let f = p(&[1, 0, 0, 1]); // x³ + 1
        let g = p(&[1, 1]);       // x + 1
        let (d, r) = f.div_rem(&g);
        assert_eq!(d, p(&[1, -1, 1]));
        assert!(r.is_zero());

        let f = p(&[2, 0, 1]);    // x² + 2
        let (d, r) = f.div_rem(&g);
        assert_eq!(&d * &g + &r, f);
        assert!(r.deg() < g.deg() || r.is_zero());
        assert_eq!(r, p(&[3]));
    }

    #[test]
    fn unit() { 
        assert!(p(&[3]).is_unit());
        assert!(!p(&[0, 1]).is_unit());
        assert_eq!(p(&[3]).inv(), Some(P::from_const(Q::new(1, 3))));
        assert_eq!(p(&[1, 4]).normalizing_unit(), P::from_const(Q::new(1, 4)));
    }

    #[test]
    fn gcd() { 
        let f = p(&[-1, 0, 1]); // (x - 1)(x + 1)
        let g = p(&[1, 2, 1]);  // (x + 1)²
        let d = P::gcd(&f, &g);
        assert_eq!(d, p(&[1, 1]));

        let (d, s, t) = P::gcdx(&f, &g);
        assert_eq!(d, p(&[1, 1]));
        assert_eq!(s * &f + t * &g, d);
    }

    #[test]
    fn over_ff() { 
        type F = FF<3>;
        let f = Poly::<'t', F>::new(vec![F::new(1), F::new(0), F::new(1)]); // t² + 1
        let g = Poly::<'t', F>::new(vec![F::new(2), F::new(1)]);             // t + 2
        let (d, r) = f.div_rem(&g);
        assert_eq!(&d * &g + &r, f);
        assert_eq!(f.euc_deg(), 2);
    }
}
