use std::fmt::{Display, Debug};
use std::str::FromStr;
use std::ops::{Add, Sub, Mul, Div, Rem, Neg, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, Ring, RingOps, EucRing, EucRingOps, Field};

/// Fractions over a Euclidean ring `T`, e.g. `Q = Ratio<i64>`.
///
/// Always reduced: `gcd(numer, denom) = 1`, `denom` is normalized,
/// and zero is stored as `0/1`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ratio<T> {
    numer: T,
    denom: T,
}

impl<T> Ratio<T> {
    pub fn numer(&self) -> &T {
        &self.numer
    }

    pub fn denom(&self) -> &T {
        &self.denom
    }

    pub fn into_parts(self) -> (T, T) {
        (self.numer, self.denom)
    }
}

impl<T> Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    pub fn new(numer: T, denom: T) -> Self {
        assert!(!denom.is_zero(), "zero denominator");

        if numer.is_zero() {
            return Self::zero()
        }

        let g = T::gcd(&numer, &denom);
        let (numer, denom) = if g.is_one() {
            (numer, denom)
        } else {
            (numer / &g, denom / &g)
        };

        let u = denom.normalizing_unit();
        if u.is_one() {
            Self { numer, denom }
        } else {
            Self { numer: numer * &u, denom: denom * &u }
        }
    }

    pub fn from_numer(numer: T) -> Self {
        Self { numer, denom: T::one() }
    }

    pub fn is_integral(&self) -> bool {
        self.denom.is_one()
    }
}

impl<T> From<i32> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn from(i: i32) -> Self {
        Self::from_numer(T::from(i))
    }
}

// "a" or "a/b", with optional whitespace.
impl<T> FromStr for Ratio<T>
where T: EucRing + FromStr, for<'x> &'x T: EucRingOps<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = regex::Regex::new(r"^\s*(-?\w+)\s*(?:/\s*(-?\w+)\s*)?$").map_err(|e| e.to_string())?;
        let err = || format!("cannot parse '{s}' as {}", Self::math_symbol());

        let c = re.captures(s).ok_or_else(err)?;
        let numer = c[1].parse::<T>().map_err(|_| err())?;
        let denom = match c.get(2) {
            Some(m) => m.as_str().parse::<T>().map_err(|_| err())?,
            None => T::one()
        };

        if denom.is_zero() {
            return Err(err())
        }

        Ok(Self::new(numer, denom))
    }
}

impl<T> Default for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T> Display for Ratio<T>
where T: Display + One + PartialEq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::paren_expr;
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", paren_expr(&self.numer), paren_expr(&self.denom))
        }
    }
}

impl<T> Debug for Ratio<T>
where T: Display + One + PartialEq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<T> Zero for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn zero() -> Self {
        Self::from_numer(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl<T> One for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn one() -> Self {
        Self::from_numer(T::one())
    }

    fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }
}

impl<T> Neg for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self { numer: -self.numer, denom: self.denom }
    }
}

impl<T> Neg for &Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn neg(self) -> Ratio<T> {
        Ratio { numer: -&self.numer, denom: self.denom.clone() }
    }
}

#[auto_ops]
impl<'a, 'b, T> Add<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn add(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        if self.denom == rhs.denom {
            Ratio::new(&self.numer + &rhs.numer, self.denom.clone())
        } else {
            let numer = &self.numer * &rhs.denom + &rhs.numer * &self.denom;
            Ratio::new(numer, &self.denom * &rhs.denom)
        }
    }
}

#[auto_ops]
impl<'a, 'b, T> Sub<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn sub(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        self + (-rhs)
    }
}

#[auto_ops]
impl<'a, 'b, T> Mul<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn mul(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        Ratio::new(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

#[auto_ops]
impl<'a, 'b, T> Div<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn div(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        let Some(inv) = rhs.inv() else {
            panic!("division by zero in {}", Ratio::<T>::math_symbol())
        };
        self * inv
    }
}

#[auto_ops]
impl<'a, 'b, T> Rem<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn rem(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        assert!(!rhs.is_zero(), "division by zero in {}", Ratio::<T>::math_symbol());
        Ratio::zero()
    }
}

impl<T> RingOps for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> RingOps<Ratio<T>> for &Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> EucRingOps for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> EucRingOps<Ratio<T>> for &Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> Elem for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn math_symbol() -> String {
        match T::math_symbol().as_str() {
            "Z" => String::from("Q"),
            t => format!("Frac({t})")
        }
    }
}

impl<T> Ring for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn inv(&self) -> Option<Self> {
        (!self.is_zero()).then(|| Self::new(self.denom.clone(), self.numer.clone()))
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or(Self::one())
    }

    // grows with the size of the representation.
    fn c_weight(&self) -> f64 {
        self.numer.c_weight() + self.denom.c_weight()
    }
}

impl<T> EucRing for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type EucDeg = ();
    fn euc_deg(&self) -> Self::EucDeg {}
}

impl<T> Field for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}
