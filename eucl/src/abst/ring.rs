use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_traits::{One, Zero};
use crate::Elem;

/// Arithmetic shared by `T` and `&T`, so that generic code can write
/// `&a * &b` without cloning.
pub trait RingOps<T = Self>:
    Sized +
    Neg<Output = T> +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T> +
    Sub<T, Output = T> +
    for<'a> Sub<&'a T, Output = T> +
    Mul<T, Output = T> +
    for<'a> Mul<&'a T, Output = T>
{}

/// A commutative ring with unit.
///
/// Besides the arithmetic, elimination needs to recognize units and to
/// bring an element to its canonical associate (`normalizing_unit`), and
/// uses `c_weight` to prefer sparse, small pivots.
pub trait Ring:
    Elem +
    Zero +
    One +
    From<i32> +
    RingOps +
    AddAssign +
    for<'a> AddAssign<&'a Self> +
    SubAssign +
    for<'a> SubAssign<&'a Self> +
    MulAssign +
    for<'a> MulAssign<&'a Self>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;

    // `u` such that `u * self` is the canonical associate of `self`.
    fn normalizing_unit(&self) -> Self;

    fn c_weight(&self) -> f64;

    fn is_normalized(&self) -> bool {
        self.normalizing_unit().is_one()
    }

    // (-1)^n
    fn from_parity(n: usize) -> Self {
        if n % 2 == 0 { Self::one() } else { -Self::one() }
    }
}
