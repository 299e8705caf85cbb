//! Euclidean rings and the coefficient types used by `eucl-matrix`:
//! the integers, prime fields, fractions and univariate polynomials.

mod abst;
mod types;

pub use abst::*;
pub use types::*;

pub mod util;

pub use num_bigint::BigInt;
