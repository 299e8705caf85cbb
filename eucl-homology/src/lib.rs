//! Decomposition of finitely generated modules over a Euclidean ring,
//! and homology of sequences of sparse boundary maps.

pub mod config;

mod r_mod_str;
mod summand;
mod module_object;
mod homology_calc;

pub use r_mod_str::*;
pub use summand::*;
pub use module_object::*;
pub use homology_calc::*;
