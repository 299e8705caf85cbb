mod base;
pub use base::*;

pub mod sparse;
pub mod elim;

pub use sparse::{SpMat, SpVec, Trans, Align};
pub use elim::{MatrixForm, ElimResult, eliminate};
