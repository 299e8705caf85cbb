pub use crate::MatTrait;

mod sp_mat;
mod sp_vec;
pub use sp_mat::{SpMat, Align};
pub use sp_vec::SpVec;

mod trans;
pub use trans::*;
