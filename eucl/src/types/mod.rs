mod int;
mod ff;
mod ratio;
mod poly;

pub use ff::FF;
pub use ratio::Ratio;
pub use poly::Poly;
