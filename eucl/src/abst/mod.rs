mod elem;
mod ring;
mod euc_ring;

pub use elem::*;
pub use ring::*;
pub use euc_ring::*;
