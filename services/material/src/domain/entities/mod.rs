//! 实体

mod material;
mod supplier;

pub use material::*;
pub use supplier::*;
