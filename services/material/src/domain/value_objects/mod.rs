//! 值对象

mod buy_price;
mod ids;
mod material_code;

pub use buy_price::*;
pub use ids::*;
pub use material_code::*;
