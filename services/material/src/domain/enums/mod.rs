//! 枚举类型

mod material_type;

pub use material_type::*;
